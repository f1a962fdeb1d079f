//! Headless capture: PNG screenshots of the CRT.

use std::error::Error;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::crt::{CRT_HEIGHT, CRT_WIDTH, Crt};

/// Save the accumulated CRT raster as a PNG file.
///
/// The raster is RGBA32 words (R in the high byte); the encoder wants
/// RGBA bytes. Alpha is forced opaque; the phosphor arithmetic leaves
/// decayed alpha in dark cells.
pub fn save_screenshot(crt: &Crt, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, CRT_WIDTH, CRT_HEIGHT);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgba = Vec::with_capacity((CRT_WIDTH * CRT_HEIGHT * 4) as usize);
    for &pixel in crt.buffer() {
        rgba.push((pixel >> 24) as u8);
        rgba.push((pixel >> 16) as u8);
        rgba.push((pixel >> 8) as u8);
        rgba.push(0xFF);
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}
