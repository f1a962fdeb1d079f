//! CRT beam palette.
//!
//! Eight RGBA base colours for the 3-bit ink and paper fields. BRIGHT is
//! deliberately not a palette entry: the CRT models it as stronger
//! bleed-through into the adjacent field's scanline (see `crt.rs`), the
//! way the extra beam energy actually reads on a tube.

/// RGBA32 palette (R in the high byte, A in the low), indexed by the
/// 3-bit colour number: black, blue, red, magenta, green, cyan, yellow,
/// white.
pub const PALETTE: [u32; 8] = [
    0x0000_0000, // 0: black
    0x0000_FFFF, // 1: blue
    0xFF00_0000, // 2: red
    0xFF00_FFFF, // 3: magenta
    0x00FF_0000, // 4: green
    0x00FF_FFFF, // 5: cyan
    0xFFFF_0000, // 6: yellow
    0xFFFF_FFFF, // 7: white
];
