//! ZX Spectrum emulator binary.
//!
//! Drives the machine with a winit window and a pixels framebuffer, or
//! headless for screenshot capture. Files on the command line are
//! classified by extension: `.rom`, `.sna`, `.scr`.
//!
//! The CPU core bound here is the free-running placeholder from
//! `zilog-z80-bus`: the bus, timing, raster and loading paths are all
//! real, the instruction stream is not. See that crate for the contract
//! a real core plugs into.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use emu_spectrum::{CRT_HEIGHT, CRT_WIDTH, Scheduler, Spectrum, capture, load_sna};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};
use zilog_z80_bus::NopCore;

/// ROM tried when no `.rom` argument is given. Failure is non-fatal.
const DEFAULT_ROM: &str = "48.rom";

/// Expected ROM image length.
const ROM_LEN: usize = 16_384;

/// Screen dump length: bitmap plus attributes.
const SCR_LEN: usize = 6_912;

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    /// Positional file arguments, classified later by extension.
    files: Vec<PathBuf>,
    headless: bool,
    frames: u32,
    screenshot_path: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        files: Vec::new(),
        headless: false,
        frames: 200,
        screenshot_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--headless" => {
                cli.headless = true;
            }
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().unwrap_or(200);
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--help" | "-h" => {
                eprintln!("Usage: emu-spectrum [OPTIONS] [FILE...]");
                eprintln!();
                eprintln!("Files are classified by extension:");
                eprintln!("  .rom   16K ROM image, loaded at $0000");
                eprintln!("  .sna   machine-state snapshot");
                eprintln!("  .scr   screen dump, loaded at $4000");
                eprintln!();
                eprintln!("If no ROM is given, {DEFAULT_ROM} is tried; failing that, a");
                eprintln!("built-in placeholder pattern is displayed.");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --headless           Run without a window");
                eprintln!("  --frames <n>         Frames to run headless [default: 200]");
                eprintln!("  --screenshot <file>  Save a PNG of the CRT after a headless run");
                eprintln!("  -h, --help           Show this help");
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
            _ => {
                cli.files.push(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

fn load_region(
    spectrum: &mut Spectrum<NopCore>,
    path: &Path,
    dest: u16,
    len: usize,
) -> Result<(), String> {
    let mut file = fs::File::open(path).map_err(|e| e.to_string())?;
    spectrum
        .memory_mut()
        .load_image(&mut file, dest, len)
        .map_err(|e| e.to_string())
}

fn load_snapshot(spectrum: &mut Spectrum<NopCore>, path: &Path) -> Result<(), String> {
    let data = fs::read(path).map_err(|e| e.to_string())?;
    load_sna(spectrum, &data)
}

/// Load each file argument in order. Returns whether a ROM was loaded.
/// Any failure on an explicitly supplied file is fatal.
fn load_files(spectrum: &mut Spectrum<NopCore>, files: &[PathBuf]) -> bool {
    let mut rom_loaded = false;
    for path in files {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let result = match ext {
            "rom" => {
                rom_loaded = true;
                load_region(spectrum, path, 0x0000, ROM_LEN)
            }
            "scr" => load_region(spectrum, path, 0x4000, SCR_LEN),
            "sna" => load_snapshot(spectrum, path),
            _ => {
                eprintln!("Unknown file type: {}", path.display());
                process::exit(1);
            }
        };
        match result {
            Ok(()) => eprintln!("Loaded: {}", path.display()),
            Err(e) => {
                eprintln!("Error loading {}: {e}", path.display());
                process::exit(1);
            }
        }
    }
    rom_loaded
}

fn make_spectrum(cli: &CliArgs) -> Spectrum<NopCore> {
    let mut spectrum = Spectrum::new(NopCore::new());

    let rom_loaded = load_files(&mut spectrum, &cli.files);

    if !rom_loaded {
        // Best-effort: without a ROM the placeholder pattern still
        // proves out the display path.
        if let Err(e) = load_region(&mut spectrum, Path::new(DEFAULT_ROM), 0x0000, ROM_LEN) {
            eprintln!("Could not load {DEFAULT_ROM}: {e}; showing placeholder pattern");
        }
    }

    spectrum
}

// ---------------------------------------------------------------------------
// Headless mode
// ---------------------------------------------------------------------------

fn run_headless(cli: &CliArgs) {
    let mut spectrum = make_spectrum(cli);
    let mut scheduler = Scheduler::new();

    for _ in 0..cli.frames {
        scheduler.run_until_refresh(&mut spectrum);
    }

    if let Some(ref path) = cli.screenshot_path {
        if let Err(e) = capture::save_screenshot(spectrum.crt(), path) {
            eprintln!("Screenshot error: {e}");
            process::exit(1);
        }
        eprintln!("Screenshot saved to {}", path.display());
    }
}

// ---------------------------------------------------------------------------
// Windowed mode (winit + pixels)
// ---------------------------------------------------------------------------

struct App {
    spectrum: Spectrum<NopCore>,
    scheduler: Scheduler,
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
}

impl App {
    fn new(spectrum: Spectrum<NopCore>) -> Self {
        Self {
            spectrum,
            scheduler: Scheduler::new(),
            window: None,
            pixels: None,
        }
    }

    /// Copy the CRT raster into the pixels frame (RGBA32 words → bytes).
    fn update_pixels(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        let buffer = self.spectrum.crt().buffer();
        let frame = pixels.frame_mut();
        for (i, &sample) in buffer.iter().enumerate() {
            let offset = i * 4;
            frame[offset] = (sample >> 24) as u8;
            frame[offset + 1] = (sample >> 16) as u8;
            frame[offset + 2] = (sample >> 8) as u8;
            frame[offset + 3] = 0xFF;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already created
        }

        let window_size = winit::dpi::LogicalSize::new(CRT_WIDTH, CRT_HEIGHT);
        let attrs = WindowAttributes::default()
            .with_title("ZX Spectrum 48K")
            .with_inner_size(window_size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                // Leak the window to get a 'static reference. Intentional:
                // it lives for the whole run and the OS reclaims it on exit.
                let window: &'static Window = Box::leak(Box::new(window));
                let inner = window.inner_size();
                let surface = SurfaceTexture::new(inner.width, inner.height, window);
                match Pixels::new(CRT_WIDTH, CRT_HEIGHT, surface) {
                    Ok(pixels) => {
                        self.pixels = Some(pixels);
                    }
                    Err(e) => {
                        eprintln!("Failed to create pixels: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                self.window = Some(window);
            }
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key
                    && event.state == ElementState::Pressed
                {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                // One frame's worth of batches, then present and pace.
                self.scheduler.run_until_refresh(&mut self.spectrum);
                self.update_pixels();

                if let Some(pixels) = self.pixels.as_ref() {
                    if let Err(e) = pixels.render() {
                        eprintln!("Render error: {e}");
                        event_loop.exit();
                        return;
                    }
                }

                self.scheduler.pace();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window {
            window.request_redraw();
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = parse_args();

    if cli.headless {
        run_headless(&cli);
        return;
    }

    let spectrum = make_spectrum(&cli);
    let mut app = App::new(spectrum);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            eprintln!("Failed to create event loop: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {e}");
        process::exit(1);
    }
}
