//! Pin-accurate ZX Spectrum 48K emulator.
//!
//! The CPU, the video-timing controller (ULA) and the CRT all advance in
//! lockstep, one T-state at a time: every tick the ULA drives the CPU
//! adapter, the adapter resolves whatever bus transaction the core left
//! on its pins, and the ULA fetches whatever the beam position calls for
//! and hands it to the CRT. The display is not a framebuffer blit; it
//! is an interlaced, phosphor-persistent raster built eight pixels at a
//! time as the beam sweeps.
//!
//! The Z80 core itself is an external collaborator bound through
//! [`zilog_z80_bus::PinCpu`]; see that crate for the contract.

pub mod capture;
mod cpu;
mod crt;
mod io;
mod memory;
mod palette;
mod scheduler;
pub mod sna;
mod spectrum;
mod ula;

pub use cpu::CpuAdapter;
pub use crt::{CRT_HEIGHT, CRT_WIDTH, Crt};
pub use io::{BorderLatch, ULA_PORT_MASK, UlaPort};
pub use memory::Memory;
pub use scheduler::{BATCH_TSTATES, CLOCK_HZ, Scheduler};
pub use sna::load_sna;
pub use spectrum::Spectrum;
pub use ula::{LINES_PER_FIELD, TSTATES_PER_FIELD, TSTATES_PER_LINE, Ula};
