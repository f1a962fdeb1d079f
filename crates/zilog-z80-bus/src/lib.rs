//! Pin-level Zilog Z80 bus contract.
//!
//! A machine built on this crate drives its CPU the way the board does:
//! one tick per T-state, all communication through a bit-packed snapshot
//! of the external bus pins. The crate defines the pin word, the
//! register file snapshot, and the [`PinCpu`] trait an external core
//! must satisfy. Instruction decode lives in the bound core, not here.

mod cpu;
mod nop;
mod pins;
mod registers;
#[cfg(feature = "test-utils")]
mod testing;

pub use cpu::PinCpu;
pub use nop::NopCore;
pub use pins::Pins;
pub use registers::Registers;
#[cfg(feature = "test-utils")]
pub use testing::ScriptedCore;
