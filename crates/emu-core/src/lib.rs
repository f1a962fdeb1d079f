//! Core traits and types for cycle-accurate emulation.
//!
//! Everything advances in ticks of one master clock. Component timing
//! derives from that clock and nothing else; there is no second source
//! of time anywhere in a machine.

mod clock;
mod io;
mod tickable;
mod ticks;

pub use clock::MasterClock;
pub use io::{FLOATING_BUS, IoBus, IoDevice};
pub use tickable::Tickable;
pub use ticks::Ticks;
