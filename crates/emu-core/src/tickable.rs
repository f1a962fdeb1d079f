//! Trait for components that can be advanced by clock ticks.

use crate::Ticks;

/// A component advanced by master clock ticks.
///
/// This is the core abstraction for cycle-accurate emulation: a machine,
/// or any component inside one, exposes its forward progress as a
/// sequence of single-tick steps. Batching is a caller concern.
pub trait Tickable {
    /// Advance the component by one master clock tick.
    fn tick(&mut self);

    /// Advance the component by multiple ticks.
    ///
    /// Default implementation calls `tick()` in a loop. Implementations
    /// may override for efficiency but must produce identical results.
    fn tick_n(&mut self, count: Ticks) {
        for _ in 0..count.get() {
            self.tick();
        }
    }
}
