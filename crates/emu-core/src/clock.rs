//! Master clock configuration.

use std::time::Duration;

use crate::Ticks;

/// Master clock for an emulated system.
///
/// Each system has one crystal that drives all timing. Real-time pacing
/// converts executed ticks back into wall-clock time through this
/// frequency; the emulation itself never looks at a wall clock.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// Crystal frequency in Hz (e.g. `3_500_000` for a 48K Spectrum).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Wall-clock time that `ticks` of execution represent at this
    /// frequency (microsecond resolution).
    #[must_use]
    pub const fn elapsed_for(&self, ticks: Ticks) -> Duration {
        Duration::from_micros(ticks.get() * 1_000_000 / self.frequency_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_for_whole_seconds() {
        let clock = MasterClock::new(3_500_000);
        assert_eq!(clock.elapsed_for(Ticks::new(3_500_000)), Duration::from_secs(1));
        assert_eq!(clock.elapsed_for(Ticks::ZERO), Duration::ZERO);
    }

    #[test]
    fn elapsed_for_one_frame() {
        // 69,888 T-states at 3.5 MHz is just under a 50 Hz frame.
        let clock = MasterClock::new(3_500_000);
        let frame = clock.elapsed_for(Ticks::new(69_888));
        assert_eq!(frame, Duration::from_micros(19_968));
    }
}
