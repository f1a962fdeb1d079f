//! Real-time batch scheduler.
//!
//! T-states execute in fixed-size batches to amortize event-loop
//! overhead. A display refresh is due every 69,888 T-states (once per
//! field), and the boundary bookkeeping stays correct for batch sizes
//! that do not divide the field length. Pacing is a cooperative
//! throttle, not a hard real-time guarantee: once per frame the
//! virtual-vs-real skew is measured and any lead is slept off. Falling
//! behind is tolerated; the loop never tries to catch up, and the skew
//! is re-measured from scratch each time.

use std::time::{Duration, Instant};

use emu_core::{MasterClock, Tickable, Ticks};
use spin_sleep::SpinSleeper;

use crate::ula::TSTATES_PER_FIELD;

/// Nominal CPU clock: 3.5 MHz.
pub const CLOCK_HZ: u64 = 3_500_000;

/// T-states per batch: 13 character rows' worth of scanlines.
pub const BATCH_TSTATES: u64 = 13 * 8 * 224;

/// Don't sleep for less than this, and leave this much unslept so
/// wakeup jitter lands us on time rather than late.
const PACE_MARGIN: Duration = Duration::from_millis(1);

/// Batch executor with frame-boundary and wall-clock bookkeeping.
pub struct Scheduler {
    clock: MasterClock,
    batch: u64,
    executed: Ticks,
    /// T-state count at which the next refresh falls due.
    next_refresh: u64,
    started: Instant,
    sleeper: SpinSleeper,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_batch(BATCH_TSTATES)
    }

    /// Scheduler with a specific batch size. Tests use sizes that do
    /// not divide the field length.
    #[must_use]
    pub fn with_batch(batch: u64) -> Self {
        Self {
            clock: MasterClock::new(CLOCK_HZ),
            batch,
            executed: Ticks::ZERO,
            next_refresh: 0,
            started: Instant::now(),
            sleeper: SpinSleeper::default(),
        }
    }

    /// Run batches until the T-state counter crosses the next frame
    /// boundary. Exactly one refresh is due when this returns.
    pub fn run_until_refresh(&mut self, machine: &mut impl Tickable) {
        loop {
            machine.tick_n(Ticks::new(self.batch));
            self.executed += Ticks::new(self.batch);
            if self.executed.get() >= self.next_refresh {
                self.next_refresh += TSTATES_PER_FIELD;
                return;
            }
        }
    }

    /// Sleep off any lead over the wall clock.
    pub fn pace(&mut self) {
        let expected = self.clock.elapsed_for(self.executed);
        let elapsed = self.started.elapsed();
        if let Some(ahead) = expected.checked_sub(elapsed)
            && ahead > PACE_MARGIN
        {
            self.sleeper.sleep(ahead - PACE_MARGIN);
        }
    }

    /// Total T-states executed through this scheduler.
    #[must_use]
    pub fn executed(&self) -> Ticks {
        self.executed
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
