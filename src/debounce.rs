//! Debounce filter for the button interrupt.

use embassy_time::{Duration, Instant};

/// Default debounce window.
///
/// The reference hardware filtered with 20 ticks of a 250 Hz system tick,
/// i.e. 80 ms. Kept as a duration so it is independent of the host tick
/// rate.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(80);

/// Rejects edge events that arrive too soon after the last accepted one.
///
/// A rejected event leaves the stored timestamp untouched, so a burst of
/// contact bounces cannot push the window forward and starve genuine
/// presses.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debounce {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Decide whether an edge at `now` counts as a genuine press.
    ///
    /// The first event after construction is always accepted. Elapsed time
    /// saturates at zero, so a clock that jumps backwards rejects rather
    /// than underflows.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            let elapsed = Duration::from_ticks(now.as_ticks().saturating_sub(last.as_ticks()));
            if elapsed < self.window {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Timestamp of the last accepted event, if any.
    pub const fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}
