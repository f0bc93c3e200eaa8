//! Countdown state machine
//!
//! Pure state; the recurring 1-second tick task lives in the session
//! controller and drives this through [`Countdown::tick`].

use tracing::debug;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown is running; remaining seconds after the tick
    Running(u32),
    /// Countdown just reached zero. The machine has already cleared its
    /// active flag and reset the remaining time; it does not resume on its
    /// own.
    Expired,
    /// Countdown was not active; nothing changed
    Inactive,
}

/// Per-question countdown.
///
/// Invariant: `0 <= remaining_secs <= configured_secs`, and ticks only take
/// effect while active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    configured_secs: u32,
    remaining_secs: u32,
    active: bool,
}

impl Countdown {
    /// Create an inactive countdown with the given duration.
    ///
    /// A zero duration is nonsensical; it is bumped to one second so the
    /// invariants hold. Callers validate real user input via
    /// [`Countdown::set_duration`].
    pub fn new(configured_secs: u32) -> Self {
        let configured_secs = configured_secs.max(1);
        Self {
            configured_secs,
            remaining_secs: configured_secs,
            active: false,
        }
    }

    pub fn configured_secs(&self) -> u32 {
        self.configured_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds spent on the current question so far
    pub fn elapsed_secs(&self) -> u32 {
        self.configured_secs - self.remaining_secs
    }

    /// Reset to the configured duration and start running
    pub fn restart(&mut self) {
        self.remaining_secs = self.configured_secs;
        self.active = true;
    }

    /// Stop without resetting the remaining time. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance the countdown by one second.
    ///
    /// On expiry the remaining time snaps back to the configured duration and
    /// the active flag clears; the caller performs the expiry side effects
    /// (stop recording, play alert) and decides whether to restart.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome::Inactive;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            self.active = false;
            self.remaining_secs = self.configured_secs;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining_secs)
        }
    }

    /// Change the configured duration.
    ///
    /// Zero is rejected and the previous duration is retained. The remaining
    /// time is clamped so it never exceeds the configured duration; a running
    /// countdown otherwise keeps its remaining time until the next restart.
    pub fn set_duration(&mut self, secs: u32) -> bool {
        if secs == 0 {
            debug!("Rejected countdown duration: 0");
            return false;
        }

        self.configured_secs = secs;
        if self.remaining_secs > secs {
            self.remaining_secs = secs;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_ignored_while_inactive() {
        let mut countdown = Countdown::new(10);
        assert_eq!(countdown.tick(), TickOutcome::Inactive);
        assert_eq!(countdown.remaining_secs(), 10);
    }

    #[test]
    fn expiry_resets_without_resuming() {
        let mut countdown = Countdown::new(3);
        countdown.restart();

        assert_eq!(countdown.tick(), TickOutcome::Running(2));
        assert_eq!(countdown.tick(), TickOutcome::Running(1));
        assert_eq!(countdown.tick(), TickOutcome::Expired);

        assert!(!countdown.is_active());
        assert_eq!(countdown.remaining_secs(), 3);
    }

    #[test]
    fn set_duration_rejects_zero() {
        let mut countdown = Countdown::new(120);
        assert!(!countdown.set_duration(0));
        assert_eq!(countdown.configured_secs(), 120);
    }

    #[test]
    fn set_duration_clamps_remaining() {
        let mut countdown = Countdown::new(120);
        countdown.restart();
        assert!(countdown.set_duration(30));
        assert_eq!(countdown.remaining_secs(), 30);
        assert!(countdown.is_active());
    }
}
