//! Poller state machine driving periodic refetches.
//!
//! The machine is pure (no timer inside): an async driver owns the actual
//! tick cadence and asks the machine whether a fetch is due. Overlapping
//! fetches are not serialized; whichever response is applied last wins.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐  start (fetch now)  ┌─────────┐
//! │ Idle ├────────────────────►│ Polling │──┐ tick: decrement,
//! └──▲───┘                     └────┬────┘◄─┘ fetch at zero + reset
//!    │           stop               │
//!    └──────────────────────────────┘
//! ```

/// Whether the poller is currently driving refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No automatic refetches; ticks are inert.
    Idle,
    /// Counting down; every `interval_ticks`-th tick requests a fetch.
    Polling,
}

/// Countdown-based poller.
///
/// The original operator tool never exposed a stop action (the timer died
/// with the view); [`Poller::stop`] is an explicit addition so library
/// callers can leave the polling state deliberately.
#[derive(Debug, Clone)]
pub struct Poller {
    state: PollerState,
    countdown: u32,
    interval_ticks: u32,
}

impl Poller {
    /// Create an idle poller that will fetch every `interval_ticks` ticks
    /// once started.
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            state: PollerState::Idle,
            countdown: interval_ticks,
            interval_ticks,
        }
    }

    /// Enter the polling state and reset the countdown.
    ///
    /// The caller performs one fetch immediately as part of the start
    /// action; the countdown covers the ticks after it.
    pub fn start(&mut self) {
        self.state = PollerState::Polling;
        self.countdown = self.interval_ticks;
    }

    /// Leave the polling state. Subsequent ticks do nothing until the next
    /// [`Poller::start`].
    pub fn stop(&mut self) {
        self.state = PollerState::Idle;
        self.countdown = self.interval_ticks;
    }

    /// Advance one tick. Returns `true` when a fetch is due, in which case
    /// the countdown has been reset.
    pub fn tick(&mut self) -> bool {
        if self.state != PollerState::Polling {
            return false;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.countdown = self.interval_ticks;
            return true;
        }
        false
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn is_polling(&self) -> bool {
        self.state == PollerState::Polling
    }

    /// Ticks remaining until the next automatic fetch.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }
}
