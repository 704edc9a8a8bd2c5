use std::time::{Duration, Instant};

/// The one live timer. Replaced wholesale on every start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerHandle {
    period: Duration,
    next_deadline: Instant,
}

/// Fixed-rate repeating timer driven by the event loop.
///
/// The loop asks `time_until_next` how long it may block for input and then
/// calls `poll`, which reports at most one due tick per call.
#[derive(Debug, Default)]
pub struct Scheduler {
    handle: Option<TimerHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a timer whose first tick is due one `period` after `now`.
    /// Any previous timer is dropped first.
    pub fn start(&mut self, period: Duration, now: Instant) {
        self.stop();
        self.handle = Some(TimerHandle {
            period,
            next_deadline: now + period,
        });
    }

    pub fn stop(&mut self) {
        self.handle = None;
    }

    pub fn restart(&mut self, period: Duration, now: Instant) {
        self.stop();
        self.start(period, now);
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.handle.map(|h| h.period)
    }

    /// Returns true when a tick is due. Deadlines stay on the original
    /// grid; if the loop fell more than a period behind, missed ticks are
    /// skipped instead of fired in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };

        if now < handle.next_deadline {
            return false;
        }

        handle.next_deadline += handle.period;
        if handle.next_deadline <= now {
            let behind = now.duration_since(handle.next_deadline);
            let skipped = (behind.as_nanos() / handle.period.as_nanos().max(1)) as u32 + 1;
            handle.next_deadline += handle.period * skipped;
        }

        true
    }

    /// How long until the next tick, `None` when stopped
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.handle
            .map(|h| h.next_deadline.saturating_duration_since(now))
    }
}
