use std::time::Duration;

/// How the tick interval evolves as the snake eats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedPolicy {
    pub initial: Duration,
    pub floor: Duration,
    pub step: Duration,
    /// When false the interval stays at `initial` for the whole session
    pub progressive: bool,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(150),
            floor: Duration::from_millis(50),
            step: Duration::from_millis(5),
            progressive: true,
        }
    }
}

impl SpeedPolicy {
    /// Interval to use after one more food item, or `None` if it stays put.
    /// Never returns anything below the floor.
    pub fn after_food(&self, current: Duration) -> Option<Duration> {
        if !self.progressive || current <= self.floor {
            return None;
        }

        let next = current.saturating_sub(self.step).max(self.floor);
        (next != current).then_some(next)
    }
}
