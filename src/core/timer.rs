use instant::Instant;
use std::time::Duration;

/// Shortest period a timer accepts; anything below fires at most this often.
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

/// Periodic timer driven by frame timestamps.
///
/// Owned by the component that needs it: acquired on mount, replaced on
/// resize, dropped on unmount. A cancelled timer never fires again.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn start(period: Duration, now: Instant) -> Self {
        let period = period.max(MIN_TIMER_PERIOD);
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// True when at least one period elapsed since the last firing. Missed
    /// periods collapse into a single firing, like a throttled browser interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let missed = (now - due).as_nanos() / self.period.as_nanos();
        let steps = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.period.saturating_mul(steps));
        true
    }
}
