use instant::Instant;
use std::time::Duration;

/// Limits a backend declares for its audio-driven parameter.
///
/// - `min_interval`: updates closer together than this are skipped
/// - `max_delta`: largest change a single update may apply, either direction
/// - `floor`: the parameter never goes below this value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactiveLimits {
    pub min_interval: Duration,
    pub max_delta: f32,
    pub floor: f32,
}

impl ReactiveLimits {
    /// Move `current` toward `target` by at most `max_delta`, respecting `floor`.
    pub fn step(&self, current: f32, target: f32) -> f32 {
        let target = if target.is_finite() { target } else { self.floor };
        let delta = (target - current).clamp(-self.max_delta, self.max_delta);
        (current + delta).max(self.floor)
    }
}

/// A continuously driven backend parameter, such as a light's intensity.
///
/// The backend owns the value; the wrapper only proposes new values through
/// `set`, which the owner applies in its own update step.
pub trait ReactiveParam {
    fn value(&self) -> f32;
    fn set(&mut self, value: f32);
}

/// Time gate plus delta clamp for one reactive parameter.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limits: ReactiveLimits,
    last_update: Instant,
}

impl RateLimiter {
    /// The interval for the first update is measured from `mounted_at`.
    pub fn new(limits: ReactiveLimits, mounted_at: Instant) -> Self {
        Self {
            limits,
            last_update: mounted_at,
        }
    }

    pub fn limits(&self) -> ReactiveLimits {
        self.limits
    }

    pub fn last_update(&self) -> Instant {
        self.last_update
    }

    /// The value to apply now, or `None` when the interval has not elapsed.
    pub fn propose(&mut self, current: f32, target: f32, now: Instant) -> Option<f32> {
        if elapsed_between(self.last_update, now) <= self.limits.min_interval {
            return None;
        }
        self.last_update = now;
        Some(self.limits.step(current, target))
    }

    /// Gate and apply in one go. Returns whether an update was applied.
    pub fn apply(&mut self, param: &mut dyn ReactiveParam, target: f32, now: Instant) -> bool {
        match self.propose(param.value(), target, now) {
            Some(next) => {
                param.set(next);
                true
            }
            None => false,
        }
    }
}

#[inline]
pub(crate) fn elapsed_between(earlier: Instant, later: Instant) -> Duration {
    if later > earlier {
        later - earlier
    } else {
        Duration::ZERO
    }
}
