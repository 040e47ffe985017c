use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Point;

/// Values a transition can interpolate between.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(self, to: Self, t: f64) -> Self {
        Point::new(self.x.interpolate(to.x, t), self.y.interpolate(to.y, t))
    }
}

/// Visual state of one bubble: plot position plus fill opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubblePose {
    pub position: Point,
    pub opacity: f64,
}

impl BubblePose {
    #[must_use]
    pub const fn new(position: Point, opacity: f64) -> Self {
        Self { position, opacity }
    }

    #[must_use]
    pub const fn visible_at(position: Point) -> Self {
        Self::new(position, 1.0)
    }
}

impl Interpolate for BubblePose {
    fn interpolate(self, to: Self, t: f64) -> Self {
        Self {
            position: self.position.interpolate(to.position, t),
            opacity: self.opacity.interpolate(to.opacity, t),
        }
    }
}

/// Symmetric cubic easing, slow at both ends.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One scheduled change from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    pub from: T,
    pub to: T,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl<T: Interpolate> Transition<T> {
    #[must_use]
    pub fn new(from: T, to: T, started_at_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            started_at_ms,
            duration_ms,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn sample(&self, now_ms: f64) -> T {
        let eased = ease_cubic_in_out(self.progress(now_ms));
        self.from.interpolate(self.to, eased)
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Replacement transition toward `to` starting from the value shown at `now_ms`.
    #[must_use]
    pub fn retarget(&self, to: T, now_ms: f64, duration_ms: f64) -> Self {
        Self::new(self.sample(now_ms), to, now_ms, duration_ms)
    }
}

/// Per-key transition table.
///
/// At most one transition runs per key. Scheduling a key that is already in
/// flight replaces the running transition, starting from its current sample,
/// instead of queuing behind it. A zero duration applies targets immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionScheduler<T> {
    duration_ms: u64,
    active: IndexMap<String, Transition<T>>,
    superseded_count: u64,
}

impl<T: Interpolate> TransitionScheduler<T> {
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            active: IndexMap::new(),
            superseded_count: 0,
        }
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.duration_ms > 0
    }

    /// Starts moving `key` toward `target` and returns the value to show now.
    ///
    /// `resting` is the key's value when nothing is in flight for it.
    pub fn schedule(&mut self, key: &str, resting: T, target: T, now_ms: f64) -> T {
        if !self.is_animated() {
            self.active.shift_remove(key);
            return target;
        }

        #[allow(clippy::cast_precision_loss)]
        let duration_ms = self.duration_ms as f64;
        let transition = match self.active.get(key) {
            Some(running) => {
                self.superseded_count += 1;
                trace!(key, now_ms, "superseding in-flight transition");
                running.retarget(target, now_ms, duration_ms)
            }
            None => Transition::new(resting, target, now_ms, duration_ms),
        };
        let shown = transition.from;
        self.active.insert(key.to_owned(), transition);
        shown
    }

    /// Current value for `key`, or `None` when nothing is in flight.
    #[must_use]
    pub fn sample(&self, key: &str, now_ms: f64) -> Option<T> {
        self.active
            .get(key)
            .map(|transition| transition.sample(now_ms))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Transition<T>> {
        self.active.get(key)
    }

    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    /// Drops the transition for `key`, returning the value it had reached.
    pub fn cancel(&mut self, key: &str, now_ms: f64) -> Option<T> {
        self.active
            .shift_remove(key)
            .map(|transition| transition.sample(now_ms))
    }

    /// Removes every transition finished at `now_ms` and returns their end values.
    pub fn drain_finished(&mut self, now_ms: f64) -> Vec<(String, T)> {
        let mut finished = Vec::new();
        self.active.retain(|key, transition| {
            if transition.is_finished(now_ms) {
                finished.push((key.clone(), transition.to));
                false
            } else {
                true
            }
        });
        finished
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of transitions replaced before they finished.
    #[must_use]
    pub fn superseded_count(&self) -> u64 {
        self.superseded_count
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{TransitionScheduler, ease_cubic_in_out};

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_relative_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_relative_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_relative_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn zero_duration_applies_target_immediately() {
        let mut scheduler = TransitionScheduler::<f64>::new(0);
        let shown = scheduler.schedule("a", 0.0, 10.0, 0.0);
        assert_relative_eq!(shown, 10.0);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn rescheduling_starts_from_current_sample() {
        let mut scheduler = TransitionScheduler::<f64>::new(1000);
        scheduler.schedule("a", 0.0, 100.0, 0.0);
        let shown = scheduler.schedule("a", 0.0, 0.0, 500.0);

        assert_relative_eq!(shown, 50.0);
        assert_eq!(scheduler.active_count(), 1);
        assert_eq!(scheduler.superseded_count(), 1);
        let running = scheduler.get("a").expect("running transition");
        assert_relative_eq!(running.started_at_ms, 500.0);
        assert_relative_eq!(running.to, 0.0);
    }
}
