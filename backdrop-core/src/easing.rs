//! Count-up animation for displayed statistics.
//!
//! An [`EasingCounter`] moves each displayed value from zero to its target
//! over a fixed number of steps along a cubic ease-out curve, truncating
//! to the target's declared [`Precision`]. The last step pins every value
//! to its exact target.

use std::time::Duration;

/// Cubic ease-out: `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// How a displayed value is truncated while animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Integer,
    OneDecimal,
}

impl Precision {
    /// Truncates toward negative infinity at this precision.
    #[inline]
    pub fn truncate(self, v: f64) -> f64 {
        match self {
            Precision::Integer => v.floor(),
            Precision::OneDecimal => (v * 10.0).floor() / 10.0,
        }
    }
}

/// A named statistic to count up to. Targets are expected to be non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterTarget {
    pub name: String,
    pub target: f64,
    pub precision: Precision,
}

impl CounterTarget {
    pub fn new(name: impl Into<String>, target: f64, precision: Precision) -> Self {
        Self {
            name: name.into(),
            target,
            precision,
        }
    }

    /// Value shown at step `k` of `step_count`.
    ///
    /// Step 0 shows `0`; any step at or past `step_count` shows the exact
    /// target.
    pub fn value_at(&self, k: u32, step_count: u32) -> f64 {
        let step_count = step_count.max(1);
        if k >= step_count {
            return self.target;
        }
        let eased = ease_out_cubic(k as f64 / step_count as f64);
        self.precision.truncate(self.target * eased)
    }
}

/// The landing page's headline numbers.
pub fn landing_stats() -> Vec<CounterTarget> {
    vec![
        CounterTarget::new("market", 3.2, Precision::OneDecimal),
        CounterTarget::new("chains", 20.0, Precision::Integer),
        CounterTarget::new("security", 99.8, Precision::OneDecimal),
        CounterTarget::new("speed", 0.8, Precision::OneDecimal),
    ]
}

/// Displayed values animating toward their targets.
#[derive(Clone, Debug)]
pub struct EasingCounter {
    targets: Vec<CounterTarget>,
    displayed: Vec<f64>,
    step: u32,
    step_count: u32,
    duration: Duration,
    finished: bool,
}

impl EasingCounter {
    /// Starts a count-up at step 0 with every displayed value at zero.
    ///
    /// ### Parameters
    /// - `targets` - Named values to reach.
    /// - `duration` - Wall-clock length of the whole animation.
    /// - `step_count` - Number of steps; `0` is treated as `1`.
    pub fn start(targets: Vec<CounterTarget>, duration: Duration, step_count: u32) -> Self {
        let step_count = step_count.max(1);
        tracing::debug!(
            targets = targets.len(),
            step_count,
            duration_ms = duration.as_millis() as u64,
            "easing counter started"
        );
        Self {
            displayed: vec![0.0; targets.len()],
            targets,
            step: 0,
            step_count,
            duration,
            finished: false,
        }
    }

    /// Time between two steps: `duration / step_count`, at least 1 ms.
    pub fn step_period(&self) -> Duration {
        (self.duration / self.step_count).max(Duration::from_millis(1))
    }

    /// Moves to the next step.
    ///
    /// ### Returns
    /// `true` while more steps remain, `false` once the counter has
    /// finished (including every call after that, which changes nothing).
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }

        self.step += 1;
        for (shown, t) in self.displayed.iter_mut().zip(&self.targets) {
            *shown = t.value_at(self.step, self.step_count);
        }

        if self.step >= self.step_count {
            self.finished = true;
            tracing::debug!(steps = self.step, "easing counter finished");
            return false;
        }
        true
    }

    /// Jumps straight to the final state.
    pub fn finish(&mut self) {
        while self.step() {}
    }

    pub fn displayed(&self, name: &str) -> Option<f64> {
        self.targets
            .iter()
            .position(|t| t.name == name)
            .map(|i| self.displayed[i])
    }

    /// `(name, displayed value)` pairs in target order.
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.targets
            .iter()
            .zip(&self.displayed)
            .map(|(t, v)| (t.name.as_str(), *v))
    }

    pub fn targets(&self) -> &[CounterTarget] {
        &self.targets
    }

    pub fn current_step(&self) -> u32 {
        self.step
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
