/// Fire-once reveal gate for a section scrolling into view.
///
/// The host reports what fraction of the section is on screen; the gate
/// opens the first time that fraction reaches `threshold` and never closes
/// or fires again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f32,
    fired: bool,
}

impl VisibilityTrigger {
    /// `threshold` is clamped to `[0, 1]`.
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            fired: false,
        }
    }

    /// Reports the currently visible fraction of the section.
    ///
    /// ### Returns
    /// `true` only on the first call where `visible_ratio >= threshold`.
    pub fn observe(&mut self, visible_ratio: f32) -> bool {
        if self.fired || !(visible_ratio > 0.0 && visible_ratio >= self.threshold) {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.fired
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Fraction of `section` (top, bottom) inside `window` (top, bottom).
pub fn visible_ratio(section: (f32, f32), window: (f32, f32)) -> f32 {
    let height = section.1 - section.0;
    if height <= 0.0 {
        return 0.0;
    }
    let overlap = section.1.min(window.1) - section.0.max(window.0);
    (overlap / height).clamp(0.0, 1.0)
}
