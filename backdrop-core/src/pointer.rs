use glam::Vec2;

/// Parallax factor of the large hero orb.
pub const HERO_ORB_PARALLAX: f32 = 0.02;
/// Parallax factor of the small hero orb; it moves against the pointer.
pub const HERO_ORB_COUNTER_PARALLAX: f32 = -0.01;
/// Radius of the glow that follows the pointer, in pixels.
pub const GLOW_RADIUS: f32 = 600.0;

/// Last known pointer position, used only for decorative effects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    pos: Vec2,
    seen: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move in page coordinates. Non-finite input is ignored.
    pub fn moved(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.pos = pos;
            self.seen = true;
        }
    }

    /// Pointer position; the origin until the first move.
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn has_moved(&self) -> bool {
        self.seen
    }

    /// Centre of the radial glow, which tracks the pointer 1:1.
    pub fn glow_center(&self) -> Vec2 {
        self.pos
    }

    /// Offset of a layer that follows the pointer scaled by `factor`.
    pub fn parallax(&self, factor: f32) -> Vec2 {
        self.pos * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_until_moved() {
        let p = PointerTracker::new();
        assert_eq!(p.position(), Vec2::ZERO);
        assert!(!p.has_moved());
    }

    #[test]
    fn tracks_glow_and_parallax() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::new(500.0, 300.0));

        assert_eq!(p.glow_center(), Vec2::new(500.0, 300.0));
        assert_eq!(p.parallax(HERO_ORB_PARALLAX), Vec2::new(10.0, 6.0));
        assert_eq!(p.parallax(HERO_ORB_COUNTER_PARALLAX), Vec2::new(-5.0, -3.0));
    }

    #[test]
    fn ignores_non_finite_moves() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::new(1.0, 2.0));
        p.moved(Vec2::new(f32::NAN, 0.0));
        assert_eq!(p.position(), Vec2::new(1.0, 2.0));
    }
}
