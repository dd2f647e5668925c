use glam::Vec2;

/// Identifier for an animated entity.
///
/// Ids are assigned `0..count` when a field is created and stay bound to
/// their slot for the lifetime of the field; a respawn keeps the id.
pub type EntityId = u32;

/// Width used when the host has not measured its viewport yet.
pub const FALLBACK_WIDTH: f32 = 1200.0;
/// Height used when the host has not measured its viewport yet.
pub const FALLBACK_HEIGHT: f32 = 800.0;

/// Visible rendering area, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replaces each unusable dimension (zero, negative, NaN or infinite)
    /// with the fallback size.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            width: fix(self.width, FALLBACK_WIDTH),
            height: fix(self.height, FALLBACK_HEIGHT),
        }
    }

    /// Builds a viewport from an optional measurement.
    pub fn measured_or_fallback(size: Option<Vec2>) -> Self {
        size.map(|s| Self::new(s.x, s.y))
            .unwrap_or_default()
            .sanitized()
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamps `p` into `[0, width] x [0, height]`.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, self.size())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
    }
}
