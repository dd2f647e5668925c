//! Animated entities and the fixed-size fields that own them.

use crate::{
    config::{FallingConfig, FloatingConfig},
    palette::{self, LogoGlyph, Rgb},
    types::{EntityId, Viewport},
};
use glam::Vec2;
use rand::Rng;

/// Respawned logos always start at least this far above the top edge.
const MIN_SPAWN_OFFSET: f32 = 1.0;

/// A chain logo falling down the viewport.
#[derive(Clone, Debug)]
pub struct FallingLogo {
    pub id: EntityId,
    pub pos: Vec2,
    /// Vertical pixels per tick.
    pub speed: f32,
    pub glyph: &'static LogoGlyph,
    pub size: f32,
    /// Degrees.
    pub rotation: f32,
    pub opacity: f32,
}

impl FallingLogo {
    /// Creates a logo above the viewport with every attribute randomized.
    pub fn spawn(id: EntityId, viewport: Viewport, cfg: &FallingConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            pos: Vec2::new(random_x(viewport, rng), spawn_height(cfg, rng)),
            speed: cfg.speed.sample(rng),
            glyph: palette::random_logo(rng),
            size: cfg.size.sample(rng),
            rotation: rng.random_range(0.0..360.0),
            opacity: cfg.opacity.sample(rng),
        }
    }

    /// Moves the logo back above the viewport with a fresh x and glyph.
    ///
    /// The slot keeps its id, speed, size, rotation and opacity.
    pub fn respawn(&mut self, viewport: Viewport, cfg: &FallingConfig, rng: &mut impl Rng) {
        self.pos = Vec2::new(random_x(viewport, rng), spawn_height(cfg, rng));
        self.glyph = palette::random_logo(rng);
    }
}

/// Samples an off-screen starting height, always `< 0`.
pub fn spawn_height(cfg: &FallingConfig, rng: &mut impl Rng) -> f32 {
    let band = if cfg.spawn_band > 0.0 {
        rng.random_range(0.0..cfg.spawn_band)
    } else {
        0.0
    };
    -(cfg.spawn_offset.max(MIN_SPAWN_OFFSET) + band)
}

fn random_x(viewport: Viewport, rng: &mut impl Rng) -> f32 {
    rng.random_range(0.0..viewport.sanitized().width)
}

/// The whole falling-logo population. Its size never changes.
#[derive(Clone, Debug, Default)]
pub struct LogoField {
    pub logos: Vec<FallingLogo>,
}

impl LogoField {
    /// Creates `count` logos spread horizontally across the viewport and
    /// stacked above its top edge.
    ///
    /// ### Parameters
    /// - `count` - Number of logos; ids are `0..count`.
    /// - `viewport` - Area the logos will fall through. Degenerate sizes
    ///   are replaced by the fallback viewport.
    /// - `cfg` - Speed, size and spawn band ranges.
    /// - `rng` - Random source; pass a seeded generator for reproducible fields.
    pub fn random(count: usize, viewport: Viewport, cfg: &FallingConfig, rng: &mut impl Rng) -> Self {
        let viewport = viewport.sanitized();
        let logos = (0..count)
            .map(|i| FallingLogo::spawn(i as EntityId, viewport, cfg, rng))
            .collect();
        Self { logos }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.logos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.logos.is_empty()
    }
}

/// A small dot drifting around and bouncing off the viewport edges.
#[derive(Clone, Debug)]
pub struct FloatingParticle {
    pub id: EntityId,
    pub pos: Vec2,
    /// Pixels per tick on each axis.
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl FloatingParticle {
    pub fn spawn(id: EntityId, viewport: Viewport, cfg: &FloatingConfig, rng: &mut impl Rng) -> Self {
        let viewport = viewport.sanitized();
        let vel = Vec2::new(
            velocity_component(cfg.max_speed, rng),
            velocity_component(cfg.max_speed, rng),
        );
        Self {
            id,
            pos: Vec2::new(
                rng.random_range(0.0..viewport.width),
                rng.random_range(0.0..viewport.height),
            ),
            vel,
            size: cfg.size.sample(rng),
            color: palette::random_dot_color(rng),
            opacity: cfg.opacity.sample(rng),
        }
    }
}

fn velocity_component(max_speed: f32, rng: &mut impl Rng) -> f32 {
    if max_speed > 0.0 {
        rng.random_range(-max_speed..max_speed)
    } else {
        0.0
    }
}

/// The whole floating-dot population. Its size never changes.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<FloatingParticle>,
}

impl ParticleField {
    /// Creates `count` dots placed uniformly inside the viewport.
    pub fn random(count: usize, viewport: Viewport, cfg: &FloatingConfig, rng: &mut impl Rng) -> Self {
        let viewport = viewport.sanitized();
        let particles = (0..count)
            .map(|i| FloatingParticle::spawn(i as EntityId, viewport, cfg, rng))
            .collect();
        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CHAIN_LOGOS;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn logo_field_spawns_above_viewport() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = LogoField::random(
            4,
            Viewport::new(1200.0, 800.0),
            &FallingConfig::default(),
            &mut rng,
        );

        assert_eq!(field.len(), 4);
        for (i, logo) in field.logos.iter().enumerate() {
            assert_eq!(logo.id, i as EntityId);
            assert!(logo.pos.y < 0.0, "logo {} spawned at y={}", i, logo.pos.y);
            assert!(logo.pos.x >= 0.0 && logo.pos.x < 1200.0);
        }
    }

    #[test]
    fn logo_attributes_come_from_configured_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = FallingConfig::default();
        let field = LogoField::random(30, Viewport::default(), &cfg, &mut rng);

        for logo in &field.logos {
            assert!(cfg.speed.contains(logo.speed));
            assert!(cfg.size.contains(logo.size));
            assert!(cfg.opacity.contains(logo.opacity));
            assert!((0.0..360.0).contains(&logo.rotation));
            assert!(logo.pos.y >= -(cfg.spawn_offset + cfg.spawn_band));
            assert!(CHAIN_LOGOS.iter().any(|g| std::ptr::eq(g, logo.glyph)));
        }
    }

    #[test]
    fn spawn_height_is_negative_even_without_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut cfg = FallingConfig::default();
        cfg.spawn_offset = 0.0;
        cfg.spawn_band = 0.0;
        assert!(spawn_height(&cfg, &mut rng) < 0.0);
    }

    #[test]
    fn respawn_keeps_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = FallingConfig::default();
        let viewport = Viewport::new(300.0, 200.0);
        let mut logo = FallingLogo::spawn(7, viewport, &cfg, &mut rng);
        logo.pos.y = 1000.0;
        let speed = logo.speed;

        logo.respawn(viewport, &cfg, &mut rng);

        assert_eq!(logo.id, 7);
        assert_eq!(logo.speed, speed);
        assert!(logo.pos.y < 0.0);
        assert!(logo.pos.x >= 0.0 && logo.pos.x < 300.0);
    }

    #[test]
    fn particle_field_spawns_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(11);
        let cfg = FloatingConfig::default();
        let viewport = Viewport::new(640.0, 480.0);
        let field = ParticleField::random(40, viewport, &cfg, &mut rng);

        assert_eq!(field.len(), 40);
        for p in &field.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < 640.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 480.0);
            assert!(p.vel.x.abs() <= cfg.max_speed && p.vel.y.abs() <= cfg.max_speed);
        }
    }

    #[test]
    fn unmeasured_viewport_falls_back() {
        let mut rng = StdRng::seed_from_u64(0);
        let field = LogoField::random(
            10,
            Viewport::new(0.0, 0.0),
            &FallingConfig::default(),
            &mut rng,
        );
        assert!(field.logos.iter().all(|l| l.pos.x >= 0.0 && l.pos.x < 1200.0));
    }
}
