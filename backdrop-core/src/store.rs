//! Owner of the live backdrop fields.

use crate::{
    config::Config,
    entity::{FallingLogo, FloatingParticle, LogoField, ParticleField},
    phases,
    types::{EntityId, Viewport},
};
use rand::Rng;

/// Live collection of animated entities for one mounted view.
///
/// The store holds both fields, the viewport they move in and the random
/// source used for spawning. Pass a seeded generator (e.g.
/// `StdRng::seed_from_u64`) to make every trajectory reproducible.
#[derive(Debug)]
pub struct ParticleStore<R: Rng> {
    logos: LogoField,
    particles: ParticleField,
    viewport: Viewport,
    cfg: Config,
    rng: R,
    ticks: u64,
    last_respawned: Vec<EntityId>,
}

impl<R: Rng> ParticleStore<R> {
    /// Creates both fields with the configured populations.
    ///
    /// `cfg` is sanitized and `viewport` falls back to the default size if
    /// it has not been measured.
    pub fn new(cfg: Config, viewport: Viewport, mut rng: R) -> Self {
        let cfg = cfg.sanitized();
        let viewport = viewport.sanitized();
        let logos = LogoField::random(cfg.falling.count, viewport, &cfg.falling, &mut rng);
        let particles = ParticleField::random(cfg.floating.count, viewport, &cfg.floating, &mut rng);

        tracing::debug!(
            logos = logos.len(),
            particles = particles.len(),
            width = viewport.width,
            height = viewport.height,
            "particle store initialized"
        );

        Self {
            logos,
            particles,
            viewport,
            cfg,
            rng,
            ticks: 0,
            last_respawned: Vec::new(),
        }
    }

    /// Advances every entity by one tick.
    pub fn tick(&mut self) {
        phases::fall_phase(&mut self.logos, &self.cfg.falling);
        self.last_respawned =
            phases::respawn_phase(&mut self.logos, self.viewport, &self.cfg.falling, &mut self.rng);
        let flips = phases::bounce_phase(&mut self.particles, self.viewport);
        self.ticks += 1;

        tracing::trace!(
            tick = self.ticks,
            respawned = self.last_respawned.len(),
            flips,
            "stepper tick"
        );
    }

    /// Runs `n` ticks back to back.
    pub fn tick_n(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Updates the viewport used by later ticks. Entities are not moved;
    /// out-of-range dots are pulled back by the next bounce.
    pub fn resize(&mut self, viewport: Viewport) {
        let viewport = viewport.sanitized();
        if viewport != self.viewport {
            tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
            self.viewport = viewport;
        }
    }

    pub fn logos(&self) -> &[FallingLogo] {
        &self.logos.logos
    }

    pub fn particles(&self) -> &[FloatingParticle] {
        &self.particles.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of ticks run since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Ids respawned by the most recent tick.
    pub fn last_respawned(&self) -> &[EntityId] {
        &self.last_respawned
    }

    /// Total entity count over both fields.
    pub fn population(&self) -> usize {
        self.logos.len() + self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn store(seed: u64) -> ParticleStore<StdRng> {
        ParticleStore::new(
            Config::default(),
            Viewport::new(1200.0, 800.0),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn new_uses_configured_counts() {
        let s = store(1);
        assert_eq!(s.logos().len(), 25);
        assert_eq!(s.particles().len(), 40);
        assert_eq!(s.population(), 65);
        assert_eq!(s.tick_count(), 0);
    }

    #[test]
    fn population_is_constant_over_many_ticks() {
        let mut s = store(2);
        let ids: Vec<EntityId> = s.logos().iter().map(|l| l.id).collect();

        s.tick_n(5_000);

        assert_eq!(s.population(), 65);
        assert_eq!(s.tick_count(), 5_000);
        let after: Vec<EntityId> = s.logos().iter().map(|l| l.id).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn same_seed_gives_same_trajectory() {
        let mut a = store(99);
        let mut b = store(99);
        a.tick_n(700);
        b.tick_n(700);

        for (la, lb) in a.logos().iter().zip(b.logos()) {
            assert_eq!(la.pos, lb.pos);
            assert_eq!(la.glyph.name, lb.glyph.name);
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }

    #[test]
    fn logos_eventually_respawn() {
        let mut s = store(3);
        // Slowest logo covers 350 + 800 + 50 px in at most 2400 ticks.
        let mut seen = false;
        for _ in 0..2_500 {
            s.tick();
            seen |= !s.last_respawned().is_empty();
        }
        assert!(seen);
    }

    #[test]
    fn unmeasured_viewport_uses_fallback() {
        let s = ParticleStore::new(
            Config::default(),
            Viewport::new(0.0, 0.0),
            StdRng::seed_from_u64(4),
        );
        assert_eq!(s.viewport(), Viewport::new(1200.0, 800.0));
    }

    #[test]
    fn resize_sanitizes_degenerate_sizes() {
        let mut s = store(5);
        s.resize(Viewport::new(640.0, 480.0));
        assert_eq!(s.viewport(), Viewport::new(640.0, 480.0));
        s.resize(Viewport::new(-1.0, 480.0));
        assert_eq!(s.viewport(), Viewport::new(1200.0, 480.0));
    }
}
