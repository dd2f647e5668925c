//! Per-tick update phases for the backdrop fields.
//!
//! One stepper tick runs:
//! 1. [`fall_phase`] - every logo moves down by its speed, spins, and
//!    drifts sideways on a sine keyed to its height.
//! 2. [`respawn_phase`] - logos that dropped past the bottom margin are
//!    put back above the viewport in the same slot.
//! 3. [`bounce_phase`] - floating dots advance and reflect off the edges.
//!
//! No phase adds or removes entities.

use crate::{
    config::FallingConfig,
    entity::{LogoField, ParticleField},
    types::{EntityId, Viewport},
};
use rand::Rng;

/// Advances every falling logo by one tick.
///
/// For each logo:
///
/// 1. Adds `sin(y * cfg.drift_frequency) * cfg.drift_amplitude` to `x`,
///    using the height before the move.
/// 2. Adds `speed` to `y`.
/// 3. Adds `cfg.spin` degrees to `rotation`, wrapped into `[0, 360)`.
///
/// ### Parameters
/// - `field` - Logos to move in place.
/// - `cfg` - Drift and spin settings.
pub fn fall_phase(field: &mut LogoField, cfg: &FallingConfig) {
    for logo in field.logos.iter_mut() {
        logo.pos.x += (logo.pos.y * cfg.drift_frequency).sin() * cfg.drift_amplitude;
        logo.pos.y += logo.speed;
        logo.rotation = (logo.rotation + cfg.spin).rem_euclid(360.0);
    }
}

/// Respawns logos that fell past `viewport.height + cfg.margin`.
///
/// A respawned logo gets a new off-screen height (`< 0`), a new `x` in
/// `[0, width)` and a new glyph; its id is unchanged.
///
/// ### Returns
/// The ids of the logos respawned this tick, in field order.
pub fn respawn_phase(
    field: &mut LogoField,
    viewport: Viewport,
    cfg: &FallingConfig,
    rng: &mut impl Rng,
) -> Vec<EntityId> {
    let viewport = viewport.sanitized();
    let floor = viewport.height + cfg.margin;
    let mut respawned = Vec::new();

    for logo in field.logos.iter_mut().filter(|l| l.pos.y > floor) {
        logo.respawn(viewport, cfg, rng);
        respawned.push(logo.id);
    }

    if !respawned.is_empty() {
        tracing::trace!(count = respawned.len(), "respawned falling logos");
    }
    respawned
}

/// Advances every floating dot and bounces it off the viewport edges.
///
/// After moving, a dot touching an edge (`x <= 0`, `x >= width`,
/// `y <= 0` or `y >= height`) has the matching velocity component negated
/// if it still points outward, then its position is clamped into the
/// viewport. A component already pointing inward is left alone, so each
/// contact flips the sign exactly once.
///
/// ### Returns
/// The number of velocity components inverted this tick.
pub fn bounce_phase(field: &mut ParticleField, viewport: Viewport) -> usize {
    let viewport = viewport.sanitized();
    let mut flips = 0;

    for p in field.particles.iter_mut() {
        p.pos += p.vel;

        if (p.pos.x <= 0.0 && p.vel.x < 0.0) || (p.pos.x >= viewport.width && p.vel.x > 0.0) {
            p.vel.x = -p.vel.x;
            flips += 1;
        }
        if (p.pos.y <= 0.0 && p.vel.y < 0.0) || (p.pos.y >= viewport.height && p.vel.y > 0.0) {
            p.vel.y = -p.vel.y;
            flips += 1;
        }

        p.pos = viewport.clamp(p.pos);
    }
    flips
}
