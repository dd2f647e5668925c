//! Stateless mapping from store state to drawable sprites.
//!
//! The host draws a [`Frame`] in order: dots first, then logos on top,
//! with the optional pointer glow beneath everything.

use crate::{
    entity::{FallingLogo, FloatingParticle},
    palette::Rgb,
    pointer::{GLOW_RADIUS, PointerTracker},
    store::ParticleStore,
    types::{EntityId, Viewport},
};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Dot,
    Logo,
}

/// Everything a renderer needs to place one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    /// Top-left anchor in viewport pixels.
    pub pos: Vec2,
    pub size: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub color: Rgb,
    /// Logo symbol; `None` for dots.
    pub glyph: Option<char>,
    /// Soft shadow colour drawn behind logos.
    pub halo: Option<Rgb>,
}

impl Sprite {
    pub fn from_logo(logo: &FallingLogo) -> Self {
        Self {
            id: logo.id,
            kind: SpriteKind::Logo,
            pos: logo.pos,
            size: logo.size,
            rotation_deg: logo.rotation,
            opacity: logo.opacity,
            color: logo.glyph.color,
            glyph: Some(logo.glyph.symbol),
            halo: Some(logo.glyph.glow),
        }
    }

    pub fn from_particle(p: &FloatingParticle) -> Self {
        Self {
            id: p.id,
            kind: SpriteKind::Dot,
            pos: p.pos,
            size: p.size,
            rotation_deg: 0.0,
            opacity: p.opacity,
            color: p.color,
            glyph: None,
            halo: None,
        }
    }

    /// Whether any part of the sprite overlaps the viewport.
    pub fn is_on_screen(&self, viewport: Viewport) -> bool {
        self.pos.x + self.size >= 0.0
            && self.pos.y + self.size >= 0.0
            && self.pos.x <= viewport.width
            && self.pos.y <= viewport.height
    }
}

/// Radial highlight following the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub sprites: Vec<Sprite>,
    pub glow: Option<Glow>,
}

impl Frame {
    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

/// Builds the frame for the store's current state.
///
/// ### Parameters
/// - `store` - Source of entity state; only read.
/// - `pointer` - When given and the pointer has moved, a glow is added at
///   its position.
pub fn present<R: Rng>(store: &ParticleStore<R>, pointer: Option<&PointerTracker>) -> Frame {
    let sprites = store
        .particles()
        .iter()
        .map(Sprite::from_particle)
        .chain(store.logos().iter().map(Sprite::from_logo))
        .collect();

    let glow = pointer.filter(|p| p.has_moved()).map(|p| Glow {
        center: p.glow_center(),
        radius: GLOW_RADIUS,
    });

    Frame { sprites, glow }
}
