//! Fixed visual tables that entities draw their look from.

use rand::Rng;

/// 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// A chain logo as drawn by the falling field.
#[derive(Debug, PartialEq, Eq)]
pub struct LogoGlyph {
    pub symbol: char,
    pub name: &'static str,
    pub color: Rgb,
    pub glow: Rgb,
}

pub static CHAIN_LOGOS: [LogoGlyph; 10] = [
    LogoGlyph { symbol: '₿', name: "Bitcoin", color: Rgb::from_hex(0xF7931A), glow: Rgb::from_hex(0xF97316) },
    LogoGlyph { symbol: 'Ξ', name: "Ethereum", color: Rgb::from_hex(0x627EEA), glow: Rgb::from_hex(0x3B82F6) },
    LogoGlyph { symbol: '◎', name: "Solana", color: Rgb::from_hex(0x9945FF), glow: Rgb::from_hex(0xA855F7) },
    LogoGlyph { symbol: '∞', name: "Internet Computer", color: Rgb::from_hex(0xED1E79), glow: Rgb::from_hex(0xEC4899) },
    LogoGlyph { symbol: '⬟', name: "Polygon", color: Rgb::from_hex(0x8247E5), glow: Rgb::from_hex(0x6366F1) },
    LogoGlyph { symbol: '▲', name: "Avalanche", color: Rgb::from_hex(0xE84142), glow: Rgb::from_hex(0xEF4444) },
    LogoGlyph { symbol: '⬢', name: "Chainlink", color: Rgb::from_hex(0x375BD2), glow: Rgb::from_hex(0x2563EB) },
    LogoGlyph { symbol: '₳', name: "Cardano", color: Rgb::from_hex(0x0033AD), glow: Rgb::from_hex(0x1D4ED8) },
    LogoGlyph { symbol: '●', name: "Polkadot", color: Rgb::from_hex(0xE6007A), glow: Rgb::from_hex(0xDB2777) },
    LogoGlyph { symbol: '⚛', name: "Cosmos", color: Rgb::from_hex(0x2E3148), glow: Rgb::from_hex(0x6B7280) },
];

pub const DOT_COLORS: [Rgb; 5] = [
    Rgb::from_hex(0x3B82F6),
    Rgb::from_hex(0x8B5CF6),
    Rgb::from_hex(0x06D6A0),
    Rgb::from_hex(0xFFD60A),
    Rgb::from_hex(0xFF006E),
];

/// Picks a chain logo uniformly at random.
pub fn random_logo(rng: &mut impl Rng) -> &'static LogoGlyph {
    &CHAIN_LOGOS[rng.random_range(0..CHAIN_LOGOS.len())]
}

/// Picks a dot colour uniformly at random.
pub fn random_dot_color(rng: &mut impl Rng) -> Rgb {
    DOT_COLORS[rng.random_range(0..DOT_COLORS.len())]
}
