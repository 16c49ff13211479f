//! Colour/scale mapping for density visualizations.
//!
//! A count is placed on a per-theme gradient running from a faint to a
//! bright colour; zero is never on the gradient and gets the flat empty
//! colour instead. The legend is sampled through the same function, so
//! swatches and cells cannot drift apart.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::LEGEND_STOPS;
use crate::models::enums::Theme;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer.
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid colour: {s}")))
    }
}

/// Gradient endpoints and the flat "no data" colour for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub empty: Rgb,
    pub faint: Rgb,
    pub bright: Rgb,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        empty: Rgb::new(235, 237, 240),
        faint: Rgb::new(254, 215, 200),
        bright: Rgb::new(200, 30, 40),
    };

    pub const DARK: Palette = Palette {
        empty: Rgb::new(45, 51, 59),
        faint: Rgb::new(90, 40, 45),
        bright: Rgb::new(255, 90, 90),
    };

    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette::LIGHT,
            Theme::Dark => Palette::DARK,
        }
    }
}

/// One legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendSwatch {
    /// Position along the gradient, 0..=1.
    pub stop: f64,
    /// Count this swatch stands for (`stop * max`).
    pub count: f64,
    pub color: Rgb,
}

// ═══════════════════════════════════════════════════════════
// Mapping
// ═══════════════════════════════════════════════════════════

/// Colour for `count` on a scale topping out at `max`.
///
/// Zero (or anything non-positive) maps to the theme's empty colour.
/// Otherwise `t = count / max` is clamped to `[0, 1]`; a non-positive
/// `max` saturates every positive count.
pub fn color_for(count: f64, max: f64, theme: Theme) -> Rgb {
    let palette = Palette::for_theme(theme);
    if count.is_nan() || count <= 0.0 {
        return palette.empty;
    }
    let t = if max > 0.0 {
        (count / max).clamp(0.0, 1.0)
    } else {
        1.0
    };
    palette.faint.lerp(palette.bright, t)
}

/// Five swatches at `t ∈ {0, .25, .5, .75, 1}` of `max`.
pub fn legend(max: f64, theme: Theme) -> Vec<LegendSwatch> {
    let scale = if max > 0.0 { max } else { 1.0 };
    LEGEND_STOPS
        .iter()
        .map(|&stop| {
            let count = stop * scale;
            LegendSwatch {
                stop,
                count,
                color: color_for(count, scale, theme),
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
