//! Noise color classification from a fitted spectral slope.
//!
//! Each named color sits at an integer slope; a slope within
//! [`CLASSIFY_TOLERANCE`] of one is labelled with it. Colors are checked in
//! the order violet, blue, white, pink, red, so the first match wins. With
//! 1.0 spacing and a 0.3 tolerance no slope can match two colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of each color's acceptance band, in slope units.
pub const CLASSIFY_TOLERANCE: f64 = 0.3;

/// dB per octave for a unit slope: `10 * log10(2)`.
pub const DB_PER_OCTAVE_PER_SLOPE: f64 = 3.010_299_956_639_812;

/// Convert a spectral slope to dB per octave.
#[inline]
pub fn db_per_octave(slope: f64) -> f64 {
    slope * DB_PER_OCTAVE_PER_SLOPE
}

/// Discrete noise color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseColor {
    /// Slope near +2 (+6 dB/octave).
    Violet,
    /// Slope near +1 (+3 dB/octave).
    Blue,
    /// Slope near 0 (flat).
    White,
    /// Slope near -1 (-3 dB/octave).
    Pink,
    /// Slope near -2 (-6 dB/octave), Brownian.
    RedBrown,
    /// Slope outside every named band.
    Other,
}

impl NoiseColor {
    /// Named colors in classification priority order.
    pub const PRIORITY: [NoiseColor; 5] = [
        NoiseColor::Violet,
        NoiseColor::Blue,
        NoiseColor::White,
        NoiseColor::Pink,
        NoiseColor::RedBrown,
    ];

    /// Slope at the center of this color's band, `None` for [`NoiseColor::Other`].
    pub fn nominal_slope(&self) -> Option<f64> {
        match self {
            NoiseColor::Violet => Some(2.0),
            NoiseColor::Blue => Some(1.0),
            NoiseColor::White => Some(0.0),
            NoiseColor::Pink => Some(-1.0),
            NoiseColor::RedBrown => Some(-2.0),
            NoiseColor::Other => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseColor::Violet => "Violet noise",
            NoiseColor::Blue => "Blue noise",
            NoiseColor::White => "White noise",
            NoiseColor::Pink => "Pink noise",
            NoiseColor::RedBrown => "Red/Brown noise",
            NoiseColor::Other => "Other colored noise",
        }
    }

    /// Rounded dB/octave shown next to a named color.
    fn nominal_db_label(&self) -> Option<&'static str> {
        match self {
            NoiseColor::Violet => Some("+6 dB/octave"),
            NoiseColor::Blue => Some("+3 dB/octave"),
            NoiseColor::White => Some("0 dB/octave"),
            NoiseColor::Pink => Some("-3 dB/octave"),
            NoiseColor::RedBrown => Some("-6 dB/octave"),
            NoiseColor::Other => None,
        }
    }

    /// Classify a finite slope. Non-finite slopes fall through to `Other`.
    pub fn from_slope(slope: f64) -> Self {
        Self::PRIORITY
            .into_iter()
            .find(|color| {
                color
                    .nominal_slope()
                    .is_some_and(|center| (slope - center).abs() < CLASSIFY_TOLERANCE)
            })
            .unwrap_or(NoiseColor::Other)
    }
}

impl fmt::Display for NoiseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseLabel {
    /// A slope was fitted and mapped to a color.
    Classified {
        /// Assigned color.
        color: NoiseColor,
        /// Slope that produced it.
        slope: f64,
    },
    /// No fit was available.
    Unknown,
}

impl NoiseLabel {
    /// Assigned color, if any.
    pub fn color(&self) -> Option<NoiseColor> {
        match self {
            NoiseLabel::Classified { color, .. } => Some(*color),
            NoiseLabel::Unknown => None,
        }
    }

    /// Fitted slope, if any.
    pub fn slope(&self) -> Option<f64> {
        match self {
            NoiseLabel::Classified { slope, .. } => Some(*slope),
            NoiseLabel::Unknown => None,
        }
    }

    /// Slope in dB per octave, if any.
    pub fn db_per_octave(&self) -> Option<f64> {
        self.slope().map(db_per_octave)
    }

    /// Short category name without the numeric detail.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseLabel::Classified { color, .. } => color.name(),
            NoiseLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NoiseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseLabel::Unknown => f.write_str("Unknown"),
            NoiseLabel::Classified { color, slope } => match color.nominal_db_label() {
                Some(db) => write!(f, "{} ({}, slope = {:.2})", color.name(), db, slope),
                None => write!(
                    f,
                    "{} ({:.1} dB/octave, slope = {:.2})",
                    color.name(),
                    db_per_octave(*slope),
                    slope
                ),
            },
        }
    }
}

/// Classify an optional slope. `None` yields [`NoiseLabel::Unknown`].
pub fn classify(slope: Option<f64>) -> NoiseLabel {
    match slope {
        Some(slope) => NoiseLabel::Classified {
            color: NoiseColor::from_slope(slope),
            slope,
        },
        None => NoiseLabel::Unknown,
    }
}
