use crate::bodies::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default orb tolerance in degrees.
pub const DEFAULT_ORB: f64 = 8.0;

/// Major aspect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Exact angle for this aspect
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Conjunction => '☌',
            Self::Sextile => '⚹',
            Self::Square => '□',
            Self::Trine => '△',
            Self::Opposition => '☍',
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between two bodies of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    #[serde(rename = "planet1")]
    pub body_a: Body,
    #[serde(rename = "planet2")]
    pub body_b: Body,
    #[serde(rename = "aspect")]
    pub kind: AspectKind,
    /// Deviation from the exact angle, never negative
    pub orb: f64,
    #[serde(rename = "exactAngle")]
    pub exact_angle: f64,
}

/// Detector output: ranked aspects plus how many pairs were examined
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSet {
    pub aspects: Vec<Aspect>,
    pub pairs_examined: usize,
}

/// Settings for aspect detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectSettings {
    /// Single orb applied to every aspect kind
    pub orb: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self { orb: DEFAULT_ORB }
    }
}
