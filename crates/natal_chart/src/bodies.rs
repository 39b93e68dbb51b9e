//! Celestial bodies and their resolved chart positions.

use crate::angle::{ensure_finite, normalize};
use crate::ephemeris::{EphemerisError, RawBodyPosition};
use crate::zodiac::{sign_of, Element, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies a chart can include, in the fixed order charts list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    #[serde(rename = "Mean Node")]
    MeanNode,
    #[serde(rename = "True Node")]
    TrueNode,
    Chiron,
    /// Mean lunar apogee.
    Lilith,
}

/// The 13 bodies every chart carries.
pub const STANDARD_BODIES: [Body; 13] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::MeanNode,
    Body::TrueNode,
    Body::Chiron,
];

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::MeanNode => "Mean Node",
            Self::TrueNode => "True Node",
            Self::Chiron => "Chiron",
            Self::Lilith => "Lilith",
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Sun => '☉',
            Self::Moon => '☾',
            Self::Mercury => '☿',
            Self::Venus => '♀',
            Self::Mars => '♂',
            Self::Jupiter => '♃',
            Self::Saturn => '♄',
            Self::Uranus => '♅',
            Self::Neptune => '♆',
            Self::Pluto => '♇',
            Self::MeanNode => '☊',
            Self::TrueNode => '☋',
            Self::Chiron => '⚷',
            Self::Lilith => '⚸',
        }
    }

    /// Swiss Ephemeris body number.
    pub const fn swiss_id(self) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
            Self::MeanNode => 10,
            Self::TrueNode => 11,
            Self::Lilith => 12,
            Self::Chiron => 15,
        }
    }

    /// Body list for a chart, with Lilith appended when requested.
    pub fn chart_set(include_lilith: bool) -> Vec<Body> {
        let mut bodies = STANDARD_BODIES.to_vec();
        if include_lilith {
            bodies.push(Body::Lilith);
        }
        bodies
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved position of one body in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub name: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub sign: Sign,
    pub element: Element,
    pub retrograde: bool,
}

impl BodyPosition {
    pub fn from_raw(name: Body, raw: RawBodyPosition) -> Result<Self, EphemerisError> {
        let malformed = |e: crate::angle::NonFiniteAngle| EphemerisError::MalformedData {
            object: name.name().to_string(),
            message: e.to_string(),
        };
        let longitude = normalize(ensure_finite("longitude", raw.longitude).map_err(malformed)?);
        let speed = ensure_finite("speed", raw.speed).map_err(malformed)?;
        let sign = sign_of(longitude);

        Ok(Self {
            name,
            longitude,
            speed,
            sign,
            element: sign.element(),
            retrograde: speed < 0.0,
        })
    }
}

/// A body the provider could not produce a usable position for.
#[derive(Debug)]
pub struct BodyFailure {
    pub body: Body,
    pub error: EphemerisError,
}

/// Turn per-body provider output into chart positions, keeping input order.
///
/// Every failing body is reported; nothing is defaulted. The caller decides
/// what a failure means for the chart as a whole.
pub fn resolve_bodies<I>(raw: I) -> Result<Vec<BodyPosition>, Vec<BodyFailure>>
where
    I: IntoIterator<Item = (Body, Result<RawBodyPosition, EphemerisError>)>,
{
    let mut positions = Vec::new();
    let mut failures = Vec::new();

    for (body, result) in raw {
        match result.and_then(|r| BodyPosition::from_raw(body, r)) {
            Ok(pos) => positions.push(pos),
            Err(error) => failures.push(BodyFailure { body, error }),
        }
    }

    if failures.is_empty() {
        Ok(positions)
    } else {
        Err(failures)
    }
}
