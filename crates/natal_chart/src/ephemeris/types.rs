use serde::{Deserialize, Serialize};

/// Observer location on the Earth's surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Degrees, north positive
    pub lat: f64,
    /// Degrees, east positive
    pub lon: f64,
    /// Metres above sea level
    #[serde(default)]
    pub alt: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, alt: 0.0 }
    }
}

/// Raw body output from an ephemeris, before any classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBodyPosition {
    /// Ecliptic longitude in degrees, not necessarily normalized
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Raw house output from an ephemeris
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawHouses {
    pub ascendant: f64,
    pub mc: f64,
    /// Cusps 1..12, index 0 is the first house
    pub cusps: [f64; 12],
}
