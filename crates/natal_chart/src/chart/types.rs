use crate::aspects::Aspect;
use crate::bodies::BodyPosition;
use crate::ephemeris::GeoLocation;
use crate::houses::{HouseSystem, Houses};
use crate::zodiac::{Element, ALL_ELEMENTS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A validated chart request
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub timestamp: DateTime<Utc>,
    pub location: GeoLocation,
    /// Overrides the engine's configured house system
    pub house_system: Option<HouseSystem>,
    /// Overrides the engine's configured orb
    pub orb: Option<f64>,
}

impl ChartRequest {
    pub fn new(timestamp: DateTime<Utc>, longitude: f64, latitude: f64) -> Self {
        Self {
            timestamp,
            location: GeoLocation::new(latitude, longitude),
            house_system: None,
            orb: None,
        }
    }
}

/// Which collaborator produced a chart's body positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    Ephemeris,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    /// Fixed body order, not sorted by longitude
    #[serde(rename = "planets")]
    pub bodies: Vec<BodyPosition>,
    /// Absent when the provider could not produce houses
    pub houses: Option<Houses>,
    /// Ascending by orb
    pub aspects: Vec<Aspect>,
    #[serde(rename = "elementCounts")]
    pub element_tally: BTreeMap<Element, usize>,
    pub source: ChartSource,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
}

/// Count bodies per element. Every element is present, possibly with 0.
pub fn tally_elements(bodies: &[BodyPosition]) -> BTreeMap<Element, usize> {
    let empty: BTreeMap<Element, usize> = ALL_ELEMENTS.iter().map(|&e| (e, 0)).collect();
    bodies.iter().fold(empty, |mut tally, body| {
        *tally.entry(body.element).or_insert(0) += 1;
        tally
    })
}
