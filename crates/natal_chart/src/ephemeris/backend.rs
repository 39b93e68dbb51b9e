use crate::bodies::Body;
use crate::ephemeris::time;
use crate::ephemeris::types::{GeoLocation, RawBodyPosition, RawHouses};
use crate::houses::HouseSystem;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {object} at JD {julian_day}: {message}")]
    CalculationFailed {
        object: String,
        julian_day: f64,
        message: String,
    },
    #[error("Malformed ephemeris data for {object}: {message}")]
    MalformedData { object: String, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// A native ephemeris with process-wide state.
///
/// Implementations are free to keep the ephemeris path and the observer
/// location in globals; callers only reach a backend through
/// [`EphemerisGate`](crate::ephemeris::EphemerisGate), which serializes
/// access and sets the location before every resolve.
pub trait EphemerisBackend: Send {
    fn name(&self) -> &str;

    fn set_ephemeris_path(&mut self, path: &Path) -> Result<(), EphemerisError>;

    fn set_topocentric_location(&mut self, location: &GeoLocation) -> Result<(), EphemerisError>;

    fn resolve_body(&mut self, julian_day: f64, body: Body) -> Result<RawBodyPosition, EphemerisError>;

    /// `Ok(None)` when the system cannot produce cusps for this place
    /// (e.g. Placidus above the polar circles).
    fn resolve_houses(
        &mut self,
        julian_day: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<Option<RawHouses>, EphemerisError>;

    fn julian_day(&self, dt: DateTime<Utc>) -> f64 {
        time::julian_day(dt)
    }
}
