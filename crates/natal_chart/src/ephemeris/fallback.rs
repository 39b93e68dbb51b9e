use crate::bodies::Body;
use crate::ephemeris::types::{GeoLocation, RawBodyPosition};

/// Stand-in used when the real ephemeris is unavailable or fails.
///
/// The signature has no error path: a fallback must always answer, even if
/// only with placeholder values. It must return exactly one position per
/// requested body, in order.
pub trait FallbackEphemeris: Send + Sync {
    fn name(&self) -> &str;

    fn resolve_bodies(
        &self,
        julian_day: f64,
        location: &GeoLocation,
        bodies: &[Body],
    ) -> Vec<RawBodyPosition>;
}

/// Every body at 0° Aries with zero speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderFallback;

impl FallbackEphemeris for PlaceholderFallback {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn resolve_bodies(
        &self,
        _julian_day: f64,
        _location: &GeoLocation,
        bodies: &[Body],
    ) -> Vec<RawBodyPosition> {
        bodies
            .iter()
            .map(|_| RawBodyPosition {
                longitude: 0.0,
                speed: 0.0,
            })
            .collect()
    }
}
