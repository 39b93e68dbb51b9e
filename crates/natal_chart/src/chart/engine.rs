//! Chart orchestration: resolve, derive, correlate, assemble.

use crate::aspects::AspectDetector;
use crate::bodies::{resolve_bodies, Body, BodyFailure, BodyPosition};
use crate::chart::settings::{validate_orb, ChartSettings, SettingsError};
use crate::chart::types::{tally_elements, ChartRequest, ChartResult, ChartSource};
use crate::ephemeris::{
    time, EphemerisError, EphemerisGate, FallbackEphemeris, GeoLocation, PlaceholderFallback,
    RawBodyPosition, RawHouses,
};
use crate::error::{ChartError, InputError};
use crate::houses::{derive_houses, HouseSystem, Houses};
use std::sync::Arc;

/// What one scope against the primary ephemeris produced.
struct PrimaryOutput {
    julian_day: f64,
    bodies: Vec<(Body, Result<RawBodyPosition, EphemerisError>)>,
    houses: Result<Option<RawHouses>, EphemerisError>,
}

/// Builds charts. Holds no per-request state; share it behind an `Arc`.
pub struct ChartEngine {
    primary: Option<EphemerisGate>,
    fallback: Arc<dyn FallbackEphemeris>,
    settings: ChartSettings,
}

impl ChartEngine {
    pub fn new(
        primary: Option<EphemerisGate>,
        fallback: Arc<dyn FallbackEphemeris>,
        settings: ChartSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        match &primary {
            Some(gate) => log::info!("chart engine using {} ephemeris", gate.name()),
            None => log::warn!(
                "no ephemeris backend available; charts will use the {} fallback",
                fallback.name()
            ),
        }
        Ok(Self {
            primary,
            fallback,
            settings,
        })
    }

    /// Engine with no primary ephemeris: every chart comes from the placeholder fallback.
    pub fn fallback_only(settings: ChartSettings) -> Result<Self, SettingsError> {
        Self::new(None, Arc::new(PlaceholderFallback), settings)
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Compute a chart.
    ///
    /// The primary ephemeris gets one attempt. If it is missing, or any body
    /// fails, the whole body set comes from the fallback instead; real and
    /// placeholder bodies are never mixed. Houses are optional: any house
    /// failure yields a chart without houses.
    pub async fn calculate(&self, request: &ChartRequest) -> Result<ChartResult, ChartError> {
        let (system, orb) = self.validate(request)?;
        let bodies_wanted = self.settings.bodies();

        let primary = match &self.primary {
            Some(gate) => {
                let timestamp = request.timestamp;
                let wanted = bodies_wanted.as_slice();
                let scoped = gate
                    .with_location(&request.location, |session| {
                        let julian_day = session.julian_day(timestamp);
                        PrimaryOutput {
                            julian_day,
                            bodies: session.resolve_bodies(julian_day, wanted),
                            houses: session.resolve_houses(julian_day, system),
                        }
                    })
                    .await;
                match scoped {
                    Ok(output) => Some(output),
                    Err(e) => {
                        log::error!("{} ephemeris failed to start a calculation: {}", gate.name(), e);
                        None
                    }
                }
            }
            None => None,
        };

        let (julian_day, bodies, houses, source) = match primary {
            Some(output) => {
                let houses = self.houses_from(output.houses, system);
                match resolve_bodies(output.bodies) {
                    Ok(bodies) => (output.julian_day, bodies, houses, ChartSource::Ephemeris),
                    Err(failures) => {
                        log_failures(&failures);
                        let bodies =
                            self.fallback_bodies(output.julian_day, &request.location, &bodies_wanted)?;
                        (output.julian_day, bodies, houses, ChartSource::Fallback)
                    }
                }
            }
            None => {
                let julian_day = time::julian_day(request.timestamp);
                let bodies = self.fallback_bodies(julian_day, &request.location, &bodies_wanted)?;
                (julian_day, bodies, None, ChartSource::Fallback)
            }
        };

        let aspect_set = AspectDetector::with_orb(orb).detect(&bodies);
        let element_tally = tally_elements(&bodies);

        log::debug!(
            "chart JD {:.5}: {} bodies ({:?}), houses {}, {} aspects from {} pairs",
            julian_day,
            bodies.len(),
            source,
            if houses.is_some() { "present" } else { "absent" },
            aspect_set.aspects.len(),
            aspect_set.pairs_examined
        );

        Ok(ChartResult {
            bodies,
            houses,
            aspects: aspect_set.aspects,
            element_tally,
            source,
            julian_day,
        })
    }

    fn validate(&self, request: &ChartRequest) -> Result<(HouseSystem, f64), InputError> {
        let GeoLocation { lat, lon, alt } = request.location;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InputError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InputError::LongitudeOutOfRange(lon));
        }
        if !alt.is_finite() {
            return Err(InputError::InvalidField {
                field: "altitude",
                message: format!("must be finite, got {}", alt),
            });
        }
        let orb = match request.orb {
            Some(orb) => validate_orb(orb).map_err(|e| InputError::InvalidField {
                field: "orb",
                message: e.to_string(),
            })?,
            None => self.settings.orb,
        };
        let system = request.house_system.unwrap_or(self.settings.house_system);
        Ok((system, orb))
    }

    fn houses_from(
        &self,
        raw: Result<Option<RawHouses>, EphemerisError>,
        system: HouseSystem,
    ) -> Option<Houses> {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("house calculation failed, chart will have no houses: {}", e);
                return None;
            }
        };
        match derive_houses(raw.as_ref(), system, self.settings.angle_epsilon) {
            Ok(houses) => houses,
            Err(e) => {
                log::warn!("provider houses rejected, chart will have no houses: {}", e);
                None
            }
        }
    }

    fn fallback_bodies(
        &self,
        julian_day: f64,
        location: &GeoLocation,
        bodies: &[Body],
    ) -> Result<Vec<BodyPosition>, ChartError> {
        log::warn!("using {} fallback for all {} bodies", self.fallback.name(), bodies.len());
        let raw = self.fallback.resolve_bodies(julian_day, location, bodies);
        if raw.len() != bodies.len() {
            return Err(ChartError::FallbackExhausted {
                name: self.fallback.name().to_string(),
                message: format!("returned {} positions for {} bodies", raw.len(), bodies.len()),
            });
        }
        resolve_bodies(bodies.iter().copied().zip(raw.into_iter().map(Ok))).map_err(|failures| {
            let message = failures
                .iter()
                .map(|f| f.error.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            ChartError::FallbackExhausted {
                name: self.fallback.name().to_string(),
                message,
            }
        })
    }
}

fn log_failures(failures: &[BodyFailure]) {
    for failure in failures {
        log::error!("ephemeris failed for {}: {}", failure.body, failure.error);
    }
}
