use chrono::{TimeZone, Utc};
use natal_chart::bodies::{Body, BodyPosition, STANDARD_BODIES};
use natal_chart::chart::{ChartEngine, ChartRequest, ChartSettings, ChartSource};
use natal_chart::ephemeris::{
    EphemerisBackend, EphemerisError, EphemerisGate, FallbackEphemeris, GeoLocation,
    PlaceholderFallback, RawBodyPosition, RawHouses,
};
use natal_chart::error::{ChartError, InputError};
use natal_chart::houses::{HouseLabel, HouseSystem};
use natal_chart::zodiac::Element;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Backend with canned answers: body `i` sits at `37° * i + 3°`.
struct ScriptedBackend {
    failing: Vec<Body>,
    houses: Option<RawHouses>,
    houses_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    fn healthy() -> Self {
        Self {
            failing: vec![],
            houses: Some(equal_houses(100.0)),
            houses_fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(bodies: &[Body]) -> Self {
        Self {
            failing: bodies.to_vec(),
            ..Self::healthy()
        }
    }
}

fn scripted_longitude(body: Body) -> f64 {
    37.0 * body as u8 as f64 + 3.0
}

fn equal_houses(ascendant: f64) -> RawHouses {
    RawHouses {
        ascendant,
        mc: ascendant + 270.0,
        cusps: std::array::from_fn(|i| ascendant + 30.0 * i as f64),
    }
}

impl EphemerisBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn set_ephemeris_path(&mut self, _path: &Path) -> Result<(), EphemerisError> {
        Ok(())
    }

    fn set_topocentric_location(&mut self, _location: &GeoLocation) -> Result<(), EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn resolve_body(&mut self, julian_day: f64, body: Body) -> Result<RawBodyPosition, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&body) {
            return Err(EphemerisError::CalculationFailed {
                object: body.name().to_string(),
                julian_day,
                message: "scripted failure".into(),
            });
        }
        let speed = if body == Body::Mercury { -0.4 } else { 1.0 };
        Ok(RawBodyPosition {
            longitude: scripted_longitude(body),
            speed,
        })
    }

    fn resolve_houses(
        &mut self,
        _julian_day: f64,
        _lat: f64,
        _lon: f64,
        system: HouseSystem,
    ) -> Result<Option<RawHouses>, EphemerisError> {
        if self.houses_fail {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("scripted {} failure", system),
            });
        }
        Ok(self.houses)
    }
}

/// Fallback with distinct positions so its output is recognisable.
struct SpreadFallback;

impl SpreadFallback {
    fn expected(bodies: &[Body]) -> Vec<BodyPosition> {
        bodies
            .iter()
            .zip(Self.resolve_bodies(0.0, &GeoLocation::new(0.0, 0.0), bodies))
            .map(|(&b, raw)| BodyPosition::from_raw(b, raw).unwrap())
            .collect()
    }
}

impl FallbackEphemeris for SpreadFallback {
    fn name(&self) -> &str {
        "spread"
    }

    fn resolve_bodies(&self, _jd: f64, _location: &GeoLocation, bodies: &[Body]) -> Vec<RawBodyPosition> {
        bodies
            .iter()
            .map(|&b| RawBodyPosition {
                longitude: 11.0 * b as u8 as f64 + 200.0,
                speed: 0.5,
            })
            .collect()
    }
}

/// Drops the last body.
struct ShortFallback;

impl FallbackEphemeris for ShortFallback {
    fn name(&self) -> &str {
        "short"
    }

    fn resolve_bodies(&self, _jd: f64, _location: &GeoLocation, bodies: &[Body]) -> Vec<RawBodyPosition> {
        bodies[1..]
            .iter()
            .map(|_| RawBodyPosition { longitude: 0.0, speed: 0.0 })
            .collect()
    }
}

fn engine(backend: ScriptedBackend, fallback: Arc<dyn FallbackEphemeris>) -> ChartEngine {
    let gate = EphemerisGate::new(Box::new(backend), None).unwrap();
    ChartEngine::new(Some(gate), fallback, ChartSettings::default()).unwrap()
}

fn request() -> ChartRequest {
    let when = Utc.with_ymd_and_hms(1990, 5, 15, 14, 30, 0).unwrap();
    ChartRequest::new(when, -74.006, 40.7128)
}

#[tokio::test]
async fn test_primary_success() {
    let chart = engine(ScriptedBackend::healthy(), Arc::new(SpreadFallback))
        .calculate(&request())
        .await
        .unwrap();

    assert_eq!(chart.source, ChartSource::Ephemeris);
    let names: Vec<Body> = chart.bodies.iter().map(|b| b.name).collect();
    assert_eq!(names, STANDARD_BODIES.to_vec());
    for body in &chart.bodies {
        assert_eq!(body.longitude, scripted_longitude(body.name) % 360.0);
        assert_eq!(body.retrograde, body.name == Body::Mercury);
    }

    let total: usize = chart.element_tally.values().sum();
    assert_eq!(total, chart.bodies.len());
    assert_eq!(chart.element_tally.len(), 4);

    let houses = chart.houses.expect("houses");
    assert_eq!(houses.houses.len(), 12);
    assert_eq!(houses.angles.imum_coeli, houses.houses[3]);
    assert_eq!(houses.angles.descendant, houses.houses[6]);
    assert_eq!(houses.angles.ascendant, *houses.cusp(HouseLabel::Asc));
    assert_eq!(houses.angles.midheaven.longitude, 10.0);
}

#[tokio::test]
async fn test_partial_failure_uses_fallback_for_every_body() {
    let chart = engine(ScriptedBackend::failing(&[Body::Moon]), Arc::new(SpreadFallback))
        .calculate(&request())
        .await
        .unwrap();

    assert_eq!(chart.source, ChartSource::Fallback);
    assert_eq!(chart.bodies, SpreadFallback::expected(&STANDARD_BODIES));
    // Houses come from the primary regardless
    assert!(chart.houses.is_some());
}

#[tokio::test]
async fn test_total_failure_uses_fallback() {
    let chart = engine(ScriptedBackend::failing(&STANDARD_BODIES), Arc::new(SpreadFallback))
        .calculate(&request())
        .await
        .unwrap();

    assert_eq!(chart.source, ChartSource::Fallback);
    assert_eq!(chart.bodies, SpreadFallback::expected(&STANDARD_BODIES));
}

#[tokio::test]
async fn test_no_primary_placeholder_chart() {
    let engine = ChartEngine::fallback_only(ChartSettings::default()).unwrap();
    assert!(!engine.has_primary());
    let chart = engine.calculate(&request()).await.unwrap();

    assert_eq!(chart.source, ChartSource::Fallback);
    assert!(chart.houses.is_none());
    assert!(chart.bodies.iter().all(|b| b.longitude == 0.0 && !b.retrograde));
    assert_eq!(chart.element_tally[&Element::Fire], 13);
    assert_eq!(chart.element_tally[&Element::Water], 0);
    // Every pair is an exact conjunction
    assert_eq!(chart.aspects.len(), 13 * 12 / 2);
    assert!(chart.aspects.iter().all(|a| a.orb == 0.0));
    assert!((chart.julian_day - 2_448_027.104_166_666_5).abs() < 1e-9);
}

#[tokio::test]
async fn test_house_angle_mismatch_drops_houses_only() {
    let mut backend = ScriptedBackend::healthy();
    let mut houses = equal_houses(100.0);
    houses.mc += 0.5;
    backend.houses = Some(houses);

    let chart = engine(backend, Arc::new(PlaceholderFallback))
        .calculate(&request())
        .await
        .unwrap();
    assert_eq!(chart.source, ChartSource::Ephemeris);
    assert!(chart.houses.is_none());
    assert_eq!(chart.bodies.len(), 13);
}

#[tokio::test]
async fn test_house_error_keeps_ephemeris_bodies() {
    let mut backend = ScriptedBackend::healthy();
    backend.houses_fail = true;

    let chart = engine(backend, Arc::new(SpreadFallback))
        .calculate(&request())
        .await
        .unwrap();
    assert_eq!(chart.source, ChartSource::Ephemeris);
    assert!(chart.houses.is_none());
    assert_eq!(chart.bodies.len(), 13);
    assert!(chart.bodies.iter().all(|b| b.longitude == scripted_longitude(b.name) % 360.0));
}

#[tokio::test]
async fn test_provider_without_houses_keeps_ephemeris_bodies() {
    let mut backend = ScriptedBackend::healthy();
    backend.houses = None;

    let chart = engine(backend, Arc::new(SpreadFallback))
        .calculate(&request())
        .await
        .unwrap();
    assert_eq!(chart.source, ChartSource::Ephemeris);
    assert!(chart.houses.is_none());
    assert_eq!(chart.bodies.len(), 13);
}

#[tokio::test]
async fn test_polar_placidus_has_no_houses() {
    let engine = engine(ScriptedBackend::healthy(), Arc::new(PlaceholderFallback));
    let mut req = request();
    req.location.lat = 70.0;

    let chart = engine.calculate(&req).await.unwrap();
    assert_eq!(chart.source, ChartSource::Ephemeris);
    assert!(chart.houses.is_none());

    req.house_system = Some(HouseSystem::Porphyry);
    let chart = engine.calculate(&req).await.unwrap();
    assert_eq!(chart.houses.map(|h| h.system), Some(HouseSystem::Porphyry));
}

#[tokio::test]
async fn test_non_quadrant_system_skips_angle_check() {
    let mut backend = ScriptedBackend::healthy();
    let mut houses = equal_houses(100.0);
    houses.mc += 12.0;
    backend.houses = Some(houses);

    let mut req = request();
    req.house_system = Some(HouseSystem::Equal);
    let chart = engine(backend, Arc::new(PlaceholderFallback))
        .calculate(&req)
        .await
        .unwrap();
    assert_eq!(chart.houses.map(|h| h.system), Some(HouseSystem::Equal));
}

#[tokio::test]
async fn test_invalid_coordinates_never_reach_the_provider() {
    let backend = ScriptedBackend::healthy();
    let calls = backend.calls.clone();
    let engine = engine(backend, Arc::new(PlaceholderFallback));

    let mut req = request();
    req.location.lat = 91.0;
    let err = engine.calculate(&req).await.unwrap_err();
    assert!(matches!(err, ChartError::Input(InputError::LatitudeOutOfRange(_))));

    let mut req = request();
    req.location.lon = f64::NAN;
    let err = engine.calculate(&req).await.unwrap_err();
    assert!(err.is_input());

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_orb_override_is_validated() {
    let engine = ChartEngine::fallback_only(ChartSettings::default()).unwrap();
    let mut req = request();
    req.orb = Some(40.0);
    let err = engine.calculate(&req).await.unwrap_err();
    assert!(matches!(err, ChartError::Input(InputError::InvalidField { field: "orb", .. })));

    req.orb = Some(0.0);
    assert!(engine.calculate(&req).await.is_ok());
}

#[tokio::test]
async fn test_short_fallback_is_fatal() {
    let err = engine(ScriptedBackend::failing(&[Body::Sun]), Arc::new(ShortFallback))
        .calculate(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::FallbackExhausted { .. }));
    assert!(!err.is_input());
}

#[tokio::test]
async fn test_lilith_setting_adds_fourteenth_body() {
    let settings = ChartSettings {
        include_lilith: true,
        ..ChartSettings::default()
    };
    let gate = EphemerisGate::new(Box::new(ScriptedBackend::healthy()), None).unwrap();
    let engine = ChartEngine::new(Some(gate), Arc::new(PlaceholderFallback), settings).unwrap();
    let chart = engine.calculate(&request()).await.unwrap();
    assert_eq!(chart.bodies.len(), 14);
    assert_eq!(chart.bodies.last().map(|b| b.name), Some(Body::Lilith));
}

#[tokio::test]
async fn test_result_json_shape() {
    let chart = engine(ScriptedBackend::healthy(), Arc::new(PlaceholderFallback))
        .calculate(&request())
        .await
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    for key in ["planets", "houses", "aspects", "elementCounts", "source", "julianDay"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["source"], "ephemeris");
    assert_eq!(json["planets"][10]["name"], "Mean Node");
    assert!(json["houses"]["angles"]["imumCoeli"].is_object());
    assert_eq!(json["elementCounts"].as_object().map(|m| m.len()), Some(4));
}
