//! Single-flight access to a process-global ephemeris backend.

use crate::bodies::Body;
use crate::ephemeris::backend::{EphemerisBackend, EphemerisError};
use crate::ephemeris::types::{GeoLocation, RawBodyPosition, RawHouses};
use crate::houses::{HouseSystem, MEAN_OBLIQUITY};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the one backend a process owns.
///
/// Cloning the gate shares the backend. At most one [`with_location`]
/// scope runs at a time, so one request's observer location can never be
/// read by another request's calculation.
///
/// [`with_location`]: EphemerisGate::with_location
#[derive(Clone)]
pub struct EphemerisGate {
    backend: Arc<Mutex<Box<dyn EphemerisBackend>>>,
    name: String,
}

impl EphemerisGate {
    /// Wrap a backend, pointing it at its data files first when a path is given.
    pub fn new(
        mut backend: Box<dyn EphemerisBackend>,
        ephemeris_path: Option<&Path>,
    ) -> Result<Self, EphemerisError> {
        if let Some(path) = ephemeris_path {
            backend.set_ephemeris_path(path)?;
        }
        let name = backend.name().to_string();
        Ok(Self {
            backend: Arc::new(Mutex::new(backend)),
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f` with exclusive use of the backend and `location` set as the
    /// topocentric observer. The location is set immediately before `f` and
    /// nothing may rely on it once the scope ends.
    pub async fn with_location<T, F>(&self, location: &GeoLocation, f: F) -> Result<T, EphemerisError>
    where
        F: FnOnce(&mut EphemerisSession<'_>) -> T,
    {
        let mut guard = self.backend.lock().await;
        guard.set_topocentric_location(location)?;
        log::trace!(
            "{}: topocentric location set to lat={} lon={} alt={}",
            self.name,
            location.lat,
            location.lon,
            location.alt
        );
        let mut session = EphemerisSession {
            backend: &mut **guard,
            location: *location,
        };
        Ok(f(&mut session))
    }
}

/// Backend access scoped to one request and one observer location.
pub struct EphemerisSession<'a> {
    backend: &'a mut (dyn EphemerisBackend + 'static),
    location: GeoLocation,
}

impl EphemerisSession<'_> {
    pub fn julian_day(&self, dt: DateTime<Utc>) -> f64 {
        self.backend.julian_day(dt)
    }

    /// Resolve every body, reporting each outcome separately.
    pub fn resolve_bodies(
        &mut self,
        julian_day: f64,
        bodies: &[Body],
    ) -> Vec<(Body, Result<RawBodyPosition, EphemerisError>)> {
        bodies
            .iter()
            .map(|&body| (body, self.backend.resolve_body(julian_day, body)))
            .collect()
    }

    /// `Ok(None)` without asking the backend when `system` has no cusps at
    /// this latitude.
    pub fn resolve_houses(
        &mut self,
        julian_day: f64,
        system: HouseSystem,
    ) -> Result<Option<RawHouses>, EphemerisError> {
        let GeoLocation { lat, lon, .. } = self.location;
        if !system.available_at(lat, MEAN_OBLIQUITY) {
            log::warn!("{} houses undefined at lat={}, chart will have no houses", system, lat);
            return Ok(None);
        }
        self.backend.resolve_houses(julian_day, lat, lon, system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records the location each resolve saw, and how many scopes overlap.
    struct LocationRecorder {
        current: Option<GeoLocation>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
    }

    impl EphemerisBackend for LocationRecorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn set_ephemeris_path(&mut self, _path: &Path) -> Result<(), EphemerisError> {
            Ok(())
        }

        fn set_topocentric_location(&mut self, location: &GeoLocation) -> Result<(), EphemerisError> {
            self.current = Some(*location);
            Ok(())
        }

        fn resolve_body(&mut self, _jd: f64, _body: Body) -> Result<RawBodyPosition, EphemerisError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(2));
            let lon = self.current.map(|l| l.lon).unwrap_or(f64::NAN);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(RawBodyPosition { longitude: lon, speed: 1.0 })
        }

        fn resolve_houses(
            &mut self,
            _jd: f64,
            _lat: f64,
            _lon: f64,
            _system: HouseSystem,
        ) -> Result<Option<RawHouses>, EphemerisError> {
            Ok(None)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_scopes_never_share_a_location() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));
        let gate = EphemerisGate::new(
            Box::new(LocationRecorder {
                current: None,
                in_flight: in_flight.clone(),
                max_in_flight: max_in_flight.clone(),
            }),
            None,
        )
        .unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                let loc = GeoLocation::new(10.0, i as f64 * 10.0);
                gate.with_location(&loc, |s| s.resolve_bodies(2451545.0, &[Body::Sun, Body::Moon]))
                    .await
                    .unwrap()
                    .into_iter()
                    .all(|(_, r)| r.unwrap().longitude == i as f64 * 10.0)
            }));
        }

        for h in handles {
            assert!(h.await.unwrap());
        }
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
    }
}
