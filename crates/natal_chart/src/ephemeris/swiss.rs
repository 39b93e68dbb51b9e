use crate::bodies::Body;
use crate::ephemeris::backend::{EphemerisBackend, EphemerisError};
use crate::ephemeris::types::{GeoLocation, RawBodyPosition, RawHouses};
use crate::houses::{HouseSystem, MEAN_OBLIQUITY};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path, set_topo};
use swisseph::{AscMc, Cusp};

/// Directory used when neither an explicit path nor `SWISS_EPHEMERIS_PATH` is given.
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const FLG_TOPOCTR: i32 = 32 * 1024;
const GREG_CAL: i32 = 1;

/// Swiss Ephemeris backend.
///
/// The C library keeps its data path and observer location in globals, so
/// a process should own at most one of these, behind an `EphemerisGate`.
pub struct SwissEphemerisBackend {
    topocentric: bool,
}

impl SwissEphemerisBackend {
    /// Create a backend with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        let mut backend = Self { topocentric: false };
        backend.set_ephemeris_path(&path)?;
        Ok(backend)
    }

    fn flags(&self) -> i32 {
        let mut flags = FLG_SWIEPH | FLG_SPEED;
        if self.topocentric {
            flags |= FLG_TOPOCTR;
        }
        flags
    }
}

impl EphemerisBackend for SwissEphemerisBackend {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn set_ephemeris_path(&mut self, path: &Path) -> Result<(), EphemerisError> {
        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        set_ephe_path(&path.to_string_lossy());
        log::info!("Swiss Ephemeris data path: {}", path.display());
        Ok(())
    }

    fn set_topocentric_location(&mut self, location: &GeoLocation) -> Result<(), EphemerisError> {
        set_topo(location.lon, location.lat, location.alt);
        self.topocentric = true;
        Ok(())
    }

    fn resolve_body(&mut self, julian_day: f64, body: Body) -> Result<RawBodyPosition, EphemerisError> {
        let result = calc_ut(julian_day, body.swiss_id() as u32, self.flags() as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                object: body.name().to_string(),
                julian_day,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        Ok(RawBodyPosition {
            longitude: result.out[0],
            speed: result.out[3],
        })
    }

    fn resolve_houses(
        &mut self,
        julian_day: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<Option<RawHouses>, EphemerisError> {
        // Inside the polar circles the library swaps Placidus and Koch for
        // Porphyry and only says so in a return code the binding drops.
        if !system.available_at(lat, MEAN_OBLIQUITY) {
            return Ok(None);
        }

        let (c, a) = houses_ex(julian_day, self.flags(), lat, lon, system.swiss_code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = RawHouses {
            ascendant: ascmc.ascendant,
            mc: ascmc.mc,
            cusps: [
                cusps.first, cusps.second, cusps.third, cusps.fourth,
                cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
                cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
            ],
        };

        if raw.cusps.iter().all(|c| *c == 0.0) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} returned no cusps (JD {})", system.name(), julian_day),
            });
        }
        if let Some(bad) = raw.cusps.iter().find(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} cusps at lat={} lon={} (JD {}) include {}",
                    system.name(),
                    lat,
                    lon,
                    julian_day,
                    bad
                ),
            });
        }
        Ok(Some(raw))
    }

    fn julian_day(&self, dt: DateTime<Utc>) -> f64 {
        let hour_decimal = dt.hour() as f64
            + dt.minute() as f64 / 60.0
            + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
        julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREG_CAL)
    }
}
