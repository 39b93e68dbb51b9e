pub mod backend;
pub mod fallback;
pub mod gate;
#[cfg(feature = "swisseph")]
pub mod swiss;
pub mod time;
pub mod types;

pub use backend::{EphemerisBackend, EphemerisError};
pub use fallback::{FallbackEphemeris, PlaceholderFallback};
pub use gate::{EphemerisGate, EphemerisSession};
#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemerisBackend;
pub use types::{GeoLocation, RawBodyPosition, RawHouses};

use std::path::Path;

/// Build the gate for the native ephemeris compiled into this binary.
///
/// Returns `Ok(None)` when the crate was built without the `swisseph`
/// feature; callers then serve every chart from the fallback.
#[cfg(feature = "swisseph")]
pub fn native_gate(ephemeris_path: Option<&Path>) -> Result<Option<EphemerisGate>, EphemerisError> {
    let backend = SwissEphemerisBackend::new(ephemeris_path.map(Path::to_path_buf))?;
    EphemerisGate::new(Box::new(backend), None).map(Some)
}

#[cfg(not(feature = "swisseph"))]
pub fn native_gate(ephemeris_path: Option<&Path>) -> Result<Option<EphemerisGate>, EphemerisError> {
    if let Some(path) = ephemeris_path {
        log::debug!(
            "ignoring ephemeris path {}: built without the swisseph feature",
            path.display()
        );
    }
    Ok(None)
}
