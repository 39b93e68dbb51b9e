//! Natal chart derivation.
//!
//! Turns raw ephemeris output for a moment and a place into a chart: body
//! positions classified by sign and element, house cusps with the four
//! angles, and the major aspects between bodies.
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use natal_chart::{ChartEngine, ChartRequest, ChartSettings};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ChartSettings::default();
//! let primary = natal_chart::ephemeris::native_gate(settings.ephemeris_path.as_deref())?;
//! let engine = ChartEngine::new(
//!     primary,
//!     std::sync::Arc::new(natal_chart::ephemeris::PlaceholderFallback),
//!     settings,
//! )?;
//! let when = Utc.with_ymd_and_hms(1990, 5, 15, 14, 30, 0).unwrap();
//! let chart = engine.calculate(&ChartRequest::new(when, -74.006, 40.7128)).await?;
//! println!("{} aspects", chart.aspects.len());
//! # Ok(())
//! # }
//! ```

pub mod angle;
pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod format;
pub mod gazetteer;
pub mod houses;
pub mod wheel;
pub mod zodiac;

pub use aspects::{Aspect, AspectDetector, AspectKind};
pub use bodies::{Body, BodyPosition};
pub use chart::{ChartEngine, ChartQuery, ChartRequest, ChartResult, ChartSettings, ChartSource};
pub use ephemeris::{EphemerisGate, GeoLocation};
pub use error::{ChartError, InputError};
pub use houses::{HouseSystem, Houses};
pub use wheel::{WheelGenerator, WheelSpec};
pub use zodiac::{Element, Sign};
