pub mod detector;
pub mod types;

pub use detector::{AspectDetector, EVALUATION_ORDER};
pub use types::{Aspect, AspectKind, AspectSet, AspectSettings, DEFAULT_ORB};
