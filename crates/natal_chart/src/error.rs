use thiserror::Error;

/// A request the engine refuses before touching any ephemeris.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("latitude must be between -90 and 90 degrees, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be between -180 and 180 degrees, got {0}")]
    LongitudeOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Input(#[from] InputError),
    /// The fallback produced unusable data. Fatal for the request.
    #[error("fallback ephemeris {name} failed: {message}")]
    FallbackExhausted { name: String, message: String },
}

impl ChartError {
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
