//! Angle utilities shared by every derivation step.
//!
//! All longitudes in the engine are ecliptic degrees. Anything read from a
//! provider goes through [`normalize`] before it is classified.

use thiserror::Error;

/// Raised when a caller hands over a non-finite angle.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{what} must be a finite number of degrees, got {value}")]
pub struct NonFiniteAngle {
    pub what: &'static str,
    pub value: f64,
}

/// Normalize an angle to [0, 360).
///
/// The trailing modulo matters: for tiny negative inputs `x % 360 + 360`
/// rounds to exactly 360.0.
pub fn normalize(deg: f64) -> f64 {
    ((deg % 360.0) + 360.0) % 360.0
}

/// Unsigned shortest separation between two longitudes, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let raw = (normalize(a) - normalize(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Reject NaN and infinities before they reach [`normalize`].
pub fn ensure_finite(what: &'static str, value: f64) -> Result<f64, NonFiniteAngle> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NonFiniteAngle { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_positive_and_negative() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(725.0), 5.0);
        assert_eq!(normalize(-10.0), 350.0);
        assert_eq!(normalize(-370.0), 350.0);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let n = normalize(-1e-20);
        assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn normalize_non_finite_is_nan() {
        assert!(normalize(f64::NAN).is_nan());
        assert!(normalize(f64::INFINITY).is_nan());
    }

    #[test]
    fn angular_distance_takes_short_way_round() {
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(-90.0, 90.0), 180.0);
    }

    #[test]
    fn ensure_finite_rejects_nan() {
        assert!(ensure_finite("longitude", 12.5).is_ok());
        let err = ensure_finite("longitude", f64::NAN).unwrap_err();
        assert_eq!(err.what, "longitude");
    }
}
