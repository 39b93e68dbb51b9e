//! Display formatting for longitudes.

use crate::angle::normalize;
use crate::zodiac::degree_in_sign;

/// Position within its sign as `D°MM'SS"`.
///
/// Seconds round half away from zero. A rounded 60" carries into the
/// minutes and 60' into the degrees, so 29°59'59.6" renders as `30°00'00"`.
pub fn format_dms(longitude: f64) -> String {
    let total_seconds = (degree_in_sign(longitude) * 3600.0).round() as u64;
    let degrees = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}°{:02}'{:02}\"", degrees, minutes, seconds)
}

/// Absolute longitude with two decimals, e.g. `123.45°`.
pub fn format_longitude(longitude: f64) -> String {
    format!("{:.2}°", normalize(longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_sign() {
        assert_eq!(format_dms(0.0), "0°00'00\"");
        assert_eq!(format_dms(45.5), "15°30'00\"");
        assert_eq!(format_dms(359.0), "29°00'00\"");
        assert_eq!(format_dms(-1.0), "29°00'00\"");
        assert_eq!(format_dms(123.456), "3°27'22\"");
    }

    #[test]
    fn matches_degree_in_sign() {
        for longitude in [30.0, 75.25, 795.25, -285.0, 359.5] {
            let expected = degree_in_sign(longitude);
            let degrees = expected.floor() as u64;
            assert!(format_dms(longitude).starts_with(&format!("{}°", degrees)), "{}", longitude);
        }
        assert_eq!(format_dms(30.0), "0°00'00\"");
        assert_eq!(format_dms(795.25), "15°15'00\"");
    }

    #[test]
    fn rounding_carries() {
        // 10°59'59.8"
        assert_eq!(format_dms(10.0 + 59.0 / 60.0 + 59.8 / 3600.0), "11°00'00\"");
        assert_eq!(format_dms(5.0 + 12.0 / 60.0 + 59.7 / 3600.0), "5°13'00\"");
        assert_eq!(format_dms(29.0 + 59.0 / 60.0 + 59.6 / 3600.0), "30°00'00\"");
    }

    #[test]
    fn longitude() {
        assert_eq!(format_longitude(123.456), "123.46°");
        assert_eq!(format_longitude(-90.0), "270.00°");
    }
}
