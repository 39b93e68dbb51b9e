//! Property-based tests for angle and zodiac classification.

use natal_chart::angle::{angular_distance, normalize};
use natal_chart::zodiac::{degree_in_sign, element_of, sign_of};
use proptest::prelude::*;

proptest! {
    /// normalize lands in [0, 360)
    #[test]
    fn prop_normalize_range(x in -1.0e6f64..1.0e6) {
        let n = normalize(x);
        prop_assert!((0.0..360.0).contains(&n), "normalize({}) = {}", x, n);
    }

    /// normalize is idempotent
    #[test]
    fn prop_normalize_idempotent(x in -1.0e6f64..1.0e6) {
        let n = normalize(x);
        prop_assert_eq!(normalize(n), n);
    }

    /// Adding whole turns does not move a longitude
    #[test]
    fn prop_normalize_periodic(x in -1.0e4f64..1.0e4, turns in -100i32..100) {
        let shifted = x + 360.0 * turns as f64;
        prop_assert!(angular_distance(normalize(x), normalize(shifted)) < 1e-6);
    }
}

proptest! {
    #[test]
    fn prop_distance_symmetric(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        prop_assert_eq!(angular_distance(a, b), angular_distance(b, a));
    }

    #[test]
    fn prop_distance_range(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let d = angular_distance(a, b);
        prop_assert!((0.0..=180.0).contains(&d), "distance({}, {}) = {}", a, b, d);
    }

    #[test]
    fn prop_distance_identity(a in -720.0f64..720.0) {
        prop_assert_eq!(angular_distance(a, a), 0.0);
    }
}

proptest! {
    /// Sign is the 30° band the normalized longitude falls in
    #[test]
    fn prop_sign_matches_band(x in -1.0e4f64..1.0e4) {
        let n = normalize(x);
        let sign = sign_of(x);
        prop_assert_eq!(sign.index() as f64, (n / 30.0).floor().min(11.0));
        prop_assert_eq!(sign.element(), element_of(sign));
        let within = degree_in_sign(x);
        prop_assert!((0.0..30.0).contains(&within));
    }
}
