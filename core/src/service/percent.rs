/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percent change from `previous` to `current`, rounded to two decimals.
///
/// A zero base yields `None` for any growth (unbounded, shown as "∞") and
/// `Some(0.0)` otherwise. Never returns a non-finite number for finite input.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return if current > 0.0 { None } else { Some(0.0) };
    }
    Some(round2((current - previous) / previous * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percent_change_examples() {
        assert_eq!(percent_change(125.0, 100.0), Some(25.0));
        assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
        assert_eq!(percent_change(663.0, 1663.0), Some(-60.13));
        assert_eq!(percent_change(100.0, 100.0), Some(0.0));
    }

    #[test]
    fn test_zero_base() {
        assert_eq!(percent_change(1.0, 0.0), None);
        assert_eq!(percent_change(0.0, 0.0), Some(0.0));
        assert_eq!(percent_change(-5.0, 0.0), Some(0.0));
    }

    #[test]
    fn test_negative_base_keeps_sign_of_formula() {
        assert_eq!(percent_change(-50.0, -100.0), Some(-50.0));
    }

    proptest! {
        #[test]
        fn prop_zero_base_growth_is_unbounded(current in 0.001f64..1e9) {
            prop_assert_eq!(percent_change(current, 0.0), None);
        }

        #[test]
        fn prop_zero_base_decline_is_zero(current in -1e9f64..=0.0) {
            prop_assert_eq!(percent_change(current, 0.0), Some(0.0));
        }

        #[test]
        fn prop_nonzero_base_matches_formula(current in -1e9f64..1e9, previous in 1f64..1e9) {
            let expected = round2((current - previous) / previous * 100.0);
            prop_assert_eq!(percent_change(current, previous), Some(expected));
            prop_assert!(expected.is_finite());
        }
    }
}
