use crate::model::metrics::MetricKey;
use crate::service::dto::Achievement;
use crate::service::percent::round2;
use crate::service::projection::run_rate;

/// Gauges stop drawing past this point.
pub const DISPLAY_CAP_PERCENT: f64 = 150.0;

pub fn achievement_percent(actual: f64, target: f64) -> Option<f64> {
    if target <= 0.0 {
        return None;
    }
    Some(round2(actual / target * 100.0))
}

/// Per-unit pace needed over `remaining_units` to reach `target`. Zero once
/// the target is met or when no units remain.
pub fn required_run_rate(actual: f64, target: f64, remaining_units: u32) -> f64 {
    let gap = target - actual;
    if gap <= 0.0 {
        return 0.0;
    }
    run_rate(gap, remaining_units)
}

pub fn achievement(metric: MetricKey, actual: f64, target: f64, remaining_units: u32) -> Achievement {
    let percent = achievement_percent(actual, target);
    Achievement {
        metric,
        actual,
        target,
        percent,
        display_percent: percent.unwrap_or(0.0).clamp(0.0, DISPLAY_CAP_PERCENT),
        gap: (target - actual).max(0.0),
        required_run_rate: required_run_rate(actual, target, remaining_units),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_percent() {
        assert_eq!(achievement_percent(700.0, 1400.0), Some(50.0));
        assert_eq!(achievement_percent(1.0, 3.0), Some(33.33));
        assert_eq!(achievement_percent(10.0, 0.0), None);
    }

    #[test]
    fn test_display_is_capped() {
        let a = achievement(MetricKey::BpRo, 400.0, 200.0, 10);
        assert_eq!(a.percent, Some(200.0));
        assert_eq!(a.display_percent, DISPLAY_CAP_PERCENT);
        assert_eq!(a.gap, 0.0);
        assert_eq!(a.required_run_rate, 0.0);
    }

    #[test]
    fn test_required_run_rate() {
        assert_eq!(required_run_rate(100.0, 400.0, 30), 10.0);
        assert_eq!(required_run_rate(100.0, 400.0, 0), 0.0);
        assert_eq!(required_run_rate(500.0, 400.0, 30), 0.0);
    }
}
