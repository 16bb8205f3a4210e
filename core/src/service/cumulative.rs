use tracing::debug;

use crate::model::metrics::{MetricKey, MetricTargets, YearlyMetricSet};
use crate::service::dto::{ComparisonSeriesEntry, CumulativeSeriesEntry, YtdReport, YtdSummary};
use crate::service::percent::percent_change;
use crate::service::year_over_year::compare_metric;

/// Running year-to-date sums for both tracks of a comparison series.
///
/// Deltas are clamped at zero so both tracks are non-decreasing. Once the
/// current year runs out of non-zero months the running total holds its last
/// value and the remaining entries are marked `current_plateaued`.
pub fn rollup_cumulative(series: &[ComparisonSeriesEntry]) -> Vec<CumulativeSeriesEntry> {
    let mut ordered = series.to_vec();
    ordered.sort_by_key(|e| e.month);

    let last_current = ordered.iter().rposition(|e| e.current > 0.0);

    let mut current_total = 0.0;
    let mut previous_total = 0.0;
    ordered
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            current_total += non_negative(entry.current, entry, "current");
            previous_total += non_negative(entry.previous, entry, "previous");
            CumulativeSeriesEntry {
                month: entry.month,
                current_cumulative: current_total,
                previous_cumulative: previous_total,
                current_plateaued: last_current.map_or(true, |last| i > last),
            }
        })
        .collect()
}

fn non_negative(value: f64, entry: &ComparisonSeriesEntry, track: &str) -> f64 {
    if value < 0.0 {
        debug!(month = %entry.month, track, value, "clamping negative monthly delta");
        0.0
    } else {
        value
    }
}

/// Header figure: cumulative values at the most recently populated month of
/// the current year. `monthly_target` is scaled by the number of months
/// covered. No change is reported before the current year has any data.
pub fn ytd_summary(
    metric: MetricKey,
    cumulative: &[CumulativeSeriesEntry],
    monthly_target: f64,
) -> YtdSummary {
    let latest = cumulative.iter().rev().find(|e| !e.current_plateaued);
    match latest {
        Some(entry) => YtdSummary {
            metric,
            through: Some(entry.month),
            current: entry.current_cumulative,
            previous: entry.previous_cumulative,
            target: monthly_target * entry.month.number() as f64,
            percent_change: percent_change(entry.current_cumulative, entry.previous_cumulative),
        },
        None => YtdSummary {
            metric,
            through: None,
            current: 0.0,
            previous: 0.0,
            target: 0.0,
            percent_change: None,
        },
    }
}

pub fn ytd_report(
    current: &YearlyMetricSet,
    previous: &YearlyMetricSet,
    metric: MetricKey,
    targets: &MetricTargets,
) -> YtdReport {
    let monthly = compare_metric(current, previous, metric, targets);
    let series = rollup_cumulative(&monthly);
    let summary = ytd_summary(metric, &series, targets.get(metric));
    YtdReport { summary, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::month::Month;
    use proptest::prelude::*;

    fn entry(month: Month, current: f64, previous: f64) -> ComparisonSeriesEntry {
        ComparisonSeriesEntry {
            month,
            current,
            previous,
            target: 0.0,
            percent_change: percent_change(current, previous),
            is_projected_or_missing: false,
        }
    }

    fn year_in_progress() -> Vec<ComparisonSeriesEntry> {
        Month::ALL
            .iter()
            .map(|&m| {
                let current = if m <= Month::Mar { 100.0 } else { 0.0 };
                entry(m, current, 50.0)
            })
            .collect()
    }

    #[test]
    fn test_current_track_plateaus_after_last_actual() {
        let rolled = rollup_cumulative(&year_in_progress());

        assert_eq!(rolled.len(), 12);
        assert_eq!(rolled[2].current_cumulative, 300.0);
        assert!(!rolled[2].current_plateaued);
        assert_eq!(rolled[11].current_cumulative, 300.0);
        assert!(rolled[3].current_plateaued);
        assert_eq!(rolled[11].previous_cumulative, 600.0);
    }

    #[test]
    fn test_zero_inside_year_does_not_plateau() {
        let mut series = year_in_progress();
        series[1].current = 0.0;
        let rolled = rollup_cumulative(&series);
        assert!(!rolled[1].current_plateaued);
        assert_eq!(rolled[1].current_cumulative, 100.0);
        assert_eq!(rolled[2].current_cumulative, 200.0);
    }

    #[test]
    fn test_negative_deltas_are_clamped() {
        let mut series = year_in_progress();
        series[1].current = -40.0;
        let rolled = rollup_cumulative(&series);
        assert_eq!(rolled[1].current_cumulative, 100.0);
    }

    #[test]
    fn test_unordered_input_is_rolled_in_calendar_order() {
        let mut series = year_in_progress();
        series.reverse();
        let rolled = rollup_cumulative(&series);
        assert_eq!(rolled[0].month, Month::Jan);
        assert_eq!(rolled[0].current_cumulative, 100.0);
    }

    #[test]
    fn test_ytd_summary_uses_latest_populated_month() {
        let rolled = rollup_cumulative(&year_in_progress());
        let summary = ytd_summary(MetricKey::Throughput, &rolled, 1400.0);

        assert_eq!(summary.through, Some(Month::Mar));
        assert_eq!(summary.current, 300.0);
        assert_eq!(summary.previous, 150.0);
        assert_eq!(summary.target, 4200.0);
        assert_eq!(summary.percent_change, Some(100.0));
    }

    #[test]
    fn test_ytd_summary_without_data() {
        let series: Vec<_> = Month::ALL.iter().map(|&m| entry(m, 0.0, 10.0)).collect();
        let rolled = rollup_cumulative(&series);
        assert!(rolled.iter().all(|e| e.current_plateaued));

        let summary = ytd_summary(MetricKey::Throughput, &rolled, 1400.0);
        assert_eq!(summary.through, None);
        assert_eq!(summary.current, 0.0);
        assert_eq!(summary.previous, 0.0);
        assert_eq!(summary.percent_change, None);
    }

    fn arb_series() -> impl Strategy<Value = Vec<ComparisonSeriesEntry>> {
        proptest::collection::vec((0f64..1e7, 0f64..1e7, proptest::bool::weighted(0.2)), 12).prop_map(
            |values| {
                Month::ALL
                    .iter()
                    .zip(values)
                    .map(|(&m, (c, p, zero))| entry(m, if zero { 0.0 } else { c }, p))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_cumulative_is_monotonic(series in arb_series()) {
            let rolled = rollup_cumulative(&series);
            prop_assert_eq!(rolled.len(), 12);
            for pair in rolled.windows(2) {
                prop_assert!(pair[1].current_cumulative >= pair[0].current_cumulative);
                prop_assert!(pair[1].previous_cumulative >= pair[0].previous_cumulative);
            }
        }

        #[test]
        fn prop_last_open_value_equals_sum_of_deltas(series in arb_series()) {
            let rolled = rollup_cumulative(&series);
            if let Some(last) = rolled.iter().rposition(|e| !e.current_plateaued) {
                let expected: f64 = series[..=last].iter().map(|e| e.current).sum();
                prop_assert!((rolled[last].current_cumulative - expected).abs() < 1e-6);
                prop_assert!(rolled[last + 1..]
                    .iter()
                    .all(|e| e.current_cumulative == rolled[last].current_cumulative));
            }
        }
    }
}
