use std::collections::BTreeMap;

use crate::model::metrics::{MetricKey, MetricTargets, YearlyMetricSet};
use crate::model::month::Month;
use crate::service::dto::{ComparisonSeriesEntry, ComparisonValues, MonthlyComparison};
use crate::service::percent::percent_change;

/// Twelve entries for `metric`, Jan..Dec. Months missing from either year
/// read as zero.
pub fn compare_metric(
    current: &YearlyMetricSet,
    previous: &YearlyMetricSet,
    metric: MetricKey,
    targets: &MetricTargets,
) -> Vec<ComparisonSeriesEntry> {
    Month::ALL
        .iter()
        .map(|&month| {
            let current_lookup = current.lookup(month);
            // Composite metrics are summed per record before the split.
            let current_value = metric.value(&current_lookup.values());
            let previous_value = metric.value(&previous.lookup(month).values());
            ComparisonSeriesEntry {
                month,
                current: current_value,
                previous: previous_value,
                target: targets.get(metric),
                percent_change: percent_change(current_value, previous_value),
                is_projected_or_missing: !current_lookup.is_present(),
            }
        })
        .collect()
}

/// Multi-metric form of [`compare_metric`], one entry per month.
pub fn compare_years(
    current: &YearlyMetricSet,
    previous: &YearlyMetricSet,
    metrics: &[MetricKey],
    targets: &MetricTargets,
) -> Vec<MonthlyComparison> {
    Month::ALL
        .iter()
        .map(|&month| {
            let current_lookup = current.lookup(month);
            let current_values = current_lookup.values();
            let previous_values = previous.lookup(month).values();

            let values: BTreeMap<MetricKey, ComparisonValues> = metrics
                .iter()
                .map(|&metric| {
                    let c = metric.value(&current_values);
                    let p = metric.value(&previous_values);
                    let entry = ComparisonValues {
                        current: c,
                        previous: p,
                        target: targets.get(metric),
                        percent_change: percent_change(c, p),
                    };
                    (metric, entry)
                })
                .collect();

            MonthlyComparison {
                month,
                values,
                is_projected_or_missing: !current_lookup.is_present(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::{MetricValues, MonthlyMetricRecord};
    use proptest::prelude::*;

    fn throughput(month: Month, mech: f64, bp: f64) -> MonthlyMetricRecord {
        MonthlyMetricRecord::new(
            month,
            MetricValues {
                mech_ro: mech,
                bp_ro: bp,
                ..MetricValues::ZERO
            },
        )
    }

    #[test]
    fn test_june_throughput_scenario() {
        let current = YearlyMetricSet::new(2025, vec![throughput(Month::Jun, 604.0, 59.0)]);
        let previous = YearlyMetricSet::new(2024, vec![throughput(Month::Jun, 1432.0, 231.0)]);

        let series = compare_metric(&current, &previous, MetricKey::Throughput, &MetricTargets::default());
        let june = series[Month::Jun.index()];

        assert_eq!(june.current, 663.0);
        assert_eq!(june.previous, 1663.0);
        assert_eq!(june.percent_change, Some(-60.13));
        assert_eq!(june.target, 1400.0);
        assert!(!june.is_projected_or_missing);
    }

    #[test]
    fn test_missing_months_are_zero_filled_and_flagged() {
        let current = YearlyMetricSet::new(2025, vec![throughput(Month::Jan, 0.0, 0.0)]);
        let previous = YearlyMetricSet::new(2024, vec![throughput(Month::Feb, 10.0, 0.0)]);

        let series = compare_metric(&current, &previous, MetricKey::Throughput, &MetricTargets::default());

        // Jan was reported as zero; Feb never arrived.
        assert!(!series[0].is_projected_or_missing);
        assert_eq!(series[0].percent_change, Some(0.0));
        assert!(series[1].is_projected_or_missing);
        assert_eq!(series[1].current, 0.0);
        assert_eq!(series[1].previous, 10.0);
        assert_eq!(series[1].percent_change, Some(-100.0));
    }

    #[test]
    fn test_growth_from_zero_is_unbounded() {
        let current = YearlyMetricSet::new(2025, vec![throughput(Month::Mar, 5.0, 0.0)]);
        let previous = YearlyMetricSet::empty(2024);

        let series = compare_metric(&current, &previous, MetricKey::MechRo, &MetricTargets::default());
        assert_eq!(series[Month::Mar.index()].percent_change, None);
    }

    #[test]
    fn test_compare_years_carries_every_metric() {
        let current = YearlyMetricSet::new(2025, vec![throughput(Month::Jun, 604.0, 59.0)]);
        let previous = YearlyMetricSet::new(2024, vec![throughput(Month::Jun, 1432.0, 231.0)]);
        let metrics = [MetricKey::Throughput, MetricKey::BpRo];

        let rows = compare_years(&current, &previous, &metrics, &MetricTargets::default());
        assert_eq!(rows.len(), 12);
        let june = &rows[Month::Jun.index()];
        assert_eq!(june.values.len(), 2);
        assert_eq!(june.values[&MetricKey::BpRo].current, 59.0);
        assert_eq!(june.values[&MetricKey::Throughput].percent_change, Some(-60.13));
    }

    fn arb_year(year: i32) -> impl Strategy<Value = YearlyMetricSet> {
        proptest::sample::subsequence(Month::ALL.to_vec(), 0..=12).prop_flat_map(move |months| {
            let n = months.len();
            proptest::collection::vec((0f64..2000.0, 0f64..300.0), n).prop_map(move |values| {
                let records = months
                    .iter()
                    .zip(values)
                    .map(|(&m, (mech, bp))| throughput(m, mech, bp))
                    .collect();
                YearlyMetricSet::new(year, records)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_always_twelve_months_in_order(current in arb_year(2025), previous in arb_year(2024)) {
            let series = compare_metric(&current, &previous, MetricKey::Throughput, &MetricTargets::default());
            prop_assert_eq!(series.len(), 12);
            for (entry, month) in series.iter().zip(Month::ALL) {
                prop_assert_eq!(entry.month, month);
                prop_assert_eq!(entry.is_projected_or_missing, !current.lookup(month).is_present());
            }

            let rows = compare_years(&current, &previous, &MetricKey::ALL, &MetricTargets::default());
            prop_assert_eq!(rows.len(), 12);
        }
    }
}
