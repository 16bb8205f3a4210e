use crate::model::metrics::{MetricKey, YearlyMetricSet};
use crate::model::month::Month;
use crate::service::dto::QuarterComparison;
use crate::service::percent::percent_change;

fn quarter_total(set: &YearlyMetricSet, metric: MetricKey, quarter: u32) -> f64 {
    Month::ALL
        .iter()
        .filter(|m| m.quarter() == quarter)
        .map(|&m| metric.value(&set.lookup(m).values()))
        .sum()
}

/// Q1..Q4 totals of `metric` for both years.
pub fn compare_quarters(
    current: &YearlyMetricSet,
    previous: &YearlyMetricSet,
    metric: MetricKey,
) -> Vec<QuarterComparison> {
    (1..=4)
        .map(|quarter| {
            let c = quarter_total(current, metric, quarter);
            let p = quarter_total(previous, metric, quarter);
            QuarterComparison {
                quarter,
                current: c,
                previous: p,
                percent_change: percent_change(c, p),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::{MetricValues, MonthlyMetricRecord};

    fn parts(month: Month, mech: f64, bp: f64) -> MonthlyMetricRecord {
        MonthlyMetricRecord::new(
            month,
            MetricValues {
                mech_parts: mech,
                bp_parts: bp,
                ..MetricValues::ZERO
            },
        )
    }

    #[test]
    fn test_quarters_sum_their_months() {
        let current = YearlyMetricSet::new(
            2025,
            vec![
                parts(Month::Jan, 10.0, 5.0),
                parts(Month::Mar, 20.0, 0.0),
                parts(Month::Apr, 40.0, 0.0),
            ],
        );
        let previous = YearlyMetricSet::new(2024, vec![parts(Month::Feb, 30.0, 0.0)]);

        let quarters = compare_quarters(&current, &previous, MetricKey::PartsRevenue);

        assert_eq!(quarters.len(), 4);
        assert_eq!(quarters[0].current, 35.0);
        assert_eq!(quarters[0].previous, 30.0);
        assert_eq!(quarters[0].percent_change, Some(16.67));
        assert_eq!(quarters[1].percent_change, None);
        assert_eq!(quarters[3].current, 0.0);
        assert_eq!(quarters[3].percent_change, Some(0.0));
    }
}
