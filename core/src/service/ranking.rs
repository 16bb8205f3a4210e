use std::cmp::Ordering;

use crate::model::advisor::AdvisorRevenueRecord;
use crate::model::month::Month;
use crate::service::dto::{MonthlyTopRevenue, RankedAdvisor};

/// Stable sort, highest `key` first. Equal keys keep their input order.
pub fn sort_descending_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

/// Every record annotated with its whitelisted total, highest first. Equal
/// totals keep their input order.
pub fn rank_by_revenue(records: &[AdvisorRevenueRecord]) -> Vec<RankedAdvisor> {
    let mut ranked: Vec<RankedAdvisor> = records
        .iter()
        .map(|record| RankedAdvisor {
            total_revenue: record.total_revenue(),
            record: record.clone(),
        })
        .collect();

    sort_descending_by(&mut ranked, |r| r.total_revenue);
    ranked
}

/// The `n` highest earners, or all of them when fewer exist.
pub fn top_n(records: &[AdvisorRevenueRecord], n: usize) -> Vec<RankedAdvisor> {
    let mut ranked = rank_by_revenue(records);
    ranked.truncate(n);
    ranked
}

/// Combined revenue of each month's top `n` advisors, Jan..Dec. `records` may
/// span several months; months without records contribute zero.
pub fn top_n_combined_by_month(records: &[AdvisorRevenueRecord], n: usize) -> Vec<MonthlyTopRevenue> {
    Month::ALL
        .iter()
        .map(|&month| {
            let in_month: Vec<AdvisorRevenueRecord> = records
                .iter()
                .filter(|r| r.month == month)
                .cloned()
                .collect();
            let top = top_n(&in_month, n);
            MonthlyTopRevenue {
                month,
                combined_revenue: top.iter().map(|a| a.total_revenue).sum(),
                advisors_counted: top.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::advisor::RevenueItem;
    use proptest::prelude::*;

    fn advisor(name: &str, month: Month, labour: f64) -> AdvisorRevenueRecord {
        AdvisorRevenueRecord::new(name, 2025, month, 10).with_item("LAB", labour)
    }

    fn names(ranked: &[RankedAdvisor]) -> Vec<&str> {
        ranked.iter().map(|r| r.record.advisor_name.as_str()).collect()
    }

    #[test]
    fn test_top_n_orders_by_total() {
        let records = vec![
            advisor("A", Month::Jun, 100.0),
            advisor("B", Month::Jun, 300.0),
            advisor("C", Month::Jun, 200.0),
        ];
        let top = top_n(&records, 2);
        assert_eq!(names(&top), vec!["B", "C"]);
        assert_eq!(top[0].total_revenue, 300.0);
    }

    #[test]
    fn test_top_n_with_fewer_records_than_requested() {
        let records = vec![advisor("A", Month::Jun, 100.0)];
        assert_eq!(top_n(&records, 5).len(), 1);
        assert!(top_n(&[], 3).is_empty());
        assert!(top_n(&records, 0).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            advisor("First", Month::Jun, 50.0),
            advisor("Top", Month::Jun, 80.0),
            advisor("Second", Month::Jun, 50.0),
            advisor("Third", Month::Jun, 50.0),
        ];
        assert_eq!(names(&top_n(&records, 4)), vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![advisor("A", Month::Jun, 1.0), advisor("B", Month::Jun, 2.0)];
        let before = records.clone();
        let _ = top_n(&records, 1);
        assert_eq!(records, before);
    }

    #[test]
    fn test_combined_by_month() {
        let records = vec![
            advisor("A", Month::Jan, 100.0),
            advisor("B", Month::Jan, 300.0),
            advisor("C", Month::Jan, 200.0),
            advisor("D", Month::Jan, 50.0),
            advisor("A", Month::Feb, 10.0),
        ];
        let combined = top_n_combined_by_month(&records, 3);

        assert_eq!(combined.len(), 12);
        assert_eq!(combined[0].combined_revenue, 600.0);
        assert_eq!(combined[1].combined_revenue, 10.0);
        assert_eq!(combined[1].advisors_counted, 1);
        assert_eq!(combined[2].combined_revenue, 0.0);
    }

    fn arb_advisors() -> impl Strategy<Value = Vec<AdvisorRevenueRecord>> {
        proptest::collection::vec(proptest::collection::vec(0f64..1e6, 11), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, values)| {
                    let mut record = AdvisorRevenueRecord::new(&format!("Advisor {}", i), 2025, Month::Jun, 0);
                    for (item, value) in RevenueItem::WHITELIST.iter().zip(values) {
                        record = record.with_item(item.label(), value);
                    }
                    record
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_top_n_is_sorted_and_sized(records in arb_advisors(), n in 0usize..15) {
            let top = top_n(&records, n);
            prop_assert_eq!(top.len(), n.min(records.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].total_revenue >= pair[1].total_revenue);
            }
        }

        #[test]
        fn prop_extra_fields_do_not_change_rank(
            records in arb_advisors(),
            pick in any::<prop::sample::Index>(),
            extra in 0f64..1e9,
        ) {
            prop_assume!(!records.is_empty());
            let target = pick.index(records.len());
            let baseline = rank_by_revenue(&records);

            let mut padded = records.clone();
            padded[target] = padded[target].clone().with_item("RSA (Nos)", extra);
            let ranked = rank_by_revenue(&padded);

            prop_assert_eq!(padded[target].total_revenue(), records[target].total_revenue());
            prop_assert_eq!(names(&ranked), names(&baseline));
        }
    }
}
