use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::month::Month;

/// Raw per-month sub-fields, split between the mechanical and the body & paint
/// workshops. Fields missing from a source record deserialize as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct MetricValues {
    pub mech_ro: f64,
    pub bp_ro: f64,
    pub mech_parts: f64,
    pub bp_parts: f64,
    pub mech_labour: f64,
    pub bp_labour: f64,
    pub mech_accessories: f64,
    pub bp_accessories: f64,
}

impl MetricValues {
    pub const ZERO: MetricValues = MetricValues {
        mech_ro: 0.0,
        bp_ro: 0.0,
        mech_parts: 0.0,
        bp_parts: 0.0,
        mech_labour: 0.0,
        bp_labour: 0.0,
        mech_accessories: 0.0,
        bp_accessories: 0.0,
    };
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMetricRecord {
    pub month: Month,
    #[serde(flatten)]
    pub values: MetricValues,
}

impl MonthlyMetricRecord {
    pub fn new(month: Month, values: MetricValues) -> Self {
        Self { month, values }
    }
}

/// Result of looking a month up in a [`YearlyMetricSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthLookup<'a> {
    Present(&'a MonthlyMetricRecord),
    Absent,
}

impl MonthLookup<'_> {
    pub fn is_present(&self) -> bool {
        matches!(self, MonthLookup::Present(_))
    }

    /// Absent months read as [`MetricValues::ZERO`].
    pub fn values(&self) -> MetricValues {
        match self {
            MonthLookup::Present(record) => record.values,
            MonthLookup::Absent => MetricValues::ZERO,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearlyMetricSet {
    pub year: i32,
    #[serde(default)]
    pub months: Vec<MonthlyMetricRecord>,
}

impl YearlyMetricSet {
    pub fn new(year: i32, months: Vec<MonthlyMetricRecord>) -> Self {
        Self { year, months }
    }

    pub fn empty(year: i32) -> Self {
        Self::new(year, Vec::new())
    }

    /// First record for `month` wins if the source repeats a month.
    pub fn lookup(&self, month: Month) -> MonthLookup<'_> {
        self.months
            .iter()
            .find(|r| r.month == month)
            .map_or(MonthLookup::Absent, MonthLookup::Present)
    }
}

/// Dashboard metrics. Composite metrics are sums of raw sub-fields, taken per
/// record before any year-over-year split.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Throughput,
    MechRo,
    BpRo,
    PartsRevenue,
    LabourRevenue,
    AccessoriesRevenue,
    TotalRevenue,
}

impl MetricKey {
    pub const ALL: [MetricKey; 7] = [
        MetricKey::Throughput,
        MetricKey::MechRo,
        MetricKey::BpRo,
        MetricKey::PartsRevenue,
        MetricKey::LabourRevenue,
        MetricKey::AccessoriesRevenue,
        MetricKey::TotalRevenue,
    ];

    /// Short key used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            MetricKey::Throughput => "throughput",
            MetricKey::MechRo => "mechRo",
            MetricKey::BpRo => "bpRo",
            MetricKey::PartsRevenue => "partsRevenue",
            MetricKey::LabourRevenue => "labourRevenue",
            MetricKey::AccessoriesRevenue => "accessoriesRevenue",
            MetricKey::TotalRevenue => "totalRevenue",
        }
    }

    pub fn from_key(key: &str) -> Option<MetricKey> {
        Self::ALL.iter().copied().find(|m| m.key().eq_ignore_ascii_case(key))
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::Throughput => "Throughput",
            MetricKey::MechRo => "Mechanical ROs",
            MetricKey::BpRo => "Body & Paint ROs",
            MetricKey::PartsRevenue => "Parts Revenue",
            MetricKey::LabourRevenue => "Labour Revenue",
            MetricKey::AccessoriesRevenue => "Accessories Revenue",
            MetricKey::TotalRevenue => "Total Revenue",
        }
    }

    pub fn is_currency(self) -> bool {
        !matches!(self, MetricKey::Throughput | MetricKey::MechRo | MetricKey::BpRo)
    }

    /// (mechanical, body & paint) contributions.
    pub fn split(self, v: &MetricValues) -> (f64, f64) {
        match self {
            MetricKey::Throughput => (v.mech_ro, v.bp_ro),
            MetricKey::MechRo => (v.mech_ro, 0.0),
            MetricKey::BpRo => (0.0, v.bp_ro),
            MetricKey::PartsRevenue => (v.mech_parts, v.bp_parts),
            MetricKey::LabourRevenue => (v.mech_labour, v.bp_labour),
            MetricKey::AccessoriesRevenue => (v.mech_accessories, v.bp_accessories),
            MetricKey::TotalRevenue => (
                v.mech_parts + v.mech_labour + v.mech_accessories,
                v.bp_parts + v.bp_labour + v.bp_accessories,
            ),
        }
    }

    pub fn value(self, v: &MetricValues) -> f64 {
        let (mech, bp) = self.split(v);
        mech + bp
    }

    /// Placeholder monthly targets used when no override is configured.
    pub fn default_target(self) -> f64 {
        match self {
            MetricKey::Throughput => 1_400.0,
            MetricKey::MechRo => 1_200.0,
            MetricKey::BpRo => 200.0,
            MetricKey::PartsRevenue => 15_000_000.0,
            MetricKey::LabourRevenue => 6_000_000.0,
            MetricKey::AccessoriesRevenue => 500_000.0,
            MetricKey::TotalRevenue => 21_500_000.0,
        }
    }
}

/// Monthly targets per metric, falling back to [`MetricKey::default_target`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct MetricTargets {
    overrides: BTreeMap<MetricKey, f64>,
}

impl MetricTargets {
    pub fn new(overrides: BTreeMap<MetricKey, f64>) -> Self {
        Self { overrides }
    }

    pub fn get(&self, metric: MetricKey) -> f64 {
        self.overrides
            .get(&metric)
            .copied()
            .unwrap_or_else(|| metric.default_target())
    }

    pub fn set(&mut self, metric: MetricKey, target: f64) {
        self.overrides.insert(metric, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricValues {
        MetricValues {
            mech_ro: 604.0,
            bp_ro: 59.0,
            mech_parts: 100.0,
            bp_parts: 50.0,
            mech_labour: 40.0,
            bp_labour: 20.0,
            mech_accessories: 7.0,
            bp_accessories: 3.0,
        }
    }

    #[test]
    fn test_composite_metrics_sum_sub_fields() {
        let v = sample();
        assert_eq!(MetricKey::Throughput.value(&v), 663.0);
        assert_eq!(MetricKey::AccessoriesRevenue.value(&v), 10.0);
        assert_eq!(MetricKey::TotalRevenue.value(&v), 220.0);
        assert_eq!(MetricKey::TotalRevenue.split(&v), (147.0, 73.0));
        assert_eq!(MetricKey::BpRo.split(&v), (0.0, 59.0));
    }

    #[test]
    fn test_lookup_absent_reads_as_zero() {
        let set = YearlyMetricSet::new(2025, vec![MonthlyMetricRecord::new(Month::Jan, sample())]);
        assert!(set.lookup(Month::Jan).is_present());
        assert_eq!(set.lookup(Month::Feb), MonthLookup::Absent);
        assert_eq!(set.lookup(Month::Feb).values(), MetricValues::ZERO);
    }

    #[test]
    fn test_record_deserializes_missing_fields_as_zero() {
        let record: MonthlyMetricRecord =
            serde_json::from_str(r#"{"month":"Jun","mech_ro":604,"bp_ro":59}"#).unwrap();
        assert_eq!(record.month, Month::Jun);
        assert_eq!(record.values.mech_ro, 604.0);
        assert_eq!(record.values.mech_parts, 0.0);
    }

    #[test]
    fn test_targets_fall_back_to_defaults() {
        let mut targets = MetricTargets::default();
        assert_eq!(targets.get(MetricKey::BpRo), 200.0);
        targets.set(MetricKey::BpRo, 250.0);
        assert_eq!(targets.get(MetricKey::BpRo), 250.0);
        assert_eq!(MetricKey::from_key("PARTSREVENUE"), Some(MetricKey::PartsRevenue));
    }
}
