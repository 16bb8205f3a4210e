use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::advisor::{AdvisorPerformance, AdvisorRevenueRecord};
use crate::model::complaint::{ComplaintRecord, PsfComplaintCounts};
use crate::model::csi::YearlyKpiDataset;
use crate::model::metrics::{MetricKey, MetricValues, YearlyMetricSet};
use crate::model::month::Month;

/// Snapshot of a month that is still in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartialPeriod {
    pub year: i32,
    pub month: Month,
    pub elapsed_days: u32,
    /// Month totals up to and including `elapsed_days`.
    pub so_far: MetricValues,
    /// Raw per-day values for the elapsed days, where the source has them.
    #[serde(default)]
    pub daily_actuals: BTreeMap<MetricKey, Vec<f64>>,
}

impl PartialPeriod {
    pub fn daily(&self, metric: MetricKey) -> Option<&[f64]> {
        self.daily_actuals.get(&metric).map(|v| v.as_slice())
    }
}

/// Everything a record store serves. Every section may be missing from a
/// dataset file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    #[serde(default)]
    pub metrics: Vec<YearlyMetricSet>,
    #[serde(default)]
    pub advisors: Vec<AdvisorRevenueRecord>,
    #[serde(default)]
    pub advisor_performance: Vec<AdvisorPerformance>,
    #[serde(default)]
    pub complaints: Vec<ComplaintRecord>,
    #[serde(default)]
    pub psf_complaints: Vec<PsfComplaintCounts>,
    #[serde(default)]
    pub kpis: Vec<YearlyKpiDataset>,
    #[serde(default)]
    pub partial_period: Option<PartialPeriod>,
}

impl Dataset {
    /// Years with metric records, ascending.
    pub fn metric_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.metrics.iter().map(|s| s.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// An empty set when the year is unknown.
    pub fn yearly_metrics(&self, year: i32) -> YearlyMetricSet {
        self.metrics
            .iter()
            .find(|s| s.year == year)
            .cloned()
            .unwrap_or_else(|| YearlyMetricSet::empty(year))
    }

    pub fn advisor_records(&self, year: i32, month: Option<Month>) -> Vec<AdvisorRevenueRecord> {
        self.advisors
            .iter()
            .filter(|r| r.year == year && month.map_or(true, |m| r.month == m))
            .cloned()
            .collect()
    }

    pub fn kpi_dataset(&self, year: i32) -> Option<YearlyKpiDataset> {
        self.kpis.iter().find(|k| k.year == year).cloned()
    }
}
