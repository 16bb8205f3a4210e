use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::advisor::{AdvisorRevenueRecord, PerformanceMetric};
use crate::model::complaint::Priority;
use crate::model::csi::TargetDirection;
use crate::model::metrics::MetricKey;
use crate::model::month::Month;

/// One month of a single metric, current year against previous year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSeriesEntry {
    pub month: Month,
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    /// `None` when growing from a zero base; rendered as "∞".
    pub percent_change: Option<f64>,
    /// The current year has no record for this month. A present record that
    /// measured zero leaves this false.
    pub is_projected_or_missing: bool,
}

/// One month across several metrics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyComparison {
    pub month: Month,
    pub values: BTreeMap<MetricKey, ComparisonValues>,
    pub is_projected_or_missing: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ComparisonValues {
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    pub percent_change: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CumulativeSeriesEntry {
    pub month: Month,
    pub current_cumulative: f64,
    pub previous_cumulative: f64,
    /// Past the last month with a current-year value.
    pub current_plateaued: bool,
}

/// Header figure for a year-to-date card.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct YtdSummary {
    pub metric: MetricKey,
    /// Most recently populated month, `None` when the year has no data yet.
    pub through: Option<Month>,
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    pub percent_change: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YtdReport {
    pub summary: YtdSummary,
    pub series: Vec<CumulativeSeriesEntry>,
}

/// Month-to-date card for one metric, with the workshop breakdown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub metric: MetricKey,
    pub month: Month,
    pub current: f64,
    pub previous: f64,
    pub percent_change: Option<f64>,
    pub mechanical: f64,
    pub body_paint: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct QuarterComparison {
    pub quarter: u32,
    pub current: f64,
    pub previous: f64,
    pub percent_change: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RankedAdvisor {
    pub record: AdvisorRevenueRecord,
    pub total_revenue: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTopRevenue {
    pub month: Month,
    pub combined_revenue: f64,
    pub advisors_counted: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPoint {
    /// 1-based day or month within the period.
    pub unit: u32,
    pub actual: Option<f64>,
    pub projected: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MetricProjection {
    pub metric: MetricKey,
    pub run_rate: f64,
    pub points: Vec<ProjectionPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdvisorProjection {
    pub advisor_name: String,
    pub run_rate: f64,
    pub points: Vec<ProjectionPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Achievement {
    pub metric: MetricKey,
    pub actual: f64,
    pub target: f64,
    /// Uncapped; `None` without a positive target.
    pub percent: Option<f64>,
    /// Capped for gauges.
    pub display_percent: f64,
    pub gap: f64,
    /// Per remaining unit to close the gap.
    pub required_run_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ComplaintTrendEntry {
    pub month: Month,
    pub total: usize,
    pub resolved: usize,
    pub pending: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ComplaintSummary {
    pub total: usize,
    pub resolved: usize,
    pub pending: usize,
    /// Whole percent.
    pub resolution_rate: u32,
    pub by_type: Vec<CountEntry>,
    pub by_priority: Vec<PriorityCount>,
    /// One decimal place.
    pub average_resolution_days: f64,
    pub resolution_buckets: Vec<CountEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KpiScore {
    pub name: String,
    pub target_text: String,
    pub target: Option<f64>,
    pub direction: TargetDirection,
    /// Month the shown value was reported for; `None` when it is the YTD figure.
    pub value_month: Option<Month>,
    pub value: Option<f64>,
    pub meets_target: Option<bool>,
    pub ytd: Option<f64>,
    pub previous_ytd: Option<f64>,
    pub ytd_change: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformanceAverage {
    pub metric: PerformanceMetric,
    pub average: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RankedPerformance {
    pub name: String,
    pub value: f64,
}

/// Advisors ordered by one performance metric, best first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PerformanceRanking {
    pub metric: PerformanceMetric,
    pub advisors: Vec<RankedPerformance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PerformanceOverview {
    pub advisor_count: usize,
    pub averages: Vec<PerformanceAverage>,
    pub rankings: Vec<PerformanceRanking>,
}
