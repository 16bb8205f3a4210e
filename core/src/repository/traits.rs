use anyhow::Result;

use crate::model::advisor::{AdvisorPerformance, AdvisorRevenueRecord};
use crate::model::complaint::{ComplaintRecord, PsfComplaintCounts};
use crate::model::csi::YearlyKpiDataset;
use crate::model::dataset::PartialPeriod;
use crate::model::metrics::YearlyMetricSet;
use crate::model::month::Month;

/// Read-only source of dashboard records. Lookups for unknown years return
/// empty results rather than errors.
pub trait RecordStore {
    fn metric_years(&self) -> Result<Vec<i32>>;
    fn yearly_metrics(&self, year: i32) -> Result<YearlyMetricSet>;
    /// All months of `year` when `month` is `None`.
    fn advisor_records(&self, year: i32, month: Option<Month>) -> Result<Vec<AdvisorRevenueRecord>>;
    fn advisor_performance(&self) -> Result<Vec<AdvisorPerformance>>;
    fn complaints(&self) -> Result<Vec<ComplaintRecord>>;
    fn psf_complaints(&self) -> Result<Vec<PsfComplaintCounts>>;
    fn kpi_dataset(&self, year: i32) -> Result<Option<YearlyKpiDataset>>;
    fn partial_period(&self) -> Result<Option<PartialPeriod>>;
}
