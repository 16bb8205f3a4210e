use anyhow::Result;

use crate::model::advisor::{AdvisorPerformance, AdvisorRevenueRecord};
use crate::model::complaint::{ComplaintRecord, PsfComplaintCounts};
use crate::model::csi::YearlyKpiDataset;
use crate::model::dataset::{Dataset, PartialPeriod};
use crate::model::metrics::YearlyMetricSet;
use crate::model::month::Month;
use crate::repository::seed::seed_dataset;
use crate::repository::traits::RecordStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    dataset: Dataset,
}

impl InMemoryRecordStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Store backed by the built-in demonstration data.
    pub fn seeded() -> Self {
        Self::new(seed_dataset())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl RecordStore for InMemoryRecordStore {
    fn metric_years(&self) -> Result<Vec<i32>> {
        Ok(self.dataset.metric_years())
    }

    fn yearly_metrics(&self, year: i32) -> Result<YearlyMetricSet> {
        Ok(self.dataset.yearly_metrics(year))
    }

    fn advisor_records(&self, year: i32, month: Option<Month>) -> Result<Vec<AdvisorRevenueRecord>> {
        Ok(self.dataset.advisor_records(year, month))
    }

    fn advisor_performance(&self) -> Result<Vec<AdvisorPerformance>> {
        Ok(self.dataset.advisor_performance.clone())
    }

    fn complaints(&self) -> Result<Vec<ComplaintRecord>> {
        Ok(self.dataset.complaints.clone())
    }

    fn psf_complaints(&self) -> Result<Vec<PsfComplaintCounts>> {
        Ok(self.dataset.psf_complaints.clone())
    }

    fn kpi_dataset(&self, year: i32) -> Result<Option<YearlyKpiDataset>> {
        Ok(self.dataset.kpi_dataset(year))
    }

    fn partial_period(&self) -> Result<Option<PartialPeriod>> {
        Ok(self.dataset.partial_period.clone())
    }
}
