use anyhow::Result;
use tracing::debug;

use crate::repository::RecordStore;
use crate::service::csi::{scorecard, KpiPeriod};
use crate::service::dto::KpiScore;

pub struct CsiDashboard<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> CsiDashboard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// KPI scores for `year` showing the value for `period`, with
    /// year-to-date changes against the year before. Empty when `year` has no
    /// KPI data.
    pub fn scorecard(&self, year: i32, period: KpiPeriod) -> Result<Vec<KpiScore>> {
        let current = match self.store.kpi_dataset(year)? {
            Some(current) => current,
            None => {
                debug!(year, "no KPI data for year");
                return Ok(Vec::new());
            }
        };
        let previous = self.store.kpi_dataset(year - 1)?;
        Ok(scorecard(&current, previous.as_ref(), period))
    }
}
