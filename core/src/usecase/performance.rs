use anyhow::Result;
use tracing::debug;

use crate::model::advisor::{AdvisorPerformance, PerformanceMetric};
use crate::repository::RecordStore;
use crate::service::dto::{PerformanceOverview, PerformanceRanking};
use crate::service::performance::{overview, rank_by_metric};

/// Service advisor performance review: team averages and per-metric rankings.
pub struct PerformanceDashboard<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> PerformanceDashboard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Review figures in store order.
    pub fn advisors(&self) -> Result<Vec<AdvisorPerformance>> {
        self.store.advisor_performance()
    }

    pub fn overview(&self) -> Result<PerformanceOverview> {
        let advisors = self.advisors()?;
        debug!(advisors = advisors.len(), "performance overview");
        Ok(overview(&advisors))
    }

    pub fn ranking(&self, metric: PerformanceMetric) -> Result<PerformanceRanking> {
        Ok(rank_by_metric(&self.advisors()?, metric))
    }
}
