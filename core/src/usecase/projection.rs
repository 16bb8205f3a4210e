use anyhow::Result;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::model::dataset::PartialPeriod;
use crate::model::metrics::MetricKey;
use crate::repository::RecordStore;
use crate::service::dto::{AdvisorProjection, MetricProjection, MonthlyTopRevenue};
use crate::service::projection::{run_rate, ProjectionMode, RunRateProjector};
use crate::service::ranking::{rank_by_revenue, top_n_combined_by_month};
use crate::time::days_in_month;

/// Run-rate views of the month in progress.
pub struct ProjectionDashboard<'a, S: RecordStore> {
    store: &'a S,
    current_year: i32,
    top_combined: usize,
    period_days: Option<u32>,
}

impl<'a, S: RecordStore> ProjectionDashboard<'a, S> {
    pub fn new(store: &'a S, config: &DashboardConfig) -> Self {
        Self {
            store,
            current_year: config.current_year,
            top_combined: config.top_combined,
            period_days: config.period_days,
        }
    }

    pub fn partial_period(&self) -> Result<Option<PartialPeriod>> {
        self.store.partial_period()
    }

    /// Configured period length, else the calendar length of the month.
    pub fn period_days(&self, period: &PartialPeriod) -> Result<u32> {
        match self.period_days {
            Some(days) => Ok(days),
            None => days_in_month(period.year, period.month),
        }
    }

    /// Day-by-day projection of every metric, anchored on the last elapsed
    /// day. Raw daily figures are used when the period carries them. Empty
    /// when no month is in progress.
    pub fn metric_projections(&self) -> Result<Vec<MetricProjection>> {
        let period = match self.store.partial_period()? {
            Some(period) => period,
            None => return Ok(Vec::new()),
        };
        let days = self.period_days(&period)?;
        let projector = RunRateProjector::new(ProjectionMode::AnchorThenExtrapolate);

        Ok(MetricKey::ALL
            .iter()
            .map(|&metric| {
                let (rate, points) = match period.daily(metric) {
                    Some(daily) => {
                        let observed = &daily[..daily.len().min(days as usize)];
                        let rate = run_rate(observed.iter().sum(), observed.len() as u32);
                        (rate, projector.project_observed(daily, days))
                    }
                    None => {
                        let total = metric.value(&period.so_far);
                        let rate = run_rate(total, period.elapsed_days.min(days));
                        (rate, projector.project(total, period.elapsed_days, days))
                    }
                };
                MetricProjection {
                    metric,
                    run_rate: rate,
                    points,
                }
            })
            .collect())
    }

    /// Linear projection of each advisor's month-to-date revenue, highest
    /// earner first.
    pub fn advisor_projections(&self) -> Result<Vec<AdvisorProjection>> {
        let period = match self.store.partial_period()? {
            Some(period) => period,
            None => return Ok(Vec::new()),
        };
        let days = self.period_days(&period)?;
        let records = self.store.advisor_records(period.year, Some(period.month))?;
        debug!(
            year = period.year,
            month = %period.month,
            advisors = records.len(),
            days,
            "projecting advisor revenue"
        );

        let projector = RunRateProjector::new(ProjectionMode::LinearShare);
        Ok(rank_by_revenue(&records)
            .into_iter()
            .map(|ranked| AdvisorProjection {
                run_rate: run_rate(ranked.total_revenue, period.elapsed_days.min(days)),
                points: projector.project(ranked.total_revenue, period.elapsed_days, days),
                advisor_name: ranked.record.advisor_name,
            })
            .collect())
    }

    /// Combined revenue of the top advisors in each month of the current year.
    pub fn monthly_top_combined(&self) -> Result<Vec<MonthlyTopRevenue>> {
        let records = self.store.advisor_records(self.current_year, None)?;
        Ok(top_n_combined_by_month(&records, self.top_combined))
    }
}
