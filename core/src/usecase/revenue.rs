use anyhow::Result;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::model::metrics::{MetricKey, MetricTargets, YearlyMetricSet};
use crate::model::month::Month;
use crate::repository::RecordStore;
use crate::service::achievement::achievement;
use crate::service::cumulative::ytd_report;
use crate::service::dto::{
    Achievement, ComparisonSeriesEntry, MonthlyComparison, QuarterComparison, RankedAdvisor, StatCard, YtdReport,
};
use crate::service::percent::percent_change;
use crate::service::quarterly::compare_quarters;
use crate::service::ranking::top_n;
use crate::service::year_over_year::{compare_metric, compare_years};
use crate::time::days_in_month;

/// Revenue and throughput views of the current year against the previous one.
pub struct RevenueDashboard<'a, S: RecordStore> {
    store: &'a S,
    targets: MetricTargets,
    current_year: i32,
    previous_year: i32,
    top_advisors: usize,
    period_days: Option<u32>,
}

impl<'a, S: RecordStore> RevenueDashboard<'a, S> {
    pub fn new(store: &'a S, config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            store,
            targets: config.metric_targets()?,
            current_year: config.current_year,
            previous_year: config.previous_year,
            top_advisors: config.top_advisors,
            period_days: config.period_days,
        })
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn previous_year(&self) -> i32 {
        self.previous_year
    }

    fn years(&self) -> Result<(YearlyMetricSet, YearlyMetricSet)> {
        let current = self.store.yearly_metrics(self.current_year)?;
        let previous = self.store.yearly_metrics(self.previous_year)?;
        debug!(
            current_year = self.current_year,
            current_months = current.months.len(),
            previous_year = self.previous_year,
            previous_months = previous.months.len(),
            "metric sets loaded"
        );
        Ok((current, previous))
    }

    /// Latest month of the current year that has a record.
    pub fn latest_month(&self) -> Result<Option<Month>> {
        let current = self.store.yearly_metrics(self.current_year)?;
        Ok(Month::ALL
            .iter()
            .rev()
            .copied()
            .find(|&m| current.lookup(m).is_present()))
    }

    /// One card per metric for `month`.
    pub fn stat_cards(&self, month: Month) -> Result<Vec<StatCard>> {
        let (current, previous) = self.years()?;
        let current_values = current.lookup(month).values();
        let previous_values = previous.lookup(month).values();

        Ok(MetricKey::ALL
            .iter()
            .map(|&metric| {
                let (mechanical, body_paint) = metric.split(&current_values);
                let current = mechanical + body_paint;
                let previous = metric.value(&previous_values);
                StatCard {
                    metric,
                    month,
                    current,
                    previous,
                    percent_change: percent_change(current, previous),
                    mechanical,
                    body_paint,
                }
            })
            .collect())
    }

    pub fn comparison(&self, metric: MetricKey) -> Result<Vec<ComparisonSeriesEntry>> {
        let (current, previous) = self.years()?;
        Ok(compare_metric(&current, &previous, metric, &self.targets))
    }

    pub fn monthly_comparison(&self, metrics: &[MetricKey]) -> Result<Vec<MonthlyComparison>> {
        let (current, previous) = self.years()?;
        Ok(compare_years(&current, &previous, metrics, &self.targets))
    }

    pub fn ytd(&self, metric: MetricKey) -> Result<YtdReport> {
        let (current, previous) = self.years()?;
        Ok(ytd_report(&current, &previous, metric, &self.targets))
    }

    pub fn quarterly(&self, metric: MetricKey) -> Result<Vec<QuarterComparison>> {
        let (current, previous) = self.years()?;
        Ok(compare_quarters(&current, &previous, metric))
    }

    /// Highest-revenue advisors of the current year's `month`.
    pub fn top_advisors(&self, month: Month) -> Result<Vec<RankedAdvisor>> {
        let records = self.store.advisor_records(self.current_year, Some(month))?;
        Ok(top_n(&records, self.top_advisors))
    }

    /// Progress against the monthly target for every metric. Days left are
    /// only counted for the month in progress.
    pub fn achievements(&self, month: Month) -> Result<Vec<Achievement>> {
        let current = self.store.yearly_metrics(self.current_year)?;
        let values = current.lookup(month).values();
        let remaining = self.remaining_days(month)?;

        Ok(MetricKey::ALL
            .iter()
            .map(|&metric| achievement(metric, metric.value(&values), self.targets.get(metric), remaining))
            .collect())
    }

    fn remaining_days(&self, month: Month) -> Result<u32> {
        let partial = match self.store.partial_period()? {
            Some(p) if p.year == self.current_year && p.month == month => p,
            _ => return Ok(0),
        };
        let total = match self.period_days {
            Some(days) => days,
            None => days_in_month(partial.year, partial.month)?,
        };
        Ok(total.saturating_sub(partial.elapsed_days))
    }
}
