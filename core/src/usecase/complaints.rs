use anyhow::{bail, Result};
use tracing::debug;

use crate::model::complaint::ComplaintRecord;
use crate::repository::RecordStore;
use crate::service::complaints::{
    filter_complaints, monthly_trend, psf_type_counts, summarize, ComplaintFilter,
};
use crate::service::dto::{ComplaintSummary, ComplaintTrendEntry, CountEntry};

pub struct ComplaintsDashboard<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> ComplaintsDashboard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Matching complaints, most recently reported first.
    pub fn complaints(&self, filter: &ComplaintFilter) -> Result<Vec<ComplaintRecord>> {
        let mut matching = filter_complaints(&self.store.complaints()?, filter);
        matching.sort_by(|a, b| b.reported.cmp(&a.reported).then_with(|| a.id.cmp(&b.id)));
        debug!(?filter, matching = matching.len(), "complaints filtered");
        Ok(matching)
    }

    pub fn summary(&self, filter: &ComplaintFilter) -> Result<ComplaintSummary> {
        Ok(summarize(&self.complaints(filter)?))
    }

    /// PSF complaint counts by type for the filter's year, month and advisor.
    /// Without a year, the latest year with PSF data. The status filter does
    /// not apply to counts.
    pub fn psf_type_counts(&self, filter: &ComplaintFilter) -> Result<Vec<CountEntry>> {
        let records = self.store.psf_complaints()?;
        let year = match filter.year.or_else(|| records.iter().map(|r| r.year).max()) {
            Some(year) => year,
            None => return Ok(Vec::new()),
        };
        Ok(psf_type_counts(&records, year, filter.month, filter.advisor.as_deref()))
    }

    pub fn trend(&self, year: i32) -> Result<Vec<ComplaintTrendEntry>> {
        Ok(monthly_trend(&self.store.complaints()?, year))
    }

    /// Advisor names that appear on any complaint or PSF count, sorted.
    pub fn advisors(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .complaints()?
            .into_iter()
            .map(|c| c.service_advisor)
            .collect();
        names.extend(self.store.psf_complaints()?.into_iter().map(|p| p.advisor_name));
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// The known advisor named by `text`: an exact name, or the only name
    /// containing `text` ignoring case.
    pub fn resolve_advisor(&self, text: &str) -> Result<String> {
        let names = self.advisors()?;
        if names.iter().any(|n| n == text) {
            return Ok(text.to_string());
        }
        let needle = text.to_lowercase();
        let mut matching: Vec<String> = names
            .into_iter()
            .filter(|n| n.to_lowercase().contains(&needle))
            .collect();
        match matching.len() {
            0 => bail!("No advisor matches '{}'", text),
            1 => Ok(matching.remove(0)),
            _ => bail!("'{}' matches several advisors: {}", text, matching.join(", ")),
        }
    }
}
