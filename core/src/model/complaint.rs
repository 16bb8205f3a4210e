use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::month::Month;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintStatus {
    #[serde(alias = "open")]
    Open,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "closed", alias = "Resolved", alias = "resolved")]
    Closed,
}

impl Default for ComplaintStatus {
    fn default() -> Self {
        ComplaintStatus::Open
    }
}

impl ComplaintStatus {
    /// Open and Pending both count as unresolved.
    pub fn is_unresolved(self) -> bool {
        !matches!(self, ComplaintStatus::Closed)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    /// Display order for the distribution chart.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComplaintRecord {
    pub id: String,
    pub complaint_type: String,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub priority: Priority,
    pub customer: String,
    pub vehicle: String,
    pub description: String,
    pub service_advisor: String,
    pub reported: NaiveDate,
    pub resolved: Option<NaiveDate>,
    pub resolution: Option<String>,
}

impl ComplaintRecord {
    /// Days from report to resolution, never negative. `None` until the
    /// complaint is closed with a resolution date.
    pub fn resolution_days(&self) -> Option<i64> {
        if self.status != ComplaintStatus::Closed {
            return None;
        }
        let resolved = self.resolved?;
        Some((resolved - self.reported).num_days().max(0))
    }
}

/// Post-service follow-up (PSF) complaint counts for one advisor and month,
/// keyed by complaint type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PsfComplaintCounts {
    pub year: i32,
    pub month: Month,
    pub advisor_name: String,
    #[serde(default)]
    pub counts: BTreeMap<String, u32>,
}

impl PsfComplaintCounts {
    pub fn new(advisor_name: &str, year: i32, month: Month) -> Self {
        Self {
            year,
            month,
            advisor_name: advisor_name.to_string(),
            counts: BTreeMap::new(),
        }
    }

    pub fn with_count(mut self, complaint_type: &str, count: u32) -> Self {
        self.counts.insert(complaint_type.to_string(), count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complaint(status: ComplaintStatus, resolved: Option<NaiveDate>) -> ComplaintRecord {
        ComplaintRecord {
            id: "PSF-2025-001".to_string(),
            complaint_type: "Service Quality".to_string(),
            status,
            priority: Priority::High,
            customer: "Rajesh Kumar".to_string(),
            vehicle: "MG Hector".to_string(),
            description: "Engine noise after service".to_string(),
            service_advisor: "Ajay Kumar".to_string(),
            reported: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            resolved,
            resolution: None,
        }
    }

    #[test]
    fn test_resolution_days() {
        let closed = complaint(ComplaintStatus::Closed, NaiveDate::from_ymd_opt(2025, 1, 7));
        assert_eq!(closed.resolution_days(), Some(2));

        let backdated = complaint(ComplaintStatus::Closed, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(backdated.resolution_days(), Some(0));

        let pending = complaint(ComplaintStatus::Pending, NaiveDate::from_ymd_opt(2025, 1, 7));
        assert_eq!(pending.resolution_days(), None);
    }

    #[test]
    fn test_status_aliases() {
        let status: ComplaintStatus = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(status, ComplaintStatus::Closed);
        let status: ComplaintStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, ComplaintStatus::Closed);
        assert!(ComplaintStatus::Pending.is_unresolved());
    }
}
