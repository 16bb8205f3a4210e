use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::complaint::{ComplaintRecord, ComplaintStatus, Priority, PsfComplaintCounts};
use crate::model::month::Month;
use crate::service::dto::{ComplaintSummary, ComplaintTrendEntry, CountEntry, PriorityCount};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Resolved,
    Unresolved,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ComplaintFilter {
    pub year: Option<i32>,
    pub month: Option<Month>,
    /// Exact advisor name.
    pub advisor: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &ComplaintRecord) -> bool {
        if let Some(year) = self.year {
            if complaint.reported.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if Month::of_date(complaint.reported) != month {
                return false;
            }
        }
        if let Some(advisor) = &self.advisor {
            if &complaint.service_advisor != advisor {
                return false;
            }
        }
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Resolved => !complaint.status.is_unresolved(),
            StatusFilter::Unresolved => complaint.status.is_unresolved(),
        }
    }
}

pub fn filter_complaints(complaints: &[ComplaintRecord], filter: &ComplaintFilter) -> Vec<ComplaintRecord> {
    complaints.iter().filter(|c| filter.matches(c)).cloned().collect()
}

/// Resolution-time histogram edges, inclusive lower bounds in days.
const RESOLUTION_BUCKETS: [(&str, i64); 4] = [
    ("0-5 days", 0),
    ("6-10 days", 6),
    ("11-15 days", 11),
    ("16+ days", 16),
];

pub fn summarize(complaints: &[ComplaintRecord]) -> ComplaintSummary {
    let total = complaints.len();
    let resolved = complaints
        .iter()
        .filter(|c| c.status == ComplaintStatus::Closed)
        .count();
    let pending = total - resolved;
    let resolution_rate = if total > 0 {
        (resolved as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    let mut type_counts: HashMap<&str, usize> = HashMap::new();
    for complaint in complaints {
        *type_counts.entry(complaint.complaint_type.as_str()).or_insert(0) += 1;
    }
    let by_type = sorted_counts(type_counts);

    let by_priority = Priority::ALL
        .iter()
        .map(|&priority| PriorityCount {
            priority,
            count: complaints.iter().filter(|c| c.priority == priority).count(),
        })
        .collect();

    let days: Vec<i64> = complaints.iter().filter_map(|c| c.resolution_days()).collect();
    let average_resolution_days = if days.is_empty() {
        0.0
    } else {
        let mean = days.iter().sum::<i64>() as f64 / days.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let resolution_buckets = RESOLUTION_BUCKETS
        .iter()
        .enumerate()
        .map(|(i, &(name, min))| {
            let max = RESOLUTION_BUCKETS.get(i + 1).map_or(i64::MAX, |&(_, next)| next - 1);
            CountEntry {
                name: name.to_string(),
                count: days.iter().filter(|&&d| d >= min && d <= max).count(),
            }
        })
        .collect();

    ComplaintSummary {
        total,
        resolved,
        pending,
        resolution_rate,
        by_type,
        by_priority,
        average_resolution_days,
        resolution_buckets,
    }
}

/// PSF complaint counts by type for `year`, summed over advisors and months.
/// `None` for `month` or `advisor` takes all of them. Types with no
/// complaints are left out; the rest are sorted by count, then name.
pub fn psf_type_counts(
    records: &[PsfComplaintCounts],
    year: i32,
    month: Option<Month>,
    advisor: Option<&str>,
) -> Vec<CountEntry> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| {
        r.year == year
            && month.map_or(true, |m| r.month == m)
            && advisor.map_or(true, |a| r.advisor_name == a)
    }) {
        for (kind, &count) in &record.counts {
            *totals.entry(kind.as_str()).or_insert(0) += count as usize;
        }
    }
    sorted_counts(totals)
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

/// Complaints received per month of `year`, Jan..Dec.
pub fn monthly_trend(complaints: &[ComplaintRecord], year: i32) -> Vec<ComplaintTrendEntry> {
    Month::ALL
        .iter()
        .map(|&month| {
            let in_month: Vec<&ComplaintRecord> = complaints
                .iter()
                .filter(|c| c.reported.year() == year && Month::of_date(c.reported) == month)
                .collect();
            let resolved = in_month
                .iter()
                .filter(|c| c.status == ComplaintStatus::Closed)
                .count();
            ComplaintTrendEntry {
                month,
                total: in_month.len(),
                resolved,
                pending: in_month.len() - resolved,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complaint(
        id: &str,
        kind: &str,
        status: ComplaintStatus,
        priority: Priority,
        advisor: &str,
        reported: (i32, u32, u32),
        resolved_after: Option<i64>,
    ) -> ComplaintRecord {
        let reported = NaiveDate::from_ymd_opt(reported.0, reported.1, reported.2).unwrap();
        ComplaintRecord {
            id: id.to_string(),
            complaint_type: kind.to_string(),
            status,
            priority,
            customer: "Customer".to_string(),
            vehicle: "MG Astor".to_string(),
            description: String::new(),
            service_advisor: advisor.to_string(),
            reported,
            resolved: resolved_after.map(|d| reported + chrono::Duration::days(d)),
            resolution: None,
        }
    }

    fn sample() -> Vec<ComplaintRecord> {
        vec![
            complaint("1", "Service Quality", ComplaintStatus::Closed, Priority::High, "Ajay Kumar", (2025, 1, 5), Some(2)),
            complaint("2", "Billing Issue", ComplaintStatus::Closed, Priority::High, "Vikram", (2025, 1, 25), Some(1)),
            complaint("3", "Service Quality", ComplaintStatus::Pending, Priority::Medium, "Ajay Kumar", (2025, 2, 3), None),
            complaint("4", "Appointment", ComplaintStatus::Closed, Priority::Low, "Vikram", (2025, 2, 28), Some(20)),
            complaint("5", "Cleanliness", ComplaintStatus::Open, Priority::Low, "Vikram", (2024, 12, 1), None),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = summarize(&sample());

        assert_eq!(summary.total, 5);
        assert_eq!(summary.resolved, 3);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.resolution_rate, 60);
        assert_eq!(summary.by_type[0].name, "Service Quality");
        assert_eq!(summary.by_type[0].count, 2);
        assert_eq!(summary.by_type[1].name, "Appointment");
        assert_eq!(summary.by_priority[0], PriorityCount { priority: Priority::High, count: 2 });
        assert_eq!(summary.average_resolution_days, 7.7);
        assert_eq!(summary.resolution_buckets[0].count, 2);
        assert_eq!(summary.resolution_buckets[3].count, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.resolution_rate, 0);
        assert_eq!(summary.average_resolution_days, 0.0);
        assert!(summary.by_type.is_empty());
        assert_eq!(summary.by_priority.len(), 3);
    }

    #[test]
    fn test_filter() {
        let complaints = sample();
        let filter = ComplaintFilter {
            year: Some(2025),
            month: Some(Month::Feb),
            advisor: None,
            status: StatusFilter::All,
        };
        let ids: Vec<String> = filter_complaints(&complaints, &filter).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["3", "4"]);

        let vikram_open = ComplaintFilter {
            advisor: Some("Vikram".to_string()),
            status: StatusFilter::Unresolved,
            ..Default::default()
        };
        let ids: Vec<String> = filter_complaints(&complaints, &vikram_open).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["5"]);
    }

    fn psf(advisor: &str, year: i32, month: Month, counts: &[(&str, u32)]) -> PsfComplaintCounts {
        counts
            .iter()
            .fold(PsfComplaintCounts::new(advisor, year, month), |r, &(kind, n)| r.with_count(kind, n))
    }

    #[test]
    fn test_psf_type_counts() {
        let records = vec![
            psf("Ajay Kumar", 2025, Month::Jan, &[("Service Quality", 2), ("Billing Issue", 0), ("Appointment", 1)]),
            psf("Vikram", 2025, Month::Jan, &[("Service Quality", 1), ("Billing Issue", 0)]),
            psf("Vikram", 2025, Month::Feb, &[("Appointment", 3), ("Cleanliness", 0)]),
            psf("Vikram", 2024, Month::Feb, &[("Billing Issue", 9)]),
        ];

        let year = psf_type_counts(&records, 2025, None, None);
        let pairs: Vec<(&str, usize)> = year.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Appointment", 4), ("Service Quality", 3)]);

        let january = psf_type_counts(&records, 2025, Some(Month::Jan), None);
        assert_eq!(january[0], CountEntry { name: "Service Quality".to_string(), count: 3 });
        assert_eq!(january.len(), 2);

        let vikram = psf_type_counts(&records, 2025, None, Some("Vikram"));
        let pairs: Vec<(&str, usize)> = vikram.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Appointment", 3), ("Service Quality", 1)]);

        assert!(psf_type_counts(&records, 2023, None, None).is_empty());
    }

    #[test]
    fn test_monthly_trend() {
        let trend = monthly_trend(&sample(), 2025);
        assert_eq!(trend.len(), 12);
        assert_eq!(trend[0].total, 2);
        assert_eq!(trend[0].resolved, 2);
        assert_eq!(trend[1].pending, 1);
        assert_eq!(trend[11].total, 0);
    }
}
