use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::month::Month;

/// The revenue categories that count towards an advisor's total revenue.
/// Labels match the column names in the advisor performance export.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevenueItem {
    #[serde(rename = "VAS (INR)")]
    Vas,
    #[serde(rename = "LAB")]
    Labour,
    #[serde(rename = "ACCES")]
    Accessories,
    #[serde(rename = "LUB")]
    Lubricant,
    #[serde(rename = "Brake Pad (INR)")]
    BrakePad,
    #[serde(rename = "Wiper Blade (INR)")]
    WiperBlade,
    #[serde(rename = "Washer Fluid (INR)")]
    WasherFluid,
    #[serde(rename = "Wheel Alignment (INR)")]
    WheelAlignment,
    #[serde(rename = "BAT (INR)")]
    Battery,
    #[serde(rename = "TYRE (INR)")]
    Tyre,
    #[serde(rename = "Parts (INR)")]
    Parts,
}

impl RevenueItem {
    pub const WHITELIST: [RevenueItem; 11] = [
        RevenueItem::Vas,
        RevenueItem::Labour,
        RevenueItem::Accessories,
        RevenueItem::Lubricant,
        RevenueItem::BrakePad,
        RevenueItem::WiperBlade,
        RevenueItem::WasherFluid,
        RevenueItem::WheelAlignment,
        RevenueItem::Battery,
        RevenueItem::Tyre,
        RevenueItem::Parts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RevenueItem::Vas => "VAS (INR)",
            RevenueItem::Labour => "LAB",
            RevenueItem::Accessories => "ACCES",
            RevenueItem::Lubricant => "LUB",
            RevenueItem::BrakePad => "Brake Pad (INR)",
            RevenueItem::WiperBlade => "Wiper Blade (INR)",
            RevenueItem::WasherFluid => "Washer Fluid (INR)",
            RevenueItem::WheelAlignment => "Wheel Alignment (INR)",
            RevenueItem::Battery => "BAT (INR)",
            RevenueItem::Tyre => "TYRE (INR)",
            RevenueItem::Parts => "Parts (INR)",
        }
    }

    /// Exact, case-sensitive match against the export label.
    pub fn from_label(label: &str) -> Option<RevenueItem> {
        Self::WHITELIST.iter().copied().find(|item| item.label() == label)
    }
}

/// One advisor's results for one month. `revenue_items` is keyed by export
/// label and may carry non-revenue columns such as `"RSA (Nos)"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdvisorRevenueRecord {
    pub advisor_name: String,
    pub year: i32,
    pub month: Month,
    #[serde(default)]
    pub throughput: u32,
    #[serde(default)]
    pub revenue_items: BTreeMap<String, f64>,
}

impl AdvisorRevenueRecord {
    pub fn new(advisor_name: &str, year: i32, month: Month, throughput: u32) -> Self {
        Self {
            advisor_name: advisor_name.to_string(),
            year,
            month,
            throughput,
            revenue_items: BTreeMap::new(),
        }
    }

    pub fn with_item(mut self, label: &str, value: f64) -> Self {
        self.revenue_items.insert(label.to_string(), value);
        self
    }

    /// Value of a whitelisted item, 0 when the record does not carry it.
    pub fn item(&self, item: RevenueItem) -> f64 {
        self.revenue_items.get(item.label()).copied().unwrap_or(0.0)
    }

    pub fn total_revenue(&self) -> f64 {
        RevenueItem::WHITELIST.iter().map(|&item| self.item(item)).sum()
    }
}

/// Figures on the advisor performance review. The four counts are units sold
/// or services done; upselling and satisfaction are percentages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PerformanceMetric {
    Rsa,
    Ew,
    WheelAlignment,
    Balancing,
    Upselling,
    CustomerSatisfaction,
}

impl PerformanceMetric {
    pub const ALL: [PerformanceMetric; 6] = [
        PerformanceMetric::Rsa,
        PerformanceMetric::Ew,
        PerformanceMetric::WheelAlignment,
        PerformanceMetric::Balancing,
        PerformanceMetric::Upselling,
        PerformanceMetric::CustomerSatisfaction,
    ];

    /// Metrics the review averages across the team.
    pub const AVERAGED: [PerformanceMetric; 4] = [
        PerformanceMetric::Rsa,
        PerformanceMetric::Ew,
        PerformanceMetric::WheelAlignment,
        PerformanceMetric::Balancing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PerformanceMetric::Rsa => "rsa",
            PerformanceMetric::Ew => "ew",
            PerformanceMetric::WheelAlignment => "wheelAlignment",
            PerformanceMetric::Balancing => "balancing",
            PerformanceMetric::Upselling => "upselling",
            PerformanceMetric::CustomerSatisfaction => "customerSatisfaction",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceMetric::Rsa => "RSA",
            PerformanceMetric::Ew => "EW",
            PerformanceMetric::WheelAlignment => "Wheel Alignment",
            PerformanceMetric::Balancing => "Wheel Balancing",
            PerformanceMetric::Upselling => "Upselling %",
            PerformanceMetric::CustomerSatisfaction => "Customer Satisfaction",
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, PerformanceMetric::Upselling | PerformanceMetric::CustomerSatisfaction)
    }

    /// Matches the key ignoring case.
    pub fn from_key(key: &str) -> Option<PerformanceMetric> {
        Self::ALL.iter().copied().find(|m| m.key().eq_ignore_ascii_case(key))
    }
}

/// One advisor's performance review figures.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdvisorPerformance {
    pub name: String,
    #[serde(default)]
    pub rsa: u32,
    #[serde(default)]
    pub ew: u32,
    #[serde(default)]
    pub wheel_alignment: u32,
    #[serde(default)]
    pub balancing: u32,
    #[serde(default)]
    pub upselling: f64,
    #[serde(default)]
    pub customer_satisfaction: f64,
}

impl AdvisorPerformance {
    pub fn value(&self, metric: PerformanceMetric) -> f64 {
        match metric {
            PerformanceMetric::Rsa => self.rsa as f64,
            PerformanceMetric::Ew => self.ew as f64,
            PerformanceMetric::WheelAlignment => self.wheel_alignment as f64,
            PerformanceMetric::Balancing => self.balancing as f64,
            PerformanceMetric::Upselling => self.upselling,
            PerformanceMetric::CustomerSatisfaction => self.customer_satisfaction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_metric_keys() {
        assert_eq!(PerformanceMetric::from_key("wheelalignment"), Some(PerformanceMetric::WheelAlignment));
        assert_eq!(PerformanceMetric::from_key("RSA"), Some(PerformanceMetric::Rsa));
        assert_eq!(PerformanceMetric::from_key("nps"), None);

        let advisor = AdvisorPerformance {
            name: "Vikram".to_string(),
            rsa: 7,
            ew: 4,
            wheel_alignment: 41,
            balancing: 37,
            upselling: 68.0,
            customer_satisfaction: 85.0,
        };
        assert_eq!(advisor.value(PerformanceMetric::Balancing), 37.0);
        assert_eq!(advisor.value(PerformanceMetric::CustomerSatisfaction), 85.0);
    }

    #[test]
    fn test_total_revenue_ignores_non_whitelisted_keys() {
        let record = AdvisorRevenueRecord::new("Ajay Kumar", 2025, Month::Jun, 353)
            .with_item("LAB", 100.0)
            .with_item("Parts (INR)", 250.5)
            .with_item("RSA (Nos)", 9_999.0)
            .with_item("lab", 1_000.0);

        assert_eq!(record.total_revenue(), 350.5);
        assert_eq!(record.item(RevenueItem::Tyre), 0.0);
    }

    #[test]
    fn test_whitelist_labels_round_trip() {
        for item in RevenueItem::WHITELIST {
            assert_eq!(RevenueItem::from_label(item.label()), Some(item));
            let json = serde_json::to_string(&item).unwrap();
            assert_eq!(json, format!("\"{}\"", item.label()));
        }
        assert_eq!(RevenueItem::from_label("Wheel Alignment (Nos)"), None);
    }
}
