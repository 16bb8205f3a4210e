use serde::{Deserialize, Serialize};

use crate::model::month::Month;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KpiUnit {
    Score,
    Percentage,
    Days,
    Count,
}

impl Default for KpiUnit {
    fn default() -> Self {
        KpiUnit::Score
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// One CSI-family KPI for one year. Monthly values are laid out on the
/// canonical Jan..Dec axis; months not yet reported are `None`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KpiEntry {
    pub name: String,
    /// Target as written in the survey export, e.g. "(Tgt >=875)".
    #[serde(default)]
    pub target_text: String,
    #[serde(default)]
    pub unit: KpiUnit,
    /// Overrides the direction implied by `target_text`.
    #[serde(default)]
    pub direction: Option<TargetDirection>,
    #[serde(default)]
    pub monthly_values: [Option<f64>; 12],
    #[serde(default)]
    pub ytd_value: Option<f64>,
}

impl KpiEntry {
    pub fn new(name: &str, target_text: &str, unit: KpiUnit) -> Self {
        Self {
            name: name.to_string(),
            target_text: target_text.to_string(),
            unit,
            direction: None,
            monthly_values: [None; 12],
            ytd_value: None,
        }
    }

    /// Fills months from January onwards.
    pub fn with_values(mut self, values: &[f64]) -> Self {
        for (slot, value) in self.monthly_values.iter_mut().zip(values) {
            *slot = Some(*value);
        }
        self
    }

    pub fn with_ytd(mut self, ytd: f64) -> Self {
        self.ytd_value = Some(ytd);
        self
    }

    pub fn with_direction(mut self, direction: TargetDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn value(&self, month: Month) -> Option<f64> {
        self.monthly_values[month.index()]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearlyKpiDataset {
    pub year: i32,
    #[serde(default)]
    pub kpis: Vec<KpiEntry>,
}

impl YearlyKpiDataset {
    /// Looks a KPI up by name, ignoring case.
    pub fn kpi(&self, name: &str) -> Option<&KpiEntry> {
        self.kpis.iter().find(|k| k.name.eq_ignore_ascii_case(name))
    }
}
