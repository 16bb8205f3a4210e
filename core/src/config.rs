use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::metrics::{MetricKey, MetricTargets};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Dashboard settings read from `config.toml` in the data directory.
///
/// ```toml
/// current_year = 2025
/// previous_year = 2024
/// top_advisors = 5
///
/// [targets]
/// throughput = 1500
/// partsRevenue = 16000000
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub current_year: i32,
    pub previous_year: i32,
    /// Advisors listed in the ranking table.
    pub top_advisors: usize,
    /// Advisors summed in the monthly combined-revenue trend.
    pub top_combined: usize,
    /// Length of the projected period. Defaults to the calendar length of the
    /// in-progress month.
    pub period_days: Option<u32>,
    /// Monthly targets keyed by metric key, e.g. `bpRo`.
    pub targets: BTreeMap<String, f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            current_year: 2025,
            previous_year: 2024,
            top_advisors: 5,
            top_combined: 3,
            period_days: None,
            targets: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Reads `config.toml` from `data_dir`; defaults when the file is absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(text)?;
        config.metric_targets()?;
        Ok(config)
    }

    /// Target overrides resolved to metrics. Unknown keys are an error.
    pub fn metric_targets(&self) -> Result<MetricTargets> {
        let mut targets = MetricTargets::default();
        for (key, value) in &self.targets {
            let metric = MetricKey::from_key(key).ok_or_else(|| anyhow!("Unknown metric in targets: '{}'", key))?;
            targets.set(metric, *value);
        }
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = DashboardConfig::load(dir.path()).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.metric_targets().unwrap().get(MetricKey::Throughput), 1400.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "current_year = 2026\n\n[targets]\nbpRo = 250\nthroughput = 1500.5\n",
        )
        .unwrap();

        let config = DashboardConfig::load(dir.path()).unwrap();
        assert_eq!(config.current_year, 2026);
        assert_eq!(config.previous_year, 2024);
        assert_eq!(config.top_advisors, 5);

        let targets = config.metric_targets().unwrap();
        assert_eq!(targets.get(MetricKey::BpRo), 250.0);
        assert_eq!(targets.get(MetricKey::Throughput), 1500.5);
        assert_eq!(targets.get(MetricKey::MechRo), 1200.0);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(DashboardConfig::from_toml_str("[targets]\nfoo = 1\n").is_err());
        assert!(DashboardConfig::from_toml_str("top_advisors = \"five\"\n").is_err());
    }
}
