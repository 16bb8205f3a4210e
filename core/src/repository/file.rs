use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::model::advisor::{AdvisorPerformance, AdvisorRevenueRecord};
use crate::model::complaint::{ComplaintRecord, PsfComplaintCounts};
use crate::model::csi::YearlyKpiDataset;
use crate::model::dataset::{Dataset, PartialPeriod};
use crate::model::metrics::YearlyMetricSet;
use crate::model::month::Month;
use crate::repository::seed::seed_dataset;
use crate::repository::traits::RecordStore;

const DEFAULT_FILE_NAME: &str = "dataset.json";
const DEFAULT_DIR_NAME: &str = ".serviceboard";

/// `~/.serviceboard`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

/// Dataset kept as a JSON file. The file is re-read on every query so edits
/// made while the dashboard runs are picked up.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    file_path: PathBuf,
}

impl FileRecordStore {
    /// Opens `dataset.json` under `base_dir` (default `~/.serviceboard`),
    /// writing the demonstration dataset there if the file does not exist.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            info!(path = %path.display(), "initializing dataset with seed data");
            write_dataset(&path, &seed_dataset())?;
        }

        Ok(FileRecordStore { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read_dataset(&self) -> Result<Dataset> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let dataset: Dataset = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        debug!(
            path = %self.file_path.display(),
            years = dataset.metrics.len(),
            advisors = dataset.advisors.len(),
            complaints = dataset.complaints.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

/// Pretty-printed JSON, overwriting `path`.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}

impl RecordStore for FileRecordStore {
    fn metric_years(&self) -> Result<Vec<i32>> {
        Ok(self.read_dataset()?.metric_years())
    }

    fn yearly_metrics(&self, year: i32) -> Result<YearlyMetricSet> {
        Ok(self.read_dataset()?.yearly_metrics(year))
    }

    fn advisor_records(&self, year: i32, month: Option<Month>) -> Result<Vec<AdvisorRevenueRecord>> {
        Ok(self.read_dataset()?.advisor_records(year, month))
    }

    fn advisor_performance(&self) -> Result<Vec<AdvisorPerformance>> {
        Ok(self.read_dataset()?.advisor_performance)
    }

    fn complaints(&self) -> Result<Vec<ComplaintRecord>> {
        Ok(self.read_dataset()?.complaints)
    }

    fn psf_complaints(&self) -> Result<Vec<PsfComplaintCounts>> {
        Ok(self.read_dataset()?.psf_complaints)
    }

    fn kpi_dataset(&self, year: i32) -> Result<Option<YearlyKpiDataset>> {
        Ok(self.read_dataset()?.kpi_dataset(year))
    }

    fn partial_period(&self) -> Result<Option<PartialPeriod>> {
        Ok(self.read_dataset()?.partial_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::{MetricValues, MonthlyMetricRecord};
    use tempfile::tempdir;

    #[test]
    fn test_new_store_is_seeded() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.metric_years().unwrap(), vec![2024, 2025]);
        assert_eq!(store.complaints().unwrap(), seed_dataset().complaints);
        assert_eq!(store.advisor_records(2025, Some(Month::Jun)).unwrap().len(), 10);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        let dataset = Dataset {
            metrics: vec![YearlyMetricSet::new(
                2023,
                vec![MonthlyMetricRecord::new(
                    Month::Jan,
                    MetricValues { mech_ro: 5.0, ..MetricValues::ZERO },
                )],
            )],
            ..Dataset::default()
        };
        write_dataset(&path, &dataset).unwrap();

        let store = FileRecordStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(store.metric_years().unwrap(), vec![2023]);
        assert!(store.complaints().unwrap().is_empty());
        assert!(store.yearly_metrics(2025).unwrap().months.is_empty());
    }

    #[test]
    fn test_sections_may_be_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE_NAME), "{}").unwrap();

        let store = FileRecordStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.metric_years().unwrap().is_empty());
        assert!(store.partial_period().unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE_NAME), "not json").unwrap();

        let store = FileRecordStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.complaints().is_err());
    }
}
