pub mod config;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use config::DashboardConfig;
pub use model::metrics::{MetricKey, MetricTargets, MetricValues, MonthlyMetricRecord, YearlyMetricSet};
pub use model::month::Month;
pub use repository::{FileRecordStore, InMemoryRecordStore, RecordStore};
pub use input::{parse_args, expand_key, complaint_filter, ParsedInput};
pub use time::{days_in_month, parse_period};
pub use service::percent::percent_change;
pub use service::projection::{ProjectionMode, RunRateProjector};
pub use usecase::{
    ComplaintsDashboard, CsiDashboard, PerformanceDashboard, ProjectionDashboard, RevenueDashboard,
};
