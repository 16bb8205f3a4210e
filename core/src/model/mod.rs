pub mod advisor;
pub mod complaint;
pub mod csi;
pub mod dataset;
pub mod metrics;
pub mod month;
