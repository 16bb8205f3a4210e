pub mod achievement;
pub mod complaints;
pub mod csi;
pub mod cumulative;
pub mod dto;
pub mod percent;
pub mod performance;
pub mod projection;
pub mod quarterly;
pub mod ranking;
pub mod year_over_year;
