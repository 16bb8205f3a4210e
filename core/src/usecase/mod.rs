pub mod complaints;
pub mod csi;
pub mod performance;
pub mod projection;
pub mod revenue;


pub use complaints::ComplaintsDashboard;
pub use csi::CsiDashboard;
pub use performance::PerformanceDashboard;
pub use projection::ProjectionDashboard;
pub use revenue::RevenueDashboard;
