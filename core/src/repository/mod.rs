pub mod file;
pub mod memory;
pub mod seed;
pub mod traits;

// Re-export
pub use file::{default_data_dir, FileRecordStore};
pub use memory::InMemoryRecordStore;
pub use seed::seed_dataset;
pub use traits::RecordStore;
