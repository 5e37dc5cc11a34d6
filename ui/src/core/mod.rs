//! Data layer: dataset model, store, loader, configuration and errors.

pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod loader;
pub mod platform;
pub mod store;

pub use config::{DashboardConfig, TopSelection};
pub use dataset::{parse_dataset, OtuRecord, SampleDataset, SampleRecord, SubjectId, SubjectMetadata};
pub use error::{ChartConfigError, DashboardError};
pub use loader::{load, DataSource};
pub use store::{build_index, DataStore, SubjectIndex};
