//! The dashboard: view model plus the components that display it.

pub mod export;
mod metadata;
pub mod model;
mod selector;
mod view;

pub use export::ExportPanel;
pub use metadata::MetadataTable;
pub use model::{
    otu_bar_config, top_records, update_data, DashboardModel, MetadataRow, SelectorEntry,
    SubjectView,
};
pub use selector::SubjectSelector;
pub use view::{Dashboard, DashboardPage};
