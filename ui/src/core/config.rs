//! Dashboard configuration.

use std::path::PathBuf;

use dioxus::prelude::*;

use super::loader::DataSource;

/// Demo dataset shipped with the app, served next to the web build.
pub const BUNDLED_DATASET: Asset = asset!("/assets/data/samples.json");

/// Environment variable that overrides the dataset path on native builds.
pub const DATA_PATH_ENV: &str = "OTUVIEW_DATA";

/// Relative location of the dataset next to the app's static assets.
pub const DEFAULT_DATA_PATH: &str = "data/samples.json";

/// How the bar chart picks its records from a subject's OTU list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopSelection {
    /// First `top_n` records in dataset order. The published dataset is
    /// already sorted by abundance, so this matches "top" in practice.
    #[default]
    Positional,
    /// The `top_n` largest `sample_value`s, ties kept in dataset order.
    ByValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub top_n: usize,
    pub top_selection: TopSelection,
    /// Bar chart canvas width in user units.
    pub bar_width: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Http(DEFAULT_DATA_PATH.to_string()),
            top_n: 10,
            top_selection: TopSelection::Positional,
            bar_width: 640.0,
        }
    }
}

impl DashboardConfig {
    pub fn with_source(source: DataSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Web config: fetch the bundled dataset.
    pub fn bundled() -> Self {
        Self::with_source(DataSource::Http(BUNDLED_DATASET.to_string()))
    }

    /// Native config: `OTUVIEW_DATA` if set, otherwise `fallback`.
    pub fn from_env_or(fallback: PathBuf) -> Self {
        let path = std::env::var_os(DATA_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or(fallback);
        Self::with_source(DataSource::File(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_take_first_ten() {
        let config = DashboardConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.top_selection, TopSelection::Positional);
        assert_eq!(config.source, DataSource::Http("data/samples.json".into()));
    }
}
