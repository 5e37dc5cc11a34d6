//! Error taxonomy shared by the loader, the data store and the view model.

use thiserror::Error;

use super::dataset::SubjectId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The dataset could not be fetched, read or parsed. Fatal for the dashboard.
    #[error("sample data unavailable from {source_label}: {reason}")]
    DataUnavailable { source_label: String, reason: String },

    #[error("unknown subject id {0}")]
    UnknownSubjectId(SubjectId),

    /// The metadata index points past the end of `samples`.
    #[error("no sample row at index {index} for subject {id}")]
    MisalignedSamples { id: SubjectId, index: usize },

    #[error(transparent)]
    InvalidChartConfig(#[from] ChartConfigError),
}

impl DashboardError {
    pub fn unavailable(source_label: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataUnavailable {
            source_label: source_label.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartConfigError {
    #[error("chart width must be positive (got {0})")]
    NonPositiveWidth(f64),

    #[error("margins ({left} + {right}) leave no room in a {width}px wide chart")]
    MarginsExceedWidth { left: f64, right: f64, width: f64 },

    #[error("band padding must lie in [0, 1) (got {0})")]
    PaddingOutOfRange(f64),

    #[error("fixed value domain must be finite (got [{0}, {1}])")]
    NonFiniteDomain(f64, f64),

    #[error("explicit height {height} is smaller than the vertical margins ({margins})")]
    HeightBelowMargins { height: f64, margins: f64 },
}
