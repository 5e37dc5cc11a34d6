//! Dataset loading. The single asynchronous step of the dashboard.

use std::fmt;
use std::path::PathBuf;

use super::dataset::{parse_dataset, SampleDataset};
use super::error::DashboardError;

/// Where `samples.json` comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Fetched over HTTP (web builds).
    Http(String),
    /// Read from the local filesystem (native builds).
    File(PathBuf),
    /// Already in memory; `label` names it in logs and errors.
    Inline { label: String, text: String },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Inline { label, .. } => write!(f, "{label}"),
        }
    }
}

/// Fetch and parse the dataset. No retries and no timeout; any failure is
/// reported as `DataUnavailable`.
pub async fn load(source: &DataSource) -> Result<SampleDataset, DashboardError> {
    let label = source.to_string();
    tracing::info!(source = %label, "loading sample data");

    let text = read_text(source).await.map_err(|reason| {
        tracing::error!(source = %label, %reason, "sample data unavailable");
        DashboardError::unavailable(&label, reason)
    })?;

    let dataset = parse_dataset(&text, &label).inspect_err(|err| {
        tracing::error!(source = %label, error = %err, "sample data malformed");
    })?;

    tracing::info!(
        source = %label,
        subjects = dataset.metadata.len(),
        "sample data loaded"
    );
    Ok(dataset)
}

async fn read_text(source: &DataSource) -> Result<String, String> {
    match source {
        DataSource::Http(url) => fetch_text(url).await,
        DataSource::File(path) => read_file(path),
        DataSource::Inline { text, .. } => Ok(text.clone()),
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use gloo_net::http::Request;

    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| format!("Failed to fetch data: {err}"))?;

    if !response.ok() {
        return Err(format!(
            "HTTP error: {} {}",
            response.status(),
            response.status_text()
        ));
    }

    response
        .text()
        .await
        .map_err(|err| format!("Failed to read response: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(url: &str) -> Result<String, String> {
    Err(format!("HTTP sources are only supported in web builds ({url})"))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_file(path: &std::path::Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_file(path: &std::path::Path) -> Result<String, String> {
    Err(format!(
        "file sources are not available in web builds ({})",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_source_parses() {
        let source = DataSource::Inline {
            label: "inline".into(),
            text: r#"{"metadata": [{"id": 1}], "samples": [{"id": "1", "otu_ids": [], "sample_values": []}]}"#.into(),
        };
        let dataset = futures::executor::block_on(load(&source)).unwrap();
        assert_eq!(dataset.metadata.len(), 1);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here/samples.json"));
        let err = futures::executor::block_on(load(&source)).unwrap_err();
        match err {
            DashboardError::DataUnavailable { source_label, .. } => {
                assert!(source_label.ends_with("samples.json"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
