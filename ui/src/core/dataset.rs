//! Sample dataset model: subject metadata, per-subject OTU measurements and
//! the derived `OtuRecord` pairing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::DashboardError;
use super::format;

/// Subject identifier, normalized to its string form.
///
/// The published dataset stores ids as numbers under `metadata` and as strings
/// under `samples`; both deserialize to the same `SubjectId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s.as_str())),
            Value::Number(n) => Some(Self::new(format::js_number(n))),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for SubjectId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for SubjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        SubjectId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("subject id must be a number or string, got {value}")))
    }
}

/// Demographic record for one subject. Fields keep their document order,
/// `id` included.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMetadata {
    id: SubjectId,
    fields: Map<String, Value>,
}

impl SubjectMetadata {
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    /// `(key, displayed value)` pairs in the record's own order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), format::display_scalar(value)))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl<'de> Deserialize<'de> for SubjectMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let id = fields
            .get("id")
            .and_then(SubjectId::from_value)
            .ok_or_else(|| serde::de::Error::custom("metadata record without a usable `id`"))?;
        Ok(Self { id, fields })
    }
}

impl Serialize for SubjectMetadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.fields.serialize(serializer)
    }
}

/// Per-subject measurements. `otu_ids` and `sample_values` are positionally paired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: SubjectId,
    pub otu_ids: Vec<u32>,
    pub sample_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub otu_labels: Vec<String>,
}

impl SampleRecord {
    /// Zip the parallel sequences into records, stopping at the shorter one.
    pub fn otu_records(&self) -> Vec<OtuRecord> {
        if self.otu_ids.len() != self.sample_values.len() {
            tracing::warn!(
                subject = %self.id,
                otu_ids = self.otu_ids.len(),
                sample_values = self.sample_values.len(),
                "otu_ids and sample_values differ in length; extra entries dropped"
            );
        }

        self.sample_values
            .iter()
            .zip(self.otu_ids.iter())
            .map(|(&sample_value, &otu_id)| OtuRecord {
                sample_value,
                otu_id,
            })
            .collect()
    }
}

/// One abundance measurement for one OTU, rebuilt on every selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OtuRecord {
    pub sample_value: f64,
    pub otu_id: u32,
}

impl OtuRecord {
    pub fn category(&self) -> String {
        format!("OTU{}", self.otu_id)
    }
}

/// Root document of `samples.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDataset {
    pub metadata: Vec<SubjectMetadata>,
    pub samples: Vec<SampleRecord>,
}

/// Parse dataset JSON. `source_label` only feeds the error message.
pub fn parse_dataset(text: &str, source_label: &str) -> Result<SampleDataset, DashboardError> {
    serde_json::from_str(text).map_err(|err| DashboardError::unavailable(source_label, err))
}
