//! Immutable-after-build data store with the subject id → row index map.

use std::collections::HashMap;

use super::dataset::{OtuRecord, SampleDataset, SampleRecord, SubjectId, SubjectMetadata};
use super::error::DashboardError;

/// Maps each subject id to its row in both `metadata` and `samples`.
pub type SubjectIndex = HashMap<SubjectId, usize>;

/// Build the subject index in one pass over `metadata`.
///
/// Duplicate ids overwrite earlier entries; the last occurrence wins.
pub fn build_index(metadata: &[SubjectMetadata]) -> SubjectIndex {
    let mut index = HashMap::with_capacity(metadata.len());
    for (row, record) in metadata.iter().enumerate() {
        if let Some(previous) = index.insert(record.id().clone(), row) {
            tracing::warn!(subject = %record.id(), previous, row, "duplicate subject id in metadata");
        }
    }
    index
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataStore {
    dataset: SampleDataset,
    index: SubjectIndex,
}

impl DataStore {
    pub fn new(dataset: SampleDataset) -> Self {
        let index = build_index(&dataset.metadata);
        tracing::info!(
            subjects = dataset.metadata.len(),
            samples = dataset.samples.len(),
            "data store ready"
        );
        Self { dataset, index }
    }

    /// Subject ids in dataset order (duplicates included).
    pub fn subject_ids(&self) -> impl Iterator<Item = &SubjectId> + '_ {
        self.dataset.metadata.iter().map(SubjectMetadata::id)
    }

    pub fn first_subject(&self) -> Option<&SubjectId> {
        self.dataset.metadata.first().map(SubjectMetadata::id)
    }

    pub fn index_of(&self, id: &SubjectId) -> Result<usize, DashboardError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| DashboardError::UnknownSubjectId(id.clone()))
    }

    pub fn metadata(&self, id: &SubjectId) -> Result<&SubjectMetadata, DashboardError> {
        let index = self.index_of(id)?;
        // Indices come from `metadata` itself, so this row always exists.
        self.dataset
            .metadata
            .get(index)
            .ok_or_else(|| DashboardError::UnknownSubjectId(id.clone()))
    }

    /// Sample row at the subject's metadata index. Rows are assumed aligned
    /// with `metadata`; the sample's own `id` is not consulted.
    pub fn sample(&self, id: &SubjectId) -> Result<&SampleRecord, DashboardError> {
        let index = self.index_of(id)?;
        self.dataset
            .samples
            .get(index)
            .ok_or_else(|| DashboardError::MisalignedSamples {
                id: id.clone(),
                index,
            })
    }

    pub fn otu_records(&self, id: &SubjectId) -> Result<Vec<OtuRecord>, DashboardError> {
        Ok(self.sample(id)?.otu_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn dataset() -> SampleDataset {
        serde_json::from_value(json!({
            "metadata": [
                {"id": 1, "gender": "F"},
                {"id": 2, "gender": "M"},
                {"id": 3, "gender": "M"}
            ],
            "samples": [
                {"id": "1", "otu_ids": [10, 20], "sample_values": [5, 50]},
                {"id": "2", "otu_ids": [30], "sample_values": [15]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn index_has_one_entry_per_subject() {
        let store = DataStore::new(dataset());
        assert_eq!(store.index_of(&"1".into()).unwrap(), 0);
        assert_eq!(store.index_of(&"2".into()).unwrap(), 1);
        assert_eq!(store.subject_ids().count(), 3);
    }

    #[test]
    fn duplicate_ids_keep_last_position() {
        let meta: Vec<SubjectMetadata> =
            serde_json::from_value(json!([{"id": 7}, {"id": 8}, {"id": 7}])).unwrap();
        let index = build_index(&meta);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&SubjectId::from(7)], 2);
    }

    #[test]
    fn duplicate_ids_are_visible_at_default_level() {
        let meta: Vec<SubjectMetadata> =
            serde_json::from_value(json!([{"id": 7}, {"id": 8}, {"id": 7}])).unwrap();
        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            build_index(&meta);
        });

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let line = text
            .lines()
            .find(|l| l.contains("duplicate subject id"))
            .expect("duplicate id logged");
        assert!(line.contains("WARN"));
        assert!(line.contains("subject=7"));
    }

    #[test]
    fn unknown_id_is_reported() {
        let store = DataStore::new(dataset());
        let err = store.otu_records(&"99".into()).unwrap_err();
        assert_eq!(err, DashboardError::UnknownSubjectId("99".into()));
    }

    #[test]
    fn missing_sample_row_is_misaligned() {
        let store = DataStore::new(dataset());
        let err = store.sample(&"3".into()).unwrap_err();
        assert!(matches!(err, DashboardError::MisalignedSamples { index: 2, .. }));
    }
}
