//! View model behind the dashboard: the store, the selector menu and the
//! currently displayed subject. Components only read from it.

use std::rc::Rc;

use crate::charts::{bar_chart, bubble_chart, BarChartConfig, Margins, Scene};
use crate::core::{
    DashboardConfig, DashboardError, DataStore, OtuRecord, SampleDataset, SubjectId, TopSelection,
};

pub const BAR_X_LABEL: &str = "Sample Values →";
pub const BAR_COLOR: &str = "steelblue";
pub const BAR_MARGIN_LEFT: f64 = 65.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub key: String,
    pub value: String,
}

/// One dropdown entry. Each entry owns its id, so activation never depends
/// on loop state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorEntry {
    pub id: SubjectId,
    pub label: String,
}

/// Everything displayed for one subject, rebuilt from scratch on every
/// selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectView {
    pub subject_id: SubjectId,
    pub selector_label: String,
    pub bar_chart: Scene,
    pub bubble_chart: Scene,
    pub metadata_rows: Vec<MetadataRow>,
    pub records: Vec<OtuRecord>,
}

impl SubjectView {
    pub fn bar_count(&self) -> usize {
        self.bar_chart
            .find_class("bars")
            .first()
            .map_or(0, |bars| match bars {
                crate::charts::scene::Node::Group(group) => group.children.len(),
                _ => 0,
            })
    }

    pub fn circle_count(&self) -> usize {
        self.bubble_chart
            .nodes()
            .iter()
            .filter(|node| node.tag() == "circle")
            .count()
    }
}

/// Bar chart options for a subject's top OTUs.
pub fn otu_bar_config(subject_id: &SubjectId, width: f64) -> BarChartConfig<OtuRecord> {
    let mut config = BarChartConfig::new(|r: &OtuRecord| r.sample_value, OtuRecord::category);
    config.width = width;
    config.x_label = Some(BAR_X_LABEL.to_string());
    config.color = BAR_COLOR.to_string();
    config.margins = Margins {
        left: BAR_MARGIN_LEFT,
        ..Margins::default()
    };
    config.subject_id = Some(subject_id.to_string());
    config
}

/// Records shown in the bar chart.
pub fn top_records(records: &[OtuRecord], n: usize, selection: TopSelection) -> Vec<OtuRecord> {
    match selection {
        TopSelection::Positional => records.iter().take(n).copied().collect(),
        TopSelection::ByValue => {
            let mut sorted = records.to_vec();
            // stable: equal values keep dataset order
            sorted.sort_by(|a, b| b.sample_value.total_cmp(&a.sample_value));
            sorted.truncate(n);
            sorted
        }
    }
}

/// Build the complete view for `id`.
pub fn update_data(
    store: &DataStore,
    id: &SubjectId,
    config: &DashboardConfig,
) -> Result<SubjectView, DashboardError> {
    let metadata = store.metadata(id)?;
    let records = store.otu_records(id)?;

    let top = top_records(&records, config.top_n, config.top_selection);
    let bar = bar_chart(&top, &otu_bar_config(id, config.bar_width))?;
    let bubble = bubble_chart(&records);

    let metadata_rows = metadata
        .entries()
        .map(|(key, value)| MetadataRow {
            key: key.to_string(),
            value,
        })
        .collect();

    tracing::debug!(
        subject = %id,
        otus = records.len(),
        bars = top.len(),
        "subject view rebuilt"
    );

    Ok(SubjectView {
        subject_id: id.clone(),
        selector_label: id.to_string(),
        bar_chart: bar,
        bubble_chart: bubble,
        metadata_rows,
        records,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    store: Rc<DataStore>,
    config: DashboardConfig,
    menu: Vec<SelectorEntry>,
    view: SubjectView,
}

impl DashboardModel {
    /// Build the store and menu, then show the first subject.
    pub fn init(dataset: SampleDataset, config: DashboardConfig) -> Result<Self, DashboardError> {
        let source_label = config.source.to_string();
        let store = DataStore::new(dataset);
        let first = store
            .first_subject()
            .cloned()
            .ok_or_else(|| DashboardError::unavailable(source_label, "dataset has no subjects"))?;

        let menu = store
            .subject_ids()
            .map(|id| SelectorEntry {
                id: id.clone(),
                label: id.to_string(),
            })
            .collect();

        let view = update_data(&store, &first, &config)?;
        tracing::info!(subject = %first, "dashboard initialised");

        Ok(Self {
            store: Rc::new(store),
            config,
            menu,
            view,
        })
    }

    /// Show `id`. On failure the current view stays in place.
    pub fn select(&mut self, id: &SubjectId) -> Result<(), DashboardError> {
        match update_data(&self.store, id, &self.config) {
            Ok(view) => {
                self.view = view;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(subject = %id, error = %err, "selection rejected");
                Err(err)
            }
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn menu(&self) -> &[SelectorEntry] {
        &self.menu
    }

    pub fn view(&self) -> &SubjectView {
        &self.view
    }
}
