//! End-to-end behaviour of the dashboard view model over small datasets.

use serde_json::json;
use ui::charts::scene::Node;
use ui::core::{
    parse_dataset, DashboardConfig, DashboardError, SampleDataset, SubjectId, TopSelection,
};
use ui::dashboard::DashboardModel;

fn two_subjects() -> SampleDataset {
    serde_json::from_value(json!({
        "metadata": [
            {"id": 1, "gender": "F", "age": 24},
            {"id": 2, "gender": "M", "age": 31}
        ],
        "samples": [
            {"id": "1", "otu_ids": [10, 20], "sample_values": [5, 50]},
            {"id": "2", "otu_ids": [30], "sample_values": [15]}
        ]
    }))
    .unwrap()
}

fn bar_widths(model: &DashboardModel) -> Vec<f64> {
    model
        .view()
        .bar_chart
        .nodes()
        .into_iter()
        .filter_map(|n| match n {
            Node::Rect(r) => Some(r.width),
            _ => None,
        })
        .collect()
}

fn radii(model: &DashboardModel) -> Vec<f64> {
    model
        .view()
        .bubble_chart
        .nodes()
        .into_iter()
        .filter_map(|n| match n {
            Node::Circle(c) => Some(c.r),
            _ => None,
        })
        .collect()
}

#[test]
fn two_subject_scenario() {
    let mut model = DashboardModel::init(two_subjects(), DashboardConfig::default()).unwrap();

    let view = model.view();
    assert_eq!(view.selector_label, "1");
    assert_eq!(view.bar_count(), 2);
    let values: Vec<f64> = view.records.iter().map(|r| r.sample_value).collect();
    assert_eq!(values, vec![5.0, 50.0]);
    assert_eq!(radii(&model), vec![2.5, 25.0]);
    assert_eq!(ui::charts::bubble::y_domain(&view.records), (0.0, 125.0));
    // x range [65, 640] over [0, 50]
    let widths = bar_widths(&model);
    assert!((widths[0] - 57.5).abs() < 1e-9);
    assert!((widths[1] - 575.0).abs() < 1e-9);

    model.select(&SubjectId::from("2")).unwrap();
    assert_eq!(model.view().selector_label, "2");
    assert_eq!(model.view().bar_count(), 1);
    assert_eq!(model.view().records[0].sample_value, 15.0);
    assert_eq!(radii(&model), vec![7.5]);
}

#[test]
fn every_subject_label_matches_its_id() {
    let mut model = DashboardModel::init(two_subjects(), DashboardConfig::default()).unwrap();
    let ids: Vec<SubjectId> = model.menu().iter().map(|e| e.id.clone()).collect();
    for id in ids {
        model.select(&id).unwrap();
        assert_eq!(model.view().selector_label, id.as_str());
    }
}

#[test]
fn bar_chart_caps_at_ten() {
    let otu_ids: Vec<u32> = (1..=14).collect();
    let values: Vec<u32> = (1..=14).rev().collect();
    let dataset: SampleDataset = serde_json::from_value(json!({
        "metadata": [{"id": 7}],
        "samples": [{"id": "7", "otu_ids": otu_ids, "sample_values": values}]
    }))
    .unwrap();

    let model = DashboardModel::init(dataset.clone(), DashboardConfig::default()).unwrap();
    assert_eq!(model.view().bar_count(), 10);
    assert_eq!(model.view().circle_count(), 14);

    let config = DashboardConfig {
        top_selection: TopSelection::ByValue,
        ..DashboardConfig::default()
    };
    let model = DashboardModel::init(dataset, config).unwrap();
    assert_eq!(model.view().bar_count(), 10);
}

#[test]
fn reselecting_is_idempotent() {
    let mut model = DashboardModel::init(two_subjects(), DashboardConfig::default()).unwrap();
    model.select(&SubjectId::from("2")).unwrap();
    let first = model.view().clone();
    model.select(&SubjectId::from("2")).unwrap();
    assert_eq!(model.view(), &first);
}

#[test]
fn metadata_rows_follow_field_order() {
    let model = DashboardModel::init(two_subjects(), DashboardConfig::default()).unwrap();
    let rows = &model.view().metadata_rows;
    let metadata = model.store().metadata(&SubjectId::from("1")).unwrap();
    assert_eq!(rows.len(), metadata.field_count());
    let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, ["id", "gender", "age"]);
}

#[test]
fn unknown_subject_is_reported_and_view_kept() {
    let mut model = DashboardModel::init(two_subjects(), DashboardConfig::default()).unwrap();
    let err = model.select(&SubjectId::from("3")).unwrap_err();
    assert_eq!(err, DashboardError::UnknownSubjectId(SubjectId::from("3")));
    assert_eq!(model.view().selector_label, "1");
}

#[test]
fn bundled_dataset_bootstraps() {
    let text = include_str!("../assets/data/samples.json");
    let dataset = parse_dataset(text, "samples.json").unwrap();
    let model = DashboardModel::init(dataset, DashboardConfig::default()).unwrap();
    assert_eq!(model.view().selector_label, "940");
    assert!(model.view().bar_count() <= 10);
    assert_eq!(model.view().circle_count(), model.view().records.len());
}
