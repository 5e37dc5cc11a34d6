use dioxus::prelude::*;

use crate::charts::SceneView;
use crate::core::{load, DashboardConfig, DashboardError, SubjectId};
use crate::t;

use super::export::ExportPanel;
use super::metadata::MetadataTable;
use super::model::DashboardModel;
use super::selector::SubjectSelector;

fn banner_text(err: &DashboardError) -> String {
    match err {
        DashboardError::UnknownSubjectId(id) => t!("error-unknown-subject", id = id.to_string()),
        other => other.to_string(),
    }
}

/// Apply an optional deep-linked subject on top of the bootstrapped model.
fn open_at(
    mut model: DashboardModel,
    subject: Option<SubjectId>,
) -> (DashboardModel, Option<DashboardError>) {
    let error = subject.and_then(|id| model.select(&id).err());
    (model, error)
}

/// Loads the dataset, bootstraps the model and shows the dashboard.
#[component]
pub fn DashboardPage(config: DashboardConfig, #[props(default)] subject: Option<SubjectId>) -> Element {
    let mut resource = use_resource(move || {
        let config = config.clone();
        async move {
            let dataset = load(&config.source).await?;
            DashboardModel::init(dataset, config)
        }
    });

    let state = resource.read_unchecked();
    match &*state {
        None => rsx! {
            section { class: "page page-dashboard",
                p { class: "dashboard-state dashboard-state--loading", {t!("state-loading")} }
            }
        },
        Some(Err(err)) => {
            let detail = err.to_string();
            rsx! {
                section { class: "page page-dashboard",
                    div { class: "dashboard-state dashboard-state--error", role: "alert",
                        h2 { {t!("state-load-failed")} }
                        p { class: "dashboard-state__detail", "{detail}" }
                        button {
                            r#type: "button",
                            class: "button button--accent",
                            onclick: move |_| resource.restart(),
                            {t!("state-retry")}
                        }
                    }
                }
            }
        }
        Some(Ok(model)) => {
            let key = subject.as_ref().map(SubjectId::to_string).unwrap_or_default();
            rsx! {
                Dashboard { key: "{key}", model: model.clone(), subject: subject.clone() }
            }
        }
    }
}

/// The interactive dashboard over an already bootstrapped model.
#[component]
pub fn Dashboard(model: DashboardModel, #[props(default)] subject: Option<SubjectId>) -> Element {
    let opened = use_hook(|| open_at(model.clone(), subject.clone()));
    let mut current = use_signal(|| opened.0.clone());
    let mut banner = use_signal(|| opened.1.clone());

    let on_select = move |id: SubjectId| {
        let outcome = current.with_mut(|m| m.select(&id));
        banner.set(outcome.err());
    };

    let snapshot = current();
    let view = snapshot.view().clone();
    let menu = snapshot.menu().to_vec();
    let banner_message = banner().as_ref().map(banner_text);

    rsx! {
        section { class: "page page-dashboard",
            header { class: "dashboard__header",
                h1 { {t!("dashboard-title")} }
                p { class: "dashboard__intro", {t!("dashboard-intro")} }
            }

            if let Some(message) = banner_message {
                div { class: "dashboard-banner", role: "alert",
                    span { "{message}" }
                    button {
                        r#type: "button",
                        class: "button button--ghost dashboard-banner__dismiss",
                        onclick: move |_| banner.set(None),
                        {t!("banner-dismiss")}
                    }
                }
            }

            div { class: "dashboard__grid",
                aside { class: "dashboard__sidebar",
                    SubjectSelector {
                        label: view.selector_label.clone(),
                        entries: menu,
                        on_select: on_select,
                    }
                    MetadataTable { rows: view.metadata_rows.clone() }
                }

                section { class: "dashboard-card dashboard-card--bar",
                    div { class: "dashboard-card__header",
                        h2 { {t!("bar-chart-title")} }
                    }
                    div { id: "otu-chart", class: "dashboard-chart",
                        SceneView { scene: view.bar_chart.clone(), class: "chart chart--bar" }
                    }
                }
            }

            section { class: "dashboard-card dashboard-card--bubble",
                div { class: "dashboard-card__header",
                    h2 { {t!("bubble-chart-title")} }
                }
                div { id: "bubble-chart", class: "dashboard-chart",
                    SceneView { scene: view.bubble_chart.clone(), class: "chart chart--bubble" }
                }
            }

            ExportPanel { view: view.clone() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SampleDataset;
    use serde_json::json;

    fn model() -> DashboardModel {
        let dataset: SampleDataset = serde_json::from_value(json!({
            "metadata": [{"id": 940, "age": 24}, {"id": 941, "age": 34}],
            "samples": [
                {"id": "940", "otu_ids": [1167, 2859], "sample_values": [163, 126]},
                {"id": "941", "otu_ids": [482], "sample_values": [40]}
            ]
        }))
        .unwrap();
        DashboardModel::init(dataset, DashboardConfig::default()).unwrap()
    }

    #[test]
    fn deep_link_selects_subject() {
        let (opened, error) = open_at(model(), Some(SubjectId::from("941")));
        assert!(error.is_none());
        assert_eq!(opened.view().selector_label, "941");
    }

    #[test]
    fn unknown_deep_link_falls_back_to_first_subject() {
        let (opened, error) = open_at(model(), Some(SubjectId::from("1")));
        assert_eq!(opened.view().selector_label, "940");
        assert_eq!(error, Some(DashboardError::UnknownSubjectId(SubjectId::from("1"))));
    }
}
