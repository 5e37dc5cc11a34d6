use dioxus::prelude::*;

use crate::t;

use super::model::MetadataRow;

/// Key/value table of the selected subject's demographic record.
#[component]
pub fn MetadataTable(rows: Vec<MetadataRow>) -> Element {
    rsx! {
        section { class: "dashboard-card metadata-card",
            div { class: "dashboard-card__header",
                h2 { {t!("metadata-title")} }
            }
            table { class: "metadata-table",
                tbody { id: "sample-metadata",
                    for (i, row) in rows.iter().enumerate() {
                        tr { key: "{i}",
                            th { scope: "row", class: "text-capitalize", "{row.key}" }
                            td { "{row.value}" }
                        }
                    }
                }
            }
        }
    }
}
