use dioxus::prelude::*;

use crate::core::SubjectId;
use crate::t;

use super::model::SelectorEntry;

/// Dropdown of subject ids. The button shows the current subject; each menu
/// item reports its own id through `on_select`.
#[component]
pub fn SubjectSelector(
    label: String,
    entries: Vec<SelectorEntry>,
    on_select: EventHandler<SubjectId>,
) -> Element {
    let mut open = use_signal(|| false);
    let menu_class = if open() {
        "subject-selector__menu subject-selector__menu--open"
    } else {
        "subject-selector__menu"
    };

    rsx! {
        div { class: "subject-selector",
            span { class: "subject-selector__caption", {t!("selector-label")} }
            button {
                id: "subject-selector-button",
                r#type: "button",
                class: "button subject-selector__toggle",
                aria_expanded: "{open()}",
                onclick: move |_| open.set(!open()),
                "{label}"
            }
            ul { class: "{menu_class}", role: "listbox",
                for entry in entries.iter() {
                    {
                        let id = entry.id.clone();
                        let active = entry.label == label;
                        rsx! {
                            li { key: "{entry.label}",
                                button {
                                    r#type: "button",
                                    class: if active { "subject-selector__item subject-selector__item--active" } else { "subject-selector__item" },
                                    onclick: move |_| {
                                        open.set(false);
                                        on_select.call(id.clone());
                                    },
                                    "{entry.label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
