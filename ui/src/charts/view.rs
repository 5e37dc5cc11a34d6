use dioxus::dioxus_core::Attribute;
use dioxus::prelude::*;

use crate::core::format::format_plain;

use super::scene::{Node, Scene};

fn spread(node: &Node) -> Vec<Attribute> {
    node.attributes()
        .into_iter()
        .map(|(name, value)| Attribute::new(name, value, None, false))
        .collect()
}

/// Render a chart [`Scene`] as inline SVG.
#[component]
pub fn SceneView(
    scene: Scene,
    #[props(into, default = "chart".to_string())] class: String,
) -> Element {
    let width = format_plain(scene.width);
    let height = format_plain(scene.height);
    let view_box = scene.view_box.to_attr().replace(',', " ");
    let style = scene.style.clone().unwrap_or_default();

    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            width: "{width}",
            height: "{height}",
            view_box: "{view_box}",
            style: "{style}",
            for (i, node) in scene.children.iter().enumerate() {
                SceneNode { key: "{i}", node: node.clone() }
            }
        }
    }
}

#[component]
fn SceneNode(node: Node) -> Element {
    let attrs = spread(&node);
    match &node {
        Node::Group(group) => rsx! {
            g { ..attrs,
                for (i, child) in group.children.iter().enumerate() {
                    SceneNode { key: "{i}", node: child.clone() }
                }
            }
        },
        Node::Rect(_) => rsx! { rect { ..attrs } },
        Node::Circle(_) => rsx! { circle { ..attrs } },
        Node::Line(_) => rsx! { line { ..attrs } },
        Node::Path(_) => rsx! { path { ..attrs } },
        Node::Text(text) => rsx! { text { ..attrs, "{text.content}" } },
    }
}
