//! Renderable chart output: a small typed SVG scene graph.
//!
//! Chart renderers build a [`Scene`]; the dashboard hands it to
//! [`super::SceneView`] for display and the export panel serializes it with
//! [`Scene::to_svg_markup`].

use std::fmt::Write as _;

use crate::core::format::format_plain;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Text offsets are either pixels or ems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Em(f64),
}

impl Length {
    pub fn to_attr(self) -> String {
        match self {
            Length::Px(v) => format_plain(v),
            Length::Em(v) => format!("{}em", format_plain(v)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub fn to_attr(self) -> String {
        format!("translate({},{})", format_plain(self.x), format_plain(self.y))
    }
}

/// Presentation attributes shared by every node kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Presentation {
    pub class: Option<String>,
    pub transform: Option<Translate>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub opacity: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub text_anchor: Option<TextAnchor>,
}

impl Presentation {
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if let Some(class) = &self.class {
            attrs.push(("class", class.clone()));
        }
        if let Some(transform) = self.transform {
            attrs.push(("transform", transform.to_attr()));
        }
        if let Some(fill) = &self.fill {
            attrs.push(("fill", fill.clone()));
        }
        if let Some(stroke) = &self.stroke {
            attrs.push(("stroke", stroke.clone()));
        }
        if let Some(v) = self.stroke_opacity {
            attrs.push(("stroke-opacity", format_plain(v)));
        }
        if let Some(v) = self.opacity {
            attrs.push(("opacity", format_plain(v)));
        }
        if let Some(family) = &self.font_family {
            attrs.push(("font-family", family.clone()));
        }
        if let Some(size) = self.font_size {
            attrs.push(("font-size", format_plain(size)));
        }
        if let Some(anchor) = self.text_anchor {
            attrs.push(("text-anchor", anchor.as_str().to_string()));
        }
        attrs
    }
}

/// Builder-style setters for anything carrying a [`Presentation`].
pub trait Styled: Sized {
    fn presentation_mut(&mut self) -> &mut Presentation;

    fn class(mut self, class: impl Into<String>) -> Self {
        self.presentation_mut().class = Some(class.into());
        self
    }

    fn translate(mut self, x: f64, y: f64) -> Self {
        self.presentation_mut().transform = Some(Translate { x, y });
        self
    }

    fn fill(mut self, fill: impl Into<String>) -> Self {
        self.presentation_mut().fill = Some(fill.into());
        self
    }

    fn stroke(mut self, stroke: impl Into<String>) -> Self {
        self.presentation_mut().stroke = Some(stroke.into());
        self
    }

    fn stroke_opacity(mut self, value: f64) -> Self {
        self.presentation_mut().stroke_opacity = Some(value);
        self
    }

    fn opacity(mut self, value: f64) -> Self {
        self.presentation_mut().opacity = Some(value);
        self
    }

    fn font_family(mut self, family: impl Into<String>) -> Self {
        self.presentation_mut().font_family = Some(family.into());
        self
    }

    fn font_size(mut self, size: f64) -> Self {
        self.presentation_mut().font_size = Some(size);
        self
    }

    fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.presentation_mut().text_anchor = Some(anchor);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub style: Presentation,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn extend<I, N>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub style: Presentation,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub style: Presentation,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub style: Presentation,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathNode {
    pub d: String,
    pub style: Presentation,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dx: Option<Length>,
    pub dy: Option<Length>,
    pub content: String,
    pub style: Presentation,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

macro_rules! styled {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl Styled for $ty {
                fn presentation_mut(&mut self) -> &mut Presentation {
                    &mut self.style
                }
            }

            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )+
    };
}

styled!(
    Group => Group,
    Rect => Rect,
    Circle => Circle,
    Line => Line,
    PathNode => Path,
    Text => Text,
);

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Rect(Rect),
    Circle(Circle),
    Line(Line),
    Path(PathNode),
    Text(Text),
}

impl Node {
    pub fn tag(&self) -> &'static str {
        match self {
            Node::Group(_) => "g",
            Node::Rect(_) => "rect",
            Node::Circle(_) => "circle",
            Node::Line(_) => "line",
            Node::Path(_) => "path",
            Node::Text(_) => "text",
        }
    }

    pub fn style(&self) -> &Presentation {
        match self {
            Node::Group(n) => &n.style,
            Node::Rect(n) => &n.style,
            Node::Circle(n) => &n.style,
            Node::Line(n) => &n.style,
            Node::Path(n) => &n.style,
            Node::Text(n) => &n.style,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.style()
            .class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Geometry attributes followed by presentation attributes.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs: Vec<(&'static str, String)> = Vec::new();
        match self {
            Node::Group(_) => {}
            Node::Rect(r) => {
                attrs.push(("x", format_plain(r.x)));
                attrs.push(("y", format_plain(r.y)));
                attrs.push(("width", format_plain(r.width)));
                attrs.push(("height", format_plain(r.height)));
            }
            Node::Circle(c) => {
                attrs.push(("cx", format_plain(c.cx)));
                attrs.push(("cy", format_plain(c.cy)));
                attrs.push(("r", format_plain(c.r)));
            }
            Node::Line(l) => {
                for (name, value) in [("x1", l.x1), ("y1", l.y1), ("x2", l.x2), ("y2", l.y2)] {
                    if let Some(v) = value {
                        attrs.push((name, format_plain(v)));
                    }
                }
            }
            Node::Path(p) => attrs.push(("d", p.d.clone())),
            Node::Text(t) => {
                if let Some(x) = t.x {
                    attrs.push(("x", format_plain(x)));
                }
                if let Some(y) = t.y {
                    attrs.push(("y", format_plain(y)));
                }
                if let Some(dx) = t.dx {
                    attrs.push(("dx", dx.to_attr()));
                }
                if let Some(dy) = t.dy {
                    attrs.push(("dy", dy.to_attr()));
                }
            }
        }
        attrs.extend(self.style().attributes());
        attrs
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::Group(g) => &g.children,
            _ => &[],
        }
    }

    fn write_markup(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.tag());
        for (name, value) in self.attributes() {
            let _ = write!(out, " {name}=\"{}\"", escape_xml(&value));
        }

        match self {
            Node::Text(text) => {
                let _ = writeln!(out, ">{}</text>", escape_xml(&text.content));
            }
            Node::Group(group) if !group.children.is_empty() => {
                out.push_str(">\n");
                for child in &group.children {
                    child.write_markup(out, depth + 1);
                }
                let _ = writeln!(out, "{indent}</g>");
            }
            _ => out.push_str("/>\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn to_attr(self) -> String {
        [self.min_x, self.min_y, self.width, self.height]
            .map(format_plain)
            .join(",")
    }
}

pub const RESPONSIVE_STYLE: &str = "max-width: 100%; height: auto; height: intrinsic;";

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    pub style: Option<String>,
    pub children: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, view_box: ViewBox) -> Self {
        Self {
            width,
            height,
            view_box,
            style: Some(RESPONSIVE_STYLE.to_string()),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Every node in document order, depth first.
    pub fn nodes(&self) -> Vec<&Node> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                out.push(node);
                walk(node.children(), out);
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }

    pub fn find_class(&self, class: &str) -> Vec<&Node> {
        self.nodes()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    /// Standalone SVG document for export.
    pub fn to_svg_markup(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{}\"",
            format_plain(self.width),
            format_plain(self.height),
            self.view_box.to_attr().replace(',', " ")
        );
        if let Some(style) = &self.style {
            let _ = write!(out, " style=\"{}\"", escape_xml(style));
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_markup(&mut out, 1);
        }
        out.push_str("</svg>\n");
        out
    }
}

pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(
            100.0,
            50.0,
            ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: 100.0,
                height: 65.0,
            },
        );
        scene.push(
            Group::new().class("bars").fill("steelblue").child(Rect {
                x: 10.0,
                y: 2.5,
                width: 40.0,
                height: 12.0,
                ..Rect::default()
            }),
        );
        scene.push(
            Text::new("A & <B>")
                .translate(50.0, 60.0)
                .text_anchor(TextAnchor::Middle),
        );
        scene
    }

    #[test]
    fn markup_nests_and_escapes() {
        let svg = sample_scene().to_svg_markup();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\" viewBox=\"0 0 100 65\""));
        assert!(svg.contains("<g class=\"bars\" fill=\"steelblue\">"));
        assert!(svg.contains("<rect x=\"10\" y=\"2.5\" width=\"40\" height=\"12\"/>"));
        assert!(svg.contains(">A &amp; &lt;B&gt;</text>"));
        assert!(svg.contains("transform=\"translate(50,60)\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn nodes_walks_depth_first() {
        let scene = sample_scene();
        let tags: Vec<&str> = scene.nodes().iter().map(|n| n.tag()).collect();
        assert_eq!(tags, ["g", "rect", "text"]);
        assert_eq!(scene.find_class("bars").len(), 1);
    }

    #[test]
    fn lengths_render_units() {
        assert_eq!(Length::Em(0.35).to_attr(), "0.35em");
        assert_eq!(Length::Px(-4.0).to_attr(), "-4");
    }
}
