//! Bubble chart of every OTU measured for a subject.

use crate::core::dataset::OtuRecord;

use super::axis::{Axis, Orient};
use super::bar::{max_value, Margins};
use super::palette::OrdinalColors;
use super::scale::LinearScale;
use super::scene::{Circle, Group, Scene, Styled, Text, TextAnchor, ViewBox};

pub const BUBBLE_WIDTH: f64 = 1200.0;
pub const BUBBLE_HEIGHT: f64 = 350.0;
pub const BUBBLE_MARGINS: Margins = Margins {
    top: 20.0,
    right: 20.0,
    bottom: 30.0,
    left: 40.0,
};

/// Headroom multiplier on the y domain so the largest bubble is not clipped.
pub const Y_HEADROOM: f64 = 2.5;

/// `[0, max(otu_id) + index_of(max(otu_id)) / 2 + 100]`.
///
/// The middle term is the *position* of the largest id, not a distance in
/// id units.
pub fn x_domain(records: &[OtuRecord]) -> (f64, f64) {
    let ids: Vec<f64> = records.iter().map(|r| f64::from(r.otu_id)).collect();
    let x_max = max_value(ids.iter().copied());
    let index_of_max = ids.iter().position(|&id| id == x_max).unwrap_or(0);
    (0.0, x_max + index_of_max as f64 / 2.0 + 100.0)
}

pub fn y_domain(records: &[OtuRecord]) -> (f64, f64) {
    let y_max = max_value(records.iter().map(|r| r.sample_value));
    (0.0, Y_HEADROOM * y_max)
}

pub fn bubble_chart(records: &[OtuRecord]) -> Scene {
    let margins = BUBBLE_MARGINS;
    let (width, height) = (BUBBLE_WIDTH, BUBBLE_HEIGHT);

    let x_scale = LinearScale::new(x_domain(records), (0.0, width));
    let y_scale = LinearScale::new(y_domain(records), (height, 0.0));

    tracing::trace!(
        x_domain = ?x_scale.domain(),
        y_domain = ?y_scale.domain(),
        records = records.len(),
        "bubble chart scales"
    );

    let mut scene = Scene::new(
        width,
        height,
        ViewBox {
            min_x: -50.0,
            min_y: 0.0,
            width,
            height: height + margins.top + margins.bottom,
        },
    );

    let mut colors = OrdinalColors::tableau10();
    let mut bubbles = Group::new().class("bubbles");
    for record in records {
        bubbles.push(
            Circle {
                cx: x_scale.apply(f64::from(record.otu_id)),
                cy: y_scale.apply(record.sample_value),
                r: record.sample_value / 2.0,
                ..Circle::default()
            }
            .fill(colors.color(&record.otu_id))
            .opacity(0.8),
        );
    }
    scene.push(bubbles);

    scene.push(
        Axis::linear(Orient::Bottom, &x_scale, 10.0)
            .tick_size_outer(0.0)
            .grid(-height)
            .render()
            .class("x-axis")
            .translate(0.0, height),
    );

    scene.push(
        Axis::linear(Orient::Left, &y_scale, 5.0)
            .tick_padding(40.0)
            .tick_size_outer(0.0)
            .grid(width)
            .render()
            .class("y-axis"),
    );

    scene.push(
        Text::new("OTU ID")
            .class("x-label")
            .translate(width / 2.0, height + margins.top + 20.0)
            .text_anchor(TextAnchor::Middle)
            .font_size(12.0)
            .fill("black"),
    );

    scene
}
