//! Horizontal bar chart: one bar per record, categories on a band axis,
//! values on a linear axis along the top.

use crate::core::error::ChartConfigError;

use super::axis::{Axis, Orient};
use super::scale::{BandScale, LinearScale};
use super::scene::{Group, Length, Rect, Scene, Styled, Text, TextAnchor, ViewBox};

/// Bars narrower than this get their label outside the bar.
pub const SHORT_BAR_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 0.0,
            bottom: 10.0,
            left: 30.0,
        }
    }
}

/// Every bar chart option and its default.
#[derive(Debug, Clone)]
pub struct BarChartConfig<T> {
    /// Quantitative value of a record.
    pub value: fn(&T) -> f64,
    /// Ordinal category of a record.
    pub category: fn(&T) -> String,
    /// Per-bar label; defaults to the formatted value.
    pub title: Option<fn(&T, usize, &[T]) -> String>,
    pub margins: Margins,
    pub width: f64,
    /// Outer height; derived from the category count when `None`.
    pub height: Option<f64>,
    pub row_height: f64,
    /// Fixed value domain; `[0, max(value)]` when `None`.
    pub x_domain: Option<(f64, f64)>,
    /// Defaults to `[margins.left, width - margins.right]`.
    pub x_range: Option<(f64, f64)>,
    pub x_label: Option<String>,
    pub y_padding: f64,
    /// Explicit category domain; records outside it are not drawn.
    pub y_domain: Option<Vec<String>>,
    /// Defaults to `[margins.top, height - margins.bottom]`.
    pub y_range: Option<(f64, f64)>,
    pub color: String,
    pub title_color: String,
    pub title_alt_color: String,
    /// Subject named in the caption; no caption when `None`.
    pub subject_id: Option<String>,
}

impl<T> BarChartConfig<T> {
    pub fn new(value: fn(&T) -> f64, category: fn(&T) -> String) -> Self {
        Self {
            value,
            category,
            title: None,
            margins: Margins::default(),
            width: 640.0,
            height: None,
            row_height: 25.0,
            x_domain: None,
            x_range: None,
            x_label: None,
            y_padding: 0.1,
            y_domain: None,
            y_range: None,
            color: "currentColor".to_string(),
            title_color: "white".to_string(),
            title_alt_color: "currentColor".to_string(),
            subject_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ChartConfigError> {
        if !(self.width > 0.0) || !self.width.is_finite() {
            return Err(ChartConfigError::NonPositiveWidth(self.width));
        }
        if self.margins.left + self.margins.right >= self.width {
            return Err(ChartConfigError::MarginsExceedWidth {
                left: self.margins.left,
                right: self.margins.right,
                width: self.width,
            });
        }
        if !(0.0..1.0).contains(&self.y_padding) {
            return Err(ChartConfigError::PaddingOutOfRange(self.y_padding));
        }
        if let Some((lo, hi)) = self.x_domain {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ChartConfigError::NonFiniteDomain(lo, hi));
            }
        }
        if let Some(height) = self.height {
            let margins = self.margins.top + self.margins.bottom;
            if height < margins {
                return Err(ChartConfigError::HeightBelowMargins { height, margins });
            }
        }
        Ok(())
    }
}

/// Largest non-NaN value, 0 for an empty input.
pub(crate) fn max_value(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

pub fn bar_chart<T>(data: &[T], config: &BarChartConfig<T>) -> Result<Scene, ChartConfigError> {
    config.validate()?;
    let margins = config.margins;
    let width = config.width;

    let xs: Vec<f64> = data.iter().map(config.value).collect();
    let ys: Vec<String> = data.iter().map(config.category).collect();

    let x_domain = config
        .x_domain
        .unwrap_or_else(|| (0.0, max_value(xs.iter().copied())));
    let y_domain = config.y_domain.clone().unwrap_or_else(|| ys.clone());
    let x_range = config
        .x_range
        .unwrap_or((margins.left, width - margins.right));

    let band_probe = BandScale::new(y_domain.iter().cloned(), (0.0, 1.0));
    let category_count = band_probe.domain().len() as f64;
    let height = config.height.unwrap_or_else(|| {
        ((category_count + config.y_padding) * config.row_height).ceil() + margins.top + margins.bottom
    });
    let y_range = config
        .y_range
        .unwrap_or((margins.top, height - margins.bottom));

    let x_scale = LinearScale::new(x_domain, x_range);
    let y_scale = BandScale::new(y_domain, y_range).padding(config.y_padding);
    let bandwidth = y_scale.bandwidth();

    // Records whose category is outside the band domain are skipped.
    let drawn: Vec<(usize, f64)> = ys
        .iter()
        .enumerate()
        .filter_map(|(i, y)| y_scale.apply(y).map(|band| (i, band)))
        .collect();

    let mut scene = Scene::new(
        width,
        height,
        ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height: height + 15.0,
        },
    );

    let mut x_axis = Axis::linear(Orient::Top, &x_scale, width / 80.0)
        .without_domain()
        .grid(height - margins.top - margins.bottom)
        .render()
        .class("x-axis")
        .translate(0.0, margins.top);
    if let Some(label) = &config.x_label {
        x_axis.push(
            Text::new(label.clone())
                .at(width - margins.right, -22.0)
                .fill("currentColor")
                .text_anchor(TextAnchor::End),
        );
    }
    scene.push(x_axis);

    let origin = x_scale.apply(0.0);
    let mut bars = Group::new().class("bars").fill(config.color.clone());
    bars.extend(drawn.iter().map(|&(i, band)| Rect {
        x: origin,
        y: band,
        width: x_scale.apply(xs[i]) - origin,
        height: bandwidth,
        ..Rect::default()
    }));
    scene.push(bars);

    let format_value = x_scale.tick_format(100.0);
    let mut labels = Group::new()
        .class("bar-labels")
        .fill(config.title_color.clone())
        .text_anchor(TextAnchor::End)
        .font_family("sans-serif")
        .font_size(10.0);
    for &(i, band) in &drawn {
        let content = match config.title {
            Some(title) => title(&data[i], i, data),
            None => format_value(xs[i]),
        };
        let end = x_scale.apply(xs[i]);
        let mut label = Text::new(content).at(end, band + bandwidth / 2.0);
        label.dy = Some(Length::Em(0.35));
        if end - origin < SHORT_BAR_PX {
            label.dx = Some(Length::Px(4.0));
            label = label
                .fill(config.title_alt_color.clone())
                .text_anchor(TextAnchor::Start);
        } else {
            label.dx = Some(Length::Px(-4.0));
        }
        labels.push(label);
    }
    scene.push(labels);

    scene.push(
        Axis::band(Orient::Left, &y_scale)
            .tick_size_outer(0.0)
            .render()
            .class("y-axis")
            .translate(margins.left, 0.0),
    );

    if let Some(subject) = &config.subject_id {
        scene.push(
            Text::new(format!("Top 10 OTUs Found In Subject ID {subject}"))
                .class("caption")
                .translate(width / 2.0, height + 10.0)
                .fill("currentColor")
                .text_anchor(TextAnchor::Middle)
                .font_size(12.0),
        );
    }

    Ok(scene)
}
