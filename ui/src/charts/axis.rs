//! Axis rendering into scene groups.

use crate::core::format::format_plain;

use super::scale::{BandScale, LinearScale};
use super::scene::{Group, Length, Line, PathNode, Styled, Text, TextAnchor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orient {
    Top,
    Bottom,
    Left,
}

impl Orient {
    /// Direction ticks point away from the chart.
    fn k(self) -> f64 {
        match self {
            Orient::Top | Orient::Left => -1.0,
            Orient::Bottom => 1.0,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Orient::Left)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orient: Orient,
    range: (f64, f64),
    ticks: Vec<Tick>,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
    domain_line: bool,
    grid: Option<f64>,
    offset: f64,
}

impl Axis {
    fn with_ticks(orient: Orient, range: (f64, f64), ticks: Vec<Tick>) -> Self {
        Self {
            orient,
            range,
            ticks,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            domain_line: true,
            grid: None,
            offset: 0.0,
        }
    }

    /// Roughly `count` ticks labelled with the scale's tick format.
    pub fn linear(orient: Orient, scale: &LinearScale, count: f64) -> Self {
        let format = scale.tick_format(count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| Tick {
                position: scale.apply(value),
                label: format(value),
            })
            .collect();
        Self::with_ticks(orient, scale.range(), ticks)
    }

    /// One tick per band, centred in the band.
    pub fn band(orient: Orient, scale: &BandScale) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|value| {
                scale.apply(value).map(|start| Tick {
                    position: start + half,
                    label: value.clone(),
                })
            })
            .collect();
        Self::with_ticks(orient, scale.range(), ticks)
    }

    pub fn tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    pub fn tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    pub fn without_domain(mut self) -> Self {
        self.domain_line = false;
        self
    }

    /// Extend every tick across the plot as a faint grid line of `length`
    /// (signed, perpendicular to the axis).
    pub fn grid(mut self, length: f64) -> Self {
        self.grid = Some(length);
        self
    }

    /// Shift ticks and the domain line by `offset` pixels. Use `0.5` for
    /// crisp hairlines on 1x displays; the default `0` suits high-density
    /// screens and the 2x PNG export.
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn render(&self) -> Group {
        let k = self.orient.k();
        let anchor = if self.orient.is_vertical() {
            TextAnchor::End
        } else {
            TextAnchor::Middle
        };

        let mut group = Group::new()
            .fill("none")
            .font_size(10.0)
            .font_family("sans-serif")
            .text_anchor(anchor);

        if self.domain_line {
            group.push(
                PathNode {
                    d: self.domain_path(),
                    ..PathNode::default()
                }
                .class("domain")
                .stroke("currentColor"),
            );
        }

        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        for tick in &self.ticks {
            group.push(self.render_tick(tick, k, spacing));
        }
        group
    }

    fn render_tick(&self, tick: &Tick, k: f64, spacing: f64) -> Group {
        let vertical = self.orient.is_vertical();
        let mut tick_group = Group::new().class("tick").opacity(1.0);
        let position = tick.position + self.offset;
        tick_group = if vertical {
            tick_group.translate(0.0, position)
        } else {
            tick_group.translate(position, 0.0)
        };

        let line = if vertical {
            Line {
                x2: Some(k * self.tick_size_inner),
                ..Line::default()
            }
        } else {
            Line {
                y2: Some(k * self.tick_size_inner),
                ..Line::default()
            }
        }
        .stroke("currentColor");

        let grid_line = self.grid.map(|length| {
            let mut extended = line.clone().stroke_opacity(0.1);
            if vertical {
                extended.x2 = Some(length);
            } else {
                extended.y2 = Some(length);
            }
            extended
        });

        let mut label = Text::new(tick.label.clone()).fill("currentColor");
        match self.orient {
            Orient::Left => {
                label.x = Some(k * spacing);
                label.dy = Some(Length::Em(0.32));
            }
            Orient::Top => {
                label.y = Some(k * spacing);
                label.dy = Some(Length::Em(0.0));
            }
            Orient::Bottom => {
                label.y = Some(k * spacing);
                label.dy = Some(Length::Em(0.71));
            }
        }

        tick_group.push(line);
        if let Some(grid_line) = grid_line {
            tick_group.push(grid_line);
        }
        tick_group.push(label);
        tick_group
    }

    fn domain_path(&self) -> String {
        let k = self.orient.k();
        let (r0, r1) = (
            format_plain(self.range.0 + self.offset),
            format_plain(self.range.1 + self.offset),
        );
        let outer = format_plain(k * self.tick_size_outer);
        let o = format_plain(self.offset);
        match (self.orient.is_vertical(), self.tick_size_outer != 0.0) {
            (true, true) => format!("M{outer},{r0}H{o}V{r1}H{outer}"),
            (true, false) => format!("M{o},{r0}V{r1}"),
            (false, true) => format!("M{r0},{outer}V{o}H{r1}V{outer}"),
            (false, false) => format!("M{r0},{o}H{r1}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::scene::{Node, Translate};

    #[test]
    fn left_axis_places_band_ticks_at_band_centres() {
        let scale = BandScale::new(["OTU1", "OTU2"], (0.0, 100.0));
        let axis = Axis::band(Orient::Left, &scale).tick_size_outer(0.0);
        let positions: Vec<f64> = axis.ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![25.0, 75.0]);

        let group = axis.render();
        match &group.children[0] {
            Node::Path(path) => assert_eq!(path.d, "M0,0V100"),
            other => panic!("expected domain path, got {other:?}"),
        }
    }

    #[test]
    fn offset_shifts_domain_and_ticks() {
        let scale = BandScale::new(["OTU1", "OTU2"], (0.0, 100.0));
        let group = Axis::band(Orient::Left, &scale)
            .tick_size_outer(0.0)
            .offset(0.5)
            .render();
        match &group.children[0] {
            Node::Path(path) => assert_eq!(path.d, "M0.5,0.5V100.5"),
            other => panic!("expected domain path, got {other:?}"),
        }
        match &group.children[1] {
            Node::Group(tick) => assert_eq!(tick.style.transform, Some(Translate { x: 0.0, y: 25.5 })),
            other => panic!("expected tick group, got {other:?}"),
        }

        let linear = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let group = Axis::linear(Orient::Bottom, &linear, 2.0).offset(0.5).render();
        match &group.children[0] {
            Node::Path(path) => assert_eq!(path.d, "M0.5,6V0.5H100.5V6"),
            other => panic!("expected domain path, got {other:?}"),
        }
    }

    #[test]
    fn grid_lines_are_faint_clones() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let group = Axis::linear(Orient::Bottom, &scale, 2.0).grid(-350.0).render();
        let tick = group
            .children
            .iter()
            .find_map(|n| match n {
                Node::Group(g) => Some(g),
                _ => None,
            })
            .unwrap();
        let lines: Vec<&Line> = tick
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].y2, Some(6.0));
        assert_eq!(lines[1].y2, Some(-350.0));
        assert_eq!(lines[1].style.stroke_opacity, Some(0.1));
    }
}
