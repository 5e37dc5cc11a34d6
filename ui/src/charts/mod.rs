//! Chart rendering: scales, axes and the bar and bubble renderers, all
//! producing a [`Scene`] that can be shown inline or exported.

pub mod axis;
pub mod bar;
pub mod bubble;
pub mod palette;
pub mod scale;
pub mod scene;
mod view;

pub use bar::{bar_chart, BarChartConfig, Margins};
pub use bubble::bubble_chart;
pub use palette::{OrdinalColors, TABLEAU10};
pub use scene::Scene;
pub use view::SceneView;
