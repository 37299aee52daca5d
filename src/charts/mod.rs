//! Charts module - Drawable production, interactive display and PNG export

mod backend;
mod layer;
mod plotter;
mod renderer;

pub use backend::{LayerBackend, RenderBackend, RenderError};
pub use layer::{CompositeView, Layer};
pub use plotter::{color32, ChartPlotter};
pub use renderer::{ExportError, StaticChartRenderer};
