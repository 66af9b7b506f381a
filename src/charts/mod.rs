//! Charts module - chart-ready data and its renderings

pub mod builder;
pub mod plotter;
pub mod renderer;

pub use builder::{CategoryChart, HistogramChart, ScatterChart};
pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderError};
