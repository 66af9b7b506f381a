//! GUI module - application window and widgets

mod app;
mod control_panel;
pub mod dashboard;

pub use app::FacultyVizApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use dashboard::{Dashboard, DashboardData, DashboardPlan, DashboardSection};
