pub mod chart_viewer;
pub mod menu;
