pub mod chart;
pub mod chart_painter;
