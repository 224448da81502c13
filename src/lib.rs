pub mod data;
pub mod error;
pub mod processing;
pub mod render;
pub mod report;
pub mod state;
pub mod ui;
