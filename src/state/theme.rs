use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

/// Colour scheme of the chart window and the exported PNGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    pub fn chart_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(20, 20, 20),
            Theme::Light => Color32::from_rgb(255, 255, 255),
        }
    }

    /// Outline drawn between pie slices so neighbours stay distinct.
    pub fn slice_outline(&self) -> Color32 {
        self.chart_bg()
    }

    pub fn text_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(220),
            Theme::Light => Color32::from_gray(30),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}
