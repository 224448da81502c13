use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui;
use eframe::egui_wgpu;
use egui::{ColorImage, Rect, Vec2};

use crate::render::chart::Chart;
use crate::render::chart_painter::paint_chart;
use crate::state::settings::Settings;
use crate::state::theme::Theme;
use crate::ui::menu::ChartPresenter;

const GRID_COLUMNS: usize = 3;
/// Frames to draw before the first export, so plot bounds have settled.
const SETTLE_FRAMES: u32 = 3;

/// Window showing every analysis chart in a grid.
pub struct ChartViewerApp {
    charts: Vec<Chart>,
    theme: Theme,
    export_dir: PathBuf,
    export_on_open: bool,
    frames_drawn: u32,
    /// Screen rectangle of each chart from the last frame.
    chart_rects: Vec<Option<Rect>>,
    screenshot_pending: bool,
    status: Option<String>,
    saved: Arc<Mutex<Vec<PathBuf>>>,
}

impl ChartViewerApp {
    pub fn new(charts: Vec<Chart>, settings: &Settings, saved: Arc<Mutex<Vec<PathBuf>>>) -> Self {
        let chart_rects = vec![None; charts.len()];
        Self {
            charts,
            theme: settings.theme,
            export_dir: settings.chart_dir.clone(),
            export_on_open: settings.export_charts,
            frames_drawn: 0,
            chart_rects,
            screenshot_pending: false,
            status: None,
            saved,
        }
    }

    fn request_export(&mut self, ctx: &egui::Context) {
        self.screenshot_pending = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    /// Crop every chart out of `screenshot` and write it as a PNG.
    fn export(&mut self, screenshot: &ColorImage, ppp: f32) {
        if let Err(e) = std::fs::create_dir_all(&self.export_dir) {
            tracing::error!("Cannot create {}: {e}", self.export_dir.display());
            self.status = Some(format!("Failed to create {}: {e}", self.export_dir.display()));
            return;
        }

        let mut written = Vec::new();
        let mut failures = 0;
        for (chart, rect) in self.charts.iter().zip(&self.chart_rects) {
            let Some(rect) = rect else { continue };
            let (rgba, width, height) = crop_rgba(screenshot, *rect, ppp);
            let path = self.export_dir.join(chart.file_name);
            match save_png(&path, rgba, width, height) {
                Ok(()) => {
                    tracing::info!("Saved chart to {:?}", path);
                    written.push(path);
                }
                Err(e) => {
                    tracing::error!("Failed to save {:?}: {e}", path);
                    failures += 1;
                }
            }
        }

        self.status = Some(if failures == 0 {
            format!("Saved {} charts to {}", written.len(), self.export_dir.display())
        } else {
            format!("Saved {} charts, {failures} failed", written.len())
        });
        if let Ok(mut saved) = self.saved.lock() {
            for path in written {
                if !saved.contains(&path) {
                    saved.push(path);
                }
            }
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        if self.screenshot_pending {
            let mut screenshot: Option<Arc<ColorImage>> = None;
            ctx.input(|i| {
                for event in &i.raw.events {
                    if let egui::Event::Screenshot { image, .. } = event {
                        screenshot = Some(image.clone());
                    }
                }
            });
            if let Some(image) = screenshot {
                self.screenshot_pending = false;
                self.export(&image, ctx.pixels_per_point());
            }
        }

        egui::TopBottomPanel::top("chart_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(format!("Theme: {}", self.theme.label()))
                    .clicked()
                {
                    self.theme = self.theme.toggle();
                }
                let save = ui.add_enabled(!self.screenshot_pending, egui::Button::new("Save PNGs"));
                if save.clicked() {
                    self.request_export(ctx);
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let rows = self.charts.len().div_ceil(GRID_COLUMNS).max(1);
            let available = ui.available_size();
            let spacing = ui.spacing().item_spacing;
            let cell = Vec2::new(
                (available.x - spacing.x * (GRID_COLUMNS - 1) as f32) / GRID_COLUMNS as f32,
                (available.y - spacing.y * (rows - 1) as f32) / rows as f32,
            );

            let theme = self.theme;
            for (row, charts) in self.charts.chunks(GRID_COLUMNS).enumerate() {
                ui.horizontal(|ui| {
                    for (col, chart) in charts.iter().enumerate() {
                        let rect = ui
                            .allocate_ui(cell, |ui| paint_chart(ui, chart, theme, cell))
                            .inner;
                        self.chart_rects[row * GRID_COLUMNS + col] = Some(rect);
                    }
                });
            }
        });

        if self.frames_drawn < SETTLE_FRAMES {
            self.frames_drawn += 1;
            if self.frames_drawn == SETTLE_FRAMES && self.export_on_open {
                self.request_export(ctx);
            }
            ctx.request_repaint();
        }
    }
}

/// Copy the pixels under `rect` (in points) out of a full-window screenshot.
pub fn crop_rgba(image: &ColorImage, rect: Rect, ppp: f32) -> (Vec<u8>, usize, usize) {
    let full_w = image.width();
    let full_h = image.height();
    let x0 = ((rect.left().max(0.0) * ppp) as usize).min(full_w);
    let y0 = ((rect.top().max(0.0) * ppp) as usize).min(full_h);
    let x1 = ((rect.right() * ppp).ceil().max(0.0) as usize).min(full_w);
    let y1 = ((rect.bottom() * ppp).ceil().max(0.0) as usize).min(full_h);
    let width = x1.saturating_sub(x0);
    let height = y1.saturating_sub(y0);

    let mut cropped = Vec::with_capacity(width * height * 4);
    for row in y0..y1 {
        for col in x0..x1 {
            let c = image.pixels[row * full_w + col];
            cropped.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
        }
    }
    (cropped, width, height)
}

fn save_png(path: &Path, rgba: Vec<u8>, width: usize, height: usize) -> Result<(), String> {
    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or_else(|| format!("empty or truncated image ({width}x{height})"))?;
    img.save(path).map_err(|e| e.to_string())
}

/// Open the chart window and block until it is closed. Returns the PNGs
/// written while it was open.
pub fn show_charts(charts: Vec<Chart>, settings: &Settings) -> Result<Vec<PathBuf>, String> {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let app = ChartViewerApp::new(charts, settings, Arc::clone(&saved));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("7kBooks Visualizations")
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        renderer: eframe::Renderer::Wgpu,
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                instance_descriptor: eframe::wgpu::InstanceDescriptor {
                    backends: eframe::wgpu::Backends::DX12
                        | eframe::wgpu::Backends::VULKAN
                        | eframe::wgpu::Backends::METAL
                        | eframe::wgpu::Backends::GL,
                    ..Default::default()
                },
                power_preference: eframe::wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        "7kBooks Visualizations",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| format!("Unable to open the chart window: {e}"))?;

    let saved = saved
        .lock()
        .map_err(|_| "chart export state was poisoned".to_string())?;
    Ok(saved.clone())
}

/// Presents charts in a native window.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowPresenter;

impl ChartPresenter for WindowPresenter {
    fn present(&mut self, charts: Vec<Chart>, settings: &Settings) -> Result<Vec<PathBuf>, String> {
        show_charts(charts, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn checkerboard(width: usize, height: usize) -> ColorImage {
        let mut rgba = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) % 2 * 255) as u8;
                rgba.extend_from_slice(&[v, x as u8, y as u8, 255]);
            }
        }
        ColorImage::from_rgba_unmultiplied([width, height], &rgba)
    }

    #[test]
    fn crop_scales_points_to_pixels() {
        let image = checkerboard(8, 6);
        let rect = Rect::from_min_max(Pos2::new(1.0, 1.0), Pos2::new(3.0, 2.0));
        let (rgba, w, h) = crop_rgba(&image, rect, 2.0);
        assert_eq!((w, h), (4, 2));
        assert_eq!(rgba.len(), 4 * 2 * 4);
        // First pixel comes from (2, 2).
        assert_eq!(&rgba[..4], &[0, 2, 2, 255]);
    }

    #[test]
    fn crop_clamps_to_image_bounds() {
        let image = checkerboard(4, 4);
        let rect = Rect::from_min_max(Pos2::new(2.0, -3.0), Pos2::new(10.0, 10.0));
        let (rgba, w, h) = crop_rgba(&image, rect, 1.0);
        assert_eq!((w, h), (2, 4));
        assert_eq!(rgba.len(), w * h * 4);
    }

    #[test]
    fn save_png_writes_a_readable_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.png");
        save_png(&path, vec![255; 3 * 2 * 4], 3, 2).expect("png written");
        let img = image::open(&path).expect("png readable");
        assert_eq!((img.width(), img.height()), (3, 2));
        assert!(save_png(&path, Vec::new(), 3, 2).is_err());
    }
}
