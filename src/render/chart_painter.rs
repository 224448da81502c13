use std::f32::consts::FRAC_PI_2;

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Plot, Points};

use crate::render::chart::{color_for_index, percent_label, pie_slices, Chart, ChartKind};
use crate::state::theme::Theme;

const MAX_LABEL_CHARS: usize = 28;

fn color32(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Shorten long titles for axis labels.
pub fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('\u{2026}');
    short
}

/// Points along the arc from `start` to `start + sweep`, at most a quarter
/// turn between successive fans so every fan stays convex.
fn arc_fans(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Vec<Pos2>> {
    let fan_count = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let fan_sweep = sweep / fan_count as f32;
    (0..fan_count)
        .map(|fan| {
            let fan_start = start + fan_sweep * fan as f32;
            let steps = 16;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for i in 0..=steps {
                let angle = fan_start + fan_sweep * i as f32 / steps as f32;
                points.push(center + radius * Vec2::angled(angle));
            }
            points
        })
        .collect()
}

/// Draw `chart` with its title into a region of `size`. Returns the screen
/// rectangle the chart occupied, title included.
pub fn paint_chart(ui: &mut egui::Ui, chart: &Chart, theme: Theme, size: Vec2) -> Rect {
    let response = egui::Frame::default()
        .fill(theme.chart_bg())
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(size.x - 16.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&chart.title)
                        .strong()
                        .color(theme.text_color()),
                );
            });
            let body = Vec2::new(size.x - 16.0, (size.y - 44.0).max(60.0));
            match &chart.kind {
                ChartKind::Pie { slices } => paint_pie(ui, slices, theme, body),
                ChartKind::HorizontalBar { bars } => paint_bars(ui, chart, bars, body),
                ChartKind::Scatter { points } => paint_scatter(ui, chart, points, body),
            }
        });
    response.response.rect
}

fn paint_pie(ui: &mut egui::Ui, slices: &[(String, f64)], theme: Theme, size: Vec2) {
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let radius = rect.height().min(rect.width()) * 0.36;
    let center = rect.center();
    let values: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let font = FontId::proportional(11.0);

    for (i, (slice, (label, _))) in pie_slices(&values).iter().zip(slices).enumerate() {
        let fill = color32(color_for_index(i));
        for fan in arc_fans(center, radius, slice.start, slice.sweep) {
            painter.add(Shape::convex_polygon(fan, fill, Stroke::NONE));
        }
        let edge = center + radius * Vec2::angled(slice.start);
        painter.line_segment([center, edge], Stroke::new(1.5, theme.slice_outline()));

        let direction = Vec2::angled(slice.mid_angle());
        painter.text(
            center + direction * radius * 0.65,
            Align2::CENTER_CENTER,
            percent_label(slice.percent),
            font.clone(),
            Color32::WHITE,
        );
        let anchor = if direction.x >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(
            center + direction * radius * 1.1,
            anchor,
            label,
            font.clone(),
            theme.text_color(),
        );
    }
}

fn paint_bars(ui: &mut egui::Ui, chart: &Chart, bars: &[(String, f64)], size: Vec2) {
    let count = bars.len();
    // First entry at the top: bar i sits at y = count - 1 - i.
    let plot_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new((count - 1 - i) as f64, *value)
                .name(label)
                .fill(color32(color_for_index(i)))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = bars.iter().map(|(label, _)| short_label(label)).collect();

    Plot::new(("bars", chart.file_name))
        .width(size.x)
        .height(size.y)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .y_grid_spacer(|input: GridInput| {
            let (low, high) = input.bounds;
            (low.ceil() as i64..=high.floor() as i64)
                .map(|v| GridMark {
                    value: v as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(plot_bars).horizontal());
        });
}

/// Label for the bar whose y position is `value`, empty between bars.
pub fn category_label(labels: &[String], value: f64) -> String {
    let count = labels.len();
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded as usize >= count {
        return String::new();
    }
    labels[count - 1 - rounded as usize].clone()
}

fn paint_scatter(ui: &mut egui::Ui, chart: &Chart, points: &[[f64; 2]], size: Vec2) {
    Plot::new(("scatter", chart.file_name))
        .width(size.x)
        .height(size.y)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points.to_vec())
                    .radius(1.5)
                    .color(color32(color_for_index(0))),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(short_label("Emma"), "Emma");
        let long = "The Complete Works of an Author Who Wrote Far Too Much";
        let short = short_label(long);
        assert_eq!(short.chars().count(), MAX_LABEL_CHARS);
        assert!(short.ends_with('\u{2026}'));
    }

    #[test]
    fn category_labels_follow_top_down_order() {
        let labels = vec!["Mean".to_string(), "Mode".to_string(), "Median".to_string()];
        assert_eq!(category_label(&labels, 2.0), "Mean");
        assert_eq!(category_label(&labels, 0.0), "Median");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 3.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn arc_fans_stay_within_quarter_turns() {
        let fans = arc_fans(Pos2::ZERO, 10.0, 0.0, std::f32::consts::PI * 1.4);
        assert_eq!(fans.len(), 3);
        assert!(fans.iter().all(|fan| fan[0] == Pos2::ZERO && fan.len() == 18));
        let tip = *fans[0].last().expect("arc points");
        assert!((tip.to_vec2().length() - 10.0).abs() < 1e-3);
    }
}
