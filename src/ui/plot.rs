use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::generate_palette;
use crate::data::aggregate::{PieData, ScatterRow};
use crate::state::AppState;

/// Segments per full turn used to approximate wedge arcs.
const ARC_SEGMENTS: f64 = 128.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One pie slice in plot coordinates (unit circle, clockwise from 12 o'clock).
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub sweep: f64,
    pub share: f64,
}

impl Wedge {
    /// Closed outline: centre, then the arc.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let steps = ((self.sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
        let mut pts = Vec::with_capacity(steps + 2);
        pts.push([0.0, 0.0]);
        for i in 0..=steps {
            let a = self.start + self.sweep * (i as f64 / steps as f64);
            pts.push(angle_to_point(a, 1.0));
        }
        pts
    }

    /// Where the percentage label goes.
    pub fn label_anchor(&self) -> [f64; 2] {
        angle_to_point(self.start + self.sweep / 2.0, 0.65)
    }
}

fn angle_to_point(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split the full turn proportionally to the slice values. Returns nothing
/// when there is no positive total to divide.
pub fn pie_wedges(pie: &PieData) -> Vec<Wedge> {
    let total = pie.total();
    if !(total > 0.0) {
        return Vec::new();
    }
    let mut start = 0.0;
    pie.values
        .iter()
        .map(|&v| {
            let share = v / total;
            let wedge = Wedge {
                start,
                sweep: share * TAU,
                share,
            };
            start += wedge.sweep;
            wedge
        })
        .collect()
}

/// Render the success pie.
pub fn pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.strong(&pie.title);

    let wedges = pie_wedges(pie);
    if wedges.is_empty() {
        ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.weak("No launches for this selection");
            });
        });
        return;
    }

    let colors = generate_palette(wedges.len());

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for ((wedge, (label, _)), color) in wedges.iter().zip(pie.slices()).zip(&colors) {
                let polygon = Polygon::new(PlotPoints::from(wedge.outline()))
                    .name(label)
                    .fill_color(*color)
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                let [x, y] = wedge.label_anchor();
                let text = RichText::new(format!("{:.1}%", wedge.share * 100.0))
                    .color(Color32::WHITE)
                    .strong();
                plot_ui.text(Text::new(PlotPoint::new(x, y), text));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// The launch behind a hovered scatter point: the row of series `name`
/// closest to `value` in both payload and class.
pub fn hovered_row<'a>(
    rows: &'a [ScatterRow],
    name: &str,
    value: &PlotPoint,
) -> Option<&'a ScatterRow> {
    let distance = |r: &ScatterRow| {
        (r.payload_mass_kg - value.x).hypot(f64::from(r.outcome_class) - value.y)
    };
    rows.iter()
        .filter(|r| r.booster_version_category == name)
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}

/// Render payload vs. outcome, one series per booster category.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong(&state.scatter_title);

    let rows = &state.scatter_rows;
    let colors = &state.booster_colors;

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            hovered_row(rows, name, value)
                .map(|r| {
                    format!(
                        "{}\nBooster: {}\nPayload: {:.0} kg\nclass: {}",
                        r.launch_site,
                        r.booster_version_category,
                        r.payload_mass_kg,
                        r.outcome_class
                    )
                })
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for category in state.dataset.booster_categories() {
                let points: Vec<[f64; 2]> = rows
                    .iter()
                    .filter(|r| r.booster_version_category == *category)
                    .map(|r| [r.payload_mass_kg, f64::from(r.outcome_class)])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let series = Points::new(PlotPoints::from(points))
                    .name(category)
                    .color(colors.color_for(category))
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(series);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie(values: &[f64]) -> PieData {
        PieData {
            labels: values.iter().map(|v| v.to_string()).collect(),
            values: values.to_vec(),
            title: String::new(),
        }
    }

    fn row(site: &str, payload: f64, class: u8, booster: &str) -> ScatterRow {
        ScatterRow {
            payload_mass_kg: payload,
            outcome_class: class,
            booster_version_category: booster.to_string(),
            launch_site: site.to_string(),
        }
    }

    #[test]
    fn hover_distinguishes_same_payload_by_class() {
        let rows = [row("A", 5300.0, 1, "FT"), row("B", 5300.0, 0, "FT")];

        let low = hovered_row(&rows, "FT", &PlotPoint::new(5300.0, 0.0)).unwrap();
        assert_eq!(low.launch_site, "B");
        assert_eq!(low.outcome_class, 0);

        let high = hovered_row(&rows, "FT", &PlotPoint::new(5300.0, 1.0)).unwrap();
        assert_eq!(high.launch_site, "A");
    }

    #[test]
    fn hover_stays_within_series() {
        let rows = [row("A", 5300.0, 1, "FT"), row("B", 5310.0, 1, "B4")];
        let hit = hovered_row(&rows, "B4", &PlotPoint::new(5300.0, 1.0)).unwrap();
        assert_eq!(hit.launch_site, "B");
        assert!(hovered_row(&rows, "", &PlotPoint::new(5300.0, 1.0)).is_none());
        assert!(hovered_row(&rows, "v1.0", &PlotPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn wedges_cover_full_turn() {
        let wedges = pie_wedges(&pie(&[0.5, 1.0, 0.25]));
        assert_eq!(wedges.len(), 3);
        let sweep: f64 = wedges.iter().map(|w| w.sweep).sum();
        assert!((sweep - TAU).abs() < 1e-9);
        assert!((wedges[1].share - 1.0 / 1.75).abs() < 1e-12);
        assert!((wedges[2].start - wedges[1].start - wedges[1].sweep).abs() < 1e-12);
    }

    #[test]
    fn zero_total_has_no_wedges() {
        assert!(pie_wedges(&pie(&[])).is_empty());
        assert!(pie_wedges(&pie(&[0.0, 0.0])).is_empty());
    }

    #[test]
    fn outline_starts_at_centre_and_stays_on_unit_circle() {
        let wedge = Wedge {
            start: 0.0,
            sweep: TAU / 4.0,
            share: 0.25,
        };
        let pts = wedge.outline();
        assert_eq!(pts[0], [0.0, 0.0]);
        for p in &pts[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-9);
        }
        // Starts at 12 o'clock and ends at 3 o'clock.
        assert!((pts[1][1] - 1.0).abs() < 1e-9);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-9);
    }
}
