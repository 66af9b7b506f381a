//! Chart Plotter Module
//! Draws chart-ready data interactively with egui_plot.

use crate::analysis::{Correlation, SummaryStats};
use crate::charts::builder::{CategoryChart, HistogramChart, ScatterChart};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

/// Primary series color (the survey dashboards' blue)
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
/// Accent color for contrasting slices and trend lines
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(248, 113, 113);

pub const PALETTE: [Color32; 10] = [
    PRIMARY_COLOR,                   // Blue
    ACCENT_COLOR,                    // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 260.0;
const PIE_STEPS_PER_TURN: f64 = 64.0;

/// Draws the dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for a slice or bar at the given position.
    pub fn slice_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a pie chart with percent+label annotations.
    /// Slices start at twelve o'clock and advance clockwise.
    pub fn draw_pie_chart(ui: &mut egui::Ui, chart: &CategoryChart) {
        Plot::new(format!("pie_{}", chart.column))
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                let mut angle = std::f64::consts::FRAC_PI_2;

                for (i, fraction) in chart.fractions.iter().enumerate() {
                    let sweep = fraction * std::f64::consts::TAU;
                    let steps = ((fraction * PIE_STEPS_PER_TURN).ceil() as usize).max(2);

                    let mut points = Vec::with_capacity(steps + 2);
                    points.push([0.0, 0.0]);
                    for s in 0..=steps {
                        let theta = angle - sweep * s as f64 / steps as f64;
                        points.push([theta.cos(), theta.sin()]);
                    }

                    let color = Self::slice_color(i);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .fill_color(color.gamma_multiply(0.9))
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&chart.labels[i]),
                    );

                    // Annotate slices that are big enough to hold text
                    if *fraction > 0.02 {
                        let mid = angle - sweep / 2.0;
                        let text = format!("{}\n{:.1}%", chart.labels[i], fraction * 100.0);
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                                RichText::new(text).strong().size(12.0),
                            )
                            .color(Color32::WHITE)
                            .anchor(egui::Align2::CENTER_CENTER),
                        );
                    }

                    angle -= sweep;
                }
            });
    }

    /// Draw a vertical bar chart with one bar per category.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &CategoryChart) {
        let x_labels = chart.labels.clone();

        Plot::new(format!("bar_{}", chart.column))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.column.clone())
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = chart
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(i as f64, count as f64)
                            .width(0.6)
                            .fill(Self::slice_color(i).gamma_multiply(0.85))
                            .name(&chart.labels[i])
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(&chart.column));
            });
    }

    /// Draw a histogram as touching bars over the bin centers.
    pub fn draw_histogram_chart(ui: &mut egui::Ui, chart: &HistogramChart) {
        let width = chart.bin_width();

        Plot::new(format!("hist_{}", chart.column))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(chart.column.clone())
            .y_axis_label("Frequency")
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = chart
                    .centers()
                    .into_iter()
                    .zip(chart.counts.iter())
                    .map(|(center, &count)| {
                        Bar::new(center, count as f64)
                            .width(width)
                            .fill(PRIMARY_COLOR.gamma_multiply(0.7))
                            .stroke(Stroke::new(1.0, PRIMARY_COLOR))
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(&chart.column));
            });
    }

    /// Draw a scatter plot with a least-squares trend line when the pairs
    /// support one.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, chart: &ScatterChart, corr: Option<&Correlation>) {
        Plot::new(format!("scatter_{}_{}", chart.x_label, chart.y_label))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(chart.points.iter().copied()))
                        .radius(3.0)
                        .color(PRIMARY_COLOR)
                        .name(format!("{} vs {}", chart.y_label, chart.x_label)),
                );

                if corr.is_some() {
                    if let Some(ends) = chart.trend() {
                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(ends.iter().copied()))
                                .color(ACCENT_COLOR)
                                .width(1.5)
                                .name("Trend"),
                        );
                    }
                }
            });
    }

    /// Draw the counts table next to the category charts.
    pub fn draw_frequency_table(ui: &mut egui::Ui, chart: &CategoryChart) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("freq_table_{}", chart.column)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Value").strong().size(11.0));
                        ui.label(RichText::new("Count").strong().size(11.0));
                        ui.label(RichText::new("Share").strong().size(11.0));
                        ui.end_row();

                        for i in 0..chart.len() {
                            ui.label(RichText::new(&chart.labels[i]).size(11.0));
                            ui.label(RichText::new(chart.counts[i].to_string()).size(11.0));
                            ui.label(
                                RichText::new(format!("{:.1}%", chart.fractions[i] * 100.0))
                                    .size(11.0),
                            );
                            ui.end_row();
                        }
                    });
            });
    }

    /// Draw the summary-statistics table next to the histogram.
    pub fn draw_summary_table(ui: &mut egui::Ui, column: &str, stats: &SummaryStats) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("summary_table_{}", column)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("N").strong().size(11.0));
                        ui.label(RichText::new("Mean").strong().size(11.0));
                        ui.label(RichText::new("Median").strong().size(11.0));
                        ui.label(RichText::new("Std").strong().size(11.0));
                        ui.label(RichText::new("Min").strong().size(11.0));
                        ui.label(RichText::new("Max").strong().size(11.0));
                        ui.label(RichText::new("P05").strong().size(11.0));
                        ui.label(RichText::new("P95").strong().size(11.0));
                        ui.end_row();

                        ui.label(RichText::new(stats.count.to_string()).size(11.0));
                        for value in [
                            stats.mean, stats.median, stats.std, stats.min, stats.max, stats.p05,
                            stats.p95,
                        ] {
                            ui.label(RichText::new(format!("{:.3}", value)).size(11.0));
                        }
                        ui.end_row();
                    });
            });
    }
}
