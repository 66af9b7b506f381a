//! Chart Renderer Module
//! Renders chart-ready data to static PNG bytes with plotters, for report
//! export. The interactive dashboard never goes through here.

use crate::charts::builder::{CategoryChart, HistogramChart, ScatterChart};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

pub const EXPORT_WIDTH: u32 = 900;
pub const EXPORT_HEIGHT: u32 = 560;
/// Pie exports use a square canvas so the circle stays round.
pub const PIE_SIDE: u32 = 560;

const PRIMARY: RGBColor = RGBColor(59, 130, 246);
const ACCENT: RGBColor = RGBColor(248, 113, 113);

const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(59, 130, 246),  // Blue
    RGBColor(248, 113, 113), // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Errors that can occur while rendering a chart to PNG
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to prepare drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Nothing to render")]
    EmptyChart,
}

type Result<T> = core::result::Result<T, RenderError>;

/// Renders chart-ready structures to static PNG images.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a category bar chart to PNG bytes.
    pub fn render_bar_png(chart: &CategoryChart) -> Result<Vec<u8>> {
        if chart.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; (EXPORT_WIDTH * EXPORT_HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (EXPORT_WIDTH, EXPORT_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

            let y_max = chart.counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.1;
            let labels = chart.labels.clone();

            let mut ctx = ChartBuilder::on(&root)
                .caption(format!("{} distribution", chart.column), ("sans-serif", 28))
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(56)
                .build_cartesian_2d(-0.5..(chart.len() as f64 - 0.5), 0.0..y_max)
                .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

            ctx.configure_mesh()
                .x_desc(chart.column.clone())
                .y_desc("Count")
                .x_labels(chart.len())
                .x_label_formatter(&|x| {
                    let idx = x.round();
                    if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                        labels[idx as usize].clone()
                    } else {
                        String::new()
                    }
                })
                .disable_x_mesh()
                .draw()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;

            ctx.draw_series(chart.counts.iter().enumerate().map(|(i, &count)| {
                let color = SERIES_COLORS[i % SERIES_COLORS.len()];
                Rectangle::new(
                    [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, count as f64)],
                    color.mix(0.85).filled(),
                )
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        Self::encode_png(EXPORT_WIDTH, EXPORT_HEIGHT, buffer)
    }

    /// Render a pie chart with percent+label annotations to PNG bytes.
    pub fn render_pie_png(chart: &CategoryChart) -> Result<Vec<u8>> {
        if chart.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; (PIE_SIDE * PIE_SIDE * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (PIE_SIDE, PIE_SIDE)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

            let mut ctx = ChartBuilder::on(&root)
                .caption(format!("{} share", chart.column), ("sans-serif", 28))
                .margin(16)
                .build_cartesian_2d(-1.3..1.3, -1.3..1.3)
                .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

            let mut angle = std::f64::consts::FRAC_PI_2;
            for (i, fraction) in chart.fractions.iter().enumerate() {
                let sweep = fraction * std::f64::consts::TAU;
                let steps = ((fraction * 64.0).ceil() as usize).max(2);

                let mut points = Vec::with_capacity(steps + 2);
                points.push((0.0, 0.0));
                for s in 0..=steps {
                    let theta = angle - sweep * s as f64 / steps as f64;
                    points.push((theta.cos(), theta.sin()));
                }

                let color = SERIES_COLORS[i % SERIES_COLORS.len()];
                ctx.draw_series(std::iter::once(Polygon::new(points, color.mix(0.9).filled())))
                    .map_err(|e| RenderError::Drawing(e.to_string()))?;

                if *fraction > 0.02 {
                    let mid = angle - sweep / 2.0;
                    let text = format!("{} {:.1}%", chart.labels[i], fraction * 100.0);
                    ctx.draw_series(std::iter::once(Text::new(
                        text,
                        (0.62 * mid.cos(), 0.62 * mid.sin()),
                        ("sans-serif", 18).into_font().color(&WHITE),
                    )))
                    .map_err(|e| RenderError::Drawing(e.to_string()))?;
                }

                angle -= sweep;
            }

            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        Self::encode_png(PIE_SIDE, PIE_SIDE, buffer)
    }

    /// Render a histogram to PNG bytes.
    pub fn render_histogram_png(chart: &HistogramChart) -> Result<Vec<u8>> {
        if chart.counts.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; (EXPORT_WIDTH * EXPORT_HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (EXPORT_WIDTH, EXPORT_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

            let x_lo = chart.edges[0];
            let x_hi = chart.edges[chart.edges.len() - 1];
            let y_max = chart.counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.1;

            let mut ctx = ChartBuilder::on(&root)
                .caption(format!("{} histogram", chart.column), ("sans-serif", 28))
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(56)
                .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)
                .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

            ctx.configure_mesh()
                .x_desc(chart.column.clone())
                .y_desc("Frequency")
                .draw()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;

            ctx.draw_series(chart.counts.iter().enumerate().map(|(i, &count)| {
                Rectangle::new(
                    [(chart.edges[i], 0.0), (chart.edges[i + 1], count as f64)],
                    PRIMARY.mix(0.7).filled(),
                )
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        Self::encode_png(EXPORT_WIDTH, EXPORT_HEIGHT, buffer)
    }

    /// Render a scatter plot with its trend line to PNG bytes.
    pub fn render_scatter_png(chart: &ScatterChart) -> Result<Vec<u8>> {
        if chart.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; (EXPORT_WIDTH * EXPORT_HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (EXPORT_WIDTH, EXPORT_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

            let (x_lo, x_hi) = Self::padded_range(
                chart.points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min),
                chart
                    .points
                    .iter()
                    .map(|p| p[0])
                    .fold(f64::NEG_INFINITY, f64::max),
            );
            let (y_lo, y_hi) = Self::padded_range(
                chart.points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min),
                chart
                    .points
                    .iter()
                    .map(|p| p[1])
                    .fold(f64::NEG_INFINITY, f64::max),
            );

            let mut ctx = ChartBuilder::on(&root)
                .caption(
                    format!("{} vs {}", chart.y_label, chart.x_label),
                    ("sans-serif", 28),
                )
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(56)
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

            ctx.configure_mesh()
                .x_desc(chart.x_label.clone())
                .y_desc(chart.y_label.clone())
                .draw()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;

            ctx.draw_series(
                chart
                    .points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 3, PRIMARY.mix(0.8).filled())),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

            if let Some([start, end]) = chart.trend() {
                ctx.draw_series(LineSeries::new(
                    vec![(start[0], start[1]), (end[0], end[1])],
                    ShapeStyle::from(&ACCENT).stroke_width(2),
                ))
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
            }

            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        Self::encode_png(EXPORT_WIDTH, EXPORT_HEIGHT, buffer)
    }

    /// Axis range with a small margin. Degenerate and non-finite inputs get
    /// a usable fallback.
    fn padded_range(min: f64, max: f64) -> (f64, f64) {
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if min == max {
            return (min - 0.5, max + 0.5);
        }
        let margin = (max - min) * 0.05;
        (min - margin, max + margin)
    }

    fn encode_png(width: u32, height: u32, buffer: Vec<u8>) -> Result<Vec<u8>> {
        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".to_string()))?;

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
