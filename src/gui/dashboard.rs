//! Dashboard Widget
//! Scrollable card column with the data preview, the charts, and warnings
//! for sections that could not be built.

use crate::analysis::{
    correlation, frequency, numeric_summary, paired_series, summarize, AnalysisError, Correlation,
    SummaryStats,
};
use crate::charts::{CategoryChart, ChartPlotter, HistogramChart, ScatterChart};
use crate::data::schema;
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;
use rayon::prelude::*;

const CARD_SPACING: f32 = 15.0;
const OK_BORDER: Color32 = Color32::from_rgb(40, 167, 69);
const WARN_BORDER: Color32 = Color32::from_rgb(220, 53, 69);

/// First rows of the table, stringified for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl PreviewTable {
    pub fn from_dataframe(df: &DataFrame, preview_rows: usize) -> Self {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let take = preview_rows.min(df.height());
        let mut rows = Vec::with_capacity(take);
        for r in 0..take {
            let mut row = Vec::with_capacity(df.width());
            for col in df.get_columns() {
                let text = match col.get(r) {
                    Ok(value) if !value.is_null() => {
                        value.to_string().trim_matches('"').to_string()
                    }
                    _ => String::new(),
                };
                row.push(text);
            }
            rows.push(row);
        }

        Self {
            columns,
            rows,
            total_rows: df.height(),
        }
    }
}

/// One built dashboard card.
#[derive(Debug, Clone)]
pub enum DashboardSection {
    Frequency {
        chart: CategoryChart,
    },
    Histogram {
        chart: HistogramChart,
        stats: SummaryStats,
    },
    Scatter {
        chart: ScatterChart,
        correlation: Option<Correlation>,
    },
}

/// Column selections driving a dashboard build.
#[derive(Debug, Clone)]
pub struct DashboardPlan {
    pub category_column: String,
    pub histogram_column: String,
    pub histogram_bins: usize,
    pub scatter_x: String,
    pub scatter_y: String,
}

enum SectionRequest {
    Frequency { column: String },
    Histogram { column: String, bins: usize },
    Scatter { x: String, y: String },
}

/// Everything one dashboard build produces.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub preview: PreviewTable,
    pub sections: Vec<DashboardSection>,
    pub warnings: Vec<String>,
}

impl DashboardData {
    /// Build all dashboard sections from the table. Sections that fail are
    /// turned into warnings; the rest of the dashboard still comes up.
    pub fn build(df: &DataFrame, plan: &DashboardPlan, preview_rows: usize) -> Self {
        let requests = vec![
            SectionRequest::Frequency {
                column: plan.category_column.clone(),
            },
            SectionRequest::Histogram {
                column: plan.histogram_column.clone(),
                bins: plan.histogram_bins,
            },
            SectionRequest::Scatter {
                x: plan.scatter_x.clone(),
                y: plan.scatter_y.clone(),
            },
        ];

        let results: Vec<Result<DashboardSection, AnalysisError>> = requests
            .into_par_iter()
            .map(|request| Self::build_section(df, request))
            .collect();

        let mut sections = Vec::new();
        let mut warnings = Vec::new();
        for result in results {
            match result {
                Ok(section) => sections.push(section),
                Err(e) => {
                    log::warn!("Dashboard section skipped: {e}");
                    warnings.push(e.to_string());
                }
            }
        }

        Self {
            preview: PreviewTable::from_dataframe(df, preview_rows),
            sections,
            warnings,
        }
    }

    // Schema check up front, so a bad selection never reaches the aggregator
    fn require_column(df: &DataFrame, name: &str) -> Result<(), AnalysisError> {
        if schema::has_column(df, name) {
            Ok(())
        } else {
            Err(AnalysisError::ColumnNotFound {
                name: name.to_string(),
            })
        }
    }

    fn build_section(
        df: &DataFrame,
        request: SectionRequest,
    ) -> Result<DashboardSection, AnalysisError> {
        match request {
            SectionRequest::Frequency { column } => {
                Self::require_column(df, &column)?;
                let freq = frequency(df, &column)?;
                if freq.is_empty() {
                    return Err(AnalysisError::EmptyAfterCleaning { name: column });
                }
                Ok(DashboardSection::Frequency {
                    chart: CategoryChart::from_frequency(&freq),
                })
            }
            SectionRequest::Histogram { column, bins } => {
                Self::require_column(df, &column)?;
                let summary = numeric_summary(df, &column, bins)?;
                let stats = summarize(&summary.values);
                let chart = HistogramChart::from_summary(&summary)?;
                Ok(DashboardSection::Histogram { chart, stats })
            }
            SectionRequest::Scatter { x, y } => {
                Self::require_column(df, &x)?;
                Self::require_column(df, &y)?;
                let pairs = paired_series(df, &x, &y)?;
                if pairs.is_empty() {
                    return Err(AnalysisError::EmptyAfterCleaning {
                        name: format!("{x} / {y}"),
                    });
                }
                let corr = correlation(&pairs.xs, &pairs.ys);
                Ok(DashboardSection::Scatter {
                    chart: ScatterChart::from_pairs(&pairs),
                    correlation: corr,
                })
            }
        }
    }
}

/// Scrollable dashboard display area.
pub struct Dashboard {
    pub data: Option<DashboardData>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self { data: None }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    /// Draw the dashboard cards.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let data = data.clone();
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !data.warnings.is_empty() {
                    Self::draw_warnings(ui, &data.warnings);
                    ui.add_space(CARD_SPACING);
                }

                Self::draw_preview_card(ui, &data.preview);
                ui.add_space(CARD_SPACING);

                for section in &data.sections {
                    Self::draw_section_card(ui, section);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn card_frame(border: Color32) -> egui::Frame {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, border))
            .inner_margin(12.0)
    }

    fn draw_warnings(ui: &mut egui::Ui, warnings: &[String]) {
        Self::card_frame(WARN_BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());
            for warning in warnings {
                ui.label(
                    RichText::new(format!("⚠ {warning}"))
                        .size(13.0)
                        .color(WARN_BORDER),
                );
            }
        });
    }

    fn draw_preview_card(ui: &mut egui::Ui, preview: &PreviewTable) {
        Self::card_frame(OK_BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(
                RichText::new("📋 Data Preview")
                    .size(18.0)
                    .strong()
                    .color(OK_BORDER),
            );
            ui.label(
                RichText::new(format!(
                    "First {} of {} rows",
                    preview.rows.len(),
                    preview.total_rows
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
            ui.add_space(8.0);

            ScrollArea::horizontal()
                .id_salt("preview_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("preview_grid")
                        .striped(true)
                        .min_col_width(70.0)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for column in &preview.columns {
                                ui.label(RichText::new(column).strong().size(11.0));
                            }
                            ui.end_row();

                            for row in &preview.rows {
                                for value in row {
                                    ui.label(RichText::new(value).size(11.0));
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    }

    fn draw_section_card(ui: &mut egui::Ui, section: &DashboardSection) {
        match section {
            DashboardSection::Frequency { chart } => Self::draw_frequency_card(ui, chart),
            DashboardSection::Histogram { chart, stats } => {
                Self::draw_histogram_card(ui, chart, stats)
            }
            DashboardSection::Scatter { chart, correlation } => {
                Self::draw_scatter_card(ui, chart, correlation.as_ref())
            }
        }
    }

    fn draw_frequency_card(ui: &mut egui::Ui, chart: &CategoryChart) {
        Self::card_frame(OK_BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(
                RichText::new(format!("📊 {} distribution", chart.column))
                    .size(18.0)
                    .strong()
                    .color(OK_BORDER),
            );
            ui.add_space(8.0);

            let half = (ui.available_width() - 20.0) / 2.0;
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(half);
                    ui.label(RichText::new("Share").size(14.0).strong());
                    ChartPlotter::draw_pie_chart(ui, chart);
                });
                ui.add_space(10.0);
                ui.vertical(|ui| {
                    ui.set_width(half);
                    ui.label(RichText::new("Counts").size(14.0).strong());
                    ChartPlotter::draw_bar_chart(ui, chart);
                });
            });

            ui.add_space(10.0);
            ChartPlotter::draw_frequency_table(ui, chart);
        });
    }

    fn draw_histogram_card(ui: &mut egui::Ui, chart: &HistogramChart, stats: &SummaryStats) {
        Self::card_frame(OK_BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(
                RichText::new(format!("📈 {} histogram", chart.column))
                    .size(18.0)
                    .strong()
                    .color(OK_BORDER),
            );
            ui.add_space(8.0);

            ChartPlotter::draw_histogram_chart(ui, chart);
            ui.add_space(10.0);
            ChartPlotter::draw_summary_table(ui, &chart.column, stats);
        });
    }

    fn draw_scatter_card(ui: &mut egui::Ui, chart: &ScatterChart, corr: Option<&Correlation>) {
        Self::card_frame(OK_BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(
                RichText::new(format!("🎯 {} vs {}", chart.y_label, chart.x_label))
                    .size(18.0)
                    .strong()
                    .color(OK_BORDER),
            );
            ui.add_space(8.0);

            ChartPlotter::draw_scatter_chart(ui, chart, corr);
            ui.add_space(6.0);

            match corr {
                Some(c) => {
                    let text = match c.p_value {
                        Some(p) => format!("r = {:.3} (p = {:.4}, n = {})", c.r, p, c.n),
                        None => format!("r = {:.3} (n = {})", c.r, c.n),
                    };
                    let color = if c.is_significant {
                        WARN_BORDER
                    } else {
                        ui.visuals().text_color()
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));
                }
                None => {
                    ui.label(
                        RichText::new("Correlation unavailable for these columns")
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Gender".into(),
                vec!["Male", "Female", "Female", "Male", "Female"],
            ),
            Column::new(
                "S.S.C (GPA)".into(),
                vec![Some(4.5f64), Some(3.8), None, Some(5.0), Some(4.1)],
            ),
            Column::new(
                "H.S.C (GPA)".into(),
                vec![Some(4.0f64), Some(3.5), Some(4.2), None, Some(4.4)],
            ),
        ])
        .unwrap()
    }

    fn plan() -> DashboardPlan {
        DashboardPlan {
            category_column: "Gender".to_string(),
            histogram_column: "S.S.C (GPA)".to_string(),
            histogram_bins: 10,
            scatter_x: "S.S.C (GPA)".to_string(),
            scatter_y: "H.S.C (GPA)".to_string(),
        }
    }

    #[test]
    fn build_produces_all_sections() {
        let data = DashboardData::build(&survey_df(), &plan(), 5);
        assert_eq!(data.sections.len(), 3);
        assert!(data.warnings.is_empty());
        assert!(matches!(
            data.sections[0],
            DashboardSection::Frequency { .. }
        ));
        assert!(matches!(
            data.sections[1],
            DashboardSection::Histogram { .. }
        ));
        assert!(matches!(data.sections[2], DashboardSection::Scatter { .. }));
    }

    #[test]
    fn missing_column_degrades_to_a_warning() {
        let mut p = plan();
        p.category_column = "Faculty".to_string();
        let data = DashboardData::build(&survey_df(), &p, 5);

        assert_eq!(data.sections.len(), 2);
        assert_eq!(data.warnings.len(), 1);
        assert!(data.warnings[0].contains("Faculty"));
    }

    #[test]
    fn all_missing_numeric_column_warns_but_keeps_the_rest() {
        let df = DataFrame::new(vec![
            Column::new("Gender".into(), vec!["Male", "Female"]),
            Column::new("S.S.C (GPA)".into(), vec![None::<f64>, None]),
            Column::new("H.S.C (GPA)".into(), vec![Some(4.0f64), Some(3.5)]),
        ])
        .unwrap();
        let mut p = plan();
        p.scatter_x = "H.S.C (GPA)".to_string();

        let data = DashboardData::build(&df, &p, 5);
        let histogram_built = data
            .sections
            .iter()
            .any(|s| matches!(s, DashboardSection::Histogram { .. }));

        assert!(!histogram_built);
        assert!(data.warnings.iter().any(|w| w.contains("S.S.C (GPA)")));
        assert!(data
            .sections
            .iter()
            .any(|s| matches!(s, DashboardSection::Frequency { .. })));
    }

    #[test]
    fn scatter_section_carries_correlation() {
        let data = DashboardData::build(&survey_df(), &plan(), 5);
        let Some(DashboardSection::Scatter { correlation, chart }) = data
            .sections
            .iter()
            .find(|s| matches!(s, DashboardSection::Scatter { .. }))
        else {
            panic!("scatter section missing");
        };
        // Rows 0, 1, 4 have both GPAs present
        assert_eq!(chart.len(), 3);
        assert!(correlation.is_some());
    }

    #[test]
    fn preview_truncates_and_stringifies() {
        let preview = PreviewTable::from_dataframe(&survey_df(), 2);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 5);
        assert_eq!(preview.columns[0], "Gender");
        assert_eq!(preview.rows[0][0], "Male");
        assert_eq!(preview.rows[0][1], "4.5");
    }

    #[test]
    fn preview_shows_missing_values_as_blank() {
        let preview = PreviewTable::from_dataframe(&survey_df(), 5);
        assert_eq!(preview.rows[2][1], "");
    }
}
