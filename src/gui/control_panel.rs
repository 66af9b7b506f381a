//! Control Panel Widget
//! Left side panel with the data source entry, column pickers, and actions.

use crate::config::FacultyVizConfig;
use egui::{Color32, ComboBox, RichText};

/// User selections for the dashboard build
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub source_text: String,
    pub category_column: String,
    pub histogram_column: String,
    pub histogram_bins: usize,
    pub scatter_x: String,
    pub scatter_y: String,
}

impl UserSettings {
    pub fn from_config(config: &FacultyVizConfig) -> Self {
        Self {
            source_text: config.source.clone(),
            category_column: config.categorical_column.clone(),
            histogram_column: config.histogram_column.clone(),
            histogram_bins: config.bins,
            scatter_x: config.scatter_x.clone(),
            scatter_y: config.scatter_y.clone(),
        }
    }
}

/// Left side control panel with source selection and dashboard controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub progress: f32,
    pub status: String,
    pub build_enabled: bool,
    pub download_enabled: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(config: &FacultyVizConfig) -> Self {
        Self {
            settings: UserSettings::from_config(config),
            columns: Vec::new(),
            categorical_columns: Vec::new(),
            numeric_columns: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            build_enabled: false,
            download_enabled: false,
            export_enabled: false,
        }
    }

    /// Update available columns after a load. Empty selections fall back to
    /// the first available column; stale ones are kept so the build can
    /// report them as missing instead of silently switching.
    pub fn update_columns(
        &mut self,
        all: Vec<String>,
        categorical: Vec<String>,
        numeric: Vec<String>,
    ) {
        self.columns = all;
        self.categorical_columns = categorical;
        self.numeric_columns = numeric;

        Self::fill_empty(&mut self.settings.category_column, &self.categorical_columns);
        Self::fill_empty(&mut self.settings.histogram_column, &self.numeric_columns);
        Self::fill_empty(&mut self.settings.scatter_x, &self.numeric_columns);
        Self::fill_empty(&mut self.settings.scatter_y, &self.numeric_columns);

        self.build_enabled = !self.columns.is_empty();
        self.download_enabled = !self.columns.is_empty();
    }

    fn fill_empty(selection: &mut String, available: &[String]) {
        if selection.is_empty() {
            *selection = available.first().cloned().unwrap_or_default();
        }
    }

    fn column_combo(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        selection: &mut String,
        options: &[String],
    ) {
        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(combo_width)
                .selected_text(selection.clone())
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui
                            .selectable_label(selection == option, option)
                            .clicked()
                        {
                            *selection = option.clone();
                        }
                    }
                });
        });
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Faculty Viz")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Arts Faculty Survey")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.source_text)
                        .hint_text("https://… or path/to/data.csv")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseFile;
                    }
                    if ui.button("⬇ Load").clicked() {
                        action = ControlPanelAction::LoadSource;
                    }
                    if ui.button("⟳ Reload").clicked() {
                        action = ControlPanelAction::ReloadSource;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column Configuration Section =====
        ui.label(RichText::new("🔧 Columns").size(14.0).strong());
        ui.add_space(8.0);

        Self::column_combo(
            ui,
            "category_col",
            "Category:",
            &mut self.settings.category_column,
            &self.categorical_columns,
        );
        ui.add_space(5.0);
        Self::column_combo(
            ui,
            "histogram_col",
            "Histogram:",
            &mut self.settings.histogram_column,
            &self.numeric_columns,
        );
        ui.add_space(5.0);
        Self::column_combo(
            ui,
            "scatter_x_col",
            "Scatter X:",
            &mut self.settings.scatter_x,
            &self.numeric_columns,
        );
        ui.add_space(5.0);
        Self::column_combo(
            ui,
            "scatter_y_col",
            "Scatter Y:",
            &mut self.settings.scatter_y,
            &self.numeric_columns,
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Histogram bins:"));
            ui.add(egui::Slider::new(&mut self.settings.histogram_bins, 5..=60));
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.build_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Build Dashboard").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::BuildDashboard;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.download_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Download CSV").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::DownloadCsv;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") || self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFile,
    LoadSource,
    ReloadSource,
    BuildDashboard,
    DownloadCsv,
    ExportCharts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        ControlPanel::new(&FacultyVizConfig::default())
    }

    #[test]
    fn settings_seeded_from_config() {
        let p = panel();
        assert_eq!(p.settings.category_column, "Gender");
        assert_eq!(p.settings.histogram_column, "S.S.C (GPA)");
        assert!(!p.build_enabled);
    }

    #[test]
    fn update_columns_enables_actions() {
        let mut p = panel();
        p.update_columns(
            vec!["Gender".to_string(), "S.S.C (GPA)".to_string()],
            vec!["Gender".to_string()],
            vec!["S.S.C (GPA)".to_string()],
        );
        assert!(p.build_enabled);
        assert!(p.download_enabled);
    }

    #[test]
    fn stale_selection_is_kept_for_the_build_to_report() {
        let mut p = panel();
        p.settings.category_column = "Faculty".to_string();
        p.update_columns(
            vec!["Gender".to_string()],
            vec!["Gender".to_string()],
            vec![],
        );
        assert_eq!(p.settings.category_column, "Faculty");
    }

    #[test]
    fn empty_selection_falls_back_to_first_available() {
        let mut p = panel();
        p.settings.histogram_column = String::new();
        p.update_columns(
            vec!["Gender".to_string(), "Age".to_string()],
            vec!["Gender".to_string()],
            vec!["Age".to_string()],
        );
        assert_eq!(p.settings.histogram_column, "Age");
    }
}
