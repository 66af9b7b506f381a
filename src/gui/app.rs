//! Faculty Viz Main Application
//! Main window with control panel and dashboard.

use crate::charts::ChartRenderer;
use crate::config::FacultyVizConfig;
use crate::data::{schema, DataLoader, DataSource};
use crate::export;
use crate::gui::dashboard::{Dashboard, DashboardData, DashboardPlan, DashboardSection};
use crate::gui::{ControlPanel, ControlPanelAction};
use egui::SidePanel;
use polars::prelude::*;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Table loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { source: DataSource, df: DataFrame },
    Error(String),
}

/// Dashboard build result from background thread
enum BuildResult {
    Progress(f32, String),
    Complete(DashboardData),
}

/// Main application window.
pub struct FacultyVizApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    dashboard: Dashboard,
    preview_rows: usize,

    // Async table loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async dashboard build
    build_rx: Option<Receiver<BuildResult>>,
    is_building: bool,
}

impl FacultyVizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = FacultyVizConfig::load_or_default();
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(&config),
            dashboard: Dashboard::new(),
            preview_rows: config.preview_rows,
            load_rx: None,
            is_loading: false,
            build_rx: None,
            is_building: false,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.source_text = path.display().to_string();
        }
    }

    /// Start loading the entered source. `invalidate` drops any cached copy
    /// first so the table is fetched fresh.
    fn handle_load(&mut self, invalidate: bool) {
        if self.is_loading {
            return;
        }

        let text = self.control_panel.settings.source_text.trim().to_string();
        if text.is_empty() {
            self.control_panel
                .set_progress(0.0, "Error: no data source given");
            return;
        }

        let source = DataSource::parse(&text);
        let key = source.as_key();

        if invalidate {
            self.loader.invalidate(&key);
            log::info!("Invalidated cache entry for {key}");
        }

        // Cache hits resolve without touching the source again
        if self.loader.is_cached(&key) {
            match self.loader.load(&source) {
                Ok(_) => {}
                Err(e) => {
                    self.control_panel
                        .set_progress(0.0, &format!("Error: {e}"));
                    return;
                }
            }
            self.after_load_success();
            return;
        }

        self.dashboard.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(0.0, "Loading table...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        // Fetch in a background thread; install on the UI thread
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!("Fetching {source}...")));
            match DataLoader::fetch_table(&source) {
                Ok(df) => {
                    let _ = tx.send(LoadResult::Complete { source, df });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Refresh panel state after the loader has a current table.
    fn after_load_success(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            return;
        };
        let all = self.loader.get_columns();
        let categorical = schema::categorical_columns(df);
        let numeric = schema::numeric_columns(df);
        let rows = self.loader.get_row_count();

        let column_count = all.len();
        self.control_panel.update_columns(all, categorical, numeric);
        self.control_panel
            .set_progress(0.0, &format!("Loaded {rows} rows, {column_count} columns"));
    }

    /// Check for table loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete { source, df } => {
                        self.loader.install(source, df);
                        self.after_load_success();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("Table load failed: {error}");
                        self.dashboard.clear();
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {error}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Start the dashboard build in a background thread
    fn start_build(&mut self) {
        if self.is_building {
            return;
        }

        let Some(df) = self.loader.get_dataframe().cloned() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        let settings = &self.control_panel.settings;
        let plan = DashboardPlan {
            category_column: settings.category_column.clone(),
            histogram_column: settings.histogram_column.clone(),
            histogram_bins: settings.histogram_bins,
            scatter_x: settings.scatter_x.clone(),
            scatter_y: settings.scatter_y.clone(),
        };
        let preview_rows = self.preview_rows;

        let (tx, rx) = channel();
        self.build_rx = Some(rx);
        self.is_building = true;
        self.control_panel.set_progress(5.0, "Building dashboard...");

        thread::spawn(move || {
            let _ = tx.send(BuildResult::Progress(
                30.0,
                "Aggregating columns...".to_string(),
            ));
            let data = DashboardData::build(&df, &plan, preview_rows);
            let _ = tx.send(BuildResult::Complete(data));
        });
    }

    /// Check for dashboard build results
    fn check_build_results(&mut self) {
        let rx = self.build_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    BuildResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    BuildResult::Complete(data) => {
                        let sections = data.sections.len();
                        let warnings = data.warnings.len();
                        self.control_panel.export_enabled = sections > 0;
                        self.dashboard.set_data(data);

                        let status = if warnings == 0 {
                            format!("Complete! {sections} sections ready")
                        } else {
                            format!("Complete! {sections} sections ready, {warnings} skipped")
                        };
                        self.control_panel.set_progress(100.0, &status);
                        self.is_building = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.build_rx = Some(rx);
            }
        }
    }

    /// Save the loaded table as CSV under the fixed download name.
    fn handle_download_csv(&mut self) {
        let Some(df) = self.loader.get_dataframe().cloned() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(export::DOWNLOAD_FILENAME)
            .save_file()
        else {
            return; // User cancelled
        };

        match export::write_csv(&df, &path) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Complete! Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }

    /// Render every built section to PNG files in a chosen folder.
    fn handle_export_charts(&mut self) {
        let Some(data) = self.dashboard.data.clone() else {
            self.control_panel.set_progress(0.0, "No dashboard to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_progress(10.0, "Rendering charts...");

        match Self::export_charts(&dir, &data) {
            Ok(count) => {
                self.control_panel
                    .set_progress(100.0, &format!("Complete! {count} images exported"));
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open export folder: {e}");
                }
            }
            Err(e) => {
                log::error!("Chart export failed: {e:#}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }

    fn export_charts(dir: &Path, data: &DashboardData) -> anyhow::Result<usize> {
        let mut count = 0usize;

        for section in &data.sections {
            match section {
                DashboardSection::Frequency { chart } => {
                    let stem = export::file_stem(&chart.column);
                    let png = ChartRenderer::render_pie_png(chart)?;
                    export::write_png(dir, &format!("{stem}_pie"), &png)?;
                    let png = ChartRenderer::render_bar_png(chart)?;
                    export::write_png(dir, &format!("{stem}_bar"), &png)?;
                    count += 2;
                }
                DashboardSection::Histogram { chart, .. } => {
                    let stem = export::file_stem(&chart.column);
                    let png = ChartRenderer::render_histogram_png(chart)?;
                    export::write_png(dir, &format!("{stem}_histogram"), &png)?;
                    count += 1;
                }
                DashboardSection::Scatter { chart, .. } => {
                    let stem = format!(
                        "{}_vs_{}",
                        export::file_stem(&chart.y_label),
                        export::file_stem(&chart.x_label)
                    );
                    let png = ChartRenderer::render_scatter_png(chart)?;
                    export::write_png(dir, &format!("{stem}_scatter"), &png)?;
                    count += 1;
                }
            }
        }

        Ok(count)
    }
}

impl eframe::App for FacultyVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_build_results();

        // Request repaint while loading or building
        if self.is_loading || self.is_building {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseFile => self.handle_browse_file(),
                        ControlPanelAction::LoadSource => self.handle_load(false),
                        ControlPanelAction::ReloadSource => self.handle_load(true),
                        ControlPanelAction::BuildDashboard => {
                            if !self.is_building {
                                self.start_build();
                            }
                        }
                        ControlPanelAction::DownloadCsv => self.handle_download_csv(),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
