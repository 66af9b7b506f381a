//! Dashboard Configuration Module
//! Default data source and column selections, overridable from a JSON file.

use serde::Deserialize;
use std::path::Path;

/// Config file looked up next to the working directory.
pub const CONFIG_FILE: &str = "faculty_viz.json";

/// The arts-faculty survey published on GitHub, the dataset this dashboard
/// was built around.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/s22a0058-ai/SVisual25/refs/heads/main/arts_faculty_data.csv";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_categorical() -> String {
    "Gender".to_string()
}

fn default_histogram() -> String {
    "S.S.C (GPA)".to_string()
}

fn default_scatter_x() -> String {
    "S.S.C (GPA)".to_string()
}

fn default_scatter_y() -> String {
    "H.S.C (GPA)".to_string()
}

fn default_bins() -> usize {
    crate::analysis::DEFAULT_BINS
}

fn default_preview_rows() -> usize {
    5
}

/// Startup defaults for the dashboard. Every field falls back individually,
/// so a partial config file is fine.
#[derive(Debug, Clone, Deserialize)]
pub struct FacultyVizConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_categorical")]
    pub categorical_column: String,
    #[serde(default = "default_histogram")]
    pub histogram_column: String,
    #[serde(default = "default_scatter_x")]
    pub scatter_x: String,
    #[serde(default = "default_scatter_y")]
    pub scatter_y: String,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for FacultyVizConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            categorical_column: default_categorical(),
            histogram_column: default_histogram(),
            scatter_x: default_scatter_x(),
            scatter_y: default_scatter_y(),
            bins: default_bins(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl FacultyVizConfig {
    /// Read the config file if present, otherwise use defaults.
    /// A malformed file is reported and ignored rather than aborting startup.
    pub fn load_or_default() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_survey_dataset() {
        let config = FacultyVizConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.categorical_column, "Gender");
        assert_eq!(config.bins, 20);
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let config: FacultyVizConfig =
            serde_json::from_str(r#"{ "bins": 12, "categorical_column": "Gender" }"#).unwrap();
        assert_eq!(config.bins, 12);
        assert_eq!(config.scatter_y, "H.S.C (GPA)");
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = FacultyVizConfig::load_from(Path::new("no-such-config.json"));
        assert_eq!(config.histogram_column, "S.S.C (GPA)");
    }
}
