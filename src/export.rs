//! Export Module
//! Serializes the loaded table back to CSV and writes exported chart
//! images to disk.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed name offered for the CSV download.
pub const DOWNLOAD_FILENAME: &str = "arts_faculty_data_analyzed.csv";
/// MIME type of the CSV download.
pub const CSV_MIME: &str = "text/csv";

/// Serialize the table to CSV bytes, header included.
pub fn table_to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut out = df.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut out)
        .context("Failed to serialize table to CSV")?;
    Ok(buffer)
}

/// Write the table to the given path as CSV.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let bytes = table_to_csv_bytes(df)?;
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} CSV bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Write rendered PNG bytes into `dir` under `<stem>.png`.
pub fn write_png(dir: &Path, stem: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.png"));
    fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote chart image {}", path.display());
    Ok(path)
}

/// Turn a column name into a safe file stem.
pub fn file_stem(column: &str) -> String {
    let mut stem = String::with_capacity(column.len());
    let mut last_was_sep = true;
    for c in column.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            stem.push('_');
            last_was_sep = true;
        }
    }
    while stem.ends_with('_') {
        stem.pop();
    }
    if stem.is_empty() {
        stem.push_str("column");
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Gender".into(), vec!["Male", "Female", "Female"]),
            Column::new("S.S.C (GPA)".into(), vec![4.5f64, 3.8, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn download_constants_are_fixed() {
        assert_eq!(DOWNLOAD_FILENAME, "arts_faculty_data_analyzed.csv");
        assert_eq!(CSV_MIME, "text/csv");
    }

    #[test]
    fn csv_bytes_round_trip() {
        let df = sample_df();
        let bytes = table_to_csv_bytes(&df).unwrap();

        let parsed = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .unwrap();

        assert_eq!(parsed.height(), df.height());
        assert_eq!(parsed.get_column_names(), df.get_column_names());
    }

    #[test]
    fn csv_bytes_start_with_header() {
        let bytes = table_to_csv_bytes(&sample_df()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.contains("Gender"));
        assert!(header.contains("S.S.C (GPA)"));
    }

    #[test]
    fn write_csv_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DOWNLOAD_FILENAME);
        write_csv(&sample_df(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Gender"));
    }

    #[test]
    fn file_stem_sanitizes_column_names() {
        assert_eq!(file_stem("S.S.C (GPA)"), "s_s_c_gpa");
        assert_eq!(file_stem("Gender"), "gender");
        assert_eq!(
            file_stem("Did you ever attend a Coaching center?"),
            "did_you_ever_attend_a_coaching_center"
        );
        assert_eq!(file_stem("???"), "column");
    }
}
