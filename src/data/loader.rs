//! CSV Data Loader Module
//! Fetches the survey table from a URL or local path using Polars,
//! with a per-source cache so repeated loads skip the network.

use polars::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch remote CSV: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Source {0} produced an empty table")]
    EmptyData(String),
    #[error("No data loaded")]
    NoData,
}

/// Where a table comes from. Anything starting with `http(s)://` is treated
/// as a remote URL, everything else as a local file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Stable cache key for this source.
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Handles table loading with Polars, keyed by source identifier.
pub struct DataLoader {
    df: Option<DataFrame>,
    source: Option<DataSource>,
    cache: HashMap<String, DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            source: None,
            cache: HashMap::new(),
        }
    }

    /// Load a table, consulting the cache first. A cache hit never touches
    /// the network or the filesystem again until the key is invalidated.
    pub fn load(&mut self, source: &DataSource) -> Result<&DataFrame, LoaderError> {
        let key = source.as_key();
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("cache hit for {key}");
            self.df = Some(cached.clone());
            self.source = Some(source.clone());
            return self.df.as_ref().ok_or(LoaderError::NoData);
        }

        let df = Self::fetch_table(source)?;
        self.install(source.clone(), df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Fetch and parse a table without touching loader state. Used by the
    /// GUI's background load thread; `install` publishes the result.
    pub fn fetch_table(source: &DataSource) -> Result<DataFrame, LoaderError> {
        let df = match source {
            DataSource::Url(url) => Self::fetch_url(url)?,
            DataSource::Path(path) => Self::read_path(path)?,
        };
        if df.height() == 0 || df.width() == 0 {
            return Err(LoaderError::EmptyData(source.to_string()));
        }
        Ok(df)
    }

    fn fetch_url(url: &str) -> Result<DataFrame, LoaderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let bytes = client.get(url).send()?.error_for_status()?.bytes()?;

        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;
        Ok(df)
    }

    fn read_path(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Publish a freshly fetched table: cache it and make it current.
    pub fn install(&mut self, source: DataSource, df: DataFrame) {
        self.cache.insert(source.as_key(), df.clone());
        self.df = Some(df);
        self.source = Some(source);
    }

    /// Drop one cache entry. Returns whether the key was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.cache.remove(key).is_some()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Get list of column names from the loaded table.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the loaded table.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded table.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get the source of the loaded table.
    pub fn get_source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }
}
