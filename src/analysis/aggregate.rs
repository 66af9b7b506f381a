//! Aggregator Module
//! Frequency counts, cleaned numeric sequences, and row-aligned pairs,
//! computed fresh from the table for every chart request.

use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

/// Bin count used when the caller does not ask for one.
pub const DEFAULT_BINS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Column '{name}' not found in table")]
    ColumnNotFound { name: String },
    #[error("Column '{name}' has no values left after dropping missing entries")]
    EmptyAfterCleaning { name: String },
}

/// Occurrence counts for one categorical column, descending, ties in
/// first-seen order. Counts sum to the column's non-missing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyResult {
    pub column: String,
    pub entries: Vec<(String, u64)>,
    pub total: u64,
}

impl FrequencyResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The non-missing values of a numeric column plus the requested bin count.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub values: Vec<f64>,
    pub bins: usize,
    /// Entries dropped as null, NaN, or non-finite.
    pub missing: usize,
}

impl NumericSummary {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Two numeric columns restricted to rows where both are present.
/// `xs` and `ys` stay index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSeries {
    pub x_column: String,
    pub y_column: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub dropped: usize,
}

impl PairedSeries {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AnalysisError> {
    df.column(name).map_err(|_| AnalysisError::ColumnNotFound {
        name: name.to_string(),
    })
}

/// Count occurrences of each distinct value in a categorical column,
/// excluding missing entries, sorted by descending count.
pub fn frequency(df: &DataFrame, name: &str) -> Result<FrequencyResult, AnalysisError> {
    let col = column(df, name)?;

    let mut counts: HashMap<String, (u64, usize)> = HashMap::new();

    for i in 0..col.len() {
        let Ok(value) = col.get(i) else { continue };
        if value.is_null() {
            continue;
        }
        let label = value.to_string().trim_matches('"').to_string();
        let first_seen = counts.len();
        counts.entry(label).or_insert((0, first_seen)).0 += 1;
    }

    let mut entries: Vec<(String, (u64, usize))> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    let total = entries.iter().map(|(_, (count, _))| count).sum();
    Ok(FrequencyResult {
        column: name.to_string(),
        entries: entries
            .into_iter()
            .map(|(label, (count, _))| (label, count))
            .collect(),
        total,
    })
}

/// Drop missing values from a numeric column and keep the requested bin
/// count alongside. An all-missing column yields an empty summary; callers
/// skip the chart instead of failing.
pub fn numeric_summary(
    df: &DataFrame,
    name: &str,
    bins: usize,
) -> Result<NumericSummary, AnalysisError> {
    let col = column(df, name)?;
    let height = col.len();

    let mut values = Vec::with_capacity(height);
    let mut missing = 0usize;

    match col.cast(&DataType::Float64) {
        Ok(casted) => {
            let ca = casted.f64().map_err(|_| AnalysisError::ColumnNotFound {
                name: name.to_string(),
            })?;
            for v in ca.into_iter() {
                match v {
                    Some(x) if x.is_finite() => values.push(x),
                    _ => missing += 1,
                }
            }
        }
        // Uncastable dtype: every entry counts as missing
        Err(_) => missing = height,
    }

    Ok(NumericSummary {
        column: name.to_string(),
        values,
        bins,
        missing,
    })
}

/// Restrict two numeric columns to rows where both are present, preserving
/// row alignment.
pub fn paired_series(
    df: &DataFrame,
    x_name: &str,
    y_name: &str,
) -> Result<PairedSeries, AnalysisError> {
    let x_col = column(df, x_name)?;
    let y_col = column(df, y_name)?;

    let x_cast = x_col
        .cast(&DataType::Float64)
        .map_err(|_| AnalysisError::ColumnNotFound {
            name: x_name.to_string(),
        })?;
    let y_cast = y_col
        .cast(&DataType::Float64)
        .map_err(|_| AnalysisError::ColumnNotFound {
            name: y_name.to_string(),
        })?;
    let x_ca = x_cast.f64().map_err(|_| AnalysisError::ColumnNotFound {
        name: x_name.to_string(),
    })?;
    let y_ca = y_cast.f64().map_err(|_| AnalysisError::ColumnNotFound {
        name: y_name.to_string(),
    })?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut dropped = 0usize;

    for (x, y) in x_ca.into_iter().zip(y_ca.into_iter()) {
        match (x, y) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => {
                xs.push(a);
                ys.push(b);
            }
            _ => dropped += 1,
        }
    }

    Ok(PairedSeries {
        x_column: x_name.to_string(),
        y_column: y_name.to_string(),
        xs,
        ys,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender_df() -> DataFrame {
        DataFrame::new(vec![Column::new(
            "Gender".into(),
            vec!["M", "F", "M", "F", "F"],
        )])
        .unwrap()
    }

    #[test]
    fn frequency_sorts_descending() {
        let df = gender_df();
        let result = frequency(&df, "Gender").unwrap();
        assert_eq!(
            result.entries,
            vec![("F".to_string(), 3), ("M".to_string(), 2)]
        );
        assert_eq!(result.total, 5);
    }

    #[test]
    fn frequency_skips_missing_and_sums_to_present() {
        let df = DataFrame::new(vec![Column::new(
            "Medium".into(),
            vec![Some("Bangla"), None, Some("English"), Some("Bangla"), None],
        )])
        .unwrap();
        let result = frequency(&df, "Medium").unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(
            result.entries,
            vec![("Bangla".to_string(), 2), ("English".to_string(), 1)]
        );
    }

    #[test]
    fn frequency_breaks_ties_by_first_seen() {
        let df = DataFrame::new(vec![Column::new(
            "Coaching".into(),
            vec!["No", "Yes", "No", "Yes"],
        )])
        .unwrap();
        let result = frequency(&df, "Coaching").unwrap();
        assert_eq!(
            result.entries,
            vec![("No".to_string(), 2), ("Yes".to_string(), 2)]
        );
    }

    #[test]
    fn frequency_is_idempotent() {
        let df = gender_df();
        let first = frequency(&df, "Gender").unwrap();
        let second = frequency(&df, "Gender").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn frequency_missing_column() {
        let df = gender_df();
        let err = frequency(&df, "Faculty").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                name: "Faculty".to_string()
            }
        );
    }

    #[test]
    fn numeric_summary_drops_nan_and_counts_missing() {
        let df = DataFrame::new(vec![Column::new(
            "S.S.C (GPA)".into(),
            vec![3.5f64, 4.0, f64::NAN, 4.8],
        )])
        .unwrap();
        let summary = numeric_summary(&df, "S.S.C (GPA)", DEFAULT_BINS).unwrap();
        assert_eq!(summary.values, vec![3.5, 4.0, 4.8]);
        assert_eq!(summary.bins, 20);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.values.len() + summary.missing, df.height());
    }

    #[test]
    fn numeric_summary_drops_nulls() {
        let df = DataFrame::new(vec![Column::new(
            "GPA".into(),
            vec![Some(4.1f64), None, Some(3.2), None],
        )])
        .unwrap();
        let summary = numeric_summary(&df, "GPA", 10).unwrap();
        assert_eq!(summary.values, vec![4.1, 3.2]);
        assert_eq!(summary.missing, 2);
    }

    #[test]
    fn numeric_summary_all_missing_is_empty_not_error() {
        let df = DataFrame::new(vec![Column::new(
            "GPA".into(),
            vec![None::<f64>, None, None],
        )])
        .unwrap();
        let summary = numeric_summary(&df, "GPA", DEFAULT_BINS).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.missing, 3);
    }

    #[test]
    fn numeric_summary_missing_column() {
        let df = gender_df();
        assert!(matches!(
            numeric_summary(&df, "GPA", DEFAULT_BINS),
            Err(AnalysisError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn paired_series_keeps_only_complete_rows() {
        let df = DataFrame::new(vec![
            Column::new("x".into(), vec![Some(1.0f64), None, Some(3.0), Some(4.0)]),
            Column::new("y".into(), vec![Some(2.0f64), Some(5.0), None, Some(8.0)]),
        ])
        .unwrap();
        let pairs = paired_series(&df, "x", "y").unwrap();
        assert_eq!(pairs.xs, vec![1.0, 4.0]);
        assert_eq!(pairs.ys, vec![2.0, 8.0]);
        assert_eq!(pairs.dropped, 2);
        assert_eq!(pairs.len(), 2);

        // Never longer than either column's non-missing count.
        assert!(pairs.len() <= 3);
    }

    #[test]
    fn paired_series_missing_column() {
        let df = gender_df();
        let err = paired_series(&df, "Gender", "GPA").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                name: "GPA".to_string()
            }
        );
    }
}
