//! Column Validator Module
//! Presence checks and semantic-kind classification for table columns,
//! consulted before any aggregation touches a column by name.

use polars::prelude::*;

/// How a column participates in analysis: discrete labels or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

/// Check that a named column exists in the table.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Classify a column by its dtype. `None` when the column is absent.
pub fn column_kind(df: &DataFrame, name: &str) -> Option<ColumnKind> {
    let col = df.column(name).ok()?;
    if is_numeric_dtype(col.dtype()) {
        Some(ColumnKind::Numeric)
    } else {
        Some(ColumnKind::Categorical)
    }
}

/// Get list of numeric column names.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

/// Get list of non-numeric column names.
pub fn categorical_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| !is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Gender".into(), vec!["Male", "Female", "Female"]),
            Column::new("S.S.C (GPA)".into(), vec![4.5f64, 3.8, 5.0]),
            Column::new("Age".into(), vec![21i64, 22, 23]),
        ])
        .unwrap()
    }

    #[test]
    fn presence_check() {
        let df = sample_df();
        assert!(has_column(&df, "Gender"));
        assert!(!has_column(&df, "Faculty"));
    }

    #[test]
    fn kind_follows_dtype() {
        let df = sample_df();
        assert_eq!(column_kind(&df, "Gender"), Some(ColumnKind::Categorical));
        assert_eq!(column_kind(&df, "S.S.C (GPA)"), Some(ColumnKind::Numeric));
        assert_eq!(column_kind(&df, "Age"), Some(ColumnKind::Numeric));
        assert_eq!(column_kind(&df, "Faculty"), None);
    }

    #[test]
    fn column_lists_split_by_kind() {
        let df = sample_df();
        assert_eq!(numeric_columns(&df), vec!["S.S.C (GPA)", "Age"]);
        assert_eq!(categorical_columns(&df), vec!["Gender"]);
    }
}
