//! Analysis module - aggregation and descriptive statistics

pub mod aggregate;
pub mod describe;

pub use aggregate::{
    frequency, numeric_summary, paired_series, AnalysisError, FrequencyResult, NumericSummary,
    PairedSeries, DEFAULT_BINS,
};
pub use describe::{correlation, summarize, Correlation, SummaryStats};
