//! Chart Data Builder Module
//! Pure transformations from aggregation results into chart-ready shapes.
//! No rendering, no I/O.

use crate::analysis::{AnalysisError, FrequencyResult, NumericSummary, PairedSeries};

/// Labels, counts, and fractions for pie and bar renderings of one
/// categorical column. Order matches the frequency result.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub column: String,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub fractions: Vec<f64>,
}

impl CategoryChart {
    pub fn from_frequency(freq: &FrequencyResult) -> Self {
        let total = freq.total.max(1) as f64;
        let mut labels = Vec::with_capacity(freq.entries.len());
        let mut counts = Vec::with_capacity(freq.entries.len());
        let mut fractions = Vec::with_capacity(freq.entries.len());

        for (label, count) in &freq.entries {
            labels.push(label.clone());
            counts.push(*count);
            fractions.push(*count as f64 / total);
        }

        Self {
            column: freq.column.clone(),
            labels,
            counts,
            fractions,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Uniform bin edges and bucket counts for a histogram. `edges` has one
/// more entry than `counts`; the final bin includes its right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub column: String,
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl HistogramChart {
    pub fn from_summary(summary: &NumericSummary) -> Result<Self, AnalysisError> {
        if summary.values.is_empty() {
            return Err(AnalysisError::EmptyAfterCleaning {
                name: summary.column.clone(),
            });
        }

        let bins = summary.bins.max(1);
        let mut lo = summary
            .values
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let mut hi = summary
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        // A single distinct value still gets a visible bar
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let step = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * step).collect();

        let mut counts = vec![0u64; bins];
        for &v in &summary.values {
            let idx = (((v - lo) / step).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self {
            column: summary.column.clone(),
            edges,
            counts,
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// The midpoint of each bin, for bar placement.
    pub fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }
}

/// Coordinate pairs plus axis labels for a scatter rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

impl ScatterChart {
    pub fn from_pairs(pairs: &PairedSeries) -> Self {
        Self {
            x_label: pairs.x_column.clone(),
            y_label: pairs.y_column.clone(),
            points: pairs
                .xs
                .iter()
                .zip(pairs.ys.iter())
                .map(|(&x, &y)| [x, y])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Least-squares line endpoints across the x range. None when the x
    /// values carry no spread.
    pub fn trend(&self) -> Option<[[f64; 2]; 2]> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }

        let nf = n as f64;
        let mean_x = self.points.iter().map(|p| p[0]).sum::<f64>() / nf;
        let mean_y = self.points.iter().map(|p| p[1]).sum::<f64>() / nf;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        for p in &self.points {
            cov += (p[0] - mean_x) * (p[1] - mean_y);
            var_x += (p[0] - mean_x) * (p[0] - mean_x);
        }
        if var_x == 0.0 {
            return None;
        }

        let slope = cov / var_x;
        let intercept = mean_y - slope * mean_x;
        let x_min = self.points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        let x_max = self
            .points
            .iter()
            .map(|p| p[0])
            .fold(f64::NEG_INFINITY, f64::max);

        Some([
            [x_min, slope * x_min + intercept],
            [x_max, slope * x_max + intercept],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(entries: Vec<(&str, u64)>) -> FrequencyResult {
        let total = entries.iter().map(|(_, c)| c).sum();
        FrequencyResult {
            column: "Gender".to_string(),
            entries: entries
                .into_iter()
                .map(|(l, c)| (l.to_string(), c))
                .collect(),
            total,
        }
    }

    fn summary(values: Vec<f64>, bins: usize) -> NumericSummary {
        NumericSummary {
            column: "GPA".to_string(),
            values,
            bins,
            missing: 0,
        }
    }

    #[test]
    fn category_fractions_sum_to_one() {
        let chart = CategoryChart::from_frequency(&freq(vec![("F", 3), ("M", 2)]));
        assert_eq!(chart.labels, vec!["F", "M"]);
        assert_eq!(chart.counts, vec![3, 2]);
        let sum: f64 = chart.fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn category_empty_frequency() {
        let chart = CategoryChart::from_frequency(&freq(vec![]));
        assert!(chart.is_empty());
        assert!(chart.fractions.is_empty());
    }

    #[test]
    fn histogram_edge_count_is_bins_plus_one() {
        let chart = HistogramChart::from_summary(&summary(vec![1.0, 2.0, 2.0, 3.0], 2)).unwrap();
        assert_eq!(chart.edges, vec![1.0, 2.0, 3.0]);
        assert_eq!(chart.counts, vec![1, 3]);
        assert_eq!(chart.edges.len(), chart.counts.len() + 1);
    }

    #[test]
    fn histogram_last_bin_includes_right_edge() {
        let chart = HistogramChart::from_summary(&summary(vec![0.0, 1.0], 4)).unwrap();
        assert_eq!(chart.counts, vec![1, 0, 0, 1]);
        let total: u64 = chart.counts.iter().sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn histogram_degenerate_range_widens() {
        let chart = HistogramChart::from_summary(&summary(vec![2.0, 2.0, 2.0], 4)).unwrap();
        assert_eq!(chart.edges.first().copied(), Some(1.5));
        assert_eq!(chart.edges.last().copied(), Some(2.5));
        let total: u64 = chart.counts.iter().sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn histogram_empty_summary_is_an_error() {
        let err = HistogramChart::from_summary(&summary(vec![], 20)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyAfterCleaning {
                name: "GPA".to_string()
            }
        );
    }

    #[test]
    fn histogram_centers_sit_between_edges() {
        let chart = HistogramChart::from_summary(&summary(vec![0.0, 4.0], 4)).unwrap();
        assert_eq!(chart.centers(), vec![0.5, 1.5, 2.5, 3.5]);
        assert!((chart.bin_width() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scatter_preserves_alignment() {
        let pairs = PairedSeries {
            x_column: "S.S.C (GPA)".to_string(),
            y_column: "H.S.C (GPA)".to_string(),
            xs: vec![3.5, 4.0],
            ys: vec![4.2, 4.8],
            dropped: 1,
        };
        let chart = ScatterChart::from_pairs(&pairs);
        assert_eq!(chart.points, vec![[3.5, 4.2], [4.0, 4.8]]);
        assert_eq!(chart.x_label, "S.S.C (GPA)");
        assert_eq!(chart.y_label, "H.S.C (GPA)");
    }

    #[test]
    fn scatter_trend_follows_a_perfect_line() {
        let pairs = PairedSeries {
            x_column: "x".to_string(),
            y_column: "y".to_string(),
            xs: vec![1.0, 2.0, 3.0],
            ys: vec![2.0, 4.0, 6.0],
            dropped: 0,
        };
        let chart = ScatterChart::from_pairs(&pairs);
        let [start, end] = chart.trend().unwrap();
        assert!((start[0] - 1.0).abs() < 1e-9 && (start[1] - 2.0).abs() < 1e-9);
        assert!((end[0] - 3.0).abs() < 1e-9 && (end[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn scatter_trend_needs_x_spread() {
        let pairs = PairedSeries {
            x_column: "x".to_string(),
            y_column: "y".to_string(),
            xs: vec![2.0, 2.0, 2.0],
            ys: vec![1.0, 2.0, 3.0],
            dropped: 0,
        };
        assert!(ScatterChart::from_pairs(&pairs).trend().is_none());
    }
}
