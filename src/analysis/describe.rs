//! Descriptive Statistics Module
//! Summary numbers for a cleaned sample and Pearson correlation for
//! paired columns.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for the correlation test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Summary statistics for one cleaned numeric sample.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p95: f64,
}

impl Default for SummaryStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Pearson correlation between two aligned samples.
#[derive(Debug, Clone)]
pub struct Correlation {
    pub r: f64,
    pub p_value: Option<f64>,
    pub n: usize,
    pub is_significant: bool,
}

/// Compute summary statistics for a sample of values.
pub fn summarize(values: &[f64]) -> SummaryStats {
    let n = values.len();
    if n == 0 {
        return SummaryStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    SummaryStats {
        count: n,
        mean,
        median,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        p05: percentile(&sorted, 5.0),
        p95: percentile(&sorted, 95.0),
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Pearson correlation for two aligned samples, with a two-tailed p-value
/// from the t-distribution. Returns None when a coefficient cannot be
/// computed (fewer than two pairs, or a constant sample).
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<Correlation> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = xs[..n].iter().sum::<f64>() / nf;
    let mean_y = ys[..n].iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());

    // Two-tailed p-value needs at least one degree of freedom
    let p_value = if n >= 3 {
        let df = nf - 2.0;
        let denom = 1.0 - r * r;
        if denom <= f64::EPSILON {
            Some(0.0)
        } else {
            let t = r * (df / denom).sqrt();
            StudentsT::new(0.0, 1.0, df)
                .ok()
                .map(|dist| 2.0 * (1.0 - dist.cdf(t.abs())))
        }
    } else {
        None
    };

    let is_significant = p_value.map(|p| p <= SIGNIFICANCE_THRESHOLD).unwrap_or(false);
    Some(Correlation {
        r,
        p_value,
        n,
        is_significant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summarize_basic_sample() {
        let stats = summarize(&[4.0, 2.0, 1.0, 3.0]);
        assert_eq!(stats.count, 4);
        assert!(close(stats.mean, 2.5));
        assert!(close(stats.median, 2.5));
        assert!(close(stats.min, 1.0));
        assert!(close(stats.max, 4.0));
        // Sample variance of 1..4 is 5/3
        assert!(close(stats.std, (5.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn summarize_empty_sample() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
    }

    #[test]
    fn percentile_interpolates() {
        let sorted: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        assert!(close(percentile(&sorted, 95.0), 95.05));
        assert!(close(percentile(&sorted, 5.0), 5.95));
        assert!(close(percentile(&sorted, 0.0), 1.0));
        assert!(close(percentile(&sorted, 100.0), 100.0));
    }

    #[test]
    fn correlation_perfect_linear() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        let corr = correlation(&xs, &ys).unwrap();
        assert!(close(corr.r, 1.0));
        assert_eq!(corr.p_value, Some(0.0));
        assert!(corr.is_significant);
        assert_eq!(corr.n, 5);
    }

    #[test]
    fn correlation_rejects_constant_sample() {
        let xs = [1.0, 1.0, 1.0];
        let ys = [2.0, 4.0, 6.0];
        assert!(correlation(&xs, &ys).is_none());
    }

    #[test]
    fn correlation_negative() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [8.0, 6.0, 4.0, 2.0];
        let corr = correlation(&xs, &ys).unwrap();
        assert!(close(corr.r, -1.0));
    }
}
