use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

pub fn compute_var(vals: &[f64]) -> f64 {
    let n_vals = vals.len();
    if n_vals < 2 {
        return f64::NAN;
    }
    let mean = compute_mean(vals);
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / (n_vals - 1) as f64
}

/// Equal-width histogram.
///
/// `edges` has one more element than `counts`. Every bin is half-open
/// except the last one, which also holds the upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn compute(vals: &[f64], n_bins: usize) -> Self {
        if vals.is_empty() || n_bins == 0 {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Degenerate range: widen it so every bin keeps a positive width.
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / n_bins as f64;
        let mut edges: Vec<f64> = (0..=n_bins)
            .map(|i_bin| min + i_bin as f64 * width)
            .collect();
        edges[n_bins] = max;

        let mut counts = vec![0; n_bins];
        for &val in vals {
            let mut i_bin = (((val - min) / width).floor() as usize).min(n_bins - 1);
            // Rounding may put the value outside the edges reported for its bin.
            while i_bin > 0 && val < edges[i_bin] {
                i_bin -= 1;
            }
            while i_bin < n_bins - 1 && val >= edges[i_bin + 1] {
                i_bin += 1;
            }
            counts[i_bin] += 1;
        }

        Self { edges, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Gaussian kernel density estimate with Scott's rule bandwidth.
pub struct GaussianKde {
    vals: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit the estimate, `None` if the bandwidth would not be positive.
    pub fn new(vals: &[f64]) -> Option<Self> {
        let std_dev = compute_var(vals).sqrt();
        let bandwidth = std_dev * (vals.len() as f64).powf(-0.2);
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        Some(Self {
            vals: vals.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = self.vals.len() as f64 * self.bandwidth * (2.0 * PI).sqrt();
        self.vals
            .iter()
            .map(|&val| {
                let z = (x - val) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }

    /// Evaluate on `n_points` evenly spaced points spanning `[lo, hi]`.
    pub fn evaluate_grid(&self, lo: f64, hi: f64, n_points: usize) -> Vec<(f64, f64)> {
        if n_points < 2 {
            return Vec::new();
        }
        let step = (hi - lo) / (n_points - 1) as f64;
        (0..n_points)
            .map(|i_point| {
                let x = lo + i_point as f64 * step;
                (x, self.evaluate(x))
            })
            .collect()
    }
}
