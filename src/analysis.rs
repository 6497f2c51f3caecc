//! Chart-ready views derived from a cleaned dataset.

use crate::config::{Config, DensityConfig, HistogramConfig};
use crate::model::{Dataset, Month};
use crate::stats::{GaussianKde, Histogram};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: Month,
    pub count: usize,
}

/// Magnitude density curve sampled on an even grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub bandwidth: f64,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeDistribution {
    pub histogram: Histogram,
    pub density: Option<Density>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub depth_km: f64,
    pub magnitude: f64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthMagnitude {
    pub points: Vec<ScatterPoint>,
    /// Distinct locations in order of first appearance.
    pub locations: Vec<String>,
}

/// All three views of a cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub monthly_counts: Vec<MonthlyCount>,
    pub magnitude: MagnitudeDistribution,
    pub depth_magnitude: DepthMagnitude,
}

pub fn analyze(dataset: &Dataset, cfg: &Config) -> Analysis {
    Analysis {
        monthly_counts: monthly_counts(dataset),
        magnitude: magnitude_distribution(dataset, &cfg.histogram, &cfg.density),
        depth_magnitude: depth_magnitude(dataset),
    }
}

/// Count records per calendar month, in chronological order.
pub fn monthly_counts(dataset: &Dataset) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<Month, usize> = BTreeMap::new();
    for record in dataset.records() {
        *counts.entry(Month::of(record.date)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Bucket magnitudes into equal-width bins over their observed range.
pub fn magnitude_distribution(
    dataset: &Dataset,
    hist_cfg: &HistogramConfig,
    density_cfg: &DensityConfig,
) -> MagnitudeDistribution {
    let vals: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|record| record.magnitude)
        .collect();

    let histogram = Histogram::compute(&vals, hist_cfg.bins);

    let density = if density_cfg.enabled {
        GaussianKde::new(&vals).map(|kde| {
            let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
            let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Density {
                bandwidth: kde.bandwidth(),
                points: kde.evaluate_grid(min, max, density_cfg.grid_size),
            }
        })
    } else {
        None
    };

    MagnitudeDistribution { histogram, density }
}

/// Project every record onto its depth, magnitude and location.
pub fn depth_magnitude(dataset: &Dataset) -> DepthMagnitude {
    let mut points = Vec::with_capacity(dataset.len());
    let mut locations: Vec<String> = Vec::new();
    for record in dataset.records() {
        let (Some(depth_km), Some(magnitude)) = (record.depth_km, record.magnitude) else {
            continue;
        };
        if !locations.contains(&record.location) {
            locations.push(record.location.clone());
        }
        points.push(ScatterPoint {
            depth_km,
            magnitude,
            location: record.location.clone(),
        });
    }
    DepthMagnitude { points, locations }
}
