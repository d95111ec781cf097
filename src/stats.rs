// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Summary statistics over timing samples.

use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Condensed view of the per-epoch samples of a single run.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct EpochSummary {
    pub median: f64,
    pub min: f64,
    pub mean: f64,
    /// Median absolute percentage error around the median, 0.0 - 1.0.
    pub err: f64,
}

/// Summarize samples. Returns None for an empty slice.
pub fn summarize(samples: &[f64]) -> Option<EpochSummary> {
    if samples.is_empty() {
        return None;
    }
    let median = median(samples);
    Some(EpochSummary {
        median,
        min: Statistics::min(samples),
        mean: Statistics::mean(samples),
        err: median_absolute_percentage_error(samples, median),
    })
}

fn median(samples: &[f64]) -> f64 {
    let mut data = Data::new(samples.to_vec());
    data.median()
}

/// Median of |x - center| / center.
/// Zero if the center itself is zero, all samples are then equally fast.
pub fn median_absolute_percentage_error(samples: &[f64], center: f64) -> f64 {
    if samples.is_empty() || center == 0.0 {
        return 0.0;
    }
    let deviations: Vec<f64> = samples
        .iter()
        .map(|s| ((s - center) / center).abs())
        .collect();
    median(&deviations)
}

/// Throughput of a run relative to the baseline in percent.
/// Times are per element, so a faster run yields more than 100.
pub fn relative_throughput(baseline_time: f64, time: f64) -> Option<f64> {
    if time > 0.0 && baseline_time > 0.0 {
        Some(baseline_time / time * 100.0)
    } else {
        None
    }
}

/// Arithmetic mean, None for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(Statistics::mean(values))
    }
}
