// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Minimal timing harness.
//! Runs labeled closures for a number of epochs, keeps per element timings
//! and reports throughput relative to the first run of each group.

use std::time::{Duration, Instant};

use crate::stats::{self, EpochSummary};
use crate::{strings, utils};

/// Upper bound for the calibrated number of closure calls per epoch.
const MAX_EPOCH_ITERATIONS: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct RunResult {
    pub title: String,
    /// Index of the comparison group, a new group starts with every `Bench::batch` call.
    pub group: usize,
    pub batch: usize,
    pub epoch_iterations: usize,
    /// Seconds per element for every epoch.
    pub samples: Vec<f64>,
    pub summary: EpochSummary,
    pub cycles_per_element: Option<f64>,
    /// Throughput in percent of the groups baseline.
    pub relative: Option<f64>,
}

impl RunResult {
    pub fn ns_per_element(&self) -> f64 {
        self.summary.median * 1e9
    }

    pub fn min_ns_per_element(&self) -> f64 {
        self.summary.min * 1e9
    }

    pub fn mean_ns_per_element(&self) -> f64 {
        self.summary.mean * 1e9
    }

    pub fn elements_per_second(&self) -> Option<f64> {
        (self.summary.median > 0.0).then(|| 1.0 / self.summary.median)
    }

    /// One markdown table row.
    pub fn format(&self) -> String {
        let relative = self
            .relative
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| strings::NOT_AVAILABLE_STR.to_owned());
        let rate = self
            .elements_per_second()
            .map(utils::format_rate)
            .unwrap_or_else(|| strings::NOT_AVAILABLE_STR.to_owned());
        let cycles = self
            .cycles_per_element
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| strings::NOT_AVAILABLE_STR.to_owned());
        format!(
            "| {:>8} | {:>12.3} | {:>10.3} | {:>10.3} | {:>12} | {:>6} | {:>10} | `{}`",
            relative,
            self.ns_per_element(),
            self.min_ns_per_element(),
            self.mean_ns_per_element(),
            rate,
            utils::format_percent(self.summary.err),
            cycles,
            self.title
        )
    }
}

/// Benchmark configuration and collected results.
#[derive(Debug)]
pub struct Bench {
    warmup: usize,
    epochs: usize,
    min_epoch_iterations: usize,
    min_epoch_time: Duration,
    batch: usize,
    relative: bool,
    performance_counters: bool,
    unit: String,
    output: bool,
    group: usize,
    baseline: Option<f64>,
    results: Vec<RunResult>,
}

impl Default for Bench {
    fn default() -> Self {
        Bench {
            warmup: 0,
            epochs: 11,
            min_epoch_iterations: 1,
            min_epoch_time: Duration::ZERO,
            batch: 1,
            relative: false,
            performance_counters: false,
            unit: "op".to_owned(),
            output: true,
            group: 0,
            baseline: None,
            results: vec![],
        }
    }
}

impl Bench {
    pub fn new() -> Self {
        Bench::default()
    }

    /// Untimed calls before measuring.
    pub fn warmup(&mut self, iterations: usize) -> &mut Self {
        self.warmup = iterations;
        self
    }

    /// Number of timed samples per run. At least one.
    pub fn epochs(&mut self, epochs: usize) -> &mut Self {
        self.epochs = epochs.max(1);
        self
    }

    pub fn min_epoch_iterations(&mut self, iterations: usize) -> &mut Self {
        self.min_epoch_iterations = iterations.max(1);
        self
    }

    /// Raise the calls per epoch until an epoch lasts at least `time`.
    pub fn min_epoch_time(&mut self, time: Duration) -> &mut Self {
        self.min_epoch_time = time;
        self
    }

    /// Elements processed by one closure call.
    /// Starts a new comparison group with its own baseline.
    pub fn batch(&mut self, elements: usize) -> &mut Self {
        self.batch = elements.max(1);
        if !self.results.is_empty() {
            self.group += 1;
        }
        self.baseline = None;
        self
    }

    pub fn relative(&mut self, enabled: bool) -> &mut Self {
        self.relative = enabled;
        self
    }

    /// Sample the cpu cycle counter around each epoch where available.
    pub fn performance_counters(&mut self, enabled: bool) -> &mut Self {
        self.performance_counters = enabled;
        self
    }

    pub fn unit(&mut self, unit: &str) -> &mut Self {
        self.unit = unit.to_owned();
        self
    }

    /// Print each row to stdout as soon as it is measured.
    pub fn output(&mut self, enabled: bool) -> &mut Self {
        self.output = enabled;
        self
    }

    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Time `op` and record the result under `title`.
    pub fn run<F: FnMut()>(&mut self, title: impl Into<String>, mut op: F) -> &RunResult {
        for _ in 0..self.warmup {
            op();
        }
        let iterations = self.epoch_iterations(&mut op);
        let elements = (iterations * self.batch) as f64;

        let mut samples: Vec<f64> = Vec::with_capacity(self.epochs);
        let mut cycles: Vec<f64> = vec![];
        for _ in 0..self.epochs {
            let pre_cycles = if self.performance_counters {
                utils::read_cycle_counter()
            } else {
                None
            };
            let start = Instant::now();
            for _ in 0..iterations {
                op();
            }
            let elapsed = start.elapsed();
            if let Some(pre) = pre_cycles {
                if let Some(post) = utils::read_cycle_counter() {
                    cycles.push(post.wrapping_sub(pre) as f64 / elements);
                }
            }
            samples.push(elapsed.as_secs_f64() / elements);
        }

        let summary = stats::summarize(&samples).unwrap_or_default();
        let cycles_per_element = stats::summarize(&cycles).map(|c| c.median);
        let relative = if self.relative {
            self.relative_to_baseline(summary.median)
        } else {
            None
        };

        let result = RunResult {
            title: title.into(),
            group: self.group,
            batch: self.batch,
            epoch_iterations: iterations,
            samples,
            summary,
            cycles_per_element,
            relative,
        };
        if self.output {
            if self.starts_group(&result) {
                println!("{}", strings::table_header(&self.unit));
            }
            println!("{}", result.format());
        }
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    /// Render every recorded result as markdown tables, one per group.
    #[cfg(test)]
    fn render(&self) -> String {
        let mut out = String::new();
        let mut current_group = None;
        for result in &self.results {
            if current_group != Some(result.group) {
                out.push_str(&strings::table_header(&self.unit));
                out.push('\n');
                current_group = Some(result.group);
            }
            out.push_str(&result.format());
            out.push('\n');
        }
        out
    }

    /// The first run of a group with a measurable time becomes its baseline.
    fn relative_to_baseline(&mut self, median: f64) -> Option<f64> {
        if self.baseline.is_none() && median > 0.0 {
            self.baseline = Some(median);
        }
        self.baseline
            .and_then(|baseline| stats::relative_throughput(baseline, median))
    }

    fn starts_group(&self, result: &RunResult) -> bool {
        self.results
            .last()
            .map_or(true, |last| last.group != result.group)
    }

    /// Calls per epoch. One extra untimed call estimates the duration of a call
    /// if a minimum epoch time is set.
    fn epoch_iterations<F: FnMut()>(&self, op: &mut F) -> usize {
        let iterations = self.min_epoch_iterations;
        if self.min_epoch_time.is_zero() {
            return iterations;
        }
        let start = Instant::now();
        op();
        let single = start.elapsed().as_nanos().max(1);
        let needed = self.min_epoch_time.as_nanos().div_ceil(single);
        let needed = usize::try_from(needed).unwrap_or(MAX_EPOCH_ITERATIONS);
        iterations.max(needed).min(MAX_EPOCH_ITERATIONS)
    }
}
