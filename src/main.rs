// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Throughput comparison of PRNGs filling a growing u32 buffer.

pub mod benchmark;
pub mod error;
pub mod harness;
pub mod rngs;
pub mod seed;
pub mod stats;
mod strings;
pub mod utils;

use std::process::ExitCode;

use log::{error, info};

use benchmark::BenchmarkPlan;
use harness::Bench;
use seed::ClockSeed;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let start = std::time::Instant::now();
    let plan = BenchmarkPlan::default();
    let mut bench = Bench::new();
    match benchmark::run(&plan, &mut ClockSeed, &mut bench) {
        Ok(report) => {
            println!("{}", report.format_summary());
            info!(
                "Full program runtime: {}",
                utils::format_elapsed_time(start.elapsed())
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Benchmark aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}
