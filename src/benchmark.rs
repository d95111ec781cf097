// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Buffer fill throughput benchmark.
//! Every round grows a shared u32 buffer by a fixed step and lets each
//! generator variant overwrite the whole buffer under the timing harness.

use std::hint::black_box;
use std::time::Duration;

use log::{debug, info};

use crate::error::BenchError;
use crate::harness::Bench;
use crate::rngs::{
    mt::Mt19937_64,
    pcg::Pcg32,
    romu::{RomuDuoJr, RomuTrio, RomuTrioEdit, RomuTrioEdit2},
    SmallRand, RNG,
};
use crate::seed::SeedSource;
use crate::{stats, strings};

/// Generators under test, in report order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Variant {
    Pcg32,
    RomuTrio,
    RomuTrioEdit,
    RomuTrioEdit2,
    Rand,
    Nanobench,
    MersenneTwister,
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::Pcg32,
        Variant::RomuTrio,
        Variant::RomuTrioEdit,
        Variant::RomuTrioEdit2,
        Variant::Rand,
        Variant::Nanobench,
        Variant::MersenneTwister,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Pcg32 => strings::PCG32_NAME,
            Variant::RomuTrio => strings::ROMU_TRIO_NAME,
            Variant::RomuTrioEdit => strings::ROMU_TRIO_EDIT_NAME,
            Variant::RomuTrioEdit2 => strings::ROMU_TRIO_EDIT2_NAME,
            Variant::Rand => strings::RAND_NAME,
            Variant::Nanobench => strings::NANOBENCH_NAME,
            Variant::MersenneTwister => strings::MERSENNE_TWISTER_NAME,
        }
    }
}

/// Fixed parameters of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkPlan {
    /// Buffer length of the first round.
    pub start_size: usize,
    /// Growth of the buffer between rounds.
    pub step: usize,
    /// Rounds run while the buffer is shorter than this.
    pub target_size: usize,
    pub warmup: usize,
    pub epochs: usize,
    pub min_epoch_iterations: usize,
    pub min_epoch_time: Duration,
    pub performance_counters: bool,
    /// Print table rows while measuring.
    pub output: bool,
}

impl Default for BenchmarkPlan {
    fn default() -> Self {
        BenchmarkPlan {
            start_size: 1024,
            step: 1024,
            target_size: 50000,
            warmup: 1,
            epochs: 11,
            min_epoch_iterations: 1,
            min_epoch_time: Duration::ZERO,
            performance_counters: true,
            output: true,
        }
    }
}

impl BenchmarkPlan {
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.step == 0 {
            return Err(BenchError::InvalidPlan("step must be positive"));
        }
        if self.start_size == 0 {
            return Err(BenchError::InvalidPlan("start size must be positive"));
        }
        if self.epochs == 0 {
            return Err(BenchError::InvalidPlan("at least one epoch is required"));
        }
        Ok(())
    }

    /// Buffer length of every round. Requires a validated plan.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start_size..self.target_size).step_by(self.step.max(1))
    }

    pub fn round_count(&self) -> usize {
        if self.start_size >= self.target_size || self.step == 0 {
            0
        } else {
            (self.target_size - self.start_size - 1) / self.step + 1
        }
    }
}

/// One state record per variant.
#[derive(Debug, Clone)]
pub struct Generators {
    pub pcg32: Pcg32,
    pub romu_trio: RomuTrio,
    pub romu_trio_edit: RomuTrioEdit,
    pub romu_trio_edit2: RomuTrioEdit2,
    pub rand: SmallRand,
    pub nanobench: RomuDuoJr,
    pub mersenne_twister: Mt19937_64,
}

impl Generators {
    pub fn seeded(seeds: &mut impl SeedSource) -> Self {
        let increment = seeds.next_seed();
        // Flip the bits, a second clock read looks a lot like the increment.
        let state = !seeds.next_seed();
        info!("pcg32 state {:#018x} increment {:#018x}", state, increment);
        let romu_seed = seeds.next_seed();
        info!("romu seed {:#018x}", romu_seed);
        let other_seed = seeds.next_seed();
        info!("reference seed {:#018x}", other_seed);
        Generators {
            pcg32: Pcg32::from_parts(state, increment),
            romu_trio: RomuTrio::new(romu_seed),
            romu_trio_edit: RomuTrioEdit::new(romu_seed),
            romu_trio_edit2: RomuTrioEdit2::new(romu_seed),
            rand: SmallRand::new(other_seed),
            nanobench: RomuDuoJr::new(!other_seed),
            mersenne_twister: Mt19937_64::new(other_seed),
        }
    }

    pub fn fill(&mut self, variant: Variant, data: &mut [u32]) {
        match variant {
            Variant::Pcg32 => fill(data, &mut self.pcg32),
            Variant::RomuTrio => fill(data, &mut self.romu_trio),
            Variant::RomuTrioEdit => fill(data, &mut self.romu_trio_edit),
            Variant::RomuTrioEdit2 => fill(data, &mut self.romu_trio_edit2),
            Variant::Rand => fill(data, &mut self.rand),
            Variant::Nanobench => fill(data, &mut self.nanobench),
            Variant::MersenneTwister => fill(data, &mut self.mersenne_twister),
        }
    }
}

/// Overwrite every slot with the next output of `rng`.
pub fn fill(data: &mut [u32], rng: &mut impl RNG) {
    for slot in data.iter_mut() {
        *slot = rng.next_u32();
    }
    black_box(data);
}

/// Extend `data` with zeroes up to `size` elements. Never shrinks.
pub fn grow_buffer(data: &mut Vec<u32>, size: usize) -> Result<(), BenchError> {
    let current = data.len();
    if current >= size {
        return Ok(());
    }
    data.try_reserve(size - current)
        .map_err(|source| BenchError::BufferGrowth {
            current,
            requested: size,
            source,
        })?;
    data.resize(size, 0);
    Ok(())
}

/// Measurement of one variant in one round.
#[derive(Debug, Copy, Clone)]
pub struct RoundRecord {
    pub variant: Variant,
    pub size: usize,
    pub ns_per_element: f64,
    pub relative: Option<f64>,
}

#[derive(Debug, Default, Clone)]
pub struct Report {
    pub rounds: usize,
    pub records: Vec<RoundRecord>,
}

impl Report {
    /// One line per variant with its averages over all rounds.
    pub fn format_summary(&self) -> String {
        let mut lines: Vec<String> = vec![format!("\nSummary over {} rounds:", self.rounds)];
        for variant in Variant::ALL {
            let records = self.records.iter().filter(|r| r.variant == variant);
            let relative: Vec<f64> = records.clone().filter_map(|r| r.relative).collect();
            let times: Vec<f64> = records.map(|r| r.ns_per_element).collect();
            let relative = stats::mean(&relative)
                .map(|r| format!("{:.1}%", r))
                .unwrap_or_else(|| strings::NOT_AVAILABLE_STR.to_owned());
            let time = stats::mean(&times)
                .map(|t| format!("{:.3} ns/u32", t))
                .unwrap_or_else(|| strings::NOT_AVAILABLE_STR.to_owned());
            lines.push(format!(
                "{:<18}: mean relative {:>8}   mean {}",
                variant.name(),
                relative,
                time
            ));
        }
        lines.join("\n")
    }
}

/// Run every round of `plan`, seeding all generators from `seeds` once.
pub fn run(
    plan: &BenchmarkPlan,
    seeds: &mut impl SeedSource,
    bench: &mut Bench,
) -> Result<Report, BenchError> {
    plan.validate()?;
    info!(
        "Benchmarking {} variants over {} rounds ({} to {} elements, step {})",
        Variant::ALL.len(),
        plan.round_count(),
        plan.start_size,
        plan.target_size,
        plan.step
    );
    let mut generators = Generators::seeded(seeds);
    bench
        .warmup(plan.warmup)
        .epochs(plan.epochs)
        .min_epoch_iterations(plan.min_epoch_iterations)
        .min_epoch_time(plan.min_epoch_time)
        .performance_counters(plan.performance_counters)
        .relative(true)
        .unit("u32")
        .output(plan.output);

    let mut data: Vec<u32> = vec![];
    data.try_reserve(plan.target_size)
        .map_err(|source| BenchError::BufferGrowth {
            current: 0,
            requested: plan.target_size,
            source,
        })?;

    let mut report = Report::default();
    for size in plan.sizes() {
        bench.batch(size);
        grow_buffer(&mut data, size)?;
        // Untimed pass so every page of the new slots is touched.
        fill(&mut data, &mut generators.pcg32);
        debug!("Round {}: {} elements", report.rounds, data.len());

        for variant in Variant::ALL {
            let title = strings::run_title(variant.name(), size);
            let result = bench.run(title, || generators.fill(variant, &mut data));
            report.records.push(RoundRecord {
                variant,
                size,
                ns_per_element: result.ns_per_element(),
                relative: result.relative,
            });
        }
        report.rounds += 1;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::FixedSeed;

    fn quick_plan() -> BenchmarkPlan {
        BenchmarkPlan {
            warmup: 0,
            epochs: 1,
            performance_counters: false,
            output: false,
            ..BenchmarkPlan::default()
        }
    }

    #[test]
    fn default_plan_round_count() {
        let plan = BenchmarkPlan::default();
        assert_eq!(plan.round_count(), (50000 - 1024) / 1024 + 1);
        assert_eq!(plan.round_count(), 48);
        let sizes: Vec<usize> = plan.sizes().collect();
        assert_eq!(sizes.len(), 48);
        assert_eq!(sizes[0], 1024);
        assert_eq!(sizes[47], 49152);
    }

    #[test]
    fn empty_plan_has_no_rounds() {
        let plan = BenchmarkPlan {
            start_size: 4096,
            target_size: 4096,
            ..BenchmarkPlan::default()
        };
        assert_eq!(plan.round_count(), 0);
        assert_eq!(plan.sizes().count(), 0);
    }

    #[test]
    fn invalid_plans_are_rejected() {
        for plan in [
            BenchmarkPlan {
                step: 0,
                ..BenchmarkPlan::default()
            },
            BenchmarkPlan {
                start_size: 0,
                ..BenchmarkPlan::default()
            },
            BenchmarkPlan {
                epochs: 0,
                ..BenchmarkPlan::default()
            },
        ] {
            let mut bench = Bench::new();
            let result = run(&plan, &mut FixedSeed(1), &mut bench);
            assert!(matches!(result, Err(BenchError::InvalidPlan(_))));
            assert!(bench.results().is_empty());
        }
    }

    #[test]
    fn buffer_grows_monotonically() {
        let mut data: Vec<u32> = vec![];
        let mut last_len = 0;
        for size in BenchmarkPlan::default().sizes() {
            grow_buffer(&mut data, size).unwrap();
            assert_eq!(data.len(), size);
            assert!(data.len() >= last_len);
            assert!(data[last_len..].iter().all(|&v| v == 0));
            data.iter_mut().for_each(|v| *v = 7);
            last_len = data.len();
        }
        grow_buffer(&mut data, 16).unwrap();
        assert_eq!(data.len(), last_len);
    }

    #[test]
    fn fill_overwrites_every_slot() {
        let mut data = vec![0u32; 300];
        let mut rng = Pcg32::from_parts(1, 2);
        let mut reference = rng;
        fill(&mut data, &mut rng);
        let expected: Vec<u32> = (0..300).map(|_| reference.next_u32()).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn pcg32_seed_is_bit_inverted() {
        let generators = Generators::seeded(&mut FixedSeed(0x1234));
        assert_eq!(generators.pcg32.increment(), 0x1234);
        assert_eq!(generators.pcg32.state(), !0x1234);
    }

    #[test]
    fn fixed_seeds_are_reproducible() {
        let mut a = Generators::seeded(&mut FixedSeed(99));
        let mut b = Generators::seeded(&mut FixedSeed(99));
        let mut data_a = vec![0u32; 64];
        let mut data_b = vec![0u32; 64];
        for variant in Variant::ALL {
            a.fill(variant, &mut data_a);
            b.fill(variant, &mut data_b);
            assert_eq!(data_a, data_b, "{}", variant.name());
        }
    }

    #[test]
    fn variant_names_are_distinct() {
        let mut names: Vec<&str> = Variant::ALL.iter().map(|v| v.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Variant::ALL.len());
        assert_eq!(Variant::RomuTrioEdit.name(), "romu trio edit");
        assert_eq!(Variant::Nanobench.name(), "nanobench");
    }

    #[test]
    fn variant_names() {
        assert_eq!(Variant::Pcg32.name(), "pcg32");
        assert_eq!(Variant::MersenneTwister.name(), "mersenne twister");
        assert_eq!(
            strings::run_title(Variant::RomuTrioEdit2.name(), 2048),
            "romu trio edit2 (2048)"
        );
    }

    #[test]
    fn full_run_labels_every_variant_per_round() {
        let plan = quick_plan();
        let mut bench = Bench::new();
        let report = run(&plan, &mut FixedSeed(42), &mut bench).unwrap();
        let results = bench.results();

        assert_eq!(report.rounds, 48);
        assert_eq!(report.records.len(), 48 * Variant::ALL.len());
        assert_eq!(results.len(), 48 * Variant::ALL.len());
        assert_eq!(results[0].title, "pcg32 (1024)");
        assert_eq!(results[6].title, "mersenne twister (1024)");
        assert_eq!(results[7].title, "pcg32 (2048)");
        assert_eq!(results[results.len() - 1].title, "mersenne twister (49152)");

        for (round, chunk) in results.chunks(Variant::ALL.len()).enumerate() {
            let size = plan.start_size + round * plan.step;
            assert!(chunk.iter().all(|r| r.group == round && r.batch == size));
            assert_eq!(chunk[0].relative, Some(100.0));
        }

        let summary = report.format_summary();
        for variant in Variant::ALL {
            assert!(summary.contains(variant.name()));
        }
    }
}
