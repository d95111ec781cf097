// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! User interaction strings are stored here.

pub const PCG32_NAME: &str = "pcg32";
pub const ROMU_TRIO_NAME: &str = "romu trio";
pub const ROMU_TRIO_EDIT_NAME: &str = "romu trio edit";
pub const ROMU_TRIO_EDIT2_NAME: &str = "romu trio edit2";
pub const RAND_NAME: &str = "rand";
pub const NANOBENCH_NAME: &str = "nanobench";
pub const MERSENNE_TWISTER_NAME: &str = "mersenne twister";

pub const NOT_AVAILABLE_STR: &str = "-";

/// Label of a single timed run, e.g. "pcg32 (1024)".
pub fn run_title(variant_name: &str, size: usize) -> String {
    format!("{} ({})", variant_name, size)
}

/// Markdown table header, `unit` names one processed element.
/// The min and mean columns are in ns per element as well.
pub fn table_header(unit: &str) -> String {
    let per_unit = format!("ns/{}", unit);
    let unit_per_second = format!("{}/s", unit);
    let cycles = format!("cyc/{}", unit);
    format!(
        "\n| relative | {:>12} |     min ns |    mean ns | {:>12} |   err% | {:>10} | benchmark\n\
         |---------:|-------------:|-----------:|-----------:|-------------:|-------:|-----------:|:----------",
        per_unit, unit_per_second, cycles
    )
}
