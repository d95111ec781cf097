// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Misc utility functions.

use std::time::Duration;

/// Format a rate of events per second into a pretty String.
/// e.g. 2500000.0 is 2.50 M
pub fn format_rate(per_second: f64) -> String {
    if per_second >= 1e9 {
        format!("{:.2} G", per_second / 1e9)
    } else if per_second >= 1e6 {
        format!("{:.2} M", per_second / 1e6)
    } else if per_second >= 1e3 {
        format!("{:.2} K", per_second / 1e3)
    } else {
        format!("{:.2}", per_second)
    }
}

/// Format a duration with a unit fitting its magnitude.
/// e.g. 1500 ns is 1.50 µs
pub fn format_elapsed_time(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos >= 1_000_000_000 {
        format!("{:.2} s", elapsed.as_secs_f64())
    } else if nanos >= 1_000_000 {
        format!("{:.2} ms", nanos as f64 / 1e6)
    } else if nanos >= 1_000 {
        format!("{:.2} µs", nanos as f64 / 1e3)
    } else {
        format!("{} ns", nanos)
    }
}

/// Format a fraction as percentage with one decimal.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Read the time stamp counter if the platform has one.
#[cfg(target_arch = "x86_64")]
pub fn read_cycle_counter() -> Option<u64> {
    // SAFETY: rdtsc is available on every x86_64 cpu and has no side effects.
    Some(unsafe { core::arch::x86_64::_rdtsc() })
}

#[cfg(not(target_arch = "x86_64"))]
pub fn read_cycle_counter() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_units() {
        assert_eq!(format_rate(12.0), "12.00");
        assert_eq!(format_rate(2_500.0), "2.50 K");
        assert_eq!(format_rate(2_500_000.0), "2.50 M");
        assert_eq!(format_rate(1.25e9), "1.25 G");
    }

    #[test]
    fn elapsed_units() {
        assert_eq!(format_elapsed_time(Duration::from_nanos(999)), "999 ns");
        assert_eq!(format_elapsed_time(Duration::from_nanos(1_500)), "1.50 µs");
        assert_eq!(format_elapsed_time(Duration::from_micros(2_250)), "2.25 ms");
        assert_eq!(format_elapsed_time(Duration::from_millis(3_100)), "3.10 s");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(0.0123), "1.2%");
    }
}
