// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Sources of seeds for the benchmarked rngs.

use chrono::Utc;

/// Something that hands out seeds.
pub trait SeedSource {
    fn next_seed(&mut self) -> u64;
}

/// Reads the wall clock in nanoseconds since the unix epoch on every call.
#[derive(Debug, Default, Copy, Clone)]
pub struct ClockSeed;

impl SeedSource for ClockSeed {
    fn next_seed(&mut self) -> u64 {
        let now = Utc::now();
        // Nanosecond timestamps overflow i64 in 2262.
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros()) as u64
    }
}

/// Always returns the same seed. Used for reproducible runs.
#[derive(Debug, Copy, Clone)]
pub struct FixedSeed(pub u64);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_seed_moves_forward() {
        let mut source = ClockSeed;
        let a = source.next_seed();
        let b = source.next_seed();
        assert!(a > 0);
        assert!(b >= a);
    }

    #[test]
    fn fixed_seed_repeats() {
        let mut source = FixedSeed(0xdead_beef);
        assert_eq!(source.next_seed(), 0xdead_beef);
        assert_eq!(source.next_seed(), 0xdead_beef);
    }
}
