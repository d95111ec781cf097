// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Implementation of the benchmarked rngs.
//! All implement the RNG interface, some feature additional constructors
//! that set the raw state directly.

use rand::{RngCore, SeedableRng};

/// General trait for PRNGs
pub trait RNG {
    /// Initialize with specified seed.
    fn new(seed: u64) -> Self;
    /// Generate u32 and advance the state one step.
    fn next_u32(&mut self) -> u32;
    /// Generate u64 and advance the state one step.
    /// For generators that dont support full u64 might advance
    /// state more than one step.
    fn next(&mut self) -> u64;
    /// Advance the generator state by the specified amount of steps.
    fn advance(&mut self, delta: usize) {
        for _ in 0..delta {
            let _ = self.next_u32();
        }
    }
    /// Reset to inital state, equivalent to replacing with ::new(seed).
    fn reseed(&mut self, seed: u64)
    where
        Self: Sized,
    {
        *self = Self::new(seed);
    }
}

/// The rand crates small, fast generator.
/// Stands in for the C standard library rand().
#[derive(Debug, Clone)]
pub struct SmallRand {
    rng: rand::rngs::SmallRng,
}

impl RNG for SmallRand {
    fn new(seed: u64) -> Self {
        SmallRand {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Permuted congruential generators.
pub mod pcg {
    use super::RNG;

    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG32 with XSH RR output function.
    /// 64 bit LCG state, the increment selects the stream and is
    /// forced odd every time it is used.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Pcg32 {
        state: u64,
        increment: u64,
    }

    impl RNG for Pcg32 {
        /// The increment takes the seed, the state its complement.
        fn new(seed: u64) -> Self {
            Pcg32::from_parts(!seed, seed)
        }

        fn next_u32(&mut self) -> u32 {
            let old_state = self.state;
            // Output uses the old state so both halves can run in parallel.
            self.state = old_state
                .wrapping_mul(MULTIPLIER)
                .wrapping_add(self.increment | 1);
            let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
            let rot = (old_state >> 59) as u32;
            xorshifted.rotate_right(rot)
        }

        fn next(&mut self) -> u64 {
            let a: u64 = self.next_u32() as u64;
            let b: u64 = self.next_u32() as u64;
            (a << 32) | b
        }
    }

    impl Pcg32 {
        /// Use raw state and increment without any mixing.
        pub fn from_parts(state: u64, increment: u64) -> Self {
            Pcg32 { state, increment }
        }

        /// Seeding procedure of the pcg32 reference implementation.
        /// `init_seq` selects one of 2**63 streams.
        pub fn seeded(init_state: u64, init_seq: u64) -> Self {
            let mut rng = Pcg32::from_parts(0, (init_seq << 1) | 1);
            rng.next_u32();
            rng.state = rng.state.wrapping_add(init_state);
            rng.next_u32();
            rng
        }

        pub fn state(&self) -> u64 {
            self.state
        }

        pub fn increment(&self) -> u64 {
            self.increment
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn reference_vector() {
            let mut rng = Pcg32::seeded(42, 54);
            let expected: [u32; 6] = [
                0xa15c02b7, 0x7b47f409, 0xba1d3330, 0x83d2f293, 0xbfa4784b, 0xcbed606e,
            ];
            for value in expected {
                assert_eq!(rng.next_u32(), value);
            }
        }

        #[test]
        fn zero_rotation_returns_xorshifted() {
            // Top five bits clear -> rot == 0.
            let old_state: u64 = 0x07ff_1234_5678_9abc;
            let mut rng = Pcg32::from_parts(old_state, 7);
            let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
            assert_eq!(rng.next_u32(), xorshifted);
        }

        #[test]
        fn increment_is_forced_odd() {
            let mut even = Pcg32::from_parts(99, 4);
            let mut odd = Pcg32::from_parts(99, 5);
            for _ in 0..16 {
                assert_eq!(even.next_u32(), odd.next_u32());
            }
            assert_eq!(even.increment(), 4);
            assert_eq!(even.state(), odd.state());
        }

        #[test]
        fn state_advance_wraps() {
            let mut rng = Pcg32::from_parts(u64::MAX, u64::MAX);
            rng.next_u32();
            assert_eq!(
                rng.state(),
                u64::MAX.wrapping_mul(MULTIPLIER).wrapping_add(u64::MAX)
            );
        }

        #[test]
        fn new_inverts_state() {
            let rng = Pcg32::new(0x0123_4567_89ab_cdef);
            assert_eq!(rng.increment(), 0x0123_4567_89ab_cdef);
            assert_eq!(rng.state(), !0x0123_4567_89ab_cdef);
        }

        proptest! {
            #[test]
            fn output_is_pure(state: u64, increment: u64) {
                let mut a = Pcg32::from_parts(state, increment);
                let mut b = Pcg32::from_parts(state, increment);
                prop_assert_eq!(a.next_u32(), b.next_u32());
                prop_assert_eq!(a, b);
            }

            #[test]
            fn identical_seeds_give_identical_sequences(
                state: u64,
                increment: u64,
                n in 0usize..512,
            ) {
                let mut a = Pcg32::from_parts(state, increment);
                let mut b = Pcg32::from_parts(state, increment);
                for _ in 0..n {
                    prop_assert_eq!(a.next_u32(), b.next_u32());
                }
            }
        }
    }
}

/// Multiply-rotate generators from the Romu family.
/// Every variant returns the old x so the output does not wait
/// on the multiplication.
pub mod romu {
    use super::RNG;

    pub const MULTIPLIER: u64 = 15241094284759029579;

    /// Three word state shared by the RomuTrio variants.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct TrioState {
        pub x: u64,
        pub y: u64,
        pub z: u64,
    }

    impl TrioState {
        fn from_seed(seed: u64) -> Self {
            TrioState {
                x: seed,
                y: !seed,
                z: seed.rotate_left(32),
            }
        }

        /// Install `next_x` and run the y and z updates on the old words.
        /// Returns the old x.
        #[inline(always)]
        fn step(&mut self, next_x: u64) -> u64 {
            let TrioState { x, y, z } = *self;
            self.x = next_x;
            self.y = y.wrapping_sub(x).rotate_left(12);
            self.z = z.wrapping_sub(y).rotate_left(44);
            x
        }
    }

    /// x' = C * z
    #[derive(Debug, Copy, Clone)]
    pub struct RomuTrio {
        state: TrioState,
    }

    /// x' = C * z + 1
    #[derive(Debug, Copy, Clone)]
    pub struct RomuTrioEdit {
        state: TrioState,
    }

    /// x' = C * z + (y | 1)
    #[derive(Debug, Copy, Clone)]
    pub struct RomuTrioEdit2 {
        state: TrioState,
    }

    impl RNG for RomuTrio {
        fn new(seed: u64) -> Self {
            RomuTrio::from_state(TrioState::from_seed(seed))
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            let next_x = MULTIPLIER.wrapping_mul(self.state.z);
            self.state.step(next_x)
        }
    }

    impl RNG for RomuTrioEdit {
        fn new(seed: u64) -> Self {
            RomuTrioEdit::from_state(TrioState::from_seed(seed))
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            let next_x = MULTIPLIER.wrapping_mul(self.state.z).wrapping_add(1);
            self.state.step(next_x)
        }
    }

    impl RNG for RomuTrioEdit2 {
        fn new(seed: u64) -> Self {
            RomuTrioEdit2::from_state(TrioState::from_seed(seed))
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            let next_x = MULTIPLIER
                .wrapping_mul(self.state.z)
                .wrapping_add(self.state.y | 1);
            self.state.step(next_x)
        }
    }

    impl RomuTrio {
        pub fn from_state(state: TrioState) -> Self {
            RomuTrio { state }
        }
        pub fn state(&self) -> TrioState {
            self.state
        }
    }

    impl RomuTrioEdit {
        pub fn from_state(state: TrioState) -> Self {
            RomuTrioEdit { state }
        }
        pub fn state(&self) -> TrioState {
            self.state
        }
    }

    impl RomuTrioEdit2 {
        pub fn from_state(state: TrioState) -> Self {
            RomuTrioEdit2 { state }
        }
        pub fn state(&self) -> TrioState {
            self.state
        }
    }

    /// Two word Romu generator, the default rng of the nanobench library.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct RomuDuoJr {
        x: u64,
        y: u64,
    }

    impl RNG for RomuDuoJr {
        /// Both words take the seed, then ten steps diffuse it.
        fn new(seed: u64) -> Self {
            let mut rng = RomuDuoJr { x: seed, y: seed };
            rng.advance(10);
            rng
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            let x = self.x;
            self.x = MULTIPLIER.wrapping_mul(self.y);
            self.y = self.y.wrapping_sub(x).rotate_left(27);
            x
        }
    }

    impl RomuDuoJr {
        pub fn from_parts(x: u64, y: u64) -> Self {
            RomuDuoJr { x, y }
        }
    }

}

/// Mersenne Twister generators.
pub mod mt {
    use super::RNG;

    const NN: usize = 312;
    const MM: usize = 156;
    const MATRIX_A: u64 = 0xb5026f5aa96619e9;
    const UPPER_MASK: u64 = 0xffffffff80000000;
    const LOWER_MASK: u64 = 0x7fffffff;

    /// 64 bit Mersenne Twister, MT19937-64.
    /// 2.5 KiB of state, regenerated in one block every 312 outputs.
    #[derive(Clone)]
    pub struct Mt19937_64 {
        mt: [u64; NN],
        index: usize,
    }

    impl RNG for Mt19937_64 {
        fn new(seed: u64) -> Self {
            let mut mt = [0u64; NN];
            mt[0] = seed;
            for i in 1..NN {
                mt[i] = 6364136223846793005u64
                    .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 62))
                    .wrapping_add(i as u64);
            }
            Mt19937_64 { mt, index: NN }
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            if self.index >= NN {
                self.twist();
            }
            let mut x = self.mt[self.index];
            self.index += 1;
            x ^= (x >> 29) & 0x5555555555555555;
            x ^= (x << 17) & 0x71d67fffeda60000;
            x ^= (x << 37) & 0xfff7eee000000000;
            x ^ (x >> 43)
        }
    }

    impl Mt19937_64 {
        fn twist(&mut self) {
            for i in 0..NN {
                let x = (self.mt[i] & UPPER_MASK) | (self.mt[(i + 1) % NN] & LOWER_MASK);
                let mut x_a = x >> 1;
                if x & 1 != 0 {
                    x_a ^= MATRIX_A;
                }
                self.mt[i] = self.mt[(i + MM) % NN] ^ x_a;
            }
            self.index = 0;
        }
    }

    impl std::fmt::Debug for Mt19937_64 {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Mt19937_64")
                .field("index", &self.index)
                .finish_non_exhaustive()
        }
    }

}
