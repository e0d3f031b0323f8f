//! Random Number Generator.

use crate::mc::*;

/// 64-bit precision value for 1 - epsilon.
pub const DOUBLE_ONE_MINUS_EPSILON: f64 = hexf64!("0x1.fffffffffffffp-1"); // 0.99999999999999989

/// 1 - epsilon in the precision we've selected for `Float`.
pub const ONE_MINUS_EPSILON: Float = DOUBLE_ONE_MINUS_EPSILON;

/// Scale mapping a 32-bit word to the unit interval (≈ 2^-32).
const HYBRID_TAUS_SCALE: Float = 2.3283064365387e-10;

/// Smallest usable seed word. Values below this degenerate the Tausworthe
/// steps toward zero.
pub const MIN_SEED: u32 = 128;

/// Default seed words (Marsaglia's KISS constants).
pub const DEFAULT_SEED: [u32; 4] = [123456789, 362436069, 521288629, 916191069];

/// Implements the hybrid Tausworthe/LCG pseudo-random number generator. The
/// combined period is about 2^121.
#[derive(Clone)]
pub struct RandomStream {
    z1: u32,
    z2: u32,
    z3: u32,
    z4: u32,
}

impl Default for RandomStream {
    /// Return a new instance of `RandomStream` with the default seed words.
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomStream {
    /// Create a new `RandomStream` from four seed words.
    ///
    /// * `seed` - The seed words; each must be at least `MIN_SEED`.
    pub fn new(seed: [u32; 4]) -> Self {
        assert!(
            seed.iter().all(|s| *s >= MIN_SEED),
            "random stream seed words must be >= {}, got {:?}",
            MIN_SEED,
            seed
        );
        Self {
            z1: seed[0],
            z2: seed[1],
            z3: seed[2],
            z4: seed[3],
        }
    }

    /// Returns a uniformly distributed u32 value by combining three Tausworthe
    /// steps with a linear congruential step.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        taus_step(&mut self.z1, 13, 19, 12, 4294967294)
            ^ taus_step(&mut self.z2, 2, 25, 4, 4294967288)
            ^ taus_step(&mut self.z3, 3, 11, 17, 4294967280)
            ^ lcg_step(&mut self.z4, 1664525, 1013904223)
    }

    /// Returns a uniformly distributed value over the open interval (0.0, 1.0).
    /// A zero combined word is redrawn.
    pub fn uniform_float(&mut self) -> Float {
        loop {
            let bits = self.uniform_u32();
            if bits != 0 {
                return min(bits as Float * HYBRID_TAUS_SCALE, ONE_MINUS_EPSILON);
            }
        }
    }
}

/// One Tausworthe step; updates the state word in place and returns it.
///
/// * `z`  - The state word.
/// * `s1` - First shift.
/// * `s2` - Second shift.
/// * `s3` - Third shift.
/// * `m`  - The state mask.
#[inline(always)]
fn taus_step(z: &mut u32, s1: u32, s2: u32, s3: u32, m: u32) -> u32 {
    let b = ((*z << s1) ^ *z) >> s2;
    *z = ((*z & m) << s3) ^ b;
    *z
}

/// One linear congruential step; updates the state word in place and returns
/// it.
///
/// * `z` - The state word.
/// * `a` - The multiplier.
/// * `c` - The increment.
#[inline(always)]
fn lcg_step(z: &mut u32, a: u32, c: u32) -> u32 {
    *z = a.wrapping_mul(*z).wrapping_add(c);
    *z
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_seeds_produce_identical_sequences() {
        let mut a = RandomStream::new([400, 500, 600, 700]);
        let mut b = RandomStream::new([400, 500, 600, 700]);
        for _ in 0..64 {
            assert_eq!(a.uniform_u32(), b.uniform_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RandomStream::new([400, 500, 600, 700]);
        let mut b = RandomStream::new([401, 500, 600, 700]);
        let diverged = (0..16).any(|_| a.uniform_u32() != b.uniform_u32());
        assert!(diverged);
    }

    #[test]
    fn uniform_float_stays_in_open_unit_interval() {
        let mut rng = RandomStream::default();
        for _ in 0..100_000 {
            let u = rng.uniform_float();
            assert!(u > 0.0 && u < 1.0, "draw out of range: {}", u);
        }
    }

    #[test]
    fn uniform_float_mean_is_near_half() {
        let mut rng = RandomStream::default();
        let n = 100_000;
        let sum: Float = (0..n).map(|_| rng.uniform_float()).sum();
        let mean = sum / n as Float;
        assert!((mean - 0.5).abs() < 0.01, "mean drifted: {}", mean);
    }

    #[test]
    #[should_panic(expected = "seed words must be")]
    fn small_seed_words_are_rejected() {
        let _ = RandomStream::new([127, 500, 600, 700]);
    }
}
