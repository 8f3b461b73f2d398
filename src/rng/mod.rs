//! Deterministic stream generator exercised by the regression harness.
//!
//! `StreamRng` is a counter-based generator: every output word is
//! `splitmix64(stream_seed + counter * GOLDEN_GAMMA)`. The harness pins the
//! observable output of every public operation here bit-for-bit via the
//! golden table, so any change to these algorithms that alters outputs is a
//! breaking change and must be accompanied by a deliberate golden
//! regeneration.

use thiserror::Error;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_CONST1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_CONST2: u64 = 0x94D0_49BB_1331_11EB;

/// Seed used by the regression pass. Changing it invalidates the golden table.
pub const REGRESS_SEED: u64 = 1;

/// Rejection reasons for bounded sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RngError {
    /// Bounded operations require `upper_bound > 0`.
    #[error("upper_bound must be > 0")]
    InvalidUpperBound,
}

/// Counter-based deterministic generator.
///
/// Cheap to construct, trivially seekable, and — the property the harness
/// exists to protect — byte-for-byte reproducible for a given seed on every
/// architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRng {
    stream_seed: u64,
    counter: u64,
}

impl StreamRng {
    /// Construct a generator positioned at the start of the stream for `seed`.
    #[must_use]
    pub const fn from_seed(seed: u64) -> Self {
        Self {
            stream_seed: seed,
            counter: 0,
        }
    }

    /// Raw `(seed, counter)` state, for diagnostics.
    #[must_use]
    pub const fn state(&self) -> (u64, u64) {
        (self.stream_seed, self.counter)
    }

    /// Next raw 64-bit word. Every other operation reduces to this.
    pub fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        splitmix64(
            self.stream_seed
                .wrapping_add(self.counter.wrapping_mul(GOLDEN_GAMMA)),
        )
    }

    /// Next 32-bit word: the high half of the next 64-bit word.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Next native-width word (truncating on narrower targets).
    pub fn next_usize(&mut self) -> usize {
        self.next_u64() as usize
    }

    /// Next non-negative `i64`: the next 64-bit word with its sign bit cleared.
    pub fn next_i64(&mut self) -> i64 {
        (self.next_u64() & (u64::MAX >> 1)) as i64
    }

    /// Next non-negative `i32`: the next 32-bit word with its sign bit cleared.
    pub fn next_i32(&mut self) -> i32 {
        (self.next_u32() >> 1) as i32
    }

    /// Next non-negative native-width integer.
    ///
    /// Truncates the 64-bit word to the native width first, then clears the
    /// native sign bit, so the low bits agree across architectures.
    pub fn next_isize(&mut self) -> isize {
        (self.next_u64() as usize & (usize::MAX >> 1)) as isize
    }

    /// Uniform `f64` in `[0, 1)`: the high 53 bits of the next word.
    pub fn next_f64(&mut self) -> f64 {
        let sample = self.next_u64() >> 11;
        sample as f64 / (1u64 << 53) as f64
    }

    /// Uniform `f32` in `[0, 1)`: the high 24 bits of the next word.
    pub fn next_f32(&mut self) -> f32 {
        let sample = self.next_u64() >> 40;
        sample as f32 / (1u32 << 24) as f32
    }

    /// Uniform `u64` in `[0, upper_bound)` via threshold rejection.
    pub fn bounded_u64(&mut self, upper_bound: u64) -> Result<u64, RngError> {
        if upper_bound == 0 {
            return Err(RngError::InvalidUpperBound);
        }
        Ok(self.reject_u64(upper_bound))
    }

    /// Uniform `u32` in `[0, upper_bound)` via threshold rejection.
    pub fn bounded_u32(&mut self, upper_bound: u32) -> Result<u32, RngError> {
        if upper_bound == 0 {
            return Err(RngError::InvalidUpperBound);
        }
        let threshold = u32::MAX - u32::MAX % upper_bound;
        loop {
            let candidate = self.next_u32();
            if candidate < threshold {
                return Ok(candidate % upper_bound);
            }
        }
    }

    /// Uniform `i64` in `[0, upper_bound)`.
    pub fn bounded_i64(&mut self, upper_bound: i64) -> Result<i64, RngError> {
        if upper_bound <= 0 {
            return Err(RngError::InvalidUpperBound);
        }
        Ok(self.bounded_u64(upper_bound as u64)? as i64)
    }

    /// Uniform `i32` in `[0, upper_bound)`.
    pub fn bounded_i32(&mut self, upper_bound: i32) -> Result<i32, RngError> {
        if upper_bound <= 0 {
            return Err(RngError::InvalidUpperBound);
        }
        Ok(self.bounded_u32(upper_bound as u32)? as i32)
    }

    /// Uniform `usize` in `[0, upper_bound)`.
    ///
    /// Draws through the 64-bit path so the consumed stream positions match
    /// [`Self::bounded_u64`] exactly on every architecture.
    pub fn bounded_usize(&mut self, upper_bound: usize) -> Result<usize, RngError> {
        Ok(self.bounded_u64(upper_bound as u64)? as usize)
    }

    /// Uniform `isize` in `[0, upper_bound)`.
    pub fn bounded_isize(&mut self, upper_bound: isize) -> Result<isize, RngError> {
        if upper_bound <= 0 {
            return Err(RngError::InvalidUpperBound);
        }
        Ok(self.bounded_u64(upper_bound as u64)? as isize)
    }

    /// Random permutation of `0..n` by downward Fisher-Yates.
    ///
    /// `n == 0` yields an empty vector without consuming any stream words;
    /// `n == 1` yields `[0]`, likewise without consuming words.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut result: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = self.reject_u64((i + 1) as u64) as usize;
            result.swap(i, j);
        }
        result
    }

    /// Threshold rejection core. Callers guarantee `upper_bound >= 1`.
    fn reject_u64(&mut self, upper_bound: u64) -> u64 {
        let threshold = u64::MAX - u64::MAX % upper_bound;
        loop {
            let candidate = self.next_u64();
            if candidate < threshold {
                return candidate % upper_bound;
            }
        }
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(MIX_CONST1);
    x ^= x >> 27;
    x = x.wrapping_mul(MIX_CONST2);
    x ^ (x >> 31)
}
