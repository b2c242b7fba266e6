use tracing::{debug, trace};

use crate::error::InvalidRangeError;
use crate::seed::{ClockSeedSource, SeedSource};
use crate::state::State;

const INCR_DOUBLE: f64 = 1.0 / (1u64 << 53) as f64;
const INCR_FLOAT: f32 = 1.0 / (1u32 << 24) as f32;

/// Xorshift128 generator with typed, bias-free output adapters.
///
/// Identical seeds give identical output sequences across every method.
/// Not thread safe by construction: each call mutates the state, so share an
/// instance only behind external synchronisation.
#[derive(Debug, Clone)]
pub struct XorShiftRandom {
    state: State,
    // Leftover bits for `next_bool`, consumed most significant first.
    bit_buffer: u32,
    bit_mask: u32,
    // Leftover bytes for `next_byte`, consumed least significant first.
    byte_buffer: u32,
    bytes_left: u32,
}

impl XorShiftRandom {
    /// Create a generator seeded from the process clock.
    pub fn new() -> Self {
        Self::from_seed_source(ClockSeedSource::new())
    }

    /// Create a generator with the given seed. Zero is a valid seed.
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, remapped = seed == 0, "seeding xorshift generator");
        Self {
            state: State::from_seed(seed),
            bit_buffer: 0,
            bit_mask: 0,
            byte_buffer: 0,
            bytes_left: 0,
        }
    }

    /// Create a generator with a seed drawn from `source`.
    pub fn from_seed_source<S: SeedSource>(mut source: S) -> Self {
        let seed = source.next_seed();
        debug!(source = source.name(), "drew generator seed");
        Self::with_seed(seed)
    }

    pub(crate) fn from_state(state: State) -> Self {
        Self {
            state,
            bit_buffer: 0,
            bit_mask: 0,
            byte_buffer: 0,
            bytes_left: 0,
        }
    }

    /// Reinitialise in place, exactly as `with_seed(seed)` would.
    pub fn reseed(&mut self, seed: u64) {
        trace!(seed, "reseeding xorshift generator");
        *self = Self::with_seed(seed);
    }

    // ========================================================================
    // Integer draws
    // ========================================================================

    /// Uniform value in `[0, i32::MAX)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> i32 {
        loop {
            let v = self.state.step() & 0x7FFF_FFFF;
            if v != 0x7FFF_FFFF {
                return v as i32;
            }
        }
    }

    /// Uniform value in `[0, upper)`.
    pub fn next_below(&mut self, upper: i32) -> Result<i32, InvalidRangeError> {
        if upper <= 0 {
            return Err(InvalidRangeError::UpperNotPositive { upper });
        }
        Ok(self.bounded(upper as u32) as i32)
    }

    /// Uniform value in `[lower, upper)`. The span may cover almost all of
    /// `i32`, up to 2^32 - 1 values.
    pub fn next_range(&mut self, lower: i32, upper: i32) -> Result<i32, InvalidRangeError> {
        if upper <= lower {
            return Err(InvalidRangeError::EmptyRange { lower, upper });
        }
        let width = (i64::from(upper) - i64::from(lower)) as u32;
        let offset = i64::from(self.bounded(width));
        Ok((i64::from(lower) + offset) as i32)
    }

    /// Raw 32-bit word.
    #[inline]
    pub fn next_uint(&mut self) -> u32 {
        self.state.step()
    }

    /// Uniform value in `[0, i32::MAX]`.
    pub fn next_int(&mut self) -> i32 {
        (self.state.step() & 0x7FFF_FFFF) as i32
    }

    /// Two raw words, the first in the high half.
    pub fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.state.step());
        let lo = u64::from(self.state.step());
        (hi << 32) | lo
    }

    /// Uniform in `[0, width)` by threshold rejection; `width` must be non-zero.
    ///
    /// Words below `2^32 mod width` are redrawn so that every residue is hit by
    /// the same number of accepted words.
    fn bounded(&mut self, width: u32) -> u32 {
        let threshold = width.wrapping_neg() % width;
        loop {
            let r = self.state.step();
            if r >= threshold {
                return r % width;
            }
        }
    }

    // ========================================================================
    // Floating point draws
    // ========================================================================

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub fn next_double(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * INCR_DOUBLE
    }

    /// Uniform in `(0, 1)`.
    pub fn next_double_non_zero(&mut self) -> f64 {
        loop {
            let d = self.next_double();
            if d != 0.0 {
                return d;
            }
        }
    }

    /// Uniform in `[0, 1)` with 24 bits of precision.
    pub fn next_float(&mut self) -> f32 {
        (self.state.step() >> 8) as f32 * INCR_FLOAT
    }

    // ========================================================================
    // Bits and bytes
    // ========================================================================

    pub fn next_bool(&mut self) -> bool {
        if self.bit_mask == 0 {
            self.bit_buffer = self.state.step();
            self.bit_mask = 1 << 31;
        }
        let bit = self.bit_buffer & self.bit_mask != 0;
        self.bit_mask >>= 1;
        bit
    }

    pub fn next_byte(&mut self) -> u8 {
        if self.bytes_left == 0 {
            self.byte_buffer = self.state.step();
            self.bytes_left = 4;
        }
        let b = self.byte_buffer as u8;
        self.byte_buffer >>= 8;
        self.bytes_left -= 1;
        b
    }

    /// Fill `buffer` with random bytes, four little-endian bytes per word.
    /// A trailing partial chunk takes the low bytes of one more word.
    pub fn next_bytes(&mut self, buffer: &mut [u8]) {
        let mut chunks = buffer.chunks_exact_mut(4);
        for chunk in chunks.by_ref() {
            chunk.copy_from_slice(&self.state.step().to_le_bytes());
        }

        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let word = self.state.step().to_le_bytes();
            let n = tail.len();
            tail.copy_from_slice(&word[..n]);
        }
    }
}

impl Default for XorShiftRandom {
    fn default() -> Self {
        Self::new()
    }
}
