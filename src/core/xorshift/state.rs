use crate::seed::splitmix64;

/// Seed value substituted for zero before expansion.
pub const ZERO_SEED_REMAP: u64 = 0x2545_F491_4F6C_DD1D;

/// Marsaglia's reference state, used if seed expansion ever yields all zeros.
const FALLBACK: [u32; 4] = [123_456_789, 362_436_069, 521_288_629, 88_675_123];

/// 128-bit xorshift register.
///
/// Never all-zero: zero is a fixed point of [`State::step`], and the step is a
/// bijection on the remaining 2^128 - 1 states, so a non-zero state stays
/// non-zero forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl State {
    /// Expand a 64-bit seed into four words via two SplitMix64 outputs.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = if seed == 0 { ZERO_SEED_REMAP } else { seed };
        let a = splitmix64(&mut sm);
        let b = splitmix64(&mut sm);

        Self::from_words([a as u32, (a >> 32) as u32, b as u32, (b >> 32) as u32])
    }

    /// Load four words directly. An all-zero input is replaced by the
    /// reference state.
    pub fn from_words(words: [u32; 4]) -> Self {
        let [x, y, z, w] = if words == [0; 4] { FALLBACK } else { words };
        let state = Self { x, y, z, w };
        debug_assert!(!state.is_zero());
        state
    }

    #[cfg(test)]
    pub fn words(&self) -> [u32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn is_zero(&self) -> bool {
        (self.x | self.y | self.z | self.w) == 0
    }

    /// Advance one tick (Marsaglia xor128, shifts 11/8/19) and return the new word.
    #[inline]
    pub fn step(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }
}
