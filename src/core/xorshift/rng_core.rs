use rand::{Error, RngCore, SeedableRng};

use crate::generator::XorShiftRandom;
use crate::state::State;

impl RngCore for XorShiftRandom {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.next_uint()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        XorShiftRandom::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.next_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.next_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShiftRandom {
    type Seed = [u8; 16];

    /// Loads the four state words little-endian. An all-zero seed goes through
    /// the same remap as `with_seed(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        if seed == [0; 16] {
            return XorShiftRandom::with_seed(0);
        }
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        XorShiftRandom::from_state(State::from_words(words))
    }

    fn seed_from_u64(state: u64) -> Self {
        XorShiftRandom::with_seed(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::seq::SliceRandom;

    #[test]
    fn test_rng_core_matches_inherent() {
        let mut a = XorShiftRandom::seed_from_u64(42);
        let mut b = XorShiftRandom::with_seed(42);

        assert_eq!(RngCore::next_u32(&mut a), b.next_uint());
        assert_eq!(RngCore::next_u64(&mut a), b.next_u64());

        let mut x = [0u8; 11];
        let mut y = [0u8; 11];
        a.fill_bytes(&mut x);
        b.next_bytes(&mut y);
        assert_eq!(x, y);

        assert!(a.try_fill_bytes(&mut x).is_ok());
    }

    #[test]
    fn test_from_seed_words() {
        let mut seed = [0u8; 16];
        seed[12] = 1;
        let mut rng = XorShiftRandom::from_seed(seed);
        let mut expected = XorShiftRandom::from_state(State::from_words([0, 0, 0, 1]));
        for _ in 0..10 {
            assert_eq!(rng.next_uint(), expected.next_uint());
        }

        let mut zero = XorShiftRandom::from_seed([0; 16]);
        let mut remapped = XorShiftRandom::with_seed(0);
        for _ in 0..10 {
            assert_eq!(zero.next_uint(), remapped.next_uint());
        }
    }

    #[test]
    fn test_drives_rand_api() {
        let mut rng = XorShiftRandom::seed_from_u64(7);

        for _ in 0..1000 {
            let v: u32 = rng.gen_range(10..20);
            assert!((10..20).contains(&v));
        }

        let mut items: Vec<u32> = (0..50).collect();
        items.shuffle(&mut rng);
        items.sort_unstable();
        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }
}
