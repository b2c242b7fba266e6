//! Xorshift128 random number generation and the statistics used to validate it.
//!
//! ```
//! use xorand::XorShiftRandom;
//!
//! let mut rng = XorShiftRandom::with_seed(42);
//! let die = rng.next_range(1, 7).unwrap();
//! assert!((1..7).contains(&die));
//!
//! let mut buf = [0u8; 10];
//! rng.next_bytes(&mut buf);
//!
//! assert!(rng.next_below(0).is_err());
//! ```

pub use stats;
pub use xorshift;

pub use xorshift::{
    ClockSeedSource, FixedSeedSource, InvalidRangeError, SeedSource, XorShiftRandom,
};
