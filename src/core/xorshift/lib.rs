//! Xorshift128 pseudo-random number generator with bias-free range adapters.
//!
//! The generator is not cryptographically secure. Each instance owns its state
//! exclusively; give every thread its own instance seeded with a distinct value.

mod error;
mod generator;
mod rng_core;
mod seed;
mod state;

pub use error::*;
pub use generator::*;
pub use seed::*;
pub use state::ZERO_SEED_REMAP;
