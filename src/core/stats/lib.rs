//! Descriptive statistics and uniformity checks for sampled generator output.

mod moments;
mod quantile;
mod uniformity;

pub use moments::*;
pub use quantile::*;
pub use uniformity::*;
