use thiserror::Error;

/// Rejected bounds passed to one of the bounded integer draws.
///
/// Raised before any word is drawn, so the generator's output sequence is
/// unaffected by the failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("upper bound must be positive, got {upper}")]
    UpperNotPositive { upper: i32 },

    #[error("upper bound {upper} must be greater than lower bound {lower}")]
    EmptyRange { lower: i32, upper: i32 },
}
