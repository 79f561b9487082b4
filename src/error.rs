use thiserror::Error;

/// Errors returned by `CardinalityEstimator` construction, restore and merge.
///
/// Both configuration variants indicate caller misuse; none of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// Requested register count is not a power of two in `[1..2^32]`.
    #[error("number of registers {registers} is not a power of two in [1..2^32]")]
    InvalidConfiguration { registers: usize },
    /// Estimators being merged have different register counts.
    #[error("number of registers doesn't match: {lhs} != {rhs}")]
    MismatchedConfiguration { lhs: usize, rhs: usize },
    /// Restored register holds a rank which can't be produced by a 32-bit hash.
    #[error("register {index} holds rank {value}, maximum reachable rank is {max}")]
    RegisterOutOfRange { index: usize, value: u8, max: u8 },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
