//! `hll-murmur` estimates the number of distinct elements in a stream or dataset using memory
//! bounded by a fixed number of HyperLogLog registers, independent of the stream length.
//!
//! Elements are hashed into uniformly distributed 32-bit values, either explicitly with one
//! of the Murmur3 x86_32 functions of the [`murmur`] module and fed through
//! [`CardinalityEstimator::add`], or implicitly via [`CardinalityEstimator::insert`].
//!
//! ```
//! use hll_murmur::{murmur_str, CardinalityEstimator};
//!
//! let mut lhs = CardinalityEstimator::<hll_murmur::Murmur3Hasher>::new(1024).unwrap();
//! let mut rhs = lhs.clone();
//! lhs.add(murmur_str("alice"));
//! rhs.add(murmur_str("bob"));
//! lhs.merge(&rhs).unwrap();
//! assert_eq!(lhs.count(), 2);
//! ```
pub mod error;
pub mod estimator;
mod hyperloglog;
pub mod murmur;
#[cfg(feature = "with_serde")]
mod serde;

pub use error::{EstimatorError, Result};
pub use estimator::CardinalityEstimator;
pub use murmur::{murmur128, murmur32, murmur64, murmur_bytes, murmur_str, Murmur3Hasher};
