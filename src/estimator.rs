//! Cardinality estimator allows to estimate number of distinct elements
//! in the stream or dataset using fixed memory of `M` one-byte registers:
//! - `M`: number of registers, must be a power of two in `[1..2^32]`.
//! - `P = log2(M)`: number of hash bits used for register indices.
//!
//! Expected relative error is `1.04 / sqrt(M)`:
//! - M = 1024: 3.25%
//! - M = 4096: 1.62%
//! - M = 16384: 0.81%
//!
//! Estimator consumes 32-bit hashes via `add` (usually produced by functions of
//! the [`murmur`](crate::murmur) module) or arbitrary hashable items via `insert`.
//!
//! # Estimation
//! Raw HyperLogLog estimate `alpha * M^2 / sum(2^-register)` is corrected at both ends of
//! the counting range:
//! - raw estimate `<= 5/2 * M` with zero registers present - linear counting `M * ln(M / zeros)`
//! - raw estimate `> 2^32 / 30` - large range correction `-2^32 * ln(1 - raw / 2^32)`
//!
//! # State capture
//! Registers can be read with `registers` and restored with `from_registers`,
//! which re-validates register count and register ranks.
//!
//! Estimator has no internal synchronization: share it behind a lock, or keep
//! one estimator per thread and `merge` them afterwards.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::size_of;

use tracing::{debug, trace};

use crate::error::{EstimatorError, Result};
use crate::hyperloglog::HyperLogLog;
use crate::murmur::Murmur3Hasher;

/// Maximum number of register index bits which can be taken from 32-bit hash
const MAX_PRECISION: u32 = 32;
/// Number of register index bits used by `Default`
const DEFAULT_PRECISION: u32 = 12;

pub struct CardinalityEstimator<H: Hasher + Default = Murmur3Hasher> {
    /// Registers and estimation state
    hll: HyperLogLog,
    /// Zero-sized build hasher used by `insert`
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> CardinalityEstimator<H> {
    /// Creates new instance of `CardinalityEstimator` with `m` zeroed registers.
    ///
    /// Fails with `InvalidConfiguration` unless `m` is a power of two not exceeding `2^32`.
    pub fn new(m: usize) -> Result<Self> {
        let precision = Self::precision_of(m)?;
        debug!(registers = m, precision, "created cardinality estimator");
        Ok(Self::from_hll(HyperLogLog::new(precision)))
    }

    /// Restores `CardinalityEstimator` from previously captured `registers`.
    ///
    /// Register count is validated the same way as in `new` and every register
    /// must not exceed maximum rank `32 - log2(m) + 1`.
    pub fn from_registers(registers: Vec<u8>) -> Result<Self> {
        let precision = Self::precision_of(registers.len())?;
        let max = HyperLogLog::max_rank(precision);
        if let Some(index) = registers.iter().position(|&r| r > max) {
            let value = registers[index];
            debug!(index, value, max, "rejected captured registers");
            return Err(EstimatorError::RegisterOutOfRange { index, value, max });
        }
        debug!(registers = registers.len(), precision, "restored cardinality estimator");
        Ok(Self::from_hll(HyperLogLog::from_registers(
            precision,
            registers.into_boxed_slice(),
        )))
    }

    #[inline]
    fn from_hll(hll: HyperLogLog) -> Self {
        Self {
            hll,
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Return number of index bits for valid register count `m`
    fn precision_of(m: usize) -> Result<u32> {
        if !m.is_power_of_two() || m.trailing_zeros() > MAX_PRECISION {
            debug!(registers = m, "rejected register count");
            return Err(EstimatorError::InvalidConfiguration { registers: m });
        }
        Ok(m.trailing_zeros())
    }

    /// Add 32-bit hash into `CardinalityEstimator`.
    ///
    /// Hash is expected to be uniformly distributed over 32-bit space, e.g. produced by `murmur32`.
    #[inline]
    pub fn add(&mut self, hash: u32) {
        self.hll.insert_hash(hash);
    }

    /// Insert a hashable item into `CardinalityEstimator` using lower 32 bits of its `H` hash
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        self.add(hasher.finish() as u32);
    }

    /// Return cardinality estimate
    #[inline]
    pub fn count(&self) -> u64 {
        self.hll.estimate()
    }

    /// Merge `rhs` registers into `self`, keeping per-register maximum.
    ///
    /// Fails with `MismatchedConfiguration` leaving `self` untouched when register counts differ.
    pub fn merge(&mut self, rhs: &Self) -> Result<()> {
        if self.hll.m() != rhs.hll.m() {
            debug!(lhs = self.hll.m(), rhs = rhs.hll.m(), "rejected merge");
            return Err(EstimatorError::MismatchedConfiguration {
                lhs: self.hll.m(),
                rhs: rhs.hll.m(),
            });
        }
        self.hll.merge(&rhs.hll);
        Ok(())
    }

    /// Zero all registers, reusing the same register storage
    #[inline]
    pub fn reset(&mut self) {
        trace!(registers = self.hll.m(), "reset cardinality estimator");
        self.hll.reset();
    }

    /// Return number of registers `m`
    #[inline]
    pub fn registers_count(&self) -> usize {
        self.hll.m()
    }

    /// Return number of hash bits used for register index, `log2(m)`
    #[inline]
    pub fn precision(&self) -> u32 {
        self.hll.precision()
    }

    /// Return bias correction constant
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.hll.alpha()
    }

    /// Return registers for state capture
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.hll.registers()
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<BuildHasherDefault<H>>() + self.hll.size_of()
    }
}

impl<H: Hasher + Default> Default for CardinalityEstimator<H> {
    fn default() -> Self {
        Self::from_hll(HyperLogLog::new(DEFAULT_PRECISION))
    }
}

impl<H: Hasher + Default> Clone for CardinalityEstimator<H> {
    fn clone(&self) -> Self {
        Self::from_hll(self.hll.clone())
    }
}

impl<H: Hasher + Default> PartialEq for CardinalityEstimator<H> {
    /// Compare cardinality estimators register-wise
    fn eq(&self, rhs: &Self) -> bool {
        self.hll.registers() == rhs.hll.registers()
    }
}

impl<H: Hasher + Default> Eq for CardinalityEstimator<H> {}

impl<H: Hasher + Default> Debug for CardinalityEstimator<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ registers: {}, estimate: {}, size: {} }}",
            self.registers_count(),
            self.count(),
            self.size_of()
        )
    }
}
