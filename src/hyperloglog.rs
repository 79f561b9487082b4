//! ## HyperLogLog registers
//! Fixed array of `M = 2^P` one-byte registers, each holding the maximum rank observed
//! for its bucket, plus the estimation math turning register state into cardinality.
//!
//! A 32-bit hash is split into:
//! - top `P` bits      - register index
//! - low `32 - P` bits - left aligned and used to compute rank (1-based position of leftmost set bit)
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)

use std::mem::{size_of, size_of_val};

/// 2^32, size of the hash space
const EXP32: f64 = 4_294_967_296.0;

#[derive(Clone, PartialEq)]
pub(crate) struct HyperLogLog {
    /// Number of hash bits used for register index
    precision: u32,
    /// Bias correction constant for `M` registers
    alpha: f64,
    /// Register ranks, length is always `2^precision`
    registers: Box<[u8]>,
}

impl HyperLogLog {
    /// Create new instance of `HyperLogLog` with `2^precision` zeroed registers.
    /// Caller must ensure that `precision` is at most 32.
    #[inline]
    pub(crate) fn new(precision: u32) -> Self {
        Self::from_registers(precision, vec![0u8; 1 << precision].into_boxed_slice())
    }

    /// Create new instance of `HyperLogLog` from already validated registers
    #[inline]
    pub(crate) fn from_registers(precision: u32, registers: Box<[u8]>) -> Self {
        Self {
            precision,
            alpha: alpha(registers.len()),
            registers,
        }
    }

    /// Number of registers
    #[inline]
    pub(crate) fn m(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub(crate) fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub(crate) fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub(crate) fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Maximum rank reachable with `precision` index bits
    #[inline]
    pub(crate) fn max_rank(precision: u32) -> u8 {
        (32 - precision + 1) as u8
    }

    /// Insert 32-bit hash into registers
    #[inline]
    pub(crate) fn insert_hash(&mut self, hash: u32) {
        let k = 32 - self.precision;
        // shifts by full width are only possible for `P = 0` and `P = 32`
        let idx = hash.checked_shr(k).unwrap_or(0) as usize;
        let rank = rho(hash.checked_shl(self.precision).unwrap_or(0), k);
        let register = &mut self.registers[idx];
        if rank > *register {
            *register = rank;
        }
    }

    /// Return cardinality estimate with small and large range corrections applied
    pub(crate) fn estimate(&self) -> u64 {
        let m = self.m() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 2.0f64.powi(-i32::from(r)))
            .sum();
        let mut estimate = self.alpha * m * m / sum;

        if estimate <= 5.0 / 2.0 * m {
            // small range correction (linear counting)
            let zeros = self.registers.iter().filter(|&&r| r == 0).count();
            if zeros > 0 {
                estimate = m * (m / zeros as f64).ln();
            }
        } else if estimate > 1.0 / 30.0 * EXP32 {
            // large range correction, undefined once raw estimate covers whole hash space
            if estimate >= EXP32 {
                return u64::MAX;
            }
            estimate = -EXP32 * (1.0 - estimate / EXP32).ln();
        }

        estimate as u64
    }

    /// Merge two `HyperLogLog` instances with equal number of registers.
    #[inline]
    pub(crate) fn merge(&mut self, rhs: &HyperLogLog) {
        debug_assert_eq!(self.m(), rhs.m());
        for (lhs_rank, &rhs_rank) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            if rhs_rank > *lhs_rank {
                *lhs_rank = rhs_rank;
            }
        }
    }

    /// Zero all registers reusing existing allocation
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.registers.fill(0);
    }

    /// Return memory size of `HyperLogLog`
    #[inline]
    pub(crate) fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Position of the leftmost set bit of `w` scanning at most `k` bits, `k + 1` if none is set.
#[inline]
fn rho(mut w: u32, k: u32) -> u8 {
    let mut r = 1;
    while w & 0x8000_0000 == 0 && r <= k {
        r += 1;
        w <<= 1;
    }
    r as u8
}
