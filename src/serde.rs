//! # Serde module for CardinalityEstimator
//!
//! `CardinalityEstimator` is serialized as a tuple `(m, registers)`, where `m` is the number
//! of registers and `registers` holds one rank per register.
//!
//! Deserialization restores the estimator through `CardinalityEstimator::from_registers`, so
//! register count and every register rank are validated again. A tuple whose `m` doesn't match
//! the number of registers is rejected as well.
//!
//! The data format itself is left to the caller's serializer.
use std::hash::Hasher;

use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::estimator::CardinalityEstimator;

impl<H: Hasher + Default> Serialize for CardinalityEstimator<H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.registers_count())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de, H: Hasher + Default> Deserialize<'de> for CardinalityEstimator<H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (m, registers): (usize, Vec<u8>) = Deserialize::deserialize(deserializer)?;
        if m != registers.len() {
            return Err(Error::custom(format!(
                "number of registers {} doesn't match {} stored registers",
                m,
                registers.len()
            )));
        }
        Self::from_registers(registers).map_err(D::Error::custom)
    }
}
