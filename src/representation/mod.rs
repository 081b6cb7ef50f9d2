//! Bit-level representations of typed variables
//!
//! A representation reads a fixed-width slice of a [`BitString`] and turns it
//! into one typed value. Every representation is total: each bit pattern of
//! the right width decodes to a value inside the representation's domain.
//!
//! Within a slice, bit 0 is the most significant bit.
//!
//! [`BitString`]: crate::genome::bit_string::BitString

pub mod categorical;
pub mod complex;
pub mod config;
pub mod float;
pub mod integer;
pub mod permutation;
pub mod set;

use crate::error::{EvoResult, EvolutionError};

/// Decoding rule from a fixed-width bit slice to a typed value
pub trait Representation {
    /// Type of the decoded value
    type Value;

    /// Number of bits consumed by one value
    ///
    /// Derived from the configuration only and constant afterwards.
    fn bit_width(&self) -> usize;

    /// Decode a slice whose length is already known to equal [`bit_width`]
    ///
    /// [`bit_width`]: Representation::bit_width
    fn decode_unchecked(&self, bits: &[bool]) -> Self::Value;

    /// Encode a value back into bits
    ///
    /// Values outside the domain are a configuration error. Values that fall
    /// between two representable points map to the lower one.
    fn encode(&self, value: &Self::Value) -> EvoResult<Vec<bool>>;

    /// Decode a slice, checking its length
    fn decode(&self, bits: &[bool]) -> EvoResult<Self::Value> {
        check_width(self.bit_width(), bits.len())?;
        Ok(self.decode_unchecked(bits))
    }
}

pub(crate) fn check_width(expected: usize, actual: usize) -> EvoResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvolutionError::configuration(format!(
            "slice of {actual} bits given to a representation of {expected} bits"
        )))
    }
}

/// Number of bits needed to write every integer in `0..=max`
pub(crate) fn bits_for_max(max: u64) -> usize {
    (u64::BITS - max.leading_zeros()) as usize
}

/// Single boolean variable, one bit wide
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Boolean;

impl Representation for Boolean {
    type Value = bool;

    fn bit_width(&self) -> usize {
        1
    }

    fn decode_unchecked(&self, bits: &[bool]) -> bool {
        bits[0]
    }

    fn encode(&self, value: &bool) -> EvoResult<Vec<bool>> {
        Ok(vec![*value])
    }
}

pub mod prelude {
    pub use super::categorical::*;
    pub use super::complex::*;
    pub use super::config::*;
    pub use super::float::*;
    pub use super::integer::*;
    pub use super::permutation::*;
    pub use super::set::*;
    pub use super::{Boolean, Representation};
}
