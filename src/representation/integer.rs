//! Dyadic integer representation

use tracing::warn;

use super::{bits_for_max, Representation};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::{bits_to_u64, u64_to_bits};

/// Widest range, in bits, an integer representation accepts
pub const MAX_INTEGER_BITS: usize = 62;

/// Integer in `[lower, upper]` read as an unsigned binary offset from `lower`
///
/// The complete width is `ceil(log2(upper - lower + 1))`. With fewer bits,
/// the decoded offset is shifted left by the missing bits, so only a coarser
/// grid of the range is reachable. Offsets beyond `upper - lower` saturate
/// to `upper`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DyadicInteger {
    lower: i64,
    upper: i64,
    num_bits: usize,
    complete_bits: usize,
}

impl DyadicInteger {
    /// Create a representation with a requested number of bits
    ///
    /// A width above the complete width is reduced to it. A width below it
    /// is kept, with a warning about the lost resolution.
    pub fn new(lower: i64, upper: i64, num_bits: usize) -> EvoResult<Self> {
        if num_bits == 0 {
            return Err(EvolutionError::configuration(
                "an integer representation needs at least one bit",
            ));
        }
        let complete_bits = Self::complete_width(lower, upper)?;
        if num_bits < complete_bits {
            warn!(
                lower,
                upper,
                num_bits,
                complete_bits,
                "integer representation cannot reach every value of its range"
            );
        }
        Ok(Self {
            lower,
            upper,
            num_bits: num_bits.min(complete_bits),
            complete_bits,
        })
    }

    /// Create a representation using exactly the complete width
    pub fn exact(lower: i64, upper: i64) -> EvoResult<Self> {
        let complete_bits = Self::complete_width(lower, upper)?;
        Ok(Self {
            lower,
            upper,
            num_bits: complete_bits,
            complete_bits,
        })
    }

    /// Create a representation that refuses widths too small for the range
    pub fn strict(lower: i64, upper: i64, num_bits: usize) -> EvoResult<Self> {
        let complete_bits = Self::complete_width(lower, upper)?;
        if num_bits < complete_bits {
            return Err(EvolutionError::configuration(format!(
                "{num_bits} bits cannot represent [{lower}, {upper}], {complete_bits} are needed"
            )));
        }
        Ok(Self {
            lower,
            upper,
            num_bits: complete_bits,
            complete_bits,
        })
    }

    fn complete_width(lower: i64, upper: i64) -> EvoResult<usize> {
        if lower >= upper {
            return Err(EvolutionError::configuration(format!(
                "integer lower bound {lower} must be below upper bound {upper}"
            )));
        }
        let span = i128::from(upper) - i128::from(lower);
        let width = u64::try_from(span)
            .map(bits_for_max)
            .unwrap_or(u64::BITS as usize);
        if width > MAX_INTEGER_BITS {
            return Err(EvolutionError::configuration(format!(
                "integer range [{lower}, {upper}] needs {width} bits, at most {MAX_INTEGER_BITS} are supported"
            )));
        }
        Ok(width)
    }

    /// Lower bound (inclusive)
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper bound (inclusive)
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Whether every integer of the range can be decoded
    pub fn is_complete(&self) -> bool {
        self.num_bits == self.complete_bits
    }

    fn span(&self) -> u64 {
        // Bounded by 2^62 at construction.
        (self.upper - self.lower) as u64
    }

    fn shift(&self) -> usize {
        self.complete_bits - self.num_bits
    }
}

impl Representation for DyadicInteger {
    type Value = i64;

    fn bit_width(&self) -> usize {
        self.num_bits
    }

    fn decode_unchecked(&self, bits: &[bool]) -> i64 {
        let offset = (bits_to_u64(bits) << self.shift()).min(self.span());
        self.lower + offset as i64
    }

    fn encode(&self, value: &i64) -> EvoResult<Vec<bool>> {
        if *value < self.lower || *value > self.upper {
            return Err(EvolutionError::configuration(format!(
                "{value} is outside [{}, {}]",
                self.lower, self.upper
            )));
        }
        let shift = self.shift();
        let offset = (*value - self.lower) as u64;
        let mut code = offset >> shift;
        // `upper` off the grid is only reachable through saturation
        if offset == self.span() && code << shift < offset && code + 1 < 1u64 << self.num_bits {
            code += 1;
        }
        let mut bits = vec![false; self.num_bits];
        u64_to_bits(code, &mut bits);
        Ok(bits)
    }
}

impl std::fmt::Display for DyadicInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] ({} bits)",
            self.lower, self.upper, self.num_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_width() {
        assert_eq!(DyadicInteger::exact(0, 1).unwrap().bit_width(), 1);
        assert_eq!(DyadicInteger::exact(0, 3).unwrap().bit_width(), 2);
        assert_eq!(DyadicInteger::exact(0, 4).unwrap().bit_width(), 3);
        assert_eq!(DyadicInteger::exact(-10, 10).unwrap().bit_width(), 5);
    }

    #[test]
    fn test_requested_width_is_capped() {
        let rep = DyadicInteger::new(0, 3, 10).unwrap();
        assert_eq!(rep.bit_width(), 2);
        assert!(rep.is_complete());
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(DyadicInteger::new(5, 5, 3).is_err());
        assert!(DyadicInteger::new(6, 5, 3).is_err());
        assert!(DyadicInteger::new(0, 5, 0).is_err());
        assert!(DyadicInteger::exact(i64::MIN, i64::MAX).is_err());
    }

    #[test]
    fn test_decode_exact() {
        let rep = DyadicInteger::exact(-2, 1).unwrap();
        assert_eq!(rep.decode(&[false, false]).unwrap(), -2);
        assert_eq!(rep.decode(&[false, true]).unwrap(), -1);
        assert_eq!(rep.decode(&[true, false]).unwrap(), 0);
        assert_eq!(rep.decode(&[true, true]).unwrap(), 1);
    }

    #[test]
    fn test_decode_saturates() {
        // Range of 5 values over 3 bits, codes 5..7 collapse to upper
        let rep = DyadicInteger::exact(10, 14).unwrap();
        assert_eq!(rep.decode(&[true, false, false]).unwrap(), 14);
        assert_eq!(rep.decode(&[true, true, true]).unwrap(), 14);
        assert_eq!(rep.decode(&[false, true, true]).unwrap(), 13);
    }

    #[test]
    fn test_decode_reduced_width() {
        // 4 complete bits, 2 kept: offsets 0, 4, 8, 12
        let rep = DyadicInteger::new(0, 15, 2).unwrap();
        assert!(!rep.is_complete());
        assert_eq!(rep.decode(&[false, true]).unwrap(), 4);
        assert_eq!(rep.decode(&[true, true]).unwrap(), 12);
    }

    #[test]
    fn test_strict_rejects_insufficient_width() {
        assert!(DyadicInteger::strict(0, 15, 2).is_err());
        assert_eq!(DyadicInteger::strict(0, 15, 8).unwrap().bit_width(), 4);
    }

    #[test]
    fn test_encode() {
        let rep = DyadicInteger::exact(-2, 1).unwrap();
        assert_eq!(rep.encode(&0).unwrap(), vec![true, false]);
        assert!(rep.encode(&2).is_err());

        let coarse = DyadicInteger::new(0, 15, 2).unwrap();
        assert_eq!(coarse.encode(&13).unwrap(), vec![true, true]);

        // Grid 0, 2, .., 8 plus the saturated upper bound
        let saturating = DyadicInteger::new(0, 9, 3).unwrap();
        let bits = saturating.encode(&9).unwrap();
        assert_eq!(saturating.decode(&bits).unwrap(), 9);
        assert_eq!(saturating.decode(&saturating.encode(&7).unwrap()).unwrap(), 6);
    }

    #[test]
    fn test_display() {
        let rep = DyadicInteger::exact(0, 7).unwrap();
        assert_eq!(rep.to_string(), "[0, 7] (3 bits)");
    }
}
