//! Linear categorical representation

use super::{bits_for_max, Representation};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::{bits_to_u64, u64_to_bits};

/// Choice among `c` categories numbered `0..c`
///
/// Uses `ceil(log2(c))` bits read as an unsigned integer. When `c` is not a
/// power of two, the codes past `c - 1` all decode to the last category, so
/// the mapping is total but not uniform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearCategorical {
    num_categories: usize,
    num_bits: usize,
}

impl LinearCategorical {
    /// Create a representation of `num_categories` categories
    pub fn new(num_categories: usize) -> EvoResult<Self> {
        if num_categories == 0 {
            return Err(EvolutionError::configuration(
                "a categorical representation needs at least one category",
            ));
        }
        Ok(Self {
            num_categories,
            num_bits: bits_for_max(num_categories as u64 - 1),
        })
    }

    /// Number of categories
    pub fn num_categories(&self) -> usize {
        self.num_categories
    }
}

impl Representation for LinearCategorical {
    type Value = usize;

    fn bit_width(&self) -> usize {
        self.num_bits
    }

    fn decode_unchecked(&self, bits: &[bool]) -> usize {
        let last = self.num_categories as u64 - 1;
        bits_to_u64(bits).min(last) as usize
    }

    fn encode(&self, value: &usize) -> EvoResult<Vec<bool>> {
        if *value >= self.num_categories {
            return Err(EvolutionError::configuration(format!(
                "category {value} is outside 0..{}",
                self.num_categories
            )));
        }
        let mut bits = vec![false; self.num_bits];
        u64_to_bits(*value as u64, &mut bits);
        Ok(bits)
    }
}

impl std::fmt::Display for LinearCategorical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} categories ({} bits)",
            self.num_categories, self.num_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width() {
        assert_eq!(LinearCategorical::new(1).unwrap().bit_width(), 0);
        assert_eq!(LinearCategorical::new(2).unwrap().bit_width(), 1);
        assert_eq!(LinearCategorical::new(4).unwrap().bit_width(), 2);
        assert_eq!(LinearCategorical::new(5).unwrap().bit_width(), 3);
        assert!(LinearCategorical::new(0).is_err());
    }

    #[test]
    fn test_decode() {
        let rep = LinearCategorical::new(4).unwrap();
        assert_eq!(rep.decode(&[true, true]).unwrap(), 3);
        assert_eq!(rep.decode(&[false, false]).unwrap(), 0);
        assert_eq!(rep.decode(&[true, false]).unwrap(), 2);
    }

    #[test]
    fn test_decode_saturates_to_last_category() {
        let rep = LinearCategorical::new(5).unwrap();
        assert_eq!(rep.decode(&[true, false, false]).unwrap(), 4);
        assert_eq!(rep.decode(&[true, false, true]).unwrap(), 4);
        assert_eq!(rep.decode(&[true, true, true]).unwrap(), 4);
    }

    #[test]
    fn test_single_category() {
        let rep = LinearCategorical::new(1).unwrap();
        assert_eq!(rep.decode(&[]).unwrap(), 0);
        assert!(rep.encode(&0).unwrap().is_empty());
    }

    #[test]
    fn test_encode() {
        let rep = LinearCategorical::new(5).unwrap();
        assert_eq!(rep.encode(&3).unwrap(), vec![false, true, true]);
        assert!(rep.encode(&5).is_err());
    }
}
