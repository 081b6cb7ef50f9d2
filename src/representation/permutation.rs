//! Permutation representation

use super::{bits_for_max, Representation};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::{bits_to_u64, u64_to_bits};
use crate::genome::permutation::Permutation;

/// Widest bit group a single Lehmer digit may use
const MAX_DIGIT_BITS: usize = 63;

/// Permutation of `0..n` decoded as a Lehmer code
///
/// Elements are placed one at a time. While `m >= 2` elements remain
/// unplaced, a group of `ceil(log2(m)) + extra_bits` bits is read as an
/// unsigned integer and reduced modulo `m` to pick the next element from the
/// remaining ones in increasing order. The last element needs no bits.
///
/// Extra bits make the modular reduction closer to uniform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationRepresentation {
    length: usize,
    extra_bits: usize,
    digit_widths: Vec<usize>,
}

impl PermutationRepresentation {
    /// Create a representation of permutations of `0..length`
    pub fn new(length: usize, extra_bits: usize) -> EvoResult<Self> {
        if length == 0 {
            return Err(EvolutionError::configuration(
                "a permutation representation needs a positive length",
            ));
        }
        let digit_widths: Vec<usize> = (2..=length)
            .rev()
            .map(|m| bits_for_max(m as u64 - 1) + extra_bits)
            .collect();
        if digit_widths.iter().any(|&w| w > MAX_DIGIT_BITS) {
            return Err(EvolutionError::configuration(format!(
                "{extra_bits} extra bits per element is too many, digits are limited to {MAX_DIGIT_BITS} bits"
            )));
        }
        Ok(Self {
            length,
            extra_bits,
            digit_widths,
        })
    }

    /// Number of permuted elements
    pub fn length(&self) -> usize {
        self.length
    }

    /// Extra bits added to each digit
    pub fn extra_bits(&self) -> usize {
        self.extra_bits
    }
}

impl Representation for PermutationRepresentation {
    type Value = Permutation;

    fn bit_width(&self) -> usize {
        self.digit_widths.iter().sum()
    }

    fn decode_unchecked(&self, bits: &[bool]) -> Permutation {
        let mut code = Vec::with_capacity(self.length);
        let mut start = 0;
        for &width in &self.digit_widths {
            code.push(bits_to_u64(&bits[start..start + width]) as usize);
            start += width;
        }
        code.push(0);
        Permutation::from_lehmer_code(&code)
    }

    fn encode(&self, value: &Permutation) -> EvoResult<Vec<bool>> {
        if value.len() != self.length {
            return Err(EvolutionError::configuration(format!(
                "permutation of {} elements given to a representation of {}",
                value.len(),
                self.length
            )));
        }
        let mut bits = vec![false; self.bit_width()];
        let mut start = 0;
        for (&digit, &width) in value.lehmer_code().iter().zip(&self.digit_widths) {
            u64_to_bits(digit as u64, &mut bits[start..start + width]);
            start += width;
        }
        Ok(bits)
    }
}

impl std::fmt::Display for PermutationRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "permutation of {} elements ({} bits)",
            self.length,
            self.bit_width()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width() {
        // Digits for m = 4, 3, 2 use 2, 2, 1 bits
        assert_eq!(PermutationRepresentation::new(4, 0).unwrap().bit_width(), 5);
        assert_eq!(PermutationRepresentation::new(4, 2).unwrap().bit_width(), 11);
        assert_eq!(PermutationRepresentation::new(1, 3).unwrap().bit_width(), 0);
        assert!(PermutationRepresentation::new(0, 0).is_err());
        assert!(PermutationRepresentation::new(4, 62).is_err());
    }

    #[test]
    fn test_decode_all_zeros_is_identity() {
        let rep = PermutationRepresentation::new(4, 0).unwrap();
        let p = rep.decode(&[false; 5]).unwrap();
        assert_eq!(p, Permutation::identity(4));
    }

    #[test]
    fn test_decode() {
        let rep = PermutationRepresentation::new(3, 0).unwrap();
        // Digits: 2 bits for m = 3, 1 bit for m = 2
        let p = rep.decode(&[true, false, false]).unwrap();
        assert_eq!(p.as_slice(), &[2, 0, 1]);

        // 3 mod 3 == 0, then 1
        let p = rep.decode(&[true, true, true]).unwrap();
        assert_eq!(p.as_slice(), &[0, 2, 1]);
    }

    #[test]
    fn test_single_element() {
        let rep = PermutationRepresentation::new(1, 0).unwrap();
        assert_eq!(rep.decode(&[]).unwrap(), Permutation::identity(1));
    }

    #[test]
    fn test_encode() {
        let rep = PermutationRepresentation::new(4, 1).unwrap();
        let p = Permutation::try_new(vec![3, 1, 0, 2]).unwrap();
        let bits = rep.encode(&p).unwrap();
        assert_eq!(bits.len(), rep.bit_width());
        assert_eq!(rep.decode(&bits).unwrap(), p);
        assert!(rep.encode(&Permutation::identity(3)).is_err());
    }
}
