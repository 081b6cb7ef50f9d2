//! Bit string genome
//!
//! This module provides the fixed-length bit vector every algorithm and
//! function in the crate works on.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EvolutionError;

/// Fixed-length bit string
///
/// The length is fixed at creation; contents are mutable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    /// The bits of this genome
    bits: Vec<bool>,
}

impl BitString {
    /// Create a new bit string with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros bit string of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones bit string of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Sample a uniformly random bit string
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen()).collect(),
        }
    }

    /// Resample every bit in place
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for bit in &mut self.bits {
            *bit = rng.gen();
        }
    }

    /// Create a bit string from the `length` low-order bits of `value`,
    /// most significant bit first
    pub fn from_u64(value: u64, length: usize) -> Self {
        assert!(length <= 64, "Length must be <= 64 for u64 conversion");
        let bits = (0..length)
            .map(|i| (value >> (length - 1 - i)) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Convert to a u64, most significant bit first (only valid for length <= 64)
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(bits_to_u64(&self.bits))
    }

    /// Get the length of the bit string
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get the bits as a slice
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Get the bits as a mutable slice
    pub fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Count the number of true bits (ones)
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Count the number of false bits (zeros)
    pub fn count_zeros(&self) -> usize {
        self.bits.len() - self.count_ones()
    }

    /// Hamming distance to another bit string
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Copy the bits of `other` into `self`, keeping the allocation
    pub fn copy_from(&mut self, other: &Self) -> Result<(), EvolutionError> {
        if self.bits.len() != other.bits.len() {
            return Err(EvolutionError::SizeMismatch {
                expected: self.bits.len(),
                actual: other.bits.len(),
            });
        }
        self.bits.copy_from_slice(&other.bits);
        Ok(())
    }
}

/// Interpret a bit slice as an unsigned integer, most significant bit first
///
/// Slices longer than 64 bits keep only the 64 trailing bits.
pub fn bits_to_u64(bits: &[bool]) -> u64 {
    bits.iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Write the `bits.len()` low-order bits of `value` into `bits`, most
/// significant bit first
pub fn u64_to_bits(value: u64, bits: &mut [bool]) {
    let n = bits.len();
    for (i, bit) in bits.iter_mut().enumerate() {
        let shift = n - 1 - i;
        *bit = shift < 64 && (value >> shift) & 1 == 1;
    }
}

impl std::ops::Index<usize> for BitString {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<BitString> for Vec<bool> {
    fn from(genome: BitString) -> Self {
        genome.bits
    }
}

impl<const N: usize> From<[bool; N]> for BitString {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl<'a> IntoIterator for &'a BitString {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = EvolutionError;

    /// Parse a string of `0` and `1` characters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(EvolutionError::configuration(format!(
                    "invalid bit character {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Generator;

    #[test]
    fn test_bit_string_new() {
        let bs = BitString::new(vec![true, false, true]);
        assert_eq!(bs.len(), 3);
        assert_eq!(bs.bits(), &[true, false, true]);
    }

    #[test]
    fn test_bit_string_zeros_ones() {
        let bs = BitString::zeros(5);
        assert_eq!(bs.count_ones(), 0);
        assert_eq!(bs.count_zeros(), 5);

        let bs = BitString::ones(5);
        assert_eq!(bs.count_ones(), 5);
        assert_eq!(bs.count_zeros(), 0);
    }

    #[test]
    fn test_bit_string_from_u64_msb_first() {
        let bs = BitString::from_u64(0b101, 4);
        assert_eq!(bs.bits(), &[false, true, false, true]);
        assert_eq!(bs.to_u64(), Some(0b101));

        let long_bs = BitString::zeros(100);
        assert_eq!(long_bs.to_u64(), None);
    }

    #[test]
    fn test_bits_to_u64() {
        assert_eq!(bits_to_u64(&[]), 0);
        assert_eq!(bits_to_u64(&[true, true]), 3);
        assert_eq!(bits_to_u64(&[true, false, false]), 4);

        let mut bits = [false; 3];
        u64_to_bits(6, &mut bits);
        assert_eq!(bits, [true, true, false]);
    }

    #[test]
    fn test_bit_string_get_set_flip() {
        let mut bs = BitString::zeros(3);
        assert_eq!(bs.get(0), Some(false));
        assert_eq!(bs.get(3), None);

        bs.set(1, true);
        assert_eq!(bs.get(1), Some(true));

        bs.flip(1);
        bs.flip(2);
        assert_eq!(bs.bits(), &[false, false, true]);
    }

    #[test]
    fn test_bit_string_hamming_distance() {
        let bs1 = BitString::new(vec![true, false, true, false]);
        let bs2 = BitString::new(vec![true, true, false, false]);
        assert_eq!(bs1.hamming_distance(&bs2), 2);
    }

    #[test]
    fn test_bit_string_copy_from() {
        let mut a = BitString::zeros(3);
        a.copy_from(&BitString::ones(3)).unwrap();
        assert_eq!(a, BitString::ones(3));
        assert!(a.copy_from(&BitString::ones(4)).is_err());
    }

    #[test]
    fn test_bit_string_random_is_seeded() {
        let mut rng = Generator::seeded(3);
        let a = BitString::random(64, &mut rng);
        rng.set_seed(Some(3));
        let b = BitString::random(64, &mut rng);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_bit_string_display_and_parse() {
        let bs = BitString::new(vec![true, false, true, true]);
        assert_eq!(format!("{}", bs), "1011");
        assert_eq!("1011".parse::<BitString>().unwrap(), bs);
        assert!("10x1".parse::<BitString>().is_err());
    }

    #[test]
    fn test_bit_string_from_array() {
        let bs: BitString = [true, false, true].into();
        assert!(bs[0]);
        assert!(!bs[1]);
    }

    #[test]
    fn test_bit_string_serialization() {
        let bs = BitString::new(vec![true, false, true]);
        let serialized = serde_json::to_string(&bs).unwrap();
        let deserialized: BitString = serde_json::from_str(&serialized).unwrap();
        assert_eq!(bs, deserialized);
    }
}
