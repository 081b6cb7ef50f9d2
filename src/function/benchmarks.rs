//! Benchmark functions
//!
//! Classic pseudo-boolean functions with known optima, plus a bi-objective
//! toy problem whose whole search space is Pareto-optimal.

use super::traits::{check_bv_size, Function, MultiObjectiveFunction};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;
use crate::termination::Evaluation;

/// OneMax function for bit strings
///
/// Counts the number of 1s in the bit string. Optimum when all bits are 1.
#[derive(Clone, Debug)]
pub struct OneMax {
    length: usize,
}

impl OneMax {
    /// Create a new OneMax function
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Function for OneMax {
    fn bv_size(&self) -> usize {
        self.length
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        check_bv_size(self.length, bv)?;
        Ok(Evaluation::Value(bv.count_ones() as f64))
    }

    fn maximum(&self) -> Option<f64> {
        Some(self.length as f64)
    }
}

/// LeadingOnes function for bit strings
///
/// Counts the number of leading 1s before the first 0.
#[derive(Clone, Debug)]
pub struct LeadingOnes {
    length: usize,
}

impl LeadingOnes {
    /// Create a new LeadingOnes function
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Function for LeadingOnes {
    fn bv_size(&self) -> usize {
        self.length
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        check_bv_size(self.length, bv)?;
        let value = bv.bits().iter().take_while(|&&b| b).count();
        Ok(Evaluation::Value(value as f64))
    }

    fn maximum(&self) -> Option<f64> {
        Some(self.length as f64)
    }
}

/// Needle in a haystack
///
/// 1 on the all-ones bit string, 0 everywhere else.
#[derive(Clone, Debug)]
pub struct Needle {
    length: usize,
}

impl Needle {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Function for Needle {
    fn bv_size(&self) -> usize {
        self.length
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        check_bv_size(self.length, bv)?;
        let value = if bv.count_zeros() == 0 { 1.0 } else { 0.0 };
        Ok(Evaluation::Value(value))
    }

    fn maximum(&self) -> Option<f64> {
        Some(1.0)
    }
}

/// Jump function with a gap
///
/// Equals the number of ones, except on the `gap - 1` levels just below the
/// optimum where it drops to 0.
#[derive(Clone, Debug)]
pub struct Jump {
    length: usize,
    gap: usize,
}

impl Jump {
    /// Create a new Jump function; `gap` must be at least 1
    pub fn new(length: usize, gap: usize) -> EvoResult<Self> {
        if gap == 0 {
            return Err(EvolutionError::configuration("jump gap must be at least 1"));
        }
        Ok(Self { length, gap })
    }
}

impl Function for Jump {
    fn bv_size(&self) -> usize {
        self.length
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        check_bv_size(self.length, bv)?;
        let weight = bv.count_ones();
        let value = if weight == self.length || weight + self.gap <= self.length {
            weight
        } else {
            0
        };
        Ok(Evaluation::Value(value as f64))
    }

    fn maximum(&self) -> Option<f64> {
        Some(self.length as f64)
    }
}

/// Bi-objective OneMinMax: `[ones, zeros]`
///
/// The two objectives conflict everywhere, so every bit string is
/// Pareto-optimal and the front has `n + 1` points.
#[derive(Clone, Debug)]
pub struct OneMinMax {
    length: usize,
}

impl OneMinMax {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl MultiObjectiveFunction for OneMinMax {
    fn bv_size(&self) -> usize {
        self.length
    }

    fn output_size(&self) -> usize {
        2
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        check_bv_size(self.length, bv)?;
        let ones = bv.count_ones() as f64;
        Ok(Evaluation::Value(vec![ones, self.length as f64 - ones]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<F: Function>(f: &mut F, bits: &str) -> f64 {
        let bv: BitString = bits.parse().unwrap();
        *f.evaluate(&bv).unwrap().value().unwrap()
    }

    #[test]
    fn test_onemax() {
        let mut f = OneMax::new(5);
        assert_eq!(value(&mut f, "00000"), 0.0);
        assert_eq!(value(&mut f, "10110"), 3.0);
        assert_eq!(value(&mut f, "11111"), 5.0);
        assert_eq!(f.maximum(), Some(5.0));
    }

    #[test]
    fn test_onemax_size_mismatch() {
        let mut f = OneMax::new(5);
        assert!(f.evaluate(&BitString::zeros(4)).is_err());
    }

    #[test]
    fn test_leading_ones() {
        let mut f = LeadingOnes::new(5);
        assert_eq!(value(&mut f, "11011"), 2.0);
        assert_eq!(value(&mut f, "01111"), 0.0);
        assert_eq!(value(&mut f, "11111"), 5.0);
    }

    #[test]
    fn test_needle() {
        let mut f = Needle::new(4);
        assert_eq!(value(&mut f, "1110"), 0.0);
        assert_eq!(value(&mut f, "1111"), 1.0);
        assert_eq!(f.maximum(), Some(1.0));
    }

    #[test]
    fn test_jump() {
        let mut f = Jump::new(5, 2).unwrap();
        assert_eq!(value(&mut f, "11100"), 3.0);
        assert_eq!(value(&mut f, "11110"), 0.0);
        assert_eq!(value(&mut f, "11111"), 5.0);
        assert!(Jump::new(5, 0).is_err());
    }

    #[test]
    fn test_one_min_max() {
        let mut f = OneMinMax::new(4);
        let bv: BitString = "1101".parse().unwrap();
        assert_eq!(f.evaluate(&bv).unwrap(), Evaluation::Value(vec![3.0, 1.0]));
        assert_eq!(f.output_size(), 2);
    }
}
