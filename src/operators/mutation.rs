//! Mutation operators

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::traits::MutationOperator;
use crate::error::OperatorError;
use crate::genome::bit_string::BitString;

/// Standard bit mutation
///
/// Flips each bit independently with a given probability, `1/n` by default.
/// Unless `allow_no_mutation` is set, draws are repeated until at least one
/// bit flips, so the offspring always differs from its parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardBitMutation {
    /// Per-bit mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
    /// Accept draws that flip no bit
    pub allow_no_mutation: bool,
}

impl StandardBitMutation {
    /// Create a new standard bit mutation
    pub fn new() -> Self {
        Self {
            mutation_probability: None,
            allow_no_mutation: false,
        }
    }

    /// Set a fixed mutation probability per bit
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = Some(probability);
        self
    }

    /// Set whether a draw may leave the bit string unchanged
    pub fn with_allow_no_mutation(mut self, allow: bool) -> Self {
        self.allow_no_mutation = allow;
        self
    }

    /// Check the configured probability
    pub fn validate(&self) -> Result<(), OperatorError> {
        match self.mutation_probability {
            Some(p) if !(0.0..=1.0).contains(&p) => Err(OperatorError::InvalidConfiguration(
                format!("mutation probability must be in [0, 1], got {p}"),
            )),
            _ => Ok(()),
        }
    }

    /// Probability used for bit strings of length `n`
    pub fn probability_for(&self, n: usize) -> f64 {
        self.mutation_probability
            .unwrap_or(if n == 0 { 0.0 } else { 1.0 / n as f64 })
    }
}

impl Default for StandardBitMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationOperator for StandardBitMutation {
    fn mutate<R: Rng + ?Sized>(&self, bv: &mut BitString, rng: &mut R) {
        let n = bv.len();
        if n == 0 {
            return;
        }
        let prob = self.probability_for(n);
        if prob <= 0.0 {
            if !self.allow_no_mutation {
                bv.flip(rng.gen_range(0..n));
            }
            return;
        }
        loop {
            let mut flipped = false;
            for i in 0..n {
                if rng.gen::<f64>() < prob {
                    bv.flip(i);
                    flipped = true;
                }
            }
            if flipped || self.allow_no_mutation {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Generator;

    #[test]
    fn test_default_probability() {
        let m = StandardBitMutation::new();
        assert_eq!(m.probability_for(4), 0.25);
        assert_eq!(m.with_probability(0.1).probability_for(4), 0.1);
    }

    #[test]
    fn test_always_mutates_without_allow_no_mutation() {
        let mut rng = Generator::seeded(42);
        let m = StandardBitMutation::new();
        for _ in 0..200 {
            let mut bv = BitString::zeros(50);
            m.mutate(&mut bv, &mut rng);
            assert!(bv.count_ones() >= 1);
        }
    }

    #[test]
    fn test_zero_probability() {
        let mut rng = Generator::seeded(1);
        let mut bv = BitString::zeros(8);
        StandardBitMutation::new()
            .with_probability(0.0)
            .with_allow_no_mutation(true)
            .mutate(&mut bv, &mut rng);
        assert_eq!(bv.count_ones(), 0);

        StandardBitMutation::new()
            .with_probability(0.0)
            .mutate(&mut bv, &mut rng);
        assert_eq!(bv.count_ones(), 1);
    }

    #[test]
    fn test_full_probability_flips_everything() {
        let mut rng = Generator::seeded(1);
        let mut bv = BitString::zeros(8);
        StandardBitMutation::new()
            .with_probability(1.0)
            .mutate(&mut bv, &mut rng);
        assert_eq!(bv, BitString::ones(8));
    }

    #[test]
    fn test_validate() {
        assert!(StandardBitMutation::new().validate().is_ok());
        assert!(StandardBitMutation::new().with_probability(1.5).validate().is_err());
    }
}
