//! Crossover operators

use rand::Rng;

use super::traits::CrossoverOperator;
use crate::error::OperatorError;
use crate::genome::bit_string::BitString;

/// Uniform crossover for bit strings
///
/// Each bit is independently chosen from either parent with equal probability.
#[derive(Clone, Debug)]
pub struct UniformCrossover {
    /// Probability of choosing from parent1 (default: 0.5)
    pub bias: f64,
}

impl UniformCrossover {
    /// Create a new uniform crossover
    pub fn new() -> Self {
        Self { bias: 0.5 }
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossoverOperator for UniformCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &BitString,
        parent2: &BitString,
        rng: &mut R,
    ) -> Result<(BitString, BitString), OperatorError> {
        if parent1.len() != parent2.len() {
            return Err(OperatorError::CrossoverFailed(format!(
                "parent lengths {} and {} do not match",
                parent1.len(),
                parent2.len()
            )));
        }

        let mut child1 = parent1.clone();
        let mut child2 = parent2.clone();
        for i in 0..parent1.len() {
            if rng.gen::<f64>() >= self.bias {
                child1.set(i, parent2[i]);
                child2.set(i, parent1[i]);
            }
        }

        Ok((child1, child2))
    }
}
