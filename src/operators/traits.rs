//! Operator traits
//!
//! This module defines the variation operator traits for bit strings.

use rand::Rng;

use crate::error::OperatorError;
use crate::genome::bit_string::BitString;

/// Crossover operator trait
///
/// Combines genetic material from two parents to create offspring.
pub trait CrossoverOperator {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &BitString,
        parent2: &BitString,
        rng: &mut R,
    ) -> Result<(BitString, BitString), OperatorError>;
}

/// Mutation operator trait
///
/// Applies random changes to a bit string.
pub trait MutationOperator {
    /// Apply mutation to a bit string in place
    fn mutate<R: Rng + ?Sized>(&self, bv: &mut BitString, rng: &mut R);
}

/// Position of an individual under crowded comparison
pub trait CrowdedRanking {
    /// Non-domination rank (0 = first front)
    fn rank(&self) -> usize;

    /// Crowding distance within its front
    fn crowding_distance(&self) -> f64;
}

/// Crowded comparison operator
///
/// Returns true if a is better than b (lower rank, or same rank with higher
/// crowding distance)
pub fn crowded_comparison<T: CrowdedRanking + ?Sized>(a: &T, b: &T) -> bool {
    a.rank() < b.rank() || (a.rank() == b.rank() && a.crowding_distance() > b.crowding_distance())
}
