//! Selection operators

use rand::Rng;

use super::traits::{crowded_comparison, CrowdedRanking};
use crate::error::{EvoResult, EvolutionError};

/// Tournament selection under crowded comparison
///
/// Draws `tournament_size` contestants uniformly with replacement and keeps
/// the best one by rank, then crowding distance.
#[derive(Clone, Debug)]
pub struct CrowdedTournament {
    /// Tournament size (number of individuals competing)
    pub tournament_size: usize,
}

impl CrowdedTournament {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> EvoResult<Self> {
        if tournament_size == 0 {
            return Err(EvolutionError::configuration(
                "tournament size must be at least 1",
            ));
        }
        Ok(Self { tournament_size })
    }

    /// Select the index of one individual
    pub fn select<T, R>(&self, population: &[T], rng: &mut R) -> EvoResult<usize>
    where
        T: CrowdedRanking,
        R: Rng + ?Sized,
    {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        let mut winner = rng.gen_range(0..population.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_range(0..population.len());
            if crowded_comparison(&population[challenger], &population[winner]) {
                winner = challenger;
            }
        }
        Ok(winner)
    }
}
