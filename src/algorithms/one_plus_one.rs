//! (1+1) evolutionary algorithm
//!
//! Keeps one bit string, mutates it with standard bit mutation and accepts
//! the mutant when it is at least as good, so the search can drift across
//! plateaus.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{evaluate, finish_run, within_limit, Algorithm};
use crate::diagnostics::{RunSummary, Solution};
use crate::error::{EvoResult, EvolutionError};
use crate::function::traits::Function;
use crate::genome::bit_string::BitString;
use crate::operators::mutation::StandardBitMutation;
use crate::operators::traits::MutationOperator;
use crate::termination::StepResult;

/// Configuration for the (1+1) EA
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OnePlusOneConfig {
    /// Number of iterations (0 = until a termination signal)
    pub num_iterations: usize,
    /// Per-bit mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
    /// Accept mutations that flip no bit
    pub allow_no_mutation: bool,
}

impl Default for OnePlusOneConfig {
    fn default() -> Self {
        Self {
            num_iterations: 1000,
            mutation_probability: None,
            allow_no_mutation: true,
        }
    }
}

impl OnePlusOneConfig {
    /// Set the number of iterations
    pub fn with_num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }

    /// Set the per-bit mutation probability
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = Some(probability);
        self
    }

    /// Set whether a mutation may leave the bit string unchanged
    pub fn with_allow_no_mutation(mut self, allow: bool) -> Self {
        self.allow_no_mutation = allow;
        self
    }
}

/// (1+1) evolutionary algorithm
#[derive(Clone, Debug)]
pub struct OnePlusOneEa {
    config: OnePlusOneConfig,
    mutation: StandardBitMutation,
    solution: Option<Solution>,
    iteration: usize,
}

impl OnePlusOneEa {
    /// Create a new (1+1) EA
    pub fn new(config: OnePlusOneConfig) -> EvoResult<Self> {
        let mut mutation =
            StandardBitMutation::new().with_allow_no_mutation(config.allow_no_mutation);
        mutation.mutation_probability = config.mutation_probability;
        mutation.validate().map_err(EvolutionError::from)?;
        Ok(Self {
            config,
            mutation,
            solution: None,
            iteration: 0,
        })
    }

    fn run<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<()>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let origin = BitString::random(function.bv_size(), rng);
        let value = evaluate(function, &origin)?;
        self.solution = Some(Solution::new(origin, value));

        let mut candidate = BitString::zeros(function.bv_size());
        while within_limit(self.iteration, self.config.num_iterations) {
            let Some(current) = self.solution.as_mut() else {
                break;
            };
            candidate.copy_from(&current.bv)?;
            self.mutation.mutate(&mut candidate, rng);
            let value = evaluate(function, &candidate)?;
            if value >= current.value {
                std::mem::swap(&mut current.bv, &mut candidate);
                current.value = value;
            }
            self.iteration += 1;
            debug!(iteration = self.iteration, value = current.value, "(1+1) EA iteration");
        }
        Ok(())
    }
}

impl Algorithm for OnePlusOneEa {
    fn maximize<F, R>(&mut self, function: &mut F, rng: &mut R) -> EvoResult<RunSummary>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        self.solution = None;
        self.iteration = 0;
        let outcome = self.run(function, rng);
        finish_run(
            "one_plus_one_ea",
            outcome,
            self.iteration,
            &mut self.solution,
            start,
        )
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::benchmarks::OneMax;
    use crate::function::controllers::StopOnMaximum;
    use crate::random::Generator;
    use crate::termination::TerminationReason;

    #[test]
    fn test_one_plus_one_solves_onemax() {
        let mut rng = Generator::seeded(11);
        let mut f = StopOnMaximum::new(OneMax::new(16)).unwrap();
        let mut algo =
            OnePlusOneEa::new(OnePlusOneConfig::default().with_num_iterations(0)).unwrap();
        let summary = algo.maximize(&mut f, &mut rng).unwrap();
        assert_eq!(summary.termination, Some(TerminationReason::TargetReached));
        let solution = algo.solution().unwrap();
        assert_eq!(solution.value, 16.0);
        assert_eq!(solution.bv, BitString::ones(16));
    }

    #[test]
    fn test_one_plus_one_never_gets_worse() {
        let mut rng = Generator::seeded(12);
        let mut f = OneMax::new(32);
        let mut algo =
            OnePlusOneEa::new(OnePlusOneConfig::default().with_num_iterations(200)).unwrap();
        let summary = algo.maximize(&mut f, &mut rng).unwrap();
        assert_eq!(summary.iterations, 200);
        let solution = algo.solution().unwrap();
        assert_eq!(solution.value, solution.bv.count_ones() as f64);
        assert!(solution.value >= 16.0);
    }

    #[test]
    fn test_one_plus_one_rejects_bad_probability() {
        let config = OnePlusOneConfig::default().with_mutation_probability(2.0);
        assert!(OnePlusOneEa::new(config).is_err());
    }
}
