//! Random search
//!
//! Samples uniformly random bit strings and keeps the best one.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{evaluate, finish_run, update_solution, within_limit, Algorithm};
use crate::diagnostics::{RunSummary, Solution};
use crate::error::EvoResult;
use crate::function::traits::Function;
use crate::genome::bit_string::BitString;
use crate::termination::StepResult;

/// Configuration for random search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSearchConfig {
    /// Number of iterations after the initial sample (0 = until a termination signal)
    pub num_iterations: usize,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            num_iterations: 1000,
        }
    }
}

impl RandomSearchConfig {
    /// Set the number of iterations
    pub fn with_num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }
}

/// Random search
#[derive(Clone, Debug)]
pub struct RandomSearch {
    config: RandomSearchConfig,
    solution: Option<Solution>,
    iteration: usize,
}

impl RandomSearch {
    /// Create a new random search
    pub fn new(config: RandomSearchConfig) -> Self {
        Self {
            config,
            solution: None,
            iteration: 0,
        }
    }

    fn run<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<()>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let mut candidate = BitString::random(function.bv_size(), rng);
        let value = evaluate(function, &candidate)?;
        update_solution(&mut self.solution, &candidate, value);

        while within_limit(self.iteration, self.config.num_iterations) {
            candidate.randomize(rng);
            let value = evaluate(function, &candidate)?;
            update_solution(&mut self.solution, &candidate, value);
            self.iteration += 1;
            debug!(iteration = self.iteration, value, "random search iteration");
        }
        Ok(())
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new(RandomSearchConfig::default())
    }
}

impl Algorithm for RandomSearch {
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
            "random_search",
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
