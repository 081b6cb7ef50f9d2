//! Parameter-less population pyramid
//!
//! Each pass climbs a fresh random bit string to a local optimum, then mixes
//! it with the solutions stored on every level of the pyramid, bottom up. A
//! solution that strictly improves while mixing with a level is promoted to
//! the level above. No population size has to be chosen: the pyramid grows
//! as long as passes keep producing new solutions.
//!
//! Reference: Goldman, B. W., & Punch, W. F. (2014). Parameter-less
//! Population Pyramid. GECCO '14.

use std::collections::HashSet;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::{evaluate, finish_run, update_solution, within_limit, Algorithm};
use crate::diagnostics::{RunSummary, Solution};
use crate::error::{EvoResult, EvolutionError};
use crate::function::traits::Function;
use crate::genome::bit_string::BitString;
use crate::termination::StepResult;

/// Configuration for the population pyramid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidConfig {
    /// Consecutive passes without progress before the pyramid is converged
    pub max_stalled_passes: usize,
    /// Maximum number of passes (0 = until convergence or a termination signal)
    pub num_passes: usize,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            max_stalled_passes: 1,
            num_passes: 0,
        }
    }
}

impl PyramidConfig {
    /// Set the number of passes without progress that ends a run
    pub fn with_max_stalled_passes(mut self, passes: usize) -> Self {
        self.max_stalled_passes = passes;
        self
    }

    /// Set the maximum number of passes
    pub fn with_num_passes(mut self, passes: usize) -> Self {
        self.num_passes = passes;
        self
    }
}

/// Parameter-less population pyramid
#[derive(Clone, Debug)]
pub struct ParameterlessPopulationPyramid {
    config: PyramidConfig,
    levels: Vec<Vec<Solution>>,
    seen: HashSet<BitString>,
    solution: Option<Solution>,
    passes: usize,
    stalled: usize,
}

impl ParameterlessPopulationPyramid {
    /// Create a new pyramid
    pub fn new(config: PyramidConfig) -> EvoResult<Self> {
        if config.max_stalled_passes == 0 {
            return Err(EvolutionError::configuration(
                "max_stalled_passes must be at least 1",
            ));
        }
        Ok(Self {
            config,
            levels: Vec::new(),
            seen: HashSet::new(),
            solution: None,
            passes: 0,
            stalled: 0,
        })
    }

    /// Levels of the pyramid, bottom first
    pub fn levels(&self) -> &[Vec<Solution>] {
        &self.levels
    }

    /// Number of distinct solutions stored in the pyramid
    pub fn num_solutions(&self) -> usize {
        self.seen.len()
    }

    /// Whether the last run ended by convergence
    pub fn is_converged(&self) -> bool {
        self.stalled >= self.config.max_stalled_passes
    }

    fn run<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<()>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        while within_limit(self.passes, self.config.num_passes) {
            let progress = self.pass(function, rng)?;
            self.passes += 1;
            if progress {
                self.stalled = 0;
            } else {
                self.stalled += 1;
            }
            debug!(
                pass = self.passes,
                levels = self.levels.len(),
                solutions = self.seen.len(),
                "pyramid pass"
            );
            if self.is_converged() {
                info!(passes = self.passes, "pyramid converged");
                break;
            }
        }
        Ok(())
    }

    /// Run one pass; returns whether it stored a new solution or improved the best one
    fn pass<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<bool>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let mut current = BitString::random(function.bv_size(), rng);
        let value = evaluate(function, &current)?;
        let mut value = hill_climb(function, &mut current, value, rng)?;
        let mut progress = self.add_unique(0, &current, value);

        let mut level = 0;
        while level < self.levels.len() {
            let before = value;
            value = self.mix(function, level, &mut current, value, rng)?;
            if value > before && self.add_unique(level + 1, &current, value) {
                progress = true;
            }
            level += 1;
        }

        let improved_best = self.solution.as_ref().map_or(true, |s| value > s.value);
        update_solution(&mut self.solution, &current, value);
        Ok(progress || improved_best)
    }

    /// Store a solution on a level unless it is already in the pyramid
    fn add_unique(&mut self, level: usize, bv: &BitString, value: f64) -> bool {
        if !self.seen.insert(bv.clone()) {
            return false;
        }
        if self.levels.len() == level {
            self.levels.push(Vec::new());
        }
        self.levels[level].push(Solution::new(bv.clone(), value));
        true
    }

    /// Mix `current` with every solution of a level in random order
    ///
    /// Each differing bit is taken from the donor with probability 1/2; the
    /// result replaces `current` when it is at least as good.
    fn mix<F, R>(
        &self,
        function: &mut F,
        level: usize,
        current: &mut BitString,
        mut value: f64,
        rng: &mut R,
    ) -> StepResult<f64>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let mut donors: Vec<usize> = (0..self.levels[level].len()).collect();
        donors.shuffle(rng);

        let mut candidate = current.clone();
        for d in donors {
            let donor = &self.levels[level][d].bv;
            let mut changed = false;
            for i in 0..current.len() {
                if donor[i] != current[i] && rng.gen::<bool>() {
                    candidate.set(i, donor[i]);
                    changed = true;
                }
            }
            if !changed {
                continue;
            }

            let candidate_value = evaluate(function, &candidate)?;
            if candidate_value >= value {
                current.copy_from(&candidate)?;
                value = candidate_value;
            } else {
                candidate.copy_from(current)?;
            }
        }
        Ok(value)
    }
}

impl Default for ParameterlessPopulationPyramid {
    fn default() -> Self {
        Self {
            config: PyramidConfig::default(),
            levels: Vec::new(),
            seen: HashSet::new(),
            solution: None,
            passes: 0,
            stalled: 0,
        }
    }
}

impl Algorithm for ParameterlessPopulationPyramid {
    fn maximize<F, R>(&mut self, function: &mut F, rng: &mut R) -> EvoResult<RunSummary>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        self.levels.clear();
        self.seen.clear();
        self.solution = None;
        self.passes = 0;
        self.stalled = 0;
        let outcome = self.run(function, rng);
        finish_run("pyramid", outcome, self.passes, &mut self.solution, start)
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

/// First-improvement hill climbing over single bit flips
///
/// Sweeps the bits in a fresh random order until a full sweep finds no
/// strict improvement.
fn hill_climb<F, R>(
    function: &mut F,
    bv: &mut BitString,
    mut value: f64,
    rng: &mut R,
) -> StepResult<f64>
where
    F: Function + ?Sized,
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..bv.len()).collect();
    let mut improved = true;
    while improved {
        improved = false;
        order.shuffle(rng);
        for &i in &order {
            bv.flip(i);
            let candidate = evaluate(function, bv)?;
            if candidate > value {
                value = candidate;
                improved = true;
            } else {
                bv.flip(i);
            }
        }
    }
    Ok(value)
}
