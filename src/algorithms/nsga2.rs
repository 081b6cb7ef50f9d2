//! NSGA-II (Non-dominated Sorting Genetic Algorithm II)
//!
//! Implements the NSGA-II algorithm for multi-objective optimization of bit
//! strings.
//!
//! Reference: Deb, K., Pratap, A., Agarwal, S., & Meyarivan, T. (2002).
//! A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II.
//! IEEE Transactions on Evolutionary Computation, 6(2).

use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::within_limit;
use crate::diagnostics::{RunSummary, Solution};
use crate::error::{EvoResult, EvolutionError};
use crate::function::traits::{MultiObjectiveFunction, Sense};
use crate::genome::bit_string::BitString;
use crate::operators::crossover::UniformCrossover;
use crate::operators::mutation::StandardBitMutation;
use crate::operators::selection::CrowdedTournament;
use crate::operators::traits::{CrossoverOperator, CrowdedRanking, MutationOperator};
use crate::termination::{StepResult, Trigger};

/// Configuration for NSGA-II
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nsga2Config {
    /// Population size
    pub population_size: usize,
    /// Number of generations (0 = until a termination signal)
    pub num_generations: usize,
    /// Tournament size for parent selection
    pub tournament_size: usize,
    /// Probability of applying uniform crossover to a pair of parents
    pub crossover_probability: f64,
    /// Per-bit mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
    /// Accept mutations that flip no bit
    pub allow_no_mutation: bool,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 100,
            tournament_size: 10,
            crossover_probability: 0.5,
            mutation_probability: None,
            allow_no_mutation: false,
        }
    }
}

impl Nsga2Config {
    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn with_num_generations(mut self, generations: usize) -> Self {
        self.num_generations = generations;
        self
    }

    /// Set the tournament size
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set crossover probability
    pub fn with_crossover_probability(mut self, prob: f64) -> Self {
        self.crossover_probability = prob;
        self
    }

    /// Set the per-bit mutation probability
    pub fn with_mutation_probability(mut self, prob: f64) -> Self {
        self.mutation_probability = Some(prob);
        self
    }

    /// Set whether a mutation may leave the bit string unchanged
    pub fn with_allow_no_mutation(mut self, allow: bool) -> Self {
        self.allow_no_mutation = allow;
        self
    }
}

/// NSGA-II individual with objectives and crowding info
///
/// Objectives are stored in minimization form.
#[derive(Clone, Debug)]
pub struct Nsga2Individual {
    /// The bit string
    pub bv: BitString,
    /// Objective values, all minimized
    pub objectives: Vec<f64>,
    /// Pareto rank (0 = first front)
    pub rank: usize,
    /// Crowding distance
    pub crowding_distance: f64,
}

impl Nsga2Individual {
    /// Create a new individual with evaluated objectives
    pub fn new(bv: BitString, objectives: Vec<f64>) -> Self {
        Self {
            bv,
            objectives,
            rank: usize::MAX,
            crowding_distance: 0.0,
        }
    }

    /// Check if this individual dominates another
    /// (all objectives <= and at least one <, since we minimize)
    pub fn dominates(&self, other: &Self) -> bool {
        let mut strictly_better = false;
        for (a, b) in self.objectives.iter().zip(&other.objectives) {
            if a > b {
                return false;
            }
            strictly_better |= a < b;
        }
        strictly_better
    }
}

impl CrowdedRanking for Nsga2Individual {
    fn rank(&self) -> usize {
        self.rank
    }

    fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }
}

/// Fast non-dominated sort
///
/// Assigns ranks and returns fronts where `front[0]` is the Pareto-optimal
/// front
pub fn fast_non_dominated_sort(population: &mut [Nsga2Individual]) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return vec![];
    }

    // domination_count[i] = number of individuals that dominate i
    let mut domination_count = vec![0usize; n];
    // dominated_set[i] = individuals that i dominates
    let mut dominated_set: Vec<Vec<usize>> = vec![vec![]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if population[i].dominates(&population[j]) {
                dominated_set[i].push(j);
                domination_count[j] += 1;
            } else if population[j].dominates(&population[i]) {
                dominated_set[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = vec![];
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut rank = 0;
    while !current_front.is_empty() {
        for &i in &current_front {
            population[i].rank = rank;
        }

        let mut next_front = vec![];
        for &i in &current_front {
            for &j in &dominated_set[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        fronts.push(current_front);
        current_front = next_front;
        rank += 1;
    }

    fronts
}

/// Calculate crowding distance for a front
///
/// Boundary individuals of each objective get an infinite distance.
pub fn calculate_crowding_distance(population: &mut [Nsga2Individual], front: &[usize]) {
    let n = front.len();
    if n <= 2 {
        for &i in front {
            population[i].crowding_distance = f64::INFINITY;
        }
        return;
    }

    for &i in front {
        population[i].crowding_distance = 0.0;
    }

    let num_objectives = population[front[0]].objectives.len();
    let mut sorted: Vec<usize> = front.to_vec();

    for obj in 0..num_objectives {
        sorted.sort_by(|&a, &b| {
            population[a].objectives[obj]
                .partial_cmp(&population[b].objectives[obj])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        population[sorted[0]].crowding_distance = f64::INFINITY;
        population[sorted[n - 1]].crowding_distance = f64::INFINITY;

        let obj_min = population[sorted[0]].objectives[obj];
        let obj_max = population[sorted[n - 1]].objectives[obj];
        let obj_range = obj_max - obj_min;
        if obj_range <= 0.0 {
            continue;
        }

        for k in 1..(n - 1) {
            let prev = population[sorted[k - 1]].objectives[obj];
            let next = population[sorted[k + 1]].objectives[obj];
            population[sorted[k]].crowding_distance += (next - prev) / obj_range;
        }
    }
}

/// Keep the best `capacity` individuals by front, then crowding distance
///
/// Every kept individual carries its rank and the crowding distance within
/// its full front.
pub fn select_survivors(
    mut combined: Vec<Nsga2Individual>,
    capacity: usize,
) -> Vec<Nsga2Individual> {
    let fronts = fast_non_dominated_sort(&mut combined);

    let mut keep: Vec<usize> = Vec::with_capacity(capacity);
    for front in &fronts {
        if keep.len() >= capacity {
            break;
        }
        calculate_crowding_distance(&mut combined, front);
        if keep.len() + front.len() <= capacity {
            keep.extend_from_slice(front);
        } else {
            let mut sorted_front = front.clone();
            sorted_front.sort_by(|&a, &b| {
                combined[b]
                    .crowding_distance
                    .partial_cmp(&combined[a].crowding_distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let remaining = capacity - keep.len();
            keep.extend(sorted_front.into_iter().take(remaining));
        }
    }

    let mut slots: Vec<Option<Nsga2Individual>> = combined.into_iter().map(Some).collect();
    keep.into_iter().filter_map(|i| slots[i].take()).collect()
}

fn oriented(values: Vec<f64>, sign: f64) -> Vec<f64> {
    values.into_iter().map(|v| v * sign).collect()
}

/// Evaluate a bit string and return its objectives in minimization form
fn evaluate_objectives<F>(function: &mut F, bv: &BitString, sign: f64) -> StepResult<Vec<f64>, Vec<f64>>
where
    F: MultiObjectiveFunction + ?Sized,
{
    let values = function.evaluate(bv)?.into_result()?;
    if values.len() != function.output_size() {
        return Err(EvolutionError::OutputSizeMismatch {
            expected: function.output_size(),
            actual: values.len(),
        }
        .into());
    }
    Ok(oriented(values, sign))
}

/// NSGA-II algorithm
#[derive(Clone, Debug)]
pub struct Nsga2 {
    config: Nsga2Config,
    selection: CrowdedTournament,
    crossover: UniformCrossover,
    mutation: StandardBitMutation,
    sense: Sense,
    population: Vec<Nsga2Individual>,
    offspring: Vec<Nsga2Individual>,
    solutions: Vec<Solution<Vec<f64>>>,
    generation: usize,
}

impl Nsga2 {
    /// Create a new NSGA-II algorithm
    pub fn new(config: Nsga2Config) -> EvoResult<Self> {
        if config.population_size == 0 {
            return Err(EvolutionError::configuration(
                "population size must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&config.crossover_probability) {
            return Err(EvolutionError::configuration(format!(
                "crossover probability must be in [0, 1], got {}",
                config.crossover_probability
            )));
        }
        let selection = CrowdedTournament::new(config.tournament_size)?;
        let mut mutation =
            StandardBitMutation::new().with_allow_no_mutation(config.allow_no_mutation);
        mutation.mutation_probability = config.mutation_probability;
        mutation.validate()?;

        Ok(Self {
            config,
            selection,
            crossover: UniformCrossover::new(),
            mutation,
            sense: Sense::Maximize,
            population: Vec::new(),
            offspring: Vec::new(),
            solutions: Vec::new(),
            generation: 0,
        })
    }

    /// Maximize every objective of a function
    pub fn maximize<F, R>(&mut self, function: &mut F, rng: &mut R) -> EvoResult<RunSummary>
    where
        F: MultiObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        self.optimize(function, Sense::Maximize, rng)
    }

    /// Minimize every objective of a function
    pub fn minimize<F, R>(&mut self, function: &mut F, rng: &mut R) -> EvoResult<RunSummary>
    where
        F: MultiObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        self.optimize(function, Sense::Minimize, rng)
    }

    /// Optimize a function in the given direction
    ///
    /// A termination signal ends the run successfully; the final front then
    /// includes the offspring evaluated so far and the trigger, if any.
    pub fn optimize<F, R>(
        &mut self,
        function: &mut F,
        sense: Sense,
        rng: &mut R,
    ) -> EvoResult<RunSummary>
    where
        F: MultiObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        self.sense = sense;
        self.population.clear();
        self.offspring.clear();
        self.solutions.clear();
        self.generation = 0;

        let (summary, trigger) = match self.run(function, rng) {
            Ok(()) => {
                info!(algorithm = "nsga2", generations = self.generation, "run completed");
                (RunSummary::completed(self.generation, start.elapsed()), None)
            }
            Err(halt) => {
                let termination = halt.into_outcome()?;
                info!(
                    algorithm = "nsga2",
                    generations = self.generation,
                    reason = %termination.reason,
                    "run terminated"
                );
                let summary =
                    RunSummary::terminated(self.generation, &termination, start.elapsed());
                (summary, termination.trigger)
            }
        };

        self.finalize(trigger);
        Ok(summary)
    }

    /// Final non-dominated front of the last run, in the function's objective space
    pub fn solutions(&self) -> &[Solution<Vec<f64>>] {
        &self.solutions
    }

    /// Current population (objectives in minimization form)
    pub fn population(&self) -> &[Nsga2Individual] {
        &self.population
    }

    /// Number of completed generations
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Configuration
    pub fn config(&self) -> &Nsga2Config {
        &self.config
    }

    fn run<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<(), Vec<f64>>
    where
        F: MultiObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let sign = self.sense.minimization_sign();
        let bv_size = function.bv_size();
        while self.population.len() < self.config.population_size {
            let bv = BitString::random(bv_size, rng);
            let objectives = evaluate_objectives(function, &bv, sign)?;
            self.population.push(Nsga2Individual::new(bv, objectives));
        }
        let initial = std::mem::take(&mut self.population);
        self.population = select_survivors(initial, self.config.population_size);

        while within_limit(self.generation, self.config.num_generations) {
            self.step(function, rng)?;
            self.generation += 1;
            debug!(
                generation = self.generation,
                front_size = self.population.iter().filter(|ind| ind.rank == 0).count(),
                "NSGA-II generation"
            );
        }
        Ok(())
    }

    /// Run one generation of NSGA-II
    fn step<F, R>(&mut self, function: &mut F, rng: &mut R) -> StepResult<(), Vec<f64>>
    where
        F: MultiObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let sign = self.sense.minimization_sign();
        let capacity = self.config.population_size;
        self.offspring.clear();

        while self.offspring.len() < capacity {
            let first = self.selection.select(&self.population, rng)?;
            let second = self.selection.select(&self.population, rng)?;
            let parent1 = &self.population[first].bv;
            let parent2 = &self.population[second].bv;

            let (child1, child2) = if rng.gen::<f64>() < self.config.crossover_probability {
                self.crossover
                    .crossover(parent1, parent2, rng)
                    .map_err(EvolutionError::from)?
            } else {
                (parent1.clone(), parent2.clone())
            };

            for mut child in [child1, child2] {
                if self.offspring.len() >= capacity {
                    break;
                }
                self.mutation.mutate(&mut child, rng);
                let objectives = evaluate_objectives(function, &child, sign)?;
                self.offspring.push(Nsga2Individual::new(child, objectives));
            }
        }

        let combined: Vec<Nsga2Individual> = self
            .population
            .drain(..)
            .chain(self.offspring.drain(..))
            .collect();
        self.population = select_survivors(combined, capacity);
        Ok(())
    }

    /// Extract the first front of everything evaluated and still held
    fn finalize(&mut self, trigger: Option<Trigger<Vec<f64>>>) {
        let sign = self.sense.minimization_sign();
        let mut pool: Vec<Nsga2Individual> = self
            .population
            .iter()
            .chain(&self.offspring)
            .cloned()
            .collect();
        if let Some(trigger) = trigger {
            pool.push(Nsga2Individual::new(
                trigger.solution,
                oriented(trigger.value, sign),
            ));
        }

        let fronts = fast_non_dominated_sort(&mut pool);
        let mut seen = HashSet::new();
        self.solutions = fronts
            .first()
            .map(|front| {
                front
                    .iter()
                    .filter(|&&i| seen.insert(pool[i].bv.clone()))
                    .map(|&i| {
                        Solution::new(pool[i].bv.clone(), oriented(pool[i].objectives.clone(), sign))
                    })
                    .collect()
            })
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::benchmarks::OneMinMax;
    use crate::function::controllers::OnBudgetFunction;
    use crate::function::traits::FnMultiObjectiveFunction;
    use crate::random::Generator;
    use crate::termination::TerminationReason;

    fn individual(objectives: Vec<f64>) -> Nsga2Individual {
        Nsga2Individual::new(BitString::zeros(1), objectives)
    }

    #[test]
    fn test_domination() {
        let a = individual(vec![1.0, 2.0]);
        let b = individual(vec![2.0, 3.0]);
        let c = individual(vec![1.5, 1.5]);

        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a.clone()));
    }

    #[test]
    fn test_fast_non_dominated_sort() {
        let mut population = vec![
            individual(vec![1.0, 4.0]),
            individual(vec![2.0, 3.0]),
            individual(vec![3.0, 2.0]),
            individual(vec![4.0, 1.0]),
            individual(vec![3.0, 3.0]),
        ];

        let fronts = fast_non_dominated_sort(&mut population);

        assert_eq!(fronts[0].len(), 4);
        assert_eq!(fronts[1], vec![4]);
        for &i in &fronts[0] {
            assert_eq!(population[i].rank, 0);
        }
        assert_eq!(population[4].rank, 1);
    }

    #[test]
    fn test_crowding_distance() {
        let mut population = vec![
            individual(vec![0.0, 10.0]),
            individual(vec![5.0, 5.0]),
            individual(vec![10.0, 0.0]),
        ];

        let front: Vec<usize> = (0..population.len()).collect();
        calculate_crowding_distance(&mut population, &front);

        assert!(population[0].crowding_distance.is_infinite());
        assert!(population[2].crowding_distance.is_infinite());
        assert_eq!(population[1].crowding_distance, 2.0);
    }

    #[test]
    fn test_select_survivors_truncates_by_crowding() {
        let combined = vec![
            individual(vec![0.0, 10.0]),
            individual(vec![4.0, 6.0]),
            individual(vec![5.0, 5.0]),
            individual(vec![10.0, 0.0]),
            individual(vec![11.0, 11.0]),
        ];
        let survivors = select_survivors(combined, 3);
        assert_eq!(survivors.len(), 3);
        assert!(survivors.iter().all(|ind| ind.rank == 0));
        let kept: Vec<&Vec<f64>> = survivors.iter().map(|ind| &ind.objectives).collect();
        assert!(kept.contains(&&vec![0.0, 10.0]));
        assert!(kept.contains(&&vec![10.0, 0.0]));
    }

    #[test]
    fn test_nsga2_onemin_max_front() {
        let mut rng = Generator::seeded(21);
        let mut f = OneMinMax::new(10);
        let config = Nsga2Config::default()
            .with_population_size(20)
            .with_num_generations(30);
        let mut nsga2 = Nsga2::new(config).unwrap();
        let summary = nsga2.maximize(&mut f, &mut rng).unwrap();

        assert_eq!(summary.iterations, 30);
        assert_eq!(nsga2.population().len(), 20);
        let solutions = nsga2.solutions();
        assert!(!solutions.is_empty());

        let mut seen = HashSet::new();
        let mut counts = HashSet::new();
        for s in solutions {
            assert_eq!(s.value[0] + s.value[1], 10.0);
            assert_eq!(s.value[0], s.bv.count_ones() as f64);
            assert!(seen.insert(s.bv.clone()));
            counts.insert(s.bv.count_ones());
        }
        assert!(counts.len() >= 5);
    }

    #[test]
    fn test_nsga2_minimize() {
        let mut rng = Generator::seeded(4);
        let mut f = FnMultiObjectiveFunction::new(8, 2, |bv: &BitString| {
            let ones = bv.count_ones() as f64;
            vec![ones, 2.0 * ones]
        });
        let config = Nsga2Config::default()
            .with_population_size(10)
            .with_num_generations(50);
        let mut nsga2 = Nsga2::new(config).unwrap();
        nsga2.minimize(&mut f, &mut rng).unwrap();

        let solutions = nsga2.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].bv, BitString::zeros(8));
        assert_eq!(solutions[0].value, vec![0.0, 0.0]);
    }

    #[test]
    fn test_nsga2_stops_on_budget() {
        let mut rng = Generator::seeded(8);
        let mut f = OnBudgetFunction::new(OneMinMax::new(6), 35);
        let config = Nsga2Config::default()
            .with_population_size(10)
            .with_num_generations(0);
        let mut nsga2 = Nsga2::new(config).unwrap();
        let summary = nsga2.maximize(&mut f, &mut rng).unwrap();

        assert_eq!(summary.termination, Some(TerminationReason::LastEvaluation));
        assert_eq!(summary.iterations, 2);
        assert_eq!(f.num_calls(), 35);
        assert!(!nsga2.solutions().is_empty());
    }

    #[test]
    fn test_nsga2_invalid_config() {
        assert!(Nsga2::new(Nsga2Config::default().with_population_size(0)).is_err());
        assert!(Nsga2::new(Nsga2Config::default().with_tournament_size(0)).is_err());
        assert!(Nsga2::new(Nsga2Config::default().with_crossover_probability(1.5)).is_err());
        assert!(Nsga2::new(Nsga2Config::default().with_mutation_probability(-0.1)).is_err());
    }
}
