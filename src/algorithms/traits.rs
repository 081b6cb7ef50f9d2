//! Algorithm trait and shared run bookkeeping

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::diagnostics::{RunSummary, Solution};
use crate::error::EvoResult;
use crate::function::traits::Function;
use crate::genome::bit_string::BitString;
use crate::termination::{StepResult, Termination};

/// Single-objective search algorithm
///
/// Algorithms only see the [`Function`] contract. A run ends on its own
/// (iteration limit, convergence) or when the function signals termination;
/// both are successful outcomes.
pub trait Algorithm {
    /// Maximize a function
    fn maximize<F, R>(&mut self, function: &mut F, rng: &mut R) -> EvoResult<RunSummary>
    where
        F: Function + ?Sized,
        R: Rng + ?Sized;

    /// Best solution of the last run
    fn solution(&self) -> Option<&Solution>;
}

/// Evaluate a bit string, turning a termination signal into a [`Halt`]
///
/// [`Halt`]: crate::termination::Halt
pub(crate) fn evaluate<F: Function + ?Sized>(function: &mut F, bv: &BitString) -> StepResult<f64> {
    Ok(function.evaluate(bv)?.into_result()?)
}

/// Keep the better of the current solution and a new evaluation
pub(crate) fn update_solution(solution: &mut Option<Solution>, bv: &BitString, value: f64) {
    match solution {
        Some(s) => {
            s.update(bv, value);
        }
        None => *solution = Some(Solution::new(bv.clone(), value)),
    }
}

/// Convert the outcome of a run loop into a summary
///
/// A termination signal is a successful end; its trigger is adopted when it
/// beats the current solution.
pub(crate) fn finish_run(
    algorithm: &str,
    outcome: StepResult<()>,
    iterations: usize,
    solution: &mut Option<Solution>,
    start: Instant,
) -> EvoResult<RunSummary> {
    match outcome {
        Ok(()) => {
            info!(algorithm, iterations, "run completed");
            Ok(RunSummary::completed(iterations, start.elapsed()))
        }
        Err(halt) => {
            let termination: Termination<f64> = halt.into_outcome()?;
            if let Some(trigger) = &termination.trigger {
                update_solution(solution, &trigger.solution, trigger.value);
            }
            info!(algorithm, iterations, reason = %termination.reason, "run terminated");
            Ok(RunSummary::terminated(iterations, &termination, start.elapsed()))
        }
    }
}

/// Whether an iteration limit allows another iteration (0 = unbounded)
pub(crate) fn within_limit(iteration: usize, limit: usize) -> bool {
    limit == 0 || iteration < limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use crate::termination::{Halt, TerminationReason};

    #[test]
    fn test_finish_run_adopts_better_trigger() {
        let mut solution = Some(Solution::new(BitString::zeros(2), 1.0));
        let halt: Halt<f64> = Termination::target_reached(BitString::ones(2), 2.0).into();
        let summary = finish_run("test", Err(halt), 4, &mut solution, Instant::now()).unwrap();
        assert_eq!(summary.iterations, 4);
        assert_eq!(summary.termination, Some(TerminationReason::TargetReached));
        assert_eq!(solution.unwrap().bv, BitString::ones(2));
    }

    #[test]
    fn test_finish_run_keeps_better_solution() {
        let mut solution = Some(Solution::new(BitString::zeros(2), 5.0));
        let halt: Halt<f64> = Termination::target_reached(BitString::ones(2), 2.0).into();
        finish_run("test", Err(halt), 1, &mut solution, Instant::now()).unwrap();
        assert_eq!(solution.unwrap().value, 5.0);
    }

    #[test]
    fn test_finish_run_propagates_failure() {
        let mut solution = None;
        let halt: Halt<f64> = EvolutionError::EmptyPopulation.into();
        let result = finish_run("test", Err(halt), 0, &mut solution, Instant::now());
        assert_eq!(result, Err(EvolutionError::EmptyPopulation));
    }

    #[test]
    fn test_within_limit() {
        assert!(within_limit(1_000_000, 0));
        assert!(within_limit(2, 3));
        assert!(!within_limit(3, 3));
    }
}
