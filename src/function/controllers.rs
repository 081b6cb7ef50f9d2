//! Controllers
//!
//! A controller owns one inner function and presents the same evaluation
//! contract, adding a side effect (counting, caching, tracking progress) or a
//! termination check. Controllers stack in any order.
//!
//! A termination signal returned by the inner function is forwarded
//! unchanged. When it carries a trigger, the inner evaluation did happen and
//! the controller accounts for it before forwarding.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

use super::traits::{Function, MultiObjectiveFunction, Sense};
use crate::diagnostics::ImprovementEvent;
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;
use crate::termination::{Evaluation, Termination, Trigger};

/// Counts evaluations
#[derive(Clone, Debug)]
pub struct CallCounter<F> {
    function: F,
    num_calls: usize,
}

impl<F> CallCounter<F> {
    /// Wrap a function
    pub fn new(function: F) -> Self {
        Self {
            function,
            num_calls: 0,
        }
    }

    /// Number of evaluations since creation or the last reset
    pub fn num_calls(&self) -> usize {
        self.num_calls
    }

    /// Reset the counter
    pub fn reset(&mut self) {
        self.num_calls = 0;
    }

    /// Wrapped function
    pub fn inner(&self) -> &F {
        &self.function
    }

    /// Wrapped function, mutably
    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.function
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }

    fn count<V>(&mut self, result: &Evaluation<V>) {
        if result.evaluated_value().is_some() {
            self.num_calls += 1;
        }
    }
}

impl<F: Function> Function for CallCounter<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        let result = self.function.evaluate(bv)?;
        self.count(&result);
        Ok(result)
    }

    fn maximum(&self) -> Option<f64> {
        self.function.maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

impl<F: MultiObjectiveFunction> MultiObjectiveFunction for CallCounter<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn output_size(&self) -> usize {
        self.function.output_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        let result = self.function.evaluate(bv)?;
        self.count(&result);
        Ok(result)
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

/// Signals termination after a fixed number of evaluations
///
/// The evaluation that exhausts the budget is performed and returned as the
/// trigger of a `LastEvaluation` signal. Any later call is refused with the
/// same signal, without a trigger and without evaluating.
#[derive(Clone, Debug)]
pub struct OnBudgetFunction<F> {
    function: F,
    budget: usize,
    num_calls: usize,
}

impl<F> OnBudgetFunction<F> {
    /// Wrap a function with an evaluation budget
    pub fn new(function: F, budget: usize) -> Self {
        Self {
            function,
            budget,
            num_calls: 0,
        }
    }

    /// Evaluation budget
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Evaluations performed so far
    pub fn num_calls(&self) -> usize {
        self.num_calls
    }

    /// Whether the budget is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.num_calls >= self.budget
    }

    /// Wrapped function
    pub fn inner(&self) -> &F {
        &self.function
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }

    fn spend<V>(&mut self, bv: &BitString, result: Evaluation<V>) -> Evaluation<V> {
        if result.evaluated_value().is_none() {
            return result;
        }
        self.num_calls += 1;
        match result {
            Evaluation::Value(value) if self.is_exhausted() => {
                Evaluation::Terminated(Termination::last_evaluation(Some(Trigger {
                    solution: bv.clone(),
                    value,
                })))
            }
            other => other,
        }
    }
}

impl<F: Function> Function for OnBudgetFunction<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        if self.is_exhausted() {
            return Ok(Evaluation::Terminated(Termination::last_evaluation(None)));
        }
        let result = self.function.evaluate(bv)?;
        Ok(self.spend(bv, result))
    }

    fn maximum(&self) -> Option<f64> {
        self.function.maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

impl<F: MultiObjectiveFunction> MultiObjectiveFunction for OnBudgetFunction<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn output_size(&self) -> usize {
        self.function.output_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        if self.is_exhausted() {
            return Ok(Evaluation::Terminated(Termination::last_evaluation(None)));
        }
        let result = self.function.evaluate(bv)?;
        Ok(self.spend(bv, result))
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

/// Signals `TargetReached` when the inner function returns its known maximum
#[derive(Clone, Debug)]
pub struct StopOnMaximum<F> {
    function: F,
    maximum: f64,
}

impl<F: Function> StopOnMaximum<F> {
    /// Wrap a function; it must have a known maximum
    pub fn new(function: F) -> EvoResult<Self> {
        let maximum = function.maximum().ok_or_else(|| {
            EvolutionError::configuration("stopping on the maximum needs a function with a known maximum")
        })?;
        Ok(Self { function, maximum })
    }

    /// Wrapped function
    pub fn inner(&self) -> &F {
        &self.function
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F: Function> Function for StopOnMaximum<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        Ok(match self.function.evaluate(bv)? {
            Evaluation::Value(value) if value == self.maximum => {
                Evaluation::Terminated(Termination::target_reached(bv.clone(), value))
            }
            other => other,
        })
    }

    fn maximum(&self) -> Option<f64> {
        Some(self.maximum)
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

/// Signals `TargetReached` when the inner function reaches a target value
#[derive(Clone, Debug)]
pub struct StopOnTarget<F> {
    function: F,
    target: f64,
}

impl<F> StopOnTarget<F> {
    /// Wrap a function with a target value
    pub fn new(function: F, target: f64) -> Self {
        Self { function, target }
    }

    /// Target value
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F: Function> Function for StopOnTarget<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        Ok(match self.function.evaluate(bv)? {
            Evaluation::Value(value) if value >= self.target => {
                Evaluation::Terminated(Termination::target_reached(bv.clone(), value))
            }
            other => other,
        })
    }

    fn maximum(&self) -> Option<f64> {
        self.function.maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

/// Tracks the best value seen so far
///
/// The first evaluation always counts as an improvement; after that only
/// strict improvements under the configured [`Sense`] do.
#[derive(Clone, Debug)]
pub struct ProgressTracker<F> {
    function: F,
    sense: Sense,
    log_improvement: bool,
    record_evaluation_time: bool,
    num_calls: usize,
    best_solution: Option<BitString>,
    last_improvement: Option<ImprovementEvent>,
    improvements: Vec<ImprovementEvent>,
    evaluation_time: Duration,
}

impl<F> ProgressTracker<F> {
    /// Wrap a function, maximizing, with logging off
    pub fn new(function: F) -> Self {
        Self {
            function,
            sense: Sense::Maximize,
            log_improvement: false,
            record_evaluation_time: false,
            num_calls: 0,
            best_solution: None,
            last_improvement: None,
            improvements: Vec::new(),
            evaluation_time: Duration::ZERO,
        }
    }

    /// Set the optimization direction
    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    /// Record and log every improvement
    pub fn with_log_improvement(mut self, log_improvement: bool) -> Self {
        self.log_improvement = log_improvement;
        self
    }

    /// Accumulate the wall time spent in the inner function
    pub fn with_record_evaluation_time(mut self, record: bool) -> Self {
        self.record_evaluation_time = record;
        self
    }

    /// Evaluations since creation or the last reset
    pub fn num_calls(&self) -> usize {
        self.num_calls
    }

    /// Best value seen so far
    pub fn best_value(&self) -> Option<f64> {
        self.last_improvement.map(|e| e.value)
    }

    /// Bit string of the best value seen so far
    pub fn best_solution(&self) -> Option<&BitString> {
        self.best_solution.as_ref()
    }

    /// Most recent improvement
    pub fn last_improvement(&self) -> Option<ImprovementEvent> {
        self.last_improvement
    }

    /// Every improvement, if logging is on
    pub fn improvements(&self) -> &[ImprovementEvent] {
        &self.improvements
    }

    /// Time spent in the inner function, if recording is on
    pub fn evaluation_time(&self) -> Duration {
        self.evaluation_time
    }

    /// Forget all progress
    pub fn reset(&mut self) {
        self.num_calls = 0;
        self.best_solution = None;
        self.last_improvement = None;
        self.improvements.clear();
        self.evaluation_time = Duration::ZERO;
    }

    /// Wrapped function
    pub fn inner(&self) -> &F {
        &self.function
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }

    fn record(&mut self, bv: &BitString, value: f64) {
        self.num_calls += 1;
        let improved = match self.last_improvement {
            None => true,
            Some(best) => self.sense.is_better(value, best.value),
        };
        if !improved {
            return;
        }
        let event = ImprovementEvent {
            evaluation: self.num_calls,
            value,
        };
        self.last_improvement = Some(event);
        self.best_solution = Some(bv.clone());
        if self.log_improvement {
            info!(evaluation = event.evaluation, value, "improvement");
            self.improvements.push(event);
        }
    }
}

impl<F: Function> Function for ProgressTracker<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        let result = if self.record_evaluation_time {
            let start = Instant::now();
            let result = self.function.evaluate(bv);
            self.evaluation_time += start.elapsed();
            result?
        } else {
            self.function.evaluate(bv)?
        };
        if let Some(&value) = result.evaluated_value() {
            self.record(bv, value);
        }
        Ok(result)
    }

    fn maximum(&self) -> Option<f64> {
        self.function.maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}

/// Memoizes values per bit string
#[derive(Clone, Debug)]
pub struct Cache<F> {
    function: F,
    values: HashMap<BitString, f64>,
    num_calls: usize,
    num_lookups: usize,
}

impl<F> Cache<F> {
    /// Wrap a function
    pub fn new(function: F) -> Self {
        Self {
            function,
            values: HashMap::new(),
            num_calls: 0,
            num_lookups: 0,
        }
    }

    /// Calls answered from the cache
    pub fn num_lookups(&self) -> usize {
        self.num_lookups
    }

    /// All calls, answered from the cache or not
    pub fn num_calls(&self) -> usize {
        self.num_calls
    }

    /// Fraction of calls answered from the cache
    pub fn lookup_ratio(&self) -> f64 {
        if self.num_calls == 0 {
            0.0
        } else {
            self.num_lookups as f64 / self.num_calls as f64
        }
    }

    /// Drop every cached value and reset the counters
    pub fn clear(&mut self) {
        self.values.clear();
        self.num_calls = 0;
        self.num_lookups = 0;
    }

    /// Unwrap the function
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F: Function> Function for Cache<F> {
    fn bv_size(&self) -> usize {
        self.function.bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        self.num_calls += 1;
        if let Some(&value) = self.values.get(bv) {
            self.num_lookups += 1;
            return Ok(Evaluation::Value(value));
        }
        let result = self.function.evaluate(bv)?;
        if let Some(&value) = result.evaluated_value() {
            self.values.insert(bv.clone(), value);
        }
        Ok(result)
    }

    fn maximum(&self) -> Option<f64> {
        self.function.maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        self.function.describe(bv)
    }
}
