//! Diagnostics and run records
//!
//! This module provides the records algorithms and controllers expose after a
//! run: solutions, improvement events and run summaries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::genome::bit_string::BitString;
use crate::termination::{Termination, TerminationReason};

/// Bit string with its value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution<V = f64> {
    /// The bit string
    pub bv: BitString,
    /// Its value (one scalar, or one entry per objective)
    pub value: V,
}

impl<V> Solution<V> {
    /// Create a new solution
    pub fn new(bv: BitString, value: V) -> Self {
        Self { bv, value }
    }
}

impl Solution<f64> {
    /// Replace this solution if `value` is strictly greater than its own
    ///
    /// Returns whether the replacement happened.
    pub fn update(&mut self, bv: &BitString, value: f64) -> bool {
        if value > self.value {
            self.bv.clone_from(bv);
            self.value = value;
            true
        } else {
            false
        }
    }
}

impl<V: std::fmt::Display> std::fmt::Display for Solution<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.bv, self.value)
    }
}

/// Record of a strict improvement of the best value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEvent {
    /// Number of evaluations when the improvement happened (1-based)
    pub evaluation: usize,
    /// The new best value
    pub value: f64,
}

impl std::fmt::Display for ImprovementEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.evaluation, self.value)
    }
}

/// Summary of one optimization run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Completed iterations (generations for population methods)
    pub iterations: usize,
    /// Signal that ended the run, if it did not end on its own
    pub termination: Option<TerminationReason>,
    /// Wall time of the run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Create a summary of a run that ended on its own
    pub fn completed(iterations: usize, elapsed: Duration) -> Self {
        Self {
            iterations,
            termination: None,
            elapsed,
        }
    }

    /// Create a summary of a run ended by a termination signal
    pub fn terminated<V>(iterations: usize, termination: &Termination<V>, elapsed: Duration) -> Self {
        Self {
            iterations,
            termination: Some(termination.reason),
            elapsed,
        }
    }

    /// Whether the run was ended by a termination signal
    pub fn was_terminated(&self) -> bool {
        self.termination.is_some()
    }
}

pub mod prelude {
    pub use super::{ImprovementEvent, RunSummary, Solution};
}
