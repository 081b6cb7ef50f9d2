//! Termination signals
//!
//! A function (usually a controller) ends a run by returning
//! [`Evaluation::Terminated`] instead of a value. The signal is not an error:
//! it travels unchanged through every enclosing controller up to the
//! algorithm loop, which ends the run successfully.
//!
//! Inside algorithms, [`Halt`] merges termination and errors so that `?` can
//! unwind both out of helper functions.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;

/// Why a run was asked to stop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// A target value (for instance the known maximum) was reached
    TargetReached,
    /// The evaluation budget is exhausted
    LastEvaluation,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetReached => write!(f, "target reached"),
            Self::LastEvaluation => write!(f, "last evaluation"),
        }
    }
}

/// Bit string and value of the evaluation that raised a signal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger<V> {
    pub solution: BitString,
    pub value: V,
}

/// Termination signal with its reason and optional trigger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Termination<V> {
    pub reason: TerminationReason,
    pub trigger: Option<Trigger<V>>,
}

impl<V> Termination<V> {
    /// Target reached by `solution` with `value`
    pub fn target_reached(solution: BitString, value: V) -> Self {
        Self {
            reason: TerminationReason::TargetReached,
            trigger: Some(Trigger { solution, value }),
        }
    }

    /// Budget exhausted, optionally by a final evaluation
    pub fn last_evaluation(trigger: Option<Trigger<V>>) -> Self {
        Self {
            reason: TerminationReason::LastEvaluation,
            trigger,
        }
    }

    /// Transform the value carried by the trigger
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Termination<W> {
        Termination {
            reason: self.reason,
            trigger: self.trigger.map(|t| Trigger {
                solution: t.solution,
                value: f(t.value),
            }),
        }
    }
}

/// Outcome of one evaluation
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation<V> {
    /// Normal result
    Value(V),
    /// The run must stop
    Terminated(Termination<V>),
}

impl<V> Evaluation<V> {
    /// Split into the value or the termination signal
    pub fn into_result(self) -> Result<V, Termination<V>> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Terminated(t) => Err(t),
        }
    }

    /// Value of a normal result
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Terminated(_) => None,
        }
    }

    /// Value produced by the evaluation, whether or not it terminated the run
    pub fn evaluated_value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Terminated(t) => t.trigger.as_ref().map(|t| &t.value),
        }
    }

    /// Whether the run must stop
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    /// Transform the value, including the one carried by a trigger
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Evaluation<W> {
        match self {
            Self::Value(v) => Evaluation::Value(f(v)),
            Self::Terminated(t) => Evaluation::Terminated(t.map(f)),
        }
    }
}

/// Reason an algorithm step stopped early
#[derive(Clone, Debug, PartialEq)]
pub enum Halt<V> {
    /// A function signalled termination
    Terminated(Termination<V>),
    /// A genuine error
    Failed(EvolutionError),
}

impl<V> Halt<V> {
    /// Convert into the outcome of a run
    ///
    /// Termination is a successful end; only failures become errors.
    pub fn into_outcome(self) -> EvoResult<Termination<V>> {
        match self {
            Self::Terminated(t) => Ok(t),
            Self::Failed(e) => Err(e),
        }
    }
}

impl<V> From<Termination<V>> for Halt<V> {
    fn from(t: Termination<V>) -> Self {
        Self::Terminated(t)
    }
}

impl<V> From<EvolutionError> for Halt<V> {
    fn from(e: EvolutionError) -> Self {
        Self::Failed(e)
    }
}

/// Result of an algorithm step
pub type StepResult<T, V = f64> = Result<T, Halt<V>>;

pub mod prelude {
    pub use super::{Evaluation, Halt, StepResult, Termination, TerminationReason, Trigger};
}
