//! Function traits
//!
//! This module defines the evaluation contract shared by raw functions,
//! adapters, controllers and algorithms.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;
use crate::termination::Evaluation;

/// Single-objective function of a bit string
///
/// `evaluate` takes `&mut self` so that controllers can keep counters and
/// records; raw functions are free to ignore it.
pub trait Function {
    /// Length of the bit strings this function accepts
    fn bv_size(&self) -> usize;

    /// Evaluate a bit string
    ///
    /// Returns [`Evaluation::Terminated`] when the run must stop.
    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>>;

    /// Known maximum, if any
    fn maximum(&self) -> Option<f64> {
        None
    }

    /// Whether the maximum is known
    fn has_known_maximum(&self) -> bool {
        self.maximum().is_some()
    }

    /// Human-readable form of a solution
    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        Ok(bv.to_string())
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn bv_size(&self) -> usize {
        (**self).bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        (**self).evaluate(bv)
    }

    fn maximum(&self) -> Option<f64> {
        (**self).maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        (**self).describe(bv)
    }
}

impl<F: Function + ?Sized> Function for &mut F {
    fn bv_size(&self) -> usize {
        (**self).bv_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        (**self).evaluate(bv)
    }

    fn maximum(&self) -> Option<f64> {
        (**self).maximum()
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        (**self).describe(bv)
    }
}

/// Multiobjective function of a bit string
pub trait MultiObjectiveFunction {
    /// Length of the bit strings this function accepts
    fn bv_size(&self) -> usize;

    /// Number of objectives
    fn output_size(&self) -> usize;

    /// Evaluate every objective of a bit string
    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>>;

    /// Human-readable form of a solution
    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        Ok(bv.to_string())
    }
}

impl<F: MultiObjectiveFunction + ?Sized> MultiObjectiveFunction for Box<F> {
    fn bv_size(&self) -> usize {
        (**self).bv_size()
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        (**self).evaluate(bv)
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        (**self).describe(bv)
    }
}

impl<F: MultiObjectiveFunction + ?Sized> MultiObjectiveFunction for &mut F {
    fn bv_size(&self) -> usize {
        (**self).bv_size()
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        (**self).evaluate(bv)
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        (**self).describe(bv)
    }
}

/// Optimization direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    #[default]
    Maximize,
    Minimize,
}

impl Sense {
    /// Whether `a` is strictly better than `b`
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Maximize => a > b,
            Self::Minimize => a < b,
        }
    }

    /// Whether `a` is at least as good as `b`
    pub fn is_at_least_as_good(self, a: f64, b: f64) -> bool {
        match self {
            Self::Maximize => a >= b,
            Self::Minimize => a <= b,
        }
    }

    /// Sign that turns this sense into minimization
    pub fn minimization_sign(self) -> f64 {
        match self {
            Self::Maximize => -1.0,
            Self::Minimize => 1.0,
        }
    }
}

/// Fail with a size mismatch unless `bv` has `expected` bits
pub fn check_bv_size(expected: usize, bv: &BitString) -> EvoResult<()> {
    if bv.len() == expected {
        Ok(())
    } else {
        Err(EvolutionError::SizeMismatch {
            expected,
            actual: bv.len(),
        })
    }
}

/// Single-objective function backed by a closure
pub struct FnFunction<F> {
    bv_size: usize,
    objective: F,
    maximum: Option<f64>,
}

impl<F> FnFunction<F>
where
    F: FnMut(&BitString) -> f64,
{
    /// Wrap a closure over bit strings of `bv_size` bits
    pub fn new(bv_size: usize, objective: F) -> Self {
        Self {
            bv_size,
            objective,
            maximum: None,
        }
    }

    /// Declare a known maximum
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

impl<F> Function for FnFunction<F>
where
    F: FnMut(&BitString) -> f64,
{
    fn bv_size(&self) -> usize {
        self.bv_size
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        check_bv_size(self.bv_size, bv)?;
        Ok(Evaluation::Value((self.objective)(bv)))
    }

    fn maximum(&self) -> Option<f64> {
        self.maximum
    }
}

/// Multiobjective function backed by a closure
pub struct FnMultiObjectiveFunction<F> {
    bv_size: usize,
    output_size: usize,
    objective: F,
}

impl<F> FnMultiObjectiveFunction<F>
where
    F: FnMut(&BitString) -> Vec<f64>,
{
    /// Wrap a closure returning `output_size` objectives
    pub fn new(bv_size: usize, output_size: usize, objective: F) -> Self {
        Self {
            bv_size,
            output_size,
            objective,
        }
    }
}

impl<F> MultiObjectiveFunction for FnMultiObjectiveFunction<F>
where
    F: FnMut(&BitString) -> Vec<f64>,
{
    fn bv_size(&self) -> usize {
        self.bv_size
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        check_bv_size(self.bv_size, bv)?;
        let values = (self.objective)(bv);
        if values.len() != self.output_size {
            return Err(EvolutionError::OutputSizeMismatch {
                expected: self.output_size,
                actual: values.len(),
            });
        }
        Ok(Evaluation::Value(values))
    }
}
