//! Universal functions and their bit string adapters
//!
//! A universal function is written over decoded variables (booleans,
//! integers, reals, complexes, categoricals, permutations). An adapter pairs
//! it with a [`RepresentationSet`] and exposes it through the plain bit
//! string contract, so every algorithm and controller works with it.

use super::traits::{check_bv_size, Function, MultiObjectiveFunction};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;
use crate::representation::config::RepresentationSetConfig;
use crate::representation::set::{RepresentationSet, Variables};
use crate::termination::Evaluation;

/// Single-objective function of decoded variables
pub trait UniversalFunction {
    /// Evaluate decoded variables
    fn evaluate(&mut self, variables: &Variables) -> f64;

    /// Known maximum, if any
    fn maximum(&self) -> Option<f64> {
        None
    }
}

impl<F> UniversalFunction for F
where
    F: FnMut(&Variables) -> f64,
{
    fn evaluate(&mut self, variables: &Variables) -> f64 {
        self(variables)
    }
}

/// Multiobjective function of decoded variables
pub trait MultiObjectiveUniversalFunction {
    /// Number of objectives written by [`evaluate`]
    ///
    /// [`evaluate`]: MultiObjectiveUniversalFunction::evaluate
    fn output_size(&self) -> usize;

    /// Write every objective of the decoded variables into `values`
    ///
    /// `values` is empty on entry.
    fn evaluate(&mut self, variables: &Variables, values: &mut Vec<f64>);
}

/// Multiobjective universal function backed by a closure
pub struct MultiObjectiveUniversalFn<F> {
    output_size: usize,
    objective: F,
}

impl<F> MultiObjectiveUniversalFn<F>
where
    F: FnMut(&Variables, &mut Vec<f64>),
{
    /// Wrap a closure writing `output_size` objectives
    pub fn new(output_size: usize, objective: F) -> Self {
        Self {
            output_size,
            objective,
        }
    }
}

impl<F> MultiObjectiveUniversalFunction for MultiObjectiveUniversalFn<F>
where
    F: FnMut(&Variables, &mut Vec<f64>),
{
    fn output_size(&self) -> usize {
        self.output_size
    }

    fn evaluate(&mut self, variables: &Variables, values: &mut Vec<f64>) {
        (self.objective)(variables, values)
    }
}

/// Bit string view of a [`UniversalFunction`]
pub struct UniversalFunctionAdapter<U> {
    function: U,
    representations: RepresentationSet,
    maximum: Option<f64>,
}

impl<U: UniversalFunction> UniversalFunctionAdapter<U> {
    /// Pair a universal function with the layout of its variables
    pub fn new(function: U, representations: RepresentationSet) -> Self {
        Self {
            function,
            representations,
            maximum: None,
        }
    }

    /// Build the layout from configuration, then pair it with the function
    pub fn from_config(function: U, config: &RepresentationSetConfig) -> EvoResult<Self> {
        Ok(Self::new(function, RepresentationSet::from_config(config)?))
    }

    /// Declare a known maximum, overriding the function's own
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Layout of the variables
    pub fn representations(&self) -> &RepresentationSet {
        &self.representations
    }

    /// Wrapped universal function
    pub fn function(&self) -> &U {
        &self.function
    }

    /// Decode a bit string into the function's variables
    pub fn decode(&self, bv: &BitString) -> EvoResult<Variables> {
        check_bv_size(self.representations.total_bit_width(), bv)?;
        self.representations.decode_all(bv)
    }
}

impl<U: UniversalFunction> Function for UniversalFunctionAdapter<U> {
    fn bv_size(&self) -> usize {
        self.representations.total_bit_width()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<f64>> {
        let variables = self.decode(bv)?;
        Ok(Evaluation::Value(self.function.evaluate(&variables)))
    }

    fn maximum(&self) -> Option<f64> {
        self.maximum.or_else(|| self.function.maximum())
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        Ok(self.decode(bv)?.to_string())
    }
}

/// Bit string view of a [`MultiObjectiveUniversalFunction`]
pub struct MultiObjectiveUniversalFunctionAdapter<U> {
    function: U,
    representations: RepresentationSet,
}

impl<U: MultiObjectiveUniversalFunction> MultiObjectiveUniversalFunctionAdapter<U> {
    /// Pair a universal function with the layout of its variables
    pub fn new(function: U, representations: RepresentationSet) -> Self {
        Self {
            function,
            representations,
        }
    }

    /// Build the layout from configuration, then pair it with the function
    pub fn from_config(function: U, config: &RepresentationSetConfig) -> EvoResult<Self> {
        Ok(Self::new(function, RepresentationSet::from_config(config)?))
    }

    /// Layout of the variables
    pub fn representations(&self) -> &RepresentationSet {
        &self.representations
    }

    /// Decode a bit string into the function's variables
    pub fn decode(&self, bv: &BitString) -> EvoResult<Variables> {
        check_bv_size(self.representations.total_bit_width(), bv)?;
        self.representations.decode_all(bv)
    }
}

impl<U: MultiObjectiveUniversalFunction> MultiObjectiveFunction
    for MultiObjectiveUniversalFunctionAdapter<U>
{
    fn bv_size(&self) -> usize {
        self.representations.total_bit_width()
    }

    fn output_size(&self) -> usize {
        self.function.output_size()
    }

    fn evaluate(&mut self, bv: &BitString) -> EvoResult<Evaluation<Vec<f64>>> {
        let variables = self.decode(bv)?;
        let expected = self.function.output_size();
        let mut values = Vec::with_capacity(expected);
        self.function.evaluate(&variables, &mut values);
        if values.len() != expected {
            return Err(EvolutionError::OutputSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Evaluation::Value(values))
    }

    fn describe(&self, bv: &BitString) -> EvoResult<String> {
        Ok(self.decode(bv)?.to_string())
    }
}
