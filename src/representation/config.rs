//! Serializable configuration for representations
//!
//! These types describe a [`RepresentationSet`] as plain data, so a set can be
//! read from a file and validated in one step with
//! [`RepresentationSet::from_config`].
//!
//! [`RepresentationSet`]: super::set::RepresentationSet
//! [`RepresentationSet::from_config`]: super::set::RepresentationSet::from_config

use serde::{Deserialize, Serialize};

use super::categorical::LinearCategorical;
use super::complex::DyadicComplex;
use super::float::DyadicFloat;
use super::integer::DyadicInteger;
use super::permutation::PermutationRepresentation;
use crate::error::EvoResult;

/// Integer variable in `[lower, upper]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegerConfig {
    /// Lower bound (inclusive)
    pub lower: i64,
    /// Upper bound (inclusive)
    pub upper: i64,
    /// Requested width; the complete width when absent
    #[serde(default)]
    pub num_bits: Option<usize>,
    /// Refuse widths that cannot reach every value of the range
    #[serde(default)]
    pub strict: bool,
}

impl IntegerConfig {
    /// Integer variable using the complete width
    pub fn new(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            num_bits: None,
            strict: false,
        }
    }

    /// Set the requested width
    pub fn with_num_bits(mut self, num_bits: usize) -> Self {
        self.num_bits = Some(num_bits);
        self
    }

    /// Set strict width checking
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate and build the representation
    pub fn build(&self) -> EvoResult<DyadicInteger> {
        match (self.num_bits, self.strict) {
            (None, _) => DyadicInteger::exact(self.lower, self.upper),
            (Some(k), true) => DyadicInteger::strict(self.lower, self.upper, k),
            (Some(k), false) => DyadicInteger::new(self.lower, self.upper, k),
        }
    }
}

/// How finely a real interval is sampled
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatResolution {
    /// Fixed number of bits
    Bits(usize),
    /// Largest acceptable grid step
    Precision(f64),
}

/// Real variable in `[lower, upper)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatConfig {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (exclusive)
    pub upper: f64,
    /// Number of bits or target precision
    pub resolution: FloatResolution,
}

impl FloatConfig {
    /// Real variable with a fixed number of bits
    pub fn with_bits(lower: f64, upper: f64, num_bits: usize) -> Self {
        Self {
            lower,
            upper,
            resolution: FloatResolution::Bits(num_bits),
        }
    }

    /// Real variable with a target precision
    pub fn with_precision(lower: f64, upper: f64, precision: f64) -> Self {
        Self {
            lower,
            upper,
            resolution: FloatResolution::Precision(precision),
        }
    }

    /// Validate and build the representation
    pub fn build(&self) -> EvoResult<DyadicFloat> {
        match self.resolution {
            FloatResolution::Bits(k) => DyadicFloat::new(self.lower, self.upper, k),
            FloatResolution::Precision(p) => {
                DyadicFloat::with_precision(self.lower, self.upper, p)
            }
        }
    }
}

/// Complex variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexConfig {
    /// Real part
    pub real: FloatConfig,
    /// Imaginary part
    pub imaginary: FloatConfig,
}

impl ComplexConfig {
    /// Validate and build the representation
    pub fn build(&self) -> EvoResult<DyadicComplex> {
        Ok(DyadicComplex::new(self.real.build()?, self.imaginary.build()?))
    }
}

/// Categorical variable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalConfig {
    /// Number of categories
    pub num_categories: usize,
}

impl CategoricalConfig {
    /// Validate and build the representation
    pub fn build(&self) -> EvoResult<LinearCategorical> {
        LinearCategorical::new(self.num_categories)
    }
}

/// Permutation variable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationConfig {
    /// Number of permuted elements
    pub length: usize,
    /// Extra bits per Lehmer digit
    #[serde(default)]
    pub extra_bits: usize,
}

impl PermutationConfig {
    /// Validate and build the representation
    pub fn build(&self) -> EvoResult<PermutationRepresentation> {
        PermutationRepresentation::new(self.length, self.extra_bits)
    }
}

/// Every variable of a universal function, grouped by kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepresentationSetConfig {
    /// Number of boolean variables
    pub booleans: usize,
    /// Integer variables
    pub integers: Vec<IntegerConfig>,
    /// Real variables
    pub floats: Vec<FloatConfig>,
    /// Complex variables
    pub complexes: Vec<ComplexConfig>,
    /// Categorical variables
    pub categoricals: Vec<CategoricalConfig>,
    /// Permutation variables
    pub permutations: Vec<PermutationConfig>,
}
