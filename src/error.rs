//! Error types for bitevo
//!
//! This module defines all error types used throughout the library.
//!
//! Termination signals raised by controllers are not errors; they travel
//! through [`crate::termination::Evaluation`] instead.

use thiserror::Error;

/// Error type for variation operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Top-level error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Invalid configuration (bounds, widths, counts, parameters)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A bit vector does not have the length a function expects
    #[error("Size mismatch: expected {expected} bits, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A multiobjective function produced the wrong number of objectives
    #[error("Output size mismatch: expected {expected} objectives, got {actual}")]
    OutputSizeMismatch { expected: usize, actual: usize },

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,
}

impl EvolutionError {
    /// Shorthand for a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for library operations
pub type EvoResult<T> = Result<T, EvolutionError>;
