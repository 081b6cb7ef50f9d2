//! Genotypes and decoded structured values
//!
//! This module provides [`BitString`], the genotype every algorithm searches
//! over, and [`Permutation`], the value permutation representations decode to.

pub mod bit_string;
pub mod permutation;

pub mod prelude {
    pub use super::bit_string::*;
    pub use super::permutation::*;
}
