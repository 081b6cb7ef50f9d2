//! Search algorithms
//!
//! This module provides the algorithms that drive functions: single-objective
//! baselines, the parameter-less population pyramid and NSGA-II.

pub mod nsga2;
pub mod one_plus_one;
pub mod pyramid;
pub mod random_search;
pub mod traits;

pub mod prelude {
    pub use super::nsga2::{Nsga2, Nsga2Config, Nsga2Individual};
    pub use super::one_plus_one::*;
    pub use super::pyramid::*;
    pub use super::random_search::*;
    pub use super::traits::Algorithm;
}
