//! Functions and controllers
//!
//! This module defines the evaluation contract ([`Function`],
//! [`MultiObjectiveFunction`]), benchmark functions, universal function
//! adapters and the controllers that decorate any function.
//!
//! [`Function`]: traits::Function
//! [`MultiObjectiveFunction`]: traits::MultiObjectiveFunction

pub mod benchmarks;
pub mod controllers;
pub mod traits;
pub mod universal;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::controllers::*;
    pub use super::traits::*;
    pub use super::universal::*;
}
