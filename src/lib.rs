//! # bitevo
//!
//! Bit-string evolutionary optimization with typed search spaces.
//!
//! Every algorithm in this library searches over fixed-length bit strings.
//! Typed variables (integers, floats, complex numbers, categories,
//! permutations) are reached through representations that decode slices of a
//! bit string, and functions are wrapped in controllers that count, track,
//! cache or stop evaluations.
//!
//! ## Core Concepts
//!
//! - **Representations**: total decoders from bit slices to typed values
//! - **Functions**: single- and multi-objective evaluation contracts over bit strings
//! - **Controllers**: wrappers around a function; termination travels back as a value
//! - **Algorithms**: random search, (1+1) EA, population pyramid and NSGA-II
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitevo::prelude::*;
//!
//! # fn main() -> Result<(), EvolutionError> {
//! let mut rng = Generator::seeded(42);
//! let mut function = StopOnMaximum::new(OneMax::new(32))?;
//!
//! let mut algorithm = ParameterlessPopulationPyramid::default();
//! let summary = algorithm.maximize(&mut function, &mut rng)?;
//! println!("{:?} after {} passes", summary.termination, summary.iterations);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod function;
pub mod genome;
pub mod operators;
pub mod random;
pub mod representation;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::function::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::random::Generator;
    pub use crate::representation::prelude::*;
    pub use crate::termination::prelude::*;
}
