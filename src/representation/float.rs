//! Dyadic real representation

use super::Representation;
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::{bits_to_u64, u64_to_bits};

/// Widest real representation, the resolution of an `f64` mantissa
pub const MAX_FLOAT_BITS: usize = 53;

/// Real number in `[lower, upper)` encoded as a binary fraction
///
/// A `k`-bit code `c` decodes to `lower + (upper - lower) * c / 2^k`, so the
/// precision is `(upper - lower) / 2^k`. A grid point that rounds onto
/// `upper` is replaced by the largest float below it.
#[derive(Clone, Debug, PartialEq)]
pub struct DyadicFloat {
    lower: f64,
    upper: f64,
    length: f64,
    num_bits: usize,
    scale: f64,
}

impl DyadicFloat {
    /// Create a representation with `num_bits` bits over `[lower, upper)`
    pub fn new(lower: f64, upper: f64, num_bits: usize) -> EvoResult<Self> {
        let length = interval_length(lower, upper)?;
        if num_bits == 0 || num_bits > MAX_FLOAT_BITS {
            return Err(EvolutionError::configuration(format!(
                "a real representation needs between 1 and {MAX_FLOAT_BITS} bits, got {num_bits}"
            )));
        }
        Ok(Self {
            lower,
            upper,
            length,
            num_bits,
            scale: (1u64 << num_bits) as f64,
        })
    }

    /// Create a representation whose grid step is at most `precision`
    pub fn with_precision(lower: f64, upper: f64, precision: f64) -> EvoResult<Self> {
        let length = interval_length(lower, upper)?;
        if !(precision.is_finite() && precision > 0.0) {
            return Err(EvolutionError::configuration(format!(
                "precision must be positive, got {precision}"
            )));
        }
        let ratio = length / precision;
        if !ratio.is_finite() || ratio > (1u64 << MAX_FLOAT_BITS) as f64 {
            return Err(EvolutionError::configuration(format!(
                "precision {precision} over [{lower}, {upper}) needs more than {MAX_FLOAT_BITS} bits"
            )));
        }
        let num_bits = if ratio > 1.0 {
            ratio.log2().ceil() as usize
        } else {
            1
        };
        Self::new(lower, upper, num_bits)
    }

    /// Lower bound (inclusive)
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound (exclusive)
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Distance between two consecutive representable values
    pub fn precision(&self) -> f64 {
        self.length / self.scale
    }
}

fn interval_length(lower: f64, upper: f64) -> EvoResult<f64> {
    if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
        return Err(EvolutionError::configuration(format!(
            "real lower bound {lower} must be below upper bound {upper}"
        )));
    }
    let length = upper - lower;
    if !length.is_finite() {
        return Err(EvolutionError::configuration(format!(
            "real interval [{lower}, {upper}) is wider than the largest f64"
        )));
    }
    Ok(length)
}

/// Largest `f64` strictly below a finite `x`
fn float_below(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

impl Representation for DyadicFloat {
    type Value = f64;

    fn bit_width(&self) -> usize {
        self.num_bits
    }

    fn decode_unchecked(&self, bits: &[bool]) -> f64 {
        // Exact: the code has at most 53 bits and the scale is a power of two
        let fraction = bits_to_u64(bits) as f64 / self.scale;
        let value = self.lower + self.length * fraction;
        if value < self.upper {
            value
        } else {
            float_below(self.upper)
        }
    }

    fn encode(&self, value: &f64) -> EvoResult<Vec<bool>> {
        if !(self.lower..=self.upper).contains(value) {
            return Err(EvolutionError::configuration(format!(
                "{value} is outside [{}, {}]",
                self.lower, self.upper
            )));
        }
        let max_code = (1u64 << self.num_bits) - 1;
        let code = (((value - self.lower) / self.length * self.scale).floor() as u64).min(max_code);
        let mut bits = vec![false; self.num_bits];
        u64_to_bits(code, &mut bits);
        Ok(bits)
    }
}

impl std::fmt::Display for DyadicFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) ({} bits)",
            self.lower,
            self.upper(),
            self.bit_width()
        )
    }
}
