//! Dyadic complex representation

use num_complex::Complex64;

use super::float::DyadicFloat;
use super::Representation;
use crate::error::EvoResult;

/// Complex number built from two real representations
///
/// The real part is read first, then the imaginary part.
#[derive(Clone, Debug, PartialEq)]
pub struct DyadicComplex {
    real: DyadicFloat,
    imaginary: DyadicFloat,
}

impl DyadicComplex {
    /// Create a representation from its two parts
    pub fn new(real: DyadicFloat, imaginary: DyadicFloat) -> Self {
        Self { real, imaginary }
    }

    /// Create a representation using the same real representation for both parts
    pub fn square(lower: f64, upper: f64, num_bits: usize) -> EvoResult<Self> {
        let part = DyadicFloat::new(lower, upper, num_bits)?;
        Ok(Self::new(part.clone(), part))
    }

    /// Representation of the real part
    pub fn real(&self) -> &DyadicFloat {
        &self.real
    }

    /// Representation of the imaginary part
    pub fn imaginary(&self) -> &DyadicFloat {
        &self.imaginary
    }
}

impl Representation for DyadicComplex {
    type Value = Complex64;

    fn bit_width(&self) -> usize {
        self.real.bit_width() + self.imaginary.bit_width()
    }

    fn decode_unchecked(&self, bits: &[bool]) -> Complex64 {
        let (re, im) = bits.split_at(self.real.bit_width());
        Complex64::new(
            self.real.decode_unchecked(re),
            self.imaginary.decode_unchecked(im),
        )
    }

    fn encode(&self, value: &Complex64) -> EvoResult<Vec<bool>> {
        let mut bits = self.real.encode(&value.re)?;
        bits.extend(self.imaginary.encode(&value.im)?);
        Ok(bits)
    }
}

impl std::fmt::Display for DyadicComplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + i {}", self.real, self.imaginary)
    }
}
