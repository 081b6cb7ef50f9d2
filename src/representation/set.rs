//! Composite representation of heterogeneous variables
//!
//! A [`RepresentationSet`] lays out every variable of a universal function in
//! one bit string: booleans first, then integers, floats, complexes,
//! categoricals and permutations, each in the order given, each slice
//! starting right after the previous one.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::categorical::LinearCategorical;
use super::complex::DyadicComplex;
use super::config::RepresentationSetConfig;
use super::float::DyadicFloat;
use super::integer::DyadicInteger;
use super::permutation::PermutationRepresentation;
use super::Representation;
use crate::error::{EvoResult, EvolutionError};
use crate::genome::bit_string::BitString;
use crate::genome::permutation::Permutation;

/// Decoded values of every variable, grouped by kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    pub booleans: Vec<bool>,
    pub integers: Vec<i64>,
    pub floats: Vec<f64>,
    pub complexes: Vec<Complex64>,
    pub categoricals: Vec<usize>,
    pub permutations: Vec<Permutation>,
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    write!(f, "{name}: [")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    writeln!(f, "]")
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booleans: Vec<u8> = self.booleans.iter().map(|&b| u8::from(b)).collect();
        write_list(f, "booleans", &booleans)?;
        write_list(f, "integers", &self.integers)?;
        write_list(f, "floats", &self.floats)?;
        write_list(f, "complexes", &self.complexes)?;
        write_list(f, "categoricals", &self.categoricals)?;
        write_list(f, "permutations", &self.permutations)
    }
}

/// Ordered representations of every variable of a universal function
///
/// Immutable once built; the total width is computed at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepresentationSet {
    num_booleans: usize,
    integers: Vec<DyadicInteger>,
    floats: Vec<DyadicFloat>,
    complexes: Vec<DyadicComplex>,
    categoricals: Vec<LinearCategorical>,
    permutations: Vec<PermutationRepresentation>,
    total_bit_width: usize,
}

impl RepresentationSet {
    /// Create a set from its representation lists
    pub fn new(
        num_booleans: usize,
        integers: Vec<DyadicInteger>,
        floats: Vec<DyadicFloat>,
        complexes: Vec<DyadicComplex>,
        categoricals: Vec<LinearCategorical>,
        permutations: Vec<PermutationRepresentation>,
    ) -> Self {
        let total_bit_width = num_booleans
            + total_width(&integers)
            + total_width(&floats)
            + total_width(&complexes)
            + total_width(&categoricals)
            + total_width(&permutations);
        Self {
            num_booleans,
            integers,
            floats,
            complexes,
            categoricals,
            permutations,
            total_bit_width,
        }
    }

    /// Validate a configuration and build the set it describes
    pub fn from_config(config: &RepresentationSetConfig) -> EvoResult<Self> {
        Ok(Self::new(
            config.booleans,
            build_all(&config.integers, |c| c.build())?,
            build_all(&config.floats, |c| c.build())?,
            build_all(&config.complexes, |c| c.build())?,
            build_all(&config.categoricals, |c| c.build())?,
            build_all(&config.permutations, |c| c.build())?,
        ))
    }

    /// Total number of bits a bit string must have
    pub fn total_bit_width(&self) -> usize {
        self.total_bit_width
    }

    /// Number of boolean variables
    pub fn num_booleans(&self) -> usize {
        self.num_booleans
    }

    /// Integer representations
    pub fn integers(&self) -> &[DyadicInteger] {
        &self.integers
    }

    /// Real representations
    pub fn floats(&self) -> &[DyadicFloat] {
        &self.floats
    }

    /// Complex representations
    pub fn complexes(&self) -> &[DyadicComplex] {
        &self.complexes
    }

    /// Categorical representations
    pub fn categoricals(&self) -> &[LinearCategorical] {
        &self.categoricals
    }

    /// Permutation representations
    pub fn permutations(&self) -> &[PermutationRepresentation] {
        &self.permutations
    }

    /// Decode a full bit string into every variable
    pub fn decode_all(&self, bv: &BitString) -> EvoResult<Variables> {
        self.decode_bits(bv.bits())
    }

    /// Decode a full bit slice into every variable
    pub fn decode_bits(&self, bits: &[bool]) -> EvoResult<Variables> {
        if bits.len() != self.total_bit_width {
            return Err(EvolutionError::configuration(format!(
                "bit vector of {} bits given to a representation set of {} bits",
                bits.len(),
                self.total_bit_width
            )));
        }
        let mut cursor = Cursor { bits, start: 0 };
        let booleans = cursor.take(self.num_booleans).to_vec();
        Ok(Variables {
            booleans,
            integers: cursor.decode_each(&self.integers),
            floats: cursor.decode_each(&self.floats),
            complexes: cursor.decode_each(&self.complexes),
            categoricals: cursor.decode_each(&self.categoricals),
            permutations: cursor.decode_each(&self.permutations),
        })
    }

    /// Encode values of every variable into a bit string
    pub fn encode_all(&self, variables: &Variables) -> EvoResult<BitString> {
        check_arity("boolean", self.num_booleans, variables.booleans.len())?;
        let mut bits = Vec::with_capacity(self.total_bit_width);
        bits.extend_from_slice(&variables.booleans);
        encode_each(&mut bits, "integer", &self.integers, &variables.integers)?;
        encode_each(&mut bits, "real", &self.floats, &variables.floats)?;
        encode_each(&mut bits, "complex", &self.complexes, &variables.complexes)?;
        encode_each(
            &mut bits,
            "categorical",
            &self.categoricals,
            &variables.categoricals,
        )?;
        encode_each(
            &mut bits,
            "permutation",
            &self.permutations,
            &variables.permutations,
        )?;
        Ok(BitString::new(bits))
    }
}

impl fmt::Display for RepresentationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} bits", self.total_bit_width)?;
        if self.num_booleans > 0 {
            writeln!(f, "booleans: {}", self.num_booleans)?;
        }
        for rep in &self.integers {
            writeln!(f, "integer: {rep}")?;
        }
        for rep in &self.floats {
            writeln!(f, "real: {rep}")?;
        }
        for rep in &self.complexes {
            writeln!(f, "complex: {rep}")?;
        }
        for rep in &self.categoricals {
            writeln!(f, "categorical: {rep}")?;
        }
        for rep in &self.permutations {
            writeln!(f, "permutation: {rep}")?;
        }
        Ok(())
    }
}

struct Cursor<'a> {
    bits: &'a [bool],
    start: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, width: usize) -> &'a [bool] {
        let slice = &self.bits[self.start..self.start + width];
        self.start += width;
        slice
    }

    fn decode_each<R: Representation>(&mut self, reps: &[R]) -> Vec<R::Value> {
        reps.iter()
            .map(|rep| rep.decode_unchecked(self.take(rep.bit_width())))
            .collect()
    }
}

fn total_width<R: Representation>(reps: &[R]) -> usize {
    reps.iter().map(Representation::bit_width).sum()
}

fn build_all<C, R>(configs: &[C], build: impl Fn(&C) -> EvoResult<R>) -> EvoResult<Vec<R>> {
    configs.iter().map(build).collect()
}

fn check_arity(kind: &str, expected: usize, actual: usize) -> EvoResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvolutionError::configuration(format!(
            "expected {expected} {kind} values, got {actual}"
        )))
    }
}

fn encode_each<R: Representation>(
    bits: &mut Vec<bool>,
    kind: &str,
    reps: &[R],
    values: &[R::Value],
) -> EvoResult<()> {
    check_arity(kind, reps.len(), values.len())?;
    for (rep, value) in reps.iter().zip(values) {
        bits.extend(rep.encode(value)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::config::CategoricalConfig;

    fn mixed_set() -> RepresentationSet {
        RepresentationSet::new(
            2,
            vec![DyadicInteger::exact(0, 3).unwrap()],
            vec![DyadicFloat::new(-2.0, 2.0, 8).unwrap()],
            vec![DyadicComplex::square(0.0, 1.0, 2).unwrap()],
            vec![LinearCategorical::new(4).unwrap()],
            vec![PermutationRepresentation::new(3, 0).unwrap()],
        )
    }

    #[test]
    fn test_total_bit_width() {
        // 2 + 2 + 8 + 4 + 2 + 3
        assert_eq!(mixed_set().total_bit_width(), 21);
        assert_eq!(RepresentationSet::default().total_bit_width(), 0);
    }

    #[test]
    fn test_decode_all_slices_in_order() {
        let set = mixed_set();
        let bv: BitString = "10\
                             11\
                             11111111\
                             1000\
                             00\
                             100"
            .parse()
            .unwrap();
        let vars = set.decode_all(&bv).unwrap();
        assert_eq!(vars.booleans, vec![true, false]);
        assert_eq!(vars.integers, vec![3]);
        assert_eq!(vars.floats, vec![1.984375]);
        assert_eq!(vars.complexes, vec![Complex64::new(0.5, 0.0)]);
        assert_eq!(vars.categoricals, vec![0]);
        assert_eq!(vars.permutations[0].as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn test_decode_all_rejects_wrong_length() {
        let set = mixed_set();
        let err = set.decode_all(&BitString::zeros(20)).unwrap_err();
        assert!(matches!(err, EvolutionError::Configuration(_)));
    }

    #[test]
    fn test_encode_all_inverts_decode() {
        let set = mixed_set();
        let bv: BitString = "011011001010011100101".parse().unwrap();
        let vars = set.decode_all(&bv).unwrap();
        let encoded = set.encode_all(&vars).unwrap();
        assert_eq!(set.decode_all(&encoded).unwrap(), vars);
    }

    #[test]
    fn test_encode_all_checks_arity() {
        let set = mixed_set();
        let mut vars = set.decode_all(&BitString::zeros(21)).unwrap();
        vars.integers.push(1);
        assert!(set.encode_all(&vars).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = RepresentationSetConfig {
            booleans: 1,
            categoricals: vec![CategoricalConfig { num_categories: 3 }],
            ..Default::default()
        };
        let set = RepresentationSet::from_config(&config).unwrap();
        assert_eq!(set.total_bit_width(), 3);

        let bad = RepresentationSetConfig {
            categoricals: vec![CategoricalConfig { num_categories: 0 }],
            ..Default::default()
        };
        assert!(RepresentationSet::from_config(&bad).is_err());
    }

    #[test]
    fn test_variables_display() {
        let vars = Variables {
            booleans: vec![true, false],
            integers: vec![-1, 4],
            ..Default::default()
        };
        assert_eq!(vars.to_string(), "booleans: [1, 0]\nintegers: [-1, 4]\n");
    }
}
