//! Permutation values
//!
//! A [`Permutation`] is what a permutation representation decodes to: an
//! ordering of the indices `0..n`.

use serde::{Deserialize, Serialize};

use crate::error::EvolutionError;

/// Ordering of the indices `0..n`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Try to create a permutation, returning an error if the input is not a
    /// permutation of `0..n`
    pub fn try_new(perm: Vec<usize>) -> Result<Self, EvolutionError> {
        if is_permutation(&perm) {
            Ok(Self { perm })
        } else {
            Err(EvolutionError::configuration(format!(
                "{perm:?} is not a permutation of 0..{}",
                perm.len()
            )))
        }
    }

    /// Create the identity permutation [0, 1, 2, ..., n-1]
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
        }
    }

    /// Build a permutation from its Lehmer code
    ///
    /// `code[i]` indexes into the elements not yet placed, in increasing order.
    /// Entries past the pool size wrap around, so every code is accepted.
    pub fn from_lehmer_code(code: &[usize]) -> Self {
        let n = code.len();
        let mut pool: Vec<usize> = (0..n).collect();
        let mut perm = Vec::with_capacity(n);
        for &index in code {
            let pick = index % pool.len();
            perm.push(pool.remove(pick));
        }
        Self { perm }
    }

    /// Lehmer code of this permutation
    ///
    /// Inverse of [`Permutation::from_lehmer_code`] for in-range codes.
    pub fn lehmer_code(&self) -> Vec<usize> {
        self.perm
            .iter()
            .enumerate()
            .map(|(i, &x)| self.perm[i + 1..].iter().filter(|&&y| y < x).count())
            .collect()
    }

    /// Get the length of the permutation
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Get the element at index i
    pub fn get(&self, i: usize) -> Option<usize> {
        self.perm.get(i).copied()
    }

    /// Get the inverse permutation
    ///
    /// If `perm[i] = j`, then `inverse[j] = i`
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.perm.len()];
        for (i, &j) in self.perm.iter().enumerate() {
            inv[j] = i;
        }
        Self { perm: inv }
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<usize> {
        self.perm
    }

    /// Get the permutation as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }
}

fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &i in perm {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.perm[index]
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = EvolutionError;

    fn try_from(perm: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_new(perm)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.perm
    }
}

impl std::fmt::Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.perm.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}
