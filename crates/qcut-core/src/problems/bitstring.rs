//! Node assignments.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One partition label per node: character `i` is node `i`.
///
/// Ordering is lexicographic on the characters, so `"001" < "010"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring(Vec<bool>);

/// Error parsing a bitstring from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid character {ch:?} at position {position}; expected '0' or '1'")]
pub struct ParseBitstringError {
    /// Offending character.
    pub ch: char,
    /// Position in the input.
    pub position: usize,
}

impl Bitstring {
    /// Wrap a vector of labels.
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// All-zero bitstring of the given width.
    pub fn zeros(width: usize) -> Self {
        Self(vec![false; width])
    }

    /// Fixed-width binary representation of `value`, most significant digit
    /// first: `from_index(1, 3)` is `"001"`.
    pub fn from_index(value: u64, width: usize) -> Self {
        Self(
            (0..width)
                .map(|i| {
                    let shift = width - 1 - i;
                    shift < 64 && (value >> shift) & 1 == 1
                })
                .collect(),
        )
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-width bitstring.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The labels as a slice.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Flip every label.
    pub fn complement(&self) -> Self {
        Self(self.0.iter().map(|b| !b).collect())
    }

    /// Nodes labelled `0` and nodes labelled `1`.
    pub fn partition(&self) -> (Vec<usize>, Vec<usize>) {
        let mut zeros = vec![];
        let mut ones = vec![];
        for (node, &bit) in self.0.iter().enumerate() {
            if bit {
                ones.push(node);
            } else {
                zeros.push(node);
            }
        }
        (zeros, ones)
    }

    /// Copy with the characters in reverse order.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

impl Index<usize> for Bitstring {
    type Output = bool;

    fn index(&self, node: usize) -> &bool {
        &self.0[node]
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstring {
    type Err = ParseBitstringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseBitstringError { ch, position }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for Bitstring {
    type Error = ParseBitstringError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Bitstring> for String {
    fn from(b: Bitstring) -> Self {
        b.to_string()
    }
}

impl From<Vec<bool>> for Bitstring {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}
