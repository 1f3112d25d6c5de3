// [libs/domain/models/src/prefix.rs]
/*!
 * APARATO: PREFIX VALUE OBJECT
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: VALIDACIÓN Y TRANSPORTE DE CLAVES DE BÚSQUEDA
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Σ = `a..z` then `0..9`, 36 symbols, letters strictly before digits.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("prefix is empty")]
    Empty,
    #[error("prefix contains symbol outside Σ: '{0}'")]
    IllegalSymbol(char),
}

/// A non-empty string over Σ. Ordering is length-then-lex, matching the
/// increment rule in the cursor generator: `"zz"` < `"aaa"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    pub fn new(raw: impl Into<String>) -> Result<Self, PrefixError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PrefixError::Empty);
        }
        if let Some(bad) = raw.chars().find(|c| !ALPHABET.contains(&(*c as u8))) {
            return Err(PrefixError::IllegalSymbol(bad));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Prefix {
    type Error = PrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Prefix::new(value)
    }
}

impl From<Prefix> for String {
    fn from(value: Prefix) -> Self {
        value.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prefix {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(Prefix::new(""), Err(PrefixError::Empty));
    }

    #[test]
    fn rejects_out_of_alphabet() {
        assert_eq!(Prefix::new("aZ"), Err(PrefixError::IllegalSymbol('Z')));
    }

    #[test]
    fn length_then_lex_ordering() {
        let zz = Prefix::new("zz").unwrap();
        let aaa = Prefix::new("aaa").unwrap();
        assert!(zz < aaa);
    }
}
