//! Collation-based character equality.
//!
//! Characters are folded to a comparison key: NFD decomposition with the
//! combining marks dropped removes diacritics ("ï" → "i"), and lowercasing
//! removes case. Which of the two steps apply depends on the [`Strength`].

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which differences the collator still treats as significant.
///
/// Mirrors the `sensitivity` levels of locale collators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Only base letters differ: `a ≠ b`, `a = á`, `a = A`
    #[default]
    Base,
    /// Base letters and accents differ: `a ≠ á`, `a = A`
    Accent,
    /// Base letters and case differ: `a = á`, `a ≠ A`
    Case,
}

impl Strength {
    fn ignores_accents(self) -> bool {
        matches!(self, Strength::Base | Strength::Case)
    }

    fn ignores_case(self) -> bool {
        matches!(self, Strength::Base | Strength::Accent)
    }
}

impl std::str::FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Strength::Base),
            "accent" => Ok(Strength::Accent),
            "case" => Ok(Strength::Case),
            other => Err(format!("unknown collation strength: {other}")),
        }
    }
}

/// Locale-style character comparison at a fixed [`Strength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collator {
    strength: Strength,
}

impl Collator {
    /// Creates a collator comparing at the given strength.
    pub fn new(strength: Strength) -> Self {
        Self { strength }
    }

    /// Collator that only distinguishes base letters.
    pub fn base_letters() -> Self {
        Self::new(Strength::Base)
    }

    /// The strength this collator compares at.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Fold a character to its comparison key.
    pub fn key(&self, c: char) -> char {
        let base = if self.strength.ignores_accents() {
            strip_marks(c)
        } else {
            c
        };

        if self.strength.ignores_case() {
            base.to_lowercase().next().unwrap_or(base)
        } else {
            base
        }
    }

    /// Returns true if the two characters collate as equal.
    pub fn equals(&self, a: char, b: char) -> bool {
        a == b || self.key(a) == self.key(b)
    }

    /// Comparison keys for a whole sequence.
    pub(crate) fn keys(&self, chars: &[char]) -> Vec<char> {
        chars.iter().map(|&c| self.key(c)).collect()
    }
}

/// Base letter of `c` when its decomposition is one letter plus combining
/// marks, `c` itself otherwise.
///
/// Hangul syllables decompose into several jamo without any marks, so they
/// keep their own identity.
fn strip_marks(c: char) -> char {
    let mut letters = std::iter::once(c).nfd().filter(|d| !is_combining_mark(*d));
    match (letters.next(), letters.next()) {
        (Some(base), None) => base,
        _ => c,
    }
}
