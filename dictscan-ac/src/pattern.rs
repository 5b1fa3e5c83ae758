// Pattern types
//
// A pattern is an owned symbol sequence plus the caller's identifier for
// it. The identifier is opaque to the automaton: it is handed back on every
// match, so it can be a dense index into caller metadata, a rule name, or
// anything else that is cheap to borrow.

use crate::{AcConfig, AcError, AcResult, EmptyPatternPolicy};
use serde::{Deserialize, Serialize};

/// A pattern to compile into the automaton
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern<S, I> {
    /// The symbols to match
    symbols: Box<[S]>,

    /// Caller-supplied identifier reported on match
    id: I,
}

impl<S, I> Pattern<S, I> {
    /// Create a new pattern from any symbol sequence
    pub fn new(symbols: impl Into<Vec<S>>, id: I) -> Self {
        Self {
            symbols: symbols.into().into_boxed_slice(),
            id,
        }
    }

    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Split the pattern into its symbols and id
    pub fn into_parts(self) -> (Box<[S]>, I) {
        (self.symbols, self.id)
    }

    /// Validate this pattern against the build configuration
    ///
    /// `index` is the pattern's position in the build order and is only
    /// used for error reporting.
    pub fn validate(&self, config: &AcConfig, index: usize) -> AcResult<()> {
        if self.is_empty() && config.empty_patterns == EmptyPatternPolicy::Reject {
            return Err(AcError::InvalidPattern {
                index,
                reason: "pattern cannot be empty".to_string(),
            });
        }

        if config.max_pattern_length > 0 && self.len() > config.max_pattern_length {
            return Err(AcError::PatternTooLong {
                index,
                length: self.len(),
                max: config.max_pattern_length,
            });
        }

        Ok(())
    }
}

impl<I> Pattern<u8, I> {
    /// Create a byte pattern; the content may contain NUL bytes
    pub fn from_bytes(bytes: impl AsRef<[u8]>, id: I) -> Self {
        Self::new(bytes.as_ref(), id)
    }
}

impl<I> Pattern<char, I> {
    /// Create a pattern over Unicode scalar values
    pub fn from_chars(text: &str, id: I) -> Self {
        Self::new(text.chars().collect::<Vec<_>>(), id)
    }
}

impl<S, I> From<(Vec<S>, I)> for Pattern<S, I> {
    fn from((symbols, id): (Vec<S>, I)) -> Self {
        Self::new(symbols, id)
    }
}

impl<'a, I> From<(&'a str, I)> for Pattern<u8, I> {
    fn from((text, id): (&'a str, I)) -> Self {
        Self::from_bytes(text, id)
    }
}

impl<'a, I> From<(&'a [u8], I)> for Pattern<u8, I> {
    fn from((bytes, id): (&'a [u8], I)) -> Self {
        Self::from_bytes(bytes, id)
    }
}
