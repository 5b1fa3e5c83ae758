// dictscan AC - Aho-Corasick Multi-Pattern Automaton
//!
// This crate compiles a fixed set of patterns into a single automaton that
// finds every occurrence of every pattern in one linear pass over a text.
//
// ## Overview
//
// Patterns are sequences of any ordered symbol type (bytes, chars, tokens).
// The automaton is built once and is immutable afterwards, so any number of
// match engines can scan different texts against the same automaton at the
// same time.
//
// ## Architecture
//
// ```text
// ┌─────────────────────────────────────────────────┐
// │           AcBuilder                             │
// │  (validates patterns, inserts them in a trie)   │
// └──────────────┬──────────────────────────────────┘
//                │
//                v
// ┌─────────────────────────────────────────────────┐
// │         Fail links + output arena               │
// │  (BFS over the sparse table)                    │
// └──────────────┬──────────────────────────────────┘
//                │  optional: into_compact()
//                v
// ┌─────────────────────────────────────────────────┐
// │         MatchEngine                             │
// │  - bind(text) / advance()                       │
// │  - matches() / match_end_offset()               │
// └─────────────────────────────────────────────────┘
// ```

mod automaton;
mod builder;
mod compact;
mod dump;
mod engine;
mod failure;
mod output;
mod pattern;
mod symbol;
mod transitions;
mod trie;

#[cfg(test)]
mod perf;

pub use automaton::{Automaton, AutomatonStats, CompactAutomaton, SparseAutomaton};
pub use builder::AcBuilder;
pub use compact::{CompactTable, Transition};
pub use dump::{Dump, PatternRecord, Snapshot, StateRecord, TransitionRecord, SNAPSHOT_VERSION};
pub use engine::{FindIter, Match, MatchEngine, MatchSet};
pub use output::OutputArena;
pub use pattern::Pattern;
pub use symbol::{PatternIndex, StateId, Symbol};
pub use transitions::{SparseTable, Transitions};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while building or scanning with an automaton
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcError {
    #[error("Invalid pattern #{index}: {reason}")]
    InvalidPattern { index: usize, reason: String },

    #[error("Pattern #{index} too long: {length} symbols (max: {max})")]
    PatternTooLong {
        index: usize,
        length: usize,
        max: usize,
    },

    #[error("Too many patterns: {count} (max: {max})")]
    TooManyPatterns { count: usize, max: usize },

    #[error("Build resource exceeded: more than {limit} {resource}")]
    BuildResourceExceeded { resource: Resource, limit: usize },

    #[error("No match output: advance() has not reported a match since the last bind")]
    EmptyOutput,
}

/// The index space that overflowed during a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    States,
    Transitions,
    Patterns,
    Outputs,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::States => write!(f, "states"),
            Resource::Transitions => write!(f, "transitions"),
            Resource::Patterns => write!(f, "patterns"),
            Resource::Outputs => write!(f, "output entries"),
        }
    }
}

/// Result type for automaton operations
pub type AcResult<T> = Result<T, AcError>;

/// What the builder does with a zero-length pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPatternPolicy {
    /// Fail the build with `AcError::InvalidPattern`
    #[default]
    Reject,

    /// Mark the root as terminal; the pattern matches at every offset
    Accept,
}

/// Configuration for building an automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcConfig {
    /// Policy for zero-length patterns
    pub empty_patterns: EmptyPatternPolicy,

    /// Maximum number of patterns (0 = unlimited)
    pub max_patterns: usize,

    /// Maximum pattern length in symbols (0 = unlimited)
    pub max_pattern_length: usize,

    /// Maximum number of states, root included (0 = bounded by the index type only)
    pub max_states: usize,
}

impl Default for AcConfig {
    fn default() -> Self {
        Self {
            empty_patterns: EmptyPatternPolicy::Reject,
            max_patterns: 0,
            max_pattern_length: 0,
            max_states: 0,
        }
    }
}

impl AcConfig {
    /// The effective state limit after applying the index type bound
    pub(crate) fn state_limit(&self) -> usize {
        let index_bound = StateId::MAX_COUNT;
        if self.max_states == 0 {
            index_bound
        } else {
            self.max_states.min(index_bound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AcConfig::default();
        assert_eq!(config.empty_patterns, EmptyPatternPolicy::Reject);
        assert_eq!(config.max_patterns, 0);
        assert_eq!(config.max_pattern_length, 0);
        assert_eq!(config.state_limit(), StateId::MAX_COUNT);
    }

    #[test]
    fn test_state_limit_is_clamped() {
        let config = AcConfig {
            max_states: 8,
            ..Default::default()
        };
        assert_eq!(config.state_limit(), 8);

        let config = AcConfig {
            max_states: usize::MAX,
            ..Default::default()
        };
        assert_eq!(config.state_limit(), StateId::MAX_COUNT);
    }

    #[test]
    fn test_config_from_json() {
        let config: AcConfig =
            serde_json::from_str(r#"{"empty_patterns": "accept", "max_states": 64}"#).unwrap();
        assert_eq!(config.empty_patterns, EmptyPatternPolicy::Accept);
        assert_eq!(config.max_states, 64);
        assert_eq!(config.max_patterns, 0);
    }

    #[test]
    fn test_error_display() {
        let err = AcError::InvalidPattern {
            index: 3,
            reason: "empty".to_string(),
        };
        assert!(err.to_string().contains("#3"));

        let err = AcError::BuildResourceExceeded {
            resource: Resource::States,
            limit: 16,
        };
        assert_eq!(err.to_string(), "Build resource exceeded: more than 16 states");
    }
}
