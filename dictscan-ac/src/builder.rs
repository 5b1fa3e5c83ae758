// Builder for the automaton
//
// Collects patterns, validates them against the configuration, inserts
// them into the trie and links the result. The build is all-or-nothing:
// any error is returned before an automaton exists.

use crate::automaton::{Automaton, PatternInfo};
use crate::failure::link;
use crate::pattern::Pattern;
use crate::symbol::{PatternIndex, Symbol};
use crate::transitions::Transitions;
use crate::trie::Trie;
use crate::{AcConfig, AcError, AcResult, CompactAutomaton, Resource, SparseAutomaton};
use tracing::{debug, warn};

/// Builder for constructing an automaton from a pattern set
#[derive(Debug, Clone)]
pub struct AcBuilder<S, I> {
    config: AcConfig,
    patterns: Vec<Pattern<S, I>>,
}

impl<S: Symbol, I> AcBuilder<S, I> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::with_config(AcConfig::default())
    }

    /// Create a new builder with custom configuration
    pub fn with_config(config: AcConfig) -> Self {
        Self {
            config,
            patterns: Vec::new(),
        }
    }

    /// Add a pattern from its symbols and id
    pub fn add(mut self, symbols: impl Into<Vec<S>>, id: I) -> Self {
        self.patterns.push(Pattern::new(symbols, id));
        self
    }

    /// Add a pattern to the set
    pub fn add_pattern(mut self, pattern: Pattern<S, I>) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Add multiple patterns, keeping their order
    pub fn add_patterns(mut self, patterns: impl IntoIterator<Item = Pattern<S, I>>) -> Self {
        self.patterns.extend(patterns);
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: AcConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the number of patterns added so far
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Build the automaton with a map-backed transition table
    pub fn build(self) -> AcResult<SparseAutomaton<S, I>> {
        let Self { config, patterns } = self;
        validate(&config, &patterns)?;

        if patterns.is_empty() {
            warn!("Building automaton from an empty pattern set; it will never match");
        }
        debug!(patterns = patterns.len(), "Building automaton");

        let mut trie = Trie::new(config.state_limit());
        let mut infos = Vec::with_capacity(patterns.len());
        for (index, pattern) in patterns.into_iter().enumerate() {
            // `validate` bounded the count, so the cast is lossless.
            trie.insert(pattern.symbols(), index as PatternIndex)?;
            let len = pattern.len();
            let (_, id) = pattern.into_parts();
            infos.push(PatternInfo { id, len });
        }

        let (fail, outputs) = link(trie.table(), trie.terminals())?;
        let table = trie.into_table();

        debug!(
            states = table.state_count(),
            transitions = table.transition_count(),
            output_entries = outputs.total(),
            "Automaton built"
        );

        Ok(Automaton::from_parts(
            table,
            fail,
            outputs,
            infos.into_boxed_slice(),
        ))
    }

    /// Build the automaton and compact its transition table
    pub fn build_compact(self) -> AcResult<CompactAutomaton<S, I>> {
        self.build()?.into_compact()
    }
}

impl<S: Symbol, I> Default for AcBuilder<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<S, I>(config: &AcConfig, patterns: &[Pattern<S, I>]) -> AcResult<()> {
    if config.max_patterns > 0 && patterns.len() > config.max_patterns {
        return Err(AcError::TooManyPatterns {
            count: patterns.len(),
            max: config.max_patterns,
        });
    }

    if PatternIndex::try_from(patterns.len()).is_err() {
        return Err(AcError::BuildResourceExceeded {
            resource: Resource::Patterns,
            limit: PatternIndex::MAX as usize,
        });
    }

    for (index, pattern) in patterns.iter().enumerate() {
        pattern.validate(config, index)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmptyPatternPolicy, StateId};

    #[test]
    fn test_builder_creation() {
        let builder = AcBuilder::<u8, u32>::new();
        assert_eq!(builder.pattern_count(), 0);
    }

    #[test]
    fn test_builder_chaining() {
        let builder = AcBuilder::new()
            .add(*b"bash", 0u32)
            .add_pattern(Pattern::from_bytes("ssh", 1))
            .add_patterns(vec![Pattern::from_bytes("curl", 2)]);
        assert_eq!(builder.pattern_count(), 3);

        let ac = builder.build().unwrap();
        assert_eq!(ac.pattern_count(), 3);
    }

    #[test]
    fn test_empty_set_builds_root_only() {
        let ac = AcBuilder::<u8, u32>::new().build().unwrap();
        assert_eq!(ac.state_count(), 1);
        assert_eq!(ac.fail_link(StateId::ROOT), StateId::ROOT);
        assert!(ac.outputs(StateId::ROOT).is_empty());
    }

    #[test]
    fn test_empty_pattern_rejected_by_default() {
        let result = AcBuilder::new()
            .add(*b"ok", 0u32)
            .add(Vec::new(), 1)
            .build();
        assert!(matches!(
            result,
            Err(AcError::InvalidPattern { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_pattern_accepted_marks_root() {
        let config = AcConfig {
            empty_patterns: EmptyPatternPolicy::Accept,
            ..Default::default()
        };
        let ac = AcBuilder::with_config(config)
            .add(Vec::<u8>::new(), 7u32)
            .add(*b"ab", 8)
            .build()
            .unwrap();
        assert_eq!(ac.outputs(StateId::ROOT).iter().collect::<Vec<_>>(), vec![&7]);

        // Every state inherits the empty pattern through its fail chain.
        for state in ac.states() {
            assert!(ac.outputs(state).iter().any(|&id| id == 7));
        }
    }

    #[test]
    fn test_too_many_patterns() {
        let config = AcConfig {
            max_patterns: 1,
            ..Default::default()
        };
        let result = AcBuilder::with_config(config)
            .add(*b"a", 0u32)
            .add(*b"b", 1)
            .build();
        assert_eq!(
            result.unwrap_err(),
            AcError::TooManyPatterns { count: 2, max: 1 }
        );
    }

    #[test]
    fn test_state_limit_aborts_build() {
        let config = AcConfig {
            max_states: 4,
            ..Default::default()
        };
        let result = AcBuilder::with_config(config)
            .add(*b"abc", 0u32)
            .add(*b"abd", 1)
            .build();
        assert_eq!(
            result.unwrap_err(),
            AcError::BuildResourceExceeded {
                resource: Resource::States,
                limit: 4
            }
        );
    }

    #[test]
    fn test_build_compact() {
        let ac = AcBuilder::new()
            .add(*b"he", 0u32)
            .add(*b"she", 1)
            .build_compact()
            .unwrap();
        assert_eq!(ac.state_count(), 6);
        assert_eq!(ac.transitions().as_slice().len(), 5);
    }
}
