// Automaton - the immutable compiled pattern set
//
// Owns the transition table, fail links, output arena and pattern
// metadata. Nothing here is mutated after the build, so an automaton can be
// shared by reference (or `Arc`) between any number of match engines.

use crate::compact::CompactTable;
use crate::engine::{FindIter, MatchEngine, MatchSet};
use crate::failure::goto;
use crate::output::OutputArena;
use crate::symbol::{PatternIndex, StateId, Symbol};
use crate::transitions::{SparseTable, Transitions};
use crate::AcResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Caller id and length of one compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatternInfo<I> {
    pub(crate) id: I,
    pub(crate) len: usize,
}

/// A compiled Aho-Corasick automaton
#[derive(Clone)]
pub struct Automaton<S, I, T = SparseTable<S>> {
    /// Explicit goto transitions
    table: T,

    /// Fail link of every state
    fail: Box<[StateId]>,

    /// Output set of every state
    outputs: OutputArena,

    /// Indexed by `PatternIndex`
    patterns: Box<[PatternInfo<I>]>,

    _symbol: std::marker::PhantomData<fn(S) -> S>,
}

/// Automaton backed by per-state ordered maps
pub type SparseAutomaton<S, I> = Automaton<S, I, SparseTable<S>>;

/// Automaton backed by a sorted transition array
pub type CompactAutomaton<S, I> = Automaton<S, I, CompactTable<S>>;

/// Size summary of an automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonStats {
    pub states: usize,
    pub transitions: usize,
    pub output_entries: usize,
    pub patterns: usize,

    /// Estimated heap usage of the flat tables in bytes
    pub memory_usage: usize,
}

impl<S, I, T> Automaton<S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    pub(crate) fn from_parts(
        table: T,
        fail: Box<[StateId]>,
        outputs: OutputArena,
        patterns: Box<[PatternInfo<I>]>,
    ) -> Self {
        debug_assert_eq!(table.state_count(), fail.len());
        debug_assert_eq!(table.state_count(), outputs.state_count());
        Self {
            table,
            fail,
            outputs,
            patterns,
            _symbol: std::marker::PhantomData,
        }
    }

    /// Number of states, root included
    pub fn state_count(&self) -> usize {
        self.fail.len()
    }

    /// Number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// All state ids in index order
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.fail.len() as u32).map(StateId::new)
    }

    /// The explicit transition table
    pub fn transitions(&self) -> &T {
        &self.table
    }

    /// Fail link of `state`
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn fail_link(&self, state: StateId) -> StateId {
        self.fail[state.as_usize()]
    }

    /// The patterns recognized on entering `state`
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn outputs(&self, state: StateId) -> MatchSet<'_, I> {
        MatchSet::new(self.outputs.get(state), &self.patterns)
    }

    pub(crate) fn output_indices(&self, state: StateId) -> &[PatternIndex] {
        self.outputs.get(state)
    }

    pub(crate) fn pattern_infos(&self) -> &[PatternInfo<I>] {
        &self.patterns
    }

    /// The caller id of a pattern
    pub fn pattern_id(&self, pattern: PatternIndex) -> Option<&I> {
        self.patterns.get(pattern as usize).map(|p| &p.id)
    }

    /// The length in symbols of a pattern
    pub fn pattern_len(&self, pattern: PatternIndex) -> Option<usize> {
        self.patterns.get(pattern as usize).map(|p| p.len)
    }

    /// The state reached from `state` on `symbol`, following fail links
    ///
    /// Panics if `state` does not belong to this automaton.
    #[inline]
    pub fn next_state(&self, state: StateId, symbol: S) -> StateId {
        goto(&self.table, &self.fail, state, symbol)
    }

    /// Create a match engine bound to `text`
    pub fn engine<'a, 't>(&'a self, text: &'t [S]) -> MatchEngine<'a, 't, S, I, T> {
        MatchEngine::new(self, text)
    }

    /// Iterate over every (pattern, end offset) occurrence in `text`
    pub fn find_iter<'a, 't>(&'a self, text: &'t [S]) -> FindIter<'a, 't, S, I, T> {
        FindIter::new(self.engine(text))
    }

    /// Whether any pattern occurs in `text`
    pub fn is_match(&self, text: &[S]) -> bool {
        self.engine(text).advance()
    }

    pub fn stats(&self) -> AutomatonStats {
        let table_bytes = self.table.transition_count()
            * (std::mem::size_of::<S>() + 2 * std::mem::size_of::<StateId>());
        AutomatonStats {
            states: self.state_count(),
            transitions: self.table.transition_count(),
            output_entries: self.outputs.total(),
            patterns: self.patterns.len(),
            memory_usage: table_bytes
                + std::mem::size_of_val(&*self.fail)
                + self.outputs.memory_usage()
                + std::mem::size_of_val(&*self.patterns),
        }
    }
}

impl<S: Symbol, I> Automaton<S, I, SparseTable<S>> {
    /// Replace the map-backed table with a compact one
    ///
    /// Fail links, outputs and state numbering are unchanged; only the
    /// transition representation differs.
    pub fn into_compact(self) -> AcResult<CompactAutomaton<S, I>> {
        let table = CompactTable::from_sparse(&self.table)?;
        debug!(
            states = table.state_count(),
            transitions = table.transition_count(),
            "Compacted transition table"
        );
        Ok(Automaton::from_parts(
            table,
            self.fail,
            self.outputs,
            self.patterns,
        ))
    }
}

impl<S, I, T> fmt::Debug for Automaton<S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("states", &self.state_count())
            .field("transitions", &self.table.transition_count())
            .field("output_entries", &self.outputs.total())
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{AcBuilder, Pattern, StateId, Transitions};

    fn classic() -> crate::SparseAutomaton<u8, u32> {
        AcBuilder::new()
            .add_patterns([("he", 0), ("hers", 1), ("his", 2), ("she", 3)].map(Pattern::from))
            .build()
            .unwrap()
    }

    #[test]
    fn test_counts() {
        let ac = classic();
        assert_eq!(ac.state_count(), 10);
        assert_eq!(ac.pattern_count(), 4);
        assert_eq!(ac.states().count(), 10);
        assert_eq!(ac.fail_link(StateId::ROOT), StateId::ROOT);
    }

    #[test]
    fn test_next_state_total() {
        let ac = classic();
        for state in ac.states() {
            for symbol in 0..=255u8 {
                let next = ac.next_state(state, symbol);
                assert!(next.as_usize() < ac.state_count());
            }
        }
        assert_eq!(ac.next_state(StateId::ROOT, b'x'), StateId::ROOT);
    }

    #[test]
    fn test_pattern_metadata() {
        let ac = classic();
        assert_eq!(ac.pattern_id(1), Some(&1));
        assert_eq!(ac.pattern_len(1), Some(4));
        assert_eq!(ac.pattern_id(9), None);
    }

    #[test]
    fn test_into_compact_preserves_structure() {
        let sparse = classic();
        let compact = classic().into_compact().unwrap();

        assert_eq!(compact.state_count(), sparse.state_count());
        assert_eq!(
            compact.transitions().transition_count(),
            sparse.transitions().transition_count()
        );
        for state in sparse.states() {
            assert_eq!(compact.fail_link(state), sparse.fail_link(state));
            assert_eq!(
                compact.output_indices(state),
                sparse.output_indices(state)
            );
        }
    }

    #[test]
    fn test_stats() {
        let stats = classic().stats();
        assert_eq!(stats.states, 10);
        assert_eq!(stats.transitions, 9);
        assert_eq!(stats.patterns, 4);
        // he, hers, his, she(+he)
        assert_eq!(stats.output_entries, 5);
        assert!(stats.memory_usage > 0);
    }

    #[test]
    #[should_panic]
    fn test_fail_link_foreign_state_panics() {
        let ac = classic();
        ac.fail_link(StateId::new(10));
    }

    #[test]
    #[should_panic]
    fn test_outputs_foreign_state_panics() {
        let ac = classic().into_compact().unwrap();
        ac.outputs(StateId::new(u32::MAX));
    }

    #[test]
    fn test_is_match() {
        let ac = classic();
        assert!(ac.is_match(b"ushers"));
        assert!(!ac.is_match(b"xyz"));
        assert!(!ac.is_match(b""));
    }
}
