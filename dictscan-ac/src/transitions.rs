// Transition tables
//
// The goto function is expressed as a capability with two backing
// representations: the sparse, map-backed table built by the trie and the
// compact, array-backed table produced from it. Fail-link construction and
// matching are written against the trait only.

use crate::symbol::{StateId, Symbol};
use std::collections::{btree_map, BTreeMap};
use std::iter::Map;

/// Read access to an explicit (state, symbol) -> state relation
pub trait Transitions<S: Symbol> {
    /// Iterator over one state's outgoing edges
    type Edges<'a>: Iterator<Item = (S, StateId)>
    where
        Self: 'a;

    /// The explicit transition for `symbol` out of `state`, if any
    fn lookup(&self, state: StateId, symbol: S) -> Option<StateId>;

    /// Outgoing edges of `state` in ascending symbol order
    ///
    /// Panics if `state` does not belong to this table.
    fn edges(&self, state: StateId) -> Self::Edges<'_>;

    /// Number of states, root included
    fn state_count(&self) -> usize;

    /// Number of explicit transitions across all states
    fn transition_count(&self) -> usize;
}

type SparseEdge<'a, S> = (&'a S, &'a StateId);

/// Map-backed transition table: one ordered map per state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseTable<S> {
    states: Vec<BTreeMap<S, StateId>>,
    transitions: usize,
}

impl<S: Symbol> SparseTable<S> {
    /// A table holding only the root state
    pub fn new() -> Self {
        Self {
            states: vec![BTreeMap::new()],
            transitions: 0,
        }
    }

    /// Append a state without transitions
    ///
    /// The caller is responsible for bounding the state count.
    pub(crate) fn push_state(&mut self, id: StateId) {
        debug_assert_eq!(id.as_usize(), self.states.len());
        self.states.push(BTreeMap::new());
    }

    /// Add `from --symbol--> to`; the table stays deterministic, so an
    /// existing edge for the same symbol is never replaced
    pub(crate) fn insert(&mut self, from: StateId, symbol: S, to: StateId) -> bool {
        match self.states[from.as_usize()].entry(symbol) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(to);
                self.transitions += 1;
                true
            }
        }
    }
}

impl<S: Symbol> Default for SparseTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn sparse_edge<S: Symbol>((symbol, to): SparseEdge<'_, S>) -> (S, StateId) {
    (*symbol, *to)
}

impl<S: Symbol> Transitions<S> for SparseTable<S> {
    type Edges<'a> = Map<btree_map::Iter<'a, S, StateId>, fn(SparseEdge<'a, S>) -> (S, StateId)>
    where
        Self: 'a;

    #[inline]
    fn lookup(&self, state: StateId, symbol: S) -> Option<StateId> {
        self.states
            .get(state.as_usize())
            .and_then(|edges| edges.get(&symbol))
            .copied()
    }

    fn edges(&self, state: StateId) -> Self::Edges<'_> {
        self.states[state.as_usize()]
            .iter()
            .map(sparse_edge as fn(SparseEdge<'_, S>) -> (S, StateId))
    }

    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn transition_count(&self) -> usize {
        self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SparseTable<u8> {
        let mut table = SparseTable::new();
        table.push_state(StateId::new(1));
        table.push_state(StateId::new(2));
        assert!(table.insert(StateId::ROOT, b'b', StateId::new(2)));
        assert!(table.insert(StateId::ROOT, b'a', StateId::new(1)));
        table
    }

    #[test]
    fn test_lookup() {
        let table = table();
        assert_eq!(table.lookup(StateId::ROOT, b'a'), Some(StateId::new(1)));
        assert_eq!(table.lookup(StateId::ROOT, b'z'), None);
        assert_eq!(table.lookup(StateId::new(1), b'a'), None);
        assert_eq!(table.lookup(StateId::new(99), b'a'), None);
    }

    #[test]
    fn test_insert_is_deterministic() {
        let mut table = table();
        assert!(!table.insert(StateId::ROOT, b'a', StateId::new(2)));
        assert_eq!(table.lookup(StateId::ROOT, b'a'), Some(StateId::new(1)));
        assert_eq!(table.transition_count(), 2);
    }

    #[test]
    fn test_edges_sorted() {
        let table = table();
        let edges: Vec<_> = table.edges(StateId::ROOT).collect();
        assert_eq!(
            edges,
            vec![(b'a', StateId::new(1)), (b'b', StateId::new(2))]
        );
        assert_eq!(table.edges(StateId::new(2)).count(), 0);
        assert_eq!(table.state_count(), 3);
    }
}
