// Compact transition table
//
// All explicit transitions live in one array sorted by (source, symbol).
// Each state owns a contiguous [begin, end) range of that array, so a lookup
// is a binary search over the state's out-degree and the whole table is two
// flat allocations.

use crate::symbol::{StateId, Symbol};
use crate::transitions::{SparseTable, Transitions};
use crate::{AcError, AcResult, Resource};
use serde::{Deserialize, Serialize};
use std::iter::Map;
use std::ops::Range;
use std::slice;

/// One explicit transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transition<S> {
    pub from: StateId,
    pub symbol: S,
    pub to: StateId,
}

/// Array-backed transition table with binary-searchable state ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactTable<S> {
    /// Every transition, sorted by (from, symbol)
    transitions: Box<[Transition<S>]>,

    /// Per-state [begin, end) into `transitions`
    ranges: Box<[(u32, u32)]>,
}

impl<S: Symbol> CompactTable<S> {
    /// Flatten a sparse table without changing the transition relation
    pub fn from_sparse(sparse: &SparseTable<S>) -> AcResult<Self> {
        let total = sparse.transition_count();
        if u32::try_from(total).is_err() {
            return Err(AcError::BuildResourceExceeded {
                resource: Resource::Transitions,
                limit: u32::MAX as usize,
            });
        }

        let state_count = sparse.state_count();
        let mut transitions = Vec::with_capacity(total);
        for index in 0..state_count {
            let from = StateId::from_usize(index)?;
            transitions.extend(
                sparse
                    .edges(from)
                    .map(|(symbol, to)| Transition { from, symbol, to }),
            );
        }
        debug_assert!(transitions.windows(2).all(|w| w[0] < w[1]));

        // Boundaries are found by scanning forward from where the previous
        // state's range ended; this runs once at build time only.
        let mut ranges = Vec::with_capacity(state_count);
        let mut cursor = 0usize;
        for index in 0..state_count {
            let begin = cursor;
            while cursor < transitions.len() && transitions[cursor].from.as_usize() == index {
                cursor += 1;
            }
            ranges.push((begin as u32, cursor as u32));
        }

        Ok(Self {
            transitions: transitions.into_boxed_slice(),
            ranges: ranges.into_boxed_slice(),
        })
    }

    /// The transitions out of `state` as a sorted slice
    pub fn state_transitions(&self, state: StateId) -> &[Transition<S>] {
        &self.transitions[self.range(state)]
    }

    /// The index range `state` occupies in the transition array
    pub fn range(&self, state: StateId) -> Range<usize> {
        let (begin, end) = self.ranges[state.as_usize()];
        begin as usize..end as usize
    }

    /// The full transition array
    pub fn as_slice(&self) -> &[Transition<S>] {
        &self.transitions
    }
}

fn compact_edge<S: Symbol>(transition: &Transition<S>) -> (S, StateId) {
    (transition.symbol, transition.to)
}

impl<S: Symbol> Transitions<S> for CompactTable<S> {
    type Edges<'a> = Map<slice::Iter<'a, Transition<S>>, fn(&'a Transition<S>) -> (S, StateId)>
    where
        Self: 'a;

    #[inline]
    fn lookup(&self, state: StateId, symbol: S) -> Option<StateId> {
        let &(begin, end) = self.ranges.get(state.as_usize())?;
        let edges = &self.transitions[begin as usize..end as usize];
        edges
            .binary_search_by(|t| t.symbol.cmp(&symbol))
            .ok()
            .map(|i| edges[i].to)
    }

    fn edges(&self, state: StateId) -> Self::Edges<'_> {
        self.state_transitions(state)
            .iter()
            .map(compact_edge as fn(&Transition<S>) -> (S, StateId))
    }

    fn state_count(&self) -> usize {
        self.ranges.len()
    }

    fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
