// Trie builder
//
// Inserts every pattern along a path from the root, creating one state per
// new prefix. Each terminal state records the patterns that end exactly
// there; suffix closure happens later, while linking.

use crate::symbol::{PatternIndex, StateId, Symbol};
use crate::transitions::{SparseTable, Transitions};
use crate::{AcError, AcResult, Resource};
use smallvec::SmallVec;
use tracing::trace;

/// Local terminal set of one state
pub(crate) type Terminals = SmallVec<[PatternIndex; 1]>;

/// A prefix trie over the sparse transition table
#[derive(Debug)]
pub(crate) struct Trie<S> {
    table: SparseTable<S>,

    /// Patterns ending exactly at each state, in insertion order
    terminals: Vec<Terminals>,

    /// Maximum number of states, root included
    state_limit: usize,
}

impl<S: Symbol> Trie<S> {
    pub(crate) fn new(state_limit: usize) -> Self {
        Self {
            table: SparseTable::new(),
            terminals: vec![Terminals::new()],
            state_limit,
        }
    }

    /// Insert one pattern and return the state where it ends
    ///
    /// An empty pattern ends at the root.
    pub(crate) fn insert(&mut self, symbols: &[S], pattern: PatternIndex) -> AcResult<StateId> {
        let mut state = StateId::ROOT;
        for &symbol in symbols {
            state = match self.table.lookup(state, symbol) {
                Some(next) => next,
                None => {
                    let next = self.push_state()?;
                    self.table.insert(state, symbol, next);
                    trace!(from = %state, to = %next, ?symbol, "Created trie state");
                    next
                }
            };
        }
        self.terminals[state.as_usize()].push(pattern);
        Ok(state)
    }

    fn push_state(&mut self) -> AcResult<StateId> {
        let count = self.terminals.len();
        if count >= self.state_limit {
            return Err(AcError::BuildResourceExceeded {
                resource: Resource::States,
                limit: self.state_limit,
            });
        }
        let id = StateId::from_usize(count)?;
        self.table.push_state(id);
        self.terminals.push(Terminals::new());
        Ok(id)
    }

    pub(crate) fn table(&self) -> &SparseTable<S> {
        &self.table
    }

    pub(crate) fn terminals(&self) -> &[Terminals] {
        &self.terminals
    }

    pub(crate) fn into_table(self) -> SparseTable<S> {
        self.table
    }
}
