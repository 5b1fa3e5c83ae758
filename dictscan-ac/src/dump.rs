// Diagnostic export
//
// A human-readable listing of transitions and states, plus a serializable
// snapshot of the same data for tooling. Neither is a persistence format;
// the snapshot carries a version number so readers can reject shapes they
// do not understand.

use crate::automaton::Automaton;
use crate::symbol::{PatternIndex, StateId, Symbol};
use crate::transitions::Transitions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the `Snapshot` layout
pub const SNAPSHOT_VERSION: u32 = 1;

/// `(index, source, symbol, destination)` of one transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    pub index: usize,
    pub from: StateId,
    pub symbol: S,
    pub to: StateId,
}

/// `(index, fail link, transition range, output)` of one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub index: usize,
    pub fail: StateId,
    pub transitions: [usize; 2],
    pub outputs: Vec<PatternIndex>,
}

/// Length of one pattern, keyed by its dense index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub index: PatternIndex,
    pub len: usize,
}

/// Serializable view of a whole automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    pub format_version: u32,
    pub transitions: Vec<TransitionRecord<S>>,
    pub states: Vec<StateRecord>,
    pub patterns: Vec<PatternRecord>,
}

/// `Display` adapter printing an automaton's tables
pub struct Dump<'a, S, I, T> {
    automaton: &'a Automaton<S, I, T>,
}

impl<S, I, T> Automaton<S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    /// Textual listing of every transition and state
    pub fn dump(&self) -> Dump<'_, S, I, T> {
        Dump { automaton: self }
    }

    /// Structured copy of the tables, numbered like `dump`
    pub fn snapshot(&self) -> Snapshot<S> {
        let table = self.transitions();
        let mut transitions = Vec::with_capacity(table.transition_count());
        let mut states = Vec::with_capacity(self.state_count());

        for state in self.states() {
            let begin = transitions.len();
            for (symbol, to) in table.edges(state) {
                transitions.push(TransitionRecord {
                    index: transitions.len(),
                    from: state,
                    symbol,
                    to,
                });
            }
            states.push(StateRecord {
                index: state.as_usize(),
                fail: self.fail_link(state),
                transitions: [begin, transitions.len()],
                outputs: self.output_indices(state).to_vec(),
            });
        }

        let patterns = self
            .pattern_infos()
            .iter()
            .enumerate()
            .map(|(index, info)| PatternRecord {
                index: index as PatternIndex,
                len: info.len,
            })
            .collect();

        Snapshot {
            format_version: SNAPSHOT_VERSION,
            transitions,
            states,
            patterns,
        }
    }
}

impl<S, I, T> fmt::Display for Dump<'_, S, I, T>
where
    S: Symbol,
    I: fmt::Debug,
    T: Transitions<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ac = self.automaton;
        let table = ac.transitions();

        writeln!(f, "transitions: {}", table.transition_count())?;
        let mut index = 0usize;
        for state in ac.states() {
            for (symbol, to) in table.edges(state) {
                writeln!(f, "  {index}: {state} --{symbol:?}--> {to}")?;
                index += 1;
            }
        }

        writeln!(f, "states: {}", ac.state_count())?;
        let mut begin = 0usize;
        for state in ac.states() {
            let end = begin + table.edges(state).count();
            write!(
                f,
                "  {state}: fail={} transitions=[{begin}, {end}) output=",
                ac.fail_link(state)
            )?;
            f.debug_list().entries(ac.outputs(state).iter()).finish()?;
            writeln!(f)?;
            begin = end;
        }
        Ok(())
    }
}
