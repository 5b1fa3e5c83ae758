// Fail-link computation and output aggregation
//
// A breadth-first pass from the root assigns every state the longest
// proper suffix of its prefix that is also in the trie. The output of a
// state is its own terminal set followed by the output of its fail target,
// which BFS order guarantees is already final.

use crate::output::{ArenaBuilder, OutputArena};
use crate::symbol::{StateId, Symbol};
use crate::transitions::Transitions;
use crate::trie::Terminals;
use crate::{AcError, AcResult, Resource};
use std::collections::VecDeque;

/// Follow explicit transitions, falling back along fail links
///
/// The root resolves every missing symbol to itself, so the walk always
/// terminates.
#[inline]
pub(crate) fn goto<S, T>(table: &T, fail: &[StateId], mut state: StateId, symbol: S) -> StateId
where
    S: Symbol,
    T: Transitions<S>,
{
    loop {
        if let Some(next) = table.lookup(state, symbol) {
            return next;
        }
        if state.is_root() {
            return StateId::ROOT;
        }
        state = fail[state.as_usize()];
    }
}

/// Compute fail links and the output arena for a finished trie
pub(crate) fn link<S, T>(
    table: &T,
    terminals: &[Terminals],
) -> AcResult<(Box<[StateId]>, OutputArena)>
where
    S: Symbol,
    T: Transitions<S>,
{
    let state_count = table.state_count();
    debug_assert_eq!(state_count, terminals.len());

    let mut fail = vec![StateId::ROOT; state_count];
    let mut outputs = ArenaBuilder::new(state_count);
    let overflow = || AcError::BuildResourceExceeded {
        resource: Resource::Outputs,
        limit: u32::MAX as usize,
    };

    outputs
        .finish(StateId::ROOT, &terminals[0], None)
        .ok_or_else(overflow)?;

    // Depth-one states fail to the root by definition.
    let mut queue = VecDeque::with_capacity(state_count);
    for (_, child) in table.edges(StateId::ROOT) {
        outputs
            .finish(child, &terminals[child.as_usize()], Some(StateId::ROOT))
            .ok_or_else(overflow)?;
        queue.push_back(child);
    }

    while let Some(parent) = queue.pop_front() {
        for (symbol, child) in table.edges(parent) {
            let target = goto(table, &fail, fail[parent.as_usize()], symbol);
            fail[child.as_usize()] = target;
            outputs
                .finish(child, &terminals[child.as_usize()], Some(target))
                .ok_or_else(overflow)?;
            queue.push_back(child);
        }
    }

    Ok((fail.into_boxed_slice(), outputs.build()))
}
