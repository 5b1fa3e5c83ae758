// Output arena
//
// Every state's output set is a slice of one shared buffer. The arena is
// filled once during linking and dropped with the automaton.

use crate::symbol::{PatternIndex, StateId};
use std::ops::Range;

/// Per-state pattern lists stored in a single contiguous buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArena {
    ids: Box<[PatternIndex]>,
    ranges: Box<[(u32, u32)]>,
}

impl OutputArena {
    /// The patterns recognized at `state`, longest first
    #[inline]
    pub fn get(&self, state: StateId) -> &[PatternIndex] {
        &self.ids[self.range(state)]
    }

    /// The slice of the buffer owned by `state`
    pub fn range(&self, state: StateId) -> Range<usize> {
        let (begin, end) = self.ranges[state.as_usize()];
        begin as usize..end as usize
    }

    /// Total number of (state, pattern) pairs
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    pub fn state_count(&self) -> usize {
        self.ranges.len()
    }

    pub(crate) fn memory_usage(&self) -> usize {
        std::mem::size_of_val(&*self.ids) + std::mem::size_of_val(&*self.ranges)
    }
}

/// Appends state outputs in processing order
///
/// States may be finished in any order; a state's inherited outputs are
/// copied from a range that was finished earlier.
#[derive(Debug)]
pub(crate) struct ArenaBuilder {
    ids: Vec<PatternIndex>,
    ranges: Vec<(u32, u32)>,
}

impl ArenaBuilder {
    pub(crate) fn new(state_count: usize) -> Self {
        Self {
            ids: Vec::new(),
            ranges: vec![(0, 0); state_count],
        }
    }

    /// Record `state`'s output as `local` followed by `inherited`'s output
    ///
    /// `inherited` must already be finished. Returns `None` if the buffer
    /// would outgrow the u32 index space.
    pub(crate) fn finish(
        &mut self,
        state: StateId,
        local: &[PatternIndex],
        inherited: Option<StateId>,
    ) -> Option<()> {
        let begin = self.ids.len();
        self.ids.extend_from_slice(local);
        if let Some(from) = inherited {
            let (b, e) = self.ranges[from.as_usize()];
            self.ids.extend_from_within(b as usize..e as usize);
        }
        let begin = u32::try_from(begin).ok()?;
        let end = u32::try_from(self.ids.len()).ok()?;
        self.ranges[state.as_usize()] = (begin, end);
        Some(())
    }

    pub(crate) fn build(self) -> OutputArena {
        OutputArena {
            ids: self.ids.into_boxed_slice(),
            ranges: self.ranges.into_boxed_slice(),
        }
    }
}
