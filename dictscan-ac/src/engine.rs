// Match engine - streaming cursor over an immutable automaton
//
// An engine owns nothing but its cursor: the current state and the read
// position in the bound text. Any number of engines can run against the
// same automaton concurrently.

use crate::automaton::{Automaton, PatternInfo};
use crate::symbol::{PatternIndex, StateId, Symbol};
use crate::transitions::Transitions;
use crate::{AcError, AcResult};
use std::fmt;

/// The output set of one state, borrowed from the automaton
pub struct MatchSet<'a, I> {
    indices: &'a [PatternIndex],
    patterns: &'a [PatternInfo<I>],
}

impl<'a, I> MatchSet<'a, I> {
    pub(crate) fn new(indices: &'a [PatternIndex], patterns: &'a [PatternInfo<I>]) -> Self {
        Self { indices, patterns }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Caller ids, longest pattern first
    pub fn iter(&self) -> impl Iterator<Item = &'a I> + 'a {
        let (indices, patterns) = (self.indices, self.patterns);
        indices
            .iter()
            .map(move |&index| &patterns[index as usize].id)
    }

    /// Dense pattern indices in build order numbering
    pub fn indices(&self) -> &'a [PatternIndex] {
        self.indices
    }

    /// Whether the set contains a pattern with this caller id
    pub fn contains(&self, id: &I) -> bool
    where
        I: PartialEq,
    {
        self.iter().any(|candidate| candidate == id)
    }
}

impl<I> Clone for MatchSet<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for MatchSet<'_, I> {}

impl<I: fmt::Debug> fmt::Debug for MatchSet<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Where the cursor stands relative to the last `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Bound to a text, nothing consumed or reported yet
    Fresh,

    /// The last `advance` reported a match
    Matched,

    /// Scanning, with no match reported at the current position
    Scanning,

    /// The text is exhausted
    Exhausted,
}

/// A stateful scanner reporting every position where some pattern ends
///
/// `'a` borrows the automaton and `'t` the bound text. Match sets only
/// borrow the automaton, so they outlive any particular text.
pub struct MatchEngine<'a, 't, S, I, T> {
    automaton: &'a Automaton<S, I, T>,
    text: &'t [S],
    state: StateId,
    pos: usize,
    cursor: Cursor,
}

impl<'a, 't, S, I, T> MatchEngine<'a, 't, S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    /// Create an engine bound to `text`
    pub fn new(automaton: &'a Automaton<S, I, T>, text: &'t [S]) -> Self {
        Self {
            automaton,
            text,
            state: StateId::ROOT,
            pos: 0,
            cursor: Cursor::Fresh,
        }
    }

    /// Reset the cursor to the root and the start of `text`
    pub fn bind(&mut self, text: &'t [S]) {
        self.text = text;
        self.state = StateId::ROOT;
        self.pos = 0;
        self.cursor = Cursor::Fresh;
    }

    /// Move the cursor onto a text with a different lifetime
    ///
    /// Same reset as `bind`, but the engine is consumed so `text` may be
    /// shorter-lived than the current one, e.g. a line buffer that is
    /// dropped before the next is read.
    pub fn rebind<'u>(self, text: &'u [S]) -> MatchEngine<'a, 'u, S, I, T> {
        MatchEngine::new(self.automaton, text)
    }

    /// Scan forward to the next position where at least one pattern ends
    ///
    /// Returns `false` once the text is exhausted; the engine can then be
    /// rebound with `bind`.
    pub fn advance(&mut self) -> bool {
        match self.cursor {
            Cursor::Exhausted => return false,
            Cursor::Fresh => {
                // Only empty patterns can end before the first symbol.
                if !self.automaton.output_indices(StateId::ROOT).is_empty() {
                    self.cursor = Cursor::Matched;
                    return true;
                }
            }
            Cursor::Matched | Cursor::Scanning => {}
        }
        self.cursor = Cursor::Scanning;

        while let Some(&symbol) = self.text.get(self.pos) {
            self.state = self.automaton.next_state(self.state, symbol);
            self.pos += 1;
            if !self.automaton.output_indices(self.state).is_empty() {
                self.cursor = Cursor::Matched;
                return true;
            }
        }

        self.cursor = Cursor::Exhausted;
        false
    }

    /// The patterns ending at `match_end_offset()`
    ///
    /// Only valid right after `advance` returned `true`.
    pub fn matches(&self) -> AcResult<MatchSet<'a, I>> {
        if self.cursor != Cursor::Matched {
            return Err(AcError::EmptyOutput);
        }
        Ok(self.automaton.outputs(self.state))
    }

    /// The read position: one past the last consumed symbol
    pub fn match_end_offset(&self) -> usize {
        self.pos
    }

    /// The current automaton state
    pub fn state(&self) -> StateId {
        self.state
    }

    /// The automaton this engine reads
    pub fn automaton(&self) -> &'a Automaton<S, I, T> {
        self.automaton
    }
}

impl<S, I, T> fmt::Debug for MatchEngine<'_, '_, S, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchEngine")
            .field("state", &self.state)
            .field("pos", &self.pos)
            .field("text_len", &self.text.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// One occurrence of one pattern
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'a, I> {
    id: &'a I,
    pattern: PatternIndex,
    start: usize,
    end: usize,
}

impl<I> Clone for Match<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Match<'_, I> {}

impl<'a, I> Match<'a, I> {
    /// The caller id of the matched pattern
    pub fn id(&self) -> &'a I {
        self.id
    }

    /// The dense index of the matched pattern
    pub fn pattern(&self) -> PatternIndex {
        self.pattern
    }

    /// The starting position of the match
    pub fn start(&self) -> usize {
        self.start
    }

    /// The ending position of the match (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator over every occurrence, in end-offset order
///
/// Occurrences sharing an end offset come longest first.
pub struct FindIter<'a, 't, S, I, T> {
    engine: MatchEngine<'a, 't, S, I, T>,
    pending: &'a [PatternIndex],
}

impl<'a, 't, S, I, T> FindIter<'a, 't, S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    pub(crate) fn new(engine: MatchEngine<'a, 't, S, I, T>) -> Self {
        Self {
            engine,
            pending: &[],
        }
    }
}

impl<'a, S, I, T> Iterator for FindIter<'a, '_, S, I, T>
where
    S: Symbol,
    T: Transitions<S>,
{
    type Item = Match<'a, I>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((&pattern, rest)) = self.pending.split_first() {
                self.pending = rest;
                let automaton = self.engine.automaton();
                let end = self.engine.match_end_offset();
                let info = &automaton.pattern_infos()[pattern as usize];
                return Some(Match {
                    id: &info.id,
                    pattern,
                    start: end - info.len,
                    end,
                });
            }

            if !self.engine.advance() {
                return None;
            }
            self.pending = self.engine.matches().ok()?.indices();
        }
    }
}
