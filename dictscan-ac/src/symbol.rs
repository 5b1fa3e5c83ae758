// Alphabet and index types
//
// Symbols are any ordered, copyable type. States and patterns are
// addressed by dense u32 indices; conversions from usize are checked so a
// build can never wrap around.

use crate::{AcError, AcResult, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbol of the automaton's alphabet (byte, char, token id, ...)
pub trait Symbol: Copy + Ord + fmt::Debug {}

impl<T> Symbol for T where T: Copy + Ord + fmt::Debug {}

/// Identifier of an automaton state; `StateId::ROOT` is the start state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// The root state (empty prefix)
    pub const ROOT: StateId = StateId(0);

    /// Number of states addressable by this index type
    pub const MAX_COUNT: usize = u32::MAX as usize;

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Convert a state count or position, failing instead of wrapping
    pub(crate) fn from_usize(id: usize) -> AcResult<Self> {
        u32::try_from(id)
            .map(StateId)
            .map_err(|_| AcError::BuildResourceExceeded {
                resource: Resource::States,
                limit: Self::MAX_COUNT,
            })
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense index of a pattern in build order
pub type PatternIndex = u32;
