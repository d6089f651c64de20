//=========================================================================
// Node Identifiers
//=========================================================================
//
// Generational handles into the scene arena.
//
// Layout: slot index + generation. When a slot is reused the generation
// is bumped, so ids of destroyed nodes never resolve to their successors.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== NodeId ==============================================================

/// Stable handle to a node stored in a [`SceneTree`](super::SceneTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
