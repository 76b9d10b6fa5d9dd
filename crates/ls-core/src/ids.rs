//! Strongly typed, zero-cost identifier wrappers.
//!
//! `NodeId`, `EdgeId`, `TripId` and `WorkerId` are unsigned-style handles
//! generated by [`typed_id!`].  `LinkId` is different: it is signed, and a
//! negative value means "this edge is not counted in link statistics".

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a network node as understood by the route engine.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed network edge.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Opaque caller-supplied trip label.  Only written out, never interpreted.
    pub struct TripId(i64);
}

typed_id! {
    /// Index of a worker thread inside the routing context's pool.
    pub struct WorkerId(u32);
}

// ── LinkId ────────────────────────────────────────────────────────────────────

/// Identifier of a countable link.  Several edges may share one link (e.g.
/// both directions of a road segment); edges with a negative link id are
/// excluded from statistics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkId(pub i32);

impl LinkId {
    /// The conventional "not countable" marker.
    pub const UNCOUNTED: LinkId = LinkId(-1);

    /// `true` if this link contributes to statistics.
    #[inline(always)]
    pub fn is_countable(self) -> bool {
        self.0 >= 0
    }

    /// The vector index for a countable link, `None` for a negative id.
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::UNCOUNTED
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkId({})", self.0)
    }
}
