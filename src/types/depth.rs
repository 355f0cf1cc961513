//! Search depth in plies.

use std::fmt;
use std::ops::Sub;

/// Deepest search a caller may request. The search has no pruning beyond
/// alpha-beta, so anything near this is only reachable through the deadline.
pub const MAX_DEPTH: i32 = 32;

/// Search depth (in plies).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct Depth(pub i32);

impl Depth {
    pub const ZERO: Depth = Depth(0);
    pub const ONE: Depth = Depth(1);
    pub const MAX: Depth = Depth(MAX_DEPTH);

    /// Create a depth, clamped to `0..=MAX_DEPTH`.
    #[inline]
    pub const fn new(d: i32) -> Self {
        if d < 0 {
            Depth(0)
        } else if d > MAX_DEPTH {
            Depth(MAX_DEPTH)
        } else {
            Depth(d)
        }
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Leaf of the search tree.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        self.0 <= 0
    }
}

impl Sub<i32> for Depth {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Depth::new(self.0 - rhs)
    }
}

impl From<i32> for Depth {
    #[inline]
    fn from(d: i32) -> Self {
        Depth::new(d)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
