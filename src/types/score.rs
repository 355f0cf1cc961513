//! Score type for evaluation and search.
//!
//! Scores are centipawns from White's point of view. Checkmate has no
//! distance encoding: it is one of two infinite sentinels which are only ever
//! compared, negated and min/maxed. Arithmetic saturates so a stray sum
//! involving a sentinel can never wrap around.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Magnitude of the checkmate sentinels.
///
/// `-i32::MAX` is representable, so negation of either sentinel is exact.
pub const SCORE_INFINITY: i32 = i32::MAX;
pub const SCORE_DRAW: i32 = 0;

/// Centipawn value reported to UCI clients in place of an infinite score.
const UCI_MATE_CP: i32 = 32_000;

/// A position score. Positive favors White.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// White is checkmated.
    pub const NEG_INFINITY: Score = Score(-SCORE_INFINITY);
    /// Black is checkmated.
    pub const INFINITY: Score = Score(SCORE_INFINITY);
    pub const DRAW: Score = Score(SCORE_DRAW);

    /// Create a new score from centipawns
    #[inline]
    pub const fn cp(centipawns: i32) -> Self {
        Score(centipawns)
    }

    #[inline]
    pub const fn draw() -> Self {
        Self::DRAW
    }

    /// Get the raw value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// True for either checkmate sentinel.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 == SCORE_INFINITY || self.0 == -SCORE_INFINITY
    }

    /// Flip into the other side's frame of reference.
    ///
    /// `sign` must be `1` or `-1`.
    #[inline]
    pub const fn signed(self, sign: i32) -> Self {
        if sign < 0 {
            Score(-self.0)
        } else {
            self
        }
    }

    /// Centipawns suitable for a UCI `score cp` field.
    pub const fn uci_cp(self) -> i32 {
        if self.0 >= UCI_MATE_CP {
            UCI_MATE_CP
        } else if self.0 <= -UCI_MATE_CP {
            -UCI_MATE_CP
        } else {
            self.0
        }
    }
}

impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Score::from(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Score {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Score::from(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        // i32::MIN is unreachable: every constructor but the raw tuple clamps.
        Score(-self.0)
    }
}

impl From<i32> for Score {
    #[inline]
    fn from(v: i32) -> Self {
        Score(v.max(-SCORE_INFINITY))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SCORE_INFINITY => write!(f, "+inf"),
            v if v == -SCORE_INFINITY => write!(f, "-inf"),
            v => write!(f, "cp {}", v),
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self)
    }
}
