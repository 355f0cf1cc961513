//! Verbose move type.
//!
//! `chess::ChessMove` only knows source, destination and promotion. The search
//! and the ordering heuristic also need to know what moved, what was taken and
//! whether the move was a castle, so the rules authority hands out this richer
//! value instead. It is produced once by move enumeration and never mutated.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use chess::{ChessMove, Color, Piece, Square};

/// Move kind flags. Several can be set at once (e.g. capture + promotion).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const QUIET: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1 << 0);
    pub const BIG_PAWN: MoveFlags = MoveFlags(1 << 1);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 2);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 3);
    pub const KINGSIDE_CASTLE: MoveFlags = MoveFlags(1 << 4);
    pub const QUEENSIDE_CASTLE: MoveFlags = MoveFlags(1 << 5);

    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: MoveFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_quiet(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        MoveFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MoveFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveFlags({})", self)
    }
}

/// One letter per flag: `n` quiet, `c` capture, `b` double pawn push,
/// `e` en passant, `p` promotion, `k`/`q` castling.
impl fmt::Display for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quiet() {
            return f.write_str("n");
        }
        const LETTERS: [(MoveFlags, char); 6] = [
            (MoveFlags::CAPTURE, 'c'),
            (MoveFlags::BIG_PAWN, 'b'),
            (MoveFlags::EN_PASSANT, 'e'),
            (MoveFlags::PROMOTION, 'p'),
            (MoveFlags::KINGSIDE_CASTLE, 'k'),
            (MoveFlags::QUEENSIDE_CASTLE, 'q'),
        ];
        for (flag, letter) in LETTERS {
            if self.contains(flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// A legal move together with what it does on the board it was generated for.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    inner: ChessMove,
    color: Color,
    piece: Piece,
    captured: Option<Piece>,
    flags: MoveFlags,
}

impl Move {
    pub const fn new(
        inner: ChessMove,
        color: Color,
        piece: Piece,
        captured: Option<Piece>,
        flags: MoveFlags,
    ) -> Self {
        Self {
            inner,
            color,
            piece,
            captured,
            flags,
        }
    }

    /// The bare move, as understood by the `chess` crate.
    #[inline]
    pub fn chess_move(&self) -> ChessMove {
        self.inner
    }

    #[inline]
    pub fn from_square(&self) -> Square {
        self.inner.get_source()
    }

    #[inline]
    pub fn to_square(&self) -> Square {
        self.inner.get_dest()
    }

    #[inline]
    pub fn promotion(&self) -> Option<Piece> {
        self.inner.get_promotion()
    }

    /// Colour of the side making the move.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The piece being moved (a pawn for promotions).
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece removed from the board, including en-passant victims.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.intersects(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags
            .intersects(MoveFlags::KINGSIDE_CASTLE | MoveFlags::QUEENSIDE_CASTLE)
    }

    /// Long algebraic notation as used by UCI (e.g. "e2e4", "e7e8q").
    pub fn uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from_square(), self.to_square())?;
        if let Some(promo) = self.promotion() {
            let c = match promo {
                Piece::Queen => 'q',
                Piece::Rook => 'r',
                Piece::Bishop => 'b',
                Piece::Knight => 'n',
                Piece::Pawn => 'p',
                Piece::King => 'k',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {})", self, self.piece, self.flags)
    }
}
