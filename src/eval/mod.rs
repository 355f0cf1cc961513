//! Static evaluation.
//!
//! Scores a position from White's perspective:
//! - Terminal states (checkmate is infinite, any draw is exactly zero)
//! - Material and piece-square tables
//! - Mobility of the side to move
//! - Pawn structure (doubled, isolated)
//! - King pawn shield, outside the endgame
//!
//! Two terms are deliberately not colour-symmetric. Mobility counts only the
//! side to move, and pawn-structure penalties are subtracted for both colours
//! alike. Mirroring a position therefore negates everything except those two.

mod pst;

pub use pst::placement_bonus;

use crate::rules::{BoardSnapshot, PlacedPiece, RulesAuthority};
use crate::types::{color_sign, piece_value, Color, Score, Value};

/// At or below this many pieces (kings included) the position is an endgame.
pub const ENDGAME_PIECE_LIMIT: usize = 12;

pub const MOBILITY_WEIGHT: Value = 10;
pub const DOUBLED_PAWN_PENALTY: Value = -20;
pub const ISOLATED_PAWN_PENALTY: Value = -15;
pub const SHIELD_PAWN_BONUS: Value = 10;
pub const MISSING_SHIELD_PENALTY: Value = -15;

/// Ranks scanned for a shield pawn, starting with the king's own rank.
const SHIELD_DEPTH: isize = 2;

/// The individual terms of a non-terminal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalBreakdown {
    pub material: Value,
    pub mobility: Value,
    pub pawn_structure: Value,
    pub king_safety: Value,
    pub endgame: bool,
}

impl EvalBreakdown {
    #[inline]
    pub fn total(&self) -> Value {
        self.material + self.mobility + self.pawn_structure + self.king_safety
    }
}

/// Evaluate the position from White's perspective.
pub fn evaluate<R: RulesAuthority + ?Sized>(position: &R) -> Score {
    if let Some(terminal) = terminal_score(position) {
        return terminal;
    }
    Score::cp(breakdown(position).total())
}

/// Infinite score for checkmate, zero for a draw, `None` otherwise.
pub fn terminal_score<R: RulesAuthority + ?Sized>(position: &R) -> Option<Score> {
    if position.is_checkmate() {
        return Some(match position.side_to_move() {
            Color::White => Score::NEG_INFINITY,
            Color::Black => Score::INFINITY,
        });
    }
    if position.is_draw() {
        return Some(Score::draw());
    }
    None
}

/// Every non-terminal term, ignoring whether the game is over.
pub fn breakdown<R: RulesAuthority + ?Sized>(position: &R) -> EvalBreakdown {
    let board = position.snapshot_board();
    let endgame = is_endgame(&board);
    EvalBreakdown {
        material: material_and_placement(&board),
        mobility: mobility(position),
        pawn_structure: pawn_structure(&board),
        king_safety: king_safety(&board, endgame),
        endgame,
    }
}

#[inline]
pub fn is_endgame(board: &BoardSnapshot) -> bool {
    board.piece_count() <= ENDGAME_PIECE_LIMIT
}

/// Material plus piece-square bonus, White minus Black.
pub fn material_and_placement(board: &BoardSnapshot) -> Value {
    board
        .pieces()
        .map(|p| {
            let value = piece_value(p.piece) + placement_bonus(p.piece, p.color, p.row(), p.col());
            color_sign(p.color) * value
        })
        .sum()
}

/// Ten points per legal move of the side to move, whichever side that is.
#[inline]
pub fn mobility<R: RulesAuthority + ?Sized>(position: &R) -> Value {
    MOBILITY_WEIGHT * position.legal_move_count() as Value
}

/// Doubled and isolated pawn penalties for both colours, summed unsigned.
pub fn pawn_structure(board: &BoardSnapshot) -> Value {
    let mut score = 0;

    for col in 0..8 {
        for color in [Color::White, Color::Black] {
            let isolated = !(col > 0 && board.file_has_pawn(col - 1, color))
                && !(col < 7 && board.file_has_pawn(col + 1, color));

            let mut seen = false;
            for row in 0..8 {
                if !board.has_pawn(row, col, color) {
                    continue;
                }
                if seen {
                    score += DOUBLED_PAWN_PENALTY;
                }
                seen = true;
                if isolated {
                    score += ISOLATED_PAWN_PENALTY;
                }
            }
        }
    }

    score
}

/// Pawn shield for both kings, White minus Black. Zero in the endgame.
pub fn king_safety(board: &BoardSnapshot, endgame: bool) -> Value {
    if endgame {
        return 0;
    }

    let mut score = 0;
    if let Some(king) = board.find_king(Color::White) {
        score += pawn_shield(board, king);
    }
    if let Some(king) = board.find_king(Color::Black) {
        score -= pawn_shield(board, king);
    }
    score
}

/// Shield score of one king from its own side's point of view.
fn pawn_shield(board: &BoardSnapshot, king: PlacedPiece) -> Value {
    // Toward the opponent: White moves to lower rows.
    let forward: isize = match king.color {
        Color::White => -1,
        Color::Black => 1,
    };
    let king_row = king.row() as isize;
    let king_col = king.col();

    let mut score = 0;
    for col in king_col.saturating_sub(1)..=(king_col + 1).min(7) {
        let sheltered = (0..SHIELD_DEPTH)
            .map(|step| king_row + forward * step)
            .filter(|row| (0..8).contains(row))
            .any(|row| board.has_pawn(row as usize, col, king.color));

        score += if sheltered {
            SHIELD_PAWN_BONUS
        } else {
            MISSING_SHIELD_PENALTY
        };
    }
    score
}
