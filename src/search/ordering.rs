//! Root move ordering.
//!
//! Ordering only changes how much alpha-beta prunes, never which value it
//! finds. Interior nodes are searched in enumeration order.

use std::cmp::Reverse;

use crate::eval::is_endgame;
use crate::rules::RulesAuthority;
use crate::types::{piece_value, Move, Piece, Square, Value};

pub const PROMOTION_BONUS: Value = 800;
pub const CENTER_BONUS: Value = 30;
pub const CASTLE_BONUS: Value = 40;
pub const KING_MOVE_PENALTY: Value = -50;

const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

/// Heuristic ordering score for `mv` in `position` (higher = search first).
pub fn move_score<R: RulesAuthority + ?Sized>(position: &R, mv: &Move) -> Value {
    let endgame = is_endgame(&position.snapshot_board());
    score_move(position, mv, endgame)
}

#[inline]
fn score_move<R: RulesAuthority + ?Sized>(position: &R, mv: &Move, endgame: bool) -> Value {
    let piece = mv.piece();
    let mut score = 0;

    // MVV-LVA on whatever stands on the target square
    if let Some(victim) = position.square_occupant(mv.to_square()) {
        score += 10 * piece_value(victim.piece) - piece_value(piece);
    }

    if mv.promotion().is_some() {
        score += PROMOTION_BONUS;
    }

    if matches!(piece, Piece::Knight | Piece::Bishop) && CENTER.contains(&mv.to_square()) {
        score += CENTER_BONUS;
    }

    if piece == Piece::King && !endgame {
        score += if mv.is_castle() {
            CASTLE_BONUS
        } else {
            KING_MOVE_PENALTY
        };
    }

    score
}

/// Sort descending by [`move_score`]. The sort is stable, so equally scored
/// moves keep their enumeration order.
pub fn order_moves<R: RulesAuthority + ?Sized>(position: &R, moves: &mut [Move]) {
    let endgame = is_endgame(&position.snapshot_board());
    moves.sort_by_cached_key(|m| Reverse(score_move(position, m, endgame)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Game, MoveFilter};

    fn score_of(game: &Game, notation: &str) -> Value {
        let mv = game.parse_move(notation).unwrap();
        move_score(game, &mv)
    }

    #[test]
    fn test_capture_scores() {
        // Pawn takes queen on d5
        let game = Game::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(score_of(&game, "e4d5"), 10 * 900 - 100);
        assert_eq!(score_of(&game, "e4e5"), 0);
    }

    #[test]
    fn test_promotion_and_center() {
        let game = Game::from_fen("4k3/P7/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        assert_eq!(score_of(&game, "a7a8q"), PROMOTION_BONUS);
        assert_eq!(score_of(&game, "c3d5"), CENTER_BONUS);
        assert_eq!(score_of(&game, "c3b5"), 0);
    }

    #[test]
    fn test_king_moves() {
        let game =
            Game::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(score_of(&game, "e1g1"), CASTLE_BONUS);
        assert_eq!(score_of(&game, "e1c1"), CASTLE_BONUS);
        assert_eq!(score_of(&game, "e1f1"), KING_MOVE_PENALTY);

        // Few pieces left: king moves are neutral
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(score_of(&game, "e1e2"), 0);
    }

    #[test]
    fn test_order_is_stable_and_descending() {
        let game = Game::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let enumerated = game.legal_moves(MoveFilter::All);
        let mut ordered = enumerated.clone();
        order_moves(&game, &mut ordered);

        assert_eq!(ordered[0].uci(), "e4d5");
        let scores: Vec<Value> = ordered.iter().map(|m| move_score(&game, m)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        // Zero-scored moves appear in enumeration order
        let quiet: Vec<_> = enumerated
            .iter()
            .filter(|m| move_score(&game, m) == 0)
            .collect();
        let quiet_ordered: Vec<_> = ordered
            .iter()
            .filter(|m| move_score(&game, m) == 0)
            .collect();
        assert_eq!(quiet, quiet_ordered);
    }
}
