//! The rules authority the search talks to.
//!
//! The evaluator and the search never look inside a position. Everything
//! they need (legal moves, make/unmake, terminal status, a board snapshot)
//! goes through [`RulesAuthority`]. [`Game`] is the implementation backed by
//! the `chess` crate.

mod game;
mod snapshot;

pub use game::Game;
pub use snapshot::{square_at, BoardSnapshot, PlacedPiece};

use crate::types::{Color, Move, Square};

/// Restricts move enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveFilter {
    /// Every legal move for the side to move
    #[default]
    All,
    /// Only moves leaving this square
    From(Square),
}

/// Legality, make/unmake and terminal status for a chess position.
///
/// Implementations own the position. Callers mutate it only through
/// [`apply`](RulesAuthority::apply) and [`undo`](RulesAuthority::undo), and
/// every successful `apply` must be paired with exactly one `undo`.
pub trait RulesAuthority {
    /// Legal moves for the side to move, in a stable order.
    fn legal_moves(&self, filter: MoveFilter) -> Vec<Move>;

    /// Play `mv`. Returns the resolved move, or `None` if it is not legal here.
    fn apply(&mut self, mv: Move) -> Option<Move>;

    /// Take back the most recent `apply`. `None` when there is nothing to undo.
    fn undo(&mut self) -> Option<Move>;

    fn side_to_move(&self) -> Color;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_threefold_repetition(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Any drawn state: stalemate, insufficient material, repetition, or
    /// whatever else the implementation tracks.
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// 8x8 grid, row 0 = rank 8, column 0 = file a.
    fn snapshot_board(&self) -> BoardSnapshot;

    fn square_occupant(&self, square: Square) -> Option<PlacedPiece>;

    /// Number of legal moves for the side to move.
    fn legal_move_count(&self) -> usize {
        self.legal_moves(MoveFilter::All).len()
    }
}
