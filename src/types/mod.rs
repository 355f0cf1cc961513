//! Core types for the chess engine.
//!
//! # Design Principles
//! - Re-export chess crate types as the canonical source for board types
//! - Wrap `chess::ChessMove` in a verbose [`Move`] carrying flags and pieces
//! - Define engine-specific types (Score, Depth) used by evaluation and search

mod depth;
mod moves;
mod score;

pub use depth::{Depth, MAX_DEPTH};
pub use moves::{Move, MoveFlags};
pub use score::{Score, SCORE_DRAW, SCORE_INFINITY};

// Re-export chess crate types as canonical types
pub use chess::{
    BitBoard, Board, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square,
    ALL_SQUARES, EMPTY,
};

/// Node count type
pub type NodeCount = u64;

/// Centipawn value type (for piece values, etc.)
pub type Value = i32;

// Piece values in centipawns
pub const PAWN_VALUE: Value = 100;
pub const KNIGHT_VALUE: Value = 320;
pub const BISHOP_VALUE: Value = 330;
pub const ROOK_VALUE: Value = 500;
pub const QUEEN_VALUE: Value = 900;
pub const KING_VALUE: Value = 20000;

/// Get the material value of a piece in centipawns
#[inline]
pub const fn piece_value(piece: Piece) -> Value {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

/// +1 for White, -1 for Black.
#[inline]
pub const fn color_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
