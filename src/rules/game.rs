//! `chess`-crate backed rules authority.
//!
//! `chess::Board` is an immutable value with full legality and check
//! detection but no history. `Game` adds a stack of previous boards for
//! make/unmake, a halfmove clock for the fifty-move rule and the
//! repetition/material draw checks.

use std::fmt;
use std::str::FromStr;

use super::snapshot::{BoardSnapshot, PlacedPiece};
use super::{MoveFilter, RulesAuthority};
use crate::error::RulesError;
use crate::types::{
    BitBoard, Board, BoardStatus, ChessMove, Color, File, Move, MoveFlags, MoveGen, Piece, Square,
    ALL_SQUARES, EMPTY,
};

/// Halfmoves without a capture or pawn move before the game is drawn.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Dark squares (a1 is dark).
const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Undo {
    board: Board,
    halfmove_clock: u32,
    mv: Move,
}

/// A game in progress: the current board plus everything needed to undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    halfmove_clock: u32,
    history: Vec<Undo>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            halfmove_clock: 0,
            history: Vec::new(),
        }
    }

    /// Position from a FEN string. The halfmove clock is taken from the fifth
    /// field when present.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidFen {
            fen: fen.to_string(),
        };
        // The `chess` parser indexes squares unchecked; reject bad layouts first
        let placement = fen.split_whitespace().next().ok_or_else(invalid)?;
        if !is_valid_placement(placement) {
            return Err(invalid());
        }
        let board = Board::from_str(fen).map_err(|_| invalid())?;
        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Ok(Self {
            board,
            halfmove_clock,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current position as FEN (the `chess` crate's formatting).
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Number of moves applied and not yet undone.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Moves played so far, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|u| u.mv)
    }

    /// Parse long algebraic notation ("e2e4", "e7e8q") against the legal
    /// moves of this position.
    pub fn parse_move(&self, notation: &str) -> Result<Move, RulesError> {
        let notation = notation.trim();
        let malformed = || RulesError::MalformedMove {
            notation: notation.to_string(),
        };
        if !(4..=5).contains(&notation.len()) || !notation.is_ascii() {
            return Err(malformed());
        }

        let from = Square::from_str(&notation[0..2]).map_err(|_| malformed())?;
        let to = Square::from_str(&notation[2..4]).map_err(|_| malformed())?;
        let promotion = match notation[4..].chars().next() {
            None => None,
            Some('q' | 'Q') => Some(Piece::Queen),
            Some('r' | 'R') => Some(Piece::Rook),
            Some('b' | 'B') => Some(Piece::Bishop),
            Some('n' | 'N') => Some(Piece::Knight),
            Some(_) => return Err(malformed()),
        };

        self.legal_moves(MoveFilter::From(from))
            .into_iter()
            .find(|m| m.to_square() == to && m.promotion() == promotion)
            .ok_or_else(|| RulesError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Parse and play a move string.
    pub fn apply_uci(&mut self, notation: &str) -> Result<Move, RulesError> {
        let mv = self.parse_move(notation)?;
        self.apply(mv).ok_or_else(|| RulesError::IllegalMove {
            notation: notation.to_string(),
        })
    }

    /// Times the current position occurred, counting the current one.
    fn repetitions(&self) -> usize {
        let hash = self.board.get_hash();
        1 + self
            .history
            .iter()
            .filter(|u| u.board.get_hash() == hash)
            .count()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }
}

/// Eight ranks, each made of piece letters and digits covering exactly eight
/// files, with one king per side.
fn is_valid_placement(placement: &str) -> bool {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return false;
    }

    for rank in ranks {
        let mut files = 0;
        for c in rank.chars() {
            files += match c {
                '1'..='8' => c as u32 - '0' as u32,
                'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => 1,
                _ => return false,
            };
            if files > 8 {
                return false;
            }
        }
        if files != 8 {
            return false;
        }
    }

    placement.matches('K').count() == 1 && placement.matches('k').count() == 1
}

/// Attach piece and flag information to a bare move generated for `board`.
fn describe(board: &Board, mv: ChessMove) -> Option<Move> {
    let from = mv.get_source();
    let to = mv.get_dest();
    let color = board.color_on(from)?;
    let piece = board.piece_on(from)?;

    let mut captured = board.piece_on(to);
    let mut flags = MoveFlags::QUIET;

    match piece {
        Piece::Pawn => {
            if from.get_file() != to.get_file() && captured.is_none() {
                flags |= MoveFlags::EN_PASSANT;
                captured = Some(Piece::Pawn);
            }
            if from.get_rank().to_index().abs_diff(to.get_rank().to_index()) == 2 {
                flags |= MoveFlags::BIG_PAWN;
            }
        }
        Piece::King if from.get_file().to_index().abs_diff(to.get_file().to_index()) == 2 => {
            flags |= if to.get_file() == File::G {
                MoveFlags::KINGSIDE_CASTLE
            } else {
                MoveFlags::QUEENSIDE_CASTLE
            };
        }
        _ => {}
    }

    if board.piece_on(to).is_some() {
        flags |= MoveFlags::CAPTURE;
    }
    if mv.get_promotion().is_some() {
        flags |= MoveFlags::PROMOTION;
    }

    Some(Move::new(mv, color, piece, captured, flags))
}

impl RulesAuthority for Game {
    fn legal_moves(&self, filter: MoveFilter) -> Vec<Move> {
        MoveGen::new_legal(&self.board)
            .filter(|m| match filter {
                MoveFilter::All => true,
                MoveFilter::From(sq) => m.get_source() == sq,
            })
            .filter_map(|m| describe(&self.board, m))
            .collect()
    }

    fn apply(&mut self, mv: Move) -> Option<Move> {
        let chess_move = mv.chess_move();
        if !self.board.legal(chess_move) {
            return None;
        }
        let resolved = describe(&self.board, chess_move)?;

        self.history.push(Undo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            mv: resolved,
        });
        self.halfmove_clock = if resolved.piece() == Piece::Pawn || resolved.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.board = self.board.make_move_new(chess_move);
        Some(resolved)
    }

    fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        Some(undo.mv)
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = *board.pieces(Piece::Pawn)
            | *board.pieces(Piece::Rook)
            | *board.pieces(Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = *board.pieces(Piece::Knight);
        let bishops = *board.pieces(Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }

        // Any number of bishops, all on one square colour, cannot mate.
        let dark = BitBoard::new(DARK_SQUARES);
        knights == EMPTY && ((bishops & dark) == EMPTY || (bishops & !dark) == EMPTY)
    }

    fn is_draw(&self) -> bool {
        self.is_fifty_move_draw()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    fn snapshot_board(&self) -> BoardSnapshot {
        BoardSnapshot::from_pieces(ALL_SQUARES.iter().filter_map(|&sq| self.square_occupant(sq)))
    }

    fn square_occupant(&self, square: Square) -> Option<PlacedPiece> {
        Some(PlacedPiece {
            piece: self.board.piece_on(square)?,
            color: self.board.color_on(square)?,
            square,
        })
    }

    #[inline]
    fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.board).len()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot_board())?;
        write!(f, "FEN: {}", self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, moves: &[&str]) {
        for m in moves {
            game.apply_uci(m).unwrap();
        }
    }

    #[test]
    fn test_start_position() {
        let game = Game::new();
        assert_eq!(game.legal_moves(MoveFilter::All).len(), 20);
        assert_eq!(game.legal_move_count(), 20);
        assert_eq!(game.legal_moves(MoveFilter::From(Square::G1)).len(), 2);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(!game.is_game_over());
        assert_eq!(game.snapshot_board().piece_count(), 32);
    }

    #[test]
    fn test_apply_undo_restores() {
        let mut game = Game::new();
        let before = game.clone();
        play(&mut game, &["e2e4", "d7d5", "e4d5"]);
        assert_eq!(game.ply(), 3);
        assert_eq!(game.halfmove_clock(), 0);
        while game.undo().is_some() {}
        assert_eq!(game, before);
    }

    #[test]
    fn test_flags() {
        let mut game = Game::new();
        let push = game.parse_move("e2e4").unwrap();
        assert!(push.flags().contains(MoveFlags::BIG_PAWN));

        play(&mut game, &["e2e4", "d7d5"]);
        let capture = game.parse_move("e4d5").unwrap();
        assert!(capture.flags().contains(MoveFlags::CAPTURE));
        assert_eq!(capture.captured(), Some(Piece::Pawn));

        let mut game =
            Game::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let ep = game.parse_move("e5f6").unwrap();
        assert!(ep.flags().contains(MoveFlags::EN_PASSANT));
        assert_eq!(ep.captured(), Some(Piece::Pawn));
        assert!(ep.is_capture());
        game.apply(ep).unwrap();
        assert!(game.square_occupant(Square::F5).is_none());

        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let ks = game.parse_move("e1g1").unwrap();
        let qs = game.parse_move("e1c1").unwrap();
        assert!(ks.flags().contains(MoveFlags::KINGSIDE_CASTLE));
        assert!(qs.flags().contains(MoveFlags::QUEENSIDE_CASTLE));
    }

    #[test]
    fn test_promotion_parse() {
        let game = Game::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let m = game.parse_move("a7a8n").unwrap();
        assert_eq!(m.promotion(), Some(Piece::Knight));
        assert!(m.flags().contains(MoveFlags::PROMOTION));
        assert!(matches!(
            game.parse_move("a7a8x"),
            Err(RulesError::MalformedMove { .. })
        ));
        assert!(matches!(
            game.parse_move("a7b8q"),
            Err(RulesError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_apply_rejects_foreign_move() {
        let mut game = Game::new();
        let e4 = game.parse_move("e2e4").unwrap();
        game.apply(e4).unwrap();
        // White's move again, now illegal with Black to move
        assert!(game.apply(e4).is_none());
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_checkmate());
        assert!(game.is_game_over());
        assert!(!game.is_draw());

        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_stalemate());
        assert!(game.is_draw());
    }

    #[test]
    fn test_threefold_repetition() {
        let mut game = Game::new();
        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(!game.is_threefold_repetition());
        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(game.is_threefold_repetition());
        assert!(game.is_draw());
        game.undo();
        assert!(!game.is_threefold_repetition());
    }

    #[test]
    fn test_fifty_move_rule() {
        let mut game = Game::from_fen("8/8/8/8/8/1R6/8/k6K w - - 99 80").unwrap();
        assert!(!game.is_draw());
        game.apply_uci("b3c3").unwrap();
        assert!(game.is_fifty_move_draw());
        assert!(game.is_draw());
    }

    #[test]
    fn test_insufficient_material() {
        let cases = [
            ("8/8/8/8/8/8/8/k6K w - - 0 1", true),
            ("8/8/8/8/8/8/8/kn5K w - - 0 1", true),
            ("8/8/8/8/8/8/8/kb5K w - - 0 1", true),
            // Both bishops on dark squares (c1 and f8)
            ("5b2/8/8/8/8/8/8/k1B4K w - - 0 1", true),
            ("4b3/8/8/8/8/8/8/k1B4K w - - 0 1", false),
            ("8/8/8/8/8/8/8/knn4K w - - 0 1", false),
            ("8/8/8/8/8/8/p7/k6K w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let game = Game::from_fen(fen).unwrap();
            assert_eq!(game.is_insufficient_material(), expected, "{}", fen);
        }
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(
            Game::from_fen("not a fen"),
            Err(RulesError::InvalidFen { .. })
        ));

        let malformed = [
            "",
            "8/8/8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/9/8/8/8/8/8/4K3 w - - 0 1",
            "4k4/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
        ];
        for fen in malformed {
            assert!(
                matches!(Game::from_fen(fen), Err(RulesError::InvalidFen { .. })),
                "{:?}",
                fen
            );
        }
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_ok());
    }

    #[test]
    fn test_moves_played() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "e7e5", "g1f3"]);
        game.undo();
        let played: Vec<String> = game.moves_played().map(|m| m.uci()).collect();
        assert_eq!(played, ["e2e4", "e7e5"]);
    }
}
