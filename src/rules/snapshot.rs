//! Read-only board grid used by the evaluator.

use std::fmt;

use crate::types::{Color, File, Piece, Rank, Square};

/// A piece and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub color: Color,
    pub square: Square,
}

impl PlacedPiece {
    /// Grid row: 0 for rank 8 down to 7 for rank 1.
    #[inline]
    pub fn row(&self) -> usize {
        square_row(self.square)
    }

    /// Grid column: 0 for file a.
    #[inline]
    pub fn col(&self) -> usize {
        self.square.get_file().to_index()
    }
}

#[inline]
pub(crate) fn square_row(square: Square) -> usize {
    7 - square.get_rank().to_index()
}

/// Square at a grid coordinate.
#[inline]
pub fn square_at(row: usize, col: usize) -> Square {
    Square::make_square(Rank::from_index(7 - row), File::from_index(col))
}

/// 8x8 grid of optional pieces, row 0 = rank 8 (Black's back rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    squares: [[Option<PlacedPiece>; 8]; 8],
}

impl BoardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from any iterator of placed pieces; later pieces win
    /// if two share a square.
    pub fn from_pieces(pieces: impl IntoIterator<Item = PlacedPiece>) -> Self {
        let mut snapshot = Self::new();
        for p in pieces {
            snapshot.squares[p.row()][p.col()] = Some(p);
        }
        snapshot
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<PlacedPiece> {
        self.squares[row][col]
    }

    #[inline]
    pub fn at(&self, square: Square) -> Option<PlacedPiece> {
        self.get(square_row(square), square.get_file().to_index())
    }

    /// Occupied squares, row by row from rank 8.
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.squares.iter().flatten().flatten().copied()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Is there a `color` pawn on the given grid cell?
    #[inline]
    pub fn has_pawn(&self, row: usize, col: usize, color: Color) -> bool {
        matches!(
            self.squares[row][col],
            Some(p) if p.piece == Piece::Pawn && p.color == color
        )
    }

    /// Is there a `color` pawn anywhere on the column?
    pub fn file_has_pawn(&self, col: usize, color: Color) -> bool {
        (0..8).any(|row| self.has_pawn(row, col, color))
    }

    pub fn find_king(&self, color: Color) -> Option<PlacedPiece> {
        self.pieces()
            .find(|p| p.piece == Piece::King && p.color == color)
    }

    /// Colour-swapped, vertically flipped copy.
    pub fn mirrored(&self) -> Self {
        Self::from_pieces(self.pieces().map(|p| PlacedPiece {
            piece: p.piece,
            color: !p.color,
            square: square_at(7 - p.row(), p.col()),
        }))
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for cell in row {
                let c = match cell {
                    None => '.',
                    Some(p) => {
                        let c = match p.piece {
                            Piece::Pawn => 'p',
                            Piece::Knight => 'n',
                            Piece::Bishop => 'b',
                            Piece::Rook => 'r',
                            Piece::Queen => 'q',
                            Piece::King => 'k',
                        };
                        if p.color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
