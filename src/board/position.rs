/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use anyhow::{bail, Context, Result};

use super::{Color, Piece, PieceKind, Square};

/// Back rank layout, from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An `8x8` grid of squares, each either empty or holding a [`Piece`].
///
/// The board performs no validation of its contents; it will happily hold zero or three Kings.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates an empty [`Board`].
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Creates a [`Board`] with the standard starting layout.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let board = Board::standard();
    /// assert_eq!(board.piece_at(Square::from_uci("e1").unwrap()), Some(Piece::WHITE_KING));
    /// assert_eq!(board.piece_at(Square::from_uci("d8").unwrap()), Some(Piece::BLACK_QUEEN));
    /// ```
    pub fn standard() -> Self {
        let mut board = Self::empty();

        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            for color in Color::all() {
                board.place(Piece::new(color, kind), Square::new(color.home_row(), col));
                board.place(
                    Piece::new(color, PieceKind::Pawn),
                    Square::new(color.pawn_row(), col),
                );
            }
        }

        board
    }

    /// Creates a [`Board`] from eight rows of text, top (rank 8) first.
    ///
    /// Each row must have exactly eight chars: `.` for an empty square, or a piece letter,
    /// uppercase for White and lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let board = Board::from_rows([
    ///     "....k...",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "....K..R",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.piece_at(Square::from_uci("h1").unwrap()), Some(Piece::WHITE_ROOK));
    /// ```
    pub fn from_rows(rows: [&str; 8]) -> Result<Self> {
        let mut board = Self::empty();

        for (row, text) in rows.into_iter().enumerate() {
            if text.chars().count() != 8 {
                bail!("Row {row} must contain exactly 8 squares. Got {text:?}");
            }

            for (col, c) in text.chars().enumerate() {
                if c == '.' {
                    continue;
                }

                let piece = Piece::from_char(c)
                    .with_context(|| format!("Invalid square in row {row}: {text:?}"))?;
                board.place(piece, Square::new(row as u8, col as u8));
            }
        }

        Ok(board)
    }

    /// Fetches the [`Piece`] at `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Returns the [`Color`] of the piece at `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Returns `true` if there is no piece at `square`.
    #[inline(always)]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Places `piece` at `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Clears `square`.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.squares[square.index()] = None;
    }

    /// Removes and returns the piece at `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Iterates over every occupied square and its piece, from a8 to h1.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Finds the first square holding `piece`, scanning from a8 to h1.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.pieces()
            .find_map(|(square, found)| (found == piece).then_some(square))
    }
}

impl Default for Board {
    /// Standard starting layout.
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{}|", Square::new(row, 0).rank_char())?;
            for col in 0..8 {
                let piece_char = self.piece_at(Square::new(row, col)).map_or('.', |p| p.char());
                write!(f, " {piece_char}")?;
            }
            writeln!(f)?;
        }

        write!(f, " +----------------\n   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
