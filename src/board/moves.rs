/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use anyhow::{anyhow, Result};

use super::{Board, Piece, PieceKind, Square};

/// An ordered list of moves, as produced by move generation.
pub type MoveList = Vec<Move>;

/// Represents the different kinds of moves that can be made during a chess game.
///
/// Promotions are detected when a [`Move`] is created; en passant and castling can't be told
/// apart from their endpoints alone, so the generator has to say so.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum MoveKind {
    /// Any move that is not one of the special cases below, including ordinary captures.
    #[default]
    Normal,

    /// A Pawn capturing an enemy Pawn that just advanced two squares, landing on the square it skipped.
    EnPassant,

    /// The King moving two squares towards a Rook, which then jumps over it.
    Castle,

    /// A Pawn reaching the far rank. Promotion always yields a Queen.
    Promotion,
}

impl fmt::Display for MoveKind {
    /// Displays a human-readable description for this [`MoveKind`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "Normal",
            Self::EnPassant => "En Passant",
            Self::Castle => "Castle",
            Self::Promotion => "Promotion (Queen)",
        };

        write!(f, "{s}")
    }
}

/// Represents a move made on a chess board, with the pieces involved captured at creation time.
///
/// Two moves are equal if they share the same source and destination squares, regardless of
/// their other fields. This is what lets a candidate built from two clicked squares be looked
/// up in the legal move list, which carries the correct flags.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Creates a candidate [`Move`] of the piece on `from` to `to`, as laid out on `board`.
    ///
    /// Promotions are classified automatically. Will return an [`anyhow::Error`] if `from` is empty.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Move, Square};
    /// let board = Board::standard();
    /// let e2 = Square::from_uci("e2").unwrap();
    /// let e4 = Square::from_uci("e4").unwrap();
    ///
    /// let e2e4 = Move::new(e2, e4, &board).unwrap();
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// assert!(Move::new(e4, e2, &board).is_err());
    /// ```
    pub fn new(from: Square, to: Square, board: &Board) -> Result<Self> {
        let piece = board
            .piece_at(from)
            .ok_or(anyhow!("No piece found at {from} when creating move {from}{to}"))?;

        Ok(Self::with_piece(piece, from, to, board))
    }

    /// Creates a [`Move`] of `piece` from `from` to `to`, detecting promotions.
    #[inline(always)]
    pub(crate) fn with_piece(piece: Piece, from: Square, to: Square, board: &Board) -> Self {
        let kind = if piece.is_pawn() && to.row() == piece.color().promotion_row() {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        };

        Self {
            from,
            to,
            piece,
            captured: board.piece_at(to),
            kind,
        }
    }

    /// Creates an en passant capture. The captured piece is the enemy Pawn beside `from`.
    #[inline(always)]
    pub(crate) fn en_passant(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(Piece::new(piece.color().opponent(), PieceKind::Pawn)),
            kind: MoveKind::EnPassant,
        }
    }

    /// Creates a castling move of the King on `from` to `to`.
    #[inline(always)]
    pub(crate) fn castle(king: Piece, from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            piece: king,
            captured: None,
            kind: MoveKind::Castle,
        }
    }

    /// Source square of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Destination square of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The [`Piece`] being moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Piece`] being captured, if any.
    ///
    /// For en passant this is the enemy Pawn, even though it does not sit on the destination square.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Fetches the [`MoveKind`] of this [`Move`].
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if this [`Move`] removes an enemy piece from the board.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this [`Move`] is en passant.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns `true` if this [`Move`] is a castle.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    /// Returns `true` if this [`Move`] is a castle towards the h-file.
    #[inline(always)]
    pub const fn is_kingside_castle(&self) -> bool {
        self.is_castle() && self.to.col() > self.from.col()
    }

    /// Returns `true` if this [`Move`] promotes a Pawn.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion)
    }

    /// Returns `true` if this [`Move`] is a Pawn advancing two squares.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        self.piece.is_pawn() && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// The square a Pawn skipped over, if this [`Move`] is a double push.
    #[inline(always)]
    pub const fn skipped_square(&self) -> Option<Square> {
        if self.is_pawn_double_push() {
            Some(Square::new(
                (self.from.row() + self.to.row()) / 2,
                self.from.col(),
            ))
        } else {
            None
        }
    }

    /// Square of the Pawn removed by en passant: on the source row, in the destination column.
    #[inline(always)]
    pub const fn en_passant_victim_square(&self) -> Square {
        Square::new(self.from.row(), self.to.col())
    }

    /// Converts this [`Move`] to algebraic notation of its endpoints, such as `"e2e4"`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    /// Displays the move along with the pieces involved and its [`MoveKind`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?}", self.piece)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {captured:?}")?;
        }
        write!(f, ", {})", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    #[test]
    fn test_equality_ignores_flags() {
        let board = Board::standard();
        let normal = Move::new(sq("e1"), sq("g1"), &board).unwrap();
        let castle = Move::castle(Piece::WHITE_KING, sq("e1"), sq("g1"));

        assert_eq!(normal, castle);
        assert_ne!(normal.kind(), castle.kind());
        assert_ne!(normal, Move::new(sq("e1"), sq("f1"), &board).unwrap());
    }

    #[test]
    fn test_captured_piece_is_recorded_at_creation() {
        let board = Board::standard();
        let mv = Move::new(sq("a1"), sq("a8"), &board).unwrap();
        assert_eq!(mv.piece(), Piece::WHITE_ROOK);
        assert_eq!(mv.captured(), Some(Piece::BLACK_ROOK));
    }

    #[test]
    fn test_promotion_is_classified_automatically() {
        let board = Board::from_rows([
            "....k...", "P.......", "........", "........", "........", "........", ".......p",
            "....K...",
        ])
        .unwrap();

        assert!(Move::new(sq("a7"), sq("a8"), &board).unwrap().is_promotion());
        assert!(Move::new(sq("h2"), sq("h1"), &board).unwrap().is_promotion());
        assert!(!Move::new(sq("e1"), sq("e2"), &board).unwrap().is_promotion());
    }

    #[test]
    fn test_en_passant_synthesizes_victim() {
        let mv = Move::en_passant(Piece::WHITE_PAWN, sq("e5"), sq("d6"));
        assert_eq!(mv.captured(), Some(Piece::BLACK_PAWN));
        assert_eq!(mv.en_passant_victim_square(), sq("d5"));
    }

    #[test]
    fn test_double_push_skips_midpoint() {
        let board = Board::standard();
        let e7e5 = Move::new(sq("e7"), sq("e5"), &board).unwrap();
        assert_eq!(e7e5.skipped_square(), Some(sq("e6")));

        let e7e6 = Move::new(sq("e7"), sq("e6"), &board).unwrap();
        assert_eq!(e7e6.skipped_square(), None);
    }
}
