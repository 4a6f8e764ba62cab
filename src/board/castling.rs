/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Color, Move, Square};

/// One of the two directions a King can castle in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CastleSide {
    /// Towards the h-file.
    Kingside,

    /// Towards the a-file.
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    #[inline(always)]
    pub const fn all() -> [Self; 2] {
        [Self::Kingside, Self::Queenside]
    }

    /// Column of the corner Rook for this side.
    #[inline(always)]
    pub const fn rook_col(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    /// Column delta of the King's two-square castling step.
    #[inline(always)]
    pub const fn direction(&self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    /// Home square of `color`'s Rook on this side.
    #[inline(always)]
    pub const fn rook_home(&self, color: Color) -> Square {
        Square::new(color.home_row(), self.rook_col())
    }
}

/// The four castling rights, one bit each.
///
/// This is a plain value: every snapshot is a copy, so a log of rights can never alias the current rights.
///
/// ```text
///     0000 0 0 0 0
///       |  | | | +- White kingside
///       |  | | +- White queenside
///       |  | +- Black kingside
///       |  +- Black queenside
///       +- Unused.
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CastleRights(u8);

impl CastleRights {
    /// Every right granted.
    pub const ALL: Self = Self(0b1111);

    /// No rights at all.
    pub const NONE: Self = Self(0);

    /// Bit for `color` castling on `side`.
    #[inline(always)]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        let side_bit = match side {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        };
        1 << (color.index() * 2 + side_bit)
    }

    /// Creates [`CastleRights`] from the four individual flags.
    pub const fn new(
        white_kingside: bool,
        white_queenside: bool,
        black_kingside: bool,
        black_queenside: bool,
    ) -> Self {
        Self(
            white_kingside as u8
                | (white_queenside as u8) << 1
                | (black_kingside as u8) << 2
                | (black_queenside as u8) << 3,
        )
    }

    /// Returns `true` if `color` may still castle on `side`.
    ///
    /// # Example
    /// ```
    /// # use rookery::{CastleRights, CastleSide, Color};
    /// let rights = CastleRights::ALL.revoked(Color::White, CastleSide::Queenside);
    /// assert!(rights.has(Color::White, CastleSide::Kingside));
    /// assert!(!rights.has(Color::White, CastleSide::Queenside));
    /// ```
    #[inline(always)]
    pub const fn has(&self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Returns a copy with `color`'s right on `side` removed.
    #[inline(always)]
    pub const fn revoked(self, color: Color, side: CastleSide) -> Self {
        Self(self.0 & !Self::bit(color, side))
    }

    /// Returns a copy with both of `color`'s rights removed.
    #[inline(always)]
    pub const fn revoked_all(self, color: Color) -> Self {
        self.revoked(color, CastleSide::Kingside)
            .revoked(color, CastleSide::Queenside)
    }

    /// Returns the rights that remain after `mv` is played.
    ///
    /// A King move removes both of its side's rights, and a Rook leaving its home corner removes
    /// that corner's right. If `capture_revokes` is set, a piece captured on a Rook's home
    /// corner also removes the right for that corner.
    pub fn after_move(self, mv: &Move, capture_revokes: bool) -> Self {
        let piece = mv.piece();
        let color = piece.color();
        let mut rights = self;

        if piece.is_king() {
            rights = rights.revoked_all(color);
        } else if piece.is_rook() {
            for side in CastleSide::all() {
                if mv.from() == side.rook_home(color) {
                    rights = rights.revoked(color, side);
                }
            }
        }

        if capture_revokes && mv.is_capture() {
            let enemy = color.opponent();
            for side in CastleSide::all() {
                if mv.to() == side.rook_home(enemy) {
                    rights = rights.revoked(enemy, side);
                }
            }
        }

        rights
    }
}

impl Default for CastleRights {
    /// All rights granted, as at the start of a game.
    #[inline(always)]
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for CastleRights {
    /// Displays the rights as `KQkq`, or `-` if there are none.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return write!(f, "-");
        }

        for color in Color::all() {
            for side in CastleSide::all() {
                if self.has(color, side) {
                    let c = match side {
                        CastleSide::Kingside => 'k',
                        CastleSide::Queenside => 'q',
                    };
                    let c = if color.is_white() {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    };
                    write!(f, "{c}")?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn mv(board: &Board, uci: &str) -> Move {
        let from = Square::from_uci(&uci[0..2]).unwrap();
        let to = Square::from_uci(&uci[2..4]).unwrap();
        Move::new(from, to, board).unwrap()
    }

    fn corners() -> Board {
        Board::from_rows([
            "r...k..r", "........", "........", "........", "........", "........", "........",
            "R...K..R",
        ])
        .unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(CastleRights::ALL.to_string(), "KQkq");
        assert_eq!(CastleRights::NONE.to_string(), "-");
        assert_eq!(CastleRights::new(false, true, true, false).to_string(), "Qk");
    }

    #[test]
    fn test_flags_are_independent() {
        for color in Color::all() {
            for side in CastleSide::all() {
                let rights = CastleRights::ALL.revoked(color, side);
                assert!(!rights.has(color, side));
                assert!(rights.has(color.opponent(), side));
                assert!(rights.has(color.opponent(), CastleSide::Kingside));
            }
        }
    }

    #[test]
    fn test_king_move_revokes_both_sides() {
        let board = corners();
        let rights = CastleRights::ALL.after_move(&mv(&board, "e1d1"), true);
        assert_eq!(rights.to_string(), "kq");

        let rights = rights.after_move(&mv(&board, "e8f8"), true);
        assert_eq!(rights, CastleRights::NONE);
    }

    #[test]
    fn test_rook_move_revokes_its_corner() {
        let board = corners();
        let rights = CastleRights::ALL.after_move(&mv(&board, "a1b1"), true);
        assert_eq!(rights.to_string(), "Kkq");

        let rights = rights.after_move(&mv(&board, "h8h5"), true);
        assert_eq!(rights.to_string(), "Kq");
    }

    #[test]
    fn test_rook_capture_on_home_square() {
        let board = corners();
        let a1a8 = mv(&board, "a1a8");

        // White's own rook left a1, Black lost the a8 rook
        assert_eq!(CastleRights::ALL.after_move(&a1a8, true).to_string(), "Kk");

        // Without capture revocation, only the mover's right goes
        assert_eq!(CastleRights::ALL.after_move(&a1a8, false).to_string(), "Kkq");
    }

    #[test]
    fn test_rights_are_never_regranted() {
        let board = corners();
        let rights = CastleRights::NONE.after_move(&mv(&board, "a1a2"), true);
        assert_eq!(rights, CastleRights::NONE);
    }
}
