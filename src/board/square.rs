/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// File letters, indexed by column.
const COLS_TO_FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digits, indexed by row. Row `0` is the eighth rank.
const ROWS_TO_RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Represents a single square on an `8x8` chess board.
///
/// Squares are addressed by `(row, column)`, with row `0` at the top of the board (rank 8)
/// and column `0` on the left (file a). Internally, `index = row * 8 + column`:
/// ```text
/// 8|  0  1  2  3  4  5  6  7
/// 7|  8  9 10 11 12 13 14 15
/// 6| 16 17 18 19 20 21 22 23
/// 5| 24 25 26 27 28 29 30 31
/// 4| 32 33 34 35 36 37 38 39
/// 3| 40 41 42 43 44 45 46 47
/// 2| 48 49 50 51 52 53 54 55
/// 1| 56 57 58 59 60 61 62 63
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a new [`Square`] from a row and column.
    ///
    /// Both must be in `[0,7]`; coordinates are expected to be validated by the caller.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// let e4 = Square::new(4, 4);
    /// assert_eq!(e4.to_string(), "e4");
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "Square coordinates must be in [0,7]");
        Self(row * 8 + col)
    }

    /// An iterator over all squares, starting from a8 and ending at h1.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Row of this [`Square`]; `0` is the eighth rank.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / 8
    }

    /// Column of this [`Square`]; `0` is the a-file.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % 8
    }

    /// Index of this [`Square`], useful for indexing into lists of length 64.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Attempt to offset this [`Square`] by the row and column deltas.
    ///
    /// Returns `None` if the result would be off the board.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// let c4 = Square::from_uci("c4").unwrap();
    /// assert_eq!(c4.offset(-1, 1), Some(Square::from_uci("d5").unwrap()));
    /// assert_eq!(Square::new(0, 0).offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let row = self.row() as i8 + row_delta;
        let col = self.col() as i8 + col_delta;

        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Self::new(row as u8, col as u8))
        }
    }

    /// File letter of this [`Square`].
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        COLS_TO_FILES[self.col() as usize]
    }

    /// Rank digit of this [`Square`].
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        ROWS_TO_RANKS[self.row() as usize]
    }

    /// Creates a [`Square`] from algebraic text, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// let a8 = Square::from_uci("a8").unwrap();
    /// assert_eq!((a8.row(), a8.col()), (0, 0));
    ///
    /// assert!(Square::from_uci("z0").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        let Some(col) = COLS_TO_FILES.iter().position(|&f| f == file) else {
            bail!("Invalid file char {file:?} in {square:?}: Must be one of [a-h]");
        };
        let Some(row) = ROWS_TO_RANKS.iter().position(|&r| r == rank) else {
            bail!("Invalid rank char {rank:?} in {square:?}: Must be one of [1-8]");
        };

        Ok(Self::new(row as u8, col as u8))
    }

    /// Converts this [`Square`] to algebraic text.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row(), self.col())
    }
}
