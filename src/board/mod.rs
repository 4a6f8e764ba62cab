/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Attack detection.
mod attacks;

/// Castling rights and sides.
mod castling;

/// Game state: make/undo and legal move computation.
mod game;

/// Pseudo-legal move generation.
mod movegen;

/// Moves and their kinds.
mod moves;

/// Perft node counting.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// The board.
mod position;

/// Squares and their algebraic names.
mod square;

pub use attacks::*;
pub use castling::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
