/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{GameState, Move, MoveList, Square};

/// What happened as a result of a [`Selection::click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The game is over; the click was ignored.
    Ignored,

    /// The square is now selected.
    Selected(Square),

    /// The selected square was clicked again and is no longer selected.
    Deselected,

    /// The two clicked squares formed a legal move, which was made.
    Moved(Move),

    /// The two clicked squares did not form a legal move. The second one is now selected.
    Rejected { from: Square, to: Square },
}

/// Two-click move entry: the first click picks a square, the second picks where to go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Square>,
}

impl Selection {
    /// An empty selection.
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// The currently selected square, if any.
    #[inline(always)]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Forget the current selection.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Handle a click on `square`, making a move on `game` if two clicks form a legal one.
    pub fn click(&mut self, square: Square, game: &mut GameState) -> ClickOutcome {
        if game.is_checkmate() || game.is_stalemate() {
            return ClickOutcome::Ignored;
        }

        let Some(from) = self.selected else {
            self.selected = Some(square);
            return ClickOutcome::Selected(square);
        };

        if from == square {
            self.selected = None;
            return ClickOutcome::Deselected;
        }

        match game.find_legal_move(from, square) {
            Some(mv) => {
                game.make_move(mv);
                self.selected = None;
                ClickOutcome::Moved(mv)
            }
            None => {
                self.selected = Some(square);
                ClickOutcome::Rejected { from, to: square }
            }
        }
    }

    /// Legal moves of the selected piece, if it belongs to the side to move.
    pub fn highlights(&self, game: &mut GameState) -> MoveList {
        let Some(square) = self.selected else {
            return MoveList::new();
        };

        if game.board().color_at(square) != Some(game.side_to_move()) {
            return MoveList::new();
        }

        game.legal_moves_from(square)
    }
}
