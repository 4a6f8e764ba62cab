/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::GameState;

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use rookery::{perft, GameState};
/// let mut game = GameState::new();
/// assert_eq!(perft(&mut game, 2), 400);
/// ```
#[inline(always)]
pub fn perft(game: &mut GameState, depth: usize) -> u64 {
    perft_generic::<true, false>(game, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after each
/// move available at the root node.
#[inline(always)]
pub fn splitperft(game: &mut GameState, depth: usize) -> u64 {
    perft_generic::<true, true>(game, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
///
/// Every move is made and undone on `game` itself, so it comes back exactly as it was given,
/// with its checkmate and stalemate flags recomputed for the root position.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(
    game: &mut GameState,
    depth: usize,
) -> u64 {
    let nodes = count::<BULK, SPLIT>(game, depth);

    // The leaves left the flags describing whichever position was visited last
    game.get_valid_moves();

    nodes
}

fn count<const BULK: bool, const SPLIT: bool>(game: &mut GameState, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = game.get_valid_moves();

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        game.make_move(mv);
        let new_nodes = count::<BULK, false>(game, depth - 1);
        game.undo_move();

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_matches_full_count() {
        let mut game = GameState::new();
        assert_eq!(
            perft_generic::<true, false>(&mut game, 3),
            perft_generic::<false, false>(&mut game, 3)
        );
    }

    #[test]
    fn test_perft_leaves_game_untouched() {
        let mut game = GameState::new();
        let before = game.clone();
        perft(&mut game, 3);
        assert_eq!(game, before);
    }

    #[test]
    fn test_depth_zero_is_one_node() {
        let mut game = GameState::new();
        assert_eq!(perft(&mut game, 0), 1);
    }
}
