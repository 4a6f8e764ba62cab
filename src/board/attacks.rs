/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{generate_piece_moves, Board, Color, MoveList, PieceKind, Square};

/// Returns `true` if any piece of color `by` attacks `square`.
///
/// This regenerates `by`'s moves piece by piece and checks their destinations, so it costs
/// about as much as a full move generation. Pawns are the exception: they are tested by their
/// capture geometry, since a Pawn attacks diagonally whether or not anything stands there, and
/// never attacks the square it can push to.
///
/// # Example
/// ```
/// # use rookery::{is_square_attacked, Board, Color, Square};
/// let board = Board::standard();
/// assert!(is_square_attacked(&board, Square::from_uci("f3").unwrap(), Color::White));
/// assert!(!is_square_attacked(&board, Square::from_uci("e4").unwrap(), Color::White));
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    let mut moves = MoveList::with_capacity(32);

    for (from, piece) in board.pieces() {
        if piece.color() != by {
            continue;
        }

        if piece.kind() == PieceKind::Pawn {
            let forward = by.forward();
            if from.offset(forward, -1) == Some(square) || from.offset(forward, 1) == Some(square) {
                return true;
            }
            continue;
        }

        moves.clear();
        generate_piece_moves(board, from, piece, None, &mut moves);
        if moves.iter().any(|mv| mv.to() == square) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    #[test]
    fn test_pawns_attack_diagonally_only() {
        let board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "....p...",
            "....K...",
        ])
        .unwrap();

        assert!(is_square_attacked(&board, sq("d1"), Color::Black));
        assert!(is_square_attacked(&board, sq("f1"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e1"), Color::Black));
    }

    #[test]
    fn test_sliders_are_blocked() {
        let board = Board::from_rows([
            "q...k...", "........", "........", "........", "........", "........", "........",
            "R...K...",
        ])
        .unwrap();

        assert!(is_square_attacked(&board, sq("a1"), Color::Black));
        assert!(is_square_attacked(&board, sq("a8"), Color::White));
        assert!(is_square_attacked(&board, sq("h1"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e1"), Color::Black));

        // Behind the white rook, the a-file is shadowed for the queen
        let board = Board::from_rows([
            "q...k...", "........", "........", "R.......", "........", "........", "........",
            "....K...",
        ])
        .unwrap();
        assert!(!is_square_attacked(&board, sq("a2"), Color::Black));
        assert!(is_square_attacked(&board, sq("a5"), Color::Black));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "........",
            ".N..K...",
        ])
        .unwrap();

        assert!(is_square_attacked(&board, sq("c3"), Color::White));
        assert!(is_square_attacked(&board, sq("d2"), Color::White));
        assert!(is_square_attacked(&board, sq("f2"), Color::White));
        assert!(!is_square_attacked(&board, sq("e3"), Color::White));
        assert!(is_square_attacked(&board, sq("d7"), Color::Black));
    }
}
