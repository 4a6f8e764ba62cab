/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    is_square_attacked, Board, CastleRights, CastleSide, Color, Move, MoveList, Piece, PieceKind,
    Square,
};

/// `(row, col)` offsets of a Knight's jumps.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// `(row, col)` offsets of a King's steps.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Orthogonal ray directions.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Diagonal ray directions.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Generate all pseudo-legal moves for `color`, excluding castling.
///
/// Pseudo-legal moves obey each piece's movement rules but may leave `color`'s King in check.
/// `en_passant` is the square a Pawn just skipped over, if any.
pub fn pseudo_legal_moves(board: &Board, color: Color, en_passant: Option<Square>) -> MoveList {
    let mut moves = MoveList::with_capacity(64);

    for (square, piece) in board.pieces() {
        if piece.color() == color {
            generate_piece_moves(board, square, piece, en_passant, &mut moves);
        }
    }

    moves
}

/// Generate the pseudo-legal moves of the `piece` standing on `from`.
pub(crate) fn generate_piece_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    match piece.kind() {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, en_passant, moves),
        PieceKind::Knight => generate_leaper_moves(board, from, piece, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => {
            generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves);
            generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves);
        }
        PieceKind::King => generate_leaper_moves(board, from, piece, &KING_OFFSETS, moves),
    }
}

/// Pushes, double pushes from the starting row, diagonal captures, and en passant.
fn generate_pawn_moves(
    board: &Board,
    from: Square,
    pawn: Piece,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let color = pawn.color();
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0) {
        if board.is_empty(one) {
            moves.push(Move::with_piece(pawn, from, one, board));

            if from.row() == color.pawn_row() {
                if let Some(two) = one.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
                    moves.push(Move::with_piece(pawn, from, two, board));
                }
            }
        }
    }

    for col_delta in [-1, 1] {
        let Some(target) = from.offset(forward, col_delta) else {
            continue;
        };

        if board.color_at(target) == Some(color.opponent()) {
            moves.push(Move::with_piece(pawn, from, target, board));
        } else if en_passant == Some(target) {
            moves.push(Move::en_passant(pawn, from, target));
        }
    }
}

/// Single-step pieces (Knight, King): each offset that lands on an empty or enemy square.
fn generate_leaper_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(row_delta, col_delta) in offsets {
        let Some(target) = from.offset(row_delta, col_delta) else {
            continue;
        };

        if board.color_at(target) != Some(piece.color()) {
            moves.push(Move::with_piece(piece, from, target, board));
        }
    }
}

/// Ray-casting pieces (Bishop, Rook, and both for the Queen).
///
/// Each ray continues through empty squares, stops before a friendly piece, and stops on (capturing) an enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(row_delta, col_delta) in directions {
        let mut current = from;

        while let Some(target) = current.offset(row_delta, col_delta) {
            match board.color_at(target) {
                None => moves.push(Move::with_piece(piece, from, target, board)),
                Some(color) if color != piece.color() => {
                    moves.push(Move::with_piece(piece, from, target, board));
                    break;
                }
                Some(_) => break,
            }

            current = target;
        }
    }
}

/// Append the castling moves available to the King of `color` standing on `king_square`.
///
/// Castling requires that the King is not in check, the right is still held, the corner still
/// holds a friendly Rook, every square between King and Rook is empty, and neither the square
/// the King passes through nor its destination is attacked.
pub fn generate_castle_moves(
    board: &Board,
    king_square: Square,
    color: Color,
    rights: CastleRights,
    moves: &mut MoveList,
) {
    let enemy = color.opponent();
    let king = Piece::new(color, PieceKind::King);

    if king_square != Square::new(color.home_row(), 4) || board.piece_at(king_square) != Some(king)
    {
        return;
    }

    if is_square_attacked(board, king_square, enemy) {
        return;
    }

    for side in CastleSide::all() {
        if !rights.has(color, side)
            || board.piece_at(side.rook_home(color)) != Some(Piece::new(color, PieceKind::Rook))
        {
            continue;
        }

        let step = side.direction();
        let path_is_clear = (1..)
            .map_while(|i| king_square.offset(0, step * i))
            .take_while(|&sq| sq != side.rook_home(color))
            .all(|sq| board.is_empty(sq));

        if !path_is_clear {
            continue;
        }

        // The queenside b-file square only has to be empty, not safe
        let passed = king_square.offset(0, step);
        let target = king_square.offset(0, step * 2);
        if let (Some(passed), Some(target)) = (passed, target) {
            if !is_square_attacked(board, passed, enemy) && !is_square_attacked(board, target, enemy)
            {
                moves.push(Move::castle(king, king_square, target));
            }
        }
    }
}
