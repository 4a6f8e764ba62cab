/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rookery::{
    Board, CastleRights, CastleSide, Color, GameState, GameStatus, Piece, PieceKind, Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(game: &mut GameState, moves: &[&str]) {
    for uci in moves {
        let mv = game
            .find_legal_move(sq(&uci[0..2]), sq(&uci[2..4]))
            .unwrap_or_else(|| panic!("{uci} should be legal in\n{game}"));
        game.make_move(mv);
    }
}

fn game_from(rows: [&str; 8], side: Color, rights: CastleRights) -> GameState {
    GameState::from_board(Board::from_rows(rows).unwrap(), side, rights).unwrap()
}

/// Makes and undoes every legal move down to `depth`, checking that each undo restores the game exactly.
fn assert_round_trips(game: &mut GameState, depth: usize) {
    if depth == 0 {
        return;
    }

    for mv in game.get_valid_moves() {
        let before = game.clone();
        game.make_move(mv);
        assert_round_trips(game, depth - 1);
        assert_eq!(game.undo_move(), Some(mv));

        assert_eq!(game.board(), before.board(), "undo of {mv:?} changed the board");
        assert_eq!(game.side_to_move(), before.side_to_move());
        for color in Color::all() {
            assert_eq!(game.king_location(color), before.king_location(color));
        }
        assert_eq!(game.castle_rights(), before.castle_rights());
        assert_eq!(game.en_passant_target(), before.en_passant_target());
        assert_eq!(game.move_log(), before.move_log());
    }
}

#[test]
fn test_twenty_moves_each_side_at_the_start() {
    let mut game = GameState::new();
    assert_eq!(game.get_valid_moves().len(), 20);

    play(&mut game, &["e2e4"]);
    assert_eq!(game.get_valid_moves().len(), 20);
}

#[test]
fn test_every_opening_move_allows_twenty_replies() {
    let mut game = GameState::new();
    for mv in game.get_valid_moves() {
        game.make_move(mv);
        assert_eq!(game.get_valid_moves().len(), 20, "after {mv}");
        game.undo_move();
    }
}

#[test]
fn test_round_trip_from_start() {
    let mut game = GameState::new();
    assert_round_trips(&mut game, 3);
}

#[test]
fn test_round_trip_with_special_moves() {
    // Castling both ways, en passant, and promotion are all one or two plies away
    let mut game = game_from(
        [
            "r...k..r", "P.......", "........", "...pP...", "........", "........", "........",
            "R...K..R",
        ],
        Color::White,
        CastleRights::ALL,
    );
    game.get_valid_moves();
    assert_round_trips(&mut game, 3);
}

#[test]
fn test_fools_mate() {
    let mut game = GameState::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(game.get_valid_moves().is_empty());
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(game.is_white_to_move());
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
    assert_eq!(game.status().to_string(), "Black wins by checkmate");
}

#[test]
fn test_stalemate() {
    let mut game = game_from(
        [
            ".......k", "........", "......Q.", "........", "........", "........", "........",
            "K.......",
        ],
        Color::Black,
        CastleRights::NONE,
    );

    assert!(!game.in_check());
    assert!(game.get_valid_moves().is_empty());
    assert!(game.is_stalemate());
    assert!(!game.is_checkmate());
    assert_eq!(game.status().to_string(), "Draw by stalemate");
}

#[test]
fn test_castling_appears_and_rights_restore_on_undo() {
    let mut game = game_from(
        [
            "r...k..r", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "R...K..R",
        ],
        Color::White,
        CastleRights::ALL,
    );

    let castles = game
        .get_valid_moves()
        .into_iter()
        .filter(|mv| mv.is_castle())
        .map(|mv| mv.to_uci())
        .collect::<Vec<_>>();
    assert_eq!(castles.len(), 2);
    assert!(castles.contains(&String::from("e1g1")));
    assert!(castles.contains(&String::from("e1c1")));

    play(&mut game, &["e1f1"]);
    assert!(!game.castle_rights().has(Color::White, CastleSide::Kingside));
    assert!(!game.castle_rights().has(Color::White, CastleSide::Queenside));

    game.undo_move();
    assert_eq!(game.castle_rights(), CastleRights::ALL);
    assert_eq!(game.castle_rights_log(), &[CastleRights::ALL]);
    assert_eq!(
        game.get_valid_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .count(),
        2
    );
}

#[test]
fn test_no_castling_through_attacked_square() {
    // The black rook on f8 covers f1, so only the queenside castle remains
    let mut game = game_from(
        [
            "....kr..", "........", "........", "........", "........", "........", "........",
            "R...K..R",
        ],
        Color::White,
        CastleRights::new(true, true, false, false),
    );

    let castles = game
        .get_valid_moves()
        .into_iter()
        .filter(|mv| mv.is_castle())
        .map(|mv| mv.to_uci())
        .collect::<Vec<_>>();
    assert_eq!(castles, vec![String::from("e1c1")]);
}

#[test]
fn test_no_castling_onto_pawn_guarded_square() {
    // The b2 pawn has no move to c1, but it still guards it
    let mut game = game_from(
        [
            "....k...", "........", "........", "........", "........", "........", ".p......",
            "R...K...",
        ],
        Color::White,
        CastleRights::ALL,
    );

    assert!(game.square_in_check(sq("c1")));
    assert!(!game.in_check());
    assert!(game
        .get_valid_moves()
        .iter()
        .all(|mv| !mv.is_castle()));
}

#[test]
fn test_en_passant_only_on_the_next_move() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(game
        .legal_moves_from(sq("e5"))
        .iter()
        .any(|mv| mv.to() == sq("d6") && mv.is_en_passant()));

    // One move later, the chance is gone
    play(&mut game, &["g1f3", "h7h6"]);
    assert!(game
        .legal_moves_from(sq("e5"))
        .iter()
        .all(|mv| mv.to() != sq("d6")));
}

#[test]
fn test_promotion_always_yields_a_queen() {
    let mut game = game_from(
        [
            "........", "P.......", ".......k", "........", "........", "........", "......p.",
            "....K...",
        ],
        Color::White,
        CastleRights::NONE,
    );

    play(&mut game, &["a7a8"]);
    assert_eq!(game.board().piece_at(sq("a8")), Some(Piece::WHITE_QUEEN));

    play(&mut game, &["g2g1"]);
    assert_eq!(
        game.board().piece_at(sq("g1")),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );

    game.undo_move();
    assert_eq!(game.board().piece_at(sq("g2")), Some(Piece::BLACK_PAWN));
    assert!(game.board().is_empty(sq("g1")));
}

#[test]
fn test_undo_with_no_moves_does_nothing() {
    let mut game = GameState::new();
    assert_eq!(game.undo_move(), None);
    assert_eq!(game.get_valid_moves().len(), 20);
}
