/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, Result};
use tracing::{debug, trace};

use super::{
    generate_castle_moves, is_square_attacked, pseudo_legal_moves, Board, CastleRights,
    CastleSide, Color, Move, MoveList, Piece, PieceKind, Square,
};

/// Optional rule variations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rules {
    /// If set, capturing a Rook on its home corner revokes its owner's castling right on that side.
    ///
    /// This is the standard rule. Turning it off keeps the right until the owner's King or Rook moves.
    pub capture_revokes_castling: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            capture_revokes_castling: true,
        }
    }
}

/// Outcome of the game, as of the last legal move computation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "Ongoing"),
            Self::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Self::Stalemate => write!(f, "Draw by stalemate"),
        }
    }
}

/// A game of chess.
///
/// Owns the [`Board`] and everything needed to move on it legally and take moves back:
/// the side to move, both King locations, the move log, and the castling rights and
/// en passant target along with one snapshot of each per ply.
///
/// The basic methods you're probably looking for are [`GameState::get_valid_moves`],
/// [`GameState::make_move`], and [`GameState::undo_move`].
///
/// # Example
/// ```
/// # use rookery::{GameState, Square};
/// let mut game = GameState::new();
/// let moves = game.get_valid_moves();
/// assert_eq!(moves.len(), 20);
///
/// let e2 = Square::from_uci("e2").unwrap();
/// let e4 = Square::from_uci("e4").unwrap();
/// let e2e4 = game.find_legal_move(e2, e4).unwrap();
/// game.make_move(e2e4);
/// assert!(!game.is_white_to_move());
///
/// game.undo_move();
/// assert!(game.is_white_to_move());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,

    /// Cached King squares, indexed by [`Color`].
    king_locations: [Square; Color::COUNT],

    move_log: Vec<Move>,

    castle_rights: CastleRights,

    /// Always one longer than `move_log`; the last entry equals `castle_rights`.
    castle_rights_log: Vec<CastleRights>,

    /// The square a Pawn skipped over on the previous move, if it advanced two squares.
    en_passant: Option<Square>,

    /// Always one longer than `move_log`; the last entry equals `en_passant`.
    en_passant_log: Vec<Option<Square>>,

    checkmate: bool,
    stalemate: bool,

    rules: Rules,
}

impl GameState {
    /// Creates a new game in the standard starting position, White to move, all rights granted.
    pub fn new() -> Self {
        let board = Board::standard();
        Self::with_parts(
            board,
            Color::White,
            [Square::new(7, 4), Square::new(0, 4)],
            CastleRights::ALL,
            None,
        )
    }

    /// Creates a game from an arbitrary `board`.
    ///
    /// `castle_rights` are trusted as given. Will return an [`anyhow::Error`] if either side has no King.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        castle_rights: CastleRights,
    ) -> Result<Self> {
        let mut king_locations = [Square::default(); Color::COUNT];
        for color in Color::all() {
            king_locations[color] = board
                .find(Piece::new(color, PieceKind::King))
                .ok_or(anyhow!("Board has no {color} King:\n{board}"))?;
        }

        Ok(Self::with_parts(
            board,
            side_to_move,
            king_locations,
            castle_rights,
            None,
        ))
    }

    fn with_parts(
        board: Board,
        side_to_move: Color,
        king_locations: [Square; Color::COUNT],
        castle_rights: CastleRights,
        en_passant: Option<Square>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            king_locations,
            move_log: Vec::new(),
            castle_rights,
            castle_rights_log: vec![castle_rights],
            en_passant,
            en_passant_log: vec![en_passant],
            checkmate: false,
            stalemate: false,
            rules: Rules::default(),
        }
    }

    /// Replaces the [`Rules`] this game is played under.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// The current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns `true` if it is White's turn.
    #[inline(always)]
    pub const fn is_white_to_move(&self) -> bool {
        self.side_to_move.is_white()
    }

    /// Square of `color`'s King.
    #[inline(always)]
    pub const fn king_location(&self, color: Color) -> Square {
        self.king_locations[color.index()]
    }

    /// Every move made so far, oldest first.
    #[inline(always)]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// The current castling rights.
    #[inline(always)]
    pub const fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    /// The castling rights before the first move and after every move since.
    #[inline(always)]
    pub fn castle_rights_log(&self) -> &[CastleRights] {
        &self.castle_rights_log
    }

    /// The square a Pawn skipped over on the previous move, if any.
    #[inline(always)]
    pub const fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// The [`Rules`] this game is played under.
    #[inline(always)]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Whether the last legal move computation found checkmate.
    #[inline(always)]
    pub const fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Whether the last legal move computation found stalemate.
    #[inline(always)]
    pub const fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// The outcome of the game, as of the last call to [`GameState::get_valid_moves`].
    pub const fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate {
                winner: self.side_to_move.opponent(),
            }
        } else if self.stalemate {
            GameStatus::Stalemate
        } else {
            GameStatus::Ongoing
        }
    }

    /// Returns `true` if `square` is attacked by the opponent of the side to move.
    #[inline(always)]
    pub fn square_in_check(&self, square: Square) -> bool {
        is_square_attacked(&self.board, square, self.side_to_move.opponent())
    }

    /// Returns `true` if the side to move's King is attacked.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.square_in_check(self.king_location(self.side_to_move))
    }

    /// Creates a candidate [`Move`] between two squares of the current board.
    ///
    /// The candidate's flags may be wrong; look it up in [`GameState::get_valid_moves`] to get the real move.
    #[inline(always)]
    pub fn candidate_move(&self, from: Square, to: Square) -> Result<Move> {
        Move::new(from, to, &self.board)
    }

    /// Generate all pseudo-legal moves for the side to move, castling included.
    pub fn get_pseudo_legal_moves(&self) -> MoveList {
        let color = self.side_to_move;
        let mut moves = pseudo_legal_moves(&self.board, color, self.en_passant);
        generate_castle_moves(
            &self.board,
            self.king_location(color),
            color,
            self.castle_rights,
            &mut moves,
        );
        moves
    }

    /// Generate all legal moves for the side to move.
    ///
    /// Every pseudo-legal move is made, checked for leaving the mover's King attacked, and
    /// undone. If no moves remain, this sets the checkmate or stalemate flag; otherwise both are cleared.
    pub fn get_valid_moves(&mut self) -> MoveList {
        let mover = self.side_to_move;
        let rights_before = self.castle_rights;
        let en_passant_before = self.en_passant;

        let mut moves = self.get_pseudo_legal_moves();

        // Walk backwards so removals don't shift unvisited entries
        for i in (0..moves.len()).rev() {
            self.make_move(moves[i]);
            let exposed =
                is_square_attacked(&self.board, self.king_location(mover), mover.opponent());
            self.undo_move();

            if exposed {
                moves.remove(i);
            }
        }

        debug_assert_eq!(self.castle_rights, rights_before);
        debug_assert_eq!(self.en_passant, en_passant_before);

        let in_check = moves.is_empty() && self.in_check();
        self.checkmate = moves.is_empty() && in_check;
        self.stalemate = moves.is_empty() && !in_check;

        debug!(
            side = %mover,
            moves = moves.len(),
            checkmate = self.checkmate,
            stalemate = self.stalemate,
            "computed legal moves"
        );

        moves
    }

    /// Generate all legal moves of the piece on `square`.
    pub fn legal_moves_from(&mut self, square: Square) -> MoveList {
        let mut moves = self.get_valid_moves();
        moves.retain(|mv| mv.from() == square);
        moves
    }

    /// Finds the legal move from `from` to `to`, if there is one.
    pub fn find_legal_move(&mut self, from: Square, to: Square) -> Option<Move> {
        self.get_valid_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
    }

    /// Applies `mv`. No enforcement of legality.
    ///
    /// `mv` should come from [`GameState::get_valid_moves`] so that its flags are right.
    pub fn make_move(&mut self, mv: Move) {
        trace!(mv = %mv, "make");

        let piece = mv.piece();
        let color = piece.color();

        self.board.clear(mv.from());
        self.board.place(piece, mv.to());
        self.move_log.push(mv);
        self.side_to_move = color.opponent();

        if piece.is_king() {
            self.king_locations[color] = mv.to();
        }

        if mv.is_promotion() {
            self.board.place(piece.promoted(PieceKind::Queen), mv.to());
        }

        if mv.is_en_passant() {
            self.board.clear(mv.en_passant_victim_square());
        }

        self.en_passant = mv.skipped_square();

        if mv.is_castle() {
            let (corner, landing) = Self::castle_rook_squares(&mv, color);
            if let Some(rook) = self.board.take(corner) {
                self.board.place(rook, landing);
            }
        }

        self.castle_rights = self
            .castle_rights
            .after_move(&mv, self.rules.capture_revokes_castling);
        self.castle_rights_log.push(self.castle_rights);
        self.en_passant_log.push(self.en_passant);
    }

    /// Reverts the most recent move, returning it. Does nothing if no moves have been made.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        trace!(mv = %mv, "undo");

        let piece = mv.piece();
        let color = piece.color();

        self.board.place(piece, mv.from());
        self.board[mv.to()] = mv.captured();
        self.side_to_move = color;

        if piece.is_king() {
            self.king_locations[color] = mv.from();
        }

        if mv.is_en_passant() {
            self.board.clear(mv.to());
            self.board[mv.en_passant_victim_square()] = mv.captured();
        }

        self.castle_rights_log.pop();
        self.castle_rights = *self
            .castle_rights_log
            .last()
            .unwrap_or(&CastleRights::ALL);

        self.en_passant_log.pop();
        self.en_passant = self.en_passant_log.last().copied().flatten();

        if mv.is_castle() {
            let (corner, landing) = Self::castle_rook_squares(&mv, color);
            if let Some(rook) = self.board.take(landing) {
                self.board.place(rook, corner);
            }
        }

        Some(mv)
    }

    /// Home corner of the castling Rook, and the square beside the King where it lands.
    fn castle_rook_squares(mv: &Move, color: Color) -> (Square, Square) {
        let row = mv.to().row();
        if mv.is_kingside_castle() {
            (
                CastleSide::Kingside.rook_home(color),
                Square::new(row, mv.to().col() - 1),
            )
        } else {
            (
                CastleSide::Queenside.rook_home(color),
                Square::new(row, mv.to().col() + 1),
            )
        }
    }
}

impl Default for GameState {
    /// Standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let en_passant = self
            .en_passant
            .map_or_else(|| String::from("-"), Square::to_uci);

        for (row, line) in self.board.to_string().lines().enumerate() {
            write!(f, "{line}")?;
            match row {
                1 => write!(f, "        Turn: {}", self.side_to_move)?,
                2 => write!(f, "    Castling: {}", self.castle_rights)?,
                3 => write!(f, "  En passant: {en_passant}")?,
                4 => write!(f, "       Moves: {}", self.move_log.len())?,
                5 => write!(f, "      Status: {}", self.status())?,
                _ => {}
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "Kings: {:?}", self.king_locations)?;
        writeln!(f, "Log: {:?}", self.move_log)?;
        write!(f, "Rules: {:?}", self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    fn play(game: &mut GameState, moves: &[&str]) {
        for uci in moves {
            let mv = game
                .find_legal_move(sq(&uci[0..2]), sq(&uci[2..4]))
                .unwrap_or_else(|| panic!("{uci} should be legal in\n{game}"));
            game.make_move(mv);
        }
    }

    #[test]
    fn test_logs_stay_one_longer_than_move_log() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game.move_log().len(), 3);
        assert_eq!(game.castle_rights_log().len(), 4);
        assert_eq!(game.en_passant_log.len(), 4);

        game.undo_move();
        assert_eq!(game.castle_rights_log().len(), 3);
        assert_eq!(game.en_passant_log.len(), 3);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut game = GameState::new();
        let before = game.clone();
        assert_eq!(game.undo_move(), None);
        assert_eq!(game, before);
    }

    #[test]
    fn test_king_location_follows_king() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4", "e7e5", "e1e2"]);
        assert_eq!(game.king_location(Color::White), sq("e2"));

        game.undo_move();
        assert_eq!(game.king_location(Color::White), sq("e1"));
    }

    #[test]
    fn test_castling_moves_rook_and_undo_restores_it() {
        let board = Board::from_rows([
            "r...k..r", "........", "........", "........", "........", "........", "........",
            "R...K..R",
        ])
        .unwrap();
        let mut game = GameState::from_board(board, Color::White, CastleRights::ALL).unwrap();
        let start = game.clone();

        play(&mut game, &["e1g1"]);
        assert_eq!(game.board().piece_at(sq("g1")), Some(Piece::WHITE_KING));
        assert_eq!(game.board().piece_at(sq("f1")), Some(Piece::WHITE_ROOK));
        assert!(game.board().is_empty(sq("h1")));
        assert_eq!(game.castle_rights().to_string(), "kq");

        play(&mut game, &["e8c8"]);
        assert_eq!(game.board().piece_at(sq("c8")), Some(Piece::BLACK_KING));
        assert_eq!(game.board().piece_at(sq("d8")), Some(Piece::BLACK_ROOK));
        assert!(game.board().is_empty(sq("a8")));
        assert_eq!(game.castle_rights(), CastleRights::NONE);

        game.undo_move();
        game.undo_move();
        assert_eq!(game, start);
    }

    #[test]
    fn test_en_passant_target_is_restored_verbatim() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4"]);
        assert_eq!(game.en_passant_target(), Some(sq("e3")));

        play(&mut game, &["g8f6"]);
        assert_eq!(game.en_passant_target(), None);

        game.undo_move();
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn test_en_passant_capture_and_undo() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let before = game.clone();

        play(&mut game, &["e5d6"]);
        assert!(game.board().is_empty(sq("d5")));
        assert_eq!(game.board().piece_at(sq("d6")), Some(Piece::WHITE_PAWN));
        assert!(game.move_log().last().unwrap().is_en_passant());

        game.undo_move();
        assert_eq!(game, before);
        assert_eq!(game.board().piece_at(sq("d5")), Some(Piece::BLACK_PAWN));
        assert!(game.board().is_empty(sq("d6")));
    }

    #[test]
    fn test_flags_are_cleared_when_moves_return() {
        let mut game = GameState::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.get_valid_moves().is_empty());
        assert!(game.is_checkmate());

        game.undo_move();
        assert!(!game.get_valid_moves().is_empty());
        assert!(!game.is_checkmate());
        assert!(!game.is_stalemate());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let board = Board::from_rows([
            "....k...", "....r...", "........", "........", "........", "........", "....B...",
            "....K...",
        ])
        .unwrap();
        let mut game = GameState::from_board(board, Color::White, CastleRights::NONE).unwrap();
        assert!(game.legal_moves_from(sq("e2")).is_empty());
    }

    #[test]
    fn test_from_board_requires_both_kings() {
        let board = Board::from_rows([
            "........", "........", "........", "........", "........", "........", "........",
            "....K...",
        ])
        .unwrap();
        assert!(GameState::from_board(board, Color::White, CastleRights::NONE).is_err());
    }

    #[test]
    fn test_rook_capture_rule_is_configurable() {
        let board = Board::from_rows([
            "r...k..r", "........", "........", "........", "........", "........", "........",
            "R...K..R",
        ])
        .unwrap();

        let mut standard = GameState::from_board(board, Color::White, CastleRights::ALL).unwrap();
        play(&mut standard, &["h1h8"]);
        assert_eq!(standard.castle_rights().to_string(), "Qq");

        let lenient = Rules {
            capture_revokes_castling: false,
        };
        let mut lenient_game = GameState::from_board(board, Color::White, CastleRights::ALL)
            .unwrap()
            .with_rules(lenient);
        play(&mut lenient_game, &["h1h8"]);
        assert_eq!(lenient_game.castle_rights().to_string(), "Qkq");

        // The right is kept, but there is no rook left to castle with
        let black_castles = lenient_game
            .get_valid_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .count();
        assert_eq!(black_castles, 0);
    }
}
