/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::{
    perft, splitperft, ClickOutcome, Config, EngineCommand, GameState, GameStatus, MoveList,
    Rules, Selection, Square, SquarePair,
};

/// An interactive shell around a [`GameState`].
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    ///
    /// Replaced whenever the engine is told to start a new game.
    game: GameState,

    /// Rules every new game is started with.
    rules: Rules,

    /// Square picked by the `click` command, awaiting a second click.
    selection: Selection,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new(config: &Config) -> Self {
        let (sender, receiver) = channel();

        let mut engine = Self {
            game: GameState::new().with_rules(config.rules),
            rules: config.rules,
            selection: Selection::new(),
            sender,
            receiver,
        };
        engine.game.get_valid_moves();

        engine
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err:#}");
            }
        });

        println!("{}", self.name());
        self.display();

        while let Ok(cmd) = self.receiver.recv() {
            if !self.execute(cmd) {
                break;
            }
        }

        Ok(())
    }

    /// Execute a single [`EngineCommand`], returning `false` if the engine should stop.
    pub fn execute(&mut self, cmd: EngineCommand) -> bool {
        match cmd {
            EngineCommand::Click { square } => self.click(square),

            EngineCommand::Display => self.display(),

            EngineCommand::Exit => return false,

            EngineCommand::Move { mv } => {
                // Keep running, even on error
                if let Err(e) = self.make_move(mv) {
                    eprintln!("Error: {e}");
                }
            }

            EngineCommand::Moves { square, debug } => {
                let moves = if let Some(square) = square {
                    self.game.legal_moves_from(square)
                } else {
                    self.game.get_valid_moves()
                };
                println!("{}", format_moves(&moves, debug));
            }

            EngineCommand::Perft { depth } => {
                let now = Instant::now();
                let nodes = perft(&mut self.game, depth);
                println!("{nodes} nodes in {:?}", now.elapsed());
            }

            EngineCommand::Reset => self.new_game(),

            EngineCommand::Splitperft { depth } => {
                let nodes = splitperft(&mut self.game, depth);
                println!("\n{nodes}");
            }

            EngineCommand::Undo => self.undo(),
        };

        true
    }

    /// Executes the `display` command, printing the current game state.
    fn display(&self) {
        println!("{}", self.game);
    }

    /// Executes the `click` command, feeding `square` to the two-click selection.
    fn click(&mut self, square: Square) {
        match self.selection.click(square, &mut self.game) {
            ClickOutcome::Ignored => println!("The game is over; undo or reset to keep playing"),

            ClickOutcome::Selected(square) | ClickOutcome::Rejected { to: square, .. } => {
                let highlights = self.selection.highlights(&mut self.game);
                println!("Selected {square}: {}", format_moves(&highlights, false));
            }

            ClickOutcome::Deselected => println!("Selection cleared"),

            ClickOutcome::Moved(mv) => {
                info!(mv = %mv, "move played");
                self.after_change();
            }
        }
    }

    /// Executes the `move` command, making the move if it is legal.
    fn make_move(&mut self, SquarePair { from, to }: SquarePair) -> Result<()> {
        if self.game.status() != GameStatus::Ongoing {
            bail!("The game is over; undo or reset to keep playing");
        }

        let Some(mv) = self.game.find_legal_move(from, to) else {
            warn!(from = %from, to = %to, "illegal move rejected");
            bail!("Illegal move {from}{to} for {}", self.game.side_to_move());
        };

        self.game.make_move(mv);
        self.selection.clear();
        info!(mv = %mv, "move played");
        self.after_change();

        Ok(())
    }

    /// Executes the `undo` command, taking back the last move, if there is one.
    fn undo(&mut self) {
        self.selection.clear();

        match self.game.undo_move() {
            Some(mv) => {
                info!(mv = %mv, "move undone");
                self.after_change();
            }
            None => println!("No moves to undo"),
        }
    }

    /// Starts a new game.
    fn new_game(&mut self) {
        info!("new game");
        self.game = GameState::new().with_rules(self.rules);
        self.selection.clear();
        self.after_change();
    }

    /// Recomputes the legal moves after the game changed, then shows the result.
    fn after_change(&mut self) {
        self.game.get_valid_moves();
        self.display();

        let status = self.game.status();
        if status != GameStatus::Ongoing {
            info!(%status, "game over");
            println!("{status}");
        }
    }
}

/// Joins `moves` by comma-space, or returns `"(none)"` if there are none.
fn format_moves(moves: &MoveList, debug: bool) -> String {
    if moves.is_empty() {
        return String::from("(none)");
    }

    moves
        .iter()
        .map(|mv| {
            if debug {
                format!("{mv:?}")
            } else {
                mv.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line from stdin")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            return Ok(());
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
