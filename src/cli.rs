/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::Square;

/// Process arguments for the `rookery` binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log filter directive, such as `rookery=debug`. Overrides `ROOKERY_LOG` and `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Keep a castling right when the Rook on its home corner is captured.
    #[arg(long, default_value = "false")]
    pub keep_rights_on_rook_capture: bool,
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(multicall = true, about, rename_all = "lower")]
pub enum EngineCommand {
    /// Select a square, as if clicking on it.
    ///
    /// Selecting the same square twice clears the selection. Selecting a second square attempts
    /// the move between the two; if it is not legal, the second square becomes the new selection.
    #[command(aliases = ["c", "select"])]
    Click { square: Square },

    /// Print a visual representation of the current game state.
    #[command(alias = "d")]
    Display,

    /// Quit the engine.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Apply the provided move to the game, if it is legal.
    #[command(alias = "m")]
    Move {
        /// Source and destination squares, such as `e2e4`.
        mv: SquarePair,
    },

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be printed using their debug formatter, which displays what kind of move it is.
        #[arg(short, long, default_value = "false")]
        debug: bool,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Start a new game.
    #[command(alias = "r")]
    Reset,

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Take back the last move.
    #[command(alias = "z")]
    Undo,
}

/// A source and destination square written back to back, such as `e2e4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquarePair {
    pub from: Square,
    pub to: Square,
}

impl FromStr for SquarePair {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .get(0..2)
            .zip(s.get(2..))
            .ok_or(anyhow!("Invalid move {s:?}: Expected two squares, like \"e2e4\""))?;

        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}
