/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules of chess: board, moves, legality, make/undo.
mod board;

/// Command-line arguments and shell commands.
mod cli;

/// Settings read from the environment and the command line.
mod config;

/// The interactive shell.
mod engine;

/// Two-click move entry.
mod selection;

pub use board::*;
pub use cli::*;
pub use config::*;
pub use engine::*;
pub use selection::*;
