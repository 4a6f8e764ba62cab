/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use rookery::{Cli, Config, Engine, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let config = Config::from_env().with_cli(&cli);

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut engine = Engine::new(&config);
    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
