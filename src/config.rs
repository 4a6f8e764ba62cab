/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Cli, Rules};

/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "rookery=info";

/// Environment variable toggling [`Rules::capture_revokes_castling`].
pub const CAPTURE_REVOKES_CASTLING_VAR: &str = "ROOKERY_CAPTURE_REVOKES_CASTLING";

/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "ROOKERY_LOG";

/// Settings for a `rookery` session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rule variations the game is played under.
    pub rules: Rules,

    /// A `tracing` filter directive, such as `rookery=debug`.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable lookup, falling back to defaults for missing or unparseable values.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let capture_revokes_castling = var(CAPTURE_REVOKES_CASTLING_VAR)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.rules.capture_revokes_castling);

        let log_filter = var(LOG_VAR)
            .or_else(|| var("RUST_LOG"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            rules: Rules {
                capture_revokes_castling,
            },
            log_filter,
        }
    }

    /// Applies the process arguments on top of this configuration.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.keep_rights_on_rook_capture {
            self.rules.capture_revokes_castling = false;
        }

        if let Some(filter) = &cli.log {
            self.log_filter = filter.clone();
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }
}

/// Parses `true`/`false`/`1`/`0`/`yes`/`no`, ignoring case.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.capture_revokes_castling);
        assert_eq!(config.log_filter, "rookery=info");
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(Config::from_vars(vars(&[])), Config::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_vars(vars(&[
            ("ROOKERY_CAPTURE_REVOKES_CASTLING", "0"),
            ("ROOKERY_LOG", "rookery=trace"),
            ("RUST_LOG", "warn"),
        ]));
        assert!(!config.rules.capture_revokes_castling);
        assert_eq!(config.log_filter, "rookery=trace");

        let config = Config::from_vars(vars(&[("RUST_LOG", "warn")]));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_bad_flag_falls_back() {
        let config = Config::from_vars(vars(&[("ROOKERY_CAPTURE_REVOKES_CASTLING", "maybe")]));
        assert!(config.rules.capture_revokes_castling);
    }

    #[test]
    fn test_cli_wins_over_environment() {
        let cli = Cli {
            log: Some(String::from("debug")),
            keep_rights_on_rook_capture: true,
        };
        let config = Config::from_vars(vars(&[("ROOKERY_LOG", "error")])).with_cli(&cli);
        assert_eq!(config.log_filter, "debug");
        assert!(!config.rules.capture_revokes_castling);
    }
}
