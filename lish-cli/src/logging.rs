// This file is part of lish, a small POSIX-style shell.
// Copyright (C) 2026 lish contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Diagnostic logging
//!
//! The shell libraries emit [`tracing`] events. The binary collects them with
//! a `tracing-subscriber` formatter writing to the standard error. The
//! `LISH_LOG` environment variable selects the events in the
//! [`EnvFilter`] directive syntax, for example `LISH_LOG=lish_semantics=debug`.
//! Only warnings are shown by default.

use tracing_subscriber::EnvFilter;

/// Name of the environment variable that configures the log filter
pub const LOG_ENV: &str = "LISH_LOG";

/// Default filter directive
pub const DEFAULT_FILTER: &str = "warn";

/// Returns the filter configured by [`LOG_ENV`], or the default one.
#[must_use]
pub fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// Does nothing if a subscriber has already been installed.
pub fn init() {
    let directives = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter() {
        assert_eq!(filter(None).to_string(), "warn");
    }

    #[test]
    fn custom_filter() {
        let filter = filter(Some("lish_semantics=debug"));
        assert_eq!(filter.to_string(), "lish_semantics=debug");
    }

    #[test]
    fn invalid_filter_falls_back_to_default() {
        assert_eq!(filter(Some("lish=loud")).to_string(), "warn");
    }
}
