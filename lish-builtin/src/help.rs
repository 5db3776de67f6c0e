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

//! Help built-in
//!
//! The **`help`** built-in prints usage of the built-ins.
//!
//! # Synopsis
//!
//! ```sh
//! help [builtin_name]
//! ```
//!
//! Without an operand, the built-in lists the built-ins. With an operand,
//! it prints the usage of the named built-in.

use crate::common::output;
use crate::common::report_failure;
use lish_env::Env;
use lish_env::semantics::ExitStatus;

/// Text printed when no operand is given
pub const SUMMARY: &str = "Shell commands defined internally:\n\
help [builtin_name]\n\
cd: cd [-L |-P] [directory]\n\
export [name] [value]\n\
unset [name]\n";

/// Returns the usage text of the built-in.
#[must_use]
pub fn topic(name: &str) -> Option<&'static str> {
    match name {
        "cd" => Some("cd: cd [-L |-P] [directory]\nChanges current directory\n"),
        "export" => Some(
            "export: export [name] [value]\n\
             Creates [name] environment variable for current shell session\n",
        ),
        "unset" => Some(
            "unset: unset [name]\n\
             Removes [name] environment variable for current shell session\n",
        ),
        "help" => Some(
            "help: help [builtin_name]\n\
             Prints info about [builtin_name] builtin command\n",
        ),
        _ => None,
    }
}

/// Entry point for executing the `help` built-in
pub fn main(env: &mut Env, args: Vec<String>) -> ExitStatus {
    match args.as_slice() {
        [] => output(env, SUMMARY),
        [name] => match topic(name) {
            Some(text) => output(env, text),
            None => report_failure(env, "help", format_args!("no help topics match '{name}'")),
        },
        _ => report_failure(env, "help", "too many arguments"),
    }
}
