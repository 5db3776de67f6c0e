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

//! Unset built-in
//!
//! The **`unset`** built-in removes a shell variable.
//!
//! # Synopsis
//!
//! ```sh
//! unset name
//! ```
//!
//! # Errors
//!
//! It is an error if the number of operands is not one or if the variable
//! does not exist.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::report_failure;
use lish_env::Env;
use lish_env::semantics::ExitStatus;

/// Entry point for executing the `unset` built-in
pub fn main(env: &mut Env, args: Vec<String>) -> ExitStatus {
    let name = match args.as_slice() {
        [] => return report_failure(env, "unset", "no arguments"),
        [name] => name,
        _ => return report_failure(env, "unset", "too many arguments"),
    };
    match env.variables.unset(name) {
        Some(_) => ExitStatus::SUCCESS,
        None => report_failure(env, "unset", format_args!("'{name}': not a valid identifier")),
    }
}
