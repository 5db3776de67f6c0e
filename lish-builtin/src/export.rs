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

//! Export built-in
//!
//! The **`export`** built-in exports shell variables to the environment.
//!
//! # Synopsis
//!
//! ```sh
//! export [name [value]]
//! ```
//!
//! # Description
//!
//! With no operands, the built-in prints all exported variables, one per
//! line, in the form `export NAME='VALUE'`, sorted by name. The output can be
//! reused as input to restore the variables.
//!
//! With a *name* operand, the variable is exported. If it does not exist, it
//! is created with an empty value. With a *value* operand too, the value is
//! assigned to the variable before exporting it.
//!
//! # Errors
//!
//! It is an error if more than two operands are given or if the name is not
//! a valid variable name.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::is_name;
use crate::common::output;
use crate::common::report_failure;
use itertools::Itertools as _;
use lish_env::Env;
use lish_env::semantics::ExitStatus;

/// Quotes a string in single quotes so that the shell reads it back as is.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Prints all exported variables.
fn print_exported(env: &mut Env) -> ExitStatus {
    let text = env
        .variables
        .exported()
        .into_iter()
        .sorted_by_key(|(name, _)| *name)
        .map(|(name, variable)| format!("export {name}={}\n", quote(&variable.value)))
        .collect::<String>();
    output(env, &text)
}

/// Entry point for executing the `export` built-in
pub fn main(env: &mut Env, args: Vec<String>) -> ExitStatus {
    let mut args = args.into_iter();
    let Some(name) = args.next() else {
        return print_exported(env);
    };
    let value = args.next();
    if args.next().is_some() {
        return report_failure(env, "export", "too many arguments");
    }
    if !is_name(&name) {
        return report_failure(env, "export", format_args!("'{name}': not a valid identifier"));
    }

    tracing::debug!(%name, ?value, "export");
    if let Some(value) = value {
        env.variables.set(name.as_str(), value);
    }
    env.variables.export(name);
    ExitStatus::SUCCESS
}
