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

//! Word expansion
//!
//! The word expansion converts a [`Word`] into a string by replacing each
//! parameter unit with the value of the parameter. An unset parameter expands
//! to an empty string. The special parameters `?` and `$` expand to the exit
//! status of the last command and the process ID of the main shell process,
//! respectively.
//!
//! An [`Argument`] is expanded either as a word or by [evaluating its
//! arithmetic expression](crate::arith::eval_arithm).
//!
//! Field splitting, pathname expansion and tilde expansion are not
//! performed: a word always expands to exactly one field.

use crate::arith::eval_arithm;
use crate::error::Result;
use lish_env::Env;
use lish_syntax::syntax::Argument;
use lish_syntax::syntax::Word;
use lish_syntax::syntax::WordUnit;
use std::borrow::Cow;

/// Returns the value of the parameter.
///
/// Returns `None` if the parameter is a variable that is not set.
pub fn param_value<'a>(env: &'a Env, name: &str) -> Option<Cow<'a, str>> {
    match name {
        "?" => Some(Cow::Owned(env.exit_status.to_string())),
        "$" => Some(Cow::Owned(env.main_pid.to_string())),
        _ => env.variables.value(name).map(Cow::Borrowed),
    }
}

/// Expands a word into a string.
#[must_use]
pub fn expand_word(env: &Env, word: &Word) -> String {
    let mut result = String::new();
    for unit in &word.units {
        match unit {
            WordUnit::Literal(s) => result.push_str(s),
            WordUnit::Parameter(name) => {
                if let Some(value) = param_value(env, name) {
                    result.push_str(&value);
                }
            }
        }
    }
    result
}

/// Expands an argument into a string.
pub fn expand_argument(env: &Env, argument: &Argument) -> Result<String> {
    match argument {
        Argument::Word(word) => Ok(expand_word(env, word)),
        Argument::Arithm(expr) => eval_arithm(env, expr).map(|value| value.to_string()),
    }
}

/// Expands arguments into strings.
///
/// The arguments are expanded in order. If any expansion fails, the error is
/// returned and the remaining arguments are not expanded.
pub fn expand_arguments<'a, I>(env: &Env, arguments: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a Argument>,
{
    arguments
        .into_iter()
        .map(|argument| expand_argument(env, argument))
        .collect()
}
