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

//! Common items for implementing built-ins.

use lish_env::Env;
use lish_env::semantics::ExitStatus;
use std::fmt::Display;

/// Prints a string to the standard output.
///
/// If an error occurs while printing, an error message is printed to the
/// standard error and the result is [`ExitStatus::FAILURE`].
pub fn output(env: &mut Env, text: &str) -> ExitStatus {
    match env.print(text) {
        Ok(()) => ExitStatus::SUCCESS,
        Err(errno) => {
            env.print_error(&format!(
                "cannot print to the standard output: {}",
                errno.desc()
            ));
            ExitStatus::FAILURE
        }
    }
}

/// Prints an error message of a built-in to the standard error.
///
/// The message is prefixed with the built-in name. The result is
/// [`ExitStatus::FAILURE`].
pub fn report_failure<E: Display>(env: &mut Env, builtin: &str, error: E) -> ExitStatus {
    env.print_error(&format!("{builtin}: {error}"));
    ExitStatus::FAILURE
}

/// Tests whether the string is a valid variable name.
///
/// A name consists of ASCII letters, digits and underscores and does not
/// start with a digit.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lish_env::VirtualSystem;

    #[test]
    fn output_writes_to_stdout() {
        let system = VirtualSystem::new();
        let mut env = Env::with_system(Box::new(system.clone()));
        assert_eq!(output(&mut env, "text\n"), ExitStatus::SUCCESS);
        assert_eq!(system.stdout_content(), "text\n");
    }

    #[test]
    fn output_to_closed_stdout() {
        let system = VirtualSystem::new();
        system.state.borrow_mut().fds.remove(&lish_env::io::Fd::STDOUT);
        let mut env = Env::with_system(Box::new(system.clone()));
        assert_eq!(output(&mut env, "text\n"), ExitStatus::FAILURE);
        assert_eq!(
            system.stderr_content(),
            "cannot print to the standard output: Bad file number\n"
        );
    }

    #[test]
    fn failure_is_prefixed() {
        let system = VirtualSystem::new();
        let mut env = Env::with_system(Box::new(system.clone()));
        assert_eq!(report_failure(&mut env, "x", "oops"), ExitStatus::FAILURE);
        assert_eq!(system.stderr_content(), "x: oops\n");
    }

    #[test]
    fn names() {
        assert!(is_name("a"));
        assert!(is_name("_foo_1"));
        assert!(!is_name(""));
        assert!(!is_name("1a"));
        assert!(!is_name("a-b"));
        assert!(!is_name("a=b"));
    }
}
