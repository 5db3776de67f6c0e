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

//! Errors that interrupt command execution

use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use thiserror::Error;

/// Error that stops the execution of a commands list.
///
/// When an error occurs, the remaining commands of the list being executed are
/// skipped and the error propagates up to the [runner](crate::runner), which
/// prints it and sets the exit status to [`exit_status`](Self::exit_status).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// No built-in or external utility matches the command name.
    #[error("{0} - command not found")]
    CommandNotFound(String),

    /// A redirection target file could not be opened.
    #[error("can't execute I/O redirection: {path}: {}", .errno.desc())]
    Redirection { path: String, errno: Errno },

    /// `fork` failed.
    #[error("can't create a child process: {}", .0.desc())]
    Fork(Errno),

    /// `pipe` failed.
    #[error("can't create a pipe: {}", .0.desc())]
    Pipe(Errno),

    /// A string that must be passed to the system contains a nul byte.
    #[error("nul byte found in `{0}`")]
    NulByte(String),

    /// The value of a parameter in an arithmetic expansion is not an integer.
    #[error("invalid parameter expansion inside arithmetic expansion")]
    InvalidArithmParameter { name: String, value: String },

    /// The divisor of a division is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An arithmetic result does not fit in a 64-bit signed integer.
    #[error("arithmetic overflow")]
    Overflow,
}

impl Error {
    /// Returns the exit status that results from the error.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        use Error::*;
        match self {
            CommandNotFound(_) => ExitStatus::NOT_FOUND,
            Fork(_) | Pipe(_) => ExitStatus::ERROR,
            Redirection { .. }
            | NulByte(_)
            | InvalidArithmParameter { .. }
            | DivisionByZero
            | Overflow => ExitStatus::FAILURE,
        }
    }
}

/// Result of command execution
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let error = Error::CommandNotFound("foo".to_string());
        assert_eq!(error.to_string(), "foo - command not found");

        let error = Error::Redirection {
            path: "/no/file".to_string(),
            errno: Errno::ENOENT,
        };
        assert_eq!(
            error.to_string(),
            "can't execute I/O redirection: /no/file: No such file or directory"
        );

        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn exit_statuses() {
        let error = Error::CommandNotFound("foo".to_string());
        assert_eq!(error.exit_status(), ExitStatus(127));
        assert_eq!(Error::Fork(Errno::EAGAIN).exit_status(), ExitStatus(2));
        assert_eq!(Error::Overflow.exit_status(), ExitStatus(1));
    }
}
