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

//! Definition of errors that happen in the parser.

use thiserror::Error;

/// Types of syntax errors.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A single or double quotation lacks a closing quote.
    #[error("no terminating quote")]
    UnclosedQuote { opening_index: usize },
    /// A `NAME=` is not followed by a value.
    #[error("invalid assignment statement")]
    InvalidAssignment,
    /// A redirection operator is missing its operand.
    #[error("incomplete I/O redirection, expected a filename")]
    MissingRedirTarget,
    /// An arithmetic expansion is malformed or lacks a closing `))`.
    #[error("invalid arithmetic expression")]
    InvalidArithm,
    /// A `|` is not followed by a command.
    #[error("missing command after `|`")]
    MissingPipelineCommand,
    /// An if command is missing the then clause.
    #[error("expected `then`")]
    IfMissingThen,
    /// An if command is not closed.
    #[error("expected `fi`")]
    UnclosedIf,
    /// A while or for loop is missing `do`.
    #[error("expected `do`")]
    MissingDo,
    /// A do clause is not closed.
    #[error("expected `done`")]
    UnclosedDoClause,
    /// The variable name is missing or invalid in a for loop.
    #[error("missing variable name in for loop")]
    MissingForName,
    /// A for loop is missing `in` after the variable name.
    #[error("expected `in`")]
    MissingIn,
    /// A token that cannot appear here.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
}

/// Explanation of a failure in parsing.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{cause}")]
pub struct Error {
    pub cause: SyntaxError,
    /// Byte offset in the source code where the error was found
    pub index: usize,
}

impl Error {
    /// Returns the 1-based line number of the error in the source code.
    pub fn line(&self, code: &str) -> usize {
        let end = self.index.min(code.len());
        code.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }
}
