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

//! Semantics of the shell language.
//!
//! This crate defines the semantics for the shell language. The core of the
//! semantics is command execution and word expansion. A command can be
//! executed by calling [`Command::execute`](command::Command::execute). A
//! word can be expanded by using functions defined in [`expansion`].
//!
//! Execution is synchronous. Child processes are started with `fork` and
//! waited for by polling `waitpid`; the [`job`] module keeps the job list up
//! to date.
//!
//! The [`runner`] module reads, parses, and executes commands from source
//! code. It is a utility for running a shell script or an interactive
//! session.

pub mod arith;
pub mod assign;
pub mod command;
pub mod command_search;
pub mod error;
pub mod expansion;
pub mod job;
pub mod redir;
pub mod runner;

pub use self::error::Error;
pub use self::error::Result;
pub use self::runner::read_eval_loop;
pub use self::runner::run;
