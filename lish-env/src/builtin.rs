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

//! Type definitions for built-in utilities.
//!
//! This module provides data types for defining built-in utilities.
//!
//! Note that concrete implementations of built-ins are not included in the
//! `lish_env` crate. For implementations of specific built-ins like `cd` and
//! `export`, see the `lish_builtin` crate.

use crate::Env;
use crate::semantics::ExitStatus;
use std::fmt::Debug;

/// Type of functions that implement the behavior of a built-in.
///
/// The function receives the expanded arguments excluding the command name.
pub type Main = fn(&mut Env, Vec<String>) -> ExitStatus;

/// Built-in utility definition.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Function that implements the behavior of the built-in.
    pub execute: Main,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").finish_non_exhaustive()
    }
}
