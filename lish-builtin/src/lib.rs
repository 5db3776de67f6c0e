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

//! Implementation of the shell built-in utilities.
//!
//! Each built-in utility is implemented in the submodule named after the
//! utility. The submodule contains the `main` function that implements the
//! built-in utility. The module documentation for each submodule describes
//! what the utility does.
//!
//! The [`common`] module provides common functions that are used for
//! implementing built-in utilities.
//!
//! To make the built-ins available in the shell, insert the items of
//! [`BUILTINS`] into [`Env::builtins`](lish_env::Env::builtins).

pub mod cd;
pub mod common;
pub mod export;
pub mod help;
pub mod unset;

#[doc(no_inline)]
pub use lish_env::builtin::*;

/// Array of all the implemented built-in utilities.
///
/// The array items are ordered alphabetically.
pub const BUILTINS: &[(&str, Builtin)] = &[
    ("cd", Builtin { execute: cd::main }),
    ("export", Builtin { execute: export::main }),
    ("help", Builtin { execute: help::main }),
    ("unset", Builtin { execute: unset::main }),
];
