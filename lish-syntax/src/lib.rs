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

//! Shell language syntax and parser for lish.
//!
//! This crate defines the abstract syntax tree (AST) of the shell language in
//! the [`syntax`] module and a hand-written recursive-descent [`parser`] that
//! builds it from source code.
//!
//! The lexer has two lexical grammars: the default one for ordinary words and
//! operators, and an arithmetic one used inside `$((...))`. Switching between
//! them is made explicit by the [`LexMode`](parser::lex::LexMode) value that
//! each token pull takes and returns, so the parser always knows which grammar
//! produced its lookahead token.
//!
//! The easiest way to parse a string is through the [`FromStr`] implementation
//! of [`CommandsList`](syntax::CommandsList):
//!
//! ```
//! # use lish_syntax::syntax::CommandsList;
//! let list: CommandsList = "a=$((1+2)) echo $a | cat".parse().unwrap();
//! assert_eq!(list.to_string(), "a=$((1 + 2)) echo $a | cat");
//! ```
//!
//! [`FromStr`]: std::str::FromStr

pub mod parser;
pub mod syntax;
