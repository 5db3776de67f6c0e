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

//! Syntax parser for the shell language
//!
//! The [`Parser`] reads tokens from a [`Lexer`](lex::Lexer) and builds the
//! AST defined in the [`syntax`](crate::syntax) module. It is a recursive
//! descent parser with one token of lookahead; each grammar production is a
//! method of `Parser` defined in the submodule of the same name.
//!
//! The grammar is:
//!
//! ```text
//! program        := compound_list END
//! compound_list  := [newline_list] term [newline_list]
//! term           := (cc_list | list)+
//! list           := [newline_list] pipeline_list
//! pipeline_list  := pipeline (separator pipeline)* [separator]
//! separator      := ('&' | ';') [newline_list] | newline_list
//! pipeline       := simple_command ('|' [newline_list] simple_command)*
//! simple_command := cmd_prefix? cmd_name? cmd_suffix?
//! cmd_prefix     := (NAME '=' (WORD | PARAMETER_EXPANSION | arithm_expr))+
//! cmd_suffix     := (io_redirect | WORD | PARAMETER_EXPANSION | arithm_expr)*
//! io_redirect    := ('<' | '>') (WORD | PARAMETER_EXPANSION)
//! cc_list        := [newline_list] compound_command (separator compound_command)*
//! compound_command := if_clause | while_clause | for_clause
//! if_clause      := IF compound_list THEN compound_list [ELSE compound_list] FI
//! while_clause   := WHILE compound_list DO compound_list DONE
//! for_clause     := FOR NAME [newline_list] IN argument* [separator] DO compound_list DONE
//! arithm_expr    := arithm_term (('+' | '-') arithm_term)*
//! arithm_term    := arithm_factor (('*' | '/') arithm_factor)*
//! arithm_factor  := INTEGER | PARAMETER_EXPANSION | '(' arithm_expr ')'
//!                 | ('+' | '-') arithm_factor
//! ```
//!
//! Parsing stops at the first error, which is returned as the `Err` variant
//! of [`Result`]. Partially built nodes are dropped on the way out.
//!
//! ```
//! # use lish_syntax::parser::{lex::Lexer, Parser};
//! let mut lexer = Lexer::new("echo hello; echo world &");
//! let mut parser = Parser::new(&mut lexer);
//! let list = parser.parse().unwrap().unwrap();
//! assert_eq!(list.to_string(), "echo hello; echo world &");
//! ```

mod arith;
mod compound_command;
mod core;
mod error;
mod list;
mod pipeline;
mod simple_command;

pub mod lex;

pub use self::core::Parser;
pub use self::core::Result;
pub use self::error::Error;
pub use self::error::SyntaxError;
