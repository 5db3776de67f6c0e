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

//! Lexical analyzer.
//!
//! The [`Lexer`] converts source code into [`Token`]s. It knows two lexical
//! grammars, selected by [`LexMode`]:
//!
//! - In [`LexMode::Default`], the lexer recognizes words, parameter
//!   expansions, assignment names, redirection operators, control operators
//!   and reserved words.
//! - In [`LexMode::Arithmetic`], the lexer recognizes integers, parameter
//!   references and the operators `+ - * / ( )` of an arithmetic expansion.
//!
//! A default-mode pull that encounters `$((` switches to the arithmetic mode
//! and returns the first token of the arithmetic expression together with
//! `LexMode::Arithmetic`. The parser keeps pulling in that mode until it has
//! parsed the expression and calls [`Lexer::close_arithm`], which consumes the
//! final `)` of the expansion.

mod arith;
mod core;
mod keyword;
mod token;
mod word;

pub use self::core::LexMode;
pub use self::core::Lexer;
pub use self::keyword::Keyword;
pub use self::token::Token;
pub use self::token::TokenKind;

/// Tests whether the character may appear in a variable name.
pub fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Tests whether the string is a valid variable name.
///
/// A name is a non-empty string of ASCII letters, digits and underscores
/// that does not start with a digit.
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => chars.all(is_name_char),
        _ => false,
    }
}

/// Tests whether the character ends a word in the default mode.
pub(crate) fn is_word_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '|' | '&' | ';')
}
