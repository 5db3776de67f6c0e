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

//! Part of the lexer that parses arithmetic expressions

use super::Lexer;
use super::Token;
use super::TokenKind;
use super::is_name_char;

impl Lexer<'_> {
    /// Reads a token of an arithmetic expression.
    ///
    /// Returns a token of kind `End` without consuming anything if the next
    /// character cannot start an arithmetic token.
    pub(super) fn arithm_token(&mut self) -> Token {
        self.skip_blanks();
        let index = self.index();
        let Some(c) = self.peek_char() else {
            return Token::new(TokenKind::End, "", index);
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '(' => TokenKind::LPar,
            ')' => TokenKind::RPar,
            '$' => return self.arithm_parameter(),
            c if c.is_ascii_digit() => return self.arithm_integer(),
            _ => return Token::new(TokenKind::End, "", index),
        };
        self.consume_char();
        Token::new(kind, c.to_string(), index)
    }

    /// Reads a `$name` parameter reference.
    fn arithm_parameter(&mut self) -> Token {
        let index = self.index();
        if !matches!(self.peek_char_at(1), Some(c) if is_name_char(c)) {
            return Token::new(TokenKind::End, "", index);
        }
        self.consume_char();
        let mut name = String::new();
        while let Some(c) = self.consume_char_if(is_name_char) {
            name.push(c);
        }
        Token::new(TokenKind::ParameterExpansion, name, index)
    }

    /// Reads a decimal integer literal.
    fn arithm_integer(&mut self) -> Token {
        let index = self.index();
        let mut digits = String::new();
        while let Some(c) = self.consume_char_if(|c| c.is_ascii_digit()) {
            digits.push(c);
        }
        Token::new(TokenKind::Integer, digits, index)
    }
}
