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

//! Fundamental building blocks for the lexer.

use super::Token;
use super::TokenKind;
use crate::parser::core::Result;

/// Lexical grammar in effect for a token pull
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LexMode {
    /// Words, operators and reserved words
    #[default]
    Default,
    /// Tokens of an arithmetic expansion
    Arithmetic,
}

/// Lexical analyzer.
///
/// A lexer reads a string slice and produces tokens on demand. The lexer
/// itself does not remember which lexical grammar is in effect: the caller
/// passes a [`LexMode`] to every [`token`](Self::token) call and receives the
/// mode that applies to the returned token.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    code: &'a str,
    index: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer that reads the given source code.
    #[must_use]
    pub fn new(code: &'a str) -> Self {
        Lexer { code, index: 0 }
    }

    /// Returns the source code this lexer reads.
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// Returns the byte offset of the next character to be read.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the remaining part of the source code.
    pub(super) fn rest(&self) -> &'a str {
        &self.code[self.index..]
    }

    /// Peeks the next character.
    pub(super) fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peeks the `n`-th character after the next one.
    pub(super) fn peek_char_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Consumes the next character.
    pub(super) fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.index += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it satisfies the predicate.
    pub(super) fn consume_char_if<F>(&mut self, f: F) -> Option<char>
    where
        F: FnOnce(char) -> bool,
    {
        match self.peek_char() {
            Some(c) if f(c) => self.consume_char(),
            _ => None,
        }
    }

    /// Skips spaces and tabs.
    ///
    /// Returns `true` if there is any character left after the blanks.
    pub fn skip_blanks(&mut self) -> bool {
        while self.consume_char_if(|c| c == ' ' || c == '\t').is_some() {}
        self.peek_char().is_some()
    }

    /// Skips a comment if the next character starts one.
    ///
    /// The newline ending the comment is not consumed.
    fn skip_comment(&mut self) {
        if self.consume_char_if(|c| c == '#').is_some() {
            while self.consume_char_if(|c| c != '\n').is_some() {}
        }
    }

    /// Reads the next token.
    ///
    /// In the default mode, this function returns `LexMode::Arithmetic` if
    /// it has passed the `$((` that opens an arithmetic expansion, in which
    /// case the returned token is the first token of the arithmetic
    /// expression. Otherwise, the returned mode is the same as the argument.
    ///
    /// In the arithmetic mode, this function never fails.
    pub fn token(&mut self, mode: LexMode) -> Result<(Token, LexMode)> {
        let result = match mode {
            LexMode::Default => self.default_token(),
            LexMode::Arithmetic => Ok((self.arithm_token(), LexMode::Arithmetic)),
        };
        if let Ok((token, mode)) = &result {
            tracing::trace!(kind = ?token.kind, text = %token.text, ?mode, "token");
        }
        result
    }

    fn default_token(&mut self) -> Result<(Token, LexMode)> {
        self.skip_blanks();
        self.skip_comment();

        let index = self.index;
        let Some(c) = self.peek_char() else {
            return Ok((Token::new(TokenKind::End, "", index), LexMode::Default));
        };

        let operator = match c {
            '\n' => Some(TokenKind::Newline),
            '|' => Some(TokenKind::Pipe),
            '&' => Some(TokenKind::AsyncList),
            ';' => Some(TokenKind::SeqList),
            '<' => Some(TokenKind::InputRedirect),
            '>' => Some(TokenKind::OutputRedirect),
            _ => None,
        };
        if let Some(kind) = operator {
            self.consume_char();
            let text = if kind == TokenKind::Newline {
                "\n".to_string()
            } else {
                c.to_string()
            };
            return Ok((Token::new(kind, text, index), LexMode::Default));
        }

        if self.rest().starts_with("$((") {
            self.index += "$((".len();
            return Ok((self.arithm_token(), LexMode::Arithmetic));
        }

        let token = self.word_token()?;
        Ok((token, LexMode::Default))
    }

    /// Consumes the `)` that closes an arithmetic expansion.
    ///
    /// The parser calls this function after the arithmetic expression and
    /// its closing `)` token have been parsed, to consume the second `)` of
    /// `))`. Returns `false` without consuming anything if the next
    /// character is not `)`.
    pub fn close_arithm(&mut self) -> bool {
        self.consume_char_if(|c| c == ')').is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(code: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(code);
        let mut mode = LexMode::Default;
        let mut result = Vec::new();
        loop {
            let (token, new_mode) = lexer.token(mode).unwrap();
            mode = new_mode;
            if token.kind == TokenKind::End {
                return result;
            }
            if mode == LexMode::Arithmetic && token.kind == TokenKind::RPar && lexer.close_arithm()
            {
                mode = LexMode::Default;
            }
            result.push((token.kind, token.text));
        }
    }

    #[test]
    fn lexer_empty_input() {
        assert_eq!(tokens(""), []);
        assert_eq!(tokens("  \t "), []);
    }

    #[test]
    fn lexer_operators() {
        use TokenKind::*;
        let kinds: Vec<_> = tokens("|&;<>\n").into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            [
                Pipe,
                AsyncList,
                SeqList,
                InputRedirect,
                OutputRedirect,
                Newline
            ]
        );
    }

    #[test]
    fn lexer_comment_is_skipped_up_to_newline() {
        use TokenKind::*;
        assert_eq!(
            tokens("# comment\necho"),
            [(Newline, "\n".to_string()), (Word, "echo".to_string())]
        );
        assert_eq!(tokens("  # only a comment"), []);
    }

    #[test]
    fn lexer_arithmetic_entry_returns_arithmetic_mode() {
        let mut lexer = Lexer::new("$((1))x");
        let (token, mode) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Integer);
        assert_eq!(token.text, "1");
        assert_eq!(mode, LexMode::Arithmetic);

        let (token, mode) = lexer.token(mode).unwrap();
        assert_eq!(token.kind, TokenKind::RPar);
        assert_eq!(mode, LexMode::Arithmetic);
        assert!(lexer.close_arithm());

        let (token, mode) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "x");
        assert_eq!(mode, LexMode::Default);
    }

    #[test]
    fn lexer_close_arithm_without_paren() {
        let mut lexer = Lexer::new(" )");
        assert!(!lexer.close_arithm());
        assert_eq!(lexer.index(), 0);
    }

    #[test]
    fn lexer_token_index() {
        let mut lexer = Lexer::new("ab  cd");
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.index, 0);
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.index, 4);
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::End);
        assert_eq!(token.index, 6);
    }
}
