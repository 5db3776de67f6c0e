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

//! Fundamentals for implementing the parser.

use super::error::Error;
use super::error::SyntaxError;
use super::lex::LexMode;
use super::lex::Lexer;
use super::lex::Token;
use super::lex::TokenKind;
use crate::syntax::CommandsList;
use std::str::FromStr;

/// Entire result of parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// The shell syntax parser.
///
/// A parser manages a set of data used in syntax parsing. It keeps a
/// reference to a [lexer](Lexer) that provides tokens to parse, the
/// lookahead token, and the [`LexMode`] in which the lookahead token was
/// read.
#[derive(Debug)]
#[must_use = "Parser must be used to parse syntax"]
pub struct Parser<'a, 'b> {
    /// Lexer that provides tokens.
    lexer: &'a mut Lexer<'b>,

    /// Token to parse next.
    ///
    /// This value is an option of a result. It is `None` when the next token
    /// is not yet parsed by the lexer. It is `Some(Err(_))` if the lexer has
    /// failed.
    token: Option<Result<Token>>,

    /// Lexical grammar in effect for the next token.
    ///
    /// When `token` is `Some`, this is the mode in which it was read.
    mode: LexMode,
}

impl<'a, 'b> Parser<'a, 'b> {
    /// Creates a new parser that reads tokens from the lexer.
    pub fn new(lexer: &'a mut Lexer<'b>) -> Parser<'a, 'b> {
        Parser {
            lexer,
            token: None,
            mode: LexMode::Default,
        }
    }

    /// Returns the lexical grammar in effect for the next token.
    ///
    /// The result is [`LexMode::Arithmetic`] if the lookahead token belongs
    /// to an arithmetic expansion. Calling this function reads the
    /// lookahead token if not yet read, as the mode may switch while reading
    /// it.
    pub fn mode(&mut self) -> Result<LexMode> {
        self.peek_token()?;
        Ok(self.mode)
    }

    /// Reads the next token from the lexer.
    fn read_token(&mut self) -> Result<Token> {
        let (token, mode) = self.lexer.token(self.mode)?;
        self.mode = mode;
        Ok(token)
    }

    /// Returns a reference to the current token.
    ///
    /// If the current token is not yet read from the underlying lexer, it is
    /// read first.
    pub fn peek_token(&mut self) -> Result<&Token> {
        let token = match self.token.take() {
            Some(token) => token,
            None => self.read_token(),
        };
        self.token.insert(token).as_ref().map_err(Clone::clone)
    }

    /// Returns the kind of the current token.
    pub fn peek_kind(&mut self) -> Result<TokenKind> {
        self.peek_token().map(|token| token.kind)
    }

    /// Consumes the current token.
    pub fn take_token(&mut self) -> Result<Token> {
        match self.token.take() {
            Some(token) => token,
            None => self.read_token(),
        }
    }

    /// Consumes the current token if it is of the expected kind.
    ///
    /// Returns `Ok(true)` if the token was consumed.
    pub fn eat(&mut self, expected: TokenKind) -> Result<bool> {
        if self.peek_kind()? == expected {
            self.take_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the `)` that closes an arithmetic expansion and switches back
    /// to the default lexical grammar.
    ///
    /// The current token must be the `)` token of the arithmetic grammar,
    /// which is the first `)` of `))`. This function consumes it and then the
    /// second `)` from the raw source.
    pub(super) fn close_arithm(&mut self) -> Result<()> {
        let token = self.peek_token()?;
        let index = token.index;
        if token.kind != TokenKind::RPar {
            let cause = SyntaxError::InvalidArithm;
            return Err(Error { cause, index });
        }
        self.take_token()?;
        if !self.lexer.close_arithm() {
            let cause = SyntaxError::InvalidArithm;
            let index = self.lexer.index();
            return Err(Error { cause, index });
        }
        self.mode = LexMode::Default;
        Ok(())
    }

    /// Skips newline tokens.
    pub fn newline_list(&mut self) -> Result<()> {
        while self.eat(TokenKind::Newline)? {}
        Ok(())
    }

    /// Returns an error of the given cause located at the current token.
    ///
    /// If the lexer fails to read the current token, its error is returned
    /// instead.
    pub(super) fn error_at_current(&mut self, cause: SyntaxError) -> Error {
        match self.peek_token() {
            Ok(token) => Error {
                cause,
                index: token.index,
            },
            Err(error) => error,
        }
    }

    /// Returns an error that reports the current token as unexpected.
    pub(super) fn unexpected_token(&mut self) -> Error {
        let cause = match self.peek_token() {
            Ok(token) => SyntaxError::UnexpectedToken(token.to_string()),
            Err(error) => return error,
        };
        self.error_at_current(cause)
    }

    /// Parses a whole program.
    ///
    /// Returns `Ok(None)` if the input is empty. If the input contains a
    /// complete list followed by a token that cannot continue the list, the
    /// result is an [`UnexpectedToken`](SyntaxError::UnexpectedToken) error.
    pub fn parse(&mut self) -> Result<Option<CommandsList>> {
        if self.peek_kind()? == TokenKind::End {
            return Ok(None);
        }

        let list = self.compound_list()?;

        let kind = self.peek_kind()?;
        if self.mode == LexMode::Default && kind == TokenKind::End {
            tracing::debug!(items = list.0.len(), "parsed commands list");
            Ok(Some(list))
        } else {
            Err(self.unexpected_token())
        }
    }
}

/// Parses a string into a commands list.
///
/// An empty input results in an empty list.
impl FromStr for CommandsList {
    type Err = Error;
    fn from_str(s: &str) -> Result<CommandsList> {
        let mut lexer = Lexer::new(s);
        let mut parser = Parser::new(&mut lexer);
        parser.parse().map(Option::unwrap_or_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parser_peek_and_take() {
        let mut lexer = Lexer::new("a b");
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.peek_token().unwrap().text, "a");
        assert_eq!(parser.peek_token().unwrap().text, "a");
        assert_eq!(parser.take_token().unwrap().text, "a");
        assert_eq!(parser.take_token().unwrap().text, "b");
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::End);
    }

    #[test]
    fn parser_eat() {
        let mut lexer = Lexer::new(";|");
        let mut parser = Parser::new(&mut lexer);
        assert!(!parser.eat(TokenKind::Pipe).unwrap());
        assert!(parser.eat(TokenKind::SeqList).unwrap());
        assert!(parser.eat(TokenKind::Pipe).unwrap());
    }

    #[test]
    fn parser_mode_follows_lexer() {
        let mut lexer = Lexer::new("$((1))");
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.mode().unwrap(), LexMode::Arithmetic);
        assert!(parser.eat(TokenKind::Integer).unwrap());
        parser.close_arithm().unwrap();
        assert_eq!(parser.mode().unwrap(), LexMode::Default);
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::End);
    }

    #[test]
    fn parser_lexer_error_is_sticky() {
        let mut lexer = Lexer::new("'abc");
        let mut parser = Parser::new(&mut lexer);
        let e = parser.peek_token().unwrap_err();
        assert_matches!(e.cause, SyntaxError::UnclosedQuote { .. });
        let e2 = parser.take_token().unwrap_err();
        assert_eq!(e, e2);
    }

    #[test]
    fn parser_empty_input() {
        let mut lexer = Lexer::new("");
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.parse(), Ok(None));

        let mut lexer = Lexer::new("   \t ");
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.parse(), Ok(None));
    }

    #[test]
    fn parser_newlines_only() {
        let list: CommandsList = "\n\n  \n".parse().unwrap();
        assert_eq!(list.0, []);
    }

    #[test]
    fn parser_unexpected_trailing_token() {
        let e = "echo a; fi".parse::<CommandsList>().unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnexpectedToken("fi".to_string()));
        assert_eq!(e.index, 8);

        let e = "&".parse::<CommandsList>().unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnexpectedToken("&".to_string()));
    }
}
