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

//! Part of the lexer that parses words

use super::Keyword;
use super::Lexer;
use super::Token;
use super::TokenKind;
use super::is_name;
use super::is_name_char;
use super::is_word_delimiter;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;

/// Intermediate state of a word being read
#[derive(Debug, Default)]
struct WordBuilder {
    /// Literal text read since the last parameter
    literal: String,
    /// Completed segments
    segments: Vec<Token>,
    /// Whether the word contained any quotes
    quoted: bool,
    /// Index where the current literal segment started
    literal_index: usize,
}

impl WordBuilder {
    fn is_empty(&self) -> bool {
        self.literal.is_empty() && self.segments.is_empty() && !self.quoted
    }

    fn push_char(&mut self, c: char, index: usize) {
        if self.literal.is_empty() {
            self.literal_index = index;
        }
        self.literal.push(c);
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.segments
                .push(Token::new(TokenKind::Word, text, self.literal_index));
        }
    }
}

/// Tests whether the character ends a parameter name in a word.
fn starts_parameter(c: Option<char>) -> bool {
    matches!(c, Some(c) if is_name_char(c) || c == '?' || c == '$')
}

impl Lexer<'_> {
    /// Reads a parameter name after `$`.
    ///
    /// The `$` must have been consumed. The special parameters `$?` and `$$`
    /// consist of a single character.
    fn parameter_name(&mut self) -> String {
        if let Some(c) = self.consume_char_if(|c| c == '?' || c == '$') {
            return c.to_string();
        }
        let mut name = String::new();
        while let Some(c) = self.consume_char_if(is_name_char) {
            name.push(c);
        }
        name
    }

    /// Reads a quoted string up to the closing quote.
    ///
    /// The opening quote must have been consumed. The content is appended to
    /// the builder with all characters taken literally.
    fn quoted(&mut self, quote: char, opening_index: usize, word: &mut WordBuilder) -> Result<()> {
        word.quoted = true;
        loop {
            let index = self.index();
            match self.consume_char() {
                Some(c) if c == quote => return Ok(()),
                Some(c) => word.push_char(c, index),
                None => {
                    let cause = SyntaxError::UnclosedQuote { opening_index };
                    return Err(Error {
                        cause,
                        index: opening_index,
                    });
                }
            }
        }
    }

    /// Tests whether the `=` at the current position ends an assignment name.
    fn is_assignment_equal(&self, word: &WordBuilder) -> bool {
        !word.quoted
            && word.segments.is_empty()
            && is_name(&word.literal)
            && matches!(self.peek_char_at(1), Some(c) if c != ' ' && c != '\t' && c != '\n')
    }

    /// Reads a word token.
    ///
    /// The result is a `Word`, `Name`, `ParameterExpansion` or reserved word
    /// token. The next character must not be a blank or an operator.
    pub(super) fn word_token(&mut self) -> Result<Token> {
        let start = self.index();
        let mut word = WordBuilder::default();

        loop {
            let index = self.index();
            let Some(c) = self.peek_char() else { break };
            match c {
                c if is_word_delimiter(c) => break,

                '<' | '>' if !word.is_empty() => break,

                '\'' | '"' => {
                    self.consume_char();
                    self.quoted(c, index, &mut word)?;
                }

                '=' if self.is_assignment_equal(&word) => {
                    self.consume_char();
                    return Ok(Token::new(TokenKind::Name, word.literal, start));
                }

                '$' if self.rest().starts_with("$((") => {
                    // An arithmetic expansion always starts a new token.
                    break;
                }

                '$' if starts_parameter(self.peek_char_at(1)) => {
                    self.consume_char();
                    word.flush_literal();
                    let name = self.parameter_name();
                    let segment = Token::new(TokenKind::ParameterExpansion, name, index);
                    word.segments.push(segment);
                }

                _ => {
                    self.consume_char();
                    word.push_char(c, index);
                }
            }
        }

        if word.segments.is_empty() {
            let kind = match Keyword::try_from(word.literal.as_str()) {
                Ok(keyword) if !word.quoted => keyword.into(),
                _ => TokenKind::Word,
            };
            return Ok(Token::new(kind, word.literal, start));
        }

        word.flush_literal();
        if word.segments.len() == 1 && !word.quoted {
            if let Some(segment) = word.segments.pop() {
                return Ok(segment);
            }
        }

        let text = self.code()[start..self.index()].to_string();
        Ok(Token {
            kind: TokenKind::Word,
            text,
            nested: word.segments,
            index: start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::LexMode;
    use super::*;
    use assert_matches::assert_matches;

    fn first_token(code: &str) -> Token {
        Lexer::new(code).token(LexMode::Default).unwrap().0
    }

    #[test]
    fn lexer_plain_word() {
        let token = first_token("echo foo");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "echo");
        assert_eq!(token.nested, []);
    }

    #[test]
    fn lexer_word_ends_at_operators() {
        for code in ["abc|x", "abc&x", "abc;x", "abc\nx", "abc x", "abc\tx"] {
            let mut lexer = Lexer::new(code);
            let (token, _) = lexer.token(LexMode::Default).unwrap();
            assert_eq!(token.text, "abc", "{code:?}");
            assert_eq!(lexer.index(), 3, "{code:?}");
        }
    }

    #[test]
    fn lexer_redirect_ends_word() {
        let mut lexer = Lexer::new("abc>out");
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "abc");
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::OutputRedirect);
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.text, "out");
    }

    #[test]
    fn lexer_quotes_suppress_special_characters() {
        let token = first_token("'a <b> | c=$d;&'");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "a <b> | c=$d;&");

        let token = first_token(r#""x y"z'w'"#);
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "x yzw");
    }

    #[test]
    fn lexer_empty_quotes() {
        let token = first_token("''");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "");
    }

    #[test]
    fn lexer_unclosed_quote() {
        let e = Lexer::new("echo 'abc").token(LexMode::Default).unwrap();
        assert_eq!(e.0.text, "echo");

        let mut lexer = Lexer::new("echo 'abc");
        lexer.token(LexMode::Default).unwrap();
        let e = lexer.token(LexMode::Default).unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnclosedQuote { opening_index: 5 });
        assert_eq!(e.index, 5);

        let e = Lexer::new("\"").token(LexMode::Default).unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnclosedQuote { opening_index: 0 });
    }

    #[test]
    fn lexer_assignment_name() {
        let mut lexer = Lexer::new("var=value");
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Name);
        assert_eq!(token.text, "var");
        let (token, _) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "value");
    }

    #[test]
    fn lexer_equal_not_making_name() {
        // followed by a delimiter
        let token = first_token("var= x");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "var=");

        // quoted
        let token = first_token("'var'=x");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "var=x");

        // empty name
        let token = first_token("=x");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "=x");

        // not a valid name
        let token = first_token("a/b=x");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "a/b=x");
    }

    #[test]
    fn lexer_parameter_expansion() {
        let token = first_token("$HOME");
        assert_eq!(token.kind, TokenKind::ParameterExpansion);
        assert_eq!(token.text, "HOME");

        let token = first_token("$?");
        assert_eq!(token.kind, TokenKind::ParameterExpansion);
        assert_eq!(token.text, "?");
    }

    #[test]
    fn lexer_lone_dollar_is_literal() {
        let token = first_token("$ x");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "$");
    }

    #[test]
    fn lexer_quoted_dollar_is_literal() {
        let token = first_token("'$x'");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "$x");
    }

    #[test]
    fn lexer_composite_word() {
        let token = first_token("pre$x/post");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.text, "pre$x/post");
        assert_matches!(token.nested.as_slice(), [a, b, c] => {
            assert_eq!((a.kind, a.text.as_str()), (TokenKind::Word, "pre"));
            assert_eq!((b.kind, b.text.as_str()), (TokenKind::ParameterExpansion, "x"));
            assert_eq!((c.kind, c.text.as_str()), (TokenKind::Word, "/post"));
        });
    }

    #[test]
    fn lexer_arithmetic_ends_word() {
        let mut lexer = Lexer::new("ab$((1))");
        let (token, mode) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.text, "ab");
        assert_eq!(mode, LexMode::Default);
        let (token, mode) = lexer.token(LexMode::Default).unwrap();
        assert_eq!(token.kind, TokenKind::Integer);
        assert_eq!(mode, LexMode::Arithmetic);
    }

    #[test]
    fn lexer_reserved_words() {
        assert_eq!(first_token("if").kind, TokenKind::If);
        assert_eq!(first_token("then").kind, TokenKind::Then);
        assert_eq!(first_token("else").kind, TokenKind::Else);
        assert_eq!(first_token("fi").kind, TokenKind::Fi);
        assert_eq!(first_token("for").kind, TokenKind::For);
        assert_eq!(first_token("in").kind, TokenKind::In);
        assert_eq!(first_token("while").kind, TokenKind::While);
        assert_eq!(first_token("do").kind, TokenKind::Do);
        assert_eq!(first_token("done").kind, TokenKind::Done);

        assert_eq!(first_token("'if'").kind, TokenKind::Word);
        assert_eq!(first_token("iff").kind, TokenKind::Word);
        assert_eq!(first_token("fi;").kind, TokenKind::Fi);
    }
}
