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

//! Token types

use super::Keyword;
use std::fmt;

/// Kind of a [`Token`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// Newline
    Newline,
    /// Ordinary word
    Word,
    /// Name of an assignment, that is, a word immediately followed by `=`
    Name,
    /// `$name`
    ParameterExpansion,
    /// `<`
    InputRedirect,
    /// `>`
    OutputRedirect,
    /// `|`
    Pipe,
    /// `&`
    AsyncList,
    /// `;`
    SeqList,
    If,
    Else,
    Fi,
    Then,
    For,
    While,
    Do,
    Done,
    In,
    /// Decimal integer literal in an arithmetic expression
    Integer,
    /// `+` in an arithmetic expression
    Plus,
    /// `-` in an arithmetic expression
    Minus,
    /// `*` in an arithmetic expression
    Multiply,
    /// `/` in an arithmetic expression
    Divide,
    /// `(` in an arithmetic expression
    LPar,
    /// `)` in an arithmetic expression
    RPar,
    /// End of input, or a character the arithmetic lexer does not accept
    End,
}

impl TokenKind {
    /// Returns the reserved word this kind represents, if any.
    pub fn keyword(self) -> Option<Keyword> {
        use TokenKind::*;
        match self {
            If => Some(Keyword::If),
            Else => Some(Keyword::Else),
            Fi => Some(Keyword::Fi),
            Then => Some(Keyword::Then),
            For => Some(Keyword::For),
            While => Some(Keyword::While),
            Do => Some(Keyword::Do),
            Done => Some(Keyword::Done),
            In => Some(Keyword::In),
            _ => None,
        }
    }

    /// Tests whether a token of this kind can be used as a word operand.
    ///
    /// Reserved words are only special at the start of a command, so they are
    /// accepted as plain words wherever an argument or a redirection target
    /// is expected.
    pub fn is_word_like(self) -> bool {
        matches!(self, TokenKind::Word | TokenKind::ParameterExpansion) || self.keyword().is_some()
    }
}

impl From<Keyword> for TokenKind {
    fn from(keyword: Keyword) -> Self {
        use Keyword::*;
        match keyword {
            If => TokenKind::If,
            Else => TokenKind::Else,
            Fi => TokenKind::Fi,
            Then => TokenKind::Then,
            For => TokenKind::For,
            While => TokenKind::While,
            Do => TokenKind::Do,
            Done => TokenKind::Done,
            In => TokenKind::In,
        }
    }
}

/// Result of lexical analysis
///
/// For most kinds, `text` is the literal value of the token with quotes
/// removed. For [`TokenKind::Name`] and [`TokenKind::ParameterExpansion`],
/// `text` is the variable name without `=` or `$`.
///
/// A word that mixes literal text and `$name` parameters is a composite
/// word: its kind is [`TokenKind::Word`] and `nested` holds the segments in
/// order, each being a `Word` or `ParameterExpansion` token. For all other
/// tokens, `nested` is empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub nested: Vec<Token>,
    /// Byte offset of the first character of the token in the source code
    pub index: usize,
}

impl Token {
    /// Creates a token without nested segments.
    pub fn new<S: Into<String>>(kind: TokenKind, text: S, index: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            nested: Vec::new(),
            index,
        }
    }
}

/// Prints the token roughly as it appeared in the source.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self.kind {
            Newline => f.write_str("newline"),
            Name => write!(f, "{}=", self.text),
            ParameterExpansion => write!(f, "${}", self.text),
            InputRedirect => f.write_str("<"),
            OutputRedirect => f.write_str(">"),
            Pipe => f.write_str("|"),
            AsyncList => f.write_str("&"),
            SeqList => f.write_str(";"),
            Plus => f.write_str("+"),
            Minus => f.write_str("-"),
            Multiply => f.write_str("*"),
            Divide => f.write_str("/"),
            LPar => f.write_str("("),
            RPar => f.write_str(")"),
            End => f.write_str("end of input"),
            Word | Integer | If | Else | Fi | Then | For | While | Do | Done | In => {
                f.write_str(&self.text)
            }
        }
    }
}
