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

//! Shell command language syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! the shell language.
//!
//! ## Syntactic elements
//!
//! The AST type that represents a whole script is [`CommandsList`], a vector
//! of [`Item`]s. An item is either a [`PipelineList`] or a run of
//! [`CompoundCommand`]s.
//!
//! A [`PipelineList`] is a sequence of [`Pipeline`]s, each of which is run in
//! the foreground or the background according to its [`Mode`]. A pipeline
//! connects one or more [`SimpleCommand`]s.
//!
//! A [`SimpleCommand`] contains [`Assignment`]s, an optional command name, a
//! list of [`Argument`]s, and at most one input and one output
//! [`Redirection`].
//!
//! The compound commands are `if`, `while` and `for`. Their bodies are
//! [`CommandsList`]s again, so the tree is recursive.
//!
//! ## Lexical elements
//!
//! A [`Word`] is a sequence of [`WordUnit`]s, each of which is literal text or
//! a parameter expansion. An [`Argument`] is either a word or an arithmetic
//! expansion, whose expression is an [`ArithmExpr`] tree.
//!
//! ## Ownership
//!
//! Every node exclusively owns its children. There is no sharing between
//! nodes, so dropping the root frees the whole tree.
//!
//! ## Printing
//!
//! Every AST type implements [`Display`](std::fmt::Display), which prints the
//! node as shell source code that parses back into an equivalent tree.

use crate::parser::lex::Token;
use crate::parser::lex::TokenKind;

mod impl_display;

/// Element of a [`Word`]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum WordUnit {
    /// Literal string with quotes already removed
    Literal(String),
    /// Parameter expansion of the form `$name`
    Parameter(String),
}

/// Token that may involve parameter expansions
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Word {
    pub units: Vec<WordUnit>,
}

impl Word {
    /// Creates a word consisting of a single literal unit.
    pub fn literal<S: Into<String>>(value: S) -> Self {
        Word {
            units: vec![WordUnit::Literal(value.into())],
        }
    }

    /// Returns the literal value of the word if it contains no expansions.
    pub fn to_string_if_literal(&self) -> Option<String> {
        self.units
            .iter()
            .map(|unit| match unit {
                WordUnit::Literal(s) => Some(s.as_str()),
                WordUnit::Parameter(_) => None,
            })
            .collect()
    }
}

/// Converts a word-like token into a word.
///
/// `Word` tokens and reserved words become literal units (or the segments of
/// a composite word), and `ParameterExpansion` tokens become parameter units.
/// Other token kinds produce a literal with the token text.
impl From<Token> for Word {
    fn from(token: Token) -> Self {
        if !token.nested.is_empty() {
            let units = token.nested.into_iter().flat_map(|t| Word::from(t).units);
            return Word {
                units: units.collect(),
            };
        }
        let unit = match token.kind {
            TokenKind::ParameterExpansion => WordUnit::Parameter(token.text),
            _ => WordUnit::Literal(token.text),
        };
        Word { units: vec![unit] }
    }
}

/// Unary operator in an arithmetic expression
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

/// Binary operator in an arithmetic expression
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl BinaryOperator {
    /// Returns the precedence of the operator.
    ///
    /// A larger number means a tighter binding.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }
}

/// Expression in an arithmetic expansion
///
/// Leaves are integer literals and parameter references. Inner nodes own
/// their operands.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ArithmExpr {
    /// Decimal integer literal, as written
    Integer(String),
    /// Parameter reference without `$`
    Parameter(String),
    /// Unary `+` or `-` applied to one operand
    Unary {
        operator: UnaryOperator,
        operand: Box<ArithmExpr>,
    },
    /// Binary operator applied to two operands
    Binary {
        operator: BinaryOperator,
        left: Box<ArithmExpr>,
        right: Box<ArithmExpr>,
    },
}

/// Command argument, assignment value, or `for` loop value
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Argument {
    Word(Word),
    /// `$((...))`
    Arithm(ArithmExpr),
}

/// Assignment of the form `name=value`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Argument,
}

/// Direction of a [`Redirection`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirDirection {
    /// `<`
    Input,
    /// `>`
    Output,
}

/// Redirection of standard input or standard output to a file
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Redirection {
    pub direction: RedirDirection,
    /// Pathname of the file
    pub target: Word,
}

/// Command that involves assignments, words, and redirections
///
/// A simple command always has at least one of assignments and a name. The
/// parser never creates an empty simple command.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SimpleCommand {
    pub assignments: Vec<Assignment>,
    pub name: Option<Word>,
    pub args: Vec<Argument>,
    pub input: Option<Redirection>,
    pub output: Option<Redirection>,
}

impl SimpleCommand {
    /// Returns true if the simple command does not contain any assignments,
    /// words, or redirections.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
            && self.name.is_none()
            && self.args.is_empty()
            && self.input.is_none()
            && self.output.is_none()
    }
}

/// Whether a pipeline is waited for
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// The shell waits for the pipeline to finish.
    #[default]
    Foreground,
    /// The pipeline runs asynchronously (`&`).
    Background,
}

/// Sequence of simple commands connected by pipes
///
/// A pipeline always has at least one command.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pipeline {
    pub commands: Vec<SimpleCommand>,
    pub mode: Mode,
}

/// Sequence of pipelines separated by `;`, `&` or newlines
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PipelineList(pub Vec<Pipeline>);

impl PipelineList {
    /// Tests whether the last pipeline runs in the background.
    pub fn ends_in_background(&self) -> bool {
        self.0
            .last()
            .is_some_and(|pipeline| pipeline.mode == Mode::Background)
    }
}

/// Command that contains other commands
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CompoundCommand {
    /// `if condition; then body; else body; fi`
    If {
        condition: CommandsList,
        then: CommandsList,
        r#else: Option<CommandsList>,
    },
    /// `while condition; do body; done`
    While {
        condition: CommandsList,
        body: CommandsList,
    },
    /// `for name in values; do body; done`
    For {
        name: String,
        values: Vec<Argument>,
        body: CommandsList,
    },
}

/// Element of a [`CommandsList`]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Item {
    Pipelines(PipelineList),
    Compound(Vec<CompoundCommand>),
}

impl Item {
    /// Tests whether the item ends with a `&` separator.
    pub fn ends_in_background(&self) -> bool {
        match self {
            Item::Pipelines(list) => list.ends_in_background(),
            Item::Compound(_) => false,
        }
    }
}

/// Sequence of items executed in order
///
/// This is the type of a whole program and of the bodies of compound
/// commands.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CommandsList(pub Vec<Item>);

impl CommandsList {
    /// Tests whether the list ends with a `&` separator.
    pub fn ends_in_background(&self) -> bool {
        self.0.last().is_some_and(Item::ends_in_background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_from_tokens() {
        let word = Word::from(Token::new(TokenKind::Word, "abc", 0));
        assert_eq!(word, Word::literal("abc"));

        let word = Word::from(Token::new(TokenKind::ParameterExpansion, "x", 0));
        assert_eq!(word.units, [WordUnit::Parameter("x".to_string())]);

        let word = Word::from(Token::new(TokenKind::Fi, "fi", 0));
        assert_eq!(word, Word::literal("fi"));
    }

    #[test]
    fn word_from_composite_token() {
        let token = Token {
            kind: TokenKind::Word,
            text: "a$b".to_string(),
            nested: vec![
                Token::new(TokenKind::Word, "a", 0),
                Token::new(TokenKind::ParameterExpansion, "b", 1),
            ],
            index: 0,
        };
        let word = Word::from(token);
        assert_eq!(
            word.units,
            [
                WordUnit::Literal("a".to_string()),
                WordUnit::Parameter("b".to_string())
            ]
        );
    }

    #[test]
    fn word_to_string_if_literal() {
        assert_eq!(
            Word::literal("x").to_string_if_literal(),
            Some("x".to_string())
        );
        let word = Word {
            units: vec![
                WordUnit::Literal("a".to_string()),
                WordUnit::Literal("b".to_string()),
            ],
        };
        assert_eq!(word.to_string_if_literal(), Some("ab".to_string()));
        let word = Word {
            units: vec![WordUnit::Parameter("a".to_string())],
        };
        assert_eq!(word.to_string_if_literal(), None);
    }

    #[test]
    fn simple_command_is_empty() {
        let mut command = SimpleCommand::default();
        assert!(command.is_empty());
        command.output = Some(Redirection {
            direction: RedirDirection::Output,
            target: Word::literal("f"),
        });
        assert!(!command.is_empty());
    }
}
