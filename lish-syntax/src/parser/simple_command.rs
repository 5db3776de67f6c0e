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

//! Syntax parser for simple commands

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::LexMode;
use super::lex::Token;
use super::lex::TokenKind;
use crate::syntax::Argument;
use crate::syntax::Assignment;
use crate::syntax::RedirDirection;
use crate::syntax::Redirection;
use crate::syntax::SimpleCommand;
use crate::syntax::Word;
use crate::syntax::WordUnit;

/// Appends word units, joining adjacent literals.
fn append_units(word: &mut Word, units: Vec<WordUnit>) {
    for unit in units {
        match (word.units.last_mut(), unit) {
            (Some(WordUnit::Literal(last)), WordUnit::Literal(s)) => last.push_str(&s),
            (_, unit) => word.units.push(unit),
        }
    }
}

impl Parser<'_, '_> {
    /// Tests whether the current token is a word in the default mode.
    fn is_word_token(&mut self, allow_keywords: bool) -> Result<bool> {
        if self.mode()? != LexMode::Default {
            return Ok(false);
        }
        let kind = self.peek_kind()?;
        Ok(if allow_keywords {
            kind.is_word_like()
        } else {
            matches!(kind, TokenKind::Word | TokenKind::ParameterExpansion)
        })
    }

    /// Parses the value of an assignment.
    ///
    /// The `NAME` token must have been consumed and passed as `name`.
    fn assignment_value(&mut self, name: &Token) -> Result<Argument> {
        if self.mode()? == LexMode::Arithmetic {
            return self.arithm_expansion().map(Argument::Arithm);
        }
        if self.is_word_token(true)? {
            return Ok(Argument::Word(self.take_token()?.into()));
        }
        let cause = SyntaxError::InvalidAssignment;
        Err(Error {
            cause,
            index: name.index,
        })
    }

    /// Parses assignments that precede the command name.
    fn cmd_prefix(&mut self) -> Result<Vec<Assignment>> {
        let mut assignments = Vec::new();
        while self.mode()? == LexMode::Default && self.peek_kind()? == TokenKind::Name {
            let name = self.take_token()?;
            let value = self.assignment_value(&name)?;
            assignments.push(Assignment {
                name: name.text,
                value,
            });
        }
        Ok(assignments)
    }

    /// Parses a redirection.
    ///
    /// The current token must be a redirection operator. The new redirection
    /// replaces any previous one in the same direction.
    fn io_redirect(&mut self, command: &mut SimpleCommand) -> Result<()> {
        let operator = self.take_token()?;
        let direction = match operator.kind {
            TokenKind::InputRedirect => RedirDirection::Input,
            _ => RedirDirection::Output,
        };

        if !self.is_word_token(true)? {
            return Err(self.error_at_current(SyntaxError::MissingRedirTarget));
        }
        let target = Word::from(self.take_token()?);

        let slot = match direction {
            RedirDirection::Input => &mut command.input,
            RedirDirection::Output => &mut command.output,
        };
        if slot.is_some() {
            tracing::trace!(%direction, "redirection overridden");
        }
        *slot = Some(Redirection { direction, target });
        Ok(())
    }

    /// Tests whether the current token is a redirection operator.
    fn is_redirect_token(&mut self) -> Result<bool> {
        Ok(self.mode()? == LexMode::Default
            && matches!(
                self.peek_kind()?,
                TokenKind::InputRedirect | TokenKind::OutputRedirect
            ))
    }

    /// Parses a `name=value` word that appears after the command name.
    ///
    /// Such a word is an ordinary argument. The value is part of the word only
    /// if it immediately follows the `=`.
    fn assignment_word(&mut self) -> Result<Word> {
        let name = self.take_token()?;
        let end = name.index + name.text.len() + 1;
        let mut word = Word::literal(format!("{}=", name.text));
        if self.is_word_token(true)? && self.peek_token()?.index == end {
            let value = Word::from(self.take_token()?);
            append_units(&mut word, value.units);
        }
        Ok(word)
    }

    /// Parses arguments and redirections that follow the command name.
    ///
    /// Stops without error at the first token that is neither.
    fn cmd_suffix(&mut self, command: &mut SimpleCommand) -> Result<()> {
        loop {
            if self.mode()? == LexMode::Arithmetic {
                let expr = self.arithm_expansion()?;
                command.args.push(Argument::Arithm(expr));
                continue;
            }
            match self.peek_kind()? {
                TokenKind::InputRedirect | TokenKind::OutputRedirect => {
                    self.io_redirect(command)?
                }
                TokenKind::Name => {
                    let word = self.assignment_word()?;
                    command.args.push(Argument::Word(word));
                }
                kind if kind.is_word_like() => {
                    let word = Word::from(self.take_token()?);
                    command.args.push(Argument::Word(word));
                }
                _ => return Ok(()),
            }
        }
    }

    /// Parses a simple command.
    ///
    /// Returns `Ok(None)` if the current token starts neither an assignment
    /// nor a command name. Redirections without a command name are accepted
    /// only after assignments.
    pub fn simple_command(&mut self) -> Result<Option<SimpleCommand>> {
        let mut command = SimpleCommand {
            assignments: self.cmd_prefix()?,
            ..SimpleCommand::default()
        };

        if self.is_word_token(false)? {
            command.name = Some(self.take_token()?.into());
            self.cmd_suffix(&mut command)?;
        } else if !command.assignments.is_empty() {
            while self.is_redirect_token()? {
                self.io_redirect(&mut command)?;
            }
        }

        if command.is_empty() {
            Ok(None)
        } else {
            Ok(Some(command))
        }
    }
}
