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

//! Syntax parser for compound commands

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::LexMode;
use super::lex::TokenKind;
use super::lex::is_name;
use crate::syntax::Argument;
use crate::syntax::CommandsList;
use crate::syntax::CompoundCommand;

impl Parser<'_, '_> {
    /// Parses a compound command.
    ///
    /// Returns `Ok(None)` if the current token is not `if`, `while` or
    /// `for`.
    pub fn compound_command(&mut self) -> Result<Option<CompoundCommand>> {
        if self.mode()? != LexMode::Default {
            return Ok(None);
        }
        match self.peek_kind()? {
            TokenKind::If => self.if_clause().map(Some),
            TokenKind::While => self.while_clause().map(Some),
            TokenKind::For => self.for_clause().map(Some),
            _ => Ok(None),
        }
    }

    /// Consumes the expected reserved word or fails with the given cause.
    fn expect(&mut self, kind: TokenKind, cause: SyntaxError) -> Result<()> {
        if self.eat(kind)? {
            Ok(())
        } else {
            Err(self.error_at_current(cause))
        }
    }

    /// Parses a `do ... done` clause.
    fn do_clause(&mut self) -> Result<CommandsList> {
        self.expect(TokenKind::Do, SyntaxError::MissingDo)?;
        let body = self.compound_list()?;
        self.expect(TokenKind::Done, SyntaxError::UnclosedDoClause)?;
        Ok(body)
    }

    /// Parses an if command. The current token must be `if`.
    fn if_clause(&mut self) -> Result<CompoundCommand> {
        self.take_token()?;
        let condition = self.compound_list()?;
        self.expect(TokenKind::Then, SyntaxError::IfMissingThen)?;
        let then = self.compound_list()?;
        let r#else = if self.eat(TokenKind::Else)? {
            Some(self.compound_list()?)
        } else {
            None
        };
        self.expect(TokenKind::Fi, SyntaxError::UnclosedIf)?;
        Ok(CompoundCommand::If {
            condition,
            then,
            r#else,
        })
    }

    /// Parses a while loop. The current token must be `while`.
    fn while_clause(&mut self) -> Result<CompoundCommand> {
        self.take_token()?;
        let condition = self.compound_list()?;
        let body = self.do_clause()?;
        Ok(CompoundCommand::While { condition, body })
    }

    /// Parses a for loop. The current token must be `for`.
    fn for_clause(&mut self) -> Result<CompoundCommand> {
        self.take_token()?;

        let name = self.take_token()?;
        if name.kind != TokenKind::Word || !name.nested.is_empty() || !is_name(&name.text) {
            let cause = SyntaxError::MissingForName;
            return Err(Error {
                cause,
                index: name.index,
            });
        }

        self.newline_list()?;
        self.expect(TokenKind::In, SyntaxError::MissingIn)?;

        let mut values = Vec::new();
        loop {
            if self.mode()? == LexMode::Arithmetic {
                values.push(Argument::Arithm(self.arithm_expansion()?));
                continue;
            }
            match self.peek_kind()? {
                TokenKind::Word | TokenKind::ParameterExpansion => {
                    values.push(Argument::Word(self.take_token()?.into()));
                }
                _ => break,
            }
        }
        self.eat(TokenKind::SeqList)?;
        self.newline_list()?;

        let body = self.do_clause()?;
        Ok(CompoundCommand::For {
            name: name.text,
            values,
            body,
        })
    }
}
