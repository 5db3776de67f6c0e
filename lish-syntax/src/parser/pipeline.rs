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

//! Syntax parser for pipelines

use super::core::Parser;
use super::core::Result;
use super::error::SyntaxError;
use super::lex::TokenKind;
use crate::syntax::Mode;
use crate::syntax::Pipeline;

impl Parser<'_, '_> {
    /// Parses a pipeline.
    ///
    /// Returns `Ok(None)` if the current token does not start a simple
    /// command. The mode of the result is always [`Mode::Foreground`]; the
    /// caller changes it when it finds a `&` separator.
    pub fn pipeline(&mut self) -> Result<Option<Pipeline>> {
        let Some(first) = self.simple_command()? else {
            return Ok(None);
        };

        let mut commands = vec![first];
        while self.eat(TokenKind::Pipe)? {
            self.newline_list()?;
            match self.simple_command()? {
                Some(command) => commands.push(command),
                None => return Err(self.error_at_current(SyntaxError::MissingPipelineCommand)),
            }
        }

        Ok(Some(Pipeline {
            commands,
            mode: Mode::Foreground,
        }))
    }
}
