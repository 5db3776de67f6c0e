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

//! Syntax parser for lists

use super::core::Parser;
use super::core::Result;
use super::lex::LexMode;
use super::lex::TokenKind;
use crate::syntax::CommandsList;
use crate::syntax::CompoundCommand;
use crate::syntax::Item;
use crate::syntax::Mode;
use crate::syntax::PipelineList;

impl Parser<'_, '_> {
    /// Parses a sequence of pipeline lists and compound commands.
    ///
    /// This function stops at the first token that can start neither a
    /// pipeline nor a compound command, such as a reserved word that closes
    /// the enclosing compound command. The result may be empty.
    pub fn compound_list(&mut self) -> Result<CommandsList> {
        let mut items = Vec::new();
        loop {
            self.newline_list()?;
            if let Some(commands) = self.cc_list()? {
                items.push(Item::Compound(commands));
            } else if let Some(list) = self.pipeline_list()? {
                items.push(Item::Pipelines(list));
            } else {
                break;
            }
        }
        Ok(CommandsList(items))
    }

    /// Parses a run of compound commands.
    ///
    /// Each compound command may be followed by a `;` or `&` and newlines.
    /// Returns `Ok(None)` if the current token does not start a compound
    /// command.
    pub fn cc_list(&mut self) -> Result<Option<Vec<CompoundCommand>>> {
        let mut commands = Vec::new();
        while let Some(command) = self.compound_command()? {
            commands.push(command);
            // Compound commands always run in the foreground.
            if !self.eat(TokenKind::SeqList)? {
                self.eat(TokenKind::AsyncList)?;
            }
            self.newline_list()?;
        }
        Ok((!commands.is_empty()).then_some(commands))
    }

    /// Parses pipelines separated by `;`, `&` or newlines.
    ///
    /// A trailing separator is consumed. A `&` separator makes the preceding
    /// pipeline run in the background. Returns `Ok(None)` if the current
    /// token does not start a pipeline.
    pub fn pipeline_list(&mut self) -> Result<Option<PipelineList>> {
        let mut pipelines = Vec::new();
        while let Some(mut pipeline) = self.pipeline()? {
            let separated = if self.mode()? != LexMode::Default {
                false
            } else {
                match self.peek_kind()? {
                    TokenKind::AsyncList => {
                        self.take_token()?;
                        pipeline.mode = Mode::Background;
                        true
                    }
                    TokenKind::SeqList => {
                        self.take_token()?;
                        true
                    }
                    TokenKind::Newline => true,
                    _ => false,
                }
            };
            pipelines.push(pipeline);
            if !separated {
                break;
            }
            self.newline_list()?;
        }
        Ok((!pipelines.is_empty()).then_some(PipelineList(pipelines)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::SyntaxError;
    use super::super::lex::Lexer;
    use super::*;

    fn parse(code: &str) -> CommandsList {
        code.parse().unwrap()
    }

    #[test]
    fn parser_pipeline_list_modes() {
        let mut lexer = Lexer::new("cmd1 & cmd2");
        let mut parser = Parser::new(&mut lexer);
        let list = parser.pipeline_list().unwrap().unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[0].mode, Mode::Background);
        assert_eq!(list.0[1].mode, Mode::Foreground);
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::End);
    }

    #[test]
    fn parser_pipeline_list_trailing_separators() {
        let mut lexer = Lexer::new("a; b &\n\n");
        let mut parser = Parser::new(&mut lexer);
        let list = parser.pipeline_list().unwrap().unwrap();
        assert_eq!(list.to_string(), "a; b &");
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::End);
    }

    #[test]
    fn parser_pipeline_list_none() {
        let mut lexer = Lexer::new("fi");
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.pipeline_list(), Ok(None));
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::Fi);
    }

    #[test]
    fn parser_compound_list_newline_separated() {
        let list = parse("\n  a\nb\n\nc  \n");
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.to_string(), "a; b; c");
    }

    #[test]
    fn parser_compound_list_interleaved() {
        let list = parse("a; if b; then c; fi\nwhile d; do e; done; f &");
        assert_eq!(list.0.len(), 3);
        assert!(matches!(list.0[0], Item::Pipelines(_)));
        assert!(matches!(&list.0[1], Item::Compound(c) if c.len() == 2));
        assert!(matches!(list.0[2], Item::Pipelines(_)));
        assert_eq!(
            list.to_string(),
            "a; if b; then c; fi; while d; do e; done; f &"
        );
    }

    #[test]
    fn parser_compound_list_stops_at_reserved_word() {
        let mut lexer = Lexer::new("a; b\ndone");
        let mut parser = Parser::new(&mut lexer);
        let list = parser.compound_list().unwrap();
        assert_eq!(list.to_string(), "a; b");
        assert_eq!(parser.peek_kind().unwrap(), TokenKind::Done);
    }

    #[test]
    fn parser_compound_command_with_ampersand() {
        let list = parse("while a; do b; done & c");
        assert_eq!(list.to_string(), "while a; do b; done; c");
    }

    #[test]
    fn parser_background_then_foreground_round_trip() {
        for code in ["a & b", "a | b & c; d", "x=1 & y=2"] {
            assert_eq!(parse(code).to_string(), code);
        }
    }

    #[test]
    fn parser_separator_without_command() {
        let e = ";".parse::<CommandsList>().unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnexpectedToken(";".to_string()));
        let e = "a;;".parse::<CommandsList>().unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnexpectedToken(";".to_string()));
        assert_eq!(e.index, 2);
    }
}
