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

//! Syntax parser for arithmetic expansions

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::TokenKind;
use crate::syntax::ArithmExpr;
use crate::syntax::BinaryOperator;
use crate::syntax::UnaryOperator;

/// Maximum nesting depth of parentheses and unary operators
pub const MAX_ARITHM_DEPTH: usize = 256;

impl Parser<'_, '_> {
    /// Parses the expression of an arithmetic expansion and its closing `))`.
    ///
    /// The `$((` must have been consumed by the lexer, so the current token
    /// is the first token of the expression.
    pub fn arithm_expansion(&mut self) -> Result<ArithmExpr> {
        let expr = self.arithm_expr(0)?;
        self.close_arithm()?;
        Ok(expr)
    }

    /// Parses a sum or difference of terms.
    fn arithm_expr(&mut self, depth: usize) -> Result<ArithmExpr> {
        let mut left = self.arithm_term(depth)?;
        loop {
            let operator = match self.peek_kind()? {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => return Ok(left),
            };
            self.take_token()?;
            let right = self.arithm_term(depth)?;
            left = ArithmExpr::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    /// Parses a product or quotient of factors.
    fn arithm_term(&mut self, depth: usize) -> Result<ArithmExpr> {
        let mut left = self.arithm_factor(depth)?;
        loop {
            let operator = match self.peek_kind()? {
                TokenKind::Multiply => BinaryOperator::Multiply,
                TokenKind::Divide => BinaryOperator::Divide,
                _ => return Ok(left),
            };
            self.take_token()?;
            let right = self.arithm_factor(depth)?;
            left = ArithmExpr::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    /// Parses an operand, a parenthesized expression, or a unary operation.
    ///
    /// Nesting deeper than [`MAX_ARITHM_DEPTH`] is an error.
    fn arithm_factor(&mut self, depth: usize) -> Result<ArithmExpr> {
        let token = self.take_token()?;
        let nests = matches!(token.kind, TokenKind::LPar | TokenKind::Plus | TokenKind::Minus);
        if nests && depth >= MAX_ARITHM_DEPTH {
            return Err(Error {
                cause: SyntaxError::InvalidArithm,
                index: token.index,
            });
        }
        match token.kind {
            TokenKind::Integer => Ok(ArithmExpr::Integer(token.text)),
            TokenKind::ParameterExpansion => Ok(ArithmExpr::Parameter(token.text)),
            TokenKind::LPar => {
                let expr = self.arithm_expr(depth + 1)?;
                if self.eat(TokenKind::RPar)? {
                    Ok(expr)
                } else {
                    Err(self.error_at_current(SyntaxError::InvalidArithm))
                }
            }
            TokenKind::Plus | TokenKind::Minus => {
                let operator = if token.kind == TokenKind::Plus {
                    UnaryOperator::Plus
                } else {
                    UnaryOperator::Minus
                };
                let operand = Box::new(self.arithm_factor(depth + 1)?);
                Ok(ArithmExpr::Unary { operator, operand })
            }
            _ => Err(Error {
                cause: SyntaxError::InvalidArithm,
                index: token.index,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex::LexMode;
    use super::super::lex::Lexer;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_arithm(code: &str) -> Result<ArithmExpr> {
        let mut lexer = Lexer::new(code);
        let mut parser = Parser::new(&mut lexer);
        assert_eq!(parser.mode().unwrap(), LexMode::Arithmetic, "{code:?}");
        parser.arithm_expansion()
    }

    #[test]
    fn parser_arithm_single_operand() {
        assert_eq!(
            parse_arithm("$((42))").unwrap(),
            ArithmExpr::Integer("42".to_string())
        );
        assert_eq!(
            parse_arithm("$(( $n ))").unwrap(),
            ArithmExpr::Parameter("n".to_string())
        );
    }

    #[test]
    fn parser_arithm_precedence() {
        let expr = parse_arithm("$((2+3*4))").unwrap();
        assert_matches!(&expr, ArithmExpr::Binary { operator: BinaryOperator::Add, left, right } => {
            assert_eq!(**left, ArithmExpr::Integer("2".to_string()));
            assert_matches!(**right, ArithmExpr::Binary { operator: BinaryOperator::Multiply, .. });
        });
        assert_eq!(expr.to_string(), "2 + 3 * 4");
    }

    #[test]
    fn parser_arithm_left_associativity() {
        let expr = parse_arithm("$((8-4-2))").unwrap();
        assert_matches!(&expr, ArithmExpr::Binary { operator: BinaryOperator::Subtract, left, .. } => {
            assert_matches!(**left, ArithmExpr::Binary { operator: BinaryOperator::Subtract, .. });
        });
        assert_eq!(parse_arithm("$((8/4/2))").unwrap().to_string(), "8 / 4 / 2");
    }

    #[test]
    fn parser_arithm_parentheses() {
        let expr = parse_arithm("$(((2+3)*4))").unwrap();
        assert_eq!(expr.to_string(), "(2 + 3) * 4");
        let expr = parse_arithm("$((2*(3-(4))))").unwrap();
        assert_eq!(expr.to_string(), "2 * (3 - 4)");
    }

    #[test]
    fn parser_arithm_unary() {
        let expr = parse_arithm("$((-3 + +$x))").unwrap();
        assert_eq!(expr.to_string(), "-3 + +$x");
        let expr = parse_arithm("$((- -1))").unwrap();
        assert_eq!(expr.to_string(), "--1");
    }

    #[test]
    fn parser_arithm_errors() {
        for code in ["$(())", "$((1+))", "$((1 2))", "$((x))", "$(((1))", "$((1)", "$((1"] {
            let e = parse_arithm(code).unwrap_err();
            assert_eq!(e.cause, SyntaxError::InvalidArithm, "{code:?}");
        }
    }

    #[test]
    fn parser_arithm_nesting_limit() {
        let minuses = "-".repeat(MAX_ARITHM_DEPTH);
        assert!(parse_arithm(&format!("$(({minuses}1))")).is_ok());

        let minuses = "-".repeat(MAX_ARITHM_DEPTH + 1);
        let e = parse_arithm(&format!("$(({minuses}1))")).unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidArithm);
        assert_eq!(e.index, 3 + MAX_ARITHM_DEPTH);

        let open = "(".repeat(MAX_ARITHM_DEPTH + 1);
        let close = ")".repeat(MAX_ARITHM_DEPTH + 1);
        let e = parse_arithm(&format!("$(({open}1{close}))")).unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidArithm);
    }

    #[test]
    fn parser_arithm_returns_to_default_mode() {
        let mut lexer = Lexer::new("$((1)) a");
        let mut parser = Parser::new(&mut lexer);
        parser.mode().unwrap();
        parser.arithm_expansion().unwrap();
        assert_eq!(parser.mode().unwrap(), LexMode::Default);
        assert_eq!(parser.take_token().unwrap().text, "a");
    }
}
