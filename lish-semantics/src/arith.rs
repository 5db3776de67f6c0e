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

//! Arithmetic expansion

use crate::error::Error;
use crate::error::Result;
use crate::expansion::param_value;
use lish_env::Env;
use lish_syntax::syntax::ArithmExpr;
use lish_syntax::syntax::BinaryOperator;
use lish_syntax::syntax::UnaryOperator;

/// Evaluates an arithmetic expression.
///
/// Integer literals are decimal. A parameter must have a value that is a
/// decimal integer optionally preceded by a sign; an unset parameter expands
/// to the empty string and is therefore an error. Operations are performed on 64-bit signed integers; a result that
/// does not fit is an [overflow](Error::Overflow) error rather than a
/// wrapped value.
pub fn eval_arithm(env: &Env, expr: &ArithmExpr) -> Result<i64> {
    match expr {
        ArithmExpr::Integer(literal) => literal.parse().map_err(|_| Error::Overflow),

        ArithmExpr::Parameter(name) => {
            let value = param_value(env, name).unwrap_or_default();
            value.parse().map_err(|_| Error::InvalidArithmParameter {
                name: name.clone(),
                value: value.into_owned(),
            })
        }

        ArithmExpr::Unary { operator, operand } => {
            let operand = eval_arithm(env, operand)?;
            match operator {
                UnaryOperator::Plus => Ok(operand),
                UnaryOperator::Minus => operand.checked_neg().ok_or(Error::Overflow),
            }
        }

        ArithmExpr::Binary {
            operator,
            left,
            right,
        } => {
            let left = eval_arithm(env, left)?;
            let right = eval_arithm(env, right)?;
            let result = match operator {
                BinaryOperator::Add => left.checked_add(right),
                BinaryOperator::Subtract => left.checked_sub(right),
                BinaryOperator::Multiply => left.checked_mul(right),
                BinaryOperator::Divide if right == 0 => return Err(Error::DivisionByZero),
                BinaryOperator::Divide => left.checked_div(right),
            };
            result.ok_or(Error::Overflow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lish_syntax::syntax::Argument;
    use lish_syntax::syntax::CommandsList;
    use lish_syntax::syntax::Item;

    fn eval(env: &Env, source: &str) -> Result<i64> {
        let list: CommandsList = format!("x=$(({source}))").parse().unwrap();
        let Item::Pipelines(pipelines) = &list.0[0] else {
            panic!("not a pipeline list: {list:?}");
        };
        let value = &pipelines.0[0].commands[0].assignments[0].value;
        let Argument::Arithm(expr) = value else {
            panic!("not an arithmetic expansion: {value:?}");
        };
        eval_arithm(env, expr)
    }

    #[test]
    fn precedence_and_associativity() {
        let env = Env::new_virtual();
        assert_eq!(eval(&env, "2+3*4"), Ok(14));
        assert_eq!(eval(&env, "2*1 / (2)"), Ok(1));
        assert_eq!(eval(&env, "1+2+3-4"), Ok(2));
        assert_eq!(eval(&env, "-(-(-(4)))"), Ok(-4));
        assert_eq!(eval(&env, "7/2"), Ok(3));
    }

    #[test]
    fn parameters() {
        let mut env = Env::new_virtual();
        env.variables.set("a", "10");
        env.variables.set("b", "-3");
        env.variables.set("c", "+2");
        assert_eq!(eval(&env, "$a * $b + $c"), Ok(-28));
    }

    #[test]
    fn unset_parameter_is_invalid() {
        let env = Env::new_virtual();
        assert_eq!(
            eval(&env, "$undefined_var + 1"),
            Err(Error::InvalidArithmParameter {
                name: "undefined_var".to_string(),
                value: String::new(),
            })
        );
    }

    #[test]
    fn invalid_parameter() {
        let mut env = Env::new_virtual();
        env.variables.set("a", "1x");
        let error = eval(&env, "$a + 1").unwrap_err();
        assert_eq!(
            error,
            Error::InvalidArithmParameter {
                name: "a".to_string(),
                value: "1x".to_string(),
            }
        );

        env.variables.set("a", "");
        assert!(eval(&env, "$a").is_err());
    }

    #[test]
    fn division_by_zero() {
        let env = Env::new_virtual();
        assert_eq!(eval(&env, "1/0"), Err(Error::DivisionByZero));
        assert_eq!(eval(&env, "1/(2-2)"), Err(Error::DivisionByZero));
    }

    #[test]
    fn overflow() {
        let mut env = Env::new_virtual();
        assert_eq!(eval(&env, "9223372036854775807 + 1"), Err(Error::Overflow));
        assert_eq!(eval(&env, "99999999999999999999"), Err(Error::Overflow));
        env.variables.set("min", "-9223372036854775808");
        assert_eq!(eval(&env, "$min / -1"), Err(Error::Overflow));
        assert_eq!(eval(&env, "-$min"), Err(Error::Overflow));
    }
}
