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

//! Implementations of [`std::fmt::Display`] for the shell language syntax types

use super::*;
use crate::parser::lex::Keyword;
use crate::parser::lex::is_name_char;
use itertools::Itertools;
use std::fmt;
use std::fmt::Write as _;

/// Tests whether the character can appear unquoted in a printed word.
fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_./,:@%+-~".contains(c)
}

/// Writes a literal string, quoting it if it would otherwise be
/// misinterpreted.
fn write_literal(f: &mut fmt::Formatter<'_>, s: &str, after_parameter: bool) -> fmt::Result {
    let needs_quotes = s.is_empty()
        || !s.chars().all(is_safe_char)
        || (after_parameter && s.starts_with(is_name_char));
    if !needs_quotes {
        return f.write_str(s);
    }
    f.write_char('\'')?;
    for c in s.chars() {
        if c == '\'' {
            f.write_str(r#"'"'"'"#)?;
        } else {
            f.write_char(c)?;
        }
    }
    f.write_char('\'')
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [WordUnit::Literal(s)] = self.units.as_slice() {
            if Keyword::try_from(s.as_str()).is_ok() {
                return write!(f, "'{s}'");
            }
        }
        if self.units.is_empty() {
            return f.write_str("''");
        }

        let mut after_parameter = false;
        for unit in &self.units {
            match unit {
                WordUnit::Literal(s) => {
                    write_literal(f, s, after_parameter)?;
                    after_parameter = false;
                }
                WordUnit::Parameter(name) => {
                    write!(f, "${name}")?;
                    after_parameter = true;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        })
    }
}

/// Writes an operand, enclosing it in parentheses if its operator binds
/// weaker than `min_precedence`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &ArithmExpr, min_precedence: u8) -> fmt::Result {
    match expr {
        ArithmExpr::Binary { operator, .. } if operator.precedence() < min_precedence => {
            write!(f, "({expr})")
        }
        _ => fmt::Display::fmt(expr, f),
    }
}

impl fmt::Display for ArithmExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmExpr::Integer(value) => f.write_str(value),
            ArithmExpr::Parameter(name) => write!(f, "${name}"),
            ArithmExpr::Unary { operator, operand } => {
                operator.fmt(f)?;
                write_operand(f, operand, u8::MAX)
            }
            ArithmExpr::Binary {
                operator,
                left,
                right,
            } => {
                // Operators are left-associative, so a right operand of the
                // same precedence needs parentheses.
                write_operand(f, left, operator.precedence())?;
                write!(f, " {operator} ")?;
                write_operand(f, right, operator.precedence() + 1)
            }
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Word(word) => word.fmt(f),
            Argument::Arithm(expr) => write!(f, "$(({expr}))"),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl fmt::Display for RedirDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RedirDirection::Input => "<",
            RedirDirection::Output => ">",
        })
    }
}

impl fmt::Display for Redirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction, self.target)
    }
}

impl fmt::Display for SimpleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i1 = self.assignments.iter().map(|x| x as &dyn fmt::Display);
        let i2 = self.name.iter().map(|x| x as &dyn fmt::Display);
        let i3 = self.args.iter().map(|x| x as &dyn fmt::Display);
        let i4 = self.input.iter().map(|x| x as &dyn fmt::Display);
        let i5 = self.output.iter().map(|x| x as &dyn fmt::Display);
        write!(f, "{}", i1.chain(i2).chain(i3).chain(i4).chain(i5).format(" "))
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commands.iter().format(" | "))
    }
}

impl fmt::Display for PipelineList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pipeline) in self.0.iter().enumerate() {
            let is_last = i + 1 == self.0.len();
            pipeline.fmt(f)?;
            match pipeline.mode {
                Mode::Background => f.write_str(" &")?,
                Mode::Foreground if !is_last => f.write_char(';')?,
                Mode::Foreground => (),
            }
            if !is_last {
                f.write_char(' ')?;
            }
        }
        Ok(())
    }
}

/// Returns the separator to print after a list that is followed by a
/// reserved word.
fn terminator(list: &CommandsList) -> &'static str {
    if list.0.is_empty() || list.ends_in_background() {
        ""
    } else {
        ";"
    }
}

impl fmt::Display for CompoundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundCommand::If {
                condition,
                then,
                r#else,
            } => {
                write!(f, "if {condition}{} then {then}{} ", terminator(condition), terminator(then))?;
                if let Some(r#else) = r#else {
                    write!(f, "else {}{} ", r#else, terminator(r#else))?;
                }
                f.write_str("fi")
            }
            CompoundCommand::While { condition, body } => write!(
                f,
                "while {condition}{} do {body}{} done",
                terminator(condition),
                terminator(body)
            ),
            CompoundCommand::For { name, values, body } => {
                write!(f, "for {name} in")?;
                for value in values {
                    write!(f, " {value}")?;
                }
                write!(f, "; do {body}{} done", terminator(body))
            }
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Pipelines(list) => list.fmt(f),
            Item::Compound(commands) => write!(f, "{}", commands.iter().format("; ")),
        }
    }
}

impl fmt::Display for CommandsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                let previous = &self.0[i - 1];
                f.write_str(if previous.ends_in_background() { " " } else { "; " })?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(value: &str) -> Box<ArithmExpr> {
        Box::new(ArithmExpr::Integer(value.to_string()))
    }

    #[test]
    fn word_display_plain() {
        assert_eq!(Word::literal("abc").to_string(), "abc");
        assert_eq!(Word::literal("./a/b-c").to_string(), "./a/b-c");
    }

    #[test]
    fn word_display_quotes_special_characters() {
        assert_eq!(Word::literal("a b").to_string(), "'a b'");
        assert_eq!(Word::literal("").to_string(), "''");
        assert_eq!(Word::literal("a=b").to_string(), "'a=b'");
        assert_eq!(Word::literal("$x").to_string(), "'$x'");
        assert_eq!(Word::literal("it's").to_string(), r#"'it'"'"'s'"#);
        assert_eq!(Word::literal("fi").to_string(), "'fi'");
    }

    #[test]
    fn word_display_parameters() {
        let word = Word {
            units: vec![
                WordUnit::Literal("a".to_string()),
                WordUnit::Parameter("x".to_string()),
                WordUnit::Literal("y".to_string()),
                WordUnit::Parameter("z".to_string()),
                WordUnit::Literal("/".to_string()),
            ],
        };
        assert_eq!(word.to_string(), "a$x'y'$z/");
    }

    #[test]
    fn arithm_expr_display_precedence() {
        // 2 + 3 * 4
        let expr = ArithmExpr::Binary {
            operator: BinaryOperator::Add,
            left: integer("2"),
            right: Box::new(ArithmExpr::Binary {
                operator: BinaryOperator::Multiply,
                left: integer("3"),
                right: integer("4"),
            }),
        };
        assert_eq!(expr.to_string(), "2 + 3 * 4");

        // (2 + 3) * 4
        let expr = ArithmExpr::Binary {
            operator: BinaryOperator::Multiply,
            left: Box::new(ArithmExpr::Binary {
                operator: BinaryOperator::Add,
                left: integer("2"),
                right: integer("3"),
            }),
            right: integer("4"),
        };
        assert_eq!(expr.to_string(), "(2 + 3) * 4");

        // 1 - (2 - 3)
        let expr = ArithmExpr::Binary {
            operator: BinaryOperator::Subtract,
            left: integer("1"),
            right: Box::new(ArithmExpr::Binary {
                operator: BinaryOperator::Subtract,
                left: integer("2"),
                right: integer("3"),
            }),
        };
        assert_eq!(expr.to_string(), "1 - (2 - 3)");
    }

    #[test]
    fn arithm_expr_display_unary() {
        let expr = ArithmExpr::Unary {
            operator: UnaryOperator::Minus,
            operand: Box::new(ArithmExpr::Unary {
                operator: UnaryOperator::Minus,
                operand: Box::new(ArithmExpr::Parameter("x".to_string())),
            }),
        };
        assert_eq!(expr.to_string(), "--$x");

        let expr = ArithmExpr::Unary {
            operator: UnaryOperator::Plus,
            operand: Box::new(ArithmExpr::Binary {
                operator: BinaryOperator::Divide,
                left: integer("6"),
                right: integer("3"),
            }),
        };
        assert_eq!(expr.to_string(), "+(6 / 3)");
    }

    #[test]
    fn simple_command_display() {
        let command = SimpleCommand {
            assignments: vec![Assignment {
                name: "a".to_string(),
                value: Argument::Arithm(*integer("1")),
            }],
            name: Some(Word::literal("cmd")),
            args: vec![Argument::Word(Word::literal("x"))],
            input: Some(Redirection {
                direction: RedirDirection::Input,
                target: Word::literal("in"),
            }),
            output: Some(Redirection {
                direction: RedirDirection::Output,
                target: Word::literal("out"),
            }),
        };
        assert_eq!(command.to_string(), "a=$((1)) cmd x <in >out");
    }

    #[test]
    fn pipeline_list_display() {
        let command = |name: &str| SimpleCommand {
            name: Some(Word::literal(name)),
            ..SimpleCommand::default()
        };
        let list = PipelineList(vec![
            Pipeline {
                commands: vec![command("a"), command("b")],
                mode: Mode::Background,
            },
            Pipeline {
                commands: vec![command("c")],
                mode: Mode::Foreground,
            },
            Pipeline {
                commands: vec![command("d")],
                mode: Mode::Background,
            },
        ]);
        assert_eq!(list.to_string(), "a | b & c; d &");
    }
}
