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

//! Implementation of the read-eval loop
//!
//! [`run`] parses and executes a whole chunk of source code at once, as for
//! the `-c` option and script files. [`read_eval_loop`] reads source code
//! line by line from an [`Input`] and executes each complete command as soon
//! as it has been read, as for the standard input.
//!
//! In either case, a syntax error is reported as `Syntax error: MESSAGE` and
//! sets the exit status to 2, and an execution error is reported as
//! `Error: MESSAGE` and sets the exit status implied by the error. Job status
//! changes are collected and [reported](crate::job::do_job_notification) after
//! each top-level item.

use crate::command::Command;
use crate::job::do_job_notification;
use lish_env::Env;
use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use lish_syntax::parser::Error as SyntaxError;
use lish_syntax::parser::Parser;
use lish_syntax::parser::SyntaxError as Cause;
use lish_syntax::parser::lex::Lexer;
use lish_syntax::syntax::CommandsList;

/// Source of command lines
pub trait Input {
    /// Reads the next line.
    ///
    /// The result includes the trailing newline if any. An empty string
    /// means the end of input. `continuation` is true when the line
    /// continues a command that has not been completed by the previous
    /// lines.
    fn next_line(&mut self, env: &mut Env, continuation: bool) -> Result<String, Errno>;
}

/// Parses source code.
///
/// Empty source code results in an empty list.
pub fn parse(code: &str) -> Result<CommandsList, SyntaxError> {
    let mut lexer = Lexer::new(code);
    let mut parser = Parser::new(&mut lexer);
    Ok(parser.parse()?.unwrap_or_default())
}

/// Tests whether the syntax error would go away with more input.
///
/// This is the case for an unclosed quote and for an error found at the end
/// of the source code, such as a missing `fi`.
#[must_use]
pub fn is_incomplete(error: &SyntaxError, code: &str) -> bool {
    matches!(error.cause, Cause::UnclosedQuote { .. }) || error.index >= code.len()
}

/// Reports a syntax error and sets the exit status accordingly.
pub fn handle_syntax_error(env: &mut Env, error: &SyntaxError) {
    tracing::debug!(index = error.index, "syntax error");
    env.print_error(&format!("Syntax error: {error}"));
    env.exit_status = ExitStatus::ERROR;
}

/// Executes a parsed commands list.
///
/// Each item is executed in order, followed by a job notification. An error
/// is reported and stops the execution of the remaining items.
pub fn run_list(env: &mut Env, list: &CommandsList) -> ExitStatus {
    if list.0.is_empty() {
        env.exit_status = ExitStatus::SUCCESS;
    }
    for item in &list.0 {
        let result = item.execute(env);
        do_job_notification(env);
        if let Err(error) = result {
            env.print_error(&format!("Error: {error}"));
            env.exit_status = error.exit_status();
            break;
        }
    }
    env.exit_status
}

/// Parses and executes source code.
///
/// Returns the resulting exit status, which is also stored in
/// `env.exit_status`.
pub fn run(env: &mut Env, code: &str) -> ExitStatus {
    match parse(code) {
        Ok(list) => run_list(env, &list),
        Err(error) => {
            handle_syntax_error(env, &error);
            env.exit_status
        }
    }
}

/// Reads and executes commands until the end of input.
///
/// A line that leaves a command incomplete is combined with the following
/// lines until the command is complete or the input ends. A read error ends
/// the loop like the end of input.
///
/// If no commands are executed, the exit status is zero. Otherwise, the
/// result is the exit status of the last command.
pub fn read_eval_loop<I: Input + ?Sized>(env: &mut Env, input: &mut I) -> ExitStatus {
    env.exit_status = ExitStatus::SUCCESS;
    loop {
        let mut code = match read_line(env, input, false) {
            Some(line) => line,
            None => break,
        };
        let result = loop {
            match parse(&code) {
                Err(error) if is_incomplete(&error, &code) => {
                    match read_line(env, input, true) {
                        Some(line) => code.push_str(&line),
                        None => break Err(error),
                    }
                }
                result => break result,
            }
        };
        match result {
            Ok(list) => {
                run_list(env, &list);
            }
            Err(error) => handle_syntax_error(env, &error),
        }
    }
    env.exit_status
}

fn read_line<I: Input + ?Sized>(env: &mut Env, input: &mut I, continuation: bool) -> Option<String> {
    match input.next_line(env, continuation) {
        Ok(line) if line.is_empty() => None,
        Ok(line) => Some(line),
        Err(errno) => {
            env.print_error(&format!("lish: cannot read commands: {}", errno.desc()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::echo_builtin;
    use crate::tests::return_builtin;
    use lish_env::VirtualSystem;
    use std::collections::VecDeque;

    struct Lines {
        lines: VecDeque<&'static str>,
        continuations: Vec<bool>,
    }

    impl Lines {
        fn new(lines: &[&'static str]) -> Self {
            Lines {
                lines: lines.iter().copied().collect(),
                continuations: Vec::new(),
            }
        }
    }

    impl Input for Lines {
        fn next_line(&mut self, _: &mut Env, continuation: bool) -> Result<String, Errno> {
            self.continuations.push(continuation);
            Ok(self.lines.pop_front().unwrap_or_default().to_string())
        }
    }

    fn env() -> (VirtualSystem, Env) {
        let system = VirtualSystem::new();
        let mut env = Env::with_system(Box::new(system.clone()));
        env.builtins.insert("echo", echo_builtin());
        env.builtins.insert("return", return_builtin());
        (system, env)
    }

    #[test]
    fn run_executes_code() {
        let (system, mut env) = env();
        let exit_status = run(&mut env, "echo a; echo b\nreturn 42");
        assert_eq!(exit_status, ExitStatus(42));
        assert_eq!(env.exit_status, ExitStatus(42));
        assert_eq!(system.stdout_content(), "a\nb\n");
    }

    #[test]
    fn run_empty_code_exits_zero() {
        let (_, mut env) = env();
        env.exit_status = ExitStatus(3);
        assert_eq!(run(&mut env, "\n\n"), ExitStatus::SUCCESS);
    }

    #[test]
    fn run_reports_syntax_error() {
        let (system, mut env) = env();
        let exit_status = run(&mut env, "echo 'oops");
        assert_eq!(exit_status, ExitStatus::ERROR);
        assert_eq!(system.stderr_content(), "Syntax error: no terminating quote\n");
        assert_eq!(system.stdout_content(), "");
    }

    #[test]
    fn run_reports_execution_error() {
        let (system, mut env) = env();
        let exit_status = run(&mut env, "echo 1; nosuch; echo 2");
        assert_eq!(exit_status, ExitStatus::NOT_FOUND);
        assert_eq!(system.stdout_content(), "1\n");
        assert_eq!(system.stderr_content(), "Error: nosuch - command not found\n");
    }

    #[test]
    fn unset_parameter_in_arithmetic_is_an_error() {
        let (system, mut env) = env();
        let exit_status = run(&mut env, "x=$(($undefined_var + 1))");
        assert_eq!(exit_status, ExitStatus::FAILURE);
        assert_eq!(env.variables.get("x"), None);
        assert_eq!(
            system.stderr_content(),
            "Error: invalid parameter expansion inside arithmetic expansion\n"
        );
    }

    #[test]
    fn incomplete_errors() {
        let code = "if true; then echo";
        let error = parse(code).unwrap_err();
        assert!(is_incomplete(&error, code));

        let code = "echo 'a\n";
        let error = parse(code).unwrap_err();
        assert!(is_incomplete(&error, code));

        let code = "fi; echo";
        let error = parse(code).unwrap_err();
        assert!(!is_incomplete(&error, code));
    }

    #[test]
    fn loop_executes_each_line() {
        let (system, mut env) = env();
        let mut input = Lines::new(&["echo 1\n", "return 5\n", "echo $?\n"]);
        let exit_status = read_eval_loop(&mut env, &mut input);
        assert_eq!(exit_status, ExitStatus::SUCCESS);
        assert_eq!(system.stdout_content(), "1\n5\n");
        assert_eq!(input.continuations, [false, false, false, false]);
    }

    #[test]
    fn loop_reads_continuation_lines() {
        let (system, mut env) = env();
        let mut input = Lines::new(&["if return 0\n", "then echo 'a\n", "b'\n", "fi\n"]);
        read_eval_loop(&mut env, &mut input);
        assert_eq!(system.stdout_content(), "a\nb\n");
        assert_eq!(input.continuations, [false, true, true, true, false]);
    }

    #[test]
    fn loop_continues_after_errors() {
        let (system, mut env) = env();
        let mut input = Lines::new(&["fi\n", "nosuch\n", "echo ok\n"]);
        let exit_status = read_eval_loop(&mut env, &mut input);
        assert_eq!(exit_status, ExitStatus::SUCCESS);
        assert_eq!(system.stdout_content(), "ok\n");
        assert_eq!(
            system.stderr_content(),
            "Syntax error: unexpected token `fi`\nError: nosuch - command not found\n"
        );
    }

    #[test]
    fn loop_reports_incomplete_command_at_end_of_input() {
        let (system, mut env) = env();
        let mut input = Lines::new(&["while return 1\n"]);
        let exit_status = read_eval_loop(&mut env, &mut input);
        assert_eq!(exit_status, ExitStatus::ERROR);
        assert_eq!(system.stderr_content(), "Syntax error: expected `do`\n");
    }
}
