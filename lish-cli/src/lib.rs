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

//! This is an internal library crate for the lish shell. It is not intended
//! to be used as a library by other crates.
//!
//! The entry point for the shell is the [`main`] function, which is to be used
//! as the `main` function in the binary crate. The function sets up the shell
//! environment according to the command line and runs the commands.

pub mod logging;
pub mod startup;

use self::startup::args::Parse;
use self::startup::args::Run;
use self::startup::args::Source;
use self::startup::input::FdReader;
use self::startup::input::read_script;
use self::startup::input::skip_shebang;
use lish_builtin::common::output;
use lish_env::Env;
use lish_env::RealSystem;
use lish_env::io::Fd;
use lish_env::semantics::ExitStatus;
use lish_env::system::Signal;
use lish_env::system::SignalHandling;
use lish_semantics::read_eval_loop;
use lish_semantics::runner::Input as _;
use lish_semantics::runner::handle_syntax_error;
use lish_semantics::runner::parse;
use lish_semantics::runner;
use lish_syntax::syntax::CommandsList;

const USAGE: &str = "\
Usage: lish [-i|+i] [--dump-ast] [file [argument...]]
       lish [-i|+i] [--dump-ast] -c command_string [command_name [argument...]]
       lish [-i|+i] [--dump-ast] -s [argument...]
       lish --help | --version
";

fn print_help(env: &mut Env) {
    env.exit_status = output(env, USAGE);
}

fn print_version(env: &mut Env) {
    let version = env!("CARGO_PKG_VERSION");
    env.exit_status = output(env, &format!("lish {version}\n"));
}

/// Prints the syntax tree of the code instead of executing it.
fn dump_ast(env: &mut Env, code: &str) {
    match parse(code) {
        Ok(list) => print_ast(env, &list),
        Err(error) => handle_syntax_error(env, &error),
    }
}

fn print_ast(env: &mut Env, list: &CommandsList) {
    env.exit_status = if list.0.is_empty() {
        ExitStatus::SUCCESS
    } else {
        output(env, &format!("{list}\n"))
    };
}

/// Reads the whole standard input without prompting.
fn read_stdin(env: &mut Env) -> String {
    let mut reader = FdReader::new(Fd::STDIN, false);
    let mut code = String::new();
    loop {
        match reader.next_line(env, false) {
            Ok(line) if line.is_empty() => break,
            Ok(line) => code.push_str(&line),
            Err(errno) => {
                env.print_error(&format!("lish: cannot read commands: {}", errno.desc()));
                break;
            }
        }
    }
    code
}

/// Runs the commands from the source given on the command line.
pub fn run_source(env: &mut Env, run: &Run) {
    match &run.source {
        Source::String(code) if run.dump_ast => dump_ast(env, code),
        Source::String(code) => {
            runner::run(env, code);
        }
        Source::File { path } => match read_script(env, path) {
            Ok(script) if run.dump_ast => dump_ast(env, skip_shebang(&script)),
            Ok(script) => {
                runner::run(env, skip_shebang(&script));
            }
            Err(error) => {
                env.print_error(&format!("lish: {error}"));
                env.exit_status = error.exit_status();
            }
        },
        Source::Stdin if run.dump_ast => {
            let code = read_stdin(env);
            dump_ast(env, &code);
        }
        Source::Stdin => {
            let mut reader = FdReader::new(Fd::STDIN, env.is_interactive);
            read_eval_loop(env, &mut reader);
        }
    }
}

fn run_as_shell_process(env: &mut Env) {
    let run = match self::startup::args::parse(std::env::args()) {
        Ok(Parse::Help) => return print_help(env),
        Ok(Parse::Version) => return print_version(env),
        Ok(Parse::Run(run)) => run,
        Err(e) => {
            let arg0 = std::env::args().next().unwrap_or_else(|| "lish".to_owned());
            env.print_error(&format!("{arg0}: {e}"));
            env.exit_status = ExitStatus::ERROR;
            return;
        }
    };
    tracing::debug!(?run, "parsed command line");

    env.variables.extend_env(std::env::vars());
    self::startup::configure_environment(env, &run);
    if env.job_control {
        self::startup::init_job_control(env);
    }

    run_source(env, &run);
}

pub fn main() -> ! {
    logging::init();

    // SAFETY: This is the only instance of RealSystem we create in the whole
    // process.
    let system = unsafe { RealSystem::new() };
    let mut env = Env::with_system(Box::new(system));

    // Rust by default sets SIGPIPE to SIG_IGN, which is not desired.
    let _ = env.system.sigaction(Signal::SIGPIPE, SignalHandling::Default);

    run_as_shell_process(&mut env);

    let exit_status = env.exit_status;
    env.system.exit(exit_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use lish_env::VirtualSystem;
    use lish_env::system::r#virtual::INode;

    fn env() -> (VirtualSystem, Env) {
        let system = VirtualSystem::new();
        let mut env = Env::with_system(Box::new(system.clone()));
        self::startup::configure_environment(&mut env, &Run::default());
        (system, env)
    }

    fn run_with(source: Source, dump_ast: bool) -> Run {
        Run {
            source,
            dump_ast,
            ..Run::default()
        }
    }

    #[test]
    fn command_string_is_executed() {
        let (system, mut env) = env();
        let run = run_with(Source::String("export A 1; export".to_string()), false);
        run_source(&mut env, &run);
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_matches!(system.stdout_content(), s if s.contains("export A='1'\n"));
    }

    #[test]
    fn dump_ast_prints_syntax_tree() {
        let (system, mut env) = env();
        let code = "a  |b>out &";
        run_source(&mut env, &run_with(Source::String(code.to_string()), true));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(system.stdout_content(), "a | b >out &\n");
    }

    #[test]
    fn dump_ast_reports_syntax_error() {
        let (system, mut env) = env();
        run_source(&mut env, &run_with(Source::String("fi".to_string()), true));
        assert_eq!(env.exit_status, ExitStatus::ERROR);
        assert_eq!(system.stdout_content(), "");
        assert_eq!(system.stderr_content(), "Syntax error: unexpected token `fi`\n");
    }

    #[test]
    fn script_file_is_executed_without_shebang() {
        let (system, mut env) = env();
        system.save_file("/s", INode::new("#!/usr/bin/env lish\nunset\n"));
        let source = Source::File {
            path: "/s".to_string(),
        };
        run_source(&mut env, &run_with(source, false));
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
        assert_eq!(system.stderr_content(), "unset: no arguments\n");
    }

    #[test]
    fn script_file_without_shebang_keeps_first_line() {
        let (system, mut env) = env();
        system.save_file("/s", INode::new("unset a b\n"));
        let source = Source::File {
            path: "/s".to_string(),
        };
        run_source(&mut env, &run_with(source, false));
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
        assert_eq!(system.stderr_content(), "unset: too many arguments\n");
    }

    #[test]
    fn missing_script_file() {
        let (system, mut env) = env();
        let source = Source::File {
            path: "/nosuch".to_string(),
        };
        run_source(&mut env, &run_with(source, false));
        assert_eq!(env.exit_status, ExitStatus::NOT_FOUND);
        assert_eq!(
            system.stderr_content(),
            "lish: cannot open script file '/nosuch': No such file or directory\n"
        );
    }

    #[test]
    fn stdin_is_read_line_by_line() {
        let (system, mut env) = env();
        system.set_stdin("cd /\nexport\n");
        run_source(&mut env, &Run::default());
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(system.stderr_content(), "");
    }

    #[test]
    fn dump_ast_from_stdin() {
        let (system, mut env) = env();
        system.set_stdin("for i in 1 2\ndo x; done\n");
        run_source(&mut env, &run_with(Source::Stdin, true));
        assert_eq!(system.stdout_content(), "for i in 1 2; do x; done\n");
    }
}
