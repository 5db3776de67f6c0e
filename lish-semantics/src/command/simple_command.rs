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

//! Implementation of the simple command semantics.
//!
//! A simple command is executed in two steps. First, the shell
//! [prepares](prepare) the command: it performs the assignments, expands the
//! command name, [searches](crate::command_search::search) for the target,
//! expands the arguments and opens the redirection targets, in this order.
//! Any failure in this step is an [`Error`](crate::error::Error) that stops
//! the execution of the enclosing list.
//!
//! Then the prepared command is [run](run_foreground). A built-in or an
//! assignment-only command in a foreground pipeline of its own runs in the
//! shell process itself. Everything else runs in a child process started by
//! [`start_child`], which sets up the process group, signal handling and
//! file descriptors before running the built-in or `execve`ing the external
//! utility.

use super::pipeline::run_job;
use crate::assign::perform_assignments;
use crate::command_search::Target;
use crate::command_search::search;
use crate::error::Error;
use crate::error::Result;
use crate::expansion::expand_arguments;
use crate::expansion::expand_word;
use crate::redir::OpenRedir;
use crate::redir::RedirGuard;
use crate::redir::open_redirection;
use lish_env::Env;
use lish_env::io::Fd;
use lish_env::job::Pid;
use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use lish_env::system::Signal;
use lish_env::system::SignalHandling;
use lish_syntax::syntax::Mode;
use lish_syntax::syntax::SimpleCommand;
use std::ffi::CString;

/// Signals the interactive shell ignores and its children must not
pub const JOB_CONTROL_SIGNALS: [Signal; 5] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
];

/// Simple command ready to be run
#[derive(Debug)]
pub struct Prepared {
    /// Command to run, or `None` for a command without a name
    pub target: Option<Target>,
    /// Expanded command name and arguments
    pub argv: Vec<String>,
    /// Redirections with their target files opened
    pub redirs: Vec<OpenRedir>,
}

impl Prepared {
    /// Closes the file descriptors of the redirections.
    pub fn close(self, env: &mut Env) {
        for redir in self.redirs {
            let _ = env.system.close(redir.fd);
        }
    }
}

/// Prepares a simple command for execution.
///
/// If this function fails, the file descriptors opened so far are closed,
/// but the assignments performed remain in effect.
pub fn prepare(env: &mut Env, command: &SimpleCommand) -> Result<Prepared> {
    perform_assignments(env, &command.assignments)?;

    let (target, argv) = match &command.name {
        None => (None, Vec::new()),
        Some(name) => {
            let name = expand_word(env, name);
            let Some(target) = search(env, &name) else {
                return Err(Error::CommandNotFound(name));
            };
            tracing::debug!(%name, ?target, "command search");
            let mut argv = vec![name];
            argv.extend(expand_arguments(env, &command.args)?);
            (Some(target), argv)
        }
    };

    let mut redirs = Vec::new();
    for redir in command.input.iter().chain(&command.output) {
        match open_redirection(env, redir) {
            Ok(redir) => redirs.push(redir),
            Err(error) => {
                for redir in redirs {
                    let _ = env.system.close(redir.fd);
                }
                return Err(error);
            }
        }
    }

    Ok(Prepared {
        target,
        argv,
        redirs,
    })
}

/// Tests whether the prepared command can run in the shell process.
///
/// This is true for a built-in and a command without a name.
#[must_use]
pub fn runs_in_shell(prepared: &Prepared) -> bool {
    !matches!(prepared.target, Some(Target::External { .. }))
}

/// Runs a command that makes up a foreground pipeline by itself.
///
/// A built-in runs in the shell process with the redirections applied while
/// it runs and undone afterwards. A command without a name only creates or
/// opens the redirection targets, and its exit status is zero. An external
/// utility runs in a child process the shell waits for.
pub fn run_foreground(env: &mut Env, prepared: Prepared) -> Result {
    let builtin = match prepared.target {
        None => {
            prepared.close(env);
            env.exit_status = ExitStatus::SUCCESS;
            return Ok(());
        }
        Some(Target::Builtin(builtin)) => builtin,
        Some(Target::External { .. }) => return run_job(env, vec![prepared], Mode::Foreground),
    };

    let mut env = RedirGuard::new(env);
    let mut redirs = prepared.redirs.into_iter();
    while let Some(redir) = redirs.next() {
        if let Err(error) = env.apply(redir) {
            for redir in redirs {
                let _ = env.system.close(redir.fd);
            }
            return Err(error);
        }
    }

    let args = prepared.argv.into_iter().skip(1).collect();
    let exit_status = (builtin.execute)(&mut *env, args);
    env.exit_status = exit_status;
    Ok(())
}

/// How a child process joins a job
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChildSetup {
    /// Whether the child gets its own process group
    pub job_control: bool,
    /// Process group to join, or `None` to start a new one
    pub pgid: Option<Pid>,
    /// Whether the job is in the foreground
    pub foreground: bool,
    /// Reading end of the pipe from the previous command
    pub stdin: Option<Fd>,
    /// Writing end of the pipe to the next command
    pub stdout: Option<Fd>,
}

/// Sets up and runs the command in a newly created child process.
///
/// This function must be called in the child process. It never returns.
///
/// The pipe ends given in `setup` become the standard input and output, and
/// then the redirections are applied, overriding the pipes. A built-in runs
/// to completion and its exit status becomes that of the process. An
/// external utility replaces the process; if `execve` fails, the process
/// exits with 127 when the file does not exist and 126 otherwise.
pub fn start_child(env: &mut Env, prepared: Prepared, setup: ChildSetup) -> ! {
    if setup.job_control {
        let pgid = setup.pgid.unwrap_or_else(|| env.system.getpid());
        let _ = env.system.setpgid(Pid::from_raw(0), pgid);
        if setup.foreground {
            let _ = env.system.tcsetpgrp(Fd::STDIN, pgid);
        }
    }
    for signal in JOB_CONTROL_SIGNALS {
        let _ = env.system.sigaction(signal, SignalHandling::Default);
    }

    let pipes = [(setup.stdin, Fd::STDIN), (setup.stdout, Fd::STDOUT)];
    let pipes = pipes
        .into_iter()
        .filter_map(|(fd, target)| Some((fd?, target, "pipe")));
    let redirs = prepared
        .redirs
        .iter()
        .map(|redir| (redir.fd, redir.target, redir.path.as_str()));
    for (fd, target, path) in pipes.chain(redirs) {
        if let Err(errno) = env.system.dup2(fd, target) {
            let error = Error::Redirection {
                path: path.to_string(),
                errno,
            };
            env.print_error(&format!("Error: {error}"));
            env.system.exit(error.exit_status());
        }
    }

    let exit_status = match prepared.target {
        None => ExitStatus::SUCCESS,
        Some(Target::Builtin(builtin)) => {
            let args = prepared.argv.into_iter().skip(1).collect();
            (builtin.execute)(env, args)
        }
        Some(Target::External { path }) => exec_external(env, &path, &prepared.argv),
    };
    env.system.exit(exit_status)
}

/// Replaces the current process with the external utility.
///
/// Returns only if `execve` fails, with the exit status to exit with.
fn exec_external(env: &mut Env, path: &CString, argv: &[String]) -> ExitStatus {
    let args: std::result::Result<Vec<CString>, _> =
        argv.iter().map(|arg| CString::new(arg.as_str())).collect();
    let Ok(args) = args else {
        env.print_error("lish: nul byte found in the command arguments");
        return ExitStatus::FAILURE;
    };
    let envs = env.variables.env_c_strings();

    let errno = match env.system.execve(path, &args, &envs) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    env.print_error(&format!(
        "lish: cannot execute {}: {}",
        path.to_string_lossy(),
        errno.desc()
    ));
    match errno {
        Errno::ENOENT | Errno::ENOTDIR => ExitStatus::NOT_FOUND,
        _ => ExitStatus::NOEXEC,
    }
}
