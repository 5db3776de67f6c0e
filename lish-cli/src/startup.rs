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

//! Shell startup

use self::args::Run;
use self::args::Source;
use lish_builtin::BUILTINS;
use lish_env::Env;
use lish_env::System;
use lish_env::io::Fd;
use lish_env::system::SignalHandling;
use lish_env::variable::PWD;
use lish_semantics::command::simple_command::JOB_CONTROL_SIGNALS;

pub mod args;
pub mod input;

/// Tests whether the shell should be implicitly interactive.
///
/// As per POSIX, "if there are no operands and the shell's standard input and
/// standard error are attached to a terminal, the shell is considered to be
/// interactive." This function implements this rule.
#[must_use]
pub fn auto_interactive(system: &dyn System, run: &Run) -> bool {
    if run.source != Source::Stdin {
        return false;
    }
    if !run.positional_params.is_empty() {
        return false;
    }
    system.isatty(Fd::STDIN) && system.isatty(Fd::STDERR)
}

/// Sets `$PWD` to the current working directory unless it already names an
/// absolute path.
fn init_pwd(env: &mut Env) {
    if env.variables.value(PWD).is_some_and(|pwd| pwd.starts_with('/')) {
        return;
    }
    match env.system.getcwd() {
        Ok(cwd) => match cwd.into_os_string().into_string() {
            Ok(cwd) => {
                env.variables.set(PWD, cwd);
                env.variables.export(PWD);
            }
            Err(_) => tracing::warn!("working directory is not valid UTF-8"),
        },
        Err(errno) => tracing::warn!(%errno, "cannot get the working directory"),
    }
}

/// Configures the environment according to the command line.
///
/// This function installs the built-ins, assigns the positional parameters
/// to the variables `1`, `2`, ..., initializes `$PWD` and `$PS1`, and
/// decides whether the shell is interactive and performs job control.
pub fn configure_environment(env: &mut Env, run: &Run) {
    env.builtins.extend(BUILTINS.iter().copied());

    for (i, param) in run.positional_params.iter().enumerate() {
        env.variables.set((i + 1).to_string(), param.as_str());
    }
    init_pwd(env);
    env.variables.init();

    env.is_interactive = run
        .interactive
        .unwrap_or_else(|| auto_interactive(&*env.system, run));
    env.job_control = env.is_interactive && env.system.isatty(Fd::STDIN);
    tracing::debug!(
        interactive = env.is_interactive,
        job_control = env.job_control,
        "configured shell"
    );
}

/// Prepares the shell process for job control.
///
/// The shell ignores the job-control signals, puts itself in its own process
/// group and brings the group to the foreground of the terminal. If the
/// terminal cannot be taken, job control is disabled.
pub fn init_job_control(env: &mut Env) {
    for signal in JOB_CONTROL_SIGNALS {
        if let Err(errno) = env.system.sigaction(signal, SignalHandling::Ignore) {
            tracing::warn!(%errno, ?signal, "cannot ignore signal");
        }
    }

    let pid = env.system.getpid();
    if let Err(errno) = env.system.setpgid(pid, pid) {
        // Already a session leader, for example.
        tracing::debug!(%errno, "setpgid failed");
    }
    env.main_pgid = env.system.getpgrp();

    if let Err(errno) = env.system.tcsetpgrp(Fd::STDIN, env.main_pgid) {
        env.print_error(&format!(
            "lish: cannot take control of the terminal: {}; job control disabled",
            errno.desc()
        ));
        env.job_control = false;
    }
}
