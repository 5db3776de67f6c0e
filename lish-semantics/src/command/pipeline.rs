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

//! Implementation of the pipeline semantics.

use super::Command;
use super::simple_command::ChildSetup;
use super::simple_command::Prepared;
use super::simple_command::prepare;
use super::simple_command::run_foreground;
use super::simple_command::runs_in_shell;
use super::simple_command::start_child;
use crate::error::Error;
use crate::error::Result;
use crate::job::put_job_in_foreground;
use lish_env::Env;
use lish_env::SystemEx as _;
use lish_env::io::Fd;
use lish_env::job::Job;
use lish_env::job::Pid;
use lish_env::job::Process;
use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use lish_env::system::ForkResult;
use lish_syntax::syntax;
use lish_syntax::syntax::Mode;

/// Executes the pipeline.
///
/// All commands of the pipeline are [prepared](prepare) first, so an error in
/// any command stops the pipeline before a child process is started.
///
/// If the pipeline is a single foreground built-in or a command without a
/// name, it runs in the shell process. Otherwise, each command runs in a
/// child process, adjacent commands connected with a pipe, and the processes
/// form one job.
///
/// In the foreground, the shell waits until the last process finishes and the
/// exit status is that of the last command. Earlier processes still running
/// are reaped later. In the background, the shell does not
/// wait and the exit status is zero.
impl Command for syntax::Pipeline {
    fn execute(&self, env: &mut Env) -> Result {
        let mut stages = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            match prepare(env, command) {
                Ok(stage) => stages.push(stage),
                Err(error) => {
                    close_stages(env, stages);
                    return Err(error);
                }
            }
        }

        if self.mode == Mode::Foreground && stages.len() == 1 && runs_in_shell(&stages[0]) {
            if let Some(stage) = stages.pop() {
                return run_foreground(env, stage);
            }
        }
        run_job(env, stages, self.mode)
    }
}

/// Closes the file descriptors of stages that will not be run.
fn close_stages<I: IntoIterator<Item = Prepared>>(env: &mut Env, stages: I) {
    for stage in stages {
        stage.close(env);
    }
}

/// Moves a file descriptor to an internal one, closing it on failure.
fn move_internal_or_close(env: &mut Env, fd: Fd) -> std::result::Result<Fd, Errno> {
    env.system.move_fd_internal(fd).inspect_err(|_| {
        let _ = env.system.close(fd);
    })
}

/// Creates a pipe whose ends are internal file descriptors.
fn internal_pipe(env: &mut Env) -> Result<(Fd, Fd)> {
    let (reader, writer) = env.system.pipe().map_err(Error::Pipe)?;
    let reader = match move_internal_or_close(env, reader) {
        Ok(reader) => reader,
        Err(errno) => {
            let _ = env.system.close(writer);
            return Err(Error::Pipe(errno));
        }
    };
    match move_internal_or_close(env, writer) {
        Ok(writer) => Ok((reader, writer)),
        Err(errno) => {
            let _ = env.system.close(reader);
            Err(Error::Pipe(errno))
        }
    }
}

/// Starts a child process for each stage and registers them as a job.
///
/// If the job is in the foreground, this function waits for it and sets the
/// exit status. Otherwise, the exit status is zero.
///
/// If a pipe or child process cannot be created, the stages not yet started
/// are discarded. The processes already started are registered as a job
/// anyway, so that they are waited for later.
pub(crate) fn run_job(env: &mut Env, stages: Vec<Prepared>, mode: Mode) -> Result {
    let job_control = env.controls_jobs();
    let foreground = mode == Mode::Foreground;
    let count = stages.len();

    let mut pgid: Option<Pid> = None;
    let mut processes = Vec::with_capacity(count);
    let mut pipe_reader: Option<Fd> = None;
    let mut error = None;

    let mut stages = stages.into_iter().enumerate();
    while let Some((i, stage)) = stages.next() {
        let next_pipe = if i + 1 < count {
            match internal_pipe(env) {
                Ok(pipe) => Some(pipe),
                Err(e) => {
                    stage.close(env);
                    error = Some(e);
                    break;
                }
            }
        } else {
            None
        };

        let setup = ChildSetup {
            job_control,
            pgid,
            foreground,
            stdin: pipe_reader,
            stdout: next_pipe.map(|(_, writer)| writer),
        };

        match env.system.new_child_process() {
            Ok(ForkResult::Child) => start_child(env, stage, setup),
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(pid = %child, argv = ?stage.argv, "started child process");
                let group = *pgid.get_or_insert(child);
                if job_control {
                    // Also done in the child. Whichever runs first wins.
                    let _ = env.system.setpgid(child, group);
                }
                processes.push(Process::new(child, stage.argv.clone()));
                let fds = setup.stdin.into_iter().chain(setup.stdout);
                for fd in fds.collect::<Vec<_>>() {
                    let _ = env.system.close(fd);
                }
                stage.close(env);
                pipe_reader = next_pipe.map(|(reader, _)| reader);
            }
            Err(errno) => {
                for fd in [pipe_reader, setup.stdout].into_iter().flatten() {
                    let _ = env.system.close(fd);
                }
                if let Some((reader, _)) = next_pipe {
                    let _ = env.system.close(reader);
                }
                pipe_reader = None;
                stage.close(env);
                error = Some(Error::Fork(errno));
                break;
            }
        }
    }

    if let Some(reader) = pipe_reader {
        let _ = env.system.close(reader);
    }
    close_stages(env, stages.map(|(_, stage)| stage));

    let Some(pgid) = pgid else {
        return match error {
            Some(error) => Err(error),
            None => Ok(()),
        };
    };
    let mut job = Job::new(pgid);
    job.job_controlled = job_control;
    job.processes = processes;
    let index = env.jobs.add(job);

    if let Some(error) = error {
        return Err(error);
    }

    env.exit_status = if foreground {
        put_job_in_foreground(env, index, false)
    } else {
        ExitStatus::SUCCESS
    };
    Ok(())
}
