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

//! Job control operations
//!
//! The [job list](lish_env::job::JobList) records the processes the shell has
//! started. This module updates the list from the results of `waitpid` and
//! moves jobs between the foreground and background.
//!
//! Status changes are collected by polling: [`wait_for_job`] blocks until a
//! particular job completes or stops, and [`update_status`] collects all
//! pending changes without blocking. No signal handler is involved.

use lish_env::Env;
use lish_env::io::Fd;
use lish_env::job::Job;
use lish_env::job::Pid;
use lish_env::job::ProcessState;
use lish_env::job::fmt::Report;
use lish_env::job::fmt::Termination;
use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use lish_env::system::Signal;
use lish_env::system::WaitStatus;

/// Applies a wait status to the job list.
///
/// Returns `false` if the status does not describe a state change of a
/// process. A process terminated by a signal is reported to the standard
/// error.
fn apply_wait_status(env: &mut Env, status: WaitStatus) -> bool {
    let Some((pid, state)) = ProcessState::from_wait_status(status) else {
        return false;
    };
    if let ProcessState::Signaled(signal) = state {
        env.print_error(&Termination { pid, signal }.to_string());
    }
    env.jobs.mark_process_status(pid, state);
    true
}

/// Returns the exit status that represents the current state of the job.
///
/// For a stopped job, the result is derived from the signal that stopped the
/// first stopped process. Otherwise, it is the exit status of the last
/// process.
#[must_use]
pub fn job_exit_status(job: &Job) -> ExitStatus {
    if job.is_stopped() {
        if let Some(status) = job
            .processes
            .iter()
            .find(|p| p.state.is_stopped())
            .and_then(|p| p.state.exit_status())
        {
            return status;
        }
    }
    job.exit_status().unwrap_or_default()
}

/// Waits until the last process of the job completes or stops, or the job
/// stops.
///
/// Earlier processes of the pipeline may still be running when this function
/// returns. Status changes of processes in other jobs observed while waiting
/// are recorded as well. If the job is not in the list, this function returns
/// immediately.
pub fn wait_for_job(env: &mut Env, index: usize) {
    loop {
        match env.jobs.get(index) {
            Some(job) if !job.is_last_finished() && !job.is_stopped() => (),
            _ => return,
        }
        match env.system.wait(None, false) {
            Ok(status) => {
                apply_wait_status(env, status);
            }
            Err(errno) => {
                // No child left to wait for. Give up rather than spin.
                tracing::warn!(%errno, index, "cannot wait for job");
                if let Some(job) = env.jobs.get_mut(index) {
                    for process in &mut job.processes {
                        if !process.state.is_completed() && !process.state.is_stopped() {
                            process.state = ProcessState::Exited(ExitStatus::FAILURE);
                        }
                    }
                }
                return;
            }
        }
    }
}

/// Collects pending status changes of all child processes without blocking.
pub fn update_status(env: &mut Env) {
    loop {
        match env.system.wait(None, true) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return,
            Ok(status) => {
                apply_wait_status(env, status);
            }
            Err(errno) => {
                tracing::warn!(%errno, "cannot update job status");
                return;
            }
        }
    }
}

/// Reports jobs whose state has changed.
///
/// This function first [updates the status](update_status) of the jobs. Then,
/// each completed job is reported as `PGID: completed` and removed from the
/// list, and each newly stopped job is reported as `PGID: stopped`. A
/// foreground job the shell has already [awaited](Job::awaited) is removed
/// without a report.
pub fn do_job_notification(env: &mut Env) {
    update_status(env);

    let mut messages = Vec::new();
    let mut completed = Vec::new();
    for (index, job) in env.jobs.iter() {
        if job.is_completed() {
            if !job.awaited {
                messages.push(Report { job }.to_string());
            }
            completed.push(index);
        } else if job.is_stopped() && !job.notified {
            messages.push(Report { job }.to_string());
        }
    }
    for index in completed {
        env.jobs.remove(index);
    }
    for (_, job) in env.jobs.iter_mut() {
        if job.is_stopped() {
            job.notified = true;
        }
    }
    for message in messages {
        env.print_error(&message);
    }
}

/// Marks all processes of the job as running.
pub fn mark_job_as_running(env: &mut Env, index: usize) {
    if let Some(job) = env.jobs.get_mut(index) {
        job.mark_as_running();
    }
}

/// Resumes a stopped job.
///
/// The job is marked as running and put in the foreground or background.
/// Returns the exit status of the job if it was put in the foreground.
pub fn continue_job(env: &mut Env, index: usize, foreground: bool) -> Option<ExitStatus> {
    mark_job_as_running(env, index);
    if foreground {
        Some(put_job_in_foreground(env, index, true))
    } else {
        put_job_in_background(env, index, true);
        None
    }
}

/// Sends `SIGCONT` to the process group of the job.
fn send_sigcont(env: &mut Env, job: &Job) {
    if let Err(errno) = env.system.kill(Pid::from_raw(-job.pgid.as_raw()), Signal::SIGCONT) {
        tracing::warn!(%errno, pgid = %job.pgid, "cannot continue job");
    }
}

/// Switches the foreground process group of the terminal.
fn set_foreground(env: &mut Env, pgid: Pid) {
    if let Err(errno) = env.system.tcsetpgrp(Fd::STDIN, pgid) {
        tracing::warn!(%errno, %pgid, "tcsetpgrp failed");
    }
}

/// Runs the job in the foreground and waits for it.
///
/// If the job has its own process group, the terminal is handed to the job
/// while waiting and taken back afterwards. If `cont` is true, `SIGCONT` is
/// sent to the job first.
///
/// The shell waits until the last process of the job completes or stops.
/// A completed job is removed from the list. A stopped job is reported and
/// kept. A job whose earlier processes are still running is kept and marked
/// [awaited](Job::awaited), so that it is removed silently once they finish.
/// The result is the [exit status](job_exit_status) of the job.
pub fn put_job_in_foreground(env: &mut Env, index: usize, cont: bool) -> ExitStatus {
    let Some(job) = env.jobs.get(index).cloned() else {
        return ExitStatus::SUCCESS;
    };
    let controlled = job.job_controlled && env.controls_jobs();
    if controlled {
        set_foreground(env, job.pgid);
    }
    if cont && job.job_controlled {
        send_sigcont(env, &job);
    }

    wait_for_job(env, index);

    if controlled {
        let main_pgid = env.main_pgid;
        set_foreground(env, main_pgid);
    }

    let Some(job) = env.jobs.get_mut(index) else {
        return ExitStatus::SUCCESS;
    };
    let exit_status = job_exit_status(job);
    if job.is_completed() {
        env.jobs.remove(index);
    } else if job.is_stopped() {
        job.notified = true;
        let message = Report { job }.to_string();
        env.print_error(&message);
    } else {
        job.awaited = true;
    }
    exit_status
}

/// Lets the job continue in the background.
///
/// If `cont` is true, `SIGCONT` is sent to the job.
pub fn put_job_in_background(env: &mut Env, index: usize, cont: bool) {
    if !cont {
        return;
    }
    if let Some(job) = env.jobs.get(index).cloned() {
        if job.job_controlled {
            send_sigcont(env, &job);
        }
    }
}
