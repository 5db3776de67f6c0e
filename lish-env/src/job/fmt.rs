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

//! Job report formatting
//!
//! The shell prints a report to the standard error when it notices that a job
//! has completed or stopped. A [`Report`] formats such a job as the process
//! group ID followed by the new state:
//!
//! ```text
//! 24437: completed
//! 24440: stopped
//! ```
//!
//! A process terminated by a signal is reported separately with a
//! [`Termination`]:
//!
//! ```text
//! 24438: Terminated by signal 15
//! ```
//!
//! ```
//! use lish_env::job::{Job, Pid};
//! use lish_env::job::fmt::Report;
//! let job = Job::new(Pid::from_raw(123));
//! assert_eq!(Report { job: &job }.to_string(), "123: completed");
//! ```

use super::Job;
use super::Pid;
use super::ProcessState;
use super::Signal;
use crate::semantics::ExitStatus;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Formats a process state into a string.
///
/// - `Running` for a running process
/// - `Stopped(SIG…)` for a stopped process
/// - `Done` or `Done(…)` for a process that exited with the exit status
/// - `Killed(SIG…)` for a process terminated by the signal
impl Display for ProcessState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Running => "Running".fmt(f),
            Self::Exited(ExitStatus::SUCCESS) => "Done".fmt(f),
            Self::Exited(exit_status) => write!(f, "Done({exit_status})"),
            Self::Stopped(signal) => write!(f, "Stopped({signal})"),
            Self::Signaled(signal) => write!(f, "Killed({signal})"),
        }
    }
}

/// Wrapper for printing a job status change notification
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    pub job: &'a Job,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let state = if self.job.is_completed() {
            "completed"
        } else if self.job.is_stopped() {
            "stopped"
        } else {
            "running"
        };
        write!(f, "{}: {state}", self.job.pgid)
    }
}

/// Wrapper for printing the termination of a process by a signal
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Termination {
    pub pid: Pid,
    pub signal: Signal,
}

impl Display for Termination {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: Terminated by signal {}", self.pid, self.signal as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Process;
    use super::*;

    #[test]
    fn process_state_display() {
        assert_eq!(ProcessState::Running.to_string(), "Running");
        assert_eq!(ProcessState::Exited(ExitStatus(0)).to_string(), "Done");
        assert_eq!(ProcessState::Exited(ExitStatus(3)).to_string(), "Done(3)");
        assert_eq!(
            ProcessState::Stopped(Signal::SIGTSTP).to_string(),
            "Stopped(SIGTSTP)"
        );
        assert_eq!(
            ProcessState::Signaled(Signal::SIGKILL).to_string(),
            "Killed(SIGKILL)"
        );
    }

    #[test]
    fn report_display() {
        let mut job = Job::new(Pid::from_raw(42));
        job.processes.push(Process::new(Pid::from_raw(42), vec![]));
        assert_eq!(Report { job: &job }.to_string(), "42: running");

        job.processes[0].state = ProcessState::Stopped(Signal::SIGTTIN);
        assert_eq!(Report { job: &job }.to_string(), "42: stopped");

        job.processes[0].state = ProcessState::Exited(ExitStatus(1));
        assert_eq!(Report { job: &job }.to_string(), "42: completed");
    }

    #[test]
    fn termination_display() {
        let termination = Termination {
            pid: Pid::from_raw(7),
            signal: Signal::SIGTERM,
        };
        assert_eq!(termination.to_string(), "7: Terminated by signal 15");
    }
}
