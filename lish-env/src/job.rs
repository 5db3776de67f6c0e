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

//! Type definitions for job management.
//!
//! A [`JobList`] manages the state of jobs executed by the shell.
//! Each [`Job`] in the job list corresponds to a pipeline executed
//! asynchronously or stopped in the foreground, and holds one [`Process`]
//! for each command of the pipeline.
//!
//! When job control is active, all processes of a job share one process
//! group whose ID is the process ID of the first process. The job list is a
//! slab of jobs searched by the process group ID.
//!
//! A job is removed from the list once it has completed and its completion
//! has been reported to the user. The operations that wait for and report
//! status changes are defined in the `lish-semantics` crate; this module
//! only updates the recorded states.

use crate::semantics::ExitStatus;
#[doc(no_inline)]
pub use nix::sys::signal::Signal;
#[doc(no_inline)]
pub use nix::sys::wait::WaitStatus;
#[doc(no_inline)]
pub use nix::unistd::Pid;
use slab::Slab;

pub mod fmt;

/// Execution state of a process
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ProcessState {
    /// The process is running.
    Running,
    /// The process has been stopped by the signal.
    Stopped(Signal),
    /// The process has exited with the exit status.
    Exited(ExitStatus),
    /// The process has been terminated by the signal.
    Signaled(Signal),
}

impl ProcessState {
    /// Converts a wait status into the ID of the changed process and its new
    /// state.
    ///
    /// Returns `None` if the status does not describe a state change.
    #[must_use]
    pub fn from_wait_status(status: WaitStatus) -> Option<(Pid, Self)> {
        match status {
            WaitStatus::Exited(pid, code) => Some((pid, Self::Exited(ExitStatus(code)))),
            WaitStatus::Signaled(pid, signal, _) => Some((pid, Self::Signaled(signal))),
            WaitStatus::Stopped(pid, signal) => Some((pid, Self::Stopped(signal))),
            WaitStatus::Continued(pid) => Some((pid, Self::Running)),
            _ => None,
        }
    }

    /// Whether the process has finished, either by exiting or by a signal.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Exited(_) | Self::Signaled(_))
    }

    /// Whether the process is stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }

    /// Returns the exit status the shell reports for this state.
    ///
    /// A process terminated or stopped by a signal yields 128 plus the signal
    /// number. Returns `None` for a running process.
    #[must_use]
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match *self {
            Self::Running => None,
            Self::Exited(exit_status) => Some(exit_status),
            Self::Stopped(signal) | Self::Signaled(signal) => Some(signal.into()),
        }
    }
}

/// Child process of the shell that runs one command of a pipeline
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Process {
    /// Expanded command name and arguments, used in reports
    pub argv: Vec<String>,
    /// Process ID
    pub pid: Pid,
    /// Current state
    pub state: ProcessState,
}

impl Process {
    /// Creates a running process.
    #[must_use]
    pub fn new(pid: Pid, argv: Vec<String>) -> Self {
        Process {
            argv,
            pid,
            state: ProcessState::Running,
        }
    }
}

/// Set of processes executing a pipeline
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Job {
    /// Process group ID
    ///
    /// If job control is not active, this is the process ID of the first
    /// process, which is not a process group leader.
    pub pgid: Pid,

    /// Processes in the order of the pipeline
    pub processes: Vec<Process>,

    /// Whether the latest state change has been reported to the user
    pub notified: bool,

    /// Whether the job was started with job control active, that is, whether
    /// it has its own process group
    pub job_controlled: bool,

    /// Whether the shell has finished waiting for the job in the foreground
    ///
    /// The last process of such a job has completed, but earlier processes
    /// of the pipeline may still be running. Their completion is not
    /// reported.
    pub awaited: bool,
}

impl Job {
    /// Creates a new job with no processes.
    #[must_use]
    pub fn new(pgid: Pid) -> Self {
        Job {
            pgid,
            processes: Vec::new(),
            notified: false,
            job_controlled: false,
            awaited: false,
        }
    }

    /// Whether all processes of the job have completed.
    ///
    /// A job without processes is considered completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.processes.iter().all(|p| p.state.is_completed())
    }

    /// Whether the job is stopped.
    ///
    /// A job is stopped if all its processes have completed or stopped and
    /// at least one of them is stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.state.is_completed() || p.state.is_stopped())
            && self.processes.iter().any(|p| p.state.is_stopped())
    }

    /// Whether the last process of the job has completed or stopped.
    ///
    /// A job without processes is considered finished.
    #[must_use]
    pub fn is_last_finished(&self) -> bool {
        self.processes
            .last()
            .is_none_or(|p| p.state.is_completed() || p.state.is_stopped())
    }

    /// Returns the exit status of the last process.
    ///
    /// Returns `None` if the last process is running or there are no
    /// processes.
    #[must_use]
    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.processes.last()?.state.exit_status()
    }

    /// Updates the state of the process with the given process ID.
    ///
    /// Returns `true` if the job contains the process. The `notified` flag
    /// is cleared when the state changes.
    pub fn mark_process_status(&mut self, pid: Pid, state: ProcessState) -> bool {
        let Some(process) = self.processes.iter_mut().find(|p| p.pid == pid) else {
            return false;
        };
        if process.state != state {
            process.state = state;
            self.notified = false;
        }
        true
    }

    /// Resets the state of stopped processes to running.
    pub fn mark_as_running(&mut self) {
        for process in &mut self.processes {
            if process.state.is_stopped() {
                process.state = ProcessState::Running;
            }
        }
        self.notified = false;
    }

    /// Returns the command line of the job, as the arguments of the
    /// processes joined with spaces and pipes.
    #[must_use]
    pub fn name(&self) -> String {
        use itertools::Itertools as _;
        self.processes
            .iter()
            .map(|p| p.argv.join(" "))
            .join(" | ")
    }
}

/// Collection of jobs
#[derive(Clone, Debug, Default)]
pub struct JobList {
    jobs: Slab<Job>,
}

impl JobList {
    /// Creates an empty job list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job to the list and returns its index.
    pub fn add(&mut self, job: Job) -> usize {
        tracing::debug!(pgid = %job.pgid, "adding job");
        self.jobs.insert(job)
    }

    /// Returns the job at the index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Returns the job at the index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Job> {
        self.jobs.get_mut(index)
    }

    /// Removes the job at the index.
    pub fn remove(&mut self, index: usize) -> Option<Job> {
        self.jobs.try_remove(index)
    }

    /// Returns the number of jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the list has no jobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Returns an iterator of indices and jobs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Job)> {
        self.jobs.iter()
    }

    /// Returns an iterator of indices and mutable references to jobs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Job)> {
        self.jobs.iter_mut()
    }

    /// Finds the index of the job with the process group ID.
    #[must_use]
    pub fn find_job(&self, pgid: Pid) -> Option<usize> {
        self.jobs
            .iter()
            .find(|(_, job)| job.pgid == pgid)
            .map(|(index, _)| index)
    }

    /// Finds the index of the job containing the process.
    #[must_use]
    pub fn find_process(&self, pid: Pid) -> Option<usize> {
        self.jobs
            .iter()
            .find(|(_, job)| job.processes.iter().any(|p| p.pid == pid))
            .map(|(index, _)| index)
    }

    /// Updates the state of a process in whichever job contains it.
    ///
    /// Returns `false` if no job contains the process.
    pub fn mark_process_status(&mut self, pid: Pid, state: ProcessState) -> bool {
        let found = self
            .jobs
            .iter_mut()
            .any(|(_, job)| job.mark_process_status(pid, state));
        if !found {
            tracing::trace!(%pid, ?state, "status of unknown process");
        }
        found
    }
}
