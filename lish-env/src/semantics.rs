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

//! Type definitions for command execution.

use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use std::ffi::c_int;

/// Number that summarizes the result of command execution.
///
/// An exit status is an integer returned from a utility (or command) when
/// executed. It usually is a summarized result of the execution. Many
/// utilities return an exit status of zero when successful and non-zero
/// otherwise.
///
/// In the shell language, the special parameter `$?` expands to the exit status
/// of the last executed command. Exit statuses also affect the behavior of the
/// `if` and `while` compound commands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub c_int);

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<c_int> for ExitStatus {
    fn from(value: c_int) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for c_int {
    fn from(exit_status: ExitStatus) -> c_int {
        exit_status.0
    }
}

/// Offset added to a signal number to make the exit status of a process
/// terminated or stopped by the signal
pub const SIGNAL_OFFSET: c_int = 128;

/// Converts a signal to the corresponding exit status.
///
/// The result is `128 + signal_number`.
impl From<Signal> for ExitStatus {
    fn from(signal: Signal) -> Self {
        Self(SIGNAL_OFFSET + signal as c_int)
    }
}

/// Error returned when a [`WaitStatus`] could not be converted to an
/// [`ExitStatus`]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StillAliveError;

/// Converts a `WaitStatus` to an `ExitStatus` if the status is `Exited`,
/// `Signaled`, or `Stopped`.
impl TryFrom<WaitStatus> for ExitStatus {
    type Error = StillAliveError;
    fn try_from(status: WaitStatus) -> Result<Self, StillAliveError> {
        match status {
            WaitStatus::Exited(_, exit_status) => Ok(ExitStatus(exit_status)),
            WaitStatus::Signaled(_, signal, _) | WaitStatus::Stopped(_, signal) => {
                Ok(ExitStatus::from(signal))
            }
            _ => Err(StillAliveError),
        }
    }
}

impl ExitStatus {
    /// Exit status of 0: success
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of 1: failure
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status of 2: error severer than failure
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Exit status of 126: command not executable
    pub const NOEXEC: ExitStatus = ExitStatus(126);

    /// Exit status of 127: command not found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Returns true if and only if `self` is zero.
    pub const fn is_successful(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::Pid;

    #[test]
    fn exit_status_from_signal() {
        assert_eq!(ExitStatus::from(Signal::SIGKILL), ExitStatus(137));
        assert_eq!(ExitStatus::from(Signal::SIGHUP), ExitStatus(129));
    }

    #[test]
    fn exit_status_from_wait_status() {
        let pid = Pid::from_raw(10);
        assert_eq!(
            ExitStatus::try_from(WaitStatus::Exited(pid, 42)),
            Ok(ExitStatus(42))
        );
        assert_eq!(
            ExitStatus::try_from(WaitStatus::Signaled(pid, Signal::SIGTERM, false)),
            Ok(ExitStatus(143))
        );
        assert_eq!(
            ExitStatus::try_from(WaitStatus::Stopped(pid, Signal::SIGTSTP)),
            Ok(ExitStatus::from(Signal::SIGTSTP))
        );
        assert_eq!(
            ExitStatus::try_from(WaitStatus::StillAlive),
            Err(StillAliveError)
        );
    }

    #[test]
    fn exit_status_is_successful() {
        assert!(ExitStatus::SUCCESS.is_successful());
        assert!(!ExitStatus::FAILURE.is_successful());
        assert!(!ExitStatus::NOT_FOUND.is_successful());
    }
}
