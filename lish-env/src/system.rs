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

//! API declarations and implementations for system-managed parts of the
//! environment
//!
//! The [`System`] trait defines a collection of methods to access the
//! underlying operating system from the shell as an application program. There
//! are two substantial implementors for this trait: [`RealSystem`] and
//! [`VirtualSystem`].
//!
//! [`RealSystem`]: real::RealSystem
//! [`VirtualSystem`]: r#virtual::VirtualSystem

pub mod real;
pub mod r#virtual;

use crate::io::Fd;
use crate::io::MIN_INTERNAL_FD;
use crate::semantics::ExitStatus;
#[doc(no_inline)]
pub use nix::errno::Errno;
#[doc(no_inline)]
pub use nix::fcntl::OFlag;
#[doc(no_inline)]
pub use nix::sys::signal::Signal;
#[doc(no_inline)]
pub use nix::sys::stat::Mode;
#[doc(no_inline)]
pub use nix::sys::wait::WaitStatus;
#[doc(no_inline)]
pub use nix::unistd::ForkResult;
#[doc(no_inline)]
pub use nix::unistd::Pid;
use std::convert::Infallible;
use std::ffi::CStr;
use std::ffi::CString;
use std::fmt::Debug;
use std::path::PathBuf;

/// Result type for system calls
pub type Result<T> = std::result::Result<T, Errno>;

/// How a signal is handled
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SignalHandling {
    /// The default action of the signal is taken.
    #[default]
    Default,
    /// The signal is ignored.
    Ignore,
}

/// API to the system-managed parts of the environment.
///
/// Most methods are thin wrappers around the system call of the same name.
/// Errors are reported as the [`Errno`] set by the system call.
pub trait System: Debug {
    /// Whether there is an executable regular file at the specified path.
    fn is_executable_file(&self, path: &CStr) -> bool;

    /// Whether there is a directory at the specified path.
    fn is_directory(&self, path: &CStr) -> bool;

    /// Creates an unnamed pipe.
    ///
    /// If successful, returns the reading and writing ends of the pipe.
    fn pipe(&mut self) -> Result<(Fd, Fd)>;

    /// Duplicates a file descriptor.
    ///
    /// This is a thin wrapper around the `fcntl` system call that opens a new
    /// FD that shares the open file description with `from`. The new FD will be
    /// the minimum unused FD not less than `to_min`. The `cloexec` parameter
    /// specifies whether the new FD should have the `CLOEXEC` flag set.
    fn dup(&mut self, from: Fd, to_min: Fd, cloexec: bool) -> Result<Fd>;

    /// Duplicates a file descriptor.
    ///
    /// This is a thin wrapper around the `dup2` system call. If successful,
    /// returns `Ok(to)`.
    fn dup2(&mut self, from: Fd, to: Fd) -> Result<Fd>;

    /// Opens a file descriptor.
    fn open(&mut self, path: &CStr, option: OFlag, mode: Mode) -> Result<Fd>;

    /// Closes a file descriptor.
    ///
    /// This function returns `Ok(())` when the FD is already closed.
    fn close(&mut self, fd: Fd) -> Result<()>;

    /// Reads from the file descriptor.
    ///
    /// If successful, returns the number of bytes read.
    fn read(&mut self, fd: Fd, buffer: &mut [u8]) -> Result<usize>;

    /// Writes to the file descriptor.
    ///
    /// If successful, returns the number of bytes written, which may be less
    /// than the length of the buffer. See [`SystemEx::write_all`].
    fn write(&mut self, fd: Fd, buffer: &[u8]) -> Result<usize>;

    /// Tests if a file descriptor is associated with a terminal device.
    fn isatty(&self, fd: Fd) -> bool;

    /// Returns the process ID of the current process.
    fn getpid(&self) -> Pid;

    /// Returns the process group ID of the current process.
    fn getpgrp(&self) -> Pid;

    /// Modifies the process group ID of a process.
    ///
    /// A zero `pid` means the current process, and a zero `pgid` means the
    /// process ID of the target process.
    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()>;

    /// Returns the foreground process group ID of the terminal.
    fn tcgetpgrp(&self, fd: Fd) -> Result<Pid>;

    /// Switches the foreground process group of the terminal.
    fn tcsetpgrp(&mut self, fd: Fd, pgid: Pid) -> Result<()>;

    /// Changes how a signal is handled.
    ///
    /// Returns the previous handling.
    fn sigaction(&mut self, signal: Signal, action: SignalHandling) -> Result<SignalHandling>;

    /// Sends a signal.
    ///
    /// A negative `target` sends the signal to the process group.
    fn kill(&mut self, target: Pid, signal: Signal) -> Result<()>;

    /// Creates a new child process.
    ///
    /// This is a thin wrapper around the `fork` system call. The function
    /// returns in both the parent and the child.
    fn new_child_process(&mut self) -> Result<ForkResult>;

    /// Waits for a child process to change its state.
    ///
    /// If `target` is `None`, any child is waited for. Stopped processes are
    /// reported as well as terminated ones. If `nohang` is true and no child
    /// has changed its state, the result is [`WaitStatus::StillAlive`].
    fn wait(&mut self, target: Option<Pid>, nohang: bool) -> Result<WaitStatus>;

    /// Replaces the current process with an external utility.
    ///
    /// This function returns only on failure.
    fn execve(&mut self, path: &CStr, args: &[CString], envs: &[CString]) -> Result<Infallible>;

    /// Terminates the current process immediately.
    ///
    /// This is a thin wrapper around `_exit`, used in child processes.
    fn exit(&mut self, exit_status: ExitStatus) -> !;

    /// Returns the current working directory.
    fn getcwd(&self) -> Result<PathBuf>;

    /// Changes the current working directory.
    fn chdir(&mut self, path: &CStr) -> Result<()>;

    /// Returns the default value of `PATH` reported by `confstr`.
    fn confstr_path(&self) -> Result<String>;
}

/// Extension of [`System`] with convenience functions
pub trait SystemEx: System {
    /// Writes the whole buffer to the file descriptor.
    ///
    /// This function calls [`System::write`] repeatedly until the whole
    /// buffer is written, retrying on `EINTR`.
    fn write_all(&mut self, fd: Fd, mut buffer: &[u8]) -> Result<()> {
        while !buffer.is_empty() {
            match self.write(fd, buffer) {
                Ok(0) => return Err(Errno::EIO),
                Ok(count) => buffer = &buffer[count..],
                Err(Errno::EINTR) => (),
                Err(errno) => return Err(errno),
            }
        }
        Ok(())
    }

    /// Moves a file descriptor to [`MIN_INTERNAL_FD`] or larger.
    ///
    /// This function duplicates `from` with the `CLOEXEC` flag and closes the
    /// original. If successful, returns the new FD.
    fn move_fd_internal(&mut self, from: Fd) -> Result<Fd> {
        let new = self.dup(from, MIN_INTERNAL_FD, true)?;
        self.close(from)?;
        Ok(new)
    }
}

impl<T: System + ?Sized> SystemEx for T {}
