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

//! Implementation of `System` that actually interacts with the system.
//!
//! This module is implemented on Unix-like targets only. Most of the methods
//! are thin wrappers around the `nix` and `libc` functions of the same name.

use super::Errno;
use super::ExitStatus;
use super::Fd;
use super::ForkResult;
use super::Mode;
use super::OFlag;
use super::Pid;
use super::Result;
use super::Signal;
use super::SignalHandling;
use super::System;
use super::WaitStatus;
use nix::sys::signal::SaFlags;
use nix::sys::signal::SigAction;
use nix::sys::signal::SigHandler;
use nix::sys::signal::SigSet;
use nix::sys::wait::WaitPidFlag;
use std::convert::Infallible;
use std::ffi::CStr;
use std::ffi::CString;
use std::ffi::c_uint;
use std::os::fd::IntoRawFd as _;
use std::path::PathBuf;

/// Retries the operation while it fails with `EINTR`.
fn retry<T, F: FnMut() -> Result<T>>(mut f: F) -> Result<T> {
    loop {
        match f() {
            Err(Errno::EINTR) => (),
            other => return other,
        }
    }
}

/// Returns the file type bits of the file at the path.
fn file_type(path: &CStr) -> Option<libc::mode_t> {
    nix::sys::stat::stat(path)
        .ok()
        .map(|stat| stat.st_mode & libc::S_IFMT)
}

/// Tests whether the current process may execute the file at the path.
fn is_executable(path: &CStr) -> bool {
    // SAFETY: the path is a valid nul-terminated string.
    let result = unsafe {
        libc::faccessat(libc::AT_FDCWD, path.as_ptr(), libc::X_OK, libc::AT_EACCESS)
    };
    result == 0
}

/// Implementation of `System` that actually interacts with the system.
///
/// `RealSystem` has no state at the Rust level because the relevant state of
/// the environment is managed by the underlying operating system.
#[derive(Debug)]
pub struct RealSystem(());

impl RealSystem {
    /// Returns an instance of `RealSystem`.
    ///
    /// # Safety
    ///
    /// This function is marked `unsafe` because improper use of `RealSystem`
    /// may lead to undefined behavior. Remember that most operations performed
    /// on the system by [`Env`](crate::Env) are not thread-safe. You should
    /// never use `RealSystem` in a multi-threaded program, and it is your
    /// responsibility to make sure you are using only one instance of
    /// `RealSystem` in the process.
    pub unsafe fn new() -> Self {
        RealSystem(())
    }
}

impl System for RealSystem {
    fn is_executable_file(&self, path: &CStr) -> bool {
        file_type(path) == Some(libc::S_IFREG) && is_executable(path)
    }

    fn is_directory(&self, path: &CStr) -> bool {
        file_type(path) == Some(libc::S_IFDIR)
    }

    fn pipe(&mut self) -> Result<(Fd, Fd)> {
        let (reader, writer) = nix::unistd::pipe()?;
        Ok((Fd(reader.into_raw_fd()), Fd(writer.into_raw_fd())))
    }

    fn dup(&mut self, from: Fd, to_min: Fd, cloexec: bool) -> Result<Fd> {
        let command = if cloexec {
            libc::F_DUPFD_CLOEXEC
        } else {
            libc::F_DUPFD
        };
        // SAFETY: F_DUPFD(_CLOEXEC) takes an integer argument.
        let fd = unsafe { libc::fcntl(from.0, command, to_min.0) };
        Errno::result(fd).map(Fd)
    }

    fn dup2(&mut self, from: Fd, to: Fd) -> Result<Fd> {
        // SAFETY: dup2 does not touch memory.
        retry(|| Errno::result(unsafe { libc::dup2(from.0, to.0) }).map(Fd))
    }

    fn open(&mut self, path: &CStr, option: OFlag, mode: Mode) -> Result<Fd> {
        let mode = mode.bits() as c_uint;
        retry(|| {
            // SAFETY: the path is a valid nul-terminated string.
            let fd = unsafe { libc::open(path.as_ptr(), option.bits(), mode) };
            Errno::result(fd).map(Fd)
        })
    }

    fn close(&mut self, fd: Fd) -> Result<()> {
        // SAFETY: closing an FD does not touch memory. The caller owns the FD.
        match retry(|| Errno::result(unsafe { libc::close(fd.0) })) {
            Ok(_) | Err(Errno::EBADF) => Ok(()),
            Err(errno) => Err(errno),
        }
    }

    fn read(&mut self, fd: Fd, buffer: &mut [u8]) -> Result<usize> {
        // SAFETY: the buffer is valid for writes of its length.
        let count = unsafe { libc::read(fd.0, buffer.as_mut_ptr().cast(), buffer.len()) };
        Errno::result(count).map(|count| count as usize)
    }

    fn write(&mut self, fd: Fd, buffer: &[u8]) -> Result<usize> {
        // SAFETY: the buffer is valid for reads of its length.
        let count = unsafe { libc::write(fd.0, buffer.as_ptr().cast(), buffer.len()) };
        Errno::result(count).map(|count| count as usize)
    }

    fn isatty(&self, fd: Fd) -> bool {
        // SAFETY: isatty does not touch memory.
        unsafe { libc::isatty(fd.0) != 0 }
    }

    fn getpid(&self) -> Pid {
        nix::unistd::getpid()
    }

    fn getpgrp(&self) -> Pid {
        nix::unistd::getpgrp()
    }

    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()> {
        nix::unistd::setpgid(pid, pgid)
    }

    fn tcgetpgrp(&self, fd: Fd) -> Result<Pid> {
        // SAFETY: tcgetpgrp does not touch memory.
        Errno::result(unsafe { libc::tcgetpgrp(fd.0) }).map(Pid::from_raw)
    }

    fn tcsetpgrp(&mut self, fd: Fd, pgid: Pid) -> Result<()> {
        // SAFETY: tcsetpgrp does not touch memory.
        Errno::result(unsafe { libc::tcsetpgrp(fd.0, pgid.as_raw()) }).map(drop)
    }

    fn sigaction(&mut self, signal: Signal, action: SignalHandling) -> Result<SignalHandling> {
        let handler = match action {
            SignalHandling::Default => SigHandler::SigDfl,
            SignalHandling::Ignore => SigHandler::SigIgn,
        };
        let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());
        // SAFETY: no signal-catching function is installed.
        let old = unsafe { nix::sys::signal::sigaction(signal, &action) }?;
        Ok(match old.handler() {
            SigHandler::SigIgn => SignalHandling::Ignore,
            _ => SignalHandling::Default,
        })
    }

    fn kill(&mut self, target: Pid, signal: Signal) -> Result<()> {
        nix::sys::signal::kill(target, signal)
    }

    fn new_child_process(&mut self) -> Result<ForkResult> {
        // SAFETY: the shell is single-threaded, so the child can safely run
        // arbitrary code until it calls execve or _exit.
        unsafe { nix::unistd::fork() }
    }

    fn wait(&mut self, target: Option<Pid>, nohang: bool) -> Result<WaitStatus> {
        let mut flags = WaitPidFlag::WUNTRACED;
        if nohang {
            flags |= WaitPidFlag::WNOHANG;
        }
        let result = retry(|| nix::sys::wait::waitpid(target, Some(flags)));
        tracing::trace!(?target, nohang, ?result, "waitpid");
        result
    }

    fn execve(&mut self, path: &CStr, args: &[CString], envs: &[CString]) -> Result<Infallible> {
        retry(|| nix::unistd::execve(path, args, envs))
    }

    fn exit(&mut self, exit_status: ExitStatus) -> ! {
        // SAFETY: _exit terminates the process immediately and is safe to call
        // in a forked child as well as in the main shell process.
        unsafe { libc::_exit(exit_status.0) }
    }

    fn getcwd(&self) -> Result<PathBuf> {
        nix::unistd::getcwd()
    }

    fn chdir(&mut self, path: &CStr) -> Result<()> {
        nix::unistd::chdir(path)
    }

    fn confstr_path(&self) -> Result<String> {
        // SAFETY: a null buffer of length zero only queries the size.
        let len = unsafe { libc::confstr(libc::_CS_PATH, std::ptr::null_mut(), 0) };
        if len == 0 {
            return Err(Errno::last());
        }
        let mut buffer = vec![0u8; len];
        // SAFETY: the buffer is valid for writes of `len` bytes.
        let len = unsafe { libc::confstr(libc::_CS_PATH, buffer.as_mut_ptr().cast(), len) };
        if len == 0 {
            return Err(Errno::last());
        }
        let value = CStr::from_bytes_until_nul(&buffer).map_err(|_| Errno::EINVAL)?;
        Ok(value.to_string_lossy().into_owned())
    }
}
