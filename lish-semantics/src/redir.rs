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

//! Redirection
//!
//! A simple command has at most one input and one output [`Redirection`]. An
//! input redirection opens the target file for reading; an output
//! redirection creates or truncates the target file for writing, with
//! permissions `rwx------` when created.
//!
//! [`open_redirection`] opens the target file at an internal file descriptor,
//! that is, one not less than [`MIN_INTERNAL_FD`] with the close-on-exec
//! flag. A child process that runs an external utility moves the descriptor
//! to the standard input or output before `execve`.
//!
//! A built-in run in the shell process itself uses a [`RedirGuard`], which
//! saves the original standard input or output and restores it when the
//! guard is dropped.

use crate::error::Error;
use crate::error::Result;
use crate::expansion::expand_word;
use lish_env::Env;
use lish_env::SystemEx as _;
use lish_env::io::Fd;
use lish_env::io::MIN_INTERNAL_FD;
use lish_env::system::Errno;
use lish_env::system::Mode;
use lish_env::system::OFlag;
use lish_syntax::syntax::RedirDirection;
use lish_syntax::syntax::Redirection;
use std::ffi::CString;
use std::ops::Deref;
use std::ops::DerefMut;

/// Returns the file descriptor a redirection replaces.
#[must_use]
pub fn target_fd(direction: RedirDirection) -> Fd {
    match direction {
        RedirDirection::Input => Fd::STDIN,
        RedirDirection::Output => Fd::STDOUT,
    }
}

/// Redirection whose target file has been opened
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenRedir {
    /// Internal file descriptor for the target file
    pub fd: Fd,
    /// File descriptor to be replaced with `fd`
    pub target: Fd,
    /// Expanded pathname of the target file
    pub path: String,
}

/// Opens the target file of a redirection.
///
/// If successful, the result contains an internal file descriptor for the
/// file.
pub fn open_redirection(env: &mut Env, redir: &Redirection) -> Result<OpenRedir> {
    let path = expand_word(env, &redir.target);
    let Ok(c_path) = CString::new(path.as_str()) else {
        return Err(Error::NulByte(path));
    };
    let (flags, mode) = match redir.direction {
        RedirDirection::Input => (OFlag::O_RDONLY, Mode::empty()),
        RedirDirection::Output => (
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            Mode::S_IRWXU,
        ),
    };
    tracing::debug!(direction = ?redir.direction, %path, "open redirection");
    let result = env
        .system
        .open(&c_path, flags | OFlag::O_CLOEXEC, mode)
        .and_then(|fd| env.system.move_fd_internal(fd));
    match result {
        Ok(fd) => Ok(OpenRedir {
            fd,
            target: target_fd(redir.direction),
            path,
        }),
        Err(errno) => Err(Error::Redirection { path, errno }),
    }
}

/// Record of a file descriptor modified by a redirection
#[derive(Clone, Copy, Debug)]
struct SavedFd {
    /// File descriptor modified by the redirection
    original: Fd,
    /// Copy of the original open file description, if it was open
    save: Option<Fd>,
}

/// `Env` wrapper for performing redirections.
///
/// This is an RAII-style wrapper of [`Env`] in which redirections are
/// performed. A `RedirGuard` keeps track of file descriptors affected by
/// redirections so that it can restore them when dropped.
#[derive(Debug)]
pub struct RedirGuard<'e> {
    /// Environment in which redirections are performed.
    env: &'e mut Env,
    /// Records of file descriptors that have been modified by redirections.
    saved_fds: Vec<SavedFd>,
}

impl Deref for RedirGuard<'_> {
    type Target = Env;
    fn deref(&self) -> &Env {
        self.env
    }
}

impl DerefMut for RedirGuard<'_> {
    fn deref_mut(&mut self) -> &mut Env {
        self.env
    }
}

impl Drop for RedirGuard<'_> {
    fn drop(&mut self) {
        self.undo_redirs()
    }
}

impl<'e> RedirGuard<'e> {
    /// Creates a new `RedirGuard`.
    pub fn new(env: &'e mut Env) -> Self {
        let saved_fds = Vec::new();
        RedirGuard { env, saved_fds }
    }

    /// Replaces `target` with `fd`.
    ///
    /// The open file description at `target` is saved to be restored later.
    /// `fd` is left open.
    pub fn redirect(&mut self, fd: Fd, target: Fd) -> std::result::Result<(), Errno> {
        let system = &mut self.env.system;
        let save = match system.dup(target, MIN_INTERNAL_FD, true) {
            Ok(save) => Some(save),
            Err(Errno::EBADF) => None,
            Err(errno) => return Err(errno),
        };
        if let Err(errno) = system.dup2(fd, target) {
            if let Some(save) = save {
                let _ = system.close(save);
            }
            return Err(errno);
        }
        self.saved_fds.push(SavedFd {
            original: target,
            save,
        });
        Ok(())
    }

    /// Applies an opened redirection.
    ///
    /// The internal file descriptor of the redirection is closed whether or
    /// not this function succeeds.
    pub fn apply(&mut self, redir: OpenRedir) -> Result {
        let OpenRedir { fd, target, path } = redir;
        let result = self.redirect(fd, target);
        let _ = self.env.system.close(fd);
        result.map_err(|errno| Error::Redirection { path, errno })
    }

    /// Performs a redirection.
    pub fn perform_redir(&mut self, redir: &Redirection) -> Result {
        let redir = open_redirection(self.env, redir)?;
        self.apply(redir)
    }

    /// Performs redirections.
    ///
    /// If the redirection fails for an item, the remainders are ignored, but
    /// the effects of the preceding items are not canceled.
    pub fn perform_redirs<'a, I>(&mut self, redirs: I) -> Result
    where
        I: IntoIterator<Item = &'a Redirection>,
    {
        redirs
            .into_iter()
            .try_for_each(|redir| self.perform_redir(redir))
    }

    /// Undoes the effect of the redirections.
    ///
    /// This function restores the file descriptors affected by redirections to
    /// the original state and closes internal backing file descriptors, which
    /// were used for restoration and are no longer needed.
    pub fn undo_redirs(&mut self) {
        for SavedFd { original, save } in self.saved_fds.drain(..).rev() {
            if let Some(save) = save {
                let _ = self.env.system.dup2(save, original);
                let _ = self.env.system.close(save);
            } else {
                let _ = self.env.system.close(original);
            }
        }
    }
}
