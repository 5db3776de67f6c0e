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

//! System simulated in Rust.
//!
//! [`VirtualSystem`] is a pure Rust implementation of [`System`] that simulates
//! the behavior of the underlying system without any interaction with the
//! actual system. `VirtualSystem` is used for testing the behavior of the shell
//! in unit tests.
//!
//! # File system
//!
//! Only regular files and directories are supported. Files are kept in a flat
//! map keyed by normalized absolute path; a directory exists only if it has
//! been added explicitly. Symbolic links are not simulated.
//!
//! The standard input, output, and error are regular files at `/dev/stdin`,
//! `/dev/stdout`, and `/dev/stderr`, which are open as FDs 0, 1, and 2 in a
//! new virtual system.
//!
//! # Processes
//!
//! A virtual system has only one process. Creating a child process fails with
//! `ENOSYS`, so tests of external utilities belong to the integration tests
//! that run the real binary.

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
use std::cell::Ref;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::ffi::CStr;
use std::ffi::CString;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt as _;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

/// Filetype-specific content of a file
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileBody {
    /// Regular file
    Regular {
        /// File content
        content: Vec<u8>,
        /// Whether this file can be found and executed as a command
        is_native_executable: bool,
    },
    /// Directory
    Directory,
}

impl Default for FileBody {
    fn default() -> Self {
        FileBody::Regular {
            content: Vec::new(),
            is_native_executable: false,
        }
    }
}

/// File on the file system
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct INode {
    /// File content
    pub body: FileBody,
}

impl INode {
    /// Creates a regular file with the given content.
    pub fn new<T: Into<Vec<u8>>>(bytes: T) -> Self {
        INode {
            body: FileBody::Regular {
                content: bytes.into(),
                is_native_executable: false,
            },
        }
    }

    /// Creates an empty executable file.
    pub fn executable() -> Self {
        INode {
            body: FileBody::Regular {
                content: Vec::new(),
                is_native_executable: true,
            },
        }
    }

    /// Creates a directory.
    pub fn directory() -> Self {
        INode {
            body: FileBody::Directory,
        }
    }
}

/// State of a file opened for reading and/or writing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenFile {
    /// The file
    pub file: Rc<RefCell<INode>>,
    /// Position in the file from which the next read or write begins
    pub offset: usize,
    /// Whether the file is open for reading
    pub is_readable: bool,
    /// Whether the file is open for writing
    pub is_writable: bool,
    /// Whether every write appends to the end of the file
    pub is_appending: bool,
}

/// Collection of the simulated system's state
#[derive(Clone, Debug)]
pub struct SystemState {
    /// Files keyed by normalized absolute path
    pub files: HashMap<PathBuf, Rc<RefCell<INode>>>,
    /// Open file descriptors
    pub fds: BTreeMap<Fd, Rc<RefCell<OpenFile>>>,
    /// File descriptors that are regarded as terminals
    pub terminals: BTreeSet<Fd>,
    /// Current working directory
    pub cwd: PathBuf,
    /// Process ID of the only process
    pub pid: Pid,
    /// Process group ID of the only process
    pub pgid: Pid,
    /// Foreground process group of the terminal
    pub foreground: Option<Pid>,
    /// Current signal handling
    pub signal_handlings: HashMap<Signal, SignalHandling>,
    /// Signals sent by [`System::kill`], in order
    pub sent_signals: Vec<(Pid, Signal)>,
    /// Value returned by [`System::confstr_path`]
    pub default_path: String,
    /// Results [`System::wait`] returns in order
    ///
    /// When this is empty, `wait` fails with `ECHILD`.
    pub wait_statuses: VecDeque<WaitStatus>,
}

impl Default for SystemState {
    fn default() -> Self {
        SystemState {
            files: HashMap::new(),
            fds: BTreeMap::new(),
            terminals: BTreeSet::new(),
            cwd: PathBuf::from("/"),
            pid: Pid::from_raw(2),
            pgid: Pid::from_raw(2),
            foreground: None,
            signal_handlings: HashMap::new(),
            sent_signals: Vec::new(),
            default_path: "/usr/bin:/bin".to_string(),
            wait_statuses: VecDeque::new(),
        }
    }
}

impl SystemState {
    /// Returns the normalized absolute path for the path.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let mut result = PathBuf::from("/");
        for component in self.cwd.join(path).components() {
            match component {
                Component::RootDir | Component::CurDir | Component::Prefix(_) => (),
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(name) => result.push(name),
            }
        }
        result
    }

    /// Returns the file at the path.
    pub fn file<P: AsRef<Path>>(&self, path: P) -> Option<Rc<RefCell<INode>>> {
        self.files.get(&self.resolve(path)).cloned()
    }

    /// Returns the open file for the FD.
    fn open_file(&self, fd: Fd) -> Result<Rc<RefCell<OpenFile>>> {
        self.fds.get(&fd).cloned().ok_or(Errno::EBADF)
    }

    /// Returns the minimum unused FD not less than `min`.
    fn free_fd(&self, min: Fd) -> Fd {
        let mut fd = min;
        while self.fds.contains_key(&fd) {
            fd.0 += 1;
        }
        fd
    }
}

/// Converts a C string to a path.
fn to_path(path: &CStr) -> &Path {
    Path::new(OsStr::from_bytes(path.to_bytes()))
}

/// Simulated system
///
/// See the [module-level documentation](self) to grasp a basic understanding
/// of `VirtualSystem`.
///
/// The state is shared by `Rc`, so a clone of a virtual system operates on
/// the same state. Tests keep a clone to inspect the state after handing the
/// system to an [`Env`](crate::Env).
#[derive(Clone, Debug)]
pub struct VirtualSystem {
    pub state: Rc<RefCell<SystemState>>,
}

impl Default for VirtualSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualSystem {
    /// Creates a virtual system with the standard input, output and error
    /// open.
    #[must_use]
    pub fn new() -> VirtualSystem {
        let mut state = SystemState::default();
        state
            .files
            .insert(PathBuf::from("/"), Rc::new(RefCell::new(INode::directory())));
        state
            .files
            .insert(PathBuf::from("/dev"), Rc::new(RefCell::new(INode::directory())));

        for (fd, name, is_readable) in [
            (Fd::STDIN, "/dev/stdin", true),
            (Fd::STDOUT, "/dev/stdout", false),
            (Fd::STDERR, "/dev/stderr", false),
        ] {
            let file = Rc::new(RefCell::new(INode::default()));
            state.files.insert(PathBuf::from(name), Rc::clone(&file));
            let open_file = OpenFile {
                file,
                offset: 0,
                is_readable,
                is_writable: !is_readable,
                is_appending: !is_readable,
            };
            state.fds.insert(fd, Rc::new(RefCell::new(open_file)));
        }

        VirtualSystem {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Borrows the state.
    pub fn state(&self) -> Ref<'_, SystemState> {
        self.state.borrow()
    }

    /// Adds a file at the path, replacing any existing file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P, inode: INode) {
        let mut state = self.state.borrow_mut();
        let path = state.resolve(path);
        state.files.insert(path, Rc::new(RefCell::new(inode)));
    }

    /// Returns the content of the regular file at the path.
    ///
    /// Returns `None` if there is no such regular file.
    #[must_use]
    pub fn file_content<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let file = self.state.borrow().file(path)?;
        let file = file.borrow();
        match &file.body {
            FileBody::Regular { content, .. } => Some(String::from_utf8_lossy(content).into_owned()),
            FileBody::Directory => None,
        }
    }

    /// Returns what has been written to the standard output file.
    #[must_use]
    pub fn stdout_content(&self) -> String {
        self.file_content("/dev/stdout").unwrap_or_default()
    }

    /// Returns what has been written to the standard error file.
    #[must_use]
    pub fn stderr_content(&self) -> String {
        self.file_content("/dev/stderr").unwrap_or_default()
    }

    /// Replaces the content of the standard input file.
    pub fn set_stdin<T: Into<Vec<u8>>>(&self, content: T) {
        self.save_file("/dev/stdin", INode::new(content));
        let state = self.state.borrow();
        if let (Some(fd), Some(file)) = (state.fds.get(&Fd::STDIN), state.file("/dev/stdin")) {
            let mut fd = fd.borrow_mut();
            fd.file = file;
            fd.offset = 0;
        }
    }
}

impl System for VirtualSystem {
    fn is_executable_file(&self, path: &CStr) -> bool {
        let Some(file) = self.state.borrow().file(to_path(path)) else {
            return false;
        };
        let file = file.borrow();
        matches!(
            file.body,
            FileBody::Regular {
                is_native_executable: true,
                ..
            }
        )
    }

    fn is_directory(&self, path: &CStr) -> bool {
        let Some(file) = self.state.borrow().file(to_path(path)) else {
            return false;
        };
        let file = file.borrow();
        file.body == FileBody::Directory
    }

    /// Creates an anonymous file simulating a pipe.
    ///
    /// Writes append to the file and reads consume it from the start. Reading
    /// an empty pipe returns end-of-file instead of blocking.
    fn pipe(&mut self) -> Result<(Fd, Fd)> {
        let file = Rc::new(RefCell::new(INode::default()));
        let reader = OpenFile {
            file: Rc::clone(&file),
            offset: 0,
            is_readable: true,
            is_writable: false,
            is_appending: false,
        };
        let writer = OpenFile {
            file,
            offset: 0,
            is_readable: false,
            is_writable: true,
            is_appending: true,
        };
        let mut state = self.state.borrow_mut();
        let reader_fd = state.free_fd(Fd(0));
        state.fds.insert(reader_fd, Rc::new(RefCell::new(reader)));
        let writer_fd = state.free_fd(Fd(0));
        state.fds.insert(writer_fd, Rc::new(RefCell::new(writer)));
        Ok((reader_fd, writer_fd))
    }

    fn dup(&mut self, from: Fd, to_min: Fd, _cloexec: bool) -> Result<Fd> {
        let mut state = self.state.borrow_mut();
        let open_file = state.open_file(from)?;
        let fd = state.free_fd(to_min);
        state.fds.insert(fd, open_file);
        Ok(fd)
    }

    fn dup2(&mut self, from: Fd, to: Fd) -> Result<Fd> {
        let mut state = self.state.borrow_mut();
        let open_file = state.open_file(from)?;
        state.fds.insert(to, open_file);
        Ok(to)
    }

    fn open(&mut self, path: &CStr, option: OFlag, _mode: Mode) -> Result<Fd> {
        let mut state = self.state.borrow_mut();
        let path = state.resolve(to_path(path));

        let access = option & OFlag::O_ACCMODE;
        let is_readable = access == OFlag::O_RDONLY || access == OFlag::O_RDWR;
        let is_writable = access == OFlag::O_WRONLY || access == OFlag::O_RDWR;

        let file = match state.files.get(&path) {
            Some(file) => Rc::clone(file),
            None if option.contains(OFlag::O_CREAT) => {
                let parent_exists = path
                    .parent()
                    .and_then(|parent| state.files.get(parent))
                    .is_some_and(|parent| parent.borrow().body == FileBody::Directory);
                if !parent_exists {
                    return Err(Errno::ENOENT);
                }
                let file = Rc::new(RefCell::new(INode::default()));
                state.files.insert(path, Rc::clone(&file));
                file
            }
            None => return Err(Errno::ENOENT),
        };

        {
            let mut inode = file.borrow_mut();
            match &mut inode.body {
                FileBody::Directory if is_writable => return Err(Errno::EISDIR),
                FileBody::Regular { content, .. } if is_writable => {
                    if option.contains(OFlag::O_TRUNC) {
                        content.clear();
                    }
                }
                _ => (),
            }
        }

        let open_file = OpenFile {
            file,
            offset: 0,
            is_readable,
            is_writable,
            is_appending: option.contains(OFlag::O_APPEND),
        };
        let fd = state.free_fd(Fd(0));
        state.fds.insert(fd, Rc::new(RefCell::new(open_file)));
        Ok(fd)
    }

    fn close(&mut self, fd: Fd) -> Result<()> {
        self.state.borrow_mut().fds.remove(&fd);
        Ok(())
    }

    fn read(&mut self, fd: Fd, buffer: &mut [u8]) -> Result<usize> {
        let open_file = self.state.borrow().open_file(fd)?;
        let mut open_file = open_file.borrow_mut();
        if !open_file.is_readable {
            return Err(Errno::EBADF);
        }
        let file = Rc::clone(&open_file.file);
        let file = file.borrow();
        let FileBody::Regular { content, .. } = &file.body else {
            return Err(Errno::EISDIR);
        };
        let start = open_file.offset.min(content.len());
        let count = buffer.len().min(content.len() - start);
        buffer[..count].copy_from_slice(&content[start..start + count]);
        open_file.offset = start + count;
        Ok(count)
    }

    fn write(&mut self, fd: Fd, buffer: &[u8]) -> Result<usize> {
        let open_file = self.state.borrow().open_file(fd)?;
        let mut open_file = open_file.borrow_mut();
        if !open_file.is_writable {
            return Err(Errno::EBADF);
        }
        let file = Rc::clone(&open_file.file);
        let mut file = file.borrow_mut();
        let FileBody::Regular { content, .. } = &mut file.body else {
            return Err(Errno::EISDIR);
        };
        if open_file.is_appending {
            open_file.offset = content.len();
        }
        let start = open_file.offset;
        if content.len() < start {
            content.resize(start, 0);
        }
        let overlap = (content.len() - start).min(buffer.len());
        content[start..start + overlap].copy_from_slice(&buffer[..overlap]);
        content.extend_from_slice(&buffer[overlap..]);
        open_file.offset = start + buffer.len();
        Ok(buffer.len())
    }

    fn isatty(&self, fd: Fd) -> bool {
        self.state.borrow().terminals.contains(&fd)
    }

    fn getpid(&self) -> Pid {
        self.state.borrow().pid
    }

    fn getpgrp(&self) -> Pid {
        self.state.borrow().pgid
    }

    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let zero = Pid::from_raw(0);
        if pid != zero && pid != state.pid {
            return Err(Errno::ESRCH);
        }
        state.pgid = if pgid == zero { state.pid } else { pgid };
        Ok(())
    }

    fn tcgetpgrp(&self, fd: Fd) -> Result<Pid> {
        let state = self.state.borrow();
        if !state.terminals.contains(&fd) {
            return Err(Errno::ENOTTY);
        }
        Ok(state.foreground.unwrap_or(state.pgid))
    }

    fn tcsetpgrp(&mut self, fd: Fd, pgid: Pid) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.terminals.contains(&fd) {
            return Err(Errno::ENOTTY);
        }
        state.foreground = Some(pgid);
        Ok(())
    }

    fn sigaction(&mut self, signal: Signal, action: SignalHandling) -> Result<SignalHandling> {
        let mut state = self.state.borrow_mut();
        let old = state.signal_handlings.insert(signal, action);
        Ok(old.unwrap_or_default())
    }

    fn kill(&mut self, target: Pid, signal: Signal) -> Result<()> {
        self.state.borrow_mut().sent_signals.push((target, signal));
        Ok(())
    }

    fn new_child_process(&mut self) -> Result<ForkResult> {
        Err(Errno::ENOSYS)
    }

    fn wait(&mut self, _target: Option<Pid>, _nohang: bool) -> Result<WaitStatus> {
        self.state
            .borrow_mut()
            .wait_statuses
            .pop_front()
            .ok_or(Errno::ECHILD)
    }

    fn execve(&mut self, _path: &CStr, _args: &[CString], _envs: &[CString]) -> Result<Infallible> {
        Err(Errno::ENOSYS)
    }

    fn exit(&mut self, exit_status: ExitStatus) -> ! {
        unreachable!("exit({exit_status}) requires a child process, which a virtual system cannot create")
    }

    fn getcwd(&self) -> Result<PathBuf> {
        Ok(self.state.borrow().cwd.clone())
    }

    fn chdir(&mut self, path: &CStr) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let path = state.resolve(to_path(path));
        let file = state.files.get(&path).ok_or(Errno::ENOENT)?;
        if file.borrow().body != FileBody::Directory {
            return Err(Errno::ENOTDIR);
        }
        state.cwd = path;
        Ok(())
    }

    fn confstr_path(&self) -> Result<String> {
        Ok(self.state.borrow().default_path.clone())
    }
}
