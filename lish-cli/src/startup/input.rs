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

//! Preparing the source code the shell runs

use lish_env::Env;
use lish_env::SystemEx as _;
use lish_env::io::Fd;
use lish_env::semantics::ExitStatus;
use lish_env::system::Errno;
use lish_env::system::Mode;
use lish_env::system::OFlag;
use lish_env::variable::PS1;
use lish_env::variable::PS1_INITIAL_VALUE;
use lish_semantics::runner::Input;
use std::ffi::CString;
use std::slice::from_mut;
use thiserror::Error;

/// Prompt shown before a continuation line
pub const CONTINUATION_PROMPT: &str = "> ";

/// Input that reads lines from a file descriptor
///
/// The reader reads one byte at a time so that it never consumes input
/// beyond the current line, which is left for the commands the shell runs.
#[derive(Clone, Debug)]
pub struct FdReader {
    fd: Fd,
    prompt: bool,
}

impl FdReader {
    /// Creates a new reader.
    ///
    /// If `prompt` is true, a prompt is printed to the standard error before
    /// each line is read: the value of `$PS1` for a new command and
    /// [`CONTINUATION_PROMPT`] for a continuation line.
    #[must_use]
    pub fn new(fd: Fd, prompt: bool) -> Self {
        FdReader { fd, prompt }
    }

    fn print_prompt(&self, env: &mut Env, continuation: bool) {
        let prompt = if continuation {
            CONTINUATION_PROMPT.to_owned()
        } else {
            env.variables.value(PS1).unwrap_or(PS1_INITIAL_VALUE).to_owned()
        };
        let _ = env.system.write_all(Fd::STDERR, prompt.as_bytes());
    }
}

impl Input for FdReader {
    fn next_line(&mut self, env: &mut Env, continuation: bool) -> Result<String, Errno> {
        if self.prompt {
            self.print_prompt(env, continuation);
        }

        let mut bytes = Vec::new();
        loop {
            let mut byte = 0;
            match env.system.read(self.fd, from_mut(&mut byte)) {
                Ok(0) => break,
                Ok(_) => {
                    bytes.push(byte);
                    if byte == b'\n' {
                        break;
                    }
                }
                Err(Errno::EINTR) => (),
                Err(errno) => return Err(errno),
            }
        }

        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned()))
    }
}

/// Error in reading a script file
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot open script file '{path}': {}", .errno.desc())]
pub struct PrepareInputError {
    /// Raw error value returned by the underlying system call
    pub errno: Errno,
    /// Path of the script file
    pub path: String,
}

impl PrepareInputError {
    /// Returns the exit status of the shell that fails to read the script.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self.errno {
            Errno::ENOENT | Errno::ENOTDIR | Errno::EILSEQ => ExitStatus::NOT_FOUND,
            _ => ExitStatus::NOEXEC,
        }
    }
}

/// Reads the whole content of a script file.
pub fn read_script(env: &mut Env, path: &str) -> Result<String, PrepareInputError> {
    let error = |errno| PrepareInputError {
        errno,
        path: path.to_owned(),
    };
    let c_path = CString::new(path).map_err(|_| error(Errno::EILSEQ))?;
    let fd = env
        .system
        .open(&c_path, OFlag::O_RDONLY | OFlag::O_CLOEXEC, Mode::empty())
        .map_err(error)?;

    let mut content = Vec::new();
    let mut buffer = [0; 4096];
    let result = loop {
        match env.system.read(fd, &mut buffer) {
            Ok(0) => break Ok(()),
            Ok(count) => content.extend_from_slice(&buffer[..count]),
            Err(Errno::EINTR) => (),
            Err(errno) => break Err(errno),
        }
    };
    let _ = env.system.close(fd);
    result.map_err(error)?;

    tracing::debug!(path, bytes = content.len(), "read script file");
    String::from_utf8(content).map_err(|_| error(Errno::EILSEQ))
}

/// Removes a leading interpreter line like `#!/bin/lish`.
///
/// The line is removed up to and including its newline. A script that does
/// not start with `#!` is returned as is.
#[must_use]
pub fn skip_shebang(script: &str) -> &str {
    if !script.starts_with("#!") {
        return script;
    }
    match script.find('\n') {
        Some(index) => &script[index + 1..],
        None => "",
    }
}
