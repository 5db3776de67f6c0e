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

//! This crate defines the shell execution environment.
//!
//! A shell execution environment, [`Env`], is a collection of data that may
//! affect or be affected by the execution of commands. The environment consists
//! of application-managed parts and system-managed parts. Application-managed
//! parts like [variable]s and [job]s are implemented in pure Rust in this
//! crate. System-managed parts, on the other hand, depend on the underlying
//! system. Attributes like the working directory and open file descriptors are
//! managed by the system to be accessed only by interaction with the system
//! interface.
//!
//! The [`System`] trait is the interface to the system-managed parts.
//! [`RealSystem`] provides an implementation for `System` that interacts with
//! the underlying system. [`VirtualSystem`] is a dummy for simulating the
//! system's behavior without affecting the actual system.

pub mod builtin;
pub mod io;
pub mod job;
pub mod semantics;
pub mod system;
pub mod variable;

use self::builtin::Builtin;
use self::io::Fd;
use self::job::JobList;
use self::job::Pid;
use self::semantics::ExitStatus;
pub use self::system::System;
pub use self::system::SystemEx;
pub use self::system::real::RealSystem;
pub use self::system::r#virtual::VirtualSystem;
use self::variable::VariableSet;
use std::collections::HashMap;

/// Whole shell execution environment.
///
/// The shell execution environment consists of application-managed parts and
/// system-managed parts. Application-managed parts are directly implemented in
/// the `Env` instance. System-managed parts are managed by a [`System`]
/// instance contained in the `Env` instance.
#[derive(Debug)]
pub struct Env {
    /// Built-in utilities available in the environment
    pub builtins: HashMap<&'static str, Builtin>,

    /// Exit status of the last executed command
    pub exit_status: ExitStatus,

    /// Jobs started in the environment
    pub jobs: JobList,

    /// Variables and positional parameters defined in the environment
    pub variables: VariableSet,

    /// Whether the shell is interactive
    pub is_interactive: bool,

    /// Whether job control has been enabled
    ///
    /// Use [`controls_jobs`](Self::controls_jobs) to test whether job control
    /// is actually in effect.
    pub job_control: bool,

    /// Process ID of the main shell process
    ///
    /// This value is the expansion of the special parameter `$$`. Forked
    /// children keep the value of the parent.
    pub main_pid: Pid,

    /// Process group ID of the main shell process
    ///
    /// When job control is active, the shell takes the terminal back to this
    /// process group after a foreground job stops or finishes.
    pub main_pgid: Pid,

    /// Interface to the system-managed parts of the environment
    pub system: Box<dyn System>,
}

impl Env {
    /// Creates a new environment with the given system.
    ///
    /// Members of the new environment other than the system are
    /// default-constructed. The process ID and process group ID are read from
    /// the system.
    #[must_use]
    pub fn with_system(system: Box<dyn System>) -> Env {
        let main_pid = system.getpid();
        let main_pgid = system.getpgrp();
        Env {
            builtins: HashMap::new(),
            exit_status: ExitStatus::default(),
            jobs: JobList::new(),
            variables: VariableSet::new(),
            is_interactive: false,
            job_control: false,
            main_pid,
            main_pgid,
            system,
        }
    }

    /// Creates a new environment with a default-constructed [`VirtualSystem`].
    #[must_use]
    pub fn new_virtual() -> Env {
        Env::with_system(Box::new(VirtualSystem::new()))
    }

    /// Tests whether job control is in effect.
    ///
    /// Job control is in effect when enabled and the current process is the
    /// main shell process. A forked child never performs job control even if
    /// the parent does.
    #[must_use]
    pub fn controls_jobs(&self) -> bool {
        self.job_control && self.system.getpid() == self.main_pid
    }

    /// Prints a message to the standard error.
    ///
    /// A newline is appended to the message. Errors writing the message are
    /// ignored.
    pub fn print_error(&mut self, message: &str) {
        let mut line = String::with_capacity(message.len() + 1);
        line.push_str(message);
        line.push('\n');
        let _ = self.system.write_all(Fd::STDERR, line.as_bytes());
    }

    /// Prints a string to the standard output.
    ///
    /// Unlike [`print_error`](Self::print_error), no newline is appended. The
    /// result is the error writing the string, if any.
    pub fn print(&mut self, text: &str) -> system::Result<()> {
        self.system.write_all(Fd::STDOUT, text.as_bytes())
    }
}
