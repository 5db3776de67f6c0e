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

//! Command search.
//!
//! The [command search](search) is part of the execution of a [simple
//! command](lish_syntax::syntax::SimpleCommand). It determines a command
//! target that is to be invoked. A [target](Target) can be a built-in utility
//! or an external utility.
//!
//! If the command name contains a slash, the target is always an external
//! utility. Otherwise, a built-in with the name is chosen if any. Failing
//! that, the directories listed in the `$PATH` variable are searched for an
//! executable regular file with the name. If `$PATH` is not set, the
//! system's default search path (`confstr(_CS_PATH)`) is used instead.

use lish_env::Env;
use lish_env::builtin::Builtin;
use lish_env::variable::PATH;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::CStr;
use std::ffi::CString;

/// Target of a simple command execution.
///
/// This is the result of the [command search](search).
#[derive(Clone, Debug)]
pub enum Target {
    /// Built-in utility.
    Builtin(Builtin),
    /// External utility.
    External {
        /// Path to the external utility.
        ///
        /// If the command name contains a slash, the name is regarded as a
        /// path to an external utility, regardless of whether the named
        /// external utility actually exists.
        path: CString,
    },
}

impl From<Builtin> for Target {
    fn from(builtin: Builtin) -> Target {
        Target::Builtin(builtin)
    }
}

/// Part of the shell execution environment command path search depends on.
pub trait PathEnv {
    /// Returns the list of directories to search, separated by colons.
    ///
    /// This is the value of `$PATH` if set, or the system's default path.
    fn path(&self) -> Option<Cow<'_, str>>;
    /// Whether there is an executable file at the specified path.
    fn is_executable_file(&self, path: &CStr) -> bool;
}

/// Part of the shell execution environment command search depends on.
pub trait SearchEnv: PathEnv {
    /// Accesses the built-in set in the environment.
    fn builtins(&self) -> &HashMap<&'static str, Builtin>;
}

impl PathEnv for Env {
    fn path(&self) -> Option<Cow<'_, str>> {
        match self.variables.value(PATH) {
            Some(path) => Some(Cow::Borrowed(path)),
            None => self.system.confstr_path().ok().map(Cow::Owned),
        }
    }
    fn is_executable_file(&self, path: &CStr) -> bool {
        self.system.is_executable_file(path)
    }
}

impl SearchEnv for Env {
    fn builtins(&self) -> &HashMap<&'static str, Builtin> {
        &self.builtins
    }
}

/// Performs command search.
///
/// Returns `None` if the command is not found.
pub fn search<E: SearchEnv>(env: &E, name: &str) -> Option<Target> {
    if name.contains('/') {
        return CString::new(name).ok().map(|path| Target::External { path });
    }

    if let Some(builtin) = env.builtins().get(name) {
        return Some((*builtin).into());
    }

    search_path(env, name).map(|path| Target::External { path })
}

/// Searches the search path for an executable file.
///
/// Returns the path if successful. An empty directory name in the path
/// means the current working directory.
pub fn search_path<E: PathEnv>(env: &E, name: &str) -> Option<CString> {
    if name.is_empty() {
        return None;
    }
    let path = env.path()?;
    path.split(':')
        .map(|dir| {
            if dir.is_empty() {
                format!("./{name}")
            } else if dir.ends_with('/') {
                format!("{dir}{name}")
            } else {
                format!("{dir}/{name}")
            }
        })
        .filter_map(|candidate| CString::new(candidate).ok())
        .find(|candidate| env.is_executable_file(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use lish_env::VirtualSystem;
    use lish_env::semantics::ExitStatus;
    use lish_env::system::r#virtual::INode;

    fn dummy(_: &mut Env, _: Vec<String>) -> ExitStatus {
        ExitStatus::SUCCESS
    }

    #[test]
    fn name_with_slash_is_external() {
        let env = Env::new_virtual();
        let target = search(&env, "./foo");
        assert_matches!(target, Some(Target::External { path }) => {
            assert_eq!(path.to_bytes(), b"./foo");
        });
    }

    #[test]
    fn builtin_is_found_before_path() {
        let system = VirtualSystem::new();
        system.save_file("/bin/cd", INode::executable());
        let mut env = Env::with_system(Box::new(system));
        env.variables.set(PATH, "/bin");
        env.builtins.insert("cd", Builtin { execute: dummy });
        assert_matches!(search(&env, "cd"), Some(Target::Builtin(_)));
    }

    #[test]
    fn first_executable_in_path_is_found() {
        let system = VirtualSystem::new();
        system.save_file("/usr/bin/ls", INode::new("not executable"));
        system.save_file("/bin/ls", INode::executable());
        system.save_file("/opt/ls", INode::executable());
        let mut env = Env::with_system(Box::new(system));
        env.variables.set(PATH, "/usr/bin:/bin/:/opt");
        assert_matches!(search(&env, "ls"), Some(Target::External { path }) => {
            assert_eq!(path.to_bytes(), b"/bin/ls");
        });
    }

    #[test]
    fn default_path_is_used_without_path_variable() {
        let system = VirtualSystem::new();
        system.save_file("/usr/bin/env", INode::executable());
        let env = Env::with_system(Box::new(system));
        assert_matches!(search(&env, "env"), Some(Target::External { path }) => {
            assert_eq!(path.to_bytes(), b"/usr/bin/env");
        });
    }

    #[test]
    fn not_found() {
        let mut env = Env::new_virtual();
        env.variables.set(PATH, "/bin");
        assert_matches!(search(&env, "missing"), None);
        assert_matches!(search(&env, ""), None);
    }
}
