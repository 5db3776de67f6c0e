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

//! Cd built-in
//!
//! The **`cd`** built-in changes the working directory.
//!
//! # Synopsis
//!
//! ```sh
//! cd [-L|-P] [directory]
//! ```
//!
//! # Description
//!
//! The new working directory is determined from the option and operand as
//! follows:
//!
//! 1. If the operand is omitted, the value of `$HOME` is used for the operand.
//!    If `$HOME` is not set or empty, the built-in does nothing and succeeds.
//! 2. If the operand starts with `/`, `./` or `../`, it is used as is.
//!    Otherwise, the directories listed in `$CDPATH` are searched for a
//!    subdirectory named by the operand (see [`cdpath::search`]). If none is
//!    found, the operand is used as is.
//! 3. If the `-L` option is effective and the path is relative, the value of
//!    `$PWD` is prepended to it, and dot and dot-dot components are removed
//!    from the result.
//!
//! On success, `$PWD` is set to the new working directory and `$OLDPWD` to
//! the previous value of `$PWD`. Both are exported.
//!
//! # Options
//!
//! **`-L`** resolves the operand logically, as described above. **`-P`**
//! passes the operand to `chdir` without prepending `$PWD`, and `$PWD` is
//! taken from `getcwd` afterwards. The last one given applies. The default
//! is `-L`.
//!
//! # Errors
//!
//! It is an error if more than one operand is given, or if the working
//! directory cannot be changed.
//!
//! # Exit status
//!
//! Zero on success, one on error.

use crate::common::report_failure;
use lish_env::Env;
use lish_env::semantics::ExitStatus;
use lish_env::variable::HOME;
use lish_env::variable::OLDPWD;
use lish_env::variable::PWD;
use lish_env::variable::Variable;
use std::ffi::CString;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

pub mod cdpath;
pub mod syntax;

/// Treatments of symbolic links in the pathname
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Treat the pathname literally without resolving symbolic links
    #[default]
    Logical,

    /// Resolve symbolic links in the pathname
    Physical,
}

/// Parsed command line arguments
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Command {
    /// The `-L` and `-P` options are translated to this field.
    pub mode: Mode,
    /// The operand that specifies the directory to change to
    pub operand: Option<String>,
}

/// Removes dot and dot-dot components from an absolute path.
///
/// A dot-dot component removes the preceding component, if any. Redundant
/// slashes are removed as well.
#[must_use]
pub fn canonicalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => (),
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other),
        }
    }
    result
}

/// Computes the path passed to `chdir`.
fn target(env: &Env, operand: &str, mode: Mode, pwd: &str) -> PathBuf {
    let path = if cdpath::is_explicit(operand) {
        PathBuf::from(operand)
    } else {
        cdpath::search(env, operand).unwrap_or_else(|| PathBuf::from(operand))
    };

    match mode {
        Mode::Logical if !path.is_absolute() && pwd.starts_with('/') => {
            canonicalize(&Path::new(pwd).join(path))
        }
        Mode::Logical if path.is_absolute() => canonicalize(&path),
        _ => path,
    }
}

/// Updates `$PWD` and `$OLDPWD` after the working directory has changed.
fn update_variables(env: &mut Env, path: PathBuf, mode: Mode, old_pwd: Option<String>) {
    let new_pwd = match mode {
        Mode::Logical if path.is_absolute() => Some(path),
        _ => env.system.getcwd().ok(),
    };
    let new_pwd = new_pwd.and_then(|path| path.into_os_string().into_string().ok());
    match new_pwd {
        Some(new_pwd) => {
            tracing::debug!(pwd = %new_pwd, "changed working directory");
            env.variables.insert(PWD, Variable::new(new_pwd).export());
        }
        None => tracing::warn!("cannot determine the new working directory"),
    }
    if let Some(old_pwd) = old_pwd {
        env.variables.insert(OLDPWD, Variable::new(old_pwd).export());
    }
}

/// Entry point for executing the `cd` built-in
pub fn main(env: &mut Env, args: Vec<String>) -> ExitStatus {
    let command = match syntax::parse(args) {
        Ok(command) => command,
        Err(error) => return report_failure(env, "cd", error),
    };

    let operand = match command.operand {
        Some(operand) => operand,
        None => match env.variables.value(HOME) {
            Some(home) if !home.is_empty() => home.to_owned(),
            _ => return ExitStatus::SUCCESS,
        },
    };

    let old_pwd = env.variables.value(PWD).map(str::to_owned);
    let path = target(env, &operand, command.mode, old_pwd.as_deref().unwrap_or(""));

    let result = match CString::new(path.as_os_str().as_encoded_bytes()) {
        Ok(c_path) => env.system.chdir(&c_path),
        Err(_) => Err(lish_env::system::Errno::EINVAL),
    };
    match result {
        Ok(()) => {
            update_variables(env, path, command.mode, old_pwd);
            ExitStatus::SUCCESS
        }
        Err(errno) => report_failure(env, "cd", format_args!("{operand}: {}", errno.desc())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lish_env::VirtualSystem;
    use lish_env::system::r#virtual::INode;
    use lish_env::variable::CDPATH;

    fn env_with_dirs(dirs: &[&str]) -> (VirtualSystem, Env) {
        let system = VirtualSystem::new();
        for dir in dirs {
            system.save_file(dir, INode::directory());
        }
        let env = Env::with_system(Box::new(system.clone()));
        (system, env)
    }

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonicalize_removes_dots() {
        assert_eq!(canonicalize(Path::new("/a/./b/../c//d")), Path::new("/a/c/d"));
        assert_eq!(canonicalize(Path::new("/../a")), Path::new("/a"));
    }

    #[test]
    fn absolute_operand() {
        let (system, mut env) = env_with_dirs(&["/home", "/home/user"]);
        env.variables.set(PWD, "/");
        let exit_status = main(&mut env, args(&["/home/user"]));
        assert_eq!(exit_status, ExitStatus::SUCCESS);
        assert_eq!(system.state().cwd, Path::new("/home/user"));
        assert_eq!(
            env.variables.get(PWD),
            Some(&Variable::new("/home/user").export())
        );
        assert_eq!(env.variables.get(OLDPWD), Some(&Variable::new("/").export()));
    }

    #[test]
    fn relative_operand_is_resolved_from_pwd() {
        let (system, mut env) = env_with_dirs(&["/a", "/a/b", "/a/c"]);
        system.state.borrow_mut().cwd = PathBuf::from("/a/b");
        env.variables.set(PWD, "/a/b");
        let exit_status = main(&mut env, args(&["../c"]));
        assert_eq!(exit_status, ExitStatus::SUCCESS);
        assert_eq!(env.variables.value(PWD), Some("/a/c"));
        assert_eq!(env.variables.value(OLDPWD), Some("/a/b"));
    }

    #[test]
    fn no_operand_uses_home() {
        let (system, mut env) = env_with_dirs(&["/home", "/home/me"]);
        env.variables.set(HOME, "/home/me");
        assert_eq!(main(&mut env, vec![]), ExitStatus::SUCCESS);
        assert_eq!(system.state().cwd, Path::new("/home/me"));
    }

    #[test]
    fn no_operand_without_home_does_nothing() {
        let (system, mut env) = env_with_dirs(&[]);
        assert_eq!(main(&mut env, vec![]), ExitStatus::SUCCESS);
        env.variables.set(HOME, "");
        assert_eq!(main(&mut env, vec![]), ExitStatus::SUCCESS);
        assert_eq!(system.state().cwd, Path::new("/"));
        assert_eq!(env.variables.get(PWD), None);
    }

    #[test]
    fn operand_found_in_cdpath() {
        let (system, mut env) = env_with_dirs(&["/projects", "/projects/lish"]);
        env.variables.set(CDPATH, "/nowhere:/projects");
        env.variables.set(PWD, "/");
        assert_eq!(main(&mut env, args(&["lish"])), ExitStatus::SUCCESS);
        assert_eq!(system.state().cwd, Path::new("/projects/lish"));
        assert_eq!(env.variables.value(PWD), Some("/projects/lish"));
    }

    #[test]
    fn physical_mode_takes_pwd_from_system() {
        let (system, mut env) = env_with_dirs(&["/x"]);
        assert_eq!(main(&mut env, args(&["-P", "x"])), ExitStatus::SUCCESS);
        assert_eq!(system.state().cwd, Path::new("/x"));
        assert_eq!(env.variables.value(PWD), Some("/x"));
        assert_eq!(env.variables.get(OLDPWD), None);
    }

    #[test]
    fn missing_directory() {
        let (system, mut env) = env_with_dirs(&[]);
        env.variables.set(PWD, "/");
        assert_eq!(main(&mut env, args(&["nosuch"])), ExitStatus::FAILURE);
        assert_eq!(
            system.stderr_content(),
            "cd: nosuch: No such file or directory\n"
        );
        assert_eq!(env.variables.value(PWD), Some("/"));
    }

    #[test]
    fn too_many_operands() {
        let (system, mut env) = env_with_dirs(&["/a", "/b"]);
        assert_eq!(main(&mut env, args(&["/a", "/b"])), ExitStatus::FAILURE);
        assert_eq!(system.stderr_content(), "cd: too many arguments\n");
        assert_eq!(system.state().cwd, Path::new("/"));
    }
}
