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

//! Part of the cd built-in that searches `$CDPATH`

use lish_env::Env;
use lish_env::variable::CDPATH;
use std::ffi::CString;
use std::path::Path;
use std::path::PathBuf;

/// Tests whether the operand is used without searching `$CDPATH`.
///
/// This is the case if the operand starts with `/`, `./` or `../`.
#[must_use]
pub fn is_explicit(operand: &str) -> bool {
    operand.starts_with('/') || operand.starts_with("./") || operand.starts_with("../")
}

/// Searches `$CDPATH` for the given directory.
///
/// This function treats the value of `$CDPATH` as a colon-separated list of
/// directory paths. It returns the first concatenation of a directory path
/// and the operand that names an existing directory. An empty directory path
/// means the current working directory.
///
/// If `$CDPATH` is not set, the operand is looked up in the current working
/// directory only. The result is `None` if no directory is found.
pub fn search(env: &Env, operand: &str) -> Option<PathBuf> {
    let cdpath = env.variables.value(CDPATH).unwrap_or("");
    cdpath
        .split(':')
        .map(|base| {
            let base = if base.is_empty() { "." } else { base };
            Path::new(base).join(operand)
        })
        .find(|path| is_directory(env, path))
}

fn is_directory(env: &Env, path: &Path) -> bool {
    match CString::new(path.as_os_str().as_encoded_bytes()) {
        Ok(path) => env.system.is_directory(&path),
        Err(_) => false,
    }
}
