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

//! Items for shell variables
//!
//! A [`Variable`] is a named string value that can be exported to the
//! environment of external utilities. A [`VariableSet`] maps names to
//! variables. There is a single, shell-global namespace: assignments in a
//! compound command or a built-in affect the whole shell.
//!
//! This module also defines constants for the names of variables the shell
//! itself consults.
//!
//! # Examples
//!
//! ```
//! use lish_env::variable::VariableSet;
//! let mut set = VariableSet::new();
//! set.set("foo", "hello");
//! assert_eq!(set.value("foo"), Some("hello"));
//! assert!(!set.get("foo").unwrap().is_exported);
//!
//! set.export("foo");
//! assert_eq!(set.env_c_strings(), [c"foo=hello".to_owned()]);
//! ```

use itertools::Itertools as _;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::CString;

/// Name of the variable that lists directories searched for commands
pub const PATH: &str = "PATH";
/// Name of the variable that contains the home directory of the user
pub const HOME: &str = "HOME";
/// Name of the variable that lists directories searched by `cd`
pub const CDPATH: &str = "CDPATH";
/// Name of the variable that contains the current working directory
pub const PWD: &str = "PWD";
/// Name of the variable that contains the previous working directory
pub const OLDPWD: &str = "OLDPWD";
/// Name of the variable that contains the primary prompt string
pub const PS1: &str = "PS1";
/// Initial value of [`PS1`]
pub const PS1_INITIAL_VALUE: &str = "$ ";

/// Definition of a variable.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Variable {
    /// Value of the variable.
    pub value: String,

    /// Whether this variable is exported or not.
    ///
    /// An exported variable is also referred to as an _environment variable_.
    pub is_exported: bool,
}

impl Variable {
    /// Creates a new non-exported variable with the given value.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Variable {
            value: value.into(),
            is_exported: false,
        }
    }

    /// Returns a copy of this variable with the exported flag set.
    #[must_use]
    pub fn export(mut self) -> Self {
        self.is_exported = true;
        self
    }
}

/// Collection of variables.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    all_variables: HashMap<String, Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> VariableSet {
        Default::default()
    }

    /// Gets a reference to the variable with the specified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.all_variables.get(name)
    }

    /// Gets the value of the variable with the specified name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|var| var.value.as_str())
    }

    /// Assigns a value to a variable.
    ///
    /// If the variable already exists, its value is replaced and the exported
    /// flag is kept. Otherwise, a new non-exported variable is created.
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let value = value.into();
        match self.all_variables.entry(name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().value = value,
            Entry::Vacant(entry) => {
                entry.insert(Variable::new(value));
            }
        }
    }

    /// Inserts a variable, replacing any existing one.
    ///
    /// Returns the old variable if any.
    pub fn insert<N: Into<String>>(&mut self, name: N, variable: Variable) -> Option<Variable> {
        self.all_variables.insert(name.into(), variable)
    }

    /// Removes a variable.
    ///
    /// Returns the removed variable, or `None` if there was none.
    pub fn unset(&mut self, name: &str) -> Option<Variable> {
        self.all_variables.remove(name)
    }

    /// Sets the exported flag of a variable.
    ///
    /// A variable with an empty value is created if it does not exist.
    pub fn export<N: Into<String>>(&mut self, name: N) {
        self.all_variables.entry(name.into()).or_default().is_exported = true;
    }

    /// Returns an iterator of all variables in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.all_variables
            .iter()
            .map(|(name, var)| (name.as_str(), var))
    }

    /// Returns the exported variables sorted by name.
    #[must_use]
    pub fn exported(&self) -> Vec<(&str, &Variable)> {
        self.iter()
            .filter(|(_, var)| var.is_exported)
            .sorted_by_key(|(name, _)| *name)
            .collect()
    }

    /// Returns environment variables in a new vector of C string.
    ///
    /// Variables whose name or value contains a nul byte cannot be passed to
    /// `execve` and are omitted.
    #[must_use]
    pub fn env_c_strings(&self) -> Vec<CString> {
        self.exported()
            .into_iter()
            .filter_map(|(name, var)| CString::new(format!("{name}={}", var.value)).ok())
            .collect()
    }

    /// Imports environment variables from an iterator.
    ///
    /// The argument iterator must yield name-value pairs. This function assigns
    /// the values to the variable set, overwriting existing variables. The
    /// variables are exported.
    pub fn extend_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.insert(name, Variable::new(value).export());
        }
    }

    /// Initializes default variables.
    ///
    /// Currently, this function only assigns [`PS1`] if it is not set.
    pub fn init(&mut self) {
        if self.get(PS1).is_none() {
            self.set(PS1, PS1_INITIAL_VALUE);
        }
    }
}
