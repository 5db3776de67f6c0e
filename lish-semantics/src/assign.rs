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

//! Assignment

use crate::error::Result;
use crate::expansion::expand_argument;
use lish_env::Env;
use lish_syntax::syntax::Assignment;

/// Performs an assignment.
///
/// The value is expanded and assigned to the variable. An existing variable
/// keeps its export attribute.
pub fn perform_assignment(env: &mut Env, assignment: &Assignment) -> Result {
    let value = expand_argument(env, &assignment.value)?;
    tracing::trace!(variable = %assignment.name, %value, "assign");
    env.variables.set(assignment.name.as_str(), value);
    Ok(())
}

/// Performs assignments in order.
///
/// If an assignment fails, the remaining assignments are not performed.
/// The effects of the preceding assignments remain.
pub fn perform_assignments<'a, I>(env: &mut Env, assignments: I) -> Result
where
    I: IntoIterator<Item = &'a Assignment>,
{
    assignments
        .into_iter()
        .try_for_each(|assignment| perform_assignment(env, assignment))
}
