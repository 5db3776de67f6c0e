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

//! Command execution

mod compound_command;
mod pipeline;
pub mod simple_command;

use crate::error::Result;
use lish_env::Env;
use lish_syntax::syntax;

/// Syntactic construct that can be executed.
pub trait Command {
    /// Executes this command.
    ///
    /// Implementations of this method are expected to update
    /// `env.exit_status` reflecting the result of the command execution.
    /// An error stops the execution and is propagated to the caller without
    /// executing the remaining commands.
    fn execute(&self, env: &mut Env) -> Result;
}

/// Executes the list.
///
/// The list is executed by executing each item in sequence. If any item
/// results in an error, the remaining items are not executed.
impl Command for syntax::CommandsList {
    fn execute(&self, env: &mut Env) -> Result {
        self.0.iter().try_for_each(|item| item.execute(env))
    }
}

/// Executes the item.
///
/// A run of compound commands executes each command in order.
impl Command for syntax::Item {
    fn execute(&self, env: &mut Env) -> Result {
        match self {
            syntax::Item::Pipelines(list) => list.execute(env),
            syntax::Item::Compound(commands) => {
                commands.iter().try_for_each(|command| command.execute(env))
            }
        }
    }
}

/// Executes the pipelines in order.
///
/// The exit status is that of the last pipeline. A pipeline run in the
/// background contributes an exit status of zero.
impl Command for syntax::PipelineList {
    fn execute(&self, env: &mut Env) -> Result {
        self.0.iter().try_for_each(|pipeline| pipeline.execute(env))
    }
}
