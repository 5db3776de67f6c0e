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

//! Implementation of the compound command semantics.

use super::Command;
use crate::error::Result;
use crate::expansion::expand_arguments;
use lish_env::Env;
use lish_env::semantics::ExitStatus;
use lish_syntax::syntax::Argument;
use lish_syntax::syntax::CommandsList;
use lish_syntax::syntax::CompoundCommand;

/// Executes the compound command.
///
/// The exit status of the `if` command is that of the branch executed, or
/// zero if no branch is executed. The exit status of a loop is that of the
/// last execution of the body, or zero if the body is never executed.
impl Command for CompoundCommand {
    fn execute(&self, env: &mut Env) -> Result {
        use CompoundCommand::*;
        match self {
            If {
                condition,
                then,
                r#else,
            } => execute_if(env, condition, then, r#else.as_ref()),
            While { condition, body } => execute_while(env, condition, body),
            For { name, values, body } => execute_for(env, name, values, body),
        }
    }
}

fn execute_if(
    env: &mut Env,
    condition: &CommandsList,
    then: &CommandsList,
    r#else: Option<&CommandsList>,
) -> Result {
    condition.execute(env)?;
    if env.exit_status.is_successful() {
        then.execute(env)
    } else if let Some(r#else) = r#else {
        r#else.execute(env)
    } else {
        env.exit_status = ExitStatus::SUCCESS;
        Ok(())
    }
}

fn execute_while(env: &mut Env, condition: &CommandsList, body: &CommandsList) -> Result {
    let mut exit_status = ExitStatus::SUCCESS;
    loop {
        condition.execute(env)?;
        if !env.exit_status.is_successful() {
            break;
        }
        body.execute(env)?;
        exit_status = env.exit_status;
    }
    env.exit_status = exit_status;
    Ok(())
}

/// Executes the `for` loop.
///
/// The values are expanded once before the first iteration. The variable is
/// restored to its previous state when the loop finishes, even if the loop
/// is interrupted by an error.
fn execute_for(env: &mut Env, name: &str, values: &[Argument], body: &CommandsList) -> Result {
    let values = expand_arguments(env, values)?;
    let saved = env.variables.get(name).cloned();

    let result = values.into_iter().try_fold(ExitStatus::SUCCESS, |_, value| {
        tracing::trace!(variable = name, %value, "for loop iteration");
        env.variables.set(name, value);
        body.execute(env)?;
        Ok(env.exit_status)
    });

    match saved {
        Some(variable) => {
            env.variables.insert(name, variable);
        }
        None => {
            env.variables.unset(name);
        }
    }

    env.exit_status = result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tests::echo_builtin;
    use crate::tests::return_builtin;
    use lish_env::VirtualSystem;
    use lish_env::builtin::Builtin;
    use lish_env::variable::Variable;

    fn run(env: &mut Env, code: &str) -> Result {
        let list: CommandsList = code.parse().unwrap();
        list.execute(env)
    }

    fn env_with_builtins() -> (VirtualSystem, Env) {
        let system = VirtualSystem::new();
        let mut env = Env::with_system(Box::new(system.clone()));
        env.builtins.insert("echo", echo_builtin());
        env.builtins.insert("return", return_builtin());
        (system, env)
    }

    #[test]
    fn if_runs_then_branch_on_success() {
        let (system, mut env) = env_with_builtins();
        run(&mut env, "if return 0; then echo yes; else echo no; fi").unwrap();
        assert_eq!(system.stdout_content(), "yes\n");
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn if_runs_else_branch_on_failure() {
        let (system, mut env) = env_with_builtins();
        run(&mut env, "if return 1; then echo yes; else echo no; return 3; fi").unwrap();
        assert_eq!(system.stdout_content(), "no\n");
        assert_eq!(env.exit_status, ExitStatus(3));
    }

    #[test]
    fn if_without_else_exits_zero_on_false_condition() {
        let (system, mut env) = env_with_builtins();
        run(&mut env, "if return 4; then echo yes; fi").unwrap();
        assert_eq!(system.stdout_content(), "");
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    fn below_three(env: &mut Env, _: Vec<String>) -> ExitStatus {
        let i: i64 = env.variables.value("i").unwrap_or("0").parse().unwrap();
        if i < 3 {
            ExitStatus::SUCCESS
        } else {
            ExitStatus::FAILURE
        }
    }

    #[test]
    fn while_repeats_until_condition_fails() {
        let (system, mut env) = env_with_builtins();
        env.builtins.insert("below_three", Builtin { execute: below_three });
        run(
            &mut env,
            "i=0\nwhile below_three; do echo $i; i=$(($i+1)); return 7; done",
        )
        .unwrap();
        assert_eq!(system.stdout_content(), "0\n1\n2\n");
        assert_eq!(env.exit_status, ExitStatus(7));
    }

    #[test]
    fn while_never_running_body_exits_zero() {
        let (_, mut env) = env_with_builtins();
        run(&mut env, "while return 5; do return 9; done").unwrap();
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn for_binds_each_value() {
        let (system, mut env) = env_with_builtins();
        run(&mut env, "for x in a $((1+1)) c; do echo $x; done").unwrap();
        assert_eq!(system.stdout_content(), "a\n2\nc\n");
        assert_eq!(env.variables.get("x"), None);
    }

    #[test]
    fn for_restores_previous_variable() {
        let (system, mut env) = env_with_builtins();
        env.variables.insert("x", Variable::new("outer").export());
        run(&mut env, "for x in inner; do echo $x; done; echo $x").unwrap();
        assert_eq!(system.stdout_content(), "inner\nouter\n");
        assert_eq!(env.variables.get("x"), Some(&Variable::new("outer").export()));
    }

    #[test]
    fn for_restores_variable_on_error() {
        let (system, mut env) = env_with_builtins();
        env.variables.set("x", "outer");
        let result = run(&mut env, "for x in 1 2; do echo $x; nosuch; done");
        assert_eq!(result, Err(Error::CommandNotFound("nosuch".to_string())));
        assert_eq!(system.stdout_content(), "1\n");
        assert_eq!(env.variables.value("x"), Some("outer"));
    }

    #[test]
    fn error_in_condition_stops_loop() {
        let (_, mut env) = env_with_builtins();
        let result = run(&mut env, "while x=$((1/0)); do return 0; done");
        assert_eq!(result, Err(Error::DivisionByZero));
    }
}
