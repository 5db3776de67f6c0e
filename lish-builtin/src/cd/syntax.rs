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

//! Command line argument parser for the cd built-in

use super::Command;
use super::Mode;
use thiserror::Error;

/// Error in parsing command line arguments
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// More than one operand is given.
    #[error("too many arguments")]
    TooManyOperands,
}

/// Parses command line arguments.
///
/// Leading `-L` and `-P` options select the [`Mode`]; the last one wins.
/// Any other argument ends the options. At most one operand may follow.
pub fn parse(args: Vec<String>) -> Result<Command, Error> {
    let mut mode = Mode::default();
    let mut args = args.into_iter().peekable();
    while let Some(option) = args.next_if(|arg| arg == "-L" || arg == "-P") {
        mode = if option == "-L" {
            Mode::Logical
        } else {
            Mode::Physical
        };
    }

    let operand = args.next();
    if args.next().is_some() {
        return Err(Error::TooManyOperands);
    }
    Ok(Command { mode, operand })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(vec![]), Ok(Command::default()));
    }

    #[test]
    fn options_and_operand() {
        let command = parse(args(&["-P", "-L", "-P", "dir"])).unwrap();
        assert_eq!(command.mode, Mode::Physical);
        assert_eq!(command.operand.as_deref(), Some("dir"));

        let command = parse(args(&["-L", "-"])).unwrap();
        assert_eq!(command.mode, Mode::Logical);
        assert_eq!(command.operand.as_deref(), Some("-"));
    }

    #[test]
    fn option_after_operand_is_operand() {
        let result = parse(args(&["dir", "-P"]));
        assert_eq!(result, Err(Error::TooManyOperands));
    }
}
