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

//! Command line argument parser for the shell

use std::iter::Peekable;
use thiserror::Error;

/// Input to the main read-eval loop
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Source {
    /// Read from standard input (the `-s` option or no operand)
    #[default]
    Stdin,
    /// Read from a script file (the first operand)
    File { path: String },
    /// Read from a string (the `-c` option)
    String(String),
}

/// Configuration for starting the main read-eval loop
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Run {
    /// Input source
    pub source: Source,
    /// Whether the shell is interactive (`-i` or `+i`)
    ///
    /// `None` means the interactivity is determined automatically.
    pub interactive: Option<bool>,
    /// Whether to print the syntax tree instead of executing it
    pub dump_ast: bool,
    /// Name of the shell or the script
    pub arg0: String,
    /// Remaining operands
    pub positional_params: Vec<String>,
}

/// Parse result
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parse {
    /// Runs the shell
    Run(Run),
    /// Prints help message and exit
    Help,
    /// Prints version information and exit
    Version,
}

impl From<Run> for Parse {
    fn from(run: Run) -> Self {
        Parse::Run(run)
    }
}

/// Error in command line parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Short option that is not defined
    #[error("unknown option `{0}`")]
    UnknownShortOption(char),

    /// Long option that is not defined
    #[error("unknown option `{0}`")]
    UnknownLongOption(String),

    /// Long option that matches the prefix of more than one option name
    #[error("ambiguous option name `{0}`")]
    AmbiguousLongOption(String),

    /// Argument specified to an option that does not take an argument
    #[error("option `{0}` does not take an argument")]
    UnexpectedOptionArgument(String),

    /// The `-c` and `-s` options used together
    #[error("cannot specify both `-c` and `-s`")]
    ConflictingSources,

    /// Negated short option other than `+i`
    #[error("cannot negate option `{0}`")]
    UnnegatableShortOption(char),

    /// The `-c` option without a command string
    #[error("missing command string for `-c`")]
    MissingCommandString,
}

/// Long options
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LongOption {
    DumpAst,
    Help,
    Version,
}

const LONG_OPTIONS: [(&str, LongOption); 3] = [
    ("dump-ast", LongOption::DumpAst),
    ("help", LongOption::Help),
    ("version", LongOption::Version),
];

/// Short options seen so far
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct ShortOptions {
    command_string: bool,
    stdin: bool,
}

/// Parses command line arguments.
///
/// The first item is the name of the shell.
pub fn parse<I, S>(args: I) -> Result<Parse, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut result = Run::default();
    let mut short = ShortOptions::default();

    // Below, we use `args.next_if(|_| true)` instead of `args.next()` to avoid
    // consuming the `None` value that needs to be seen again.

    if let Some(arg0) = args.next_if(|_| true) {
        result.arg0 = arg0;
    }

    loop {
        if try_parse_short(&mut args, &mut short, &mut result)? {
            continue;
        }
        let Some(option) = try_parse_long(&mut args)? else {
            break;
        };
        match option {
            LongOption::DumpAst => result.dump_ast = true,
            LongOption::Help => return Ok(Parse::Help),
            LongOption::Version => return Ok(Parse::Version),
        }
    }

    args.next_if(|arg| arg == "-" || arg == "--");

    if short.command_string {
        if short.stdin {
            return Err(Error::ConflictingSources);
        }
        let command = args.next_if(|_| true).ok_or(Error::MissingCommandString)?;
        result.source = Source::String(command);
        if let Some(name) = args.next_if(|_| true) {
            result.arg0 = name;
        }
    } else if !short.stdin {
        if let Some(operand) = args.next_if(|_| true) {
            result.arg0 = operand.clone();
            result.source = Source::File { path: operand };
        }
    }
    result.positional_params = args.collect();

    Ok(Parse::Run(result))
}

/// Parses the next argument as short options.
///
/// Returns `Ok(false)` without consuming anything if the next argument is not
/// a short option.
fn try_parse_short<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
    short: &mut ShortOptions,
    run: &mut Run,
) -> Result<bool, Error> {
    let Some(arg) = args.next_if(|arg| is_short_option(arg)) else {
        return Ok(false);
    };

    let negate = arg.starts_with('+');
    for c in arg.chars().skip(1) {
        match (c, negate) {
            ('i', negate) => run.interactive = Some(!negate),
            ('c', false) => short.command_string = true,
            ('s', false) => short.stdin = true,
            ('c' | 's', true) => return Err(Error::UnnegatableShortOption(c)),
            (c, _) => return Err(Error::UnknownShortOption(c)),
        }
    }
    Ok(true)
}

/// Tests if the given string is a short option.
fn is_short_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    let negate = match chars.next() {
        Some('-') => false,
        Some('+') => true,
        _ => return false,
    };
    match chars.next() {
        Some('-') if !negate => false,
        Some('+') if negate => false,
        Some(_) => true,
        None => false,
    }
}

/// Tries to parse and consume the next argument as a long option.
///
/// A long option name may be abbreviated to any unambiguous prefix.
fn try_parse_long<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
) -> Result<Option<LongOption>, Error> {
    let Some(arg) = args.next_if(|arg| arg.len() > 2 && arg.starts_with("--")) else {
        return Ok(None);
    };

    let (name, value) = match arg[2..].split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (&arg[2..], None),
    };
    let mut candidates = LONG_OPTIONS
        .iter()
        .filter(|(long_name, _)| long_name.starts_with(name));
    let option = match (candidates.next(), candidates.next()) {
        (None, _) => return Err(Error::UnknownLongOption(arg)),
        (Some(_), Some(_)) => return Err(Error::AmbiguousLongOption(arg)),
        (Some(&(_, option)), None) => option,
    };
    if value.is_some() {
        return Err(Error::UnexpectedOptionArgument(arg));
    }
    Ok(Some(option))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> Run {
        match parse(args.iter().copied()) {
            Ok(Parse::Run(run)) => run,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_arguments() {
        let run = parse_ok(&["lish"]);
        assert_eq!(run.source, Source::Stdin);
        assert_eq!(run.interactive, None);
        assert_eq!(run.arg0, "lish");
        assert!(run.positional_params.is_empty());
    }

    #[test]
    fn script_file_with_operands() {
        let run = parse_ok(&["lish", "script.sh", "a", "-c"]);
        assert_eq!(
            run.source,
            Source::File {
                path: "script.sh".to_string()
            }
        );
        assert_eq!(run.arg0, "script.sh");
        assert_eq!(run.positional_params, ["a", "-c"]);
    }

    #[test]
    fn command_string() {
        let run = parse_ok(&["lish", "-c", "echo $x", "name", "p1"]);
        assert_eq!(run.source, Source::String("echo $x".to_string()));
        assert_eq!(run.arg0, "name");
        assert_eq!(run.positional_params, ["p1"]);
    }

    #[test]
    fn combined_short_options() {
        let run = parse_ok(&["lish", "-ic", "true"]);
        assert_eq!(run.interactive, Some(true));
        assert_eq!(run.source, Source::String("true".to_string()));

        let run = parse_ok(&["lish", "-i", "+i", "-s", "x"]);
        assert_eq!(run.interactive, Some(false));
        assert_eq!(run.source, Source::Stdin);
        assert_eq!(run.positional_params, ["x"]);
    }

    #[test]
    fn double_hyphen_ends_options() {
        let run = parse_ok(&["lish", "--", "-i"]);
        assert_eq!(
            run.source,
            Source::File {
                path: "-i".to_string()
            }
        );
        assert_eq!(run.interactive, None);
    }

    #[test]
    fn long_options() {
        let run = parse_ok(&["lish", "--dump-ast", "-c", "x"]);
        assert!(run.dump_ast);
        assert_eq!(parse(["lish", "--help"]), Ok(Parse::Help));
        assert_eq!(parse(["lish", "--vers"]), Ok(Parse::Version));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(["lish", "-x"]), Err(Error::UnknownShortOption('x')));
        assert_eq!(parse(["lish", "+c"]), Err(Error::UnnegatableShortOption('c')));
        assert_eq!(
            parse(["lish", "--foo"]),
            Err(Error::UnknownLongOption("--foo".to_string()))
        );
        assert_eq!(
            parse(["lish", "--help=1"]),
            Err(Error::UnexpectedOptionArgument("--help=1".to_string()))
        );
        assert_eq!(parse(["lish", "-c"]), Err(Error::MissingCommandString));
        assert_eq!(parse(["lish", "-cs", "x"]), Err(Error::ConflictingSources));
    }

    #[test]
    fn error_messages() {
        assert_eq!(Error::UnknownShortOption('x').to_string(), "unknown option `x`");
        assert_eq!(
            Error::ConflictingSources.to_string(),
            "cannot specify both `-c` and `-s`"
        );
    }
}
