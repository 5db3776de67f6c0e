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

//! Types and functions for parsing reserved words.

use std::fmt;

/// Token identifier for reserved words.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Keyword {
    Do,
    Done,
    Else,
    Fi,
    For,
    If,
    In,
    Then,
    While,
}

impl Keyword {
    /// Determines if this token can be a delimiter of a clause.
    ///
    /// This function returns `true` for `Do`, `Done`, `Else`, `Fi` and `Then`,
    /// and `false` for others.
    pub fn is_clause_delimiter(self) -> bool {
        use Keyword::*;
        match self {
            Do | Done | Else | Fi | Then => true,
            For | If | In | While => false,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Keyword::*;
        f.write_str(match self {
            Do => "do",
            Done => "done",
            Else => "else",
            Fi => "fi",
            For => "for",
            If => "if",
            In => "in",
            Then => "then",
            While => "while",
        })
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ();
    fn try_from(s: &str) -> Result<Keyword, ()> {
        use Keyword::*;
        match s {
            "do" => Ok(Do),
            "done" => Ok(Done),
            "else" => Ok(Else),
            "fi" => Ok(Fi),
            "for" => Ok(For),
            "if" => Ok(If),
            "in" => Ok(In),
            "then" => Ok(Then),
            "while" => Ok(While),
            _ => Err(()),
        }
    }
}
