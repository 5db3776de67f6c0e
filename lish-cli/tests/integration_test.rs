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

const BIN: &str = env!("CARGO_BIN_EXE_lish");

fn subject() -> std::process::Command {
    use std::env::var_os;
    use std::process::Command;

    let mut command = Command::new(BIN);
    command.env_clear();
    command.env("PATH", var_os("PATH").unwrap());
    command
}

fn file_with_content(content: &[u8]) -> std::fs::File {
    use std::io::Seek;
    use std::io::Write;
    use tempfile::tempfile;

    let mut file = tempfile().unwrap();
    file.write_all(content).unwrap();
    file.rewind().unwrap();
    file
}

fn run_string(code: &str) -> std::process::Output {
    subject().arg("-c").arg(code).output().unwrap()
}

#[test]
fn external_command_output() {
    let result = run_string("echo hello world");
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("hello world\n"));
    assert_eq!(std::str::from_utf8(&result.stderr), Ok(""));
}

#[test]
fn pipeline_connects_commands_and_reports_last_status() {
    let result = run_string("echo a b c | tr ' ' '\\n' | wc -l");
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout).unwrap().trim(), "3");

    let result = run_string("true | false");
    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn foreground_pipeline_waits_for_last_command_only() {
    use std::process::Stdio;
    use std::time::Duration;
    use std::time::Instant;

    // The output streams are discarded so that the lingering first command
    // does not keep them open.
    let start = Instant::now();
    let status = subject()
        .args(["-c", "sleep 5 | true"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(status.success(), "{status:?}");
    assert!(start.elapsed() < Duration::from_secs(4), "{:?}", start.elapsed());
}

#[test]
fn redirections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out");
    let code = format!("echo redirected >{0}; tr a-z A-Z <{0}", path.display());
    let result = run_string(&code);
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("REDIRECTED\n"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "redirected\n");
}

#[test]
fn killed_process_status() {
    let result = run_string("sh -c 'kill -9 $$'; echo $?");
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("137\n"));
}

#[test]
fn command_not_found() {
    let result = run_string("no_such_command_for_lish");
    assert_eq!(result.status.code(), Some(127));
    assert_eq!(
        std::str::from_utf8(&result.stderr),
        Ok("Error: no_such_command_for_lish - command not found\n")
    );
}

#[test]
fn syntax_error_exits_with_two() {
    let result = run_string("echo 'unclosed");
    assert_eq!(result.status.code(), Some(2));
    assert_eq!(result.stdout, b"");
    assert!(
        std::str::from_utf8(&result.stderr)
            .unwrap()
            .starts_with("Syntax error: ")
    );
}

#[test]
fn script_file_with_shebang_and_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script");
    std::fs::write(&path, "#!/usr/bin/env lish\necho $1 $2\n").unwrap();
    let result = subject().arg(&path).args(["x", "y"]).output().unwrap();
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("x y\n"));
}

#[test]
fn script_file_without_shebang() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script");
    std::fs::write(&path, "echo hi\n").unwrap();
    let result = subject().arg(&path).output().unwrap();
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("hi\n"));
}

#[test]
fn missing_script_file() {
    let result = subject().arg("/no/such/script").output().unwrap();
    assert_eq!(result.status.code(), Some(127));
    assert_eq!(
        std::str::from_utf8(&result.stderr),
        Ok("lish: cannot open script file '/no/such/script': No such file or directory\n")
    );
}

#[test]
fn commands_from_standard_input() {
    let stdin = file_with_content(b"x=1\nif true\nthen echo $x\nfi\nfi\n");
    let result = subject().stdin(stdin).output().unwrap();
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("1\n"));
    assert_eq!(result.status.code(), Some(2));
}

#[test]
fn compound_commands() {
    let code = "i=0\n\
        while test $i -lt 3; do i=$(($i+1)); done\n\
        for x in a $i; do echo $x; done\n\
        if test $i -eq 3; then echo three; else echo other; fi";
    let result = run_string(code);
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("a\n3\nthree\n"));
}

#[test]
fn cd_and_export_affect_child_processes() {
    let dir = tempfile::tempdir().unwrap();
    let dir = dir.path().canonicalize().unwrap();
    let code = format!("cd {}; export GREETING hi; pwd; sh -c 'echo $GREETING'", dir.display());
    let result = run_string(&code);
    assert!(result.status.success(), "{result:?}");
    assert_eq!(
        std::str::from_utf8(&result.stdout).unwrap(),
        format!("{}\nhi\n", dir.display())
    );
}

#[test]
fn background_job_does_not_block() {
    let result = run_string("sleep 1 & echo started");
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("started\n"));
}

#[test]
fn dump_ast() {
    let result = subject()
        .args(["--dump-ast", "-c", "a   b|c  >out"])
        .output()
        .unwrap();
    assert!(result.status.success(), "{result:?}");
    assert_eq!(std::str::from_utf8(&result.stdout), Ok("a b | c >out\n"));
}

#[test]
fn version() {
    let result = subject().arg("--version").output().unwrap();
    assert!(result.status.success(), "{result:?}");
    let expected = format!("lish {}\n", env!("CARGO_PKG_VERSION"));
    assert_eq!(std::str::from_utf8(&result.stdout), Ok(expected.as_str()));
}

#[test]
fn invalid_option() {
    let result = subject().arg("-z").output().unwrap();
    assert_eq!(result.status.code(), Some(2));
    assert!(
        std::str::from_utf8(&result.stderr)
            .unwrap()
            .ends_with(": unknown option `z`\n")
    );
}
