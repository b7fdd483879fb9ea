use std::io::Write;
use std::process::{Command, Output};

use tempfile::{Builder, NamedTempFile};

fn source_file(text: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".mc").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn mc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mc"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn parse_prints_tree() {
    let file = source_file("inicio decls fimdecls codigo leia x fimprog");
    let out = mc(&[file.path().to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Programa\n  INICIO(inicio)\n"));
    assert!(stdout.contains("\n  Comandos\n    Comando\n      LEIA(leia)\n      IDENTIFIER(x)\n"));
    assert!(stdout.ends_with("Program is syntactically correct.\n"));
}

#[test]
fn scan_prints_token_table() {
    let file = source_file("leia x");
    let out = mc(&["--target", "scan", file.path().to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("LEIA"));
    assert!(lines[3].contains("EOF"));
}

#[test]
fn writes_output_and_dot_files() {
    let file = source_file("inicio decls fimdecls codigo fimprog");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tree.txt");
    let dot = dir.path().join("tree.dot");
    let out = mc(&[
        "-o",
        output.to_str().unwrap(),
        "--dot",
        dot.to_str().unwrap(),
        file.path().to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(std::fs::read_to_string(&output).unwrap().starts_with("Programa\n"));
    assert!(std::fs::read_to_string(&dot)
        .unwrap()
        .contains("n0 [label=\"Programa\"]"));
}

#[test]
fn lexical_fault_exits_with_diagnostic() {
    let file = source_file("inicio decls fimdecls codigo\nx = 1 .5\nfimprog");
    let out = mc(&[file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error(scanner): invalid numeric constant: unexpected decimal point after number"));
    assert!(stderr.contains("   2 | x = 1 .5"));
}

#[test]
fn syntax_fault_exits_with_diagnostic() {
    let file = source_file("inicio decls fimdecls codigo\nx y\nfimprog");
    let out = mc(&[file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error(parser): expected '=' (ASSIGN)"));
    assert!(stderr.contains("^ found IDENTIFIER(x)"));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("programa.mc");
    let out = mc(&[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("cannot read"));
}
