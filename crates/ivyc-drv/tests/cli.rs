//! CLI-level integration tests (§10.5, §10.7): exit codes 0/1/2 exercised
//! through the actual `ivyc` binary via `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_source(contents: &str) -> NamedTempFile {
    use std::io::Write;
    let mut file = NamedTempFile::new().expect("create temp source file");
    write!(file, "{contents}").expect("write temp source file");
    file
}

#[test]
fn no_arguments_exits_one_with_usage_on_stderr() {
    Command::cargo_bin("ivyc")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("usage"));
}

#[test]
fn too_many_arguments_exits_one() {
    Command::cargo_bin("ivyc")
        .unwrap()
        .arg("a.ivy")
        .arg("b.ivy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("usage"));
}

#[test]
fn missing_file_exits_two() {
    Command::cargo_bin("ivyc")
        .unwrap()
        .arg("/no/such/file.ivy")
        .assert()
        .code(2)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn parse_error_exits_two() {
    let file = write_source("fn main() { let x = ; }");
    Command::cargo_bin("ivyc")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(2);
}

#[test]
fn immutable_assignment_exits_two() {
    let file = write_source("fn main() { let x: int = 1; x = 2; }");
    Command::cargo_bin("ivyc")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("immutable").or(predicate::str::contains("x")));
}

#[test]
fn valid_source_exits_zero_and_prints_target_text() {
    let file = write_source("fn main() { let x: int = 1 + 2; }");
    Command::cargo_bin("ivyc")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("int main(int argc, char* argv[])"))
        .stdout(predicate::str::contains("const int x"));
}

#[test]
fn bundled_import_is_prepended_once() {
    let file = write_source(
        "import iostream;\nimport iostream;\nfn main() { iostream.println(\"hi\"); }",
    );
    let output = Command::cargo_bin("ivyc")
        .unwrap()
        .arg(file.path())
        .output()
        .expect("run ivyc");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("namespace iostream").count(), 1);
}
