//! End-to-end exercises of the `octoc` binary, one per scenario in spec §8.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(src: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{src}").unwrap();
    file
}

#[test]
fn compiles_a_function_to_c_on_stdout() {
    let file = source_file("func add(a: i32, b: i32) -> i32 { return a + b; }");

    Command::cargo_bin("octoc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "int32_t add(int32_t a, int32_t b)",
        ));
}

#[test]
fn writes_to_an_output_file_when_requested() {
    let file = source_file("func main() -> i32 { return 0; }");
    let out = NamedTempFile::new().unwrap();

    Command::cargo_bin("octoc")
        .unwrap()
        .arg(file.path())
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    let contents = std::fs::read_to_string(out.path()).unwrap();
    assert!(contents.contains("int32_t main(void)"));
}

#[test]
fn emit_tokens_stops_before_parsing() {
    let file = source_file("let x: i32 = 5;");

    Command::cargo_bin("octoc")
        .unwrap()
        .arg(file.path())
        .arg("--emit")
        .arg("tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier"));
}

#[test]
fn tokenizer_errors_exit_nonzero_with_message() {
    let file = source_file("let x = 'ab';");

    Command::cargo_bin("octoc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("octoc:"));
}

#[test]
fn missing_input_file_is_reported() {
    Command::cargo_bin("octoc")
        .unwrap()
        .arg("/no/such/file.oc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}
