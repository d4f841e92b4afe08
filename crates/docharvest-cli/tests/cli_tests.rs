//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_corpus_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "hello corpus").unwrap();

    Command::cargo_bin("docharvest")
        .unwrap()
        .arg(&path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Content from note.txt ---"))
        .stdout(predicate::str::contains("hello corpus"));
}

#[test]
fn test_unsupported_file_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, b"\x00\x01").unwrap();

    Command::cargo_bin("docharvest")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn test_output_file_and_results_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    std::fs::write(&input, br#"{"k": "v"}"#).unwrap();
    let corpus_path = dir.path().join("corpus.txt");
    let results_path = dir.path().join("results.json");

    Command::cargo_bin("docharvest")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&corpus_path)
        .arg("--results-json")
        .arg(&results_path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let corpus = std::fs::read_to_string(&corpus_path).unwrap();
    assert!(corpus.contains("--- Content from data.json ---"));

    let results = std::fs::read_to_string(&results_path).unwrap();
    assert!(results.contains("\"file_name\""));
}

#[test]
fn test_requires_at_least_one_input() {
    Command::cargo_bin("docharvest")
        .unwrap()
        .assert()
        .failure();
}
