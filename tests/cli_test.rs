//! Integration tests for the kvlint binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn kvlint() -> Command {
    let mut cmd = Command::new(cargo_bin("kvlint"));
    cmd.arg("--no-color");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kvlint"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Syntax validator"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kvlint"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_an_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kvlint"));
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn clean_file_exits_zero_with_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "ok.kv", "\"root\"\n{\n\t\"k\" \"v\"\n}\n");

    kvlint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn diagnostics_are_advisory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "bad.kv", "'key' \"value\"\n");

    kvlint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("single-quote"))
        .stdout(predicate::str::contains("bad.kv:1"));
    Ok(())
}

#[test]
fn strict_mode_fails_on_diagnostics() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "bad.kv", "'key' \"value\"\n");

    kvlint().arg("--strict").arg(&file).assert().failure().code(1);
    Ok(())
}

#[test]
fn bare_carriage_return_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "cr.kv", b"\"k\" \"v\"\r\"k2\" \"v2\"\n");

    kvlint()
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("carriage-return"));
    Ok(())
}

#[test]
fn crlf_line_endings_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "dos.kv", b"\"root\"\r\n{\r\n\t\"k\" \"v\"\r\n}\r\n");

    kvlint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn missing_file_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.kv");

    kvlint()
        .arg(&missing)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unable to read"));
    Ok(())
}

#[test]
fn file_after_a_carriage_return_abort_still_gets_scanned() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let aborted = write_file(temp.path(), "cr.kv", b"\"k\" \"v\"\r\"k2\" \"v2\"\n");
    let bad = write_file(temp.path(), "quotes.kv", "'key' \"value\"\n");

    kvlint()
        .arg(&aborted)
        .arg(&bad)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("carriage-return"))
        .stdout(predicate::str::contains("single-quote"))
        .stdout(predicate::str::contains("quotes.kv:1"));
    Ok(())
}

#[test]
fn multiple_files_are_checked_independently() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let open = write_file(temp.path(), "open.kv", "\"root\"\n{\n");
    let clean = write_file(temp.path(), "clean.kv", "\"k\" \"v\"\n");

    kvlint()
        .arg(&open)
        .arg(&clean)
        .assert()
        .success()
        .stdout(predicate::str::contains("unclosed-key"))
        .stdout(predicate::str::contains("clean.kv").not());
    Ok(())
}

#[test]
fn json_format_emits_machine_readable_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "bad.kv", "'key' \"value\"\n");

    let output = kvlint()
        .arg("--format")
        .arg("json")
        .arg(&file)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(parsed["diagnostics"][0]["code"], "single-quote");
    assert_eq!(parsed["diagnostics"][0]["line"], 1);
    assert_eq!(parsed["summary"]["total"], 1);
    Ok(())
}

#[test]
fn sarif_format_names_the_tool() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "bad.kv", "'key' \"value\"\n");

    let output = kvlint()
        .arg("--format")
        .arg("sarif")
        .arg(&file)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(
        parsed["runs"][0]["tool"]["driver"]["name"],
        "kvlint"
    );
    Ok(())
}

#[test]
fn directive_checking_flags_missing_includes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "items.kv", "\"items\" \"none\"\n");
    let file = write_file(
        temp.path(),
        "main.kv",
        "#base \"items.kv\"\n#base \"missing.kv\"\n\"root\"\n{\n}\n",
    );

    kvlint()
        .arg("--directives")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("unreadable-include"))
        .stdout(predicate::str::contains("missing.kv"));
    Ok(())
}

#[test]
fn directives_without_flag_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(
        temp.path(),
        "main.kv",
        "#base \"missing.kv\"\n\"root\"\n{\n}\n",
    );

    kvlint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn second_root_key_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(
        temp.path(),
        "two.kv",
        "\"a\"\n{\n}\n\"b\"\n{\n}\n",
    );

    kvlint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("data-after-root"));
    Ok(())
}

#[test]
fn multiple_roots_flag_permits_extra_root_keys() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let file = write_file(
        temp.path(),
        "two.kv",
        "\"a\"\n{\n}\n\"b\"\n{\n}\n",
    );

    kvlint()
        .arg("--multiple-roots")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn completions_print_a_bash_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kvlint"));
    cmd.arg("--completions").arg("bash");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kvlint"));
    Ok(())
}
