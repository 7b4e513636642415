use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_malformed_csv_handling() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "region, amount, reference").unwrap();
    // Valid
    writeln!(csv, "CZ, 10.00, ok-1").unwrap();
    // Missing a column
    writeln!(csv, "SK, 5").unwrap();
    // Valid again
    writeln!(csv, "PL, 7.50, ok-2").unwrap();

    let mut cmd = Command::new(cargo_bin!("regiopay"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading payment intent"))
        .stdout(predicate::str::contains("ok-1,Czech Republic,CZK,completed"))
        .stdout(predicate::str::contains("ok-2,Poland,PLN,completed"));
}

#[test]
fn test_invalid_amounts_are_reported_per_row() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "region, amount, reference").unwrap();
    writeln!(csv, "Hungary, not_a_number, bad-1").unwrap();
    writeln!(csv, "Hungary, -4, bad-2").unwrap();
    writeln!(csv, "Hungary, 1.005, bad-3").unwrap();
    writeln!(csv, "Hungary, 0.01, good").unwrap();

    let mut cmd = Command::new(cargo_bin!("regiopay"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bad-1,Hungary,,invalid_intent,"))
        .stdout(predicate::str::contains("bad-2,Hungary,,invalid_intent,"))
        .stdout(predicate::str::contains("bad-3,Hungary,,invalid_intent,"))
        .stdout(predicate::str::contains("good,Hungary,HUF,completed,huf-good"));
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = Command::new(cargo_bin!("regiopay"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
