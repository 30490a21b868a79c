//! Integration tests for the webshop analyzer CLI.
//!
//! These tests run the actual binary inside a temporary directory and check
//! the report files it leaves behind.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CUSTOMERS: &str = "S1;C1;Alice;Addr1\nS1;C2;Bob;Addr2\nS2;C3;Carol;Addr3\n";

const PAYMENTS: &str = "\
S1;C1;card;100;;4111;2024-01-01
S1;C2;transfer;50;BANK1;;2024-01-02
S2;C3;card;75;;5500;2024-01-03
S1;C1;card;10;BANK2;;2024-01-04
S1;C9;card;10;;4111;2024-01-05
";

/// Create a working directory holding the given sources
fn workspace(customers: Option<&str>, payments: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some(customers) = customers {
        fs::write(dir.path().join("customer.csv"), customers).unwrap();
    }
    if let Some(payments) = payments {
        fs::write(dir.path().join("payments.csv"), payments).unwrap();
    }
    dir
}

fn analyzer(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("webshop-analyzer").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_default_file_names() {
    let dir = workspace(Some(CUSTOMERS), Some(PAYMENTS));
    analyzer(dir.path()).assert().success();

    assert_eq!(
        read(dir.path(), "report01.csv"),
        "Alice;Addr1;100\nBob;Addr2;50\nCarol;Addr3;75\n"
    );
    assert_eq!(read(dir.path(), "report02.csv"), "S1;100;50\nS2;75;0\n");
    assert_eq!(
        read(dir.path(), "top.csv"),
        "Alice;Addr1;100\nCarol;Addr3;75\n"
    );
}

#[test]
fn test_rejected_lines_are_logged() {
    let dir = workspace(Some(CUSTOMERS), Some(PAYMENTS));
    analyzer(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("line 4: invalid payment data"))
        .stderr(predicate::str::contains("line 5: customer C9 not found"));
}

#[test]
fn test_explicit_paths() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    fs::create_dir_all(&input).unwrap();
    fs::create_dir_all(&output).unwrap();
    fs::write(input.join("shops.txt"), CUSTOMERS).unwrap();
    fs::write(input.join("pay.txt"), PAYMENTS).unwrap();

    analyzer(dir.path())
        .arg("--customers")
        .arg(input.join("shops.txt"))
        .arg("--payments")
        .arg(input.join("pay.txt"))
        .arg("--customer-report")
        .arg(output.join("customers.csv"))
        .arg("--webshop-report")
        .arg(output.join("webshops.csv"))
        .arg("--top-report")
        .arg(output.join("best.csv"))
        .arg("--top")
        .arg("1")
        .assert()
        .success();

    assert_eq!(read(&output, "webshops.csv"), "S1;100;50\nS2;75;0\n");
    assert_eq!(read(&output, "best.csv"), "Alice;Addr1;100\n");
    assert!(output.join("customers.csv").exists());
}

#[test]
fn test_missing_payments_gives_zero_totals() {
    let dir = workspace(Some(CUSTOMERS), None);
    analyzer(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("error reading payments"));

    assert_eq!(
        read(dir.path(), "report01.csv"),
        "Alice;Addr1;0\nBob;Addr2;0\nCarol;Addr3;0\n"
    );
    assert_eq!(read(dir.path(), "report02.csv"), "S1;0;0\nS2;0;0\n");
    assert_eq!(read(dir.path(), "top.csv"), "Alice;Addr1;0\nBob;Addr2;0\n");
}

#[test]
fn test_missing_sources_give_empty_reports() {
    let dir = workspace(None, None);
    analyzer(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("error reading customers"));

    for report in ["report01.csv", "report02.csv", "top.csv"] {
        assert_eq!(read(dir.path(), report), "");
    }
}

#[test]
fn test_unwritable_report_does_not_stop_others() {
    let dir = workspace(Some(CUSTOMERS), Some(PAYMENTS));
    analyzer(dir.path())
        .arg("--webshop-report")
        .arg(dir.path().join("missing-dir").join("report02.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("error generating webshop report"));

    assert!(dir.path().join("report01.csv").exists());
    assert!(dir.path().join("top.csv").exists());
    assert!(!dir.path().join("missing-dir").exists());
}

#[test]
fn test_log_file() {
    let dir = workspace(Some("S1;C1;Alice\n"), Some(""));
    analyzer(dir.path())
        .arg("--log-file")
        .arg("application.log")
        .assert()
        .success();

    let log = read(dir.path(), "application.log");
    assert!(log.contains("line 1: invalid customer data"));
}

#[test]
fn test_invalid_top_count_is_a_usage_error() {
    let dir = workspace(None, None);
    analyzer(dir.path())
        .arg("--top")
        .arg("many")
        .assert()
        .failure();

    assert!(!dir.path().join("report01.csv").exists());
}
