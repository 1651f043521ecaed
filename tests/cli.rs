#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    config: TempDir,
    data: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            config: tempfile::tempdir().unwrap(),
            data: tempfile::tempdir().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fintrack").unwrap();
        cmd.env("FINTRACK_CONFIG_DIR", self.config.path())
            .env("FINTRACK_DATA_DIR", self.data.path())
            .env("FINTRACK_LOG", "off");
        cmd
    }
}

// ── Basics ────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add <subcategory> <amount>"))
        .stdout(predicate::str::contains("import <file.json>"));
}

#[test]
fn version_prints_package_version() {
    Sandbox::new()
        .cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fintrack "));
}

#[test]
fn unknown_command_fails() {
    Sandbox::new()
        .cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
}

#[test]
fn categories_lists_schema() {
    Sandbox::new()
        .cmd()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Essentials (#1D3557)"))
        .stdout(predicate::str::contains("Education"));
}

// ── Amounts ───────────────────────────────────────────────────

#[test]
fn add_persists_between_runs() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Groceries", "42.567"])
        .assert()
        .success()
        .stdout("Groceries is now $42.56\n");

    sandbox
        .cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$42.56"))
        .stdout(predicate::str::contains("100.00%"));

    assert!(sandbox.data.path().join("fintrack.db").exists());
}

#[test]
fn subtract_clamps_at_zero() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["add", "Food", "10"]).assert().success();
    sandbox
        .cmd()
        .args(["add", "Food", "-100"])
        .assert()
        .success()
        .stdout("Food is now $0.00\n");
}

#[test]
fn add_unknown_subcategory_changes_nothing() {
    Sandbox::new()
        .cmd()
        .args(["add", "Yachts", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));
}

#[test]
fn empty_summary_shows_placeholder() {
    Sandbox::new()
        .cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data yet"));
}

// ── Export / import ───────────────────────────────────────────

#[test]
fn export_then_import_round_trips() {
    let sandbox = Sandbox::new();
    let file = sandbox.data.path().join("out.json");
    sandbox.cmd().args(["add", "Housing", "1200"]).assert().success();
    sandbox
        .cmd()
        .args(["export", file.to_str().unwrap()])
        .assert()
        .success();

    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.contains("\"Housing\": {\n        \"amount\": 1200,"));

    let other = Sandbox::new();
    other
        .cmd()
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success();
    other
        .cmd()
        .arg("summary")
        .assert()
        .stdout(predicate::str::contains("$1,200.00"));
}

#[test]
fn import_with_extra_category_is_rejected() {
    let sandbox = Sandbox::new();
    let file = sandbox.data.path().join("bad.json");
    std::fs::write(
        &file,
        r##"{"Essentials":{"subCategory":{},"color":"#1D3557"},"Luxury":{},"Growth":{},"Bonus":{}}"##,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data invalid."));
}

#[test]
fn import_missing_file_reports_read_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["import", "/no/such/file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error while reading file."));
}

// ── Clear ─────────────────────────────────────────────────────

#[test]
fn clear_requires_confirmation() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["add", "Savings", "5"]).assert().success();
    sandbox
        .cmd()
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    sandbox
        .cmd()
        .arg("summary")
        .assert()
        .stdout(predicate::str::contains("$5.00"));

    sandbox.cmd().args(["clear", "--yes"]).assert().success();
    sandbox
        .cmd()
        .arg("summary")
        .assert()
        .stdout(predicate::str::contains("No data yet"));
}
