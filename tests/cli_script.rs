mod common;

use assert_cmd::Command;
use dealbook::storage::{JsonStorage, StorageBackend};
use predicates::prelude::*;
use predicates::str::contains;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("dealbook_cli").unwrap();
    cmd.env("DEALBOOK_HOME", home)
        .env("RUST_LOG", "off")
        .env_remove("DEALBOOK_CLI_ARGS")
        .env_remove("DEALBOOK_CLI_SCRIPT");
    cmd
}

fn seeded_home() -> std::path::PathBuf {
    let home = common::temp_base();
    let storage = JsonStorage::new(Some(home.clone()), None).unwrap();
    storage.save(&common::showroom_book(), "default").unwrap();
    home
}

#[test]
fn version_prints_build_summary() {
    let home = common::temp_base();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(format!("dealbook {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn deals_listing_pages_and_sorts() {
    let home = seeded_home();
    cli(&home)
        .args(["deals", "--sort", "balance", "--page-size", "2"])
        .assert()
        .success()
        .stdout(contains("=== Deals ==="))
        .stdout(contains("Dana Levi"))
        .stdout(contains("-$55,000.00"))
        .stdout(contains("Omer Katz"))
        .stdout(contains("avi cohen").not())
        .stdout(contains("page 1/2 (3 records), next: --page 2"));
}

#[test]
fn arguments_can_come_from_the_environment() {
    let home = seeded_home();
    cli(&home)
        .env("DEALBOOK_CLI_ARGS", "cars --filter 'make=mazda'")
        .assert()
        .success()
        .stdout(contains("CX-5"))
        .stdout(contains("Corolla").not());
}

#[test]
fn script_mode_runs_each_line() {
    let home = seeded_home();
    cli(&home)
        .env("DEALBOOK_CLI_SCRIPT", "1")
        .write_stdin("orders --filter status=confirmed\nbogus\nbooks\nexit\n")
        .assert()
        .success()
        .stdout(contains("Omer Katz"))
        .stdout(contains("default"))
        .stderr(contains("unknown command `bogus`"));
}

#[test]
fn usage_errors_exit_non_zero() {
    let home = common::temp_base();
    cli(&home)
        .args(["deals", "--page", "first"])
        .assert()
        .failure()
        .stderr(contains("--page expects a whole number"));
}
