use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const TWO_SITES: &str = r#"
ip: 10.0.0.5
memory: 1024
cpus: 2
authorize: ~/.ssh/id_rsa.pub
sites:
    - { name: A, domain: a.dev, directory: /srv/a, webroot: web }
    - { name: B, domain: b.dev, directory: /srv/b, webroot: public }
"#;

/// Writes `contents` as the configuration document in a fresh directory.
fn document(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("uberstead.yaml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn uberstead(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("uberstead").unwrap();
    cmd.env("UBERSTEAD_TEST_MODE", "1")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_hosts_row() {
    let (_dir, path) = document(TWO_SITES);

    uberstead(&path)
        .args(["sites", "hosts-row"])
        .assert()
        .success()
        .stdout("10.0.0.5 a.dev b.dev\n");
}

#[test]
fn test_hosts_row_without_document_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("uberstead.yaml");

    uberstead(&path)
        .args(["sites", "hosts-row"])
        .assert()
        .success()
        .stdout("192.168.10.10\n");

    // reading never creates the document
    assert!(!path.exists());
}

#[test]
fn test_list_attribute() {
    let (_dir, path) = document(TWO_SITES);

    uberstead(&path)
        .args(["sites", "list", "--attribute", "webroot"])
        .assert()
        .success()
        .stdout("web\npublic\n");
}

#[test]
fn test_list_table() {
    let (_dir, path) = document(TWO_SITES);

    uberstead(&path)
        .args(["sites", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("NAME")
                .and(predicate::str::contains("/srv/b"))
                .and(predicate::str::contains("b.dev")),
        );
}

#[test]
fn test_list_without_sites() {
    let (_dir, path) = document("ip: 10.0.0.5\n");

    uberstead(&path)
        .args(["sites", "list"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No sites registered yet"));
}

#[test]
fn test_unknown_attribute_fails() {
    let (_dir, path) = document(TWO_SITES);

    uberstead(&path)
        .args(["sites", "list", "--attribute", "color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Unknown site attribute 'color'",
        ));
}

#[test]
fn test_duplicate_site_names_fail_to_load() {
    let (_dir, path) = document(
        "sites:\n    - { name: A, domain: a.dev, directory: /a }\n    - { name: A, domain: b.dev, directory: /b }\n",
    );

    uberstead(&path)
        .args(["sites", "hosts-row"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A site named 'A' already exists"));
}

#[test]
fn test_invalid_domain_in_document_fails_to_load() {
    let (_dir, path) = document(
        "sites:\n    - { name: A, domain: \"exa mple.com\", directory: /a }\n",
    );

    uberstead(&path)
        .args(["sites", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Validation error: sites[0]"));
}

#[test]
fn test_read_commands_leave_document_untouched() {
    let (_dir, path) = document(TWO_SITES);

    uberstead(&path).args(["sites", "list"]).assert().success();
    uberstead(&path).args(["sites", "hosts-row"]).assert().success();

    assert_eq!(fs::read_to_string(&path).unwrap(), TWO_SITES);
}

#[test]
fn test_help_lists_commands() {
    let dir = tempdir().unwrap();

    uberstead(&dir.path().join("uberstead.yaml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("configure").and(predicate::str::contains("sites")),
        );
}
