//! Tests for error handling, suggestions, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn malformed_package_identifier_is_a_user_error() {
    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args(["plugin", "manifest", "cms-plugin"]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("vendor/name"));
}

#[test]
fn no_phase_error_suggests_both_flags() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args([
        "-p",
        temp.path().to_str().unwrap(),
        "assemble",
        "--preset",
        "demo",
    ]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Nothing to do"))
        .stderr(predicate::str::contains("Suggestions:"));
}

/// The plugin is supported (a manifest tree exists) but absent from the
/// lock file.
#[test]
fn uninstalled_package_suggests_requiring_it() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("composer.lock"),
        r#"{"packages": [], "packages-dev": []}"#,
    )
    .unwrap();
    let dir = temp.path().join("manifests/acme/cms-plugin/1.0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("manifest.json"),
        r#"{"steps": [], "configurators": []}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args([
        "-p",
        temp.path().to_str().unwrap(),
        "plugin",
        "manifest",
        "acme/cms-plugin",
    ]);

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("composer require acme/cms-plugin"));
}

/// Support for the plugin exists, but the project has never run a composer
/// install, so there is no lock file to read versions from.
#[test]
fn missing_lock_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("manifests/acme/cms-plugin/1.0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("manifest.json"),
        r#"{"steps": [], "configurators": []}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args([
        "-p",
        temp.path().to_str().unwrap(),
        "plugin",
        "manifest",
        "acme/cms-plugin",
    ]);

    cmd.assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("composer.lock"));
}

#[test]
fn no_manifest_bracket_at_or_below_target_is_not_found() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("composer.lock"),
        r#"{"packages": [{"name": "acme/cms-plugin", "version": "1.2.0"}], "packages-dev": []}"#,
    )
    .unwrap();

    // Only a 2.0 bracket exists — above the installed 1.2, so nothing matches.
    let dir = temp.path().join("manifests/acme/cms-plugin/2.0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("manifest.json"),
        r#"{"steps": [], "configurators": []}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args([
        "-p",
        temp.path().to_str().unwrap(),
        "plugin",
        "manifest",
        "acme/cms-plugin",
    ]);

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("1.2"));
}

#[test]
fn missing_explicit_config_file_exits_with_config_code() {
    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.args([
        "--config",
        "/definitely/not/here.toml",
        "plugin",
        "manifest",
        "acme/cms-plugin",
    ]);

    cmd.assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_subcommand_is_a_parse_error() {
    let mut cmd = Command::cargo_bin("storeforge").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure().code(2);
}
