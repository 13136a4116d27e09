#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sprig_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("sprig"));
    cmd.env("SPRIG_DATA", data.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_list_and_water() {
    let data = TempDir::new().unwrap();

    sprig_cmd(&data)
        .args(["add", "Monstera", "--species", "Monstera deliciosa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant added: Monstera"));

    sprig_cmd(&data)
        .args(["add", "Boston Fern", "--water-every", "3", "--location", "outdoor"])
        .assert()
        .success();

    sprig_cmd(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monstera"))
        .stdout(predicate::str::contains("Boston Fern"))
        .stdout(predicate::str::contains("water in 7 days"));

    sprig_cmd(&data)
        .args(["list", "--location", "outdoor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boston Fern"))
        .stdout(predicate::str::contains("Monstera").not());

    sprig_cmd(&data)
        .args(["water", "boston fern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watered Boston Fern"));

    sprig_cmd(&data)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boston Fern"));

    let blob = fs::read_to_string(data.path().join("plants.json")).unwrap();
    assert!(blob.contains("\"wateringFrequency\":3"));
}

#[test]
fn test_reminders_on_fresh_plant() {
    let data = TempDir::new().unwrap();
    sprig_cmd(&data).args(["add", "Aloe"]).assert().success();

    sprig_cmd(&data)
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upcoming"))
        .stdout(predicate::str::contains("Overdue").not());
}

#[test]
fn test_unknown_plant_fails() {
    let data = TempDir::new().unwrap();
    sprig_cmd(&data)
        .args(["water", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plant not found"));
}

#[test]
fn test_zero_frequency_fails() {
    let data = TempDir::new().unwrap();
    sprig_cmd(&data)
        .args(["add", "Dry", "--water-every", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid frequency"));
    assert!(!data.path().join("plants.json").exists());
}

#[test]
fn test_edit_and_delete() {
    let data = TempDir::new().unwrap();
    sprig_cmd(&data).args(["add", "Ficus"]).assert().success();

    sprig_cmd(&data)
        .args(["edit", "1", "--name", "Rubber Tree", "--light", "medium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant updated (1): Rubber Tree"));

    sprig_cmd(&data)
        .args(["view", "rubber tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("medium"));

    sprig_cmd(&data)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant deleted (1): Rubber Tree"));

    sprig_cmd(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plants found."));
}

#[test]
fn test_theme_profile_and_config() {
    let data = TempDir::new().unwrap();

    sprig_cmd(&data)
        .args(["theme", "warm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to Warm"));
    assert_eq!(
        fs::read_to_string(data.path().join("theme")).unwrap(),
        "warm"
    );

    sprig_cmd(&data)
        .args(["profile", "--name", "Ona", "--email", "ona@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated"));

    sprig_cmd(&data)
        .args(["profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ona@example.com"));

    sprig_cmd(&data)
        .args(["config", "soon-days", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("soon-days set to 4"));

    sprig_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identifier = catalog"));
}

#[test]
fn test_identify_with_catalog() {
    let data = TempDir::new().unwrap();
    let image = data.path().join("leaf.png");
    fs::write(&image, b"not really a png").unwrap();

    sprig_cmd(&data)
        .args(["config", "lookup-delay-ms", "0"])
        .assert()
        .success();

    sprig_cmd(&data)
        .args(["identify", image.to_str().unwrap(), "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant added"));

    let blob = fs::read_to_string(data.path().join("plants.json")).unwrap();
    assert!(blob.contains("data:image/png;base64,"));
}

#[test]
fn test_identify_without_api_key_fails() {
    let data = TempDir::new().unwrap();
    let image = data.path().join("leaf.jpg");
    fs::write(&image, b"jpeg bytes").unwrap();

    sprig_cmd(&data)
        .args(["config", "identifier", "plant_id"])
        .assert()
        .success();

    sprig_cmd(&data)
        .args(["identify", image.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}
