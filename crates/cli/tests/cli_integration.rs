//! End-to-end tests of the `commis` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_rules(dir: &tempfile::TempDir, name: &str, body: serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn good_rules() -> serde_json::Value {
    serde_json::json!({
        "order_days": ["mardi", "vendredi"],
        "order_deadline_hour": 11,
        "delivery_days": [],
        "delivery_delay_days": 1,
        "delivery_time": "11:00",
        "special_rules": "commande samedi, livraison lundi"
    })
}

#[test]
fn validate_accepts_good_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(&dir, "rules.json", good_rules());

    Command::cargo_bin("commis")
        .unwrap()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("rules valid"));
}

#[test]
fn validate_reports_every_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(
        &dir,
        "rules.json",
        serde_json::json!({
            "order_days": ["funday"],
            "order_deadline_hour": 24,
            "delivery_time": "noon"
        }),
    );

    Command::cargo_bin("commis")
        .unwrap()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("order_days")
                .and(predicate::str::contains("order_deadline_hour"))
                .and(predicate::str::contains("delivery_time")),
        );
}

#[test]
fn validate_json_output_carries_the_violation_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(
        &dir,
        "rules.json",
        serde_json::json!({
            "order_deadline_hour": -3,
            "delivery_time": "11:00"
        }),
    );

    let output = Command::cargo_bin("commis")
        .unwrap()
        .args(["--output", "json", "validate", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["valid"], serde_json::json!(false));
    assert_eq!(
        body["violations"][0]["field"],
        serde_json::json!("order_deadline_hour")
    );
}

#[test]
fn resolve_with_fixed_instant() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(&dir, "rules.json", good_rules());

    // Wednesday 2026-08-19 09:00 -> next order day Friday, delivery Saturday.
    Command::cargo_bin("commis")
        .unwrap()
        .args([
            "resolve",
            path.to_str().unwrap(),
            "--now",
            "2026-08-19T09:00",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("can_order_now: false")
                .and(predicate::str::contains("order_date: 2026-08-21"))
                .and(predicate::str::contains(
                    "estimated_delivery_date: 2026-08-22T11:00",
                )),
        );
}

#[test]
fn resolve_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(&dir, "rules.json", good_rules());

    let output = Command::cargo_bin("commis")
        .unwrap()
        .args([
            "--output",
            "json",
            "resolve",
            path.to_str().unwrap(),
            "--now",
            "2026-08-21T08:30",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    // Friday before the deadline: order today.
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["can_order_now"], serde_json::json!(true));
    assert_eq!(body["order_date"], serde_json::json!("2026-08-21"));
}

#[test]
fn resolve_rejects_malformed_instant() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(&dir, "rules.json", good_rules());

    Command::cargo_bin("commis")
        .unwrap()
        .args(["resolve", path.to_str().unwrap(), "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid instant"));
}

#[test]
fn explain_prints_trace_and_advisory_note() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rules(&dir, "rules.json", good_rules());

    Command::cargo_bin("commis")
        .unwrap()
        .args([
            "explain",
            path.to_str().unwrap(),
            "--now",
            "2026-08-19T09:00",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("mercredi is not an allowed order day")
                .and(predicate::str::contains("next order day is 2026-08-21"))
                .and(predicate::str::contains(
                    "note: commande samedi, livraison lundi",
                )),
        );
}
