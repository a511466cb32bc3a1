#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gifts(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gifts").unwrap();
    cmd.current_dir(dir.path()).env("GIFTS_ROOT", dir.path());
    cmd
}

fn init_root(dir: &TempDir) {
    gifts(dir).arg("init").assert().success();
}

/// Write a YAML answers file rating every question of the standard battery.
fn full_answers(dir: &TempDir, rating: u8) -> std::path::PathBuf {
    answers_for(dir, (1..=40).collect::<Vec<u32>>(), rating)
}

fn answers_for(dir: &TempDir, ids: Vec<u32>, rating: u8) -> std::path::PathBuf {
    let mut yaml = String::new();
    for id in ids {
        yaml.push_str(&format!("{id}: {rating}\n"));
    }
    let path = dir.path().join("answers.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn submit(dir: &TempDir, email: &str, rating: u8) {
    let answers = full_answers(dir, rating);
    gifts(dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            email,
            "--answers",
            answers.to_str().unwrap(),
        ])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// gifts init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    gifts(&dir).arg("init").assert().success();

    assert!(dir.path().join(".gifts").is_dir());
    assert!(dir.path().join(".gifts/results").is_dir());
    assert!(dir.path().join(".gifts/plans").is_dir());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    gifts(&dir).arg("init").assert().success();
    gifts(&dir).arg("init").assert().success();
}

// ---------------------------------------------------------------------------
// gifts questions / gifts gifts
// ---------------------------------------------------------------------------

#[test]
fn questions_lists_full_battery() {
    let dir = TempDir::new().unwrap();
    gifts(&dir)
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("40 questions, 8 per page, 5 pages"));
}

#[test]
fn gifts_lists_taxonomy() {
    let dir = TempDir::new().unwrap();
    gifts(&dir)
        .arg("gifts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leadership"))
        .stdout(predicate::str::contains("Administration"));
}

#[test]
fn questions_json_output() {
    let dir = TempDir::new().unwrap();
    let output = gifts(&dir)
        .args(["questions", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 40);
}

// ---------------------------------------------------------------------------
// gifts submit
// ---------------------------------------------------------------------------

#[test]
fn submit_full_battery_shows_scores() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    let answers = full_answers(&dir, 4);
    gifts(&dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--answers",
            answers.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results for Ana <ana@example.com>"))
        .stdout(predicate::str::contains("Top gifts:"));

    // One result file was persisted.
    let entries: Vec<_> = std::fs::read_dir(dir.path().join(".gifts/results"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn submit_refuses_incomplete_answers() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    let answers = answers_for(&dir, (1..=39).collect(), 3);
    gifts(&dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--answers",
            answers.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unanswered"));
}

#[test]
fn submit_refuses_bad_email() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    let answers = full_answers(&dir, 3);
    gifts(&dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            "not-an-email",
            "--answers",
            answers.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email"));
}

#[test]
fn submit_refuses_out_of_range_rating() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    let answers = answers_for(&dir, (1..=40).collect(), 9);
    gifts(&dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--answers",
            answers.to_str().unwrap(),
        ])
        .assert()
        .failure();
}

#[test]
fn submit_json_emits_result_document() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    let answers = full_answers(&dir, 5);
    let output = gifts(&dir)
        .args([
            "submit",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--answers",
            answers.to_str().unwrap(),
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["email"], "ana@example.com");
    assert_eq!(parsed["top_gifts"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["all_scores"].as_array().unwrap().len(), 10);
    assert!(parsed["id"].is_string());
}

// ---------------------------------------------------------------------------
// gifts results
// ---------------------------------------------------------------------------

#[test]
fn results_shows_latest_for_email() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 4);

    gifts(&dir)
        .args(["results", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results for Ana <ana@example.com>"))
        .stdout(predicate::str::contains("Taken:"));
}

#[test]
fn results_unknown_email_fails() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    gifts(&dir)
        .args(["results", "--email", "nobody@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stored results"));
}

// ---------------------------------------------------------------------------
// gifts plan
// ---------------------------------------------------------------------------

#[test]
fn plan_show_before_quiz_is_refused() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    gifts(&dir)
        .args(["plan", "show", "--email", "ana@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "complete the questionnaire first",
        ));
}

#[test]
fn plan_show_seeds_primary_gifts_from_results() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 3);

    gifts(&dir)
        .args(["plan", "show", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primary_gifts"))
        .stdout(predicate::str::contains("Leadership, Teaching, Service"));
}

#[test]
fn plan_set_then_show_roundtrip() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 3);

    gifts(&dir)
        .args([
            "plan",
            "set",
            "--email",
            "ana@example.com",
            "--field",
            "base_of_operations",
            "--value",
            "At home",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved plan"));

    gifts(&dir)
        .args(["plan", "show", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("At home"))
        .stdout(predicate::str::contains("Last updated:"));
}

#[test]
fn plan_set_unknown_field_fails() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 3);

    gifts(&dir)
        .args([
            "plan",
            "set",
            "--email",
            "ana@example.com",
            "--field",
            "bogus_field",
            "--value",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus_field"));
}

#[test]
fn plan_category_flags_persist() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 3);

    gifts(&dir)
        .args([
            "plan",
            "category",
            "--email",
            "ana@example.com",
            "--organic",
            "true",
        ])
        .assert()
        .success();

    gifts(&dir)
        .args(["plan", "show", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "numeric=false maturity=false organic=true",
        ));
}

#[test]
fn plan_fields_lists_every_field() {
    let dir = TempDir::new().unwrap();
    gifts(&dir)
        .args(["plan", "fields"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primary_gifts"))
        .stdout(predicate::str::contains("timeline_long_term"));
}

#[test]
fn plan_is_keyed_by_sanitized_email() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    submit(&dir, "ana@example.com", 3);

    gifts(&dir)
        .args([
            "plan",
            "set",
            "--email",
            "ana@example.com",
            "--field",
            "chosen_ministries",
            "--value",
            "Welcome team",
        ])
        .assert()
        .success();

    assert!(dir.path().join(".gifts/plans/ana@example.com.yaml").exists());
}
