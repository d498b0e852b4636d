//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn matcheval() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("matcheval").unwrap()
}

/// `init` in a fresh temp dir, so every test starts from the sample data.
fn init_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    matcheval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

fn identity_args(cmd: &mut Command) -> &mut Command {
    cmd.arg("--surname")
        .arg("Ivanova")
        .arg("--username")
        .arg("anna")
        .arg("--affiliation")
        .arg("MSU")
}

#[test]
fn help_output() {
    matcheval()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Blind arena for comparing vacancy-matching methods",
        ));
}

#[test]
fn version_output() {
    matcheval()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matcheval"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    matcheval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created matcheval.toml"))
        .stdout(predicate::str::contains("Created data/vacancies/demo_latin.csv"));

    assert!(dir.path().join("matcheval.toml").exists());
    assert!(dir.path().join("data/vacancies/demo_latin.csv").exists());
    assert!(dir.path().join("data/vacancies/Вакансии_демо.csv").exists());
    assert!(dir.path().join("data/subjects/subjects.csv").exists());
    assert!(dir.path().join("data/arena").is_dir());
}

#[test]
fn init_skips_existing() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_demo_data() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Collection: demo_latin (2 records)"))
        .stdout(predicate::str::contains("Вакансии_демо (2 records)"))
        .stdout(predicate::str::contains("All collections valid."));
}

#[test]
fn validate_flags_schema_and_content_problems() {
    let dir = init_dir();
    std::fs::write(
        dir.path().join("data/vacancies/broken.csv"),
        "ID;Name;Description;SBERT_LLM\n1;x;y;z\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("data/vacancies/gappy.csv"),
        "ID;Name;Description;SBERT;SBERT_LLM\n1;x;y;;list\n1;x;y;CS=a|b|c;list\n",
    )
    .unwrap();

    matcheval()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("required column 'SBERT' is missing"))
        .stdout(predicate::str::contains("duplicate id"))
        .stdout(predicate::str::contains("empty SBERT payload"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_without_data_fails() {
    let dir = TempDir::new().unwrap();

    matcheval()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source collections found"));
}

#[test]
fn queue_lists_pending_records() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo_latin"))
        .stdout(predicate::str::contains("Вакансии_демо"))
        .stdout(predicate::str::contains("Data Analyst"))
        .stdout(predicate::str::contains("4 record(s) pending"));
}

#[test]
fn queue_json_interleaves_collections() {
    let dir = init_dir();

    let assert = matcheval()
        .current_dir(dir.path())
        .args(["queue", "--format", "json"])
        .assert()
        .success();

    let queue: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let keys: Vec<(String, String)> = queue
        .as_array()
        .unwrap()
        .iter()
        .map(|record| {
            (
                record["collection"].as_str().unwrap().to_string(),
                record["id"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    // Latin-initial collection first, then position-by-position round-robin.
    assert_eq!(
        keys,
        vec![
            ("demo_latin".to_string(), "1".to_string()),
            ("Вакансии_демо".to_string(), "1".to_string()),
            ("demo_latin".to_string(), "2".to_string()),
            ("Вакансии_демо".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn queue_limit_caps_each_collection() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .args(["queue", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 record(s) pending"));
}

#[test]
fn queue_requires_full_identity() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .args(["queue", "--surname", "Ivanova"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("all three"));
}

#[test]
fn submit_records_rating_and_shrinks_queue() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "8", "--score-b", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded: demo_latin/1"));

    let ledger = std::fs::read_to_string(dir.path().join("data/arena/demo_latin.csv")).unwrap();
    assert!(ledger.starts_with('\u{feff}'));
    assert!(ledger.contains("ID;SURNAME;USERNAME;AFFILIATION;SBERT;SBERT_LLM"));
    assert!(ledger.contains("1;Ivanova;anna;MSU;8;5"));

    // Rated for this identity, still pending for everyone else.
    identity_args(matcheval().current_dir(dir.path()).arg("queue"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 record(s) pending"));
    matcheval()
        .current_dir(dir.path())
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 record(s) pending"));
}

#[test]
fn submit_rejects_duplicate() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "8", "--score-b", "5"])
        .assert()
        .success();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "2", "--score-b", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already rated"));
}

#[test]
fn submit_unknown_collection() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "nope", "--id", "1"])
        .args(["--score-a", "5", "--score-b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown collection"));
}

#[test]
fn submit_unknown_record() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "99"])
        .args(["--score-a", "5", "--score-b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in collection"));
}

#[test]
fn submit_rejects_out_of_scale_score() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "11", "--score-b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the rating scale"));
}

#[test]
fn submit_rejects_incomplete_identity() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .arg("submit")
        .args(["--surname", "", "--username", "anna", "--affiliation", "MSU"])
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "5", "--score-b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete identity"));
}

#[test]
fn ledger_dir_env_override() {
    let dir = init_dir();
    let override_dir = TempDir::new().unwrap();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .env("MATCHEVAL_LEDGER_DIR", override_dir.path())
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "8", "--score-b", "5"])
        .assert()
        .success();

    assert!(override_dir.path().join("demo_latin.csv").exists());
    assert!(!dir.path().join("data/arena/demo_latin.csv").exists());
}

#[test]
fn custom_config_changes_the_scale() {
    let dir = init_dir();
    std::fs::write(dir.path().join("strict.toml"), "rating_scale = 5\n").unwrap();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--config", "strict.toml"])
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "7", "--score-b", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rating scale 1..=5"));
}

#[test]
fn stats_empty_ledgers() {
    let dir = init_dir();

    matcheval()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 submission(s) from 0 evaluator(s)"));
}

#[test]
fn stats_after_submissions() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("submit"))
        .args(["--collection", "demo_latin", "--id", "1"])
        .args(["--score-a", "8", "--score-b", "5"])
        .assert()
        .success();

    matcheval()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 submission(s) from 1 evaluator(s)"))
        .stdout(predicate::str::contains("demo_latin"));

    matcheval()
        .current_dir(dir.path())
        .args(["stats", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_submissions\": 1"));

    matcheval()
        .current_dir(dir.path())
        .args(["stats", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| demo_latin | 1 | 1 |"));
}

#[test]
fn rate_records_one_and_quits() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("rate"))
        .write_stdin("8\n5\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo_latin :: record 1"))
        .stdout(predicate::str::contains("Recorded: demo_latin/1"))
        .stdout(predicate::str::contains("Session ended"));

    assert!(dir.path().join("data/arena/demo_latin.csv").exists());

    matcheval()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 submission(s) from 1 evaluator(s)"));
}

#[test]
fn rate_reprompts_on_invalid_score() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("rate"))
        .write_stdin("99\nabc\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter a whole number between 1 and 10"));
}

#[test]
fn rate_quits_on_closed_stdin() {
    let dir = init_dir();

    identity_args(matcheval().current_dir(dir.path()).arg("rate"))
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ended"));
}
