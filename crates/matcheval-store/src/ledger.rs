//! Append-only rating ledgers, one file per source collection.
//!
//! A ledger row is written exactly once per rated record and never
//! touched again. There is no cross-process locking: two independent
//! processes appending to the same file at the same moment can interleave
//! rows. That is an accepted limitation of the format — the arena re-reads
//! the ledgers before every queue computation instead of trusting any
//! in-memory copy.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use matcheval_core::model::{LedgerSet, RatingSubmission};

use crate::discover::{collection_name, discover_collections};
use crate::reader::strip_bom;

const LEDGER_COLUMNS: [&str; 6] = ["ID", "SURNAME", "USERNAME", "AFFILIATION", "SBERT", "SBERT_LLM"];

/// Path of the ledger file mirroring a source collection.
pub fn ledger_path(ledger_dir: &Path, collection: &str) -> PathBuf {
    ledger_dir.join(format!("{collection}.csv"))
}

/// Reads one ledger file.
///
/// A missing file is zero submissions, not an error — that is the normal
/// state before anyone rates the collection. A file without the expected
/// columns is ignored with a warning so one stray CSV in the ledger
/// directory cannot poison the exclusion set.
pub fn read_ledger(path: &Path) -> Result<LedgerSet> {
    let name = collection_name(path);
    if !path.exists() {
        return Ok(LedgerSet {
            name,
            submissions: Vec::new(),
        });
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger file: {}", path.display()))?;
    let submissions = parse_ledger(strip_bom(&raw), &name);
    Ok(LedgerSet { name, submissions })
}

fn parse_ledger(raw: &str, collection: &str) -> Vec<RatingSubmission> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            warn!(collection, %err, "ignoring unreadable ledger");
            return Vec::new();
        }
    };
    let positions: Option<Vec<usize>> = LEDGER_COLUMNS
        .iter()
        .map(|name| headers.iter().position(|h| h.trim() == *name))
        .collect();
    let Some(positions) = positions else {
        warn!(collection, "ledger lacks the expected columns, ignoring it");
        return Vec::new();
    };

    let mut submissions = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(collection, row = index + 2, %err, "skipping unreadable ledger row");
                continue;
            }
        };
        let field = |slot: usize| row.get(positions[slot]).unwrap_or("").trim();

        let record_id = field(0);
        if record_id.is_empty() {
            continue;
        }
        let (Ok(score_a), Ok(score_b)) = (field(4).parse::<u8>(), field(5).parse::<u8>()) else {
            warn!(collection, row = index + 2, "skipping ledger row with non-numeric scores");
            continue;
        };
        submissions.push(RatingSubmission {
            record_id: record_id.to_string(),
            surname: field(1).to_string(),
            username: field(2).to_string(),
            affiliation: field(3).to_string(),
            score_a,
            score_b,
        });
    }
    submissions
}

/// Re-reads every ledger under `dir`. Callers do this before each queue
/// computation so rows appended by other evaluators since the last action
/// are visible.
pub fn read_all_ledgers(dir: &Path) -> Result<Vec<LedgerSet>> {
    let mut sets = Vec::new();
    for path in discover_collections(dir)? {
        sets.push(read_ledger(&path)?);
    }
    Ok(sets)
}

/// Appends one rating row, creating the ledger with a byte-order mark and
/// a header row on first write.
pub fn append_rating(
    ledger_dir: &Path,
    collection: &str,
    submission: &RatingSubmission,
) -> Result<()> {
    std::fs::create_dir_all(ledger_dir)
        .with_context(|| format!("failed to create ledger directory: {}", ledger_dir.display()))?;
    let path = ledger_path(ledger_dir, collection);
    let fresh = !path.exists();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open ledger file: {}", path.display()))?;
    if fresh {
        file.write_all("\u{feff}".as_bytes())
            .with_context(|| format!("failed to start ledger file: {}", path.display()))?;
    }

    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(file);
    if fresh {
        writer.write_record(LEDGER_COLUMNS)?;
    }
    let score_a = submission.score_a.to_string();
    let score_b = submission.score_b.to_string();
    writer.write_record([
        submission.record_id.as_str(),
        submission.surname.as_str(),
        submission.username.as_str(),
        submission.affiliation.as_str(),
        score_a.as_str(),
        score_b.as_str(),
    ])?;
    writer
        .flush()
        .with_context(|| format!("failed to flush ledger file: {}", path.display()))?;

    debug!(collection, record_id = %submission.record_id, "rating appended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcheval_core::model::EvaluatorIdentity;
    use tempfile::TempDir;

    fn submission(id: &str, score_a: u8, score_b: u8) -> RatingSubmission {
        let identity = EvaluatorIdentity::new("Ivanova", "anna", "MSU");
        RatingSubmission::new(id, &identity, score_a, score_b, 10).unwrap()
    }

    #[test]
    fn missing_ledger_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let set = read_ledger(&dir.path().join("absent.csv")).unwrap();
        assert_eq!(set.name, "absent");
        assert!(set.submissions.is_empty());
    }

    #[test]
    fn first_write_creates_header_and_bom() {
        let dir = TempDir::new().unwrap();
        append_rating(dir.path(), "alpha", &submission("1", 8, 3)).unwrap();

        let raw = std::fs::read_to_string(ledger_path(dir.path(), "alpha")).unwrap();
        assert!(raw.starts_with('\u{feff}'));
        let mut lines = raw.trim_start_matches('\u{feff}').lines();
        assert_eq!(lines.next(), Some("ID;SURNAME;USERNAME;AFFILIATION;SBERT;SBERT_LLM"));
        assert_eq!(lines.next(), Some("1;Ivanova;anna;MSU;8;3"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn later_writes_append_without_header() {
        let dir = TempDir::new().unwrap();
        append_rating(dir.path(), "alpha", &submission("1", 8, 3)).unwrap();
        append_rating(dir.path(), "alpha", &submission("2", 5, 9)).unwrap();

        let raw = std::fs::read_to_string(ledger_path(dir.path(), "alpha")).unwrap();
        assert_eq!(raw.matches("SURNAME").count(), 1);

        let set = read_ledger(&ledger_path(dir.path(), "alpha")).unwrap();
        assert_eq!(set.submissions.len(), 2);
        assert_eq!(set.submissions[1].record_id, "2");
        assert_eq!(set.submissions[1].score_a, 5);
        assert_eq!(set.submissions[1].score_b, 9);
    }

    #[test]
    fn round_trip_preserves_identity_fields() {
        let dir = TempDir::new().unwrap();
        let identity = EvaluatorIdentity::new("Ivanova", "anna", "MSU");
        append_rating(dir.path(), "alpha", &submission("12", 7, 4)).unwrap();

        let set = read_ledger(&ledger_path(dir.path(), "alpha")).unwrap();
        assert!(set.contains_rating(&identity, "12"));
        assert!(!set.contains_rating(&identity, "13"));
    }

    #[test]
    fn fields_containing_the_delimiter_survive_a_round_trip() {
        let dir = TempDir::new().unwrap();
        let identity = EvaluatorIdentity::new("Ivanova; Anna", "anna", "MSU; dept. 7");
        let row = RatingSubmission::new("1", &identity, 6, 6, 10).unwrap();
        append_rating(dir.path(), "alpha", &row).unwrap();

        let set = read_ledger(&ledger_path(dir.path(), "alpha")).unwrap();
        assert_eq!(set.submissions[0].surname, "Ivanova; Anna");
        assert_eq!(set.submissions[0].affiliation, "MSU; dept. 7");
    }

    #[test]
    fn foreign_csv_in_ledger_dir_is_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stray.csv"), "a;b;c\n1;2;3\n").unwrap();

        let set = read_ledger(&dir.path().join("stray.csv")).unwrap();
        assert!(set.submissions.is_empty());
    }

    #[test]
    fn rows_with_bad_scores_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alpha.csv");
        std::fs::write(
            &path,
            "ID;SURNAME;USERNAME;AFFILIATION;SBERT;SBERT_LLM\n\
             1;Ivanova;anna;MSU;high;3\n\
             2;Ivanova;anna;MSU;4;5\n",
        )
        .unwrap();

        let set = read_ledger(&path).unwrap();
        assert_eq!(set.submissions.len(), 1);
        assert_eq!(set.submissions[0].record_id, "2");
    }

    #[test]
    fn read_all_ledgers_spans_the_directory() {
        let dir = TempDir::new().unwrap();
        append_rating(dir.path(), "alpha", &submission("1", 5, 5)).unwrap();
        append_rating(dir.path(), "Бета", &submission("2", 6, 6)).unwrap();

        let sets = read_all_ledgers(dir.path()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "alpha");
        assert_eq!(sets[1].name, "Бета");
    }

    #[test]
    fn reads_bom_prefixed_ledger_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alpha.csv");
        std::fs::write(
            &path,
            "\u{feff}ID;SURNAME;USERNAME;AFFILIATION;SBERT;SBERT_LLM\n7;Ivanova;anna;MSU;9;2\n",
        )
        .unwrap();

        let set = read_ledger(&path).unwrap();
        assert_eq!(set.submissions.len(), 1);
        assert_eq!(set.submissions[0].record_id, "7");
        assert_eq!(set.submissions[0].score_a, 9);
    }
}
