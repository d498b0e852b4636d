//! Loads the reference subject vocabulary from a directory of CSV files.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;

use matcheval_core::course::SubjectVocabulary;

use crate::discover::{collection_name, discover_collections};
use crate::reader::strip_bom;

/// Reads every CSV under `dir` and collects the values of `subject_column`
/// into one vocabulary. Files lacking the column are skipped with a
/// warning rather than failing the load: the vocabulary directory tends to
/// accumulate exports with drifting headers, and a partial vocabulary is
/// more useful than none.
pub fn load_vocabulary(dir: &Path, subject_column: &str) -> Result<SubjectVocabulary> {
    let mut names: Vec<String> = Vec::new();
    for path in discover_collections(dir)? {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read vocabulary file: {}", path.display()))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(strip_bom(&raw).as_bytes());

        let headers = reader
            .headers()
            .with_context(|| format!("failed to read vocabulary header: {}", path.display()))?;
        let Some(column) = headers.iter().position(|h| h.trim() == subject_column) else {
            warn!(
                file = %collection_name(&path),
                subject_column,
                "vocabulary file lacks the subject column, skipping it"
            );
            continue;
        };

        for row in reader.records() {
            let row = row
                .with_context(|| format!("failed to read vocabulary row: {}", path.display()))?;
            let name = row.get(column).unwrap_or("").trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }

    let vocabulary = SubjectVocabulary::new(names);
    if vocabulary.is_empty() {
        warn!("subject vocabulary is empty, every subject will be flagged as unknown");
    }
    Ok(vocabulary)
}
