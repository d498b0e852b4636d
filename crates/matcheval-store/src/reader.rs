//! Typed ingestion of source-collection files.
//!
//! Source files are `;`-delimited CSV with a header row. Columns are
//! resolved by name once per file and records come out as plain structs;
//! a file missing a required column is rejected up front instead of
//! surfacing as missing-key lookups halfway through a session.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;

use matcheval_core::error::ArenaError;
use matcheval_core::model::{RecordSet, SourceRecord};

use crate::discover::collection_name;

const COL_ID: &str = "ID";
const COL_NAME: &str = "Name";
const COL_DESCRIPTION: &str = "Description";
const COL_SBERT: &str = "SBERT";
const COL_SBERT_LLM: &str = "SBERT_LLM";
/// Optional: records without it simply carry no key skills.
const COL_KEY_SKILLS: &str = "KeySkills";

/// Strips a leading UTF-8 byte-order mark. Spreadsheet exports routinely
/// carry one; the parser must not see it glued to the first header.
pub(crate) fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Reads one source file into a typed record set.
pub fn read_record_set(path: &Path) -> Result<RecordSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file: {}", path.display()))?;
    let name = collection_name(path);
    let records = parse_records(strip_bom(&raw), &name)?;
    Ok(RecordSet { name, records })
}

/// Parses source CSV text into records. Fails fast with
/// [`ArenaError::SchemaMismatch`] when a required column is absent; rows
/// the reader cannot shape are skipped with a warning.
pub fn parse_records(raw: &str, collection: &str) -> Result<Vec<SourceRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of '{collection}'"))?
        .clone();
    let required = |name: &str| -> Result<usize, ArenaError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ArenaError::SchemaMismatch {
                file: collection.to_string(),
                column: name.to_string(),
            })
    };

    let id_col = required(COL_ID)?;
    let name_col = required(COL_NAME)?;
    let description_col = required(COL_DESCRIPTION)?;
    let sbert_col = required(COL_SBERT)?;
    let sbert_llm_col = required(COL_SBERT_LLM)?;
    let key_skills_col = headers.iter().position(|h| h.trim() == COL_KEY_SKILLS);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(collection, row = index + 2, %err, "skipping unreadable row");
                continue;
            }
        };
        let field = |col: usize| row.get(col).unwrap_or("").trim();

        let id = field(id_col);
        if id.is_empty() {
            warn!(collection, row = index + 2, "skipping row with empty ID");
            continue;
        }
        let key_skills = key_skills_col
            .map(|col| field(col).to_string())
            .filter(|s| !s.is_empty());

        records.push(SourceRecord {
            id: id.to_string(),
            collection: collection.to_string(),
            name: field(name_col).to_string(),
            description: field(description_col).to_string(),
            key_skills,
            payload_a_raw: field(sbert_col).to_string(),
            payload_b_raw: field(sbert_llm_col).to_string(),
        });
    }
    Ok(records)
}
