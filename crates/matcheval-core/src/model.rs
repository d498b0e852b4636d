//! Core data model types for matcheval.
//!
//! These are the types the whole arena passes around: source records to
//! rate, ledger rows already rated, and the identity key that ties the two
//! together.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::course::{parse_key_skills, SubjectVocabulary};
use crate::error::ArenaError;

/// One evaluable vacancy record, loaded from a source collection.
///
/// Ids are unique within their collection only; two collections may both
/// contain a record "7".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Identifier, unique within the origin collection.
    pub id: String,
    /// Name of the source collection (file stem) this record came from.
    pub collection: String,
    /// Vacancy title.
    pub name: String,
    /// Free-text vacancy description; may contain HTML.
    #[serde(default)]
    pub description: String,
    /// Raw comma-separated key skills; `None` when the source cell was
    /// empty or the column absent.
    #[serde(default)]
    pub key_skills: Option<String>,
    /// SBERT method output in the structured `CS=` payload format.
    pub payload_a_raw: String,
    /// SBERT_LLM method output as a plain `;`-separated list.
    pub payload_b_raw: String,
}

impl SourceRecord {
    /// Key skills split into clean entries; empty when none were supplied.
    pub fn key_skills_list(&self) -> Vec<String> {
        self.key_skills
            .as_deref()
            .map(parse_key_skills)
            .unwrap_or_default()
    }
}

/// One row of the persisted rating ledger. Append-only: created exactly
/// once per rated record, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub record_id: String,
    pub surname: String,
    pub username: String,
    pub affiliation: String,
    /// Score given to the SBERT output.
    pub score_a: u8,
    /// Score given to the SBERT_LLM output.
    pub score_b: u8,
}

impl RatingSubmission {
    /// Builds a validated submission: the identity must be complete and
    /// both scores within `1..=scale`.
    pub fn new(
        record_id: &str,
        identity: &EvaluatorIdentity,
        score_a: u8,
        score_b: u8,
        scale: u8,
    ) -> Result<Self, ArenaError> {
        if !identity.is_complete() {
            return Err(ArenaError::IncompleteIdentity);
        }
        for score in [score_a, score_b] {
            if !(1..=scale).contains(&score) {
                return Err(ArenaError::ScoreOutOfRange { value: score, scale });
            }
        }
        Ok(Self {
            record_id: record_id.to_string(),
            surname: identity.surname.clone(),
            username: identity.username.clone(),
            affiliation: identity.affiliation.clone(),
            score_a,
            score_b,
        })
    }
}

/// The (surname, username, affiliation) triple scoping already-rated
/// exclusions. Not verified credentials — a plain matching key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluatorIdentity {
    pub surname: String,
    pub username: String,
    pub affiliation: String,
}

impl EvaluatorIdentity {
    /// Builds an identity, trimming surrounding whitespace from each field.
    pub fn new(surname: &str, username: &str, affiliation: &str) -> Self {
        Self {
            surname: surname.trim().to_string(),
            username: username.trim().to_string(),
            affiliation: affiliation.trim().to_string(),
        }
    }

    /// True when all three fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.surname.is_empty() && !self.username.is_empty() && !self.affiliation.is_empty()
    }

    /// True when `row` matches this identity exactly on all three fields.
    pub fn matches(&self, row: &RatingSubmission) -> bool {
        self.surname == row.surname
            && self.username == row.username
            && self.affiliation == row.affiliation
    }
}

impl fmt::Display for EvaluatorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.surname, self.username, self.affiliation)
    }
}

/// One source collection: a named file's worth of evaluable records, in
/// file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    pub records: Vec<SourceRecord>,
}

/// One ledger file's submissions, tagged with its collection name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSet {
    pub name: String,
    pub submissions: Vec<RatingSubmission>,
}

impl LedgerSet {
    /// True when this ledger already holds a row for (`identity`,
    /// `record_id`).
    pub fn contains_rating(&self, identity: &EvaluatorIdentity, record_id: &str) -> bool {
        self.submissions
            .iter()
            .any(|row| row.record_id == record_id && identity.matches(row))
    }
}

/// Everything loaded once at startup: source collections plus the subject
/// vocabulary. Constructed by the store layer and passed by reference into
/// the selector and parser, so a reload is an explicit rebuild rather than
/// a mutation of process-wide globals.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub collections: Vec<RecordSet>,
    pub vocabulary: SubjectVocabulary,
}

impl AppData {
    /// Looks up one record by collection name and id.
    pub fn record(&self, collection: &str, record_id: &str) -> Option<&SourceRecord> {
        self.collections
            .iter()
            .find(|set| set.name == collection)?
            .records
            .iter()
            .find(|record| record.id == record_id)
    }

    /// True when a collection with this name was loaded.
    pub fn has_collection(&self, collection: &str) -> bool {
        self.collections.iter().any(|set| set.name == collection)
    }

    pub fn total_records(&self) -> usize {
        self.collections.iter().map(|set| set.records.len()).sum()
    }
}
