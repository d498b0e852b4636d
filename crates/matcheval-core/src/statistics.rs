//! Ledger aggregation.
//!
//! Turns the raw ledger rows into the per-collection summaries the `stats`
//! command prints: how many ratings came in, from how many evaluators, and
//! how the two methods score against each other.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::model::{LedgerSet, RatingSubmission};
use crate::queue::compare_collection_names;

/// Aggregates across every ledger file.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStatistics {
    /// When this summary was computed.
    pub generated_at: DateTime<Utc>,
    pub total_submissions: usize,
    pub distinct_evaluators: usize,
    /// Per-collection breakdown, in the collection ordering the queue uses.
    pub collections: Vec<CollectionStatistics>,
}

/// Aggregates for one collection's ledger.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStatistics {
    pub collection: String,
    pub submissions: usize,
    pub distinct_evaluators: usize,
    /// Summary of the SBERT score column.
    pub score_a: ScoreSummary,
    /// Summary of the SBERT_LLM score column.
    pub score_b: ScoreSummary,
}

/// Mean, min, and max of one score column. All zero when no rows exist.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreSummary {
    pub mean: f64,
    pub min: u8,
    pub max: u8,
}

impl ScoreSummary {
    fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let scores: Vec<u8> = scores.into_iter().collect();
        if scores.is_empty() {
            return Self {
                mean: 0.0,
                min: 0,
                max: 0,
            };
        }
        let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        Self {
            mean: sum as f64 / scores.len() as f64,
            min: scores.iter().copied().min().unwrap_or(0),
            max: scores.iter().copied().max().unwrap_or(0),
        }
    }
}

fn evaluator_key(row: &RatingSubmission) -> (&str, &str, &str) {
    (&row.surname, &row.username, &row.affiliation)
}

impl LedgerStatistics {
    /// Computes the summary from freshly read ledger sets. Empty ledgers
    /// are kept in the breakdown so a collection nobody rated yet still
    /// shows up with zeros.
    pub fn from_ledgers(ledgers: &[LedgerSet]) -> Self {
        let mut collections: Vec<CollectionStatistics> = ledgers
            .iter()
            .map(|set| CollectionStatistics {
                collection: set.name.clone(),
                submissions: set.submissions.len(),
                distinct_evaluators: set
                    .submissions
                    .iter()
                    .map(evaluator_key)
                    .collect::<HashSet<_>>()
                    .len(),
                score_a: ScoreSummary::from_scores(set.submissions.iter().map(|r| r.score_a)),
                score_b: ScoreSummary::from_scores(set.submissions.iter().map(|r| r.score_b)),
            })
            .collect();
        collections.sort_by(|a, b| compare_collection_names(&a.collection, &b.collection));

        let all_rows = || ledgers.iter().flat_map(|set| &set.submissions);
        Self {
            generated_at: Utc::now(),
            total_submissions: all_rows().count(),
            distinct_evaluators: all_rows().map(evaluator_key).collect::<HashSet<_>>().len(),
            collections,
        }
    }
}
