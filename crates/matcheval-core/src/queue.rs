//! Evaluation-queue selection.
//!
//! The selector answers one question: which records has this evaluator not
//! yet rated, interleaved fairly across source collections, capped per
//! collection. It is a pure function of its inputs — callers re-read the
//! ledgers before each call, so two calls over the same files always agree
//! and the queue survives process restarts unchanged.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::model::{EvaluatorIdentity, LedgerSet, RecordSet, SourceRecord};

/// Name class driving collection order: Latin-initial names first,
/// Cyrillic-initial second, digit-initial third, everything else last.
fn name_class(name: &str) -> u8 {
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => 0,
        Some(c) if matches!(c, 'А'..='я' | 'Ё' | 'ё') => 1,
        Some(c) if c.is_ascii_digit() => 2,
        _ => 3,
    }
}

/// Total order over collection names. Ties inside a class break by
/// case-sensitive code-point comparison, so the same file set always yields
/// the same interleaving across runs and processes.
pub fn compare_collection_names(a: &str, b: &str) -> Ordering {
    name_class(a).cmp(&name_class(b)).then_with(|| a.cmp(b))
}

/// Selects the ordered batch of records `identity` still has to rate.
///
/// Exclusions are the union, across every ledger set, of record ids whose
/// row matches the identity exactly on all three fields; an absent or
/// incomplete identity, or one with no ledger history at all, excludes
/// nothing. Collections are walked round-robin position-by-position in the
/// [`compare_collection_names`] order, each capped at
/// `min(per_collection_limit, len)`; excluded positions are skipped, never
/// replaced, so a heavily-rated collection contributes fewer rows than its
/// cap. An empty result means "nothing left to rate", not an error.
pub fn select_queue(
    sources: &[RecordSet],
    ledgers: &[LedgerSet],
    per_collection_limit: usize,
    identity: Option<&EvaluatorIdentity>,
) -> Vec<SourceRecord> {
    let excluded = rated_record_ids(ledgers, identity);

    let mut ordered: Vec<&RecordSet> = sources.iter().collect();
    ordered.sort_by(|a, b| compare_collection_names(&a.name, &b.name));

    let caps: Vec<usize> = ordered
        .iter()
        .map(|set| per_collection_limit.min(set.records.len()))
        .collect();
    let deepest = caps.iter().copied().max().unwrap_or(0);

    let mut queue = Vec::new();
    for position in 0..deepest {
        for (set, &cap) in ordered.iter().zip(&caps) {
            if position >= cap {
                continue;
            }
            let record = &set.records[position];
            if !excluded.contains(record.id.as_str()) {
                queue.push(record.clone());
            }
        }
    }

    debug!(
        collections = ordered.len(),
        excluded = excluded.len(),
        selected = queue.len(),
        "evaluation queue computed"
    );
    queue
}

/// Ids already rated by `identity`, unioned across every ledger set.
///
/// The id set is flat: ids are only unique per collection, so an id rated
/// in one collection also suppresses an equal id elsewhere. "No history"
/// must mean "nothing is excluded" — a fresh evaluator is never blocked by
/// rows some other identity wrote.
fn rated_record_ids(
    ledgers: &[LedgerSet],
    identity: Option<&EvaluatorIdentity>,
) -> HashSet<String> {
    let Some(identity) = identity.filter(|id| id.is_complete()) else {
        return HashSet::new();
    };
    ledgers
        .iter()
        .flat_map(|set| &set.submissions)
        .filter(|row| identity.matches(row))
        .map(|row| row.record_id.clone())
        .collect()
}
