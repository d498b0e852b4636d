//! One-call loading of everything an arena action needs.
//!
//! The CLI is synchronous and short-lived, so there is no cache to keep
//! warm: every action rebuilds [`AppData`] and re-reads the ledgers from
//! disk. Rows appended by other evaluators between two actions are picked
//! up automatically.

use anyhow::Result;
use tracing::info;

use matcheval_core::model::{AppData, LedgerSet};

use crate::config::ArenaConfig;
use crate::discover::discover_collections;
use crate::ledger::read_all_ledgers;
use crate::reader::read_record_set;
use crate::vocabulary::load_vocabulary;

/// Loads every source collection plus the subject vocabulary.
pub fn load_app_data(config: &ArenaConfig) -> Result<AppData> {
    let mut collections = Vec::new();
    for path in discover_collections(&config.vacancies_dir)? {
        collections.push(read_record_set(&path)?);
    }
    let vocabulary = load_vocabulary(&config.vocabulary_dir, &config.subject_column)?;

    let data = AppData {
        collections,
        vocabulary,
    };
    info!(
        collections = data.collections.len(),
        records = data.total_records(),
        subjects = data.vocabulary.len(),
        "arena data loaded"
    );
    Ok(data)
}

/// Re-reads the rating ledgers. Call before every queue computation and
/// every duplicate check so the exclusion set reflects the files as they
/// are now.
pub fn load_ledgers(config: &ArenaConfig) -> Result<Vec<LedgerSet>> {
    read_all_ledgers(&config.ledger_dir)
}
