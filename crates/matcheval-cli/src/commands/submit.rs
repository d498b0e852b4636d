//! The `matcheval submit` command.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use matcheval_core::error::ArenaError;
use matcheval_core::model::{EvaluatorIdentity, RatingSubmission};
use matcheval_store::config::load_config_from;
use matcheval_store::ledger::{append_rating, ledger_path, read_ledger};
use matcheval_store::loader::load_app_data;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    surname: String,
    username: String,
    affiliation: String,
    collection: String,
    id: String,
    score_a: u8,
    score_b: u8,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let identity = EvaluatorIdentity::new(&surname, &username, &affiliation);
    if !identity.is_complete() {
        return Err(ArenaError::IncompleteIdentity.into());
    }

    let data = load_app_data(&config)?;
    if !data.has_collection(&collection) {
        return Err(ArenaError::UnknownCollection(collection).into());
    }
    if data.record(&collection, &id).is_none() {
        return Err(ArenaError::UnknownRecord {
            record_id: id,
            collection,
        }
        .into());
    }

    let ledger = read_ledger(&ledger_path(&config.ledger_dir, &collection))?;
    if ledger.contains_rating(&identity, &id) {
        return Err(ArenaError::DuplicateRating {
            record_id: id,
            collection,
        }
        .into());
    }

    let submission = RatingSubmission::new(&id, &identity, score_a, score_b, config.rating_scale)?;
    append_rating(&config.ledger_dir, &collection, &submission)?;

    info!(%collection, record_id = %id, "rating recorded");
    println!("Recorded: {collection}/{id} SBERT={score_a} SBERT_LLM={score_b} by {identity}");
    Ok(())
}
