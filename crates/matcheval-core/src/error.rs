//! Arena error types.
//!
//! These errors represent failures the command layer must distinguish from
//! plain I/O trouble. Defined in `matcheval-core` so callers can downcast
//! an `anyhow` chain and classify the failure without string matching.

use thiserror::Error;

/// Errors raised while ingesting data or accepting a rating.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// A source or ledger file is missing a column the schema requires.
    #[error("{file}: required column '{column}' is missing")]
    SchemaMismatch { file: String, column: String },

    /// Surname, username, and affiliation must all be present before a
    /// rating is accepted.
    #[error("incomplete identity: surname, username, and affiliation are all required")]
    IncompleteIdentity,

    /// A score outside the configured rating scale.
    #[error("score {value} is outside the rating scale 1..={scale}")]
    ScoreOutOfRange { value: u8, scale: u8 },

    /// A collection name that matches no loaded source collection.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// A record id that does not exist in the named collection.
    #[error("record '{record_id}' not found in collection '{collection}'")]
    UnknownRecord {
        record_id: String,
        collection: String,
    },

    /// The evaluator already has a ledger row for this record.
    #[error("record '{record_id}' in '{collection}' was already rated by this evaluator")]
    DuplicateRating {
        record_id: String,
        collection: String,
    },
}

impl ArenaError {
    /// Returns `true` if the failure is caller input that a re-prompt can
    /// fix, as opposed to broken data on disk.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ArenaError::IncompleteIdentity
                | ArenaError::ScoreOutOfRange { .. }
                | ArenaError::UnknownCollection(_)
                | ArenaError::UnknownRecord { .. }
                | ArenaError::DuplicateRating { .. }
        )
    }
}
