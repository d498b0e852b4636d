//! matcheval-store — the durable-storage boundary for matcheval.
//!
//! Everything that touches the file system lives here: configuration,
//! collection discovery, source-record ingestion, vocabulary loading, and
//! the append-only rating ledgers. The core crate stays free of I/O so its
//! selection logic is testable on plain values; this crate feeds it.

pub mod config;
pub mod discover;
pub mod ledger;
pub mod loader;
pub mod reader;
pub mod vocabulary;
