//! matcheval-core — queue selection, payload parsing, and session state.
//!
//! This crate holds the deterministic heart of the matcheval arena: the
//! data model for records and ratings, the course-payload parser, the
//! evaluation-queue selector, and the per-session blind left/right
//! assignment. It performs no I/O; the store crate feeds it data read from
//! disk and writes back what it produces.

pub mod course;
pub mod error;
pub mod model;
pub mod queue;
pub mod session;
pub mod statistics;
