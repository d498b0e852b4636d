//! Subcommand implementations.

pub mod init;
pub mod queue;
pub mod rate;
pub mod stats;
pub mod submit;
pub mod validate;
