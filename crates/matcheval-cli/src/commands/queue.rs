//! The `matcheval queue` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use matcheval_core::model::EvaluatorIdentity;
use matcheval_core::queue::select_queue;
use matcheval_store::config::load_config_from;
use matcheval_store::loader::{load_app_data, load_ledgers};

pub fn execute(
    surname: Option<String>,
    username: Option<String>,
    affiliation: Option<String>,
    limit: Option<usize>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let identity = match (&surname, &username, &affiliation) {
        (Some(s), Some(u), Some(a)) => Some(EvaluatorIdentity::new(s, u, a)),
        (None, None, None) => None,
        _ => anyhow::bail!("pass all three of --surname, --username, --affiliation, or none"),
    };

    let data = load_app_data(&config)?;
    let ledgers = load_ledgers(&config)?;
    let queue = select_queue(
        &data.collections,
        &ledgers,
        limit.unwrap_or(config.evaluate_limit),
        identity.as_ref(),
    );

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&queue)?);
        return Ok(());
    }

    if queue.is_empty() {
        println!("Nothing left to rate.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Collection", "ID", "Name"]);
    for (index, record) in queue.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            record.collection.clone(),
            record.id.clone(),
            record.name.clone(),
        ]);
    }
    println!("{table}");
    println!("{} record(s) pending", queue.len());

    Ok(())
}
