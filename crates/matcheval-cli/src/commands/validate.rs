//! The `matcheval validate` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use matcheval_core::error::ArenaError;
use matcheval_store::config::load_config_from;
use matcheval_store::discover::{collection_name, discover_collections};
use matcheval_store::reader::read_record_set;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let files = discover_collections(&config.vacancies_dir)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no source collections found under {}",
        config.vacancies_dir.display()
    );

    let mut total_warnings = 0;

    for path in &files {
        match read_record_set(path) {
            Ok(set) => {
                println!("Collection: {} ({} records)", set.name, set.records.len());

                if set.records.is_empty() {
                    println!("  WARNING: no records");
                    total_warnings += 1;
                }
                let mut seen: HashSet<&str> = HashSet::new();
                for record in &set.records {
                    if !seen.insert(record.id.as_str()) {
                        println!("  [{}] WARNING: duplicate id", record.id);
                        total_warnings += 1;
                    }
                    if record.payload_a_raw.is_empty() {
                        println!("  [{}] WARNING: empty SBERT payload", record.id);
                        total_warnings += 1;
                    }
                    if record.payload_b_raw.is_empty() {
                        println!("  [{}] WARNING: empty SBERT_LLM payload", record.id);
                        total_warnings += 1;
                    }
                }
            }
            Err(err) => match err.downcast_ref::<ArenaError>() {
                Some(schema) => {
                    println!("Collection: {} INVALID: {schema}", collection_name(path));
                    total_warnings += 1;
                }
                None => return Err(err),
            },
        }
    }

    if total_warnings == 0 {
        println!("All collections valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
