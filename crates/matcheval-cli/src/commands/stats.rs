//! The `matcheval stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use matcheval_core::statistics::LedgerStatistics;
use matcheval_store::config::load_config_from;
use matcheval_store::loader::load_ledgers;

pub fn execute(format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let ledgers = load_ledgers(&config)?;
    let stats = LedgerStatistics::from_ledgers(&ledgers);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        "markdown" | "md" => print_markdown(&stats),
        _ => print_text(&stats),
    }

    Ok(())
}

fn print_text(stats: &LedgerStatistics) {
    println!(
        "{} submission(s) from {} evaluator(s)",
        stats.total_submissions, stats.distinct_evaluators
    );
    if stats.collections.is_empty() {
        println!("No ledgers found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Collection",
        "Ratings",
        "Evaluators",
        "SBERT mean",
        "SBERT_LLM mean",
        "SBERT range",
        "SBERT_LLM range",
    ]);
    for c in &stats.collections {
        table.add_row(vec![
            c.collection.clone(),
            c.submissions.to_string(),
            c.distinct_evaluators.to_string(),
            format!("{:.2}", c.score_a.mean),
            format!("{:.2}", c.score_b.mean),
            format!("{}-{}", c.score_a.min, c.score_a.max),
            format!("{}-{}", c.score_b.min, c.score_b.max),
        ]);
    }
    println!("{table}");
}

fn print_markdown(stats: &LedgerStatistics) {
    println!("# Arena ledger summary");
    println!();
    println!("Generated: {}", stats.generated_at.format("%Y-%m-%d %H:%M UTC"));
    println!();
    println!("| Collection | Ratings | Evaluators | SBERT mean | SBERT_LLM mean |");
    println!("|---|---|---|---|---|");
    for c in &stats.collections {
        println!(
            "| {} | {} | {} | {:.2} | {:.2} |",
            c.collection, c.submissions, c.distinct_evaluators, c.score_a.mean, c.score_b.mean
        );
    }
    println!();
    println!(
        "**Total:** {} submission(s) from {} evaluator(s)",
        stats.total_submissions, stats.distinct_evaluators
    );
}
