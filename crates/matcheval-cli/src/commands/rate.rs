//! The `matcheval rate` command — the interactive arena loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use tracing::info;

use matcheval_core::course::{flag_unknown, parse_course_data, CourseCell};
use matcheval_core::error::ArenaError;
use matcheval_core::model::{AppData, EvaluatorIdentity, RatingSubmission, SourceRecord};
use matcheval_core::queue::select_queue;
use matcheval_core::session::{ServedRecord, SessionState, TableView};
use matcheval_store::config::{load_config_from, ArenaConfig};
use matcheval_store::ledger::append_rating;
use matcheval_store::loader::{load_app_data, load_ledgers};

pub fn execute(
    surname: String,
    username: String,
    affiliation: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let identity = EvaluatorIdentity::new(&surname, &username, &affiliation);
    if !identity.is_complete() {
        return Err(ArenaError::IncompleteIdentity.into());
    }

    let data = load_app_data(&config)?;
    anyhow::ensure!(
        data.total_records() > 0,
        "no source records found under {}",
        config.vacancies_dir.display()
    );

    let mut session = SessionState::new(identity);
    info!(session = %session.session_id, evaluator = %session.identity, "rating session started");
    println!(
        "Rating as {}. Scores run 1-{}; answer q to stop.",
        session.identity, config.rating_scale
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut rng = rand::thread_rng();

    loop {
        // The ledgers are re-read every round so rows appended by other
        // evaluators since the last answer drop out of the queue.
        let ledgers = load_ledgers(&config)?;
        let queue = select_queue(
            &data.collections,
            &ledgers,
            config.evaluate_limit,
            Some(&session.identity),
        );
        let pending = queue.len();
        let Some(record) = queue.into_iter().next() else {
            session.finish();
            println!("\nNothing left to rate. Thank you!");
            return Ok(());
        };

        let served = session.serve(build_served(record, &data, &config));
        let view = served.presentation(&config.result_headers, config.randomize_sides, &mut rng);

        println!(
            "\n=== {} :: record {} ({pending} pending) ===",
            served.record.collection, served.record.id
        );
        println!("{}", served.record.name);
        if !served.record.description.is_empty() {
            println!("{}", served.record.description);
        }
        if served.key_skills.is_empty() {
            println!("Key skills: none listed");
        } else {
            println!("Key skills: {}", served.key_skills.join(", "));
        }
        println!("\nLeft:\n{}", render_table(&view.left));
        println!("\nRight:\n{}", render_table(&view.right));

        let Some(left_score) = prompt_score(&mut input, "Left", config.rating_scale)? else {
            break;
        };
        let Some(right_score) = prompt_score(&mut input, "Right", config.rating_scale)? else {
            break;
        };

        let (score_a, score_b) = served.resolve_scores(left_score, right_score);
        let record_id = served.record.id.clone();
        let collection = served.record.collection.clone();

        let submission = RatingSubmission::new(
            &record_id,
            &session.identity,
            score_a,
            score_b,
            config.rating_scale,
        )?;
        append_rating(&config.ledger_dir, &collection, &submission)?;
        println!("Recorded: {collection}/{record_id}");
    }

    session.finish();
    println!("\nSession ended. Thank you!");
    Ok(())
}

/// Parses both payloads and flags unknown subjects for display.
fn build_served(record: SourceRecord, data: &AppData, config: &ArenaConfig) -> ServedRecord {
    let table_a = flag_unknown(
        parse_course_data(&record.payload_a_raw, config.extract_fields(), false),
        &data.vocabulary,
    );
    let table_b = flag_unknown(
        parse_course_data(&record.payload_b_raw, None, true),
        &data.vocabulary,
    );
    ServedRecord::new(record, table_a, table_b)
}

/// Prompts until a valid score arrives. `None` means the evaluator quit,
/// either by typing `q` or by closing stdin.
fn prompt_score(input: &mut impl BufRead, side: &str, scale: u8) -> Result<Option<u8>> {
    loop {
        print!("{side} score (1-{scale}, q to quit): ");
        io::stdout().flush().context("failed to flush prompt")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read score")? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<u8>() {
            Ok(score) if (1..=scale).contains(&score) => return Ok(Some(score)),
            _ => println!("Enter a whole number between 1 and {scale}."),
        }
    }
}

fn render_table(view: &TableView) -> Table {
    let mut table = Table::new();
    table.set_header(view.headers.clone());
    for row in &view.rows {
        table.add_row(row.iter().map(render_cell));
    }
    table
}

/// Subjects absent from the reference vocabulary come out red so the
/// evaluator sees the gap at a glance.
fn render_cell(cell: &CourseCell) -> Cell {
    if cell.is_unknown() {
        Cell::new(cell.as_str()).fg(Color::Red)
    } else {
        Cell::new(cell.as_str())
    }
}
