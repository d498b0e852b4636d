//! matcheval CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "matcheval",
    version,
    about = "Blind arena for comparing vacancy-matching methods"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate pending records interactively
    Rate {
        /// Evaluator surname
        #[arg(long)]
        surname: String,

        /// Evaluator username
        #[arg(long)]
        username: String,

        /// Evaluator affiliation
        #[arg(long)]
        affiliation: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the pending evaluation queue
    Queue {
        /// Evaluator surname (all three identity flags or none)
        #[arg(long)]
        surname: Option<String>,

        /// Evaluator username
        #[arg(long)]
        username: Option<String>,

        /// Evaluator affiliation
        #[arg(long)]
        affiliation: Option<String>,

        /// Per-collection cap override
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Record one rating non-interactively
    Submit {
        /// Evaluator surname
        #[arg(long)]
        surname: String,

        /// Evaluator username
        #[arg(long)]
        username: String,

        /// Evaluator affiliation
        #[arg(long)]
        affiliation: String,

        /// Source collection name
        #[arg(long)]
        collection: String,

        /// Record id within the collection
        #[arg(long)]
        id: String,

        /// Score for the SBERT output
        #[arg(long)]
        score_a: u8,

        /// Score for the SBERT_LLM output
        #[arg(long)]
        score_b: u8,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize the rating ledgers
    Stats {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check source collections for schema and content problems
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample data
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("matcheval=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rate {
            surname,
            username,
            affiliation,
            config,
        } => commands::rate::execute(surname, username, affiliation, config),
        Commands::Queue {
            surname,
            username,
            affiliation,
            limit,
            format,
            config,
        } => commands::queue::execute(surname, username, affiliation, limit, format, config),
        Commands::Submit {
            surname,
            username,
            affiliation,
            collection,
            id,
            score_a,
            score_b,
            config,
        } => commands::submit::execute(
            surname,
            username,
            affiliation,
            collection,
            id,
            score_a,
            score_b,
            config,
        ),
        Commands::Stats { format, config } => commands::stats::execute(format, config),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
