use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use dreamscape::analyst::Analyst;
use dreamscape::board::Board;
use dreamscape::config::Settings;
use dreamscape::messages::format_date;
use dreamscape::report;

#[derive(Parser)]
#[command(name = "dreamscape")]
#[command(about = "Progress forecasts and journal insights for long-term dreams", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with `negative` and `positive` keyword sets
    #[arg(long, global = true, env = "DREAMSCAPE_LEXICON")]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample board
    Seed {
        #[arg(long, default_value = "board.json")]
        out: PathBuf,
    },
    /// List dreams on a board
    List {
        #[arg(long, env = "DREAMSCAPE_BOARD", default_value = "board.json")]
        board: PathBuf,
    },
    /// Forecast a single dream
    Analyze {
        #[arg(long, env = "DREAMSCAPE_BOARD", default_value = "board.json")]
        board: PathBuf,
        #[arg(long)]
        id: Uuid,
        /// Analysis date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Override progress before analyzing
        #[arg(long)]
        progress: Option<i32>,
        /// Add a journal entry dated today before analyzing
        #[arg(long)]
        note: Option<String>,
        /// CSV of `dream_id,date,text` journal entries to merge first
        #[arg(long)]
        journal: Option<PathBuf>,
        #[arg(long, env = "DREAMSCAPE_DELAY_MS")]
        delay_ms: Option<u64>,
    },
    /// Generate a markdown report for every dream
    Report {
        #[arg(long, env = "DREAMSCAPE_BOARD", default_value = "board.json")]
        board: PathBuf,
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut settings = Settings {
        lexicon_path: cli.lexicon,
        ..Settings::default()
    };

    match cli.command {
        Commands::Seed { out } => {
            let board = Board::seed()?;
            std::fs::write(&out, board.to_json()?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Sample board written to {}.", out.display());
        }
        Commands::List { board } => {
            let board = load_board(&board)?;
            if board.is_empty() {
                println!("Your canvas is empty. Start dreaming.");
                return Ok(());
            }
            for dream in board.iter() {
                println!(
                    "- {} [{}] {}% by {} ({})",
                    dream.title,
                    dream.category,
                    dream.goal.progress,
                    format_date(dream.goal.target_date),
                    dream.id
                );
            }
        }
        Commands::Analyze {
            board,
            id,
            today,
            progress,
            note,
            journal,
            delay_ms,
        } => {
            settings.today = today;
            settings.delay_ms = delay_ms;
            let lexicon = settings.lexicon().context("failed to load lexicon")?;
            let now = settings.now();

            let mut board = load_board(&board)?;
            if let Some(path) = journal {
                let (imported, skipped) = board
                    .import_journal(&path)
                    .with_context(|| format!("failed to import {}", path.display()))?;
                println!("Merged {imported} journal entries ({skipped} skipped).");
            }
            if let Some(value) = progress {
                board.update_progress(id, value)?;
            }
            if let Some(text) = note {
                board.add_log(id, now.date(), &text)?;
            }

            let dream = board.get(id)?;
            let analyst = Analyst::new(lexicon, settings.delay());
            println!("Analyzing \"{}\"...", dream.title);
            let insight = analyst
                .analyze(dream.id, dream.goal.clone(), now)
                .await
                .context("analysis was superseded")?;

            println!("{} ({:?})", insight.status.label(), insight.tone);
            println!(
                "Velocity {:.2}%/day, required {:.2}%/day",
                insight.velocity, insight.required_velocity
            );
            match insight.predicted_completion {
                Some(date) => println!("Predicted completion: {}", format_date(date)),
                None => println!("Predicted completion: -"),
            }
            println!("{}", insight.message);
        }
        Commands::Report { board, today, out } => {
            settings.today = today;
            let lexicon = settings.lexicon().context("failed to load lexicon")?;
            let board = load_board(&board)?;
            let report = report::build_report(&board, settings.now(), &lexicon);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_board(path: &std::path::Path) -> anyhow::Result<Board> {
    Board::load(path).with_context(|| format!("failed to load board from {}", path.display()))
}
