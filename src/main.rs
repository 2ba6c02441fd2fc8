use std::path::PathBuf;

use clap::{Parser, Subcommand};

use deepquant::history::CandleHistory;
use deepquant::model::ModelPackage;
use deepquant::models::{Candle, Signal, SignalRecord};
use deepquant::persistence::SignalJournal;
use deepquant::pipeline::SignalEngine;

#[derive(Parser)]
#[command(name = "deepquant", about = "Candle-driven trading signal terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a newly closed candle and journal the outcome
    Signal {
        #[arg(long)]
        open: f64,
        #[arg(long)]
        high: f64,
        #[arg(long)]
        low: f64,
        #[arg(long)]
        close: f64,
    },
    /// Inspect or reset the signal journal
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// Print every journaled signal
    Show,
    /// Delete all journaled signals
    Clear,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let journal = SignalJournal::new(env_path("DEEPQUANT_JOURNAL_PATH", "signals.jsonl"));

    match cli.command {
        Command::Signal {
            open,
            high,
            low,
            close,
        } => {
            let engine = load_engine()?;
            let candle = Candle::new(open, high, low, close);
            let report = engine.evaluate(candle)?;

            match report.signal {
                Signal::Buy => println!("🚀 BUY signal ({:.1}%)", report.probability * 100.0),
                Signal::Wait => println!("😴 NO TRADE ({:.1}%)", report.probability * 100.0),
            }
            for reason in &report.reasons {
                println!("⚠️  {}", reason.describe());
            }

            journal.append(&SignalRecord::new(&candle, &report))?;
        }
        Command::Journal {
            action: JournalAction::Show,
        } => {
            let records = journal.read_all()?;
            if records.is_empty() {
                println!("journal is empty");
            }
            for record in records {
                println!(
                    "{}  O={:.2} H={:.2} L={:.2} C={:.2}  {:?} ({:.1}%)",
                    record.time.format("%Y-%m-%d %H:%M:%S"),
                    record.open,
                    record.high,
                    record.low,
                    record.close,
                    record.signal,
                    record.confidence_pct
                );
            }
        }
        Command::Journal {
            action: JournalAction::Clear,
        } => {
            journal.clear()?;
            println!("journal cleared");
        }
    }

    Ok(())
}

/// Model and history are process-wide read-only state, loaded once per run.
/// Failing to load either means no signal can be computed at all.
fn load_engine() -> anyhow::Result<SignalEngine> {
    let model = ModelPackage::load(&env_path("DEEPQUANT_MODEL_PATH", "model.json"))?;
    let history = CandleHistory::load(&env_path("DEEPQUANT_HISTORY_PATH", "history.csv"))?;
    Ok(SignalEngine::new(model, history))
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var).unwrap_or_else(|_| default.to_string()).into()
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("deepquant=info")
        .init();
}
