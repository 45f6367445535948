use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use san_referee::batch::run_batch;
use san_referee::logging::init_logging;
use san_referee::scoring::score_move;
use san_referee::RefereeConfig;

/// Referee for chess moves written in SAN
#[derive(Parser)]
#[command(name = "san-referee", version, about)]
struct Cli {
    /// Config file (defaults to config.json in the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one move and print the verdict
    Classify {
        /// Position the move is played from
        #[arg(long)]
        fen: String,
        /// Move in SAN, e.g. "Nbd7", "exd6 e.p." or "O-O-O+"
        san: String,
    },
    /// Classify JSON lines of {"fen", "san"} and write one record per line
    Batch {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Worker threads
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Play one move and score the result with a UCI engine
    Score {
        #[arg(long)]
        fen: String,
        san: String,
        /// UCI engine binary
        #[arg(long)]
        engine: Option<PathBuf>,
        /// Search time per evaluation in milliseconds
        #[arg(long)]
        movetime_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, origin) = RefereeConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level);
    origin.log();

    match cli.command {
        Command::Classify { fen, san } => {
            let verdict = chess_rules::classify(&fen, &san).context("Failed to decode FEN")?;
            println!("{verdict}");
        }
        Command::Batch { input, workers } => {
            let workers = workers.unwrap_or(config.workers);
            let stdout = io::stdout().lock();
            match input {
                Some(path) => {
                    let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
                    run_batch(BufReader::new(file), stdout, workers)?;
                }
                None => {
                    run_batch(io::stdin().lock(), stdout, workers)?;
                }
            }
        }
        Command::Score {
            fen,
            san,
            engine,
            movetime_ms,
        } => {
            if engine.is_some() {
                config.engine_path = engine;
            }
            if let Some(movetime_ms) = movetime_ms {
                config.movetime_ms = movetime_ms;
            }
            let value = score_move(&config, &fen, &san).context("Failed to score move")?;
            println!("{value:.4}");
        }
    }

    Ok(())
}
