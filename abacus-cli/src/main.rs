//! Abacus command-line calculator
//!
//! Reads one command per line from stdin and prints the result:
//! - add / subtract / multiply / divide <a> <b>
//! - history [clear | save | load | delete | stats | filter]
//! - plugin commands (sqrt, power, stats)
//! - menu, help, exit
//!
//! Configuration comes from flags or `CALCULATOR_*` environment variables.

use abacus::{Calculator, Outcome};
use abacus_history::{HistoryStore, DEFAULT_HISTORY_FILE};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PROMPT: &str = "calc> ";
const INTRO: &str = "Welcome to the Abacus calculator! Type 'menu' for a list of commands.";

#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Arbitrary-precision decimal calculator with history and plugins")]
#[command(version)]
struct Args {
    /// Log verbosity: trace, debug, info, warn, error
    #[arg(long, env = "CALCULATOR_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Also append log lines to this file
    #[arg(long, env = "CALCULATOR_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// History file used when `history save|load|delete` omit a name
    #[arg(long, env = "CALCULATOR_HISTORY_FILE", default_value = DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,

    /// Load the history file at start-up if it exists
    #[arg(long)]
    autoload: bool,
}

/// Unknown level names fall back to info
fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(&args.log_level).into())
        .parse_lossy("");

    let file_layer = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if args.log_level.trim().parse::<LevelFilter>().is_err() {
        warn!("Unknown log level '{}', using info", args.log_level);
    }
    Ok(())
}

/// Prompt, read, execute until `exit` or end of input
fn run_repl<R: BufRead, W: Write>(calculator: &mut Calculator, input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "{}", INTRO)?;
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            // End of input
            writeln!(output)?;
            break;
        };

        match calculator.execute_line(&line?) {
            Outcome::Continue(text) => {
                if !text.is_empty() {
                    writeln!(output, "{}", text)?;
                }
            }
            Outcome::Exit(text) => {
                writeln!(output, "{}", text)?;
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    info!("Starting calculator application");

    let mut calculator = Calculator::new(HistoryStore::new(), abacus_std::standard_registry())
        .with_history_file(&args.history_file);

    if args.autoload {
        if let Err(e) = calculator.autoload() {
            error!("Could not load {}: {}", args.history_file.display(), e);
            eprintln!("Error: {}", e.message);
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_repl(&mut calculator, stdin.lock(), stdout.lock())
        .context("Calculator session failed")?;

    info!("Calculator session ended");
    Ok(())
}
