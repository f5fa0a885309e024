//! Plankeeper - Entry Point
//!
//! Loads the configuration and the saved plan, then runs the interpreter
//! loop on the terminal (or over `--execute` lines) until the user exits.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use plankeeper::command::{run, Session};
use plankeeper::core::config::{Config, DEFAULT_CONFIG_FILE};
use plankeeper::core::error::Result;
use plankeeper::plan::store;
use plankeeper::ui::{Console, LineReader, ScriptReader, TerminalReader};
use tracing_subscriber::EnvFilter;

/// Personal development planner
#[derive(Parser, Debug)]
#[command(name = "plankeeper")]
#[command(about = "Keep goals, actions, agreements, alerts and results in one plan")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Plan data file, overrides the configuration
    #[arg(long)]
    data: Option<PathBuf>,

    /// History file, overrides the configuration
    #[arg(long)]
    history: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Start from an empty plan instead of the saved one
    #[arg(long)]
    reset: bool,

    /// Run these command lines instead of reading the terminal, then save
    #[arg(short = 'e', long = "execute", value_name = "LINE")]
    execute: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plankeeper=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(data) = args.data {
        config.data_file = data;
    }
    if let Some(history) = args.history {
        config.history_file = history;
    }
    if args.no_color {
        config.color = false;
    }

    let mut console = Console::new(io::stdout(), config.color);
    let mut plan = match store::load(&config.data_file) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("loading plan failed: {}", e);
            console.file_error("load the plan", &e)?;
            std::process::exit(1);
        }
    };
    if args.reset {
        tracing::info!("starting from an empty plan");
        plan.clear();
    }
    plan.adopt_defaults(&config.owner, &config.vision);

    let mut session = Session::new(plan, console, config.prompt.clone());

    let report = if args.execute.is_empty() {
        let mut reader = TerminalReader::new(config.history_size)?;
        load_history(&mut session, &mut reader, &config)?;
        println!("Plankeeper - type 'help' for commands, 'exit' to save and quit");
        run(&mut session, &mut reader, &config)?
    } else {
        let mut reader = ScriptReader::new(args.execute);
        load_history(&mut session, &mut reader, &config)?;
        run(&mut session, &mut reader, &config)?
    };

    tracing::info!(
        "exiting (save requested: {}, saved: {})",
        report.save_requested,
        report.saved
    );
    Ok(())
}

/// History is a convenience; a broken history file only warns
fn load_history<R: LineReader, W: io::Write>(
    session: &mut Session<W>,
    reader: &mut R,
    config: &Config,
) -> Result<()> {
    if let Err(e) = reader.load_history(&config.history_file) {
        tracing::warn!("loading history failed: {}", e);
        session.console().file_warning("load the history", &e)?;
    }
    Ok(())
}
