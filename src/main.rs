//! auto-skill-selector - UserPromptSubmit hook entry point
//!
//! Reads the hook request from stdin and prints at most one recommendation
//! line. Always exits 0 so the surrounding session is never blocked.

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, error, info};

use auto_skill_selector::registry;
use auto_skill_selector::{
    pick, HookInput, RouterError, ScoredCandidate, Selector, DEFAULT_HISTORY_LIMIT,
    SELECTION_THRESHOLD,
};

#[derive(Debug, Parser)]
#[command(name = "auto-skill-selector", version, about = "Recommend a skill for the submitted prompt")]
struct Cli {
    /// Skill registry to use instead of the one installed next to the binary
    #[arg(long, env = "SKILL_SELECTOR_REGISTRY")]
    registry: Option<PathBuf>,

    /// Number of recent user messages used as history context
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Print the ranked candidates to stderr
    #[arg(long)]
    explain: bool,
}

fn main() {
    // Initialize tracing if RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            error!("Invalid arguments: {}", e);
            std::process::exit(0);
        }
    };

    if let Err(e) = run(&cli) {
        // Stay silent on stdout (non-blocking)
        error!("Error: {}", e);
    }
    std::process::exit(0);
}

fn run(cli: &Cli) -> Result<(), RouterError> {
    let mut input_json = String::new();
    io::stdin().read_to_string(&mut input_json)?;

    debug!("Received input: {}", input_json);

    let input = HookInput::parse(&input_json)?;

    let Some(prompt) = input.prompt() else {
        debug!("No prompt, nothing to do");
        return Ok(());
    };

    info!(
        "Processing prompt: {}",
        prompt.chars().take(50).collect::<String>()
    );

    let selector = match &cli.registry {
        Some(path) => Selector::new(registry::load_or_empty(&registry::expand_home(path))),
        None => Selector::installed(),
    }
    .with_history_limit(cli.history_limit);

    let ranked = selector.rank(prompt, &input.working_dir(), input.transcript());
    if cli.explain {
        explain(&ranked);
    }

    if let Some(recommendation) = pick(&ranked) {
        println!("{}", recommendation);
    }

    Ok(())
}

/// Log the ranking to stderr for debugging
fn explain(ranked: &[ScoredCandidate]) {
    if ranked.is_empty() {
        eprintln!("{}", "no candidates".dimmed());
        return;
    }
    for (i, candidate) in ranked.iter().enumerate() {
        let score = format!("{:>5.1}", candidate.score);
        let score = if i == 0 && candidate.score >= SELECTION_THRESHOLD {
            score.green()
        } else if candidate.score >= SELECTION_THRESHOLD {
            score.yellow()
        } else {
            score.red()
        };
        eprintln!("{} {} - {}", score, candidate.name.bold(), candidate.reason);
    }
}
