mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{act, draft, init, render, ActArgs, DraftArgs, InitArgs, RenderArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Drafter - structure-first document drafting with AI section actions
#[derive(Parser, Debug)]
#[command(name = "drafter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a drafter.config.json with defaults
    Init(InitArgs),

    /// Generate a structured draft from a prompt
    Draft(DraftArgs),

    /// Run an AI action on one section of a saved document
    Act(ActArgs),

    /// Print a saved document
    Render(RenderArgs),
}

fn init_logging(config: &Config, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config = Config::load(&cwd)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Draft(args) => draft(args, &config).await,
        Command::Act(args) => act(args, &config).await,
        Command::Render(args) => render(args),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
