mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, check, init, preview, render, ApplyArgs, CheckArgs, InitArgs, PreviewArgs, RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Proseline CLI - render rich-text documents to email and preview them
#[derive(Parser, Debug)]
#[command(name = "proseline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Proseline project
    Init(InitArgs),

    /// Render documents to email HTML
    Render(RenderArgs),

    /// Render a document as the editing surface shows it
    Preview(PreviewArgs),

    /// Apply a command script to a document
    Apply(ApplyArgs),

    /// Check documents for problems
    Check(CheckArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Preview(args) => preview(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Check(args) => check(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
