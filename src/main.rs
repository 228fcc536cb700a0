//! repograph CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repograph::commands::{self, CommandContext};
use repograph::{Cli, Commands};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> repograph::Result<String> {
    let cli = Cli::parse();
    let ctx = CommandContext::from_cli(cli.format, cli.verbose);

    match &cli.command {
        Commands::Analyze(args) => commands::run_analyze(&ctx, args),
        Commands::Graph(args) => commands::run_graph(&ctx, args),
        Commands::Summary(args) => commands::run_summary(&ctx, args),
        Commands::Cache(args) => commands::run_cache(&ctx, args),
    }
}

/// Quiet by default; RUST_LOG overrides
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
