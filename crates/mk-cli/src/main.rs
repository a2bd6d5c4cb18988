use anyhow::Context;
use clap::Parser;
use mk_config::MkConfig;
use mk_schema::{SchemaRegistry, catalog};

mod cli;
mod commands;

fn main() {
    if let Err(error) = run() {
        eprintln!("mkit error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => MkConfig::load_from_with_dotenv(path),
        None => MkConfig::load_with_dotenv(),
    }
    .context("failed to load modelkit configuration")?;

    let mut registry = SchemaRegistry::new();
    catalog::register_all(&mut registry).context("failed to define built-in models")?;

    let ctx = commands::Context {
        registry,
        options: cli.validate_options(config.validation.options()),
        pretty: cli.pretty || config.output.pretty,
    };
    commands::dispatch(&cli.command, &ctx)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
