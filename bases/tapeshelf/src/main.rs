// bases/tapeshelf/src/main.rs
use clap::Parser;
use color_eyre::Result;
use external_tools::{SystemRunner, ToolRunner};

mod config;
mod error;
mod fs_ops;
mod modes;
mod sidecar;
mod walker;

const CRATES: [&str; 5] = [
    "tapeshelf",
    "album_metadata",
    "cuesheet",
    "dir_catalog",
    "external_tools",
];

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = CRATES
        .iter()
        .map(|name| format!("{}={}", name, level))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn run(config: &config::Config, runner: &dyn ToolRunner) -> Result<()> {
    for program in config.required_programs() {
        runner.check_available(&program)?;
    }

    tracing::info!(
        "Running {} under {}",
        config.mode.name(),
        config.root.display()
    );
    walker::Walker::new(config, runner).run()?;
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = config::CliArgs::parse();
    init_tracing(args.verbose);

    let config = config::Config::from_args(args)?;

    if let Err(error) = run(&config, &SystemRunner) {
        tracing::error!("{:#}", error);
        std::process::exit(1);
    }
    Ok(())
}
