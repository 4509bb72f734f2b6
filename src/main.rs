use anyhow::Result;
use clap::Parser;
use netmix::{cli::Cli, commands};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings always, everything with --debug
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);
    commands::run(args)
}
