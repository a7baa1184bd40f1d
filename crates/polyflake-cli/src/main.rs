#![doc = include_str!("../README.md")]

mod command;
mod config;
mod telemetry;

use std::io::{BufWriter, Write};

use clap::Parser;
use config::{CliArgs, CliConfig};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::debug!("Running with full config: {:#?}", config);
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match &config {
        CliConfig::Generate(config) => command::generate(config, &mut out)?,
        CliConfig::Inspect(config) => command::inspect(config, &mut out)?,
    }
    out.flush()?;

    Ok(())
}
