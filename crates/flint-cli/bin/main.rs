mod cli;
mod commands;

use crate::cli::{LogFormat, CLI};
use clap::Parser;
use std::io::{BufWriter, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    init_tracing(config.log_format);

    let mut out = BufWriter::new(std::io::stdout().lock());
    commands::run(config.command, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Logs go to stderr so stdout only ever carries identifiers.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
