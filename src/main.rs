//! # Nameline Main Entry Point
//!
//! Terminal form for registering names with a location.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use nameline::config::LOG_LEVEL_ENV_VAR;
use nameline::{AppController, CommandLineArgs};
use tracing_subscriber::{
    filter::Directive,
    fmt::{time::ChronoLocal, writer::BoxMakeWriter},
    EnvFilter,
};

/// Crates whose chatter is capped at `warn` whatever the filter says
const QUIET_TARGETS: &[&str] = &[
    "reqwest", "hyper", "hyper_util", "h2", "rustls", "tokio", "mio",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(&cmd_args)?;

    if !atty::is(atty::Stream::Stdout) {
        bail!("nameline needs an interactive terminal on stdout");
    }

    let mut app = AppController::new(&cmd_args)?;
    app.run().await?;

    tracing::info!("Session ended");
    Ok(())
}

fn build_env_filter() -> Result<EnvFilter> {
    let mut filter =
        EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));
    for target in QUIET_TARGETS {
        let directive: Directive = format!("{target}=warn").parse()?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn init_tracing_subscriber(cmd_args: &CommandLineArgs) -> Result<()> {
    // The form owns the screen, so logs go to a file when one is given
    let writer = match cmd_args.log_file() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter()?)
        .with_writer(writer)
        .with_ansi(cmd_args.log_file().is_none())
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_env_filter_should_accept_quiet_directives() {
        assert!(build_env_filter().is_ok());
    }
}
