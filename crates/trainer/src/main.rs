//! Headless character trainer.
//!
//! Reads a command script from the file given as the first argument (or from
//! stdin), runs it against a sandbox character and prints the final status as
//! JSON on stdout.
mod config;
mod script;
mod trainer;

use std::io::Read;
use std::path::Path;
use std::{env, fs, io};

use anyhow::{Context, Result};
use character_core::{ClassifiedError, ErrorSeverity};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use config::TrainerConfig;
use script::{Command, parse_script};
use trainer::Trainer;

fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let config = TrainerConfig::from_env().context("failed to load trainer config")?;
    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let source = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read script {path}"))?
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            text
        }
    };
    let commands = parse_script(&source)?;
    tracing::info!("running {} commands at dt={}", commands.len(), config.dt);

    let mut trainer = Trainer::new(&config)?;
    for command in commands {
        run(&mut trainer, command)?;
    }

    println!("{}", serde_json::to_string_pretty(&trainer.status())?);
    trainer.destroy()?;
    Ok(())
}

/// Rejected commands are logged and skipped; anything worse aborts the run.
fn run(trainer: &mut Trainer, command: Command) -> Result<()> {
    match trainer.execute(command) {
        Ok(()) => Ok(()),
        Err(err) if err.severity() == ErrorSeverity::Validation => {
            tracing::warn!("{:?} rejected [{}]: {}", command, err.error_code(), err);
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("{command:?} failed")),
    }
}

fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "trainer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
