use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use enov8_cmdb_update::cmdb::http::DEFAULT_TIMEOUT;
use enov8_cmdb_update::input::{parse_timeout_ms, EnvSource};
use enov8_cmdb_update::output::StepOutput;
use enov8_cmdb_update::{run, RunOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Update a resource in the Enov8 CMDB from CI/CD inputs (INPUT_* variables)
#[derive(Parser, Debug)]
#[command(name = "enov8-cmdb-update", version = enov8_cmdb_update::VERSION, about, long_about = None)]
struct Args {
    /// Log level for console output
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, env = "INPUT_TIMEOUT_MS", default_value = "20000", value_parser = timeout_ms_parser)]
    timeout_ms: u64,
}

/// Runners export declared-but-unset inputs as empty strings
fn timeout_ms_parser(raw: &str) -> Result<u64, String> {
    parse_timeout_ms(raw, DEFAULT_TIMEOUT.as_millis() as u64)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Console gets WARN and above on stderr, the rest on stdout. An optional
/// log file receives the same events with source locations.
fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_level_filter().into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_writer(io::stderr.with_max_level(Level::WARN).or_else(io::stdout))
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    tracing::debug!("enov8-cmdb-update {} started with log level: {:?}", enov8_cmdb_update::VERSION, level);
    if let Some(path) = log_file {
        tracing::debug!("Log file: {:?}", path);
    }

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_deref())?;

    let options = RunOptions {
        timeout: Duration::from_millis(args.timeout_ms),
    };
    let mut output = StepOutput::from_env();

    match run(&EnvSource, &options, &mut output).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(
                status = ?err.status(),
                before_request = err.is_validation(),
                "Step failed"
            );
            // Printed directly so the cause is visible even with logging off
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_timeout_uses_default() {
        let args = Args::try_parse_from(["enov8-cmdb-update", "--timeout-ms", ""]).unwrap();
        assert_eq!(args.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_flag() {
        let args = Args::try_parse_from(["enov8-cmdb-update", "--timeout-ms", "750"]).unwrap();
        assert_eq!(args.timeout_ms, 750);

        let err = Args::try_parse_from(["enov8-cmdb-update", "--timeout-ms", "later"]);
        assert!(err.is_err());
    }
}
