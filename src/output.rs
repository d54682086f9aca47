//! Step outputs
//!
//! Results are published two ways: the legacy `::set-output` console line
//! that older workflows scrape, and the `GITHUB_OUTPUT` file used by current
//! runners when that variable is set.

use crate::error::ActionError;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Environment variable naming the runner's output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Destination for named step outputs
pub struct StepOutput<W: Write> {
    console: W,
    output_file: Option<PathBuf>,
}

impl StepOutput<io::Stdout> {
    /// Stdout plus `$GITHUB_OUTPUT`, if set and non-empty
    pub fn from_env() -> Self {
        let output_file = std::env::var_os(GITHUB_OUTPUT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(io::stdout(), output_file)
    }
}

impl<W: Write> StepOutput<W> {
    pub fn new(console: W, output_file: Option<PathBuf>) -> Self {
        Self {
            console,
            output_file,
        }
    }

    /// Publish `value` (compact JSON) under `name`
    pub fn set(&mut self, name: &str, value: &Value) -> Result<(), ActionError> {
        let json = serde_json::to_string(value)?;

        writeln!(self.console, "::set-output name={}::{}", name, json)?;
        self.console.flush()?;

        if let Some(path) = &self.output_file {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(file_block(name, &json).as_bytes())?;
            tracing::debug!("Wrote output '{}' to {}", name, path.display());
        }

        Ok(())
    }

    /// Consume the sink and hand back the console writer, e.g. to inspect
    /// an in-memory buffer
    pub fn into_console(self) -> W {
        self.console
    }
}

/// Multi-line `name<<delimiter` block; the random delimiter cannot collide
/// with the value
fn file_block(name: &str, value: &str) -> String {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
