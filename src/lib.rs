//! Record a pipeline resource (name, version, status) in the Enov8 CMDB.

pub mod cmdb;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod run;

/// Version injected at compile time via ENOV8_CMDB_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("ENOV8_CMDB_VERSION") {
    Some(v) => v,
    None => "dev",
};

pub use error::ActionError;
pub use run::{run, RunOptions};
