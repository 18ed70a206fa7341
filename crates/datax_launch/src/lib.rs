//! DataX Launch
//!
//! Turns a command line into a fully-formed invocation of the DataX engine
//! and supervises the resulting child process.
//!
//! # Overview
//!
//! The launcher:
//! - Parses flags and the job path into typed [`Options`]
//! - Short-circuits to a template description when both a reader and a writer are given
//! - Validates that the job resource exists
//! - Renders the engine command as an explicit argument vector
//! - Spawns the engine, kills it on Ctrl+C, and forwards its exit status
//!
//! # Example
//!
//! ```no_run
//! use datax_launch::{build_command, cli, LauncherConfig};
//!
//! let options = cli::parse(["-m", "local", "/opt/jobs/mysql2hdfs.json"]).unwrap();
//! let config = LauncherConfig::new("/opt/datax");
//! let command = build_command(&options, &config);
//! println!("{}", command);
//! ```

pub mod cli;
pub mod config;
pub mod runtime;

pub use cli::{ArgumentError, Options};
pub use config::{ConfigError, LauncherConfig};
pub use runtime::{
    build_command, template_request, EngineRunner, LaunchError, LaunchOutcome, Orchestrator,
    ProcessError, ProcessRunner, RenderedCommand,
};
