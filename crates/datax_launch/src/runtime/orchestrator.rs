//! Launch orchestrator - decides between a template request and a job run

use crate::cli::Options;
use crate::config::LauncherConfig;
use crate::runtime::command::build_command;
use crate::runtime::process::{EngineRunner, ProcessError, ProcessRunner};
use std::fs::File;
use std::path::Path;
use tokio::sync::watch;

/// Terminal result of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A reader/writer template description was printed; nothing was spawned
    Template { reader: String, writer: String },
    /// The engine ran and exited with this status
    Exited(i32),
}

impl LaunchOutcome {
    /// Status the launcher should exit with
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Template { .. } => 0,
            LaunchOutcome::Exited(code) => *code,
        }
    }
}

/// Orchestrates a single launcher invocation
pub struct Orchestrator<R = EngineRunner> {
    config: LauncherConfig,
    runner: R,
}

impl Orchestrator<EngineRunner> {
    /// Create an orchestrator that spawns real engine processes
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_runner(config, EngineRunner)
    }
}

impl<R: ProcessRunner> Orchestrator<R> {
    /// Create an orchestrator with a custom process runner
    pub fn with_runner(config: LauncherConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Run the invocation described by `options`.
    ///
    /// Template requests return without touching the filesystem. Job runs
    /// validate the job resource, spawn the engine and wait for it; a message
    /// on `shutdown` kills the engine.
    pub async fn launch(
        &self,
        options: &Options,
        shutdown: watch::Receiver<()>,
    ) -> Result<LaunchOutcome, LaunchError> {
        if let Some(outcome) = template_request(options) {
            return Ok(outcome);
        }

        let job = validate_job(options.job.as_deref())?;
        log::debug!("Job resource: {}", job);

        let command = build_command(options, &self.config);
        println!("Starting DataX: {}", command);

        let code = self.runner.run(&command, shutdown).await?;
        Ok(LaunchOutcome::Exited(code))
    }
}

/// Print the template description when both a reader and a writer were given.
///
/// Needs neither configuration nor a job, so callers may take this path
/// before loading either.
pub fn template_request(options: &Options) -> Option<LaunchOutcome> {
    let (reader, writer) = (options.reader.as_ref()?, options.writer.as_ref()?);
    println!("{}", template_description(reader, writer));
    Some(LaunchOutcome::Template {
        reader: reader.clone(),
        writer: writer.clone(),
    })
}

/// Human-readable description for a template request
pub fn template_description(reader: &str, writer: &str) -> String {
    format!(
        "Generate job config template for:\nReader: {}\nWriter: {}\nPlease refer to the documentation for configuration details.",
        reader, writer
    )
}

/// Check that the job resource is present and readable.
///
/// HTTP(S) URLs are accepted as-is; the engine resolves them.
pub fn validate_job(job: Option<&str>) -> Result<&str, LaunchError> {
    let job = match job {
        Some(job) if !job.trim().is_empty() => job,
        _ => return Err(LaunchError::MissingJob),
    };

    if is_remote(job) {
        return Ok(job);
    }

    let path = Path::new(job);
    if path.is_file() && File::open(path).is_ok() {
        Ok(job)
    } else {
        Err(LaunchError::JobNotFound {
            path: job.to_string(),
        })
    }
}

fn is_remote(job: &str) -> bool {
    let lower = job.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Errors that abort a job run
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("No job file or URL given")]
    MissingJob,

    #[error("Job file not found: {path}")]
    JobNotFound { path: String },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl LaunchError {
    /// Every launcher failure exits with -1
    pub fn exit_code(&self) -> i32 {
        -1
    }
}
