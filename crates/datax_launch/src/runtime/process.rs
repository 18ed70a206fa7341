//! Engine process spawning and supervision

use crate::runtime::command::RenderedCommand;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::sync::watch;

/// Spawns a rendered command and supervises it to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` until it exits, returning its exit status.
    ///
    /// A message on `shutdown` force-kills the child before returning.
    async fn run(
        &self,
        command: &RenderedCommand,
        shutdown: watch::Receiver<()>,
    ) -> Result<i32, ProcessError>;
}

/// Runs the engine as a child process sharing the launcher's stdio
#[derive(Debug, Clone, Default)]
pub struct EngineRunner;

#[async_trait]
impl ProcessRunner for EngineRunner {
    async fn run(
        &self,
        command: &RenderedCommand,
        mut shutdown: watch::Receiver<()>,
    ) -> Result<i32, ProcessError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                program: command.program.clone(),
                source: e,
            })?;

        let pid = child.id().unwrap_or(0);
        log::info!("Engine started with PID: {}", pid);

        // A dropped sender means nobody can request termination any more
        let terminate = async move {
            if shutdown.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        let status = tokio::select! {
            status = child.wait() => status.map_err(ProcessError::WaitFailed)?,
            _ = terminate => {
                log::info!("Termination requested, killing engine (PID {})", pid);
                if let Err(e) = child.start_kill() {
                    log::warn!("Failed to kill engine: {}", e);
                }
                let status = child.wait().await.map_err(ProcessError::WaitFailed)?;
                println!("DataX process terminated.");
                status
            }
        };

        let code = exit_code(status);
        log::info!("Engine exited with code: {}", code);
        Ok(code)
    }
}

/// Map a child exit status to the status the launcher exits with.
///
/// Signal deaths follow the shell convention of `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

/// Errors that can occur while running the engine
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{program}'")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for engine process")]
    WaitFailed(#[source] std::io::Error),
}
