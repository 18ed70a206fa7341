//! DataX Launch CLI
//!
//! Usage:
//!   datax_launch /opt/jobs/mysql2hdfs.json
//!   datax_launch -m local --loglevel debug /opt/jobs/mysql2hdfs.json
//!   datax_launch -r mysqlreader -w hdfswriter

use datax_launch::{
    cli, template_request, ArgumentError, ConfigError, LaunchError, LaunchOutcome,
    LauncherConfig, Options, Orchestrator,
};
use std::error::Error;
use tokio::sync::watch;

/// Failures that abort the launcher
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install termination hook")]
    Hook(#[from] ctrlc::Error),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

#[tokio::main]
async fn main() {
    print!("{}", cli::banner());

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    if tokens.is_empty() {
        println!("{}", cli::USAGE);
        std::process::exit(-1);
    }

    let options = match cli::parse(tokens) {
        Ok(options) => options,
        Err(e) => {
            init_logging("info");
            report(&CliError::from(e));
            println!("{}", cli::USAGE);
            std::process::exit(-1);
        }
    };
    init_logging(options.log_filter());

    let code = match run(&options).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            report(&e);
            if matches!(e, CliError::Launch(LaunchError::MissingJob)) {
                println!("{}", cli::USAGE);
            }
            -1
        }
    };

    log::debug!("Launcher exiting with status {}", code);
    std::process::exit(code);
}

async fn run(options: &Options) -> Result<LaunchOutcome, CliError> {
    // Template requests need neither configuration nor the termination hook
    if let Some(outcome) = template_request(options) {
        return Ok(outcome);
    }

    let config = LauncherConfig::from_env()?;
    log::debug!("DataX home: {}", config.home.display());

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(());

    // Kill the engine on Ctrl+C / SIGTERM
    ctrlc::set_handler(move || {
        log::info!("Received termination signal, stopping engine...");
        let _ = shutdown_tx.send(());
    })?;

    Ok(Orchestrator::new(config)
        .launch(options, shutdown_rx)
        .await?)
}

fn init_logging(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    env_logger::init_from_env(env);
}

/// Log an error together with its chain of causes
fn report(error: &CliError) {
    log::error!("{}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
