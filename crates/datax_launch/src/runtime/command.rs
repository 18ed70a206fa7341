//! Engine command rendering

use crate::cli::Options;
use crate::config::LauncherConfig;

/// Fully-qualified entry point of the engine
pub const ENGINE_ENTRY_POINT: &str = "com.alibaba.datax.core.Engine";

/// JVM flags that open a remote debugger on a fixed local port
pub const DEBUG_FLAGS: [&str; 2] = [
    "-Xdebug",
    "-Xrunjdwp:transport=dt_socket,server=y,address=9999",
];

/// A resolved engine invocation: program plus discrete arguments, never a shell string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RenderedCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl std::fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Render the engine invocation for `options`.
///
/// Output depends only on `options` and `config`. The JVM parameters and the
/// params blob are split on ASCII whitespace and otherwise left untouched;
/// quotes are not interpreted.
pub fn build_command(options: &Options, config: &LauncherConfig) -> RenderedCommand {
    let jvm = options
        .jvm_parameters
        .as_deref()
        .unwrap_or(config.default_jvm.as_str());

    let mut args = vec!["-server".to_string()];
    args.extend(jvm.split_ascii_whitespace().map(String::from));
    if options.debug_mode {
        args.extend(DEBUG_FLAGS.iter().map(|f| f.to_string()));
    }

    args.extend(config.property_args(&options.log_level));
    args.push("-classpath".to_string());
    args.push(config.classpath());

    if let Some(params) = &options.params {
        args.extend(params.split_ascii_whitespace().map(String::from));
    }

    args.push(ENGINE_ENTRY_POINT.to_string());
    args.push("-mode".to_string());
    args.push(options.mode.clone());
    args.push("-jobid".to_string());
    args.push(options.job_id.clone());
    args.push("-job".to_string());
    args.push(options.job.clone().unwrap_or_default());

    RenderedCommand::new(config.java.clone(), args)
}
