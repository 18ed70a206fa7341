//! Command-line interface for datax-launch
//!
//! Every value-taking flag may repeat, the last occurrence winning. Any
//! unrecognized token is the job path, again with the last one winning.

/// Usage text printed for an empty command line or malformed arguments
pub const USAGE: &str = "\
Usage: datax_launch [options] job-url-or-path
Options:
  -j, --jvm <jvm parameters>   Set JVM parameters.
  -m, --mode <runtime mode>    Set runtime mode (standalone, local, distribute).
  -p, --params <parameters>    Set job parameters (e.g., -Dkey=value).
  -r, --reader <reader>        Specify reader for job template.
  -w, --writer <writer>        Specify writer for job template.
  -d, --debug                  Enable debug mode.
  --loglevel <level>           Set log level (debug, info, error).";

/// Banner printed at the start of every invocation
pub fn banner() -> String {
    format!(
        "DataX Launch ({}), From Alibaba!\nCopyright (C) 2010-2017, Alibaba Group. All Rights Reserved.\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Parsed launcher options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Override for the baseline JVM parameters
    pub jvm_parameters: Option<String>,
    /// Execution mode, forwarded verbatim
    pub mode: String,
    /// Opaque job parameter blob
    pub params: Option<String>,
    /// Reader plugin name (template requests only)
    pub reader: Option<String>,
    /// Writer plugin name (template requests only)
    pub writer: Option<String>,
    /// Job definition path or URL
    pub job: Option<String>,
    /// Identifier for the spawned run
    pub job_id: String,
    /// Log level, forwarded verbatim
    pub log_level: String,
    /// Attach a remote debugger to the engine
    pub debug_mode: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            jvm_parameters: None,
            mode: "standalone".to_string(),
            params: None,
            reader: None,
            writer: None,
            job: None,
            job_id: "-1".to_string(),
            log_level: "info".to_string(),
            debug_mode: false,
        }
    }
}

impl Options {
    /// True when both a reader and a writer were given
    pub fn is_template_request(&self) -> bool {
        self.reader.is_some() && self.writer.is_some()
    }

    /// Filter for the launcher's own logger derived from `--loglevel`
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }
}

/// Errors raised while parsing the command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("Missing value for argument '{flag}'")]
    MissingValue { flag: String },
}

/// Parse command-line tokens (without the program name) into [`Options`]
pub fn parse<I, S>(tokens: I) -> Result<Options, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = Options::default();
    let mut tokens = tokens.into_iter().map(Into::<String>::into);

    while let Some(token) = tokens.next() {
        let slot = match token.as_str() {
            "-j" | "--jvm" => Some(&mut options.jvm_parameters),
            "-p" | "--params" => Some(&mut options.params),
            "-r" | "--reader" => Some(&mut options.reader),
            "-w" | "--writer" => Some(&mut options.writer),
            "-m" | "--mode" => {
                options.mode = take_value(&mut tokens, &token)?;
                continue;
            }
            "--loglevel" => {
                options.log_level = take_value(&mut tokens, &token)?;
                continue;
            }
            "-d" | "--debug" => {
                options.debug_mode = true;
                continue;
            }
            _ => None,
        };

        match slot {
            Some(slot) => *slot = Some(take_value(&mut tokens, &token)?),
            None => options.job = Some(token),
        }
    }

    Ok(options)
}

/// Consume the value following `flag`
fn take_value(
    tokens: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, ArgumentError> {
    tokens.next().ok_or_else(|| ArgumentError::MissingValue {
        flag: flag.to_string(),
    })
}
