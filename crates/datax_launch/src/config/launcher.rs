//! Home directory and engine invocation settings

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the DataX home directory
pub const HOME_ENV: &str = "DATAX_HOME";

/// Location of the optional overrides file, relative to the home directory
pub const OVERRIDES_FILE: &str = "conf/launcher.yaml";

#[cfg(windows)]
const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_SEPARATOR: char = ':';

/// Settings the rendered command is derived from.
///
/// Built once at startup and handed to the orchestrator, so that rendering
/// never consults ambient process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// DataX home directory
    pub home: PathBuf,
    /// Java executable used to start the engine
    pub java: String,
    /// JVM parameters used when `--jvm` is absent
    pub default_jvm: String,
}

impl LauncherConfig {
    /// Create a configuration rooted at `home` with the built-in defaults
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let default_jvm = format!(
            "-Xms1g -Xmx1g -XX:+HeapDumpOnOutOfMemoryError -XX:HeapDumpPath={}/log",
            home.display()
        );
        Self {
            home,
            java: "java".to_string(),
            default_jvm,
        }
    }

    /// Load from `DATAX_HOME`, `JAVA_HOME` and the overrides file under the home directory
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_vars(
            std::env::var_os(HOME_ENV),
            std::env::var_os("JAVA_HOME"),
        );

        let overrides_path = config.overrides_path();
        if !overrides_path.is_file() {
            return Ok(config);
        }
        log::debug!("Loading launcher overrides from {}", overrides_path.display());
        let overrides = LauncherOverrides::from_file(&overrides_path)?;
        Ok(config.with_overrides(overrides))
    }

    /// Build from raw environment values; missing home falls back to the current directory
    pub fn from_vars(home: Option<OsString>, java_home: Option<OsString>) -> Self {
        let home = home
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut config = Self::new(home);
        if let Some(java_home) = java_home.filter(|j| !j.is_empty()) {
            config.java = Path::new(&java_home)
                .join("bin")
                .join("java")
                .to_string_lossy()
                .into_owned();
        }
        config
    }

    /// Apply values from the overrides file
    pub fn with_overrides(mut self, overrides: LauncherOverrides) -> Self {
        if let Some(java) = overrides.java {
            self.java = java;
        }
        if let Some(jvm) = overrides.jvm {
            self.default_jvm = jvm;
        }
        self
    }

    /// Path of the optional overrides file
    pub fn overrides_path(&self) -> PathBuf {
        self.home.join(OVERRIDES_FILE)
    }

    /// System properties passed to the engine
    pub fn property_args(&self, log_level: &str) -> Vec<String> {
        let home = self.home.display();
        vec![
            "-Dfile.encoding=UTF-8".to_string(),
            format!("-Ddatax.home={}", home),
            format!("-Dlogback.configurationFile={}/conf/logback.xml", home),
            format!("-Dloglevel={}", log_level),
        ]
    }

    /// Classpath covering every jar in the home library folder
    pub fn classpath(&self) -> String {
        format!("{}/lib/*{}.", self.home.display(), PATH_SEPARATOR)
    }
}

/// Contents of `conf/launcher.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherOverrides {
    /// Java executable
    #[serde(default)]
    pub java: Option<String>,
    /// Baseline JVM parameters
    #[serde(default)]
    pub jvm: Option<String>,
}

impl LauncherOverrides {
    /// Load overrides from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    /// Parse overrides from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(ConfigError::Parse)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid launcher overrides")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_home() {
        let config = LauncherConfig::new("/opt/datax");
        assert_eq!(config.java, "java");
        assert_eq!(
            config.default_jvm,
            "-Xms1g -Xmx1g -XX:+HeapDumpOnOutOfMemoryError -XX:HeapDumpPath=/opt/datax/log"
        );
        assert_eq!(
            config.overrides_path(),
            PathBuf::from("/opt/datax/conf/launcher.yaml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_classpath() {
        let config = LauncherConfig::new("/opt/datax");
        assert_eq!(config.classpath(), "/opt/datax/lib/*:.");
    }

    #[test]
    fn test_property_args() {
        let config = LauncherConfig::new("/opt/datax");
        assert_eq!(
            config.property_args("debug"),
            vec![
                "-Dfile.encoding=UTF-8",
                "-Ddatax.home=/opt/datax",
                "-Dlogback.configurationFile=/opt/datax/conf/logback.xml",
                "-Dloglevel=debug",
            ]
        );
    }

    #[test]
    fn test_from_vars() {
        let config = LauncherConfig::from_vars(
            Some(OsString::from("/srv/datax")),
            Some(OsString::from("/usr/lib/jvm/java-8")),
        );
        assert_eq!(config.home, PathBuf::from("/srv/datax"));
        assert_eq!(
            PathBuf::from(&config.java),
            Path::new("/usr/lib/jvm/java-8").join("bin").join("java")
        );
    }

    #[test]
    fn test_from_vars_defaults_to_current_dir() {
        let config = LauncherConfig::from_vars(Some(OsString::new()), None);
        assert_eq!(config.home, std::env::current_dir().unwrap());
        assert_eq!(config.java, "java");
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = LauncherOverrides::parse(
            r#"
java: /opt/jdk/bin/java
jvm: "-Xms4g -Xmx4g"
"#,
        )
        .unwrap();
        let config = LauncherConfig::new("/opt/datax").with_overrides(overrides);
        assert_eq!(config.java, "/opt/jdk/bin/java");
        assert_eq!(config.default_jvm, "-Xms4g -Xmx4g");
    }

    #[test]
    fn test_parse_partial_and_empty_overrides() {
        let overrides = LauncherOverrides::parse("jvm: -Xmx2g\n").unwrap();
        assert_eq!(overrides.java, None);
        assert_eq!(overrides.jvm.as_deref(), Some("-Xmx2g"));

        assert_eq!(
            LauncherOverrides::parse("  \n").unwrap(),
            LauncherOverrides::default()
        );
    }

    #[test]
    fn test_parse_overrides_rejects_unknown_keys() {
        let result = LauncherOverrides::parse("heap: 4g\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_error_message_leaves_detail_to_source() {
        use std::error::Error;

        let err = LauncherOverrides::parse("java: [unterminated\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid launcher overrides");
        let detail = err.source().unwrap().to_string();
        assert!(!detail.is_empty());
        assert!(!err.to_string().contains(&detail));
    }

    #[test]
    fn test_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher.yaml");
        std::fs::write(&path, "java: /usr/local/bin/java\n").unwrap();

        let overrides = LauncherOverrides::from_file(&path).unwrap();
        assert_eq!(overrides.java.as_deref(), Some("/usr/local/bin/java"));

        let missing = LauncherOverrides::from_file(dir.path().join("absent.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
