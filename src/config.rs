//! Runner configuration.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a [`ProcessRunner`](crate::ProcessRunner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Shell used for [`CommandLine::Shell`](crate::CommandLine::Shell) commands.
    pub shell: ShellSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Shell interpreter section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    /// Interpreter program.
    pub program: String,
    /// Arguments placed before the command string.
    pub args: Vec<String>,
}

impl Default for ShellSection {
    fn default() -> Self {
        #[cfg(windows)]
        {
            Self {
                program: "cmd".to_string(),
                args: vec!["/C".to_string()],
            }
        }
        #[cfg(not(windows))]
        {
            Self {
                program: "/bin/sh".to_string(),
                args: vec!["-c".to_string()],
            }
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| std::env::var(name).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(shell) = var("EKSEK_SHELL") {
            if !shell.is_empty() {
                self.shell.program = shell;
            }
        }

        if let Some(level) = var("EKSEK_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: env vars > config file > defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => RunnerConfig::from_file(path)?,
            None => RunnerConfig::default(),
        };

        config.apply_env();

        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[cfg(unix)]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.shell.program, "/bin/sh");
        assert_eq!(config.shell.args, vec!["-c".to_string()]);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "shell": {
                "program": "/bin/bash",
                "args": ["-e", "-c"]
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shell.program, "/bin/bash");
        assert_eq!(config.shell.args, vec!["-e", "-c"]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{ "logging": { "level": "trace" } }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shell, ShellSection::default());
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = RunnerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_missing_file() {
        let err = RunnerConfig::from_file(Path::new("/nonexistent/eksek.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let json = r#"{
            "shell": { "program": "/bin/bash", "args": ["-e", "-c"] },
            "logging": { "level": "debug" }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = RunnerConfig::load(Some(file.path())).unwrap();

        // Env vars are applied on top of the file.
        assert_eq!(config.shell.args, vec!["-e", "-c"]);
        let expected_program = std::env::var("EKSEK_SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/bin/bash".to_string());
        assert_eq!(config.shell.program, expected_program);
        let expected_level = std::env::var("EKSEK_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "debug".to_string());
        assert_eq!(config.logging.level, expected_level);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RunnerConfig::load(Some(Path::new("/nonexistent/eksek.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_apply_vars() {
        let vars: HashMap<&str, &str> = [("EKSEK_SHELL", "/bin/dash"), ("RUST_LOG", "warn")]
            .into_iter()
            .collect();

        let mut config = RunnerConfig::default();
        config.apply_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.shell.program, "/bin/dash");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_log_level_var_beats_rust_log() {
        let vars: HashMap<&str, &str> = [("EKSEK_LOG_LEVEL", "debug"), ("RUST_LOG", "warn")]
            .into_iter()
            .collect();

        let mut config = RunnerConfig::default();
        config.apply_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_shell_var_ignored() {
        let mut config = RunnerConfig::default();
        config.apply_vars(|name| (name == "EKSEK_SHELL").then(String::new));
        assert_eq!(config.shell, ShellSection::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = RunnerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"program\""));
        assert!(json.contains("\"level\""));
    }
}
