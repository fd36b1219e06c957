//! SuanShi configuration system
//!
//! Supports user-level and project-level configuration files.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments (--config)
//! 2. Environment variables (SUANSHI_LOG)
//! 3. Project-level (./suanshi.toml)
//! 4. User-level (~/.config/suanshi/config.toml)
//! 5. Default values
//! ```
//!
//! # Example file
//!
//! ```toml
//! [compiler]
//! stdlib = true
//! functions = ["sqrt", "sin"]
//!
//! [compiler.constants]
//! G = 9.80665
//!
//! [vm]
//! trace_execution = false
//!
//! [log]
//! level = "debug"
//! ```

use crate::util::logger::{LogLevel, ParseLevelError};
use crate::vm::VMConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "suanshi.toml";

/// Environment variable overriding the log level
pub const LOG_ENV_VAR: &str = "SUANSHI_LOG";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Registry setup for the compiler
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Executor settings
    #[serde(default)]
    pub vm: VMConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Compiler registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompilerConfig {
    /// Register the standard math library
    #[serde(default = "default_stdlib")]
    pub stdlib: bool,
    /// Subset of standard functions to register (empty means all of them)
    #[serde(default)]
    pub functions: Vec<String>,
    /// Extra named constants, registered after the standard ones
    #[serde(default)]
    pub constants: IndexMap<String, f64>,
}

fn default_stdlib() -> bool {
    true
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            stdlib: true,
            functions: Vec::new(),
            constants: IndexMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Level name: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LogConfig {
    /// Parsed log level
    pub fn level(&self) -> Result<LogLevel, ConfigError> {
        Ok(self.level.parse()?)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    LogLevel(#[from] ParseLevelError),
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("suanshi"));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("suanshi"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("suanshi"));
    }

    None
}

/// Get the user config file path (~/.config/suanshi/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(
        content: &str,
        origin: &Path,
    ) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file
    pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve the configuration following the hierarchy in the module docs
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => {
                let project = Path::new(PROJECT_CONFIG_FILE);
                if project.exists() {
                    Self::load_file(project)?
                } else {
                    match get_config_path() {
                        Some(user) if user.exists() => Self::load_file(&user)?,
                        _ => Config::default(),
                    }
                }
            }
        };
        config.apply_env();
        tracing::debug!(level = %config.log.level, "configuration loaded");
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_ENV_VAR) {
            if !level.trim().is_empty() {
                self.log.level = level;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.compiler.stdlib);
        assert!(config.compiler.functions.is_empty());
        assert!(!config.vm.trace_execution);
        assert_eq!(config.log.level().unwrap(), LogLevel::Info);
    }

    #[test]
    fn test_parse_full_file() {
        let text = r#"
            [compiler]
            stdlib = false
            functions = ["sqrt"]

            [compiler.constants]
            G = 9.80665
            C = 299792458.0

            [vm]
            trace_execution = true

            [log]
            level = "debug"
        "#;
        let config = Config::from_toml(text, Path::new("inline.toml")).unwrap();
        assert!(!config.compiler.stdlib);
        assert_eq!(config.compiler.functions, vec!["sqrt".to_string()]);
        let names: Vec<&str> = config.compiler.constants.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["G", "C"]);
        assert!(config.vm.trace_execution);
        assert_eq!(config.log.level().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml("[log]\nlevel = \"warn\"\n", Path::new("x.toml")).unwrap();
        assert!(config.compiler.stdlib);
        assert_eq!(config.log.level().unwrap(), LogLevel::Warn);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Config::from_toml("[compiler\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_bad_log_level() {
        let config = Config::from_toml("[log]\nlevel = \"chatty\"\n", Path::new("x.toml")).unwrap();
        assert!(matches!(config.log.level(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compiler.constants]\nTAU2 = 12.566").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.compiler.constants.get("TAU2"), Some(&12.566));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
