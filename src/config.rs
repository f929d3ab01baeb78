use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionBumperError};
use crate::ui::OutputFormat;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "version_bumper.toml";

/// Represents the complete configuration for version-bumper.
///
/// Every field has a default so a partial file, or no file at all, works.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub pyproject: PyProjectConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the project file lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PyProjectConfig {
    #[serde(default = "default_pyproject_path")]
    pub path: PathBuf,
}

fn default_pyproject_path() -> PathBuf {
    PathBuf::from("pyproject.toml")
}

impl Default for PyProjectConfig {
    fn default() -> Self {
        PyProjectConfig {
            path: default_pyproject_path(),
        }
    }
}

/// Log filter used when neither the command line nor `RUST_LOG` set one,
/// and an optional file that receives the same messages.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Returns the user-level configuration path, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("version_bumper").join("config.toml"))
}

/// Parse configuration text, as JSON when `path` ends in `.json` and as TOML
/// otherwise.
pub fn parse_config(path: &Path, text: &str) -> Result<Config> {
    if is_json(path) {
        Ok(serde_json::from_str(text)?)
    } else {
        toml::from_str(text).map_err(|e| {
            VersionBumperError::config(format!("{}: {}", path.display(), e.message()))
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `version_bumper.toml` in current directory
/// 3. `version_bumper/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match find_config(config_path) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

/// Resolve which configuration file [`load_config`] reads, if any.
///
/// An explicit path is returned as is, whether or not it exists.
pub fn find_config(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        Some(PathBuf::from(LOCAL_CONFIG_FILE))
    } else {
        user_config_path().filter(|p| p.exists())
    }
}

/// Read and parse one configuration file.
pub fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    parse_config(path, &text)
}

/// Write `config` to `path`, as JSON or TOML depending on the extension.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let text = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config).map_err(|e| VersionBumperError::config(e.to_string()))?
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}
