use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for songbook.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONGBOOK_* prefix)
/// 3. Config file (~/.config/songbook/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum level of log records to print.
    ///
    /// Can be set via:
    /// - CLI: --log-level debug
    /// - ENV: SONGBOOK_LOG_LEVEL
    /// - Config: log_level = "debug"
    /// - Default: info
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colour log output.
    #[serde(default = "default_log_coloured")]
    pub log_coloured: bool,

    /// Print entries as JSON instead of the one-line catalog form.
    ///
    /// Can be set via:
    /// - CLI: --json
    /// - ENV: SONGBOOK_JSON_OUTPUT
    /// - Config: json_output = true
    #[serde(default)]
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_coloured: default_log_coloured(),
            json_output: false,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("songbook");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply command line overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, log_level: Option<String>, json: bool) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.json_output |= json;
        self
    }

    /// The configured level as understood by the logger.
    ///
    /// Unknown names fall back to `info`.
    pub fn log_level(&self) -> twyg::LogLevel {
        match self.log_level.to_lowercase().as_str() {
            "trace" => twyg::LogLevel::Trace,
            "debug" => twyg::LogLevel::Debug,
            "warn" | "warning" => twyg::LogLevel::Warn,
            "error" => twyg::LogLevel::Error,
            _ => twyg::LogLevel::Info,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_log_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/songbook/config.toml
/// - macOS: ~/Library/Application Support/songbook/config.toml
/// - Windows: %APPDATA%\songbook\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songbook")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Songbook Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONGBOOK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Minimum log level: trace, debug, info, warn, error
#
# Rejected titles, ratings and tags are reported at the warn level.
#
# Can also be set via:
# - CLI: songbook --log-level debug new ...
# - Environment: SONGBOOK_LOG_LEVEL=debug
log_level = "info"

# Colour log output
log_coloured = true

# Print entries as JSON instead of the one-line catalog form
#
# Can also be set via:
# - CLI: songbook new --json ...
# - Environment: SONGBOOK_JSON_OUTPUT=true
json_output = false
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
