//! Bridge configuration.
//!
//! Manages scripting settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [scripting]
//! language = en
//! script_dirs = scripts, scripts/scenarios
//! bootstrap = luax.lua, api/all.lua
//!
//! [console]
//! capacity = 200
//!
//! [scenario]
//! global_message_timeout = 5.0
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_SCRIPT_DIR: &str = "./scripts";
const DEFAULT_CONSOLE_CAPACITY: usize = 200;
const DEFAULT_GLOBAL_MESSAGE_TIMEOUT: f32 = 5.0;
const DEFAULT_CONFIG_PATH: &str = "./scriptbridge.ini";

/// Scripting configuration shared by every environment of a session.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Language code used to derive localization overlay names.
    pub language: String,
    /// Directories searched, in order, for script modules.
    pub script_dirs: Vec<PathBuf>,
    /// Modules run in every new environment right after registration.
    pub bootstrap: Vec<String>,
    /// Maximum number of lines kept by the console buffer.
    pub console_capacity: usize,
    /// Seconds a `globalMessage` stays visible when no timeout is given.
    pub global_message_timeout: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeConfig {
    /// Create a new configuration with safe default values.
    ///
    /// No bootstrap modules are run by default.
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            script_dirs: vec![PathBuf::from(DEFAULT_SCRIPT_DIR)],
            bootstrap: Vec::new(),
            console_capacity: DEFAULT_CONSOLE_CAPACITY,
            global_message_timeout: DEFAULT_GLOBAL_MESSAGE_TIMEOUT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [scripting] section
        if let Some(language) = config.get("scripting", "language") {
            let language = language.trim();
            if !language.is_empty() {
                self.language = language.to_string();
            }
        }
        if let Some(dirs) = config.get("scripting", "script_dirs") {
            let dirs: Vec<PathBuf> = split_list(&dirs).map(PathBuf::from).collect();
            if !dirs.is_empty() {
                self.script_dirs = dirs;
            }
        }
        if let Some(bootstrap) = config.get("scripting", "bootstrap") {
            self.bootstrap = split_list(&bootstrap).map(str::to_string).collect();
        }

        // [console] section
        if let Some(capacity) = config.getuint("console", "capacity").ok().flatten() {
            self.console_capacity = capacity as usize;
        }

        // [scenario] section
        if let Some(timeout) = config
            .getfloat("scenario", "global_message_timeout")
            .ok()
            .flatten()
        {
            self.global_message_timeout = timeout as f32;
        }

        info!(
            "Loaded config: language={}, {} script dir(s), {} bootstrap module(s), console={} lines",
            self.language,
            self.script_dirs.len(),
            self.bootstrap.len(),
            self.console_capacity
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        let dirs: Vec<String> = self
            .script_dirs
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        // [scripting] section
        config.set("scripting", "language", Some(self.language.clone()));
        config.set("scripting", "script_dirs", Some(dirs.join(", ")));
        config.set("scripting", "bootstrap", Some(self.bootstrap.join(", ")));

        // [console] section
        config.set("console", "capacity", Some(self.console_capacity.to_string()));

        // [scenario] section
        config.set(
            "scenario",
            "global_message_timeout",
            Some(self.global_message_timeout.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

/// Splits a comma-separated INI value, skipping empty items.
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::new();
        assert_eq!(config.language, "en");
        assert!(config.bootstrap.is_empty());
        assert_eq!(config.console_capacity, 200);
        assert_eq!(config.global_message_timeout, 5.0);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let mut config = BridgeConfig::with_path("/nonexistent/scriptbridge.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.ini");

        let mut config = BridgeConfig::with_path(&path);
        config.language = "de".into();
        config.bootstrap = vec!["luax.lua".into(), "api/all.lua".into()];
        config.script_dirs = vec![PathBuf::from("a"), PathBuf::from("b")];
        config.console_capacity = 16;
        config.global_message_timeout = 2.5;
        config.save_to_file().unwrap();

        let mut loaded = BridgeConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.language, "de");
        assert_eq!(loaded.bootstrap, vec!["luax.lua", "api/all.lua"]);
        assert_eq!(loaded.script_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(loaded.console_capacity, 16);
        assert_eq!(loaded.global_message_timeout, 2.5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.ini");
        std::fs::write(&path, "[scripting]\nlanguage = fr\n").unwrap();

        let mut config = BridgeConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.language, "fr");
        assert_eq!(config.console_capacity, 200);
        assert!(config.bootstrap.is_empty());
    }
}
