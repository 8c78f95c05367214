//! Configuration management for sneakerweb
//!
//! This module handles loading, validation, and management of
//! sneakerweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Initial data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Seed the session with the demo transactions on startup
    #[serde(default = "default_true")]
    pub seed_placeholders: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_placeholders: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// How amounts are shown in the transaction list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Glyph shown next to every amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::Before
    }
}

impl std::str::FromStr for SymbolPosition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(SymbolPosition::Before),
            "after" => Ok(SymbolPosition::After),
            _ => Err(format!("Invalid symbol position: {}", s)),
        }
    }
}

impl std::fmt::Display for SymbolPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolPosition::Before => write!(f, "before"),
            SymbolPosition::After => write!(f, "after"),
        }
    }
}

/// Transaction form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Brands offered by the brand selector
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            brands: default_brands(),
        }
    }
}

fn default_brands() -> Vec<String> {
    vec!["Nike".to_string(), "Adidas".to_string(), "Resale".to_string()]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Initial data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Amount display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Form settings
    #[serde(default)]
    pub form: FormConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on warning-level errors.
    ///
    /// The error that triggered the fallback is returned alongside the
    /// defaults so the caller can report it.
    pub fn load_or_default(path: PathBuf) -> ConfigResult<(Self, Option<ConfigError>)> {
        match Self::load(path) {
            Ok(config) => Ok((config, None)),
            Err(e) if e.severity() == ConfigErrorSeverity::Warning => Ok((Self::default(), Some(e))),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "display.currency_symbol".to_string(),
                reason: "Currency symbol must not be empty".to_string(),
            });
        }

        if self.form.brands.iter().all(|b| b.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "form.brands".to_string(),
                reason: "At least one brand must be listed".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.display.symbol_position, SymbolPosition::Before);
        assert_eq!(config.form.brands, vec!["Nike", "Adidas", "Resale"]);
        assert!(config.data.seed_placeholders);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.form.brands.len(), 3);
    }

    #[test]
    fn test_symbol_position_from_str() {
        assert_eq!("after".parse::<SymbolPosition>().unwrap(), SymbolPosition::After);
        assert_eq!("BEFORE".parse::<SymbolPosition>().unwrap(), SymbolPosition::Before);
        assert!("middle".parse::<SymbolPosition>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "server.port"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_brands() {
        let mut config = Config::default();
        config.form.brands = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let result = Config::from_yaml("logging:\n  level: loud\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::InvalidYaml)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(PathBuf::from("/nonexistent/sneakerweb.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let (config, problem) = Config::load_or_default(PathBuf::from("/nonexistent/sneakerweb.yaml")).unwrap();
        assert_eq!(config.server.port, 8081);

        let problem = problem.unwrap();
        assert_eq!(problem.severity(), ConfigErrorSeverity::Warning);
        let details = problem.to_details().to_string();
        assert!(details.starts_with("[FILE_NOT_FOUND]"));
        assert!(details.contains("--print-default-config"));
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("sneakerweb-invalid-{}.yaml", std::process::id()));
        std::fs::write(&path, "server:\n  port: 0\n").unwrap();

        let result = Config::load_or_default(path.clone());
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.severity(), ConfigErrorSeverity::Error);
        assert_eq!(err.to_details().field.as_deref(), Some("server.port"));
    }
}
