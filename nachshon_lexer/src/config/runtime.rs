// RUNTIME PREFERENCES (User Experience)

use crate::config::compile_time::lexical::{DEFAULT_TAB_WIDTH, MAX_TAB_WIDTH};
use crate::logging::codes;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Runtime configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid tab width: {width} (expected 1..={MAX_TAB_WIDTH})")]
    InvalidTabWidth { width: usize },

    #[error("Invalid configuration TOML: {message}")]
    Parse { message: String },

    #[error("Cannot read configuration file {path}: {message}")]
    Io { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::InvalidTabWidth { .. } => codes::configuration::INVALID_TAB_WIDTH,
            ConfigError::Parse { .. } => codes::configuration::CONFIG_PARSE_ERROR,
            ConfigError::Io { .. } => codes::configuration::CONFIG_IO_ERROR,
        }
    }
}

/// How a tab in leading whitespace is converted to indentation columns.
///
/// Mixed tab/space indentation is only comparable under one explicit policy, so the
/// policy is part of the configuration rather than an implicit assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabExpansion {
    /// Every tab adds exactly `tab_width` columns
    #[default]
    Fixed,
    /// A tab advances to the next multiple of `tab_width`
    NextStop,
}

impl TabExpansion {
    /// Column reached after a tab at `column` (0-based)
    pub fn expand(self, column: usize, tab_width: usize) -> usize {
        match self {
            TabExpansion::Fixed => column.saturating_add(tab_width),
            TabExpansion::NextStop => {
                let tab_width = tab_width.max(1);
                (column / tab_width)
                    .saturating_add(1)
                    .saturating_mul(tab_width)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabExpansion::Fixed => "fixed",
            TabExpansion::NextStop => "next_stop",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Columns a tab counts for when measuring indentation
    pub tab_width: usize,

    /// Tab expansion policy for indentation measurement
    pub tab_expansion: TabExpansion,

    /// Whether to report lines whose indentation mixes tabs and spaces
    pub report_mixed_indentation: bool,

    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            tab_width: env::var("NACHSHON_TAB_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TAB_WIDTH),
            tab_expansion: env::var("NACHSHON_TAB_EXPANSION")
                .ok()
                .and_then(|v| parse_tab_expansion(&v))
                .unwrap_or_default(),
            report_mixed_indentation: env::var("NACHSHON_REPORT_MIXED_INDENTATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            collect_detailed_metrics: env::var("NACHSHON_LEXICAL_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl LexicalPreferences {
    /// Compile-time defaults, independent of the process environment
    pub fn builtin() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            tab_expansion: TabExpansion::Fixed,
            report_mixed_indentation: true,
            collect_detailed_metrics: true,
        }
    }

    /// Built-in preferences with an explicit tab width
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width,
            ..Self::builtin()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(ConfigError::InvalidTabWidth {
                width: self.tab_width,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("NACHSHON_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var("NACHSHON_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warning" | "warn" => Some(LogLevel::Warning),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        _ => None,
    }
}

fn parse_tab_expansion(s: &str) -> Option<TabExpansion> {
    match s.to_lowercase().as_str() {
        "fixed" => Some(TabExpansion::Fixed),
        "next_stop" | "stop" => Some(TabExpansion::NextStop),
        _ => None,
    }
}

/// Complete runtime configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lexical.validate()
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const TAB_WIDTH: &str = "NACHSHON_TAB_WIDTH";
    pub const TAB_EXPANSION: &str = "NACHSHON_TAB_EXPANSION";
    pub const REPORT_MIXED_INDENTATION: &str = "NACHSHON_REPORT_MIXED_INDENTATION";
    pub const LEXICAL_DETAILED_METRICS: &str = "NACHSHON_LEXICAL_DETAILED_METRICS";
    pub const LOGGING_MIN_LEVEL: &str = "NACHSHON_LOGGING_MIN_LEVEL";
    pub const LOGGING_USE_STRUCTURED: &str = "NACHSHON_LOGGING_USE_STRUCTURED";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_tab_expansion_policies() {
        assert_eq!(TabExpansion::Fixed.expand(0, 4), 4);
        assert_eq!(TabExpansion::Fixed.expand(2, 4), 6);
        assert_eq!(TabExpansion::NextStop.expand(0, 4), 4);
        assert_eq!(TabExpansion::NextStop.expand(2, 4), 4);
        assert_eq!(TabExpansion::NextStop.expand(4, 4), 8);
    }

    #[test]
    fn test_tab_expansion_saturates() {
        assert_eq!(TabExpansion::Fixed.expand(usize::MAX, 4), usize::MAX);
        assert_eq!(TabExpansion::Fixed.expand(1, usize::MAX), usize::MAX);
        assert_eq!(TabExpansion::NextStop.expand(usize::MAX - 1, 4), usize::MAX);
        assert_eq!(TabExpansion::NextStop.expand(3, 0), 4);
    }

    #[test]
    fn test_builtin_preferences() {
        let builtin = LexicalPreferences::builtin();
        assert_eq!(builtin.tab_width, DEFAULT_TAB_WIDTH);
        assert_eq!(builtin.tab_expansion, TabExpansion::Fixed);
        assert!(builtin.report_mixed_indentation);
        assert!(builtin.validate().is_ok());

        let wide = LexicalPreferences::with_tab_width(8);
        assert_eq!(wide.tab_width, 8);
        assert_eq!(wide.tab_expansion, TabExpansion::Fixed);
    }

    #[test]
    fn test_tab_width_validation() {
        assert!(LexicalPreferences::with_tab_width(4).validate().is_ok());
        assert_matches!(
            LexicalPreferences::with_tab_width(0).validate(),
            Err(ConfigError::InvalidTabWidth { width: 0 })
        );
        assert_matches!(
            LexicalPreferences::with_tab_width(MAX_TAB_WIDTH + 1).validate(),
            Err(ConfigError::InvalidTabWidth { .. })
        );
    }

    #[test]
    fn test_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            tab_width = 8
            tab_expansion = "next_stop"

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.lexical.tab_width, 8);
        assert_eq!(config.lexical.tab_expansion, TabExpansion::NextStop);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let result = RuntimeConfig::from_toml_str("[lexical]\ntab_width = 0\n");
        assert_matches!(result, Err(ConfigError::InvalidTabWidth { width: 0 }));

        let result = RuntimeConfig::from_toml_str("[lexical\n");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\ntab_width = 2").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert_eq!(config.lexical.tab_width, 2);

        let missing = RuntimeConfig::load(Path::new("/definitely/not/here.toml"));
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_error_codes() {
        let error = ConfigError::InvalidTabWidth { width: 99 };
        assert_eq!(error.error_code().as_str(), "E070");
    }
}
