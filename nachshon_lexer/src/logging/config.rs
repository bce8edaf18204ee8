//! Runtime logging preferences storage
//!
//! Preferences are installed once at startup; before that, defaults (which read
//! `NACHSHON_LOGGING_*` environment variables) are used.

use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Human-readable summary of the active logging configuration
pub fn get_config_summary() -> String {
    format!(
        "Logging configuration:\n  min level: {}\n  structured: {}\n  max message length: {}\n",
        get_min_log_level().as_str(),
        use_structured_logging(),
        crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH
    )
}
