//! Global logging for the Nachshon lexer
//!
//! A single `LoggingService` is installed process-wide. Until it is installed, the
//! logging macros are no-ops, so library consumers that never initialize logging
//! pay nothing for it.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    let logging_service = Arc::new(service::LoggingService::with_config());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    for code in [
        codes::lexical::UNRECOGNIZED_CHARACTER,
        codes::indentation::INCONSISTENT_INDENTATION,
        codes::completion::CURSOR_OUT_OF_BOUNDS,
    ] {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn emit(mut event: LogEvent, span: Option<crate::utils::Span>, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }

    if let Some(s) = span {
        event = event.with_span(s);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    logger.log_event(event);
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    emit(LogEvent::error(code, message), span, context);
}

/// Used by `log_warning!`
pub fn log_warning_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    emit(LogEvent::warning_with_code(code, message), span, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::success(code, message), None, context);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::info(message), None, context);
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::debug(message), None, context);
}

/// Error logging that falls back to stderr when no logger is installed
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_do_not_panic_without_logger() {
        crate::log_info!("tokenizing", "bytes" => 12);
        crate::log_debug!("token", "kind" => "Identifier");
        crate::log_warning!(codes::lexical::MALFORMED_NUMBER, "malformed", "text" => "1.2.3");
        crate::log_success!(codes::success::TOKENIZATION_COMPLETE, "done", "tokens" => 3);
        safe_log_error(codes::system::INTERNAL_ERROR, "fallback path");
    }
}
