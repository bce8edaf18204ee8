//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with level filtering
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service from the installed runtime logging preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }
}

/// Human-readable logger writing to stderr
///
/// Stdout is reserved for command output (token dumps, completion lists).
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// JSON-lines logger writing to stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Memory logger for testing
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.lock().push(event.clone());
    }
}

impl Logger for Arc<MemoryLogger> {
    fn log(&self, event: &LogEvent) {
        self.as_ref().log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(Arc::new(memory.clone()), LogLevel::Warning);

        service.log_error(codes::lexical::UNTERMINATED_STRING, "unterminated");
        service.log_success(codes::success::TOKENIZATION_COMPLETE, "done");
        service.log_event(LogEvent::debug("noise"));

        assert_eq!(memory.event_count(), 1);
        assert_eq!(
            memory
                .get_events_with_code(codes::lexical::UNTERMINATED_STRING)
                .len(),
            1
        );
    }

    #[test]
    fn test_memory_logger_records_success() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(Arc::new(memory.clone()), LogLevel::Debug);

        service.log_success(codes::success::COMPLETION_COMPLETE, "3 candidates");
        assert!(memory.has_success_with_code(codes::success::COMPLETION_COMPLETE));

        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }
}
