//! Source file loading with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::logging::codes;
pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, LANGUAGE_EXTENSION,
};

/// Read a source file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT
}

/// Check that every file processing code has registry metadata (system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("File processor limits",
        "max_file_size" => MAX_FILE_SIZE,
        "max_line_count" => MAX_LINE_COUNT);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_validates_codes() {
        assert!(init_file_processor_logging().is_ok());
    }

    #[test]
    fn test_limits_exposed() {
        assert!(get_max_file_size() > 0);
        assert!(get_max_line_count() > 0);
    }
}
