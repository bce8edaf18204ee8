//! Source file loading with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional extension of Nachshon source files
pub const LANGUAGE_EXTENSION: &str = "נח";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .{LANGUAGE_EXTENSION}, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
    pub has_language_extension: bool,
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Reads source files. Limits are compile-time constants; only the extension
/// requirement is chosen at runtime.
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    pub require_language_extension: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language_extension_required(mut self, required: bool) -> Self {
        self.require_language_extension = required;
        self
    }

    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }
        metadata.line_count = line_count;

        log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "File processed successfully",
            "file" => file_path,
            "size_bytes" => metadata.size,
            "lines" => line_count,
            "language_extension" => metadata.has_language_extension
        );

        Ok(FileProcessingResult { source, metadata })
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", file_path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let path_str = path.display().to_string();
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path_str.clone(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read metadata for '{}': {}", path_str, e),
                },
            };
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path_str,
                "io_error" => e);
            error
        })?;

        let has_language_extension =
            path.extension().and_then(|ext| ext.to_str()) == Some(LANGUAGE_EXTENSION);

        log_debug!("File metadata collected",
            "size_bytes" => metadata.len(),
            "language_extension" => has_language_extension,
            "max_size_bytes" => MAX_FILE_SIZE);

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            line_count: 0,
            has_language_extension,
        })
    }

    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if self.require_language_extension && !metadata.has_language_extension {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata
                    .path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_string),
            };
            log_error!(error.error_code(), "File does not have the language extension",
                "file" => file_path,
                "required" => LANGUAGE_EXTENSION);
            return Err(error);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path.display().to_string(),
                },
                std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read file '{}': {}", path.display(), e),
                },
            };
            log_error!(error.error_code(), "Failed to read file",
                "file" => file_path,
                "io_error" => e);
            error
        })
    }
}

pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("תוכנית.נח");
        let content = "אם אמת:\n    הדפס(1)\n";
        fs::write(&file_path, content).unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.source, content);
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.size, content.len() as u64);
        assert!(result.metadata.has_language_extension);
        assert_eq!(result.char_count(), content.chars().count());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("ריק.נח");
        fs::write(&file_path, "").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_file_not_found() {
        let result = process_file("/definitely/not/here.נח");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_path_and_directory() {
        assert_matches!(
            process_file(""),
            Err(FileProcessorError::InvalidPath { .. })
        );

        let dir = tempdir().unwrap();
        assert_matches!(
            process_file(dir.path().to_str().unwrap()),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.נח");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

        let error = process_file(file_path.to_str().unwrap()).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidEncoding { .. });
        assert_eq!(error.error_code(), codes::file_processing::INVALID_ENCODING);
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("script.txt");
        fs::write(&file_path, "הדפס(1)").unwrap();
        let path = file_path.to_str().unwrap();

        assert!(FileProcessor::new().process_file(path).is_ok());
        assert_matches!(
            FileProcessor::new()
                .with_language_extension_required(true)
                .process_file(path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }
}
