// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    default_tab_width: usize,
    max_tab_width: usize,
    max_diagnostics: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=NACHSHON_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=NACHSHON_CONFIG_DIR");

    let profile = env::var("NACHSHON_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("NACHSHON_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of nachshon_lexer directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_TAB_WIDTH: usize = 64;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.lexical.max_tab_width == 0 || config.lexical.max_tab_width > ABSOLUTE_MAX_TAB_WIDTH {
        panic!("LIMITS: max_tab_width must be in 1..={}", ABSOLUTE_MAX_TAB_WIDTH);
    }

    if config.lexical.default_tab_width == 0
        || config.lexical.default_tab_width > config.lexical.max_tab_width
    {
        panic!("LIMITS: default_tab_width must be in 1..=max_tab_width");
    }

    if config.lexical.max_diagnostics == 0 {
        panic!("LIMITS: max_diagnostics cannot be zero");
    }

    if config.logging.max_log_message_length < 64 {
        panic!("LIMITS: max_log_message_length too small (min: 64)");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        pub const DEFAULT_TAB_WIDTH: usize = {};
        pub const MAX_TAB_WIDTH: usize = {};
        pub const MAX_DIAGNOSTICS: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.max_line_count,
        // Lexical
        config.lexical.default_tab_width,
        config.lexical.max_tab_width,
        config.lexical.max_diagnostics,
        // Logging
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
