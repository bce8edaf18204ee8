use nachshon_lexer::completion::{complete, CompletionTrigger};
use nachshon_lexer::config::RuntimeConfig;
use nachshon_lexer::{classifier, file_processor, logging, SourceMap};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tokens { file: String },
    Check { file: String },
    Complete { file: String, offset: usize },
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    json: bool,
    explicit: bool,
    tab_width: Option<usize>,
    config_path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("nachshon");

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <tokens|check|complete> <file> [options]", program);
            eprintln!("       {} --help", program);
            std::process::exit(2);
        }
    };

    match options.command {
        Command::Help => {
            print_help(program);
            return Ok(());
        }
        Command::Version => {
            println!(
                "nachshon {} ({})",
                env!("CARGO_PKG_VERSION"),
                nachshon_lexer::config::build_info::source_info()
            );
            return Ok(());
        }
        _ => {}
    }

    let mut config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(width) = options.tab_width {
        config.lexical.tab_width = width;
    }
    config.validate()?;

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    file_processor::init_file_processor_logging()?;
    nachshon_lexer::lexical::validate_lexical_codes()?;

    let exit_code = match &options.command {
        Command::Tokens { file } => run_tokens(file, &config, options.json)?,
        Command::Check { file } => run_check(file, &config)?,
        Command::Complete { file, offset } => run_complete(file, *offset, options.explicit)?,
        Command::Help | Command::Version => 0,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut positional: Vec<&str> = Vec::new();
    let mut options = CliOptions {
        command: Command::Help,
        json: false,
        explicit: false,
        tab_width: None,
        config_path: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(options),
            "--version" | "-V" => {
                options.command = Command::Version;
                return Ok(options);
            }
            "--json" => options.json = true,
            "--explicit" => options.explicit = true,
            "--tab-width" => {
                let value = args.get(i + 1).ok_or("--tab-width requires a number")?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid tab width '{}'", value))?;
                options.tab_width = Some(width);
                i += 1;
            }
            "--config" => {
                let value = args.get(i + 1).ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
                i += 1;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            value => positional.push(value),
        }
        i += 1;
    }

    options.command = match positional.as_slice() {
        [] => Command::Help,
        ["tokens", file] => Command::Tokens {
            file: file.to_string(),
        },
        ["check", file] => Command::Check {
            file: file.to_string(),
        },
        ["complete", file, offset] => Command::Complete {
            file: file.to_string(),
            offset: offset
                .parse()
                .map_err(|_| format!("Invalid offset '{}'", offset))?,
        },
        [command, ..] => {
            return Err(format!(
                "Unknown command or wrong arguments for '{}'",
                command
            ))
        }
    };

    Ok(options)
}

fn print_help(program_name: &str) {
    println!("Nachshon lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizer, diagnostics and completion for Nachshon source files");
    println!();
    println!("USAGE:");
    println!("    {} tokens <file> [--json]          # Classified token stream", program_name);
    println!("    {} check <file>                    # Lexical diagnostics", program_name);
    println!("    {} complete <file> <offset>        # Completion candidates", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --version           Show version");
    println!("    --json              Emit JSON instead of a table (tokens)");
    println!("    --tab-width N       Columns per tab for indentation");
    println!("    --explicit          Offer every candidate for an empty prefix (complete)");
    println!("    --config PATH       Load runtime configuration from a TOML file");
    println!();
    println!("EXIT STATUS:");
    println!("    check exits with 1 when any error-severity diagnostic is reported");
}

fn run_tokens(
    file: &str,
    config: &RuntimeConfig,
    json: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = file_processor::process_file(file)?;
    let stream = classifier::tokenize_with_preferences(&loaded.source, &config.lexical);

    if json {
        println!("{}", serde_json::to_string_pretty(&stream)?);
        return Ok(0);
    }

    for classified in stream.iter() {
        let start = classified.token.span.start();
        println!(
            "{:>4}:{:<4} {:<24} {:<18} {}{:?}",
            start.line,
            start.column,
            classified.token.kind.to_string(),
            classified.category.as_str(),
            if classified.fold_boundary { "fold " } else { "" },
            classified.token.text
        );
    }
    for diagnostic in stream.diagnostics() {
        eprintln!(
            "{} [{}] {} at {}",
            diagnostic.severity().as_str(),
            diagnostic.code(),
            diagnostic.message,
            diagnostic.span
        );
    }
    Ok(0)
}

fn run_check(file: &str, config: &RuntimeConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = file_processor::process_file(file)?;
    let stream = classifier::tokenize_with_preferences(&loaded.source, &config.lexical);
    let source_map = SourceMap::new(&loaded.source);

    for diagnostic in stream.diagnostics() {
        let label = format!("{}[{}]", diagnostic.severity().as_str(), diagnostic.code());
        eprint!(
            "{}",
            source_map.format_error(&diagnostic.span, &label, &diagnostic.message)
        );
    }
    if stream.suppressed_diagnostics() > 0 {
        eprintln!(
            "... {} more diagnostics not shown",
            stream.suppressed_diagnostics()
        );
    }

    let errors = stream.diagnostics().iter().filter(|d| d.is_error()).count();
    let warnings = stream.diagnostics().len() - errors;
    println!(
        "{}: {} tokens, {} errors, {} warnings",
        file,
        stream.len(),
        errors,
        warnings
    );

    Ok(if stream.has_errors() { 1 } else { 0 })
}

fn run_complete(
    file: &str,
    offset: usize,
    explicit: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = file_processor::process_file(file)?;
    let trigger = if explicit {
        CompletionTrigger::Explicit
    } else {
        CompletionTrigger::Typing
    };

    for candidate in complete(&loaded.source, offset, trigger)? {
        println!(
            "{}\t{:?}\t{}\t{}",
            candidate.label,
            candidate.kind,
            candidate.detail.as_deref().unwrap_or(""),
            candidate.text_to_insert()
        );
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tokens_command() {
        let options = parse_args(&args(&["tokens", "a.נח", "--json", "--tab-width", "2"])).unwrap();
        assert_eq!(
            options.command,
            Command::Tokens {
                file: "a.נח".to_string()
            }
        );
        assert!(options.json);
        assert_eq!(options.tab_width, Some(2));
    }

    #[test]
    fn test_parse_complete_command() {
        let options = parse_args(&args(&["complete", "a.נח", "12", "--explicit"])).unwrap();
        assert_eq!(
            options.command,
            Command::Complete {
                file: "a.נח".to_string(),
                offset: 12
            }
        );
        assert!(options.explicit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["complete", "a.נח", "x"])).is_err());
        assert!(parse_args(&args(&["tokens"])).is_err());
        assert!(parse_args(&args(&["run", "a.נח"])).is_err());
        assert!(parse_args(&args(&["check", "a.נח", "--bogus"])).is_err());
        assert!(parse_args(&args(&["check", "a.נח", "--tab-width"])).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(&[]).unwrap().command, Command::Help);
        assert_eq!(parse_args(&args(&["--help"])).unwrap().command, Command::Help);
        assert_eq!(
            parse_args(&args(&["--version"])).unwrap().command,
            Command::Version
        );
    }
}
