use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use payload_validation::{
    parse_payload, JsonSchemaValidator, LegendRegistry, ValidationConfig, ValidationError, ValidationResult,
    Validator,
};
use serde_json::json;

const USAGE: &str = "usage: payload-validate <operation> [file]\n       payload-validate --list";

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Validate { operation: String, file: Option<String> },
}

fn parse_args(args: &[String]) -> ValidationResult<Command> {
    match args {
        [flag] if flag.as_str() == "--list" => Ok(Command::List),
        [operation] if !operation.starts_with("--") => Ok(Command::Validate {
            operation: operation.clone(),
            file: None,
        }),
        [operation, file] if !operation.starts_with("--") => Ok(Command::Validate {
            operation: operation.clone(),
            file: Some(file.clone()),
        }),
        _ => Err(ValidationError::InvalidArguments(USAGE.to_string())),
    }
}

/// Execute a command, writing its output to `out`
///
/// Returns whether the payload was valid (`--list` always succeeds).
fn run<W: Write>(command: Command, config: &ValidationConfig, out: &mut W) -> ValidationResult<bool> {
    let legends = LegendRegistry::standard();

    let (operation, file) = match command {
        Command::List => {
            for operation in legends.operations() {
                writeln!(out, "{}", operation)?;
            }
            return Ok(true);
        }
        Command::Validate { operation, file } => (operation, file),
    };

    let mut entry = match &file {
        Some(path) => parse_payload(File::open(path)?, config.max_payload_size)?,
        None => parse_payload(io::stdin().lock(), config.max_payload_size)?,
    };

    let structural = JsonSchemaValidator::new();
    let verdict = Validator::with_config(&legends, config).validate(&structural, operation.as_str(), &mut entry);
    let valid = verdict.valid;
    log::info!("{} payload is {}", operation, if valid { "valid" } else { "invalid" });

    let report = json!({ "verdict": verdict, "entry": entry });
    let rendered = if config.pretty_output {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    writeln!(out, "{}", rendered)?;

    Ok(valid)
}

fn main() -> ExitCode {
    config_rs::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ValidationConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let stdout = io::stdout();
    let result = parse_args(&args).and_then(|command| run(command, &config, &mut stdout.lock()));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(ValidationError::InvalidArguments(usage)) => {
            eprintln!("{}", usage);
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(2)
        }
    }
}
