use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use screenwright::{
    export_screenplay, find_all_screenplay_files, find_screenplay_file, parse_to_json, preflight,
    validate_files, Format,
};

#[derive(Parser, Debug)]
#[command(name = "screenwright", version, about = "Fountain screenplay validation and export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate Fountain files for structural mistakes
    Validate(ValidateArgs),
    /// Export a screenplay to pdf, fdx or html
    Export(ExportArgs),
    /// Dump the parsed token stream of a file as JSON
    Tokens(TokensArgs),
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Files to validate; defaults to every .fountain file under the
    /// current directory
    paths: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Target format: pdf, fdx or html
    format: Format,
    /// Source file; discovered automatically when omitted
    file: Option<PathBuf>,
    /// Output path; defaults to exports/<format>/<name>.<ext>
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Skip pre-flight validation
    #[arg(long)]
    no_validate: bool,
}

#[derive(Args, Debug)]
struct TokensArgs {
    /// Source file
    file: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Export(args) => run_export(args),
        Command::Tokens(args) => run_tokens(args),
    }
}

fn run_validate(args: ValidateArgs) -> ExitCode {
    let paths = if args.paths.is_empty() {
        find_all_screenplay_files(Path::new("."))
    } else {
        args.paths
    };

    let summary = validate_files(&paths);

    if summary.files == 0 {
        println!("No .fountain files found");
        return ExitCode::SUCCESS;
    }
    if summary.is_success() {
        println!(
            "{} file(s) valid, {} warning(s)",
            summary.files, summary.warnings
        );
        ExitCode::SUCCESS
    } else {
        println!(
            "Validation failed: {} error(s), {} warning(s)",
            summary.errors, summary.warnings
        );
        ExitCode::FAILURE
    }
}

fn run_export(args: ExportArgs) -> ExitCode {
    let input = match args.file.or_else(|| find_screenplay_file(Path::new("."))) {
        Some(path) => path,
        None => {
            eprintln!("No .fountain file found");
            return ExitCode::FAILURE;
        }
    };
    println!("Source: {}", input.display());

    if !args.no_validate {
        let project_files = find_all_screenplay_files(Path::new("."));
        let gate: &[PathBuf] = if project_files.is_empty() {
            std::slice::from_ref(&input)
        } else {
            &project_files
        };
        if !preflight(gate) {
            eprintln!("Pre-flight validation failed; fix errors before exporting (or pass --no-validate)");
            return ExitCode::FAILURE;
        }
    }

    match export_screenplay(args.format, &input, args.output.as_deref()) {
        Ok(path) => {
            println!("Exported: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Export failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_tokens(args: TokensArgs) -> ExitCode {
    let raw = match std::fs::read_to_string(&args.file) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("Cannot read {}: {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };
    match parse_to_json(&raw) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Parse error: {err}");
            ExitCode::FAILURE
        }
    }
}
