pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod utils;
pub mod validate;

pub use error::{ExportError, ExportResult, ParseError};

pub use models::{
    ParsedScreenplay, Severity, Token, TokenKind, ValidationIssue, ValidationSummary,
};

pub use export::{
    default_output_path, export_screenplay, run_export_pipeline, strategy_for, DelegateRenderer,
    Format, FormatStrategy, Renderer,
};

pub use validate::{preflight, validate_files, validate_source};

pub use utils::{find_all_screenplay_files, find_screenplay_file};

/// Tokenize Fountain source text.
///
/// # Arguments
///
/// * `script` - Fountain screenplay text
///
/// # Returns
///
/// The parsed screenplay, or a parse failure.
pub fn parse(script: &str) -> Result<ParsedScreenplay, ParseError> {
    parser::parse(script)
}

/// Parsed token stream as JSON, for tooling and previews.
pub fn parse_to_json(script: &str) -> Result<String, ParseError> {
    let screenplay = parse(script)?;
    Ok(serde_json::to_string_pretty(&screenplay).unwrap_or_else(|_| "{}".to_string()))
}
