use thiserror::Error;

/// Tokenizer failure.
///
/// Fountain is forgiving by design, so the tokenizer only fails on
/// constructs that cannot be classified at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unclosed boneyard comment opened on line {line}")]
    UnclosedBoneyard { line: usize },
}

/// Export pipeline failure. Fatal for the single export invocation.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{format} generation failed: {message}")]
    Render { format: &'static str, message: String },

    #[error("{format} export failed: {message}")]
    Tool { format: &'static str, message: String },
}

pub type ExportResult<T> = Result<T, ExportError>;
