//! Export pipeline and format registry.
//!
//! One shared pipeline (read, tokenize, resolve output, generate, persist)
//! parameterized by a renderer capability. Formats that render locally
//! implement [`Renderer`]; the PDF format instead implements
//! [`DelegateRenderer`] and hands the whole generate+write step to an
//! external typesetting tool.

pub mod fdx;
pub mod html;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::ExportResult;
use crate::models::ParsedScreenplay;
use crate::parser;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Fdx,
    Html,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Pdf, Format::Fdx, Format::Html];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Fdx => "fdx",
            Format::Html => "html",
        }
    }

    /// Output file extension; matches the format name for every format.
    pub fn extension(&self) -> &'static str {
        self.name()
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Format::Pdf),
            "fdx" => Ok(Format::Fdx),
            "html" => Ok(Format::Html),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A format that turns a parsed screenplay into document bytes. The shared
/// pipeline handles everything around that step.
pub trait Renderer {
    fn format(&self) -> Format;

    /// Produce the document bytes. Raw source is available for renderers
    /// that need more than the token stream.
    fn generate(&self, screenplay: &ParsedScreenplay, raw: &str) -> ExportResult<Vec<u8>>;
}

/// A format that bypasses the generate/write split and produces the output
/// file itself, typically through an external tool.
pub trait DelegateRenderer {
    fn format(&self) -> Format;

    /// Produce the output file at `output` from `input`.
    fn export_directly(&self, input: &Path, output: &Path) -> ExportResult<()>;
}

/// The strategy registered for a format.
pub enum FormatStrategy {
    Render(&'static dyn Renderer),
    Delegate(&'static dyn DelegateRenderer),
}

/// Format registry: the only coupling between format selection and the
/// pipeline.
pub fn strategy_for(format: Format) -> FormatStrategy {
    match format {
        Format::Fdx => FormatStrategy::Render(&fdx::FdxRenderer),
        Format::Html => FormatStrategy::Render(&html::HtmlRenderer),
        Format::Pdf => FormatStrategy::Delegate(&pdf::PdfDelegate),
    }
}

/// Default output location: `exports/<format>/<input stem>.<extension>`.
pub fn default_output_path(format: Format, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from("exports")
        .join(format.name())
        .join(format!("{stem}.{}", format.extension()))
}

/// Export `input` to `format`, writing to `output` or the default location.
///
/// Returns the resolved output path. Each step's failure aborts the whole
/// operation; the destination is only written after generation succeeds.
pub fn export_screenplay(
    format: Format,
    input: &Path,
    output: Option<&Path>,
) -> ExportResult<PathBuf> {
    debug!(%format, input = %input.display(), "exporting");
    match strategy_for(format) {
        FormatStrategy::Render(renderer) => run_export_pipeline(renderer, input, output),
        FormatStrategy::Delegate(delegate) => {
            // Delegates skip the read/tokenize/generate steps; the external
            // tool consumes the source itself.
            let resolved = resolve_output_path(delegate.format(), input, output);
            ensure_parent_dir(&resolved)?;
            delegate.export_directly(input, &resolved)?;
            Ok(resolved)
        }
    }
}

/// The shared pipeline for locally rendered formats: read, tokenize, resolve
/// the output location, generate, persist (whole-file overwrite).
pub fn run_export_pipeline(
    renderer: &dyn Renderer,
    input: &Path,
    output: Option<&Path>,
) -> ExportResult<PathBuf> {
    let raw = fs::read_to_string(input)?;
    let screenplay = parser::parse(&raw)?;
    let resolved = resolve_output_path(renderer.format(), input, output);
    ensure_parent_dir(&resolved)?;
    let bytes = renderer.generate(&screenplay, &raw)?;
    fs::write(&resolved, bytes)?;
    Ok(resolved)
}

fn resolve_output_path(format: Format, input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(format, input),
    }
}

/// Idempotent: an already-existing destination directory is not an error.
fn ensure_parent_dir(path: &Path) -> ExportResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
