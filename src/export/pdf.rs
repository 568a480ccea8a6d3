//! PDF delegate renderer.
//!
//! Hands the whole generate+write step to the `afterwriting` typesetter.
//! The tool writes warnings to stderr and may exit non-zero while still
//! producing a correct document, so success is judged by the presence of
//! the output file, not by the exit status.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{ExportError, ExportResult};

use super::{DelegateRenderer, Format};

pub struct PdfDelegate;

impl DelegateRenderer for PdfDelegate {
    fn format(&self) -> Format {
        Format::Pdf
    }

    fn export_directly(&self, input: &Path, output: &Path) -> ExportResult<()> {
        let result = Command::new("npx")
            .arg("afterwriting")
            .arg("--source")
            .arg(input)
            .arg("--pdf")
            .arg(output)
            .output();

        let tool_message = match result {
            Ok(out) => {
                debug!(status = ?out.status, "afterwriting finished");
                String::from_utf8_lossy(&out.stderr).trim().to_string()
            }
            Err(err) => err.to_string(),
        };

        // Artifact presence is the success criterion, not the exit code.
        if output.exists() {
            return Ok(());
        }

        Err(ExportError::Tool {
            format: "pdf",
            message: if tool_message.is_empty() {
                "afterwriting produced no output".to_string()
            } else {
                tool_message
            },
        })
    }
}
