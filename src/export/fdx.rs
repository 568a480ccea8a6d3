//! Final Draft XML renderer.
//!
//! The token stream maps to a flat sequence of typed paragraphs inside the
//! fixed FinalDraft envelope. Title metadata is not embedded in this format.

use crate::error::ExportResult;
use crate::models::{ParsedScreenplay, Token, TokenKind};

use super::{Format, Renderer};

pub struct FdxRenderer;

impl Renderer for FdxRenderer {
    fn format(&self) -> Format {
        Format::Fdx
    }

    fn generate(&self, screenplay: &ParsedScreenplay, _raw: &str) -> ExportResult<Vec<u8>> {
        Ok(build_fdx(screenplay).into_bytes())
    }
}

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"5\">\n  <Content>";
const FOOTER: &str = "\n  </Content>\n</FinalDraft>";

fn build_fdx(screenplay: &ParsedScreenplay) -> String {
    let mut xml = String::from(HEADER);
    for token in &screenplay.tokens {
        if let Some(paragraph_type) = paragraph_type(token) {
            push_paragraph(&mut xml, paragraph_type, &token.text);
        }
    }
    xml.push_str(FOOTER);
    xml
}

/// FDX paragraph type for a token; `None` means the token renders nothing
/// (only empty `Other` tokens).
fn paragraph_type(token: &Token) -> Option<&'static str> {
    match token.kind {
        TokenKind::SceneHeading => Some("Scene Heading"),
        TokenKind::Action => Some("Action"),
        TokenKind::Character => Some("Character"),
        TokenKind::Dialogue => Some("Dialogue"),
        TokenKind::Parenthetical => Some("Parenthetical"),
        TokenKind::Transition => Some("Transition"),
        TokenKind::Centered => Some("General"),
        TokenKind::Other => {
            if token.text.is_empty() {
                None
            } else {
                Some("General")
            }
        }
    }
}

fn push_paragraph(xml: &mut String, paragraph_type: &str, text: &str) {
    xml.push_str("\n    <Paragraph Type=\"");
    xml.push_str(paragraph_type);
    xml.push_str("\">\n      <Text>");
    xml.push_str(&escape_xml(text));
    xml.push_str("</Text>\n    </Paragraph>");
}

/// XML entity escaping. Ampersand first, or already-escaped entities would
/// be escaped again.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
