use serde::{Deserialize, Serialize};

use super::token::Token;

/// Parsed screenplay: title page metadata plus the ordered token stream.
///
/// Token order is source order and every renderer emits output in exactly
/// this order. Built once per invocation and immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedScreenplay {
    pub title: Option<String>,
    pub credit: Option<String>,
    pub author: Option<String>,
    pub tokens: Vec<Token>,
}

impl ParsedScreenplay {
    /// Title, or the "Untitled" placeholder.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Credit line, or the "Written by" placeholder.
    pub fn credit(&self) -> &str {
        self.credit.as_deref().unwrap_or("Written by")
    }

    /// Author, or empty.
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}
