use serde::{Deserialize, Serialize};

/// Classification of one structural unit of a screenplay.
///
/// The set is closed: every renderer carries a total mapping over it, so
/// adding a kind means updating each renderer's table. Constructs the
/// tokenizer does not recognize become `Other` rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Centered,
    Other,
}

impl TokenKind {
    /// Conventional fountain token-type string, e.g. `scene_heading`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::SceneHeading => "scene_heading",
            TokenKind::Action => "action",
            TokenKind::Character => "character",
            TokenKind::Dialogue => "dialogue",
            TokenKind::Parenthetical => "parenthetical",
            TokenKind::Transition => "transition",
            TokenKind::Centered => "centered",
            TokenKind::Other => "other",
        }
    }
}

/// One structural unit of a parsed screenplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal content of the unit, unescaped.
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}
