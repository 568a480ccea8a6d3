//! Line-oriented Fountain tokenizer.
//!
//! Raw text in, `ParsedScreenplay` out: a title page block followed by the
//! body classified line by line into the closed `TokenKind` set. Blank lines
//! delimit blocks and produce no tokens. Constructs outside the core grammar
//! (sections, synopses, lyrics, page breaks) tokenize as `Other` so that no
//! source content is dropped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ParseError;
use crate::models::{ParsedScreenplay, Token, TokenKind};

lazy_static! {
    /// Title page entry, e.g. `Title: BRICK & STEEL`.
    static ref TITLE_PAGE_KEY: Regex =
        Regex::new(r"^([A-Za-z][A-Za-z0-9 _-]*):\s*(.*)$").unwrap();

    /// Accepted scene heading prefixes.
    static ref SCENE_HEADING: Regex =
        Regex::new(r"(?i)^(INT\./EXT\.|INT/EXT\.|I/E\.|INT\.|EXT\.)\s+\S").unwrap();

    /// Uppercase line ending in TO: is a transition, e.g. `CUT TO:`.
    static ref TRANSITION: Regex = Regex::new(r"^[^a-z]*TO:$").unwrap();

    /// Lines handled outside the core grammar: sections, synopses, lyrics,
    /// page breaks.
    static ref OTHER_CONSTRUCT: Regex = Regex::new(r"^(#|=|~)").unwrap();
}

/// Tokenize Fountain source.
pub fn parse(raw: &str) -> Result<ParsedScreenplay, ParseError> {
    let stripped = strip_boneyard(raw)?;
    let lines: Vec<&str> = stripped.lines().collect();

    let mut screenplay = ParsedScreenplay::default();
    let body_start = parse_title_page(&lines, &mut screenplay);
    parse_body(&lines[body_start..], &mut screenplay.tokens);

    Ok(screenplay)
}

/// Remove `/* ... */` spans. An unterminated opener is the one construct the
/// tokenizer refuses, reported with the line it opened on.
fn strip_boneyard(raw: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        match rest[open..].find("*/") {
            Some(close) => rest = &rest[open + close + 2..],
            None => {
                let consumed_newlines = out.matches('\n').count();
                return Err(ParseError::UnclosedBoneyard {
                    line: consumed_newlines + 1,
                });
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Consume the title page block, if any, and return the index of the first
/// body line.
///
/// A title page exists when the first line is a `Key: value` entry; it runs
/// until the first blank line. Indented continuation lines fold into the
/// value of the preceding key. Keys other than Title/Credit/Author(s) are
/// accepted and ignored.
fn parse_title_page(lines: &[&str], screenplay: &mut ParsedScreenplay) -> usize {
    let first = match lines.first() {
        Some(line) => line,
        None => return 0,
    };
    let starts_title_page = TITLE_PAGE_KEY
        .captures(first)
        .map(|caps| is_title_page_key(&caps[1].to_ascii_lowercase()))
        .unwrap_or(false);
    if !starts_title_page {
        return 0;
    }

    let mut current_key: Option<String> = None;
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if line.trim().is_empty() {
            index += 1;
            break;
        }
        if let Some(caps) = TITLE_PAGE_KEY.captures(line) {
            let key = caps[1].to_ascii_lowercase();
            let value = caps[2].trim();
            if !value.is_empty() {
                set_metadata(screenplay, &key, value);
            }
            current_key = Some(key);
        } else if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(key) = &current_key {
                append_metadata(screenplay, key, line.trim());
            }
        } else {
            // Not a title page line after all; treat as body from here.
            break;
        }
        index += 1;
    }
    index
}

/// Keys that can open a title page. Otherwise a body line containing a
/// colon, like a transition, would be mistaken for metadata.
fn is_title_page_key(key: &str) -> bool {
    matches!(
        key,
        "title"
            | "credit"
            | "author"
            | "authors"
            | "source"
            | "draft date"
            | "date"
            | "contact"
            | "copyright"
            | "notes"
    )
}

fn set_metadata(screenplay: &mut ParsedScreenplay, key: &str, value: &str) {
    let slot = match key {
        "title" => &mut screenplay.title,
        "credit" => &mut screenplay.credit,
        "author" | "authors" => &mut screenplay.author,
        _ => return,
    };
    *slot = Some(value.to_string());
}

fn append_metadata(screenplay: &mut ParsedScreenplay, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let slot = match key {
        "title" => &mut screenplay.title,
        "credit" => &mut screenplay.credit,
        "author" | "authors" => &mut screenplay.author,
        _ => return,
    };
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(value);
        }
        None => *slot = Some(value.to_string()),
    }
}

fn parse_body(lines: &[&str], tokens: &mut Vec<Token>) {
    let mut in_dialogue = false;
    let mut prev_blank = true;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            in_dialogue = false;
            prev_blank = true;
            continue;
        }

        if in_dialogue {
            if trimmed.starts_with('(') && trimmed.ends_with(')') {
                tokens.push(Token::new(TokenKind::Parenthetical, trimmed));
            } else {
                tokens.push(Token::new(TokenKind::Dialogue, trimmed));
            }
            prev_blank = false;
            continue;
        }

        let token = classify_block_start(trimmed, prev_blank, next_is_nonblank(lines, index));
        if token.kind == TokenKind::Character {
            in_dialogue = true;
        }
        tokens.push(token);
        prev_blank = false;
    }
}

fn next_is_nonblank(lines: &[&str], index: usize) -> bool {
    lines
        .get(index + 1)
        .map(|line| !line.trim().is_empty())
        .unwrap_or(false)
}

fn classify_block_start(trimmed: &str, prev_blank: bool, next_nonblank: bool) -> Token {
    // Forced elements first: !, ., @, > take precedence over inference.
    if let Some(rest) = trimmed.strip_prefix('!') {
        return Token::new(TokenKind::Action, rest);
    }
    if trimmed.starts_with('.') && !trimmed.starts_with("..") {
        return Token::new(TokenKind::SceneHeading, trimmed[1..].trim());
    }
    if let Some(rest) = trimmed.strip_prefix('@') {
        return Token::new(TokenKind::Character, strip_dual_marker(rest.trim()));
    }
    if trimmed.starts_with('>') {
        if trimmed.ends_with('<') {
            let inner = trimmed[1..trimmed.len() - 1].trim();
            return Token::new(TokenKind::Centered, inner);
        }
        return Token::new(TokenKind::Transition, trimmed[1..].trim());
    }

    if SCENE_HEADING.is_match(trimmed) {
        return Token::new(TokenKind::SceneHeading, trimmed);
    }
    if TRANSITION.is_match(trimmed) {
        return Token::new(TokenKind::Transition, trimmed);
    }
    if OTHER_CONSTRUCT.is_match(trimmed) {
        return Token::new(TokenKind::Other, trimmed);
    }
    if prev_blank && next_nonblank && is_character_cue(trimmed) {
        return Token::new(TokenKind::Character, strip_dual_marker(trimmed));
    }

    Token::new(TokenKind::Action, trimmed)
}

/// A character cue is an uppercase line: at least one letter, no lowercase.
/// Extensions like `(O.S.)` and `(V.O.)` are allowed.
fn is_character_cue(trimmed: &str) -> bool {
    trimmed.chars().any(|c| c.is_alphabetic()) && !trimmed.chars().any(|c| c.is_lowercase())
}

/// Drop a trailing `^` (dual dialogue marker) from a character cue.
fn strip_dual_marker(cue: &str) -> &str {
    cue.strip_suffix('^').map(str::trim_end).unwrap_or(cue)
}
