//! Self-contained HTML renderer for web preview.
//!
//! One document with inline styling: a centered title block, then one
//! paragraph per token in source order. Apostrophes stay unescaped; HTML
//! text nodes do not need them escaped.

use crate::error::ExportResult;
use crate::models::{ParsedScreenplay, Token, TokenKind};

use super::{Format, Renderer};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn format(&self) -> Format {
        Format::Html
    }

    fn generate(&self, screenplay: &ParsedScreenplay, _raw: &str) -> ExportResult<Vec<u8>> {
        Ok(build_html(screenplay).into_bytes())
    }
}

fn build_html(screenplay: &ParsedScreenplay) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
  <meta charset=\"UTF-8\">\n\
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
  <title>{title}</title>\n\
  <style>\n{styles}  </style>\n\
</head>\n\
<body>\n\
  <div class=\"screenplay\">\n\
{title_page}\n\
{content}\n\
  </div>\n\
</body>\n\
</html>",
        title = escape_html(screenplay.title()),
        styles = STYLES,
        title_page = render_title_page(screenplay),
        content = render_content(&screenplay.tokens),
    )
}

/// Fixed styling encoding screenplay conventions: monospaced font, indented
/// character/dialogue/parenthetical blocks, right-aligned transitions, a
/// page break after the title block for print.
const STYLES: &str = "\
    * { box-sizing: border-box; }
    body {
      font-family: 'Courier Prime', 'Courier New', monospace;
      font-size: 12pt;
      line-height: 1.5;
      max-width: 8.5in;
      margin: 0 auto;
      padding: 1in;
      background: #fff;
    }
    .screenplay { max-width: 6in; margin: 0 auto; }
    .title-page {
      text-align: center;
      page-break-after: always;
      min-height: 80vh;
      display: flex;
      flex-direction: column;
      justify-content: center;
    }
    .title-page h1 { font-size: 24pt; margin-bottom: 2em; }
    .title-page .author { font-size: 12pt; }
    .scene-heading {
      font-weight: bold;
      text-transform: uppercase;
      margin-top: 2em;
    }
    .action { margin: 1em 0; }
    .character {
      text-transform: uppercase;
      margin-left: 2in;
      margin-top: 1em;
    }
    .dialogue {
      margin-left: 1in;
      margin-right: 1.5in;
    }
    .parenthetical {
      margin-left: 1.5in;
      margin-right: 2in;
      font-style: italic;
    }
    .transition {
      text-align: right;
      text-transform: uppercase;
      margin: 1em 0;
    }
    .centered { text-align: center; }
    @media print {
      body { padding: 0; }
      .title-page { page-break-after: always; }
    }
";

fn render_title_page(screenplay: &ParsedScreenplay) -> String {
    format!(
        "    <div class=\"title-page\">\n\
      <h1>{}</h1>\n\
      <p class=\"credit\">{}</p>\n\
      <p class=\"author\">{}</p>\n\
    </div>",
        escape_html(screenplay.title()),
        escape_html(screenplay.credit()),
        escape_html(screenplay.author()),
    )
}

fn render_content(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(render_token)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One paragraph per token; the CSS class is the token kind. Empty `Other`
/// tokens render nothing, non-empty ones an unclassed paragraph.
fn render_token(token: &Token) -> Option<String> {
    let text = escape_html(&token.text);
    let class = match token.kind {
        TokenKind::SceneHeading => "scene-heading",
        TokenKind::Action => "action",
        TokenKind::Character => "character",
        TokenKind::Dialogue => "dialogue",
        TokenKind::Parenthetical => "parenthetical",
        TokenKind::Transition => "transition",
        TokenKind::Centered => "centered",
        TokenKind::Other => {
            if token.text.is_empty() {
                return None;
            }
            return Some(format!("    <p>{text}</p>"));
        }
    };
    Some(format!("    <p class=\"{class}\">{text}</p>"))
}

/// HTML text-node escaping. No apostrophe entity on purpose.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: Vec<Token>) -> String {
        build_html(&ParsedScreenplay {
            tokens,
            ..Default::default()
        })
    }

    #[test]
    fn document_is_self_contained() {
        let html = render(Vec::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn title_block_uses_placeholders_when_metadata_is_absent() {
        let html = render(Vec::new());
        assert!(html.contains("<h1>Untitled</h1>"));
        assert!(html.contains("<p class=\"credit\">Written by</p>"));
        assert!(html.contains("<p class=\"author\"></p>"));
    }

    #[test]
    fn title_block_comes_before_the_body() {
        let screenplay = ParsedScreenplay {
            title: Some("PILOT".to_string()),
            author: Some("J. Doe".to_string()),
            credit: None,
            tokens: vec![Token::new(TokenKind::Action, "Open on a desert.")],
        };
        let html = build_html(&screenplay);
        let title = html.find("<h1>PILOT</h1>").unwrap();
        let body = html.find("Open on a desert.").unwrap();
        assert!(title < body);
    }

    #[test]
    fn each_kind_gets_its_css_class() {
        let html = render(vec![
            Token::new(TokenKind::SceneHeading, "INT. HALL - DAY"),
            Token::new(TokenKind::Character, "JOHN"),
            Token::new(TokenKind::Parenthetical, "(soft)"),
            Token::new(TokenKind::Dialogue, "Hi."),
            Token::new(TokenKind::Transition, "CUT TO:"),
            Token::new(TokenKind::Centered, "THE END"),
        ]);
        for class in [
            "scene-heading",
            "character",
            "parenthetical",
            "dialogue",
            "transition",
            "centered",
        ] {
            assert!(html.contains(&format!("<p class=\"{class}\">")), "{class}");
        }
    }

    #[test]
    fn other_tokens_render_unclassed_or_not_at_all() {
        let html = render(vec![
            Token::new(TokenKind::Other, "# Act One"),
            Token::new(TokenKind::Other, ""),
        ]);
        assert!(html.contains("<p># Act One</p>"));
        assert_eq!(html.matches("    <p>").count(), 1);
    }

    #[test]
    fn token_order_is_preserved() {
        let html = render(vec![
            Token::new(TokenKind::Action, "alpha"),
            Token::new(TokenKind::Action, "beta"),
            Token::new(TokenKind::Action, "gamma"),
        ]);
        let a = html.find("alpha").unwrap();
        let b = html.find("beta").unwrap();
        let c = html.find("gamma").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn apostrophes_stay_unescaped() {
        let html = render(vec![Token::new(TokenKind::Dialogue, "Don't stop")]);
        assert!(html.contains("Don't stop"));
    }

    #[test]
    fn angle_brackets_and_ampersands_are_escaped() {
        let html = render(vec![Token::new(TokenKind::Action, "A & B <C> \"D\"")]);
        assert!(html.contains("A &amp; B &lt;C&gt; &quot;D&quot;"));
    }
}
