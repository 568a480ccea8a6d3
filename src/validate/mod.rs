//! Structural validation of Fountain source.
//!
//! Rules inspect raw lines independently of the renderers; the tokenizer is
//! additionally run over the text so lower-level parse failures surface as
//! issues too. Issues are values, accumulated in detection order, never
//! thrown, and a bad file never aborts a file-set run.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{ValidationIssue, ValidationSummary};
use crate::parser;

lazy_static! {
    /// Accepted scene heading form: INT., EXT., INT/EXT. or I/E. plus content.
    static ref SCENE_HEADING: Regex =
        Regex::new(r"(?i)^(INT\.|EXT\.|INT/EXT\.|I/E\.)\s+.+").unwrap();

    /// Spelled-out keywords that should be abbreviated.
    static ref BAD_SCENE_HEADING: Regex = Regex::new(r"(?i)^(INTERIOR|EXTERIOR)\s+").unwrap();

    /// Trailing time-of-day marker, hyphen-prefixed: `- DAY`, `-NIGHT`, ...
    static ref TIME_OF_DAY: Regex =
        Regex::new(r"(?i)-\s*(DAY|NIGHT|MORNING|EVENING|LATER|CONTINUOUS|SAME)").unwrap();

    /// Line that is nothing but a parenthetical.
    static ref LONE_PARENTHETICAL: Regex = Regex::new(r"^\(.*\)$").unwrap();

    /// Line that looks like a character cue: uppercase letters and spaces.
    static ref UPPERCASE_CUE: Regex = Regex::new(r"^[A-Z\s]+$").unwrap();
}

/// Run all structural rules over raw source.
///
/// Returns (errors, warnings), each in source line order. A single line may
/// trigger several issues.
pub fn validate_source(raw: &str) -> (Vec<ValidationIssue>, Vec<ValidationIssue>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let lines: Vec<&str> = raw.split('\n').collect();

    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;
        let trimmed = line.trim();

        if BAD_SCENE_HEADING.is_match(trimmed) {
            errors.push(ValidationIssue::error(
                line_num,
                "Use INT. or EXT. instead of INTERIOR/EXTERIOR",
            ));
        }

        if SCENE_HEADING.is_match(trimmed) && !TIME_OF_DAY.is_match(trimmed) {
            warnings.push(ValidationIssue::warning(
                line_num,
                "Scene heading missing time of day (DAY, NIGHT, etc.)",
            ));
        }

        // Known quirk, kept deliberately: a parenthetical directly after a
        // blank line is not flagged, only one after a non-cue text line is.
        if LONE_PARENTHETICAL.is_match(trimmed) && index > 0 {
            let prev = lines[index - 1].trim();
            if !prev.is_empty() && !UPPERCASE_CUE.is_match(prev) {
                warnings.push(ValidationIssue::warning(
                    line_num,
                    "Parenthetical may be orphaned (no character above)",
                ));
            }
        }
    }

    // The structural rules above run regardless; a tokenizer failure adds
    // one more error, recorded at line 1 and reported first.
    if let Err(err) = parser::parse(raw) {
        errors.insert(0, ValidationIssue::error(1, format!("Parse error: {err}")));
    }

    (errors, warnings)
}

/// Validate a file set, printing each error as `path:line - message`.
///
/// Files are processed strictly in order. An unreadable file is recorded as
/// one error against that file and the run continues. An empty file set is
/// success.
pub fn validate_files<P: AsRef<Path>>(paths: &[P]) -> ValidationSummary {
    let mut summary = ValidationSummary::default();

    for path in paths {
        let path = path.as_ref();
        summary.files += 1;

        let (errors, warnings) = match fs::read_to_string(path) {
            Ok(content) => validate_source(&content),
            Err(err) => (
                vec![ValidationIssue::error(1, format!("Cannot read file: {err}"))],
                Vec::new(),
            ),
        };

        debug!(
            path = %path.display(),
            errors = errors.len(),
            warnings = warnings.len(),
            "validated file"
        );

        for issue in &errors {
            println!("  {}:{} - {}", path.display(), issue.line, issue.message);
        }

        summary.errors += errors.len();
        summary.warnings += warnings.len();
    }

    summary
}

/// Pre-flight gate run before an export: structural rules only, pass/fail.
pub fn preflight<P: AsRef<Path>>(paths: &[P]) -> bool {
    validate_files(paths).is_success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn clean_source_has_no_issues() {
        let (errors, warnings) = validate_source("Just some action.\n\nMore action.\n");
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn spelled_out_interior_is_an_error() {
        let (errors, warnings) = validate_source("INTERIOR KITCHEN");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].severity, Severity::Error);
        assert!(errors[0].message.contains("INT. or EXT."));
        assert!(warnings.is_empty());
    }

    #[test]
    fn exterior_is_flagged_case_insensitively() {
        let (errors, _) = validate_source("exterior park");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn heading_without_time_of_day_warns() {
        let (errors, warnings) = validate_source("INT. KITCHEN");
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("time of day"));
    }

    #[test]
    fn heading_with_time_of_day_is_clean() {
        for heading in [
            "INT. KITCHEN - DAY",
            "EXT. PARK - NIGHT",
            "INT/EXT. CAR - CONTINUOUS",
            "I/E. DOORWAY - later",
            "int. kitchen -DAY",
        ] {
            let (errors, warnings) = validate_source(heading);
            assert!(errors.is_empty(), "{heading}");
            assert!(warnings.is_empty(), "{heading}");
        }
    }

    #[test]
    fn orphaned_parenthetical_after_text_warns() {
        let (_, warnings) = validate_source("He walks in.\n(quietly)\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("orphaned"));
        assert_eq!(warnings[0].line, 2);
    }

    #[test]
    fn parenthetical_after_character_cue_is_fine() {
        let (_, warnings) = validate_source("JOHN\n(quietly)\nHello.\n");
        assert!(warnings.is_empty());
    }

    // The blank-preceding case is suppressed by the current rule; kept as-is.
    #[test]
    fn parenthetical_after_blank_line_is_not_flagged() {
        let (_, warnings) = validate_source("Action.\n\n(quietly)\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn parenthetical_on_the_first_line_is_not_flagged() {
        let (_, warnings) = validate_source("(quietly)\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn tokenizer_failure_is_recorded_at_line_one() {
        let (errors, _) = validate_source("Fine line.\n/* never closed\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.starts_with("Parse error:"));
    }

    #[test]
    fn tokenizer_failure_does_not_suppress_structural_rules() {
        let (errors, warnings) = validate_source("INTERIOR KITCHEN\n/* never closed\n");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message.contains("INT. or EXT.")));
        assert!(errors.iter().any(|e| e.message.starts_with("Parse error:")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_error_is_reported_before_structural_errors() {
        let (errors, _) = validate_source("INTERIOR KITCHEN\n/* never closed\n");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.starts_with("Parse error:"));
        assert_eq!(errors[0].line, 1);
        assert!(errors[1].message.contains("INT. or EXT."));
    }

    #[test]
    fn one_line_can_trigger_multiple_rules() {
        // INTERIOR line is an error; it is not also a scene heading, so no
        // time-of-day warning here.
        let (errors, warnings) = validate_source("INT. KITCHEN\nINTERIOR HALL\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert_eq!(warnings[0].line, 1);
    }

    #[test]
    fn empty_file_set_is_success() {
        let summary = validate_files::<&str>(&[]);
        assert_eq!(summary, ValidationSummary::default());
        assert!(summary.is_success());
    }

    #[test]
    fn unreadable_file_is_one_error_and_the_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.fountain");
        fs::write(&good, "INT. HALL - DAY\n").unwrap();
        let missing = dir.path().join("missing.fountain");

        let summary = validate_files(&[missing, good]);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 0);
    }

    #[test]
    fn preflight_passes_clean_files_and_fails_bad_ones() {
        let dir = tempfile::tempdir().unwrap();
        let clean = dir.path().join("clean.fountain");
        fs::write(&clean, "INT. HALL - DAY\n\nAction.\n").unwrap();
        assert!(preflight(&[&clean]));

        let bad = dir.path().join("bad.fountain");
        fs::write(&bad, "INTERIOR HALL\n").unwrap();
        assert!(!preflight(&[&bad]));
    }
}
