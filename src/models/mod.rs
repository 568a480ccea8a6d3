pub mod screenplay;
pub mod token;
pub mod validation;

pub use screenplay::ParsedScreenplay;
pub use token::{Token, TokenKind};
pub use validation::{Severity, ValidationIssue, ValidationSummary};
