//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum WeaveError {
    // ─────────────────────────────────────────────────────────────
    // Formatting errors (SQLW-001 to SQLW-002)
    // ─────────────────────────────────────────────────────────────

    #[error("SQLW-001: Unsupported type for join: {found}")]
    UnsupportedType { found: String },

    #[error("SQLW-002: Placeholder '{name}' expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    // ─────────────────────────────────────────────────────────────
    // Input errors (SQLW-010 to SQLW-012)
    // ─────────────────────────────────────────────────────────────

    #[error("SQLW-010: Invalid arguments: {0}")]
    Args(String),

    #[error("SQLW-011: YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("SQLW-012: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for WeaveError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            WeaveError::UnsupportedType { .. } => {
                Some("Pass a non-empty list whose elements are all ints, all floats, or all strings")
            }
            WeaveError::TypeMismatch { expected, .. } => match *expected {
                "sequence" => Some("Bind a list to {{join.name}} or use {{.name}} for a single value"),
                _ => Some("Use {{join.name}} for list values"),
            },
            WeaveError::Args(_) => {
                Some("Arguments must be a map of names to numbers, strings, or lists of them")
            }
            WeaveError::YamlParse(_) => Some("Check YAML/JSON syntax: indentation and quoting"),
            WeaveError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
