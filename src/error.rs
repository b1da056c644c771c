//! Error types for sbsyntax

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Generator error types
///
/// Every error is fatal: generation is deterministic and offline, so
/// nothing here is worth retrying.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Template is missing placeholder {0}")]
    MalformedTemplate(String),

    #[error("Unresolved placeholder: {0}")]
    UnresolvedPlaceholder(String),

    #[error("Invalid value grammar for attribute '{name}': {source}")]
    InvalidAttributeGrammar {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid attribute name: '{0}'")]
    InvalidAttributeName(String),

    #[error("Duplicate attribute: '{0}'")]
    DuplicateAttribute(String),

    #[error("Invalid pair grammar: {0}")]
    InvalidPairGrammar(String),

    #[error("Invalid style tag: {0}")]
    InvalidStyleTag(String),

    #[error("Placeholder {0} collides with {1}")]
    PlaceholderCollision(String, String),

    #[error("Failed to render rules for {slot}: {source}")]
    Render {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Generated document is not valid JSON: {0}")]
    InvalidOutput(#[source] serde_json::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{language}: {source}")]
    Language {
        language: String,
        #[source]
        source: Box<GenError>,
    },
}

impl GenError {
    /// Attach the language being generated to this error
    pub fn in_language(self, language: &str) -> Self {
        match self {
            already @ GenError::Language { .. } => already,
            other => GenError::Language {
                language: language.to_string(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_context_in_message() {
        let err = GenError::MalformedTemplate("__PROP_LIST_PATTERNS__".into()).in_language("sbml");
        assert_eq!(
            err.to_string(),
            "sbml: Template is missing placeholder __PROP_LIST_PATTERNS__"
        );
    }

    #[test]
    fn test_render_and_output_errors_distinct() {
        let json_error = || serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let render = GenError::Render {
            slot: "__PROP_LIST_PATTERNS__".into(),
            source: json_error(),
        };
        assert!(render
            .to_string()
            .starts_with("Failed to render rules for __PROP_LIST_PATTERNS__: "));
        let output = GenError::InvalidOutput(json_error());
        assert!(output.to_string().starts_with("Generated document is not valid JSON: "));
    }

    #[test]
    fn test_language_context_not_nested() {
        let err = GenError::UnknownLanguage("css".into())
            .in_language("sbss")
            .in_language("sbml");
        assert!(err.to_string().starts_with("sbss: "));
    }
}
