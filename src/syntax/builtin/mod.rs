//! Built-in tables and language definitions
//!
//! Everything the generator knows about SBSS and SBML is compiled in here:
//! the known attributes, the style classifications, the expression rules
//! and the two languages.

mod attributes;
mod expressions;
mod sbml;
mod sbss;
mod styles;

pub use attributes::known_attributes;
pub use expressions::{expression_rules, WORD_PATTERN};
pub use styles::style_map;

use super::language::LanguageDefinition;
use crate::error::Result;

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    Ok(vec![sbss::sbss_language()?, sbml::sbml_language()?])
}
