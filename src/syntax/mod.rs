//! Grammar synthesis module
//!
//! This module provides the pieces that turn the attribute table and the
//! templates into highlighting grammars:
//! - Attribute tables and their value grammars
//! - Pair pattern synthesis with tracked capture groups
//! - Template composition and style tag resolution

mod attributes;
mod builtin;
mod generator;
mod language;
mod rules;
mod style;
mod synth;
mod template;

pub use generator::GrammarGenerator;
pub use language::PairContext;
pub use synth::Validation;
