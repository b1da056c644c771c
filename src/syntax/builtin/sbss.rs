//! SBSS (block stylesheet) language definition

use crate::error::Result;
use crate::syntax::language::{LanguageDefinition, PairContext, Slot};

/// Create the SBSS language definition
///
/// Selectors take either an inline `key=value, ...` list after a colon or a
/// `{ key: value; }` block.
pub fn sbss_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("sbss");
    lang.add_slot(Slot::Pairs(PairContext::List))?;
    lang.add_slot(Slot::Pairs(PairContext::Group))?;
    lang.add_slot(Slot::Expressions)?;
    lang.add_configuration();
    Ok(lang)
}
