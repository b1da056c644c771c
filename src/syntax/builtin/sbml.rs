//! SBML (block markup) language definition

use crate::error::Result;
use crate::syntax::language::{LanguageDefinition, PairContext, Slot};

/// Create the SBML language definition
pub fn sbml_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("sbml");
    // =begin / =object / =style / =image headers
    lang.add_slot(Slot::Pairs(PairContext::List))?;
    // =(object key=value, ...)=
    lang.add_slot(Slot::Pairs(PairContext::InlineList))?;
    lang.add_slot(Slot::Expressions)?;
    lang.add_configuration();
    Ok(lang)
}
