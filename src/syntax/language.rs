//! Language definitions for grammar generation
//!
//! A language names its templates and lists the whole-value slots its
//! grammar template is expected to contain. What goes into each slot is
//! decided by the generator.

use serde::Deserialize;

use super::synth::PairGrammar;
use crate::error::{GenError, Result};

/// Ways attribute/value pairs are written in the two languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairContext {
    /// `key=value, key=value`
    List,
    /// `key: value;` inside a block
    Group,
    /// `key=value` inside `=( ... )=`
    InlineList,
}

impl PairContext {
    pub const ALL: [PairContext; 3] = [PairContext::List, PairContext::Group, PairContext::InlineList];

    /// Separator and terminators of this context
    pub fn pair_grammar(&self) -> Result<PairGrammar> {
        match self {
            PairContext::List => PairGrammar::new("=", ","),
            PairContext::Group => PairGrammar::new(":", ";"),
            PairContext::InlineList => PairGrammar::new("=", "(,)"),
        }
    }

    /// Name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            PairContext::List => "list",
            PairContext::Group => "group",
            PairContext::InlineList => "inline-list",
        }
    }

    /// Parse a context from its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ctx| ctx.name() == name)
    }
}

/// A whole-value slot in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Pair rules for one context
    Pairs(PairContext),
    /// Variable, operator and length rules
    Expressions,
    /// Editor word pattern (language configuration only)
    WordPattern,
}

impl Slot {
    /// Placeholder name, without the `__` decoration
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Pairs(PairContext::List) => "PROP_LIST_PATTERNS",
            Slot::Pairs(PairContext::Group) => "PROP_GROUP_PATTERNS",
            Slot::Pairs(PairContext::InlineList) => "INLINE_PROP_LIST_PATTERNS",
            Slot::Expressions => "EXPRESSION_PATTERNS",
            Slot::WordPattern => "WORD_PATTERN",
        }
    }
}

/// A language the generator can produce files for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinition {
    /// Language identifier (e.g. "sbss"); also the template file stem
    pub name: String,
    /// Slots the grammar template must contain
    pub grammar_slots: Vec<Slot>,
    /// Whether an editor configuration is generated as well
    pub configuration: bool,
}

impl LanguageDefinition {
    /// Create a language with no slots
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grammar_slots: Vec::new(),
            configuration: false,
        }
    }

    /// Add a grammar slot
    pub fn add_slot(&mut self, slot: Slot) -> Result<()> {
        if slot == Slot::WordPattern {
            return Err(GenError::MalformedTemplate(format!(
                "{} belongs to the language configuration",
                slot.name()
            )));
        }
        if !self.grammar_slots.contains(&slot) {
            self.grammar_slots.push(slot);
        }
        Ok(())
    }

    /// Also generate the editor configuration
    pub fn add_configuration(&mut self) {
        self.configuration = true;
    }

    /// Slots of the configuration template
    pub fn configuration_slots(&self) -> &'static [Slot] {
        if self.configuration {
            &[Slot::WordPattern]
        } else {
            &[]
        }
    }

    pub fn grammar_template(&self) -> String {
        format!("{}.tmLanguage.template.json", self.name)
    }

    pub fn grammar_output(&self) -> String {
        format!("{}.tmLanguage.json", self.name)
    }

    pub fn configuration_template(&self) -> String {
        format!("{}-configuration.template.json", self.name)
    }

    pub fn configuration_output(&self) -> String {
        format!("{}-configuration.json", self.name)
    }
}
