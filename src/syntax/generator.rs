//! Grammar generator
//!
//! This module provides the GrammarGenerator that ties the attribute
//! table, synthesizer, style map and languages together. It works on
//! template text in memory; reading and writing files is the driver's job.

use std::collections::HashMap;

use log::debug;

use super::attributes::AttributeTable;
use super::builtin;
use super::language::{LanguageDefinition, Slot};
use super::style::StyleMap;
use super::synth::Synthesizer;
use super::template::{Compositor, GrammarTemplate, Substitution, Substitutions};
use crate::config::ValidationConfig;
use crate::error::{GenError, Result};

/// Produces grammar and configuration documents per language
pub struct GrammarGenerator {
    /// Registered languages
    languages: HashMap<String, LanguageDefinition>,
    attributes: AttributeTable,
    styles: StyleMap,
    validation: ValidationConfig,
}

impl GrammarGenerator {
    /// Create a generator from explicit tables, with no languages
    pub fn new(attributes: AttributeTable, styles: StyleMap, validation: ValidationConfig) -> Self {
        Self {
            languages: HashMap::new(),
            attributes,
            styles,
            validation,
        }
    }

    /// Create a generator with the built-in tables and languages
    ///
    /// Every value grammar is compiled here, before any file is touched.
    pub fn with_builtins(validation: ValidationConfig) -> Result<Self> {
        let mut generator = Self::new(builtin::known_attributes()?, builtin::style_map()?, validation);
        for lang in builtin::all_languages()? {
            generator.add_language(lang);
        }
        Ok(generator)
    }

    /// Add a language definition
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        self.languages.insert(lang.name.clone(), lang);
    }

    /// Get a language definition by name
    pub fn get_language(&self, name: &str) -> Result<&LanguageDefinition> {
        self.languages
            .get(name)
            .ok_or_else(|| GenError::UnknownLanguage(name.to_string()))
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Content for one slot
    pub fn substitution(&self, slot: Slot) -> Result<Substitution> {
        let substitution = match slot {
            Slot::Pairs(context) => {
                let pair = context.pair_grammar()?;
                let validation = self.validation.get(context);
                let pattern = Synthesizer::new(&self.attributes).synthesize(&pair, validation);
                Substitution::Rules(pattern.rules())
            }
            Slot::Expressions => Substitution::Rules(builtin::expression_rules()),
            Slot::WordPattern => Substitution::Text(builtin::WORD_PATTERN.to_string()),
        };
        Ok(substitution)
    }

    fn substitutions(&self, slots: &[Slot]) -> Result<Substitutions> {
        let mut subs = Substitutions::new();
        for &slot in slots {
            debug!("building slot {}", slot.name());
            subs.insert(slot.name(), self.substitution(slot)?)?;
        }
        Ok(subs)
    }

    /// Compose the grammar document for a language
    pub fn generate_grammar(&self, language: &str, template: &str) -> Result<String> {
        self.generate(language, template, |lang| lang.grammar_slots.as_slice())
    }

    /// Compose the editor configuration for a language
    pub fn generate_configuration(&self, language: &str, template: &str) -> Result<String> {
        self.generate(language, template, |lang| lang.configuration_slots())
    }

    fn generate<F>(&self, language: &str, template: &str, slots: F) -> Result<String>
    where
        F: for<'l> FnOnce(&'l LanguageDefinition) -> &'l [Slot],
    {
        let compose = || {
            let lang = self.get_language(language)?;
            let subs = self.substitutions(slots(lang))?;
            let template = GrammarTemplate::parse(template);
            Compositor::new(&self.styles, subs)?.compose(&template)
        };
        compose().map_err(|e| e.in_language(language))
    }
}
