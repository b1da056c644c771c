//! Known attributes and the values they accept

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::count_groups;
use crate::error::{GenError, Result};

static ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(?:-[a-z]+)*$").expect("attribute name pattern"));

/// One attribute and the grammar of its legal literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Hyphenated lowercase name (e.g. "font-weight")
    pub name: String,
    /// Regex alternation, without anchors (e.g. "normal|bold")
    pub value_grammar: String,
    /// Capturing groups inside `value_grammar`
    groups: usize,
}

impl AttributeSpec {
    /// Validate and create an attribute spec
    pub fn new(name: &str, value_grammar: &str) -> Result<Self> {
        if !ATTRIBUTE_NAME.is_match(name) {
            return Err(GenError::InvalidAttributeName(name.to_string()));
        }
        let groups = count_groups(value_grammar).map_err(|source| GenError::InvalidAttributeGrammar {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            value_grammar: value_grammar.to_string(),
            groups,
        })
    }

    /// Number of capturing groups the value grammar contributes
    pub fn group_count(&self) -> usize {
        self.groups
    }
}

/// Ordered table of known attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    attributes: Vec<AttributeSpec>,
}

impl AttributeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, grammar)` pairs, keeping their order
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (name, grammar) in pairs {
            table.add(name, grammar)?;
        }
        Ok(table)
    }

    /// Append an attribute; names must be unique
    pub fn add(&mut self, name: &str, value_grammar: &str) -> Result<()> {
        if self.contains(name) {
            return Err(GenError::DuplicateAttribute(name.to_string()));
        }
        self.attributes.push(AttributeSpec::new(name, value_grammar)?);
        Ok(())
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attributes in table order
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeSpec> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

impl<'a> IntoIterator for &'a AttributeTable {
    type Item = &'a AttributeSpec;
    type IntoIter = std::slice::Iter<'a, AttributeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_count_recorded() {
        let spec = AttributeSpec::new("text-decoration", r"(a|b)(\s+(a|b))*").unwrap();
        assert_eq!(spec.group_count(), 3);
        let spec = AttributeSpec::new("writing-mode", r"horizontal\-tb|vertical\-rl").unwrap();
        assert_eq!(spec.group_count(), 0);
    }

    #[test]
    fn test_invalid_grammar_rejected() {
        match AttributeSpec::new("broken", "yes|(no").unwrap_err() {
            GenError::InvalidAttributeGrammar { name, .. } => assert_eq!(name, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["Font-weight", "font_weight", "-font", "font-", "font--weight", ""] {
            assert!(
                matches!(AttributeSpec::new(name, "x"), Err(GenError::InvalidAttributeName(_))),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_table_keeps_order_and_rejects_duplicates() {
        let mut table = AttributeTable::from_pairs([("pack", "yes|no"), ("clear", "none|left")]).unwrap();
        assert!(matches!(table.add("pack", "yes"), Err(GenError::DuplicateAttribute(_))));
        let names: Vec<&str> = table.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["pack", "clear"]);
        assert_eq!(table.get("clear").unwrap().value_grammar, "none|left");
        assert!(!table.contains("flow"));
    }
}
