//! Style tags and the classifications they resolve to
//!
//! Generated rules and hand-written templates never name a highlighter
//! scope directly. They carry `__STYLE_<NAME>__` tags, and a closed
//! [`StyleMap`] turns each tag into the scope string the consuming editor
//! understands. Resolution is the last pass over a composed document.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{GenError, Result};

/// Lexical shape of an inline style placeholder
static STYLE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__STYLE_([A-Z0-9]+(?:_[A-Z0-9]+)*)__").expect("style token pattern")
});

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").expect("tag name pattern"));

static CLASSIFICATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*(?: [A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)*$")
        .expect("classification pattern")
});

/// A style tag referenced by generated rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleTag(&'static str);

impl StyleTag {
    /// Attribute names
    pub const PROP_NAME: StyleTag = StyleTag("PROP_NAME");
    /// Attribute values that are accepted
    pub const PROP_VALUE: StyleTag = StyleTag("PROP_VALUE");
    /// Values a known attribute does not accept
    pub const INVALID: StyleTag = StyleTag("INVALID");
    /// `$NAME` references
    pub const VARIABLE: StyleTag = StyleTag("VARIABLE");
    /// Expression operators
    pub const OPERATOR: StyleTag = StyleTag("OPERATOR");
    /// Numeric lengths with units
    pub const LENGTH: StyleTag = StyleTag("LENGTH");

    /// Tag name without the placeholder decoration
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Placeholder token as it appears in rule text
    pub fn placeholder(&self) -> String {
        placeholder_for(self.name())
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.placeholder())
    }
}

/// Placeholder token for a tag name
pub fn placeholder_for(name: &str) -> String {
    format!("__STYLE_{}__", name)
}

/// Closed mapping from tag name to highlighter classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: BTreeMap<String, String>,
}

impl StyleMap {
    /// Create an empty style map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(tag, classification)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = Self::new();
        for (tag, classification) in pairs {
            map.insert(tag, classification)?;
        }
        Ok(map)
    }

    /// Add a mapping; each tag may be mapped once
    pub fn insert(&mut self, tag: &str, classification: &str) -> Result<()> {
        if !TAG_NAME.is_match(tag) {
            return Err(GenError::InvalidStyleTag(format!("malformed tag name '{}'", tag)));
        }
        if !CLASSIFICATION.is_match(classification) {
            return Err(GenError::InvalidStyleTag(format!(
                "malformed classification '{}' for {}",
                classification, tag
            )));
        }
        if self.entries.contains_key(tag) {
            return Err(GenError::InvalidStyleTag(format!("{} mapped twice", tag)));
        }
        self.entries.insert(tag.to_string(), classification.to_string());
        Ok(())
    }

    /// Classification for a tag name
    pub fn classification(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(|s| s.as_str())
    }

    /// Check that a tag is mapped
    #[cfg(test)]
    pub fn contains(&self, tag: StyleTag) -> bool {
        self.entries.contains_key(tag.name())
    }

    /// All placeholder tokens this map resolves
    pub fn placeholders(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.keys().map(|name| placeholder_for(name))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Replace every style placeholder in `text` with its classification
///
/// All tokens are substituted in one scan, so the result does not depend on
/// map order. A token without a mapping is an error rather than being left
/// in the output.
pub fn resolve(text: &str, styles: &StyleMap) -> Result<String> {
    let mut missing: Vec<String> = Vec::new();

    let resolved = STYLE_TOKEN.replace_all(text, |caps: &Captures| {
        match styles.classification(&caps[1]) {
            Some(classification) => classification.to_string(),
            None => {
                missing.push(caps[0].to_string());
                caps[0].to_string()
            }
        }
    });

    match missing.into_iter().next() {
        Some(token) => Err(GenError::UnresolvedPlaceholder(token)),
        None => Ok(resolved.into_owned()),
    }
}
