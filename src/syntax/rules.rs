//! Match rules and the builder that assembles their patterns
//!
//! A [`MatchRule`] is one entry of a grammar's `patterns` array: a regex
//! plus the style tags assigned to its capture groups. Patterns are put
//! together with [`PatternBuilder`], which numbers capture groups as it goes
//! and accounts for the groups inside embedded fragments, so callers get
//! back the index of every slot instead of guessing it.

use std::collections::BTreeMap;

use regex::Regex;
use serde::ser::Serializer;
use serde::Serialize;

use super::style::StyleTag;

/// Index of a capture group within a rule's pattern (1-based)
pub type GroupIndex = usize;

/// Count the capturing groups in a regex fragment
///
/// The fragment is compiled as-is, so escaped parentheses and
/// non-capturing groups are handled by the regex parser.
pub fn count_groups(fragment: &str) -> Result<usize, regex::Error> {
    let regex = Regex::new(&format!("(?:{})", fragment))?;
    Ok(regex.captures_len() - 1)
}

/// Style tags applied to one capture group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub tags: Vec<StyleTag>,
}

impl Capture {
    /// Rendered `name` value, tags separated by spaces
    pub fn name(&self) -> String {
        join_tags(&self.tags)
    }
}

impl Serialize for Capture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Named {
            name: String,
        }
        Named { name: self.name() }.serialize(serializer)
    }
}

fn join_tags(tags: &[StyleTag]) -> String {
    tags.iter()
        .map(|tag| tag.placeholder())
        .collect::<Vec<_>>()
        .join(" ")
}

fn serialize_tags<S: Serializer>(tags: &Option<Vec<StyleTag>>, serializer: S) -> Result<S::Ok, S::Error> {
    match tags {
        Some(tags) => serializer.serialize_str(&join_tags(tags)),
        None => serializer.serialize_none(),
    }
}

/// A single-regex grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRule {
    /// Tags for the whole match
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_tags")]
    pub name: Option<Vec<StyleTag>>,
    /// Regex source
    #[serde(rename = "match")]
    pub pattern: String,
    /// Tags per capture group
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub captures: BTreeMap<GroupIndex, Capture>,
}

impl MatchRule {
    /// Create a rule with no styling yet
    pub fn new(pattern: String) -> Self {
        Self {
            name: None,
            pattern,
            captures: BTreeMap::new(),
        }
    }

    /// Builder: style the whole match
    pub fn named(mut self, tag: StyleTag) -> Self {
        self.name.get_or_insert_with(Vec::new).push(tag);
        self
    }

    /// Builder: style a capture group
    pub fn capture(mut self, index: GroupIndex, tag: StyleTag) -> Self {
        self.captures
            .entry(index)
            .or_insert_with(|| Capture { tags: Vec::new() })
            .tags
            .push(tag);
        self
    }

    /// Check whether any part of this rule carries a tag
    #[cfg(test)]
    pub fn uses_tag(&self, tag: StyleTag) -> bool {
        self.name.as_ref().is_some_and(|tags| tags.contains(&tag))
            || self.captures.values().any(|c| c.tags.contains(&tag))
    }

    /// Compile the pattern with the regex crate
    #[cfg(test)]
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.pattern)
    }
}

/// Incremental regex assembly with symbolic group numbering
#[derive(Debug, Default)]
pub struct PatternBuilder {
    source: String,
    groups: usize,
}

impl PatternBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append regex text that contains no capturing groups
    pub fn push(&mut self, fragment: &str) -> &mut Self {
        self.source.push_str(fragment);
        self
    }

    /// Append a literal, escaped for the regex dialect
    pub fn literal(&mut self, text: &str) -> &mut Self {
        self.source.push_str(&regex::escape(text));
        self
    }

    /// Append a foreign fragment wrapped in a non-capturing group
    ///
    /// `groups` is the number of capturing groups inside the fragment; they
    /// are numbered after whatever precedes them.
    pub fn embed(&mut self, fragment: &str, groups: usize) -> &mut Self {
        self.source.push_str("(?:");
        self.source.push_str(fragment);
        self.source.push(')');
        self.groups += groups;
        self
    }

    /// Append a capturing group and return its index
    pub fn capture<F>(&mut self, body: F) -> GroupIndex
    where
        F: FnOnce(&mut Self),
    {
        self.groups += 1;
        let index = self.groups;
        self.source.push('(');
        body(self);
        self.source.push(')');
        index
    }

    /// Append a non-capturing group
    pub fn group<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.source.push_str("(?:");
        body(self);
        self.source.push(')');
        self
    }

    /// Append a `|` between alternatives
    pub fn or(&mut self) -> &mut Self {
        self.source.push('|');
        self
    }

    /// Number of capturing groups so far
    #[cfg(test)]
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Finish and return the pattern source
    pub fn build(self) -> String {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_groups() {
        assert_eq!(count_groups("yes|no").unwrap(), 0);
        assert_eq!(count_groups(r"(a|b)(\s+(a|b))*").unwrap(), 3);
        assert_eq!(count_groups(r"\(a\)|(?:b)").unwrap(), 0);
        assert_eq!(count_groups(r"[(]x").unwrap(), 0);
        assert!(count_groups("(unclosed").is_err());
    }

    #[test]
    fn test_builder_numbers_groups_after_embedded() {
        let mut b = PatternBuilder::new();
        let first = b.capture(|b| {
            b.literal("a-b");
        });
        let mut inner = 0;
        b.push(r"\s*");
        let outer = b.capture(|b| {
            inner = b.capture(|b| {
                b.embed("(x)|(y)", 2);
            });
        });
        let last = b.capture(|b| {
            b.push("z");
        });
        assert_eq!((first, outer, inner, last), (1, 2, 3, 6));
        assert_eq!(b.group_count(), 6);

        let pattern = b.build();
        assert_eq!(pattern, r"(a\-b)\s*(((?:(x)|(y))))(z)");
        let regex = Regex::new(&pattern).unwrap();
        assert_eq!(regex.captures_len() - 1, 6);
        assert!(regex.captures("a-b y z").is_none());
        let caps = regex.captures("a-b yz").unwrap();
        assert_eq!(&caps[inner], "y");
        assert_eq!(&caps[last], "z");
    }

    #[test]
    fn test_rule_serialization() {
        let rule = MatchRule::new(r"(\$[A-Z_]+)".to_string())
            .capture(1, StyleTag::PROP_VALUE)
            .capture(1, StyleTag::VARIABLE);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "match": "(\\$[A-Z_]+)",
                "captures": { "1": { "name": "__STYLE_PROP_VALUE__ __STYLE_VARIABLE__" } }
            })
        );
    }

    #[test]
    fn test_named_rule_without_captures() {
        let rule = MatchRule::new("==".to_string()).named(StyleTag::OPERATOR);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "__STYLE_OPERATOR__", "match": "==" }));
        assert!(rule.uses_tag(StyleTag::OPERATOR));
        assert!(!rule.uses_tag(StyleTag::INVALID));
    }

    #[test]
    fn test_captures_sorted_numerically() {
        let rule = MatchRule::new("(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)".to_string())
            .capture(10, StyleTag::INVALID)
            .capture(2, StyleTag::PROP_NAME);
        let text = serde_json::to_string(&rule).unwrap();
        assert!(text.find("\"2\"").unwrap() < text.find("\"10\"").unwrap());
    }
}
