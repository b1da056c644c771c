//! Grammar templates and their composition
//!
//! A template is JSON text with two kinds of placeholder:
//!
//! - whole-value slots: `"__NAME__"` as the entire content of a JSON
//!   string, replaced by rendered rules or a JSON string literal
//! - inline style tags: `__STYLE_NAME__` anywhere in the text, replaced by
//!   the style resolver afterwards
//!
//! The template is never parsed as JSON, so its formatting and key order
//! survive composition untouched.

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::MatchRule;
use super::style::{self, StyleMap};
use crate::error::{GenError, Result};

/// A quoted string holding nothing but a placeholder
static QUOTED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""__([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*)__""#).expect("slot token pattern")
});

/// Anything shaped like a placeholder of either kind
static ANY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*__").expect("placeholder pattern"));

static SLOT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").expect("slot name pattern"));

const STYLE_PREFIX: &str = "STYLE_";

/// Token text for a whole-value slot name (without quotes)
pub fn slot_token(name: &str) -> String {
    format!("__{}__", name)
}

/// Piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, possibly holding inline style tags
    Text(String),
    /// Whole-value slot, including the quotes it replaces
    Slot(String),
}

/// A template split into literal text and whole-value slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarTemplate {
    segments: Vec<Segment>,
}

impl GrammarTemplate {
    /// Split template text into segments
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in QUOTED_TOKEN.captures_iter(text) {
            let name = &caps[1];
            // A style tag alone in a string is still an inline tag
            if name.starts_with(STYLE_PREFIX) {
                continue;
            }
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                segments.push(Segment::Text(text[last..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(name.to_string()));
            last = whole.end();
        }
        if last < text.len() {
            segments.push(Segment::Text(text[last..].to_string()));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the whole-value slots, in order of appearance
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots().any(|s| s == name)
    }
}

/// Generated content for one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Rendered as comma-separated JSON objects inside an array
    Rules(Vec<MatchRule>),
    /// Rendered as a JSON string literal
    Text(String),
}

impl Substitution {
    fn render(&self) -> serde_json::Result<String> {
        match self {
            Substitution::Rules(rules) => {
                let rendered = rules
                    .iter()
                    .map(serde_json::to_string_pretty)
                    .collect::<serde_json::Result<Vec<_>>>()?;
                Ok(rendered.join(",\n"))
            }
            Substitution::Text(text) => serde_json::to_string(text),
        }
    }
}

/// Slot name to content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: BTreeMap<String, Substitution>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content for a slot
    ///
    /// Slot names live in their own namespace: they may not look like a
    /// style tag.
    pub fn insert(&mut self, name: &str, substitution: Substitution) -> Result<()> {
        if !SLOT_NAME.is_match(name) {
            return Err(GenError::MalformedTemplate(format!("invalid slot name '{}'", name)));
        }
        if name.starts_with(STYLE_PREFIX) {
            return Err(GenError::PlaceholderCollision(
                slot_token(name),
                "the style tag namespace".to_string(),
            ));
        }
        self.entries.insert(name.to_string(), substitution);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Substitution> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

}

/// First pair of tokens where one contains the other
fn find_collision<'t>(slots: &'t [String], styles: &'t [String]) -> Option<(&'t str, &'t str)> {
    slots.iter().find_map(|slot| {
        styles
            .iter()
            .find(|style| slot.contains(style.as_str()) || style.contains(slot.as_str()))
            .map(|style| (slot.as_str(), style.as_str()))
    })
}

/// Fail if any slot token and style token overlap textually
pub fn check_disjoint(styles: &StyleMap, substitutions: &Substitutions) -> Result<()> {
    let slots: Vec<String> = substitutions.names().map(slot_token).collect();
    let style_tokens: Vec<String> = styles.placeholders().collect();
    match find_collision(&slots, &style_tokens) {
        Some((slot, style)) => Err(GenError::PlaceholderCollision(slot.to_string(), style.to_string())),
        None => Ok(()),
    }
}

/// Fills templates with generated content and resolves style tags
pub struct Compositor<'a> {
    styles: &'a StyleMap,
    substitutions: Substitutions,
}

impl<'a> Compositor<'a> {
    /// Create a compositor; slot and style tokens must not overlap
    pub fn new(styles: &'a StyleMap, substitutions: Substitutions) -> Result<Self> {
        check_disjoint(styles, &substitutions)?;
        Ok(Self { styles, substitutions })
    }

    /// Compose a document
    ///
    /// Slots are filled first and style tags resolved second, so generated
    /// rules can carry style tags of their own.
    pub fn compose(&self, template: &GrammarTemplate) -> Result<String> {
        let substitutions = &self.substitutions;
        for name in substitutions.names() {
            if !template.has_slot(name) {
                return Err(GenError::MalformedTemplate(slot_token(name)));
            }
        }

        let mut out = String::new();
        for segment in template.segments() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let substitution = substitutions
                        .get(name)
                        .ok_or_else(|| GenError::UnresolvedPlaceholder(slot_token(name)))?;
                    debug!("filling slot {}", name);
                    let rendered = substitution.render().map_err(|source| GenError::Render {
                        slot: slot_token(name),
                        source,
                    })?;
                    out.push_str(&rendered);
                }
            }
        }

        let out = style::resolve(&out, self.styles)?;

        if let Some(leftover) = ANY_TOKEN.find(&out) {
            return Err(GenError::UnresolvedPlaceholder(leftover.as_str().to_string()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::StyleTag;

    const TEMPLATE: &str = r##"{
    "name": "__STYLE_PROP_NAME__",
    "patterns": [ { "include": "#x" }, "__PROP_LIST_PATTERNS__" ],
    "wordPattern": "__WORD_PATTERN__"
}"##;

    fn styles() -> StyleMap {
        StyleMap::from_pairs([
            ("PROP_NAME", "entity.other.attribute-name"),
            ("INVALID", "invalid.illegal"),
        ])
        .unwrap()
    }

    fn substitutions() -> Substitutions {
        let mut subs = Substitutions::new();
        let rule = MatchRule::new(r"(a\-b)\s*=\s*([^,]*)".to_string())
            .capture(1, StyleTag::PROP_NAME)
            .capture(2, StyleTag::INVALID);
        subs.insert("PROP_LIST_PATTERNS", Substitution::Rules(vec![rule.clone(), rule]))
            .unwrap();
        subs.insert("WORD_PATTERN", Substitution::Text(r"[\w-]+|\$[A-Z_]+".to_string()))
            .unwrap();
        subs
    }

    #[test]
    fn test_parse_segments() {
        let template = GrammarTemplate::parse(TEMPLATE);
        let slots: Vec<&str> = template.slots().collect();
        assert_eq!(slots, vec!["PROP_LIST_PATTERNS", "WORD_PATTERN"]);
        assert!(matches!(template.segments().first(), Some(Segment::Text(_))));
        assert!(matches!(template.segments().last(), Some(Segment::Text(t)) if t == "\n}"));
    }

    #[test]
    fn test_style_tag_in_string_is_not_a_slot() {
        let template = GrammarTemplate::parse(r#"{"name": "__STYLE_COMMENT__"}"#);
        assert_eq!(template.slots().count(), 0);
        assert_eq!(template.segments().len(), 1);
    }

    #[test]
    fn test_unquoted_token_is_not_a_slot() {
        let template = GrammarTemplate::parse(r#"{"x": "a __PROP_LIST_PATTERNS__"}"#);
        assert!(!template.has_slot("PROP_LIST_PATTERNS"));
    }

    #[test]
    fn test_compose_roundtrips_as_json() {
        let template = GrammarTemplate::parse(TEMPLATE);
        let styles = styles();
        let compositor = Compositor::new(&styles, substitutions()).unwrap();
        let out = compositor.compose(&template).unwrap();

        assert!(!ANY_TOKEN.is_match(&out));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["name"], "entity.other.attribute-name");
        assert_eq!(json["wordPattern"], r"[\w-]+|\$[A-Z_]+");
        let patterns = json["patterns"].as_array().unwrap();
        assert_eq!(patterns.len(), 3);
        assert_eq!(patterns[1]["match"], r"(a\-b)\s*=\s*([^,]*)");
        assert_eq!(patterns[1]["captures"]["2"]["name"], "invalid.illegal");
    }

    #[test]
    fn test_unused_substitution_is_malformed_template() {
        let template = GrammarTemplate::parse(r#"{"patterns": ["__PROP_LIST_PATTERNS__"]}"#);
        let styles = styles();
        let compositor = Compositor::new(&styles, substitutions()).unwrap();
        let err = compositor.compose(&template).unwrap_err();
        match err {
            GenError::MalformedTemplate(token) => assert_eq!(token, "__WORD_PATTERN__"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unfilled_slot_is_unresolved() {
        let template = GrammarTemplate::parse(r#"{"patterns": ["__PROP_GROUP_PATTERNS__"]}"#);
        let styles = styles();
        let compositor = Compositor::new(&styles, Substitutions::new()).unwrap();
        let err = compositor.compose(&template).unwrap_err();
        assert!(matches!(err, GenError::UnresolvedPlaceholder(t) if t == "__PROP_GROUP_PATTERNS__"));
    }

    #[test]
    fn test_unmapped_style_is_unresolved() {
        let template = GrammarTemplate::parse(r#"{"name": "__STYLE_SBML_BEGIN__"}"#);
        let styles = styles();
        let compositor = Compositor::new(&styles, Substitutions::new()).unwrap();
        let err = compositor.compose(&template).unwrap_err();
        assert!(matches!(err, GenError::UnresolvedPlaceholder(t) if t == "__STYLE_SBML_BEGIN__"));
    }

    #[test]
    fn test_stray_placeholder_is_unresolved() {
        let template = GrammarTemplate::parse(r#"{"x": "prefix __SOMETHING__"}"#);
        let styles = styles();
        let compositor = Compositor::new(&styles, Substitutions::new()).unwrap();
        let err = compositor.compose(&template).unwrap_err();
        assert!(matches!(err, GenError::UnresolvedPlaceholder(t) if t == "__SOMETHING__"));
    }

    #[test]
    fn test_slot_names_cannot_enter_style_namespace() {
        let mut subs = Substitutions::new();
        let err = subs
            .insert("STYLE_PROP_NAME", Substitution::Text(String::new()))
            .unwrap_err();
        assert!(matches!(err, GenError::PlaceholderCollision(..)));
        assert!(subs.insert("lower", Substitution::Text(String::new())).is_err());
    }

    #[test]
    fn test_collision_detected() {
        fn tokens(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }

        let slots = tokens(&["__PROP_LIST_PATTERNS__", "__STYLE_PROP_NAME__"]);
        let styles = tokens(&["__STYLE_PROP_NAME__"]);
        assert_eq!(
            find_collision(&slots, &styles),
            Some(("__STYLE_PROP_NAME__", "__STYLE_PROP_NAME__"))
        );

        let slots = tokens(&["__NAME__"]);
        let styles = tokens(&["__STYLE__NAME__"]);
        assert!(find_collision(&slots, &styles).is_some());

        let slots = tokens(&["__PROP_LIST_PATTERNS__", "__WORD_PATTERN__"]);
        let styles = tokens(&["__STYLE_PROP_NAME__", "__STYLE_PATTERNS__"]);
        assert_eq!(find_collision(&slots, &styles), None);
    }

    #[test]
    fn test_overlapping_namespaces_rejected_on_construction() {
        let mut subs = Substitutions::new();
        subs.entries
            .insert("STYLE_PROP_NAME".to_string(), Substitution::Text(String::new()));
        let err = Compositor::new(&styles(), subs).err().unwrap();
        assert!(matches!(
            err,
            GenError::PlaceholderCollision(slot, style)
                if slot == "__STYLE_PROP_NAME__" && style == "__STYLE_PROP_NAME__"
        ));
    }

    #[test]
    fn test_compositor_reused_across_templates() {
        let mut subs = Substitutions::new();
        subs.insert("WORD_PATTERN", Substitution::Text("[a-z]+".to_string()))
            .unwrap();
        let styles = styles();
        let compositor = Compositor::new(&styles, subs).unwrap();
        for text in [r#"{"w": "__WORD_PATTERN__"}"#, r#"["__WORD_PATTERN__", 1]"#] {
            let out = compositor.compose(&GrammarTemplate::parse(text)).unwrap();
            assert!(out.contains(r#""[a-z]+""#), "{out}");
        }
    }

    #[test]
    fn test_builtin_namespaces_disjoint() {
        let styles = crate::syntax::builtin::style_map().unwrap();
        assert!(check_disjoint(&styles, &substitutions()).is_ok());
    }
}
