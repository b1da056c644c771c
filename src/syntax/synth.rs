//! Attribute/value pair pattern synthesis
//!
//! For every known attribute a rule is built whose capture groups separate
//! the attribute name, a quoted value, a variable reference, a value the
//! attribute accepts, and whatever else was written (flagged invalid).
//! A final catch-all rule styles attributes the table does not know.

use log::debug;
use serde::Deserialize;

use super::attributes::{AttributeSpec, AttributeTable};
use super::rules::{GroupIndex, MatchRule, PatternBuilder};
use super::style::StyleTag;
use crate::error::{GenError, Result};

/// Quoted string value, either quote style
const QUOTED: &str = r#""[^"]*"|'[^']*'"#;
/// `$NAME` variable reference
pub const VARIABLE: &str = r"\$[A-Z_][A-Z0-9_]*";
/// Name accepted by the catch-all rule, with an optional `@qualifier`
const GENERIC_NAME: &str = r"[a-z-]+(?:@[a-z-]+)?";

/// How an attribute/value pair is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGrammar {
    separator: String,
    terminators: Vec<char>,
}

impl PairGrammar {
    /// Create a pair grammar
    ///
    /// `terminators` is the set of characters that end a bare value. It may
    /// not include any character of the separator.
    pub fn new(separator: &str, terminators: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(GenError::InvalidPairGrammar("empty separator".into()));
        }
        if terminators.is_empty() {
            return Err(GenError::InvalidPairGrammar(format!(
                "no terminators for separator '{}'",
                separator
            )));
        }
        if let Some(c) = terminators.chars().find(|c| separator.contains(*c)) {
            return Err(GenError::InvalidPairGrammar(format!(
                "terminator '{}' is part of separator '{}'",
                c, separator
            )));
        }
        Ok(Self {
            separator: separator.to_string(),
            terminators: terminators.chars().collect(),
        })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    #[cfg(test)]
    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    /// Terminators escaped for use inside a bracket expression
    fn class_body(&self) -> String {
        self.terminators
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect()
    }

    /// Anything up to the next terminator
    fn residual(&self) -> String {
        format!("[^{}]*", self.class_body())
    }

    /// Optional blanks, then end of line or a terminator
    fn bound(&self) -> String {
        format!("[ \\t]*(?:$|[{}])", self.class_body())
    }
}

/// Whether known attributes get their values checked in a pair context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Known-attribute rules first, then the catch-all
    #[default]
    Strict,
    /// Catch-all rule only; nothing is flagged invalid
    Lenient,
}

/// Which attribute a fragment recognizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    Known(String),
    Generic,
}

/// Capture indices of a pair fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSlots {
    pub name: GroupIndex,
    pub quoted: GroupIndex,
    pub variable: GroupIndex,
    /// Value accepted by the attribute grammar (known attributes only)
    pub valid: Option<GroupIndex>,
    /// Anything up to the terminator
    pub residual: GroupIndex,
}

/// One synthesized rule with its slot layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFragment {
    pub kind: FragmentKind,
    pub rule: MatchRule,
    pub slots: PairSlots,
}

impl PairFragment {
    /// Capture that marks an illegal value, if this fragment flags any
    pub fn invalid_slot(&self) -> Option<GroupIndex> {
        match self.kind {
            FragmentKind::Known(_) => Some(self.slots.residual),
            FragmentKind::Generic => None,
        }
    }
}

/// Ordered fragments for one pair context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedPattern {
    pub fragments: Vec<PairFragment>,
}

impl SynthesizedPattern {
    /// Rules in match order
    pub fn rules(&self) -> Vec<MatchRule> {
        self.fragments.iter().map(|f| f.rule.clone()).collect()
    }

    /// Fragment for a known attribute
    #[cfg(test)]
    pub fn known(&self, name: &str) -> Option<&PairFragment> {
        self.fragments
            .iter()
            .find(|f| matches!(&f.kind, FragmentKind::Known(n) if n == name))
    }

    /// The catch-all fragment
    #[cfg(test)]
    pub fn generic(&self) -> Option<&PairFragment> {
        self.fragments.iter().find(|f| f.kind == FragmentKind::Generic)
    }
}

/// Builds pair rules from an attribute table
pub struct Synthesizer<'a> {
    table: &'a AttributeTable,
}

impl<'a> Synthesizer<'a> {
    pub fn new(table: &'a AttributeTable) -> Self {
        Self { table }
    }

    /// Build the fragments for one pair context
    ///
    /// Known-attribute fragments come first, in table order, so a scanner
    /// trying alternatives in order validates known values before falling
    /// back to the catch-all.
    pub fn synthesize(&self, pair: &PairGrammar, validation: Validation) -> SynthesizedPattern {
        let mut fragments = Vec::with_capacity(self.table.len() + 1);
        if validation == Validation::Strict {
            fragments.extend(self.table.iter().map(|spec| known_fragment(spec, pair)));
        }
        fragments.push(generic_fragment(pair));
        for fragment in &fragments {
            log_fragment(fragment);
        }
        debug!(
            "synthesized {} fragments for separator '{}' ({:?})",
            fragments.len(),
            pair.separator(),
            validation
        );
        SynthesizedPattern { fragments }
    }
}

fn log_fragment(fragment: &PairFragment) {
    let label = match &fragment.kind {
        FragmentKind::Known(name) => name.as_str(),
        FragmentKind::Generic => "*",
    };
    let slots = &fragment.slots;
    debug!(
        "{}: name {}, quoted {}, variable {}, valid {:?}, residual {}, invalid {:?}",
        label,
        slots.name,
        slots.quoted,
        slots.variable,
        slots.valid,
        slots.residual,
        fragment.invalid_slot()
    );
}

/// Name, separator and surrounding blanks
fn push_separator(b: &mut PatternBuilder, pair: &PairGrammar) {
    b.push(r"\s*");
    b.literal(pair.separator());
    b.push(r"\s*");
}

/// Fragment that validates values of one known attribute
pub fn known_fragment(spec: &AttributeSpec, pair: &PairGrammar) -> PairFragment {
    let mut b = PatternBuilder::new();
    let name = b.capture(|b| {
        b.literal(&spec.name);
    });
    push_separator(&mut b, pair);

    let (mut quoted, mut variable, mut valid, mut residual) = (0, 0, 0, 0);
    b.group(|b| {
        quoted = b.capture(|b| {
            b.push(QUOTED);
        });
        b.or();
        variable = b.capture(|b| {
            b.push(VARIABLE);
        });
        b.or();
        valid = b.capture(|b| {
            b.embed(&spec.value_grammar, spec.group_count());
        });
        b.push(&pair.bound());
        b.or();
        residual = b.capture(|b| {
            b.push(&pair.residual());
        });
    });

    let rule = MatchRule::new(b.build())
        .capture(name, StyleTag::PROP_NAME)
        .capture(quoted, StyleTag::PROP_VALUE)
        .capture(variable, StyleTag::VARIABLE)
        .capture(valid, StyleTag::PROP_VALUE)
        .capture(residual, StyleTag::INVALID);

    PairFragment {
        kind: FragmentKind::Known(spec.name.clone()),
        rule,
        slots: PairSlots {
            name,
            quoted,
            variable,
            valid: Some(valid),
            residual,
        },
    }
}

/// Catch-all fragment for attributes outside the table
pub fn generic_fragment(pair: &PairGrammar) -> PairFragment {
    let mut b = PatternBuilder::new();
    let name = b.capture(|b| {
        b.push(GENERIC_NAME);
    });
    push_separator(&mut b, pair);

    let (mut quoted, mut variable, mut residual) = (0, 0, 0);
    b.group(|b| {
        quoted = b.capture(|b| {
            b.push(QUOTED);
        });
        b.or();
        variable = b.capture(|b| {
            b.push(VARIABLE);
        });
        b.or();
        residual = b.capture(|b| {
            b.push(&pair.residual());
        });
    });

    let rule = MatchRule::new(b.build())
        .capture(name, StyleTag::PROP_NAME)
        .capture(quoted, StyleTag::PROP_VALUE)
        .capture(variable, StyleTag::VARIABLE)
        .capture(residual, StyleTag::PROP_VALUE);

    PairFragment {
        kind: FragmentKind::Generic,
        rule,
        slots: PairSlots {
            name,
            quoted,
            variable,
            valid: None,
            residual,
        },
    }
}
