//! Known attributes shared by SBSS and SBML

use crate::error::Result;
use crate::syntax::attributes::AttributeTable;

/// Attribute name and the regex alternation of its legal values
const KNOWN_ATTRIBUTES: &[(&str, &str)] = &[
    ("begin-new-page", "yes|no"),
    ("pack", "yes|no"),
    ("clear", "none|left|right|both"),
    ("writing-mode", r"horizontal\-tb|vertical\-rl"),
    ("display", r"none|block|list|list\-item|table"),
    ("shut-in-adaptives", "yes|no"),
    ("page-side", "auto|verso|recto"),
    ("font-weight", "normal|bold"),
    ("font-style", "normal|italic"),
    ("font-no-scale", "yes|no"),
    ("bullet-text-align", "left|right|center"),
    ("bullet-font-weight", "normal|bold"),
    ("bullet-font-style", "normal|italic"),
    ("bullet-font-no-scale", "yes|no"),
    ("vertical-align", "baseline|top|middle|bottom"),
    ("line-break-mode", r"auto|word\-wrap|character\-wrap"),
    ("text-align", "justify|center|right|left"),
    ("text-justify", r"auto|distribute\-all\-lines"),
    ("text-orientation", r"mixed|upright|sideways|sideways\-right"),
    ("text-combine-horizontal", "none|all|digits [1-4]"),
    ("position", "static|absolute|abs"),
    ("adaptive", "yes|no"),
    ("flow", "yes|no"),
    ("flow-mode", r"content\-wrap|object\-wrap"),
    ("align", "top|bottom|left|right|center"),
    ("avoid-bottom", "yes|no"),
    ("border-collapse", "none|collapse"),
    ("background-image-type", "stretch|pattern"),
    ("page-header-hidden", "yes|no"),
    ("page-footer-hidden", "yes|no"),
    ("page-background-image-type", "stretch|pattern"),
    (
        "text-decoration",
        concat!(
            r"(underline|overline|line\-through|cross\-out|sidedot|side\-dot)",
            r"(\s+(underline|overline|line\-through|cross\-out|sidedot|side\-dot))*",
        ),
    ),
    (
        "gravity",
        concat!(
            r"center|left|top|right|bottom|",
            r"left\-top|top\-left|left\-bottom|bottom\-left|",
            r"right\-top|top\-right|right\-bottom|bottom\-right",
        ),
    ),
];

/// Build the known-attribute table, validating every grammar
pub fn known_attributes() -> Result<AttributeTable> {
    AttributeTable::from_pairs(KNOWN_ATTRIBUTES.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        let table = known_attributes().unwrap();
        assert_eq!(table.len(), KNOWN_ATTRIBUTES.len());
        assert_eq!(table.get("text-decoration").unwrap().group_count(), 3);
        assert_eq!(table.get("gravity").unwrap().group_count(), 0);
        assert!(table.get("gravity").unwrap().value_grammar.ends_with("bottom\\-right"));
    }
}
