//! Rules for `=if`/`#if` expressions and the editor word pattern

use crate::syntax::rules::{MatchRule, PatternBuilder};
use crate::syntax::style::StyleTag;
use crate::syntax::synth::VARIABLE;

/// Alphabetic units a length may carry; `%` is handled separately
const LENGTH_UNITS: &str = "pw|ph|cw|ch|mt|mr|mb|ml|sbh|eb";

/// Comparison and arithmetic operators, longest first
const OPERATORS: &str = r"==|!=|<=|>=|\*|\+|-|/|<|>";

/// Word boundaries for editors: attribute names (with a page qualifier)
/// and variables
pub const WORD_PATTERN: &str = r"([\w-]+(@(verso|recto))?)|(\$[A-Z_]+)";

/// Rules filling the expression slot
pub fn expression_rules() -> Vec<MatchRule> {
    vec![variable_rule(), operator_rule(), length_rule()]
}

fn variable_rule() -> MatchRule {
    MatchRule::new(VARIABLE.to_string()).named(StyleTag::VARIABLE)
}

fn operator_rule() -> MatchRule {
    MatchRule::new(OPERATORS.to_string()).named(StyleTag::OPERATOR)
}

/// Signed decimal with an optional unit; unknown units are flagged
fn length_rule() -> MatchRule {
    let mut b = PatternBuilder::new();
    b.push(r"[+-]?(?:[0-9]*\.)?[0-9]+");
    let mut unknown_unit = 0;
    b.group(|b| {
        // a known unit must end at a word boundary
        b.group(|b| {
            b.push(LENGTH_UNITS);
        });
        b.push(r"\b");
        b.or();
        b.push("%");
        b.or();
        unknown_unit = b.capture(|b| {
            b.push("[A-Za-z]+");
        });
    });
    b.push("?");

    MatchRule::new(b.build())
        .named(StyleTag::LENGTH)
        .capture(unknown_unit, StyleTag::INVALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_units() {
        let rule = length_rule();
        assert_eq!(rule.captures.keys().copied().collect::<Vec<_>>(), vec![1]);
        let regex = rule.compile().unwrap();

        for input in ["12", "-3.5pw", "+.5sbh", "100%", "7eb"] {
            let caps = regex.captures(input).unwrap();
            assert_eq!(&caps[0], input);
            assert!(caps.get(1).is_none(), "{input} flagged");
        }

        let caps = regex.captures("12pt").unwrap();
        assert_eq!(&caps[0], "12pt");
        assert_eq!(&caps[1], "pt");
    }

    #[test]
    fn test_known_unit_prefix_flagged() {
        let regex = length_rule().compile().unwrap();

        for (input, unit) in [("12pwx", "pwx"), ("3ebb", "ebb"), ("1sbhz", "sbhz")] {
            let caps = regex.captures(input).unwrap();
            assert_eq!(&caps[0], input);
            assert_eq!(&caps[1], unit, "{input}");
        }

        let caps = regex.captures("12pw, 4ch").unwrap();
        assert_eq!(&caps[0], "12pw");
        assert!(caps.get(1).is_none());
    }

    #[test]
    fn test_operators_prefer_longest() {
        let regex = operator_rule().compile().unwrap();
        assert_eq!(regex.find("a <= b").unwrap().as_str(), "<=");
        assert_eq!(regex.find("a != b").unwrap().as_str(), "!=");
        assert_eq!(regex.find("a < b").unwrap().as_str(), "<");
    }

    #[test]
    fn test_expression_rules_compile() {
        let rules = expression_rules();
        assert_eq!(rules.len(), 3);
        for rule in &rules {
            rule.compile().unwrap();
            assert!(rule.name.is_some());
        }
        let caps = rules[0].compile().unwrap().find("$PAGE_WIDTH > 10").unwrap();
        assert_eq!(caps.as_str(), "$PAGE_WIDTH");
    }

    #[test]
    fn test_word_pattern_compiles() {
        let regex = regex::Regex::new(WORD_PATTERN).unwrap();
        assert_eq!(regex.find("page-side@verso").unwrap().as_str(), "page-side@verso");
    }
}
