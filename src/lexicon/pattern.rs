//! Multi-word dictionary keys.
//!
//! A key is a `_`-joined list of slots:
//! - `word` matches that word once,
//! - `[a|b|TAG]q` matches any alternative, `q` being `?`, `*`, `+` or a count,
//! - `(a|b)` marks the anchor (one entry per alternative),
//! - `INT` inside a group stands for a whole intensifier phrase.
//!
//! All-caps alternatives are tags, everything else is a lowercase word.
//! Without parentheses the last slot is the anchor.

use crate::language::is_all_caps;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Optional,
    ZeroOrMore,
    OneOrMore,
    Exactly(u32),
}

impl Quantifier {
    fn parse(c: char) -> Option<Self> {
        match c {
            '?' => Some(Quantifier::Optional),
            '*' => Some(Quantifier::ZeroOrMore),
            '+' => Some(Quantifier::OneOrMore),
            _ => c.to_digit(10).map(Quantifier::Exactly),
        }
    }

    /// Whether the slot may match nothing.
    pub fn may_skip(self) -> bool {
        matches!(
            self,
            Quantifier::Optional | Quantifier::ZeroOrMore | Quantifier::Exactly(0)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alt {
    Word(String),
    Tag(String),
    Intensifier,
}

impl Alt {
    fn parse(s: &str) -> Self {
        if s == "INT" {
            Alt::Intensifier
        } else if is_all_caps(s) {
            Alt::Tag(s.to_string())
        } else {
            Alt::Word(s.to_lowercase())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Anchor,
    Group {
        alternatives: Vec<Alt>,
        quantifier: Quantifier,
    },
}

impl Slot {
    /// The single literal word of an unquantified slot, if that is all it is.
    pub fn literal_word(&self) -> Option<&str> {
        match self {
            Slot::Group {
                alternatives,
                quantifier: Quantifier::Exactly(1),
            } => match alternatives.as_slice() {
                [Alt::Word(w)] => Some(w),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Replace every macro name occurring in `key`.
pub fn expand_macros(key: &str, macros: &BTreeMap<String, String>) -> String {
    if !key.contains('#') {
        return key.to_string();
    }
    macros
        .iter()
        .fold(key.to_string(), |acc, (name, body)| acc.replace(name, body))
}

/// Parse a (macro-expanded) key into `(anchor word, slots)` pairs.
pub fn parse_key(key: &str) -> anyhow::Result<Vec<(String, Vec<Slot>)>> {
    let mut slots = Vec::new();
    let mut anchor_at = None;
    let mut anchor_words: Vec<String> = Vec::new();

    for part in key.split('_') {
        if let Some(inner) = part.strip_prefix('(') {
            let inner = inner
                .strip_suffix(')')
                .ok_or_else(|| anyhow::anyhow!("unclosed anchor slot `{part}` in `{key}`"))?;
            anyhow::ensure!(anchor_at.is_none(), "two anchor slots in `{key}`");
            anchor_at = Some(slots.len());
            anchor_words = inner.split('|').map(str::to_lowercase).collect();
            slots.push(Slot::Anchor);
        } else if let Some(inner) = part.strip_prefix('[') {
            let (inner, quantifier) = match inner.strip_suffix(']') {
                Some(body) => (body, Quantifier::Exactly(1)),
                None => {
                    let q = inner
                        .chars()
                        .next_back()
                        .and_then(Quantifier::parse)
                        .ok_or_else(|| anyhow::anyhow!("bad quantifier in `{part}` of `{key}`"))?;
                    let body = inner[..inner.len() - 1]
                        .strip_suffix(']')
                        .ok_or_else(|| anyhow::anyhow!("unclosed group `{part}` in `{key}`"))?;
                    (body, q)
                }
            };
            let alternatives = inner.split('|').filter(|a| !a.is_empty()).map(Alt::parse).collect::<Vec<_>>();
            anyhow::ensure!(!alternatives.is_empty(), "empty group in `{key}`");
            slots.push(Slot::Group {
                alternatives,
                quantifier,
            });
        } else {
            anyhow::ensure!(!part.is_empty(), "empty slot in `{key}`");
            slots.push(Slot::Group {
                alternatives: vec![Alt::parse(part)],
                quantifier: Quantifier::Exactly(1),
            });
        }
    }

    if anchor_at.is_none() {
        let last = slots.len() - 1;
        anchor_words = match std::mem::replace(&mut slots[last], Slot::Anchor) {
            Slot::Group { alternatives, .. } => alternatives
                .into_iter()
                .filter_map(|a| match a {
                    Alt::Word(w) => Some(w),
                    Alt::Tag(t) => Some(t.to_lowercase()),
                    Alt::Intensifier => None,
                })
                .collect(),
            Slot::Anchor => Vec::new(),
        };
    }
    anyhow::ensure!(!anchor_words.is_empty(), "no anchor word in `{key}`");

    Ok(anchor_words
        .into_iter()
        .map(|w| (w, slots.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(alts: &[&str], quantifier: Quantifier) -> Slot {
        Slot::Group {
            alternatives: alts.iter().map(|a| Alt::parse(a)).collect(),
            quantifier,
        }
    }

    #[test]
    fn parses_anchor_groups_and_quantifiers() {
        let entries = parse_key("(give|gave)_[NN|JJ]?_up_[a|an]2").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "give");
        assert_eq!(entries[1].0, "gave");
        assert_eq!(
            entries[0].1,
            vec![
                Slot::Anchor,
                group(&["NN", "JJ"], Quantifier::Optional),
                group(&["up"], Quantifier::Exactly(1)),
                group(&["a", "an"], Quantifier::Exactly(2)),
            ]
        );
    }

    #[test]
    fn last_slot_is_default_anchor() {
        let entries = parse_key("a_little").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "little");
        assert_eq!(entries[0].1[1], Slot::Anchor);
        assert_eq!(entries[0].1[0].literal_word(), Some("a"));
    }

    #[test]
    fn int_is_an_intensifier_alternative() {
        let entries = parse_key("(good)_[INT]").unwrap();
        assert_eq!(
            entries[0].1[1],
            Slot::Group {
                alternatives: vec![Alt::Intensifier],
                quantifier: Quantifier::Exactly(1)
            }
        );
    }

    #[test]
    fn macros_expand_before_parsing() {
        let mut macros = BTreeMap::new();
        macros.insert("#be#".to_string(), "be|am|are".to_string());
        let key = expand_macros("[#be#]_(down)", &macros);
        assert_eq!(key, "[be|am|are]_(down)");
        let entries = parse_key(&key).unwrap();
        assert_eq!(entries[0].1[0], group(&["be", "am", "are"], Quantifier::Exactly(1)));
    }

    #[test]
    fn malformed_keys_are_errors() {
        assert!(parse_key("(a_b").is_err());
        assert!(parse_key("[a|b").is_err());
        assert!(parse_key("[a]x_b").is_err());
        assert!(parse_key("a__b").is_err());
        assert!(parse_key("(a)_(b)").is_err());
    }
}
