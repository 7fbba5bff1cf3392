// src/config.rs
//! Typed calculator configuration, loaded from TOML.
//!
//! `[flags]` and `[modifiers]` must be present and complete; the other
//! sections fall back to defaults. Unknown keys are rejected everywhere.

use crate::language::{Language, LanguageProfile, WordLists};
use crate::pos::PerPos;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/so_calc.toml";
pub const ENV_CONFIG_PATH: &str = "SO_CALC_CONFIG_PATH";

/// One boolean per rule class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flags {
    pub use_nouns: bool,
    pub use_verbs: bool,
    pub use_adjectives: bool,
    pub use_adverbs: bool,
    pub use_intensifiers: bool,
    pub use_negation: bool,
    pub use_comparatives: bool,
    pub use_superlatives: bool,
    pub use_multiword_dictionaries: bool,
    pub use_extra_dict: bool,
    pub use_xml_weighing: bool,
    pub use_weight_by_location: bool,
    pub use_irrealis: bool,
    pub use_subjunctive: bool,
    pub use_imperative: bool,
    pub use_conditional: bool,
    pub use_highlighters: bool,
    pub use_cap_int: bool,
    pub fix_cap_tags: bool,
    pub use_exclam_int: bool,
    pub use_quest_mod: bool,
    pub use_quote_mod: bool,
    pub use_definite_assertion: bool,
    pub use_clause_final_int: bool,
    pub use_heavy_negation: bool,
    pub use_word_counts_lower: bool,
    pub use_word_counts_block: bool,
    pub use_blocking: bool,
    pub adv_learning: bool,
    pub limit_shift: bool,
    pub neg_negation_nullification: bool,
    pub polarity_switch_neg: bool,
    pub simple_so: bool,
    pub use_boundary_words: bool,
    pub use_boundary_punctuation: bool,
    pub restricted_neg: PerPos<bool>,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            use_nouns: true,
            use_verbs: true,
            use_adjectives: true,
            use_adverbs: true,
            use_intensifiers: true,
            use_negation: true,
            use_comparatives: true,
            use_superlatives: true,
            use_multiword_dictionaries: true,
            use_extra_dict: false,
            use_xml_weighing: true,
            use_weight_by_location: false,
            use_irrealis: true,
            use_subjunctive: true,
            use_imperative: false,
            use_conditional: false,
            use_highlighters: true,
            use_cap_int: true,
            fix_cap_tags: true,
            use_exclam_int: true,
            use_quest_mod: true,
            use_quote_mod: true,
            use_definite_assertion: true,
            use_clause_final_int: true,
            use_heavy_negation: true,
            use_word_counts_lower: true,
            use_word_counts_block: false,
            use_blocking: true,
            adv_learning: false,
            limit_shift: false,
            neg_negation_nullification: true,
            polarity_switch_neg: false,
            simple_so: false,
            use_boundary_words: true,
            use_boundary_punctuation: true,
            restricted_neg: PerPos::splat(true),
        }
    }
}

/// Numeric constants of the scoring arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modifiers {
    /// Applied to every intensified value.
    pub int_multiplier: f64,
    /// Applied to negative values when `use_heavy_negation` is set.
    pub neg_multiplier: f64,
    pub capital_modifier: f64,
    pub exclam_modifier: f64,
    pub blocker_cutoff: f64,
    pub pos_multiplier: PerPos<f64>,
    pub neg_shift: PerPos<f64>,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            int_multiplier: 1.0,
            neg_multiplier: 1.5,
            capital_modifier: 2.0,
            exclam_modifier: 2.0,
            blocker_cutoff: 3.0,
            pos_multiplier: PerPos::splat(1.0),
            neg_shift: PerPos::splat(4.0),
        }
    }
}

/// Where the dictionary files live. File names are joined onto `dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictionaryPaths {
    pub dir: PathBuf,
    pub adjectives: String,
    pub adverbs: String,
    pub nouns: String,
    pub verbs: String,
    pub intensifiers: String,
    /// Mixed-section dictionary, read only when `use_extra_dict` is set.
    pub extra: Option<String>,
}

impl Default for DictionaryPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resources/dictionaries/English"),
            adjectives: "adj_dictionary1.11.txt".into(),
            adverbs: "adv_dictionary1.11.txt".into(),
            nouns: "noun_dictionary1.11.txt".into(),
            verbs: "verb_dictionary1.11.txt".into(),
            intensifiers: "int_dictionary1.11.txt".into(),
            extra: None,
        }
    }
}

impl DictionaryPaths {
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// Word lists and weight tables owned by the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Lists {
    /// Inline `<tag>` name -> weight.
    pub weight_tags: BTreeMap<String, f64>,
    /// `"start-end"` relative range (fractions allowed, e.g. `"3/4-1"`) -> weight.
    pub weights_by_location: BTreeMap<String, f64>,
    pub highlighters: BTreeMap<String, f64>,
    pub irrealis: HashSet<String>,
    pub boundary_words: HashSet<String>,
}

impl Default for Lists {
    fn default() -> Self {
        let words = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            weight_tags: BTreeMap::new(),
            weights_by_location: BTreeMap::new(),
            highlighters: [("but".to_string(), 2.0), ("although".to_string(), 0.5)]
                .into_iter()
                .collect(),
            irrealis: words(&[
                "expect", "doubt", "would", "could", "should", "might", "may", "must", "ought",
                "anything", "any", "if", "assume", "hope", "wish",
            ]),
            boundary_words: words(&[
                "but", "and", "or", "since", "because", "while", "after", "before", "when",
                "though", "although", "if", "which", "despite", "so", "then", "thus", "where",
                "whereas", "until", "unless",
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    /// Keep a derivation trace for every scored token.
    pub calculations: bool,
    /// Break the document score down per sentence.
    pub sentences: bool,
}

/// Full calculator configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub language: Language,
    pub flags: Flags,
    pub modifiers: Modifiers,
    #[serde(default)]
    pub dictionaries: DictionaryPaths,
    #[serde(default)]
    pub lists: Lists,
    #[serde(default)]
    pub output: OutputOptions,
    /// Replaces the built-in lists of `language` when present.
    #[serde(default)]
    pub word_lists: Option<WordLists>,
}

/// A parsed `weights_by_location` entry: `[start, end)` as fractions of the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRange {
    pub start: f64,
    pub end: f64,
    pub weight: f64,
}

impl LocationRange {
    pub fn contains(&self, relative: f64) -> bool {
        self.start <= relative && relative < self.end
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: Config = toml::from_str(toml_str).context("invalid calculator config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read calculator config at {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `SO_CALC_CONFIG_PATH`, or `config/so_calc.toml` when unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(path)
    }

    /// Reject values the scoring arithmetic cannot use.
    pub fn validate(&self) -> anyhow::Result<()> {
        let m = &self.modifiers;
        let scalars = [
            ("int_multiplier", m.int_multiplier),
            ("neg_multiplier", m.neg_multiplier),
            ("capital_modifier", m.capital_modifier),
            ("exclam_modifier", m.exclam_modifier),
            ("blocker_cutoff", m.blocker_cutoff),
        ];
        for (key, v) in scalars {
            anyhow::ensure!(v.is_finite(), "modifiers.{key} must be finite, got {v}");
        }
        anyhow::ensure!(
            m.blocker_cutoff >= 0.0,
            "modifiers.blocker_cutoff must not be negative"
        );
        for (pos, v) in m.pos_multiplier.iter() {
            anyhow::ensure!(v.is_finite(), "modifiers.pos_multiplier.{pos} must be finite");
        }
        for (pos, v) in m.neg_shift.iter() {
            anyhow::ensure!(
                v.is_finite() && *v >= 0.0,
                "modifiers.neg_shift.{pos} must be a finite, non-negative number"
            );
        }
        let tables = [
            ("weight_tags", &self.lists.weight_tags),
            ("highlighters", &self.lists.highlighters),
        ];
        for (name, table) in tables {
            if let Some((k, _)) = table.iter().find(|(_, v)| !v.is_finite()) {
                anyhow::bail!("lists.{name}.{k} must be finite");
            }
        }
        self.location_ranges()?;
        Ok(())
    }

    /// Parsed `weights_by_location`, in key order.
    pub fn location_ranges(&self) -> anyhow::Result<Vec<LocationRange>> {
        self.lists
            .weights_by_location
            .iter()
            .map(|(key, &weight)| {
                let (a, b) = key
                    .split_once('-')
                    .with_context(|| format!("location range `{key}` is not `start-end`"))?;
                let start = parse_fraction(a.trim())
                    .with_context(|| format!("location range `{key}`: bad start"))?;
                let end = parse_fraction(b.trim())
                    .with_context(|| format!("location range `{key}`: bad end"))?;
                anyhow::ensure!(
                    (0.0..=1.0).contains(&start) && (0.0..=1.0).contains(&end) && start < end,
                    "location range `{key}` must satisfy 0 <= start < end <= 1"
                );
                anyhow::ensure!(weight.is_finite(), "location range `{key}`: weight not finite");
                Ok(LocationRange { start, end, weight })
            })
            .collect()
    }

    /// Language profile with the configured word lists (or the built-in ones).
    pub fn profile(&self) -> LanguageProfile {
        match &self.word_lists {
            Some(lists) => LanguageProfile::new(self.language, lists.clone()),
            None => LanguageProfile::builtin(self.language),
        }
    }
}

/// `"3/4"` or `"0.75"`.
fn parse_fraction(s: &str) -> anyhow::Result<f64> {
    match s.split_once('/') {
        Some((n, d)) => {
            let n: f64 = n.trim().parse()?;
            let d: f64 = d.trim().parse()?;
            anyhow::ensure!(d != 0.0, "zero denominator");
            Ok(n / d)
        }
        None => Ok(s.parse()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Pos;

    fn minimal_toml() -> String {
        let cfg = Config::default();
        toml::to_string(&cfg).expect("serialize default config")
    }

    #[test]
    fn default_config_roundtrips_through_toml() {
        let cfg = Config::from_toml_str(&minimal_toml()).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn fractions_and_ranges_parse() {
        assert_eq!(parse_fraction("3/4").unwrap(), 0.75);
        assert_eq!(parse_fraction("1").unwrap(), 1.0);
        assert!(parse_fraction("1/0").is_err());

        let mut cfg = Config::default();
        cfg.lists
            .weights_by_location
            .insert("3/4-1".into(), 2.0);
        let ranges = cfg.location_ranges().unwrap();
        assert_eq!(ranges.len(), 1);
        assert!(ranges[0].contains(0.75));
        assert!(!ranges[0].contains(1.0));
    }

    #[test]
    fn validation_rejects_bad_numbers() {
        let mut cfg = Config::default();
        cfg.modifiers.neg_shift[Pos::Verb] = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.lists.weights_by_location.insert("1/2-1/4".into(), 2.0);
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.modifiers.capital_modifier = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn profile_prefers_configured_word_lists() {
        let mut cfg = Config::default();
        let mut lists = WordLists::builtin(Language::English);
        lists.negators.insert("nah".into());
        cfg.word_lists = Some(lists);
        assert!(cfg.profile().is_negator("nah"));
        assert!(!Config::default().profile().is_negator("nah"));
    }
}
