//! Language profiles.
//!
//! Everything the scoring pipeline needs to know about a language lives here:
//! data-only word lists (`WordLists`, loadable from JSON) and the rules that
//! need code (`Morphology`: stemming, comparative/superlative handling,
//! irrealis verb morphology, tag correction for all-caps words).
//! The pipeline never branches on the language itself.

mod english;
mod spanish;

pub use english::English;
pub use spanish::Spanish;

use crate::config::Flags;
use crate::context::ScoringContext;
use crate::lexicon::Lexicon;
use crate::pos::{PerPos, Pos};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Supported languages. Accepts both `"english"` and `"English"` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "English")]
    English,
    #[serde(alias = "Spanish")]
    Spanish,
}

/// Closed-class word lists and tag names for one language.
///
/// Lists mixing words and tags (e.g. `skipped`, `definites`) are matched
/// against both the token's word and its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordLists {
    /// Tag prefix (first two characters) identifying each scored part of speech.
    pub tags: PerPos<String>,
    /// Words never scored for a given part of speech.
    pub not_wanted: PerPos<HashSet<String>>,
    pub negators: HashSet<String>,
    /// Punctuation that acts as a boundary when `use_boundary_punctuation` is set.
    pub punct: HashSet<String>,
    /// Sentence-final punctuation.
    pub sent_punct: HashSet<String>,
    /// Words/tags that restricted negation and blocking may cross, per part of speech.
    pub skipped: PerPos<HashSet<String>>,
    /// Words/tags skipped when looking left of a negator for an intensifier.
    pub negation_external_skip: HashSet<String>,
    pub comparatives: HashSet<String>,
    #[serde(default)]
    pub superlatives: HashSet<String>,
    pub definites: HashSet<String>,
    /// Words adjectives and adverbs look past when searching for intensifiers ("as good").
    pub look_past_words: HashSet<String>,
    /// Tags adjectives look past when searching for intensifiers (determiners).
    pub look_past_tags: HashSet<String>,
    /// Shorthand expanded in multi-word dictionary keys before parsing.
    #[serde(default)]
    pub macros: BTreeMap<String, String>,
    /// Accented letter -> plain letter; accented dictionary words are also stored plain.
    #[serde(default)]
    pub accents: BTreeMap<String, String>,
}

impl WordLists {
    /// Built-in lists for `language`.
    pub fn builtin(language: Language) -> Self {
        match language {
            Language::English => english::word_lists(),
            Language::Spanish => spanish::word_lists(),
        }
    }

    /// Parse a JSON word-list file (same field names as this struct).
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Replace accented letters according to `accents`.
    pub fn strip_accents(&self, word: &str) -> String {
        let mut out = word.to_string();
        for (accented, plain) in &self.accents {
            out = out.replace(accented.as_str(), plain);
        }
        out
    }

    pub fn has_accent(&self, word: &str) -> bool {
        self.accents.keys().any(|a| word.contains(a.as_str()))
    }
}

/// Degree of an adjective, used for trace labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Degree {
    #[default]
    Positive,
    Comparative,
    Superlative,
}

/// Result of language-specific adjective analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjectiveForm {
    pub lemma: String,
    pub degree: Degree,
    /// Intensification implied by the form itself ("fairer" ~ "more fair").
    pub boost: f64,
}

/// Language rules that need code rather than data.
pub trait Morphology: fmt::Debug + Send + Sync {
    fn stem_noun(&self, word: &str, lex: &Lexicon) -> String;

    /// `tag` is the full tag; languages may use its suffix (English VBD, VBG, ...).
    fn stem_verb(&self, word: &str, tag: &str, lex: &Lexicon) -> String;

    /// Adjective an adverb derives from ("sharply" -> "sharp"), for adverb learning.
    fn adverb_to_adjective(&self, word: &str, lex: &Lexicon) -> String;

    /// Stem and classify the adjective at `index`. `None` rejects the token
    /// (comparative/superlative policy, predicate requirements, unwanted words).
    fn adjective_form(
        &self,
        ctx: &ScoringContext<'_>,
        index: usize,
        word: &str,
    ) -> Option<AdjectiveForm>;

    /// Adverbs that should not be scored in context ("too" next to punctuation).
    fn skip_adverb(&self, _ctx: &ScoringContext<'_>, _index: usize, _word: &str) -> bool {
        false
    }

    /// Verb tags that mark irrealis mood on their own (subjunctive, conditional, ...).
    fn is_irrealis_tag(&self, _tag: &str, _flags: &Flags) -> bool {
        false
    }

    /// Whether a clause starting with this word marks an imperative.
    fn starts_imperative(&self, _word: &str, _tag: &str) -> bool {
        false
    }

    /// Tags counting as the verb of a predicate (for comparative/superlative checks).
    fn is_predicate_verb(&self, tag: &str) -> bool;

    /// Whether nouns also take an intensifier placed after them.
    fn post_nominal_intensifiers(&self) -> bool {
        false
    }

    /// Corrected tag for an all-caps word the tagger labelled as a proper noun.
    fn corrected_caps_tag(&self, word: &str, tag: &str, lex: &Lexicon) -> Option<String>;
}

/// Word lists plus morphology for the configured language.
#[derive(Debug)]
pub struct LanguageProfile {
    pub language: Language,
    pub lists: WordLists,
    morphology: Box<dyn Morphology>,
}

impl LanguageProfile {
    pub fn new(language: Language, lists: WordLists) -> Self {
        let morphology: Box<dyn Morphology> = match language {
            Language::English => Box::new(English),
            Language::Spanish => Box::new(Spanish),
        };
        Self {
            language,
            lists,
            morphology,
        }
    }

    pub fn builtin(language: Language) -> Self {
        Self::new(language, WordLists::builtin(language))
    }

    pub fn morphology(&self) -> &dyn Morphology {
        self.morphology.as_ref()
    }

    /// Part of speech whose tag prefix `tag` starts with.
    pub fn pos_of_tag(&self, tag: &str) -> Option<Pos> {
        self.lists
            .tags
            .iter()
            .find(|(_, prefix)| tag.starts_with(prefix.as_str()))
            .map(|(pos, _)| pos)
    }

    pub fn is_negator(&self, word: &str) -> bool {
        self.lists.negators.contains(word)
    }

    pub fn is_sent_punct(&self, word: &str) -> bool {
        self.lists.sent_punct.contains(word)
    }

    pub fn is_punct(&self, word: &str) -> bool {
        self.lists.punct.contains(word)
    }

    pub fn not_wanted(&self, pos: Pos, word: &str) -> bool {
        self.lists.not_wanted[pos].contains(word)
    }
}

/// Python-style `isupper`: at least one cased letter, and no lowercase ones.
pub(crate) fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

pub(crate) fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Drop the last `n` characters.
pub(crate) fn chop(word: &str, n: usize) -> String {
    let keep = word.chars().count().saturating_sub(n);
    word.chars().take(keep).collect()
}

pub(crate) fn last_char(word: &str) -> Option<char> {
    word.chars().next_back()
}

/// True when the word ends in a doubled letter ("stopp").
pub(crate) fn ends_doubled(word: &str) -> bool {
    let mut it = word.chars().rev();
    matches!((it.next(), it.next()), (Some(a), Some(b)) if a == b)
}
