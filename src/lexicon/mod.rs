//! Polarity dictionaries.
//!
//! One table per part of speech (single words plus multi-word patterns keyed
//! by their anchor word) and one intensifier table. Built once, then shared
//! read-only between documents.

pub mod loader;
pub mod pattern;

pub use loader::{append_learned_adverbs, load, load_dictionary_str, load_extra_str, Section};
pub use pattern::{Alt, Quantifier, Slot};

use crate::pos::{PerPos, Pos};
use std::collections::HashMap;

/// A multi-word entry, split around its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseEntry {
    /// Slots left of the anchor, in text order.
    pub before: Vec<Slot>,
    /// Slots right of the anchor, in text order.
    pub after: Vec<Slot>,
    pub polarity: f64,
}

impl PhraseEntry {
    /// `slots` must contain exactly one [`Slot::Anchor`].
    pub fn new(slots: &[Slot], polarity: f64) -> Option<Self> {
        let at = slots.iter().position(|s| matches!(s, Slot::Anchor))?;
        if slots[at + 1..].iter().any(|s| matches!(s, Slot::Anchor)) {
            return None;
        }
        Some(Self {
            before: slots[..at].to_vec(),
            after: slots[at + 1..].to_vec(),
            polarity,
        })
    }

    fn same_pattern(&self, other: &PhraseEntry) -> bool {
        self.before == other.before && self.after == other.after
    }
}

/// A multi-word intensifier such as "a little": the words before the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensifierPhrase {
    pub head: Vec<String>,
    pub value: f64,
}

impl IntensifierPhrase {
    /// Phrase length in tokens, anchor included.
    pub fn span(&self) -> usize {
        self.head.len() + 1
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolarityTable {
    words: HashMap<String, f64>,
    phrases: HashMap<String, Vec<PhraseEntry>>,
}

#[derive(Debug, Clone, Default)]
pub struct IntensifierTable {
    words: HashMap<String, f64>,
    phrases: HashMap<String, Vec<IntensifierPhrase>>,
}

/// Entry counts, for load summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexiconStats {
    pub words: usize,
    pub phrases: usize,
    pub intensifiers: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    tables: PerPos<PolarityTable>,
    intensifiers: IntensifierTable,
}

impl Lexicon {
    pub fn word_polarity(&self, pos: Pos, word: &str) -> Option<f64> {
        self.tables[pos].words.get(word).copied()
    }

    pub fn phrases(&self, pos: Pos, anchor: &str) -> &[PhraseEntry] {
        self.tables[pos]
            .phrases
            .get(anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_phrases(&self, pos: Pos, anchor: &str) -> bool {
        self.tables[pos].phrases.contains_key(anchor)
    }

    /// In either the single-word or the multi-word table; guards stemming.
    pub fn knows(&self, pos: Pos, word: &str) -> bool {
        self.word_polarity(pos, word).is_some() || self.has_phrases(pos, word)
    }

    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.words.get(word).copied()
    }

    pub fn intensifier_phrases(&self, last_word: &str) -> &[IntensifierPhrase] {
        self.intensifiers
            .phrases
            .get(last_word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn insert_word(&mut self, pos: Pos, word: &str, polarity: f64) {
        self.tables[pos].words.insert(word.to_string(), polarity);
    }

    /// With `replace`, an entry with the same pattern is dropped first.
    pub fn insert_phrase(&mut self, pos: Pos, anchor: &str, entry: PhraseEntry, replace: bool) {
        let list = self.tables[pos]
            .phrases
            .entry(anchor.to_string())
            .or_default();
        if replace {
            list.retain(|old| !old.same_pattern(&entry));
        }
        list.push(entry);
    }

    pub fn insert_intensifier(&mut self, word: &str, value: f64) {
        self.intensifiers.words.insert(word.to_string(), value);
    }

    pub fn insert_intensifier_phrase(
        &mut self,
        last_word: &str,
        phrase: IntensifierPhrase,
        replace: bool,
    ) {
        let list = self
            .intensifiers
            .phrases
            .entry(last_word.to_string())
            .or_default();
        if replace {
            list.retain(|old| old.head != phrase.head);
        }
        list.push(phrase);
    }

    /// Collapse polarities to ±2 and intensifiers to 0.5 / -0.5 / -2.
    pub fn simplify(&mut self) {
        let collapse = |v: f64| {
            if v > 0.0 {
                2.0
            } else if v < 0.0 {
                -2.0
            } else {
                v
            }
        };
        let collapse_int = |v: f64| {
            if v > 0.0 {
                0.5
            } else if v < 0.0 && v > -1.0 {
                -0.5
            } else if v < -1.0 {
                -2.0
            } else {
                v
            }
        };
        for pos in Pos::ALL {
            let table = &mut self.tables[pos];
            table.words.values_mut().for_each(|v| *v = collapse(*v));
            table
                .phrases
                .values_mut()
                .flatten()
                .for_each(|e| e.polarity = collapse(e.polarity));
        }
        let ints = &mut self.intensifiers;
        ints.words.values_mut().for_each(|v| *v = collapse_int(*v));
        ints.phrases
            .values_mut()
            .flatten()
            .for_each(|p| p.value = collapse_int(p.value));
    }

    pub fn stats(&self) -> LexiconStats {
        let mut s = LexiconStats::default();
        for (_, t) in self.tables.iter() {
            s.words += t.words.len();
            s.phrases += t.phrases.values().map(Vec::len).sum::<usize>();
        }
        let ints = &self.intensifiers;
        s.intensifiers = ints.words.len() + ints.phrases.values().map(Vec::len).sum::<usize>();
        s
    }
}
