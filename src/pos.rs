//! Parts of speech that carry sentiment, plus a small fixed-size table keyed by them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The four scored parts of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl Pos {
    /// Fixed pass order: nouns and verbs claim their modifiers before adjectives,
    /// adverbs come last.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    /// Label used in derivation traces, e.g. `X 1.5 (ADJECTIVE)`.
    pub fn label(self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Verb => "VERB",
            Pos::Adjective => "ADJECTIVE",
            Pos::Adverb => "ADVERB",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adjective => "adjective",
            Pos::Adverb => "adverb",
        };
        f.write_str(s)
    }
}

/// One value per part of speech. Deserializes from a table with
/// `noun`, `verb`, `adjective`, `adverb` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerPos<T> {
    pub noun: T,
    pub verb: T,
    pub adjective: T,
    pub adverb: T,
}

impl<T> PerPos<T> {
    pub fn new(noun: T, verb: T, adjective: T, adverb: T) -> Self {
        Self {
            noun,
            verb,
            adjective,
            adverb,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerPos<U> {
        PerPos {
            noun: f(self.noun),
            verb: f(self.verb),
            adjective: f(self.adjective),
            adverb: f(self.adverb),
        }
    }

    /// `(pos, value)` pairs in pass order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        Pos::ALL.into_iter().map(move |p| (p, &self[p]))
    }
}

impl<T: Clone> PerPos<T> {
    pub fn splat(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }
}

impl<T> Index<Pos> for PerPos<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        match pos {
            Pos::Noun => &self.noun,
            Pos::Verb => &self.verb,
            Pos::Adjective => &self.adjective,
            Pos::Adverb => &self.adverb,
        }
    }
}

impl<T> IndexMut<Pos> for PerPos<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        match pos {
            Pos::Noun => &mut self.noun,
            Pos::Verb => &mut self.verb,
            Pos::Adjective => &mut self.adjective,
            Pos::Adverb => &mut self.adverb,
        }
    }
}
