//! Quantified multi-word pattern matching around an anchor token, and
//! intensifier lookup.

use crate::context::ScoringContext;
use crate::language::is_all_caps;
use crate::lexicon::{Alt, PhraseEntry, Quantifier, Slot};

/// Tokens covered by a run of slots, and the multiplier of an `INT` slot among them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotMatch {
    pub consumed: usize,
    pub intensifier: Option<f64>,
}

/// A dictionary phrase found around an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhraseMatch {
    pub polarity: f64,
    /// Tokens matched left of the anchor.
    pub back: usize,
    /// Tokens matched right of the anchor.
    pub forward: usize,
    /// Multiplier found by an `INT` slot, 0 when none.
    pub intensifier: f64,
}

/// A slot being matched, possibly with a quantifier already partly used up.
type Pending<'s> = Option<(&'s [Alt], Quantifier)>;

impl ScoringContext<'_> {
    /// Match `slots` left to right starting at `start`.
    pub fn match_forward(&self, start: usize, slots: &[Slot]) -> Option<SlotMatch> {
        self.forward(start, None, slots)
    }

    /// Match `slots` right to left, the last one ending just before `before`.
    pub fn match_backward(&self, before: usize, slots: &[Slot]) -> Option<SlotMatch> {
        self.backward(before, None, slots)
    }

    fn forward<'s>(&self, i: usize, pending: Pending<'s>, rest: &'s [Slot]) -> Option<SlotMatch> {
        let (alts, quantifier, rest) = match pending {
            Some((alts, q)) => (alts, q, rest),
            None => match rest.split_first() {
                None => return Some(SlotMatch::default()),
                Some((Slot::Anchor, tail)) => return self.forward(i, None, tail),
                Some((Slot::Group { alternatives, quantifier }, tail)) => {
                    (alternatives.as_slice(), *quantifier, tail)
                }
            },
        };
        if quantifier == Quantifier::Exactly(0) {
            return self.forward(i, None, rest);
        }
        if matches!(quantifier, Quantifier::Optional | Quantifier::ZeroOrMore) {
            if let Some(m) = self.forward(i, None, rest) {
                return Some(m);
            }
        }
        if i >= self.len() {
            return None;
        }

        if alts.contains(&Alt::Intensifier) {
            // an intensifier phrase starting at `i`, ending before sentence punctuation
            let mut end = i;
            loop {
                if let Some((span, value)) = self.find_intensifier(end) {
                    if span == end - i + 1 {
                        if let Some(m) = self.forward(end + 1, None, rest) {
                            return Some(SlotMatch {
                                consumed: m.consumed + span,
                                intensifier: Some(value),
                            });
                        }
                    }
                }
                if end + 1 >= self.len() || self.profile().is_sent_punct(self.word(end)) {
                    break;
                }
                end += 1;
            }
        }

        if !self.slot_matches(i, alts) {
            return None;
        }
        let next = match quantifier {
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => {
                self.forward(i + 1, Some((alts, Quantifier::ZeroOrMore)), rest)
            }
            Quantifier::Optional => self.forward(i + 1, None, rest),
            Quantifier::Exactly(n) => self.forward(i + 1, Some((alts, Quantifier::Exactly(n - 1))), rest),
        }?;
        Some(SlotMatch {
            consumed: next.consumed + 1,
            intensifier: next.intensifier,
        })
    }

    fn backward<'s>(&self, end: usize, pending: Pending<'s>, rest: &'s [Slot]) -> Option<SlotMatch> {
        let (alts, quantifier, rest) = match pending {
            Some((alts, q)) => (alts, q, rest),
            None => match rest.split_last() {
                None => return Some(SlotMatch::default()),
                Some((Slot::Anchor, head)) => return self.backward(end, None, head),
                Some((Slot::Group { alternatives, quantifier }, head)) => {
                    (alternatives.as_slice(), *quantifier, head)
                }
            },
        };
        if quantifier == Quantifier::Exactly(0) {
            return self.backward(end, None, rest);
        }
        if matches!(quantifier, Quantifier::Optional | Quantifier::ZeroOrMore) {
            if let Some(m) = self.backward(end, None, rest) {
                return Some(m);
            }
        }
        let i = end.checked_sub(1)?;

        if alts.contains(&Alt::Intensifier) {
            if let Some((span, value)) = self.find_intensifier(i) {
                if let Some(m) = end.checked_sub(span).and_then(|e| self.backward(e, None, rest)) {
                    return Some(SlotMatch {
                        consumed: m.consumed + span,
                        intensifier: Some(value),
                    });
                }
            }
        }

        if !self.slot_matches(i, alts) {
            return None;
        }
        let next = match quantifier {
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => {
                self.backward(i, Some((alts, Quantifier::ZeroOrMore)), rest)
            }
            Quantifier::Optional => self.backward(i, None, rest),
            Quantifier::Exactly(n) => self.backward(i, Some((alts, Quantifier::Exactly(n - 1))), rest),
        }?;
        Some(SlotMatch {
            consumed: next.consumed + 1,
            intensifier: next.intensifier,
        })
    }

    /// Word alternatives compare to the lowercase word, tag alternatives to
    /// the effective tag.
    fn slot_matches(&self, i: usize, alts: &[Alt]) -> bool {
        let lower = self.lower(i);
        let tag = self.tag(i);
        alts.iter().any(|alt| match alt {
            Alt::Word(w) => *w == lower,
            Alt::Tag(t) => tag == Some(t.as_str()),
            Alt::Intensifier => false,
        })
    }

    /// First entry whose slots match on both sides of `anchor`. The whole span
    /// is consumed.
    pub fn find_phrase(&mut self, anchor: usize, entries: &[PhraseEntry]) -> Option<PhraseMatch> {
        for entry in entries {
            let Some(forward) = self.match_forward(anchor + 1, &entry.after) else {
                continue;
            };
            let Some(back) = self.match_backward(anchor, &entry.before) else {
                continue;
            };
            self.consume(anchor - back.consumed, anchor + forward.consumed);
            return Some(PhraseMatch {
                polarity: entry.polarity,
                back: back.consumed,
                forward: forward.consumed,
                intensifier: back.intensifier.or(forward.intensifier).unwrap_or(0.0),
            });
        }
        None
    }

    /// Intensifier ending at `index`: `(length, multiplier)`.
    pub fn find_intensifier(&self, index: usize) -> Option<(usize, f64)> {
        if index >= self.len() || self.is_consumed(index) {
            return None;
        }
        let lexicon = self.lexicon();
        let word = self.lower(index);
        for phrase in lexicon.intensifier_phrases(&word) {
            let n = phrase.head.len();
            if n <= index
                && phrase
                    .head
                    .iter()
                    .enumerate()
                    .all(|(k, h)| self.lower(index - n + k) == *h)
            {
                return Some((phrase.span(), phrase.value));
            }
        }
        let mut value = lexicon.intensifier(&word)?;
        let config = self.config();
        if config.flags.use_cap_int && is_all_caps(self.word(index)) {
            value *= config.modifiers.capital_modifier;
        }
        Some((1, value))
    }
}
