//! Per-document scoring state and the context searches every part of speech shares.

use crate::config::Config;
use crate::document::Document;
use crate::language::{is_all_caps, LanguageProfile};
use crate::lexicon::Lexicon;
use crate::pos::{PerPos, Pos};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Everything one document's scoring reads or mutates.
///
/// The lexicon, configuration and language profile are shared and read-only;
/// the document (consumption flags), word counts and learned adverbs belong
/// to this document alone.
#[derive(Debug)]
pub struct ScoringContext<'a> {
    config: &'a Config,
    lexicon: &'a Lexicon,
    profile: &'a LanguageProfile,
    doc: Document,
    word_counts: PerPos<HashMap<String, u32>>,
    learned_adverbs: BTreeMap<String, f64>,
}

impl<'a> ScoringContext<'a> {
    /// Wrap `doc`. All-caps tags are corrected here when `fix_cap_tags` is set.
    pub fn new(
        config: &'a Config,
        lexicon: &'a Lexicon,
        profile: &'a LanguageProfile,
        doc: Document,
    ) -> Self {
        let mut ctx = Self {
            config,
            lexicon,
            profile,
            doc,
            word_counts: PerPos::default(),
            learned_adverbs: BTreeMap::new(),
        };
        if config.flags.fix_cap_tags {
            ctx.fix_cap_tags();
        }
        ctx
    }

    fn fix_cap_tags(&mut self) {
        let morphology = self.profile.morphology();
        for i in 0..self.doc.len() {
            let Some(t) = self.doc.get(i) else { continue };
            if !is_all_caps(&t.word) {
                continue;
            }
            if let Some(tag) = morphology.corrected_caps_tag(&t.word, &t.tag, self.lexicon) {
                self.doc.set_tag(i, tag);
            }
        }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    pub fn profile(&self) -> &'a LanguageProfile {
        self.profile
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn len(&self) -> usize {
        self.doc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// Word at `i` as written ("" past the end).
    pub fn word(&self, i: usize) -> &str {
        self.doc.get(i).map(|t| t.word.as_str()).unwrap_or("")
    }

    pub fn lower(&self, i: usize) -> String {
        self.word(i).to_lowercase()
    }

    /// Tag at `i`, or `None` when consumed or out of range.
    pub fn tag(&self, i: usize) -> Option<&str> {
        self.doc.get(i).and_then(|t| t.effective_tag())
    }

    /// Tag at `i` regardless of consumption.
    pub fn raw_tag(&self, i: usize) -> &str {
        self.doc.get(i).map(|t| t.tag.as_str()).unwrap_or("")
    }

    pub fn is_consumed(&self, i: usize) -> bool {
        self.doc.get(i).is_some_and(|t| t.consumed)
    }

    /// Mark `first..=last` as consumed.
    pub fn consume(&mut self, first: usize, last: usize) {
        for i in first..=last {
            self.doc.consume(i);
        }
    }

    pub fn word_counts(&self) -> &PerPos<HashMap<String, u32>> {
        &self.word_counts
    }

    /// Count one more occurrence of `lemma`; returns the new count.
    pub fn count_word(&mut self, pos: Pos, lemma: &str) -> u32 {
        let n = self.word_counts[pos].entry(lemma.to_string()).or_insert(0);
        *n += 1;
        *n
    }

    pub fn take_learned_adverbs(&mut self) -> BTreeMap<String, f64> {
        std::mem::take(&mut self.learned_adverbs)
    }

    pub fn learn_adverb(&mut self, adverb: &str, polarity: f64) {
        self.learned_adverbs.insert(adverb.to_string(), polarity);
    }

    /// Adverb polarity, learned adverbs first.
    pub fn adverb_polarity(&self, word: &str) -> Option<f64> {
        self.learned_adverbs
            .get(word)
            .copied()
            .or_else(|| self.lexicon.word_polarity(Pos::Adverb, word))
    }

    /// Single-word polarity for `pos`, learned adverbs included.
    pub fn polarity(&self, pos: Pos, word: &str) -> Option<f64> {
        match pos {
            Pos::Adverb => self.adverb_polarity(word),
            _ => self.lexicon.word_polarity(pos, word),
        }
    }

    /// Token `i` ends a line, or is boundary punctuation / a boundary word when enabled.
    pub fn at_boundary(&self, i: usize) -> bool {
        let flags = &self.config.flags;
        self.doc.ends_line(i)
            || (flags.use_boundary_punctuation && self.profile.is_punct(self.word(i)))
            || (flags.use_boundary_words && self.config.lists.boundary_words.contains(&self.lower(i)))
    }

    /// First token of a sentence: text start or right after sentence punctuation.
    pub fn sentence_initial(&self, i: usize) -> bool {
        i == 0 || self.profile.is_sent_punct(self.word(i - 1))
    }

    /// Whether the word or tag of any of the `n` tokens ending at `from` is in `set`.
    /// The window does not reach into the previous line.
    pub fn within(&self, from: Option<usize>, set: &HashSet<String>, n: usize) -> bool {
        let Some(from) = from else { return false };
        (0..n)
            .map_while(|k| from.checked_sub(k))
            .take_while(|&i| i == from || !self.doc.ends_line(i))
            .any(|i| set.contains(&self.lower(i)) || self.tag(i).is_some_and(|t| set.contains(t)))
    }

    /// `from` when it lies on the same line as `index`.
    pub fn on_line_of(&self, from: Option<usize>, index: usize) -> Option<usize> {
        from.filter(|&f| self.doc.sentence_of(f) == self.doc.sentence_of(index))
    }

    /// Next sentence punctuation at or after `i`, within the line.
    pub fn sent_punct_after(&self, mut i: usize) -> Option<&str> {
        while i < self.len() {
            if self.profile.is_sent_punct(self.word(i)) {
                return Some(self.word(i));
            }
            if self.doc.ends_line(i) {
                return None;
            }
            i += 1;
        }
        None
    }

    pub fn is_question(&self, i: usize) -> bool {
        self.sent_punct_after(i) == Some("?")
    }

    /// Whether a verb precedes `index` within its clause.
    pub fn is_in_predicate(&self, index: usize) -> bool {
        let morphology = self.profile.morphology();
        let mut i = index;
        while let Some(prev) = i.checked_sub(1) {
            if self.at_boundary(prev) {
                return false;
            }
            if morphology.is_predicate_verb(self.raw_tag(prev)) {
                return true;
            }
            i = prev;
        }
        false
    }

    /// Last token of the clause holding `index`: stops before punctuation,
    /// boundary words and at line ends.
    pub fn clause_end(&self, index: usize) -> usize {
        let flags = &self.config.flags;
        let mut j = index;
        while j + 1 < self.len() && !self.doc.ends_line(j) {
            let next = j + 1;
            let w = self.word(next);
            if self.profile.is_sent_punct(w)
                || (flags.use_boundary_punctuation && self.profile.is_punct(w))
                || (flags.use_boundary_words && self.config.lists.boundary_words.contains(&self.lower(next)))
            {
                break;
            }
            j = next;
        }
        j
    }

    /// Backward search for a negator from `from`, up to a boundary. With
    /// restricted negation for `pos`, only skip-listed words or tags may
    /// stand between the negator and the target.
    pub fn find_negation(&self, from: Option<usize>, pos: Pos) -> Option<usize> {
        let mut i = from?;
        let restricted = self.config.flags.restricted_neg[pos];
        let skipped = &self.profile.lists.skipped[pos];
        loop {
            if self.at_boundary(i) {
                return None;
            }
            let word = self.lower(i);
            if self.profile.is_negator(&word) {
                return Some(i);
            }
            if restricted
                && !skipped.contains(&word)
                && !self.tag(i).is_some_and(|t| skipped.contains(t))
            {
                return None;
            }
            i = i.checked_sub(1)?;
        }
    }

    /// Whether the token at `i` is strong and opposed enough to cancel `so`.
    fn is_blocker(&self, so: f64, i: usize) -> bool {
        let Some(tag) = self.tag(i) else { return false };
        let tags = &self.profile.lists.tags;
        let word = self.lower(i);
        let polarity = if tag == tags[Pos::Adverb] {
            self.adverb_polarity(&word)
        } else if tag == tags[Pos::Adjective] {
            self.lexicon.word_polarity(Pos::Adjective, &word)
        } else if tag.starts_with(tags[Pos::Verb].as_str()) {
            self.lexicon.word_polarity(Pos::Verb, &word)
        } else {
            None
        };
        polarity.is_some_and(|p| {
            p.abs() >= self.config.modifiers.blocker_cutoff && (so + p).abs() < so.abs() + p.abs()
        })
    }

    /// Look left of `index` for a blocker through skip-listed tokens.
    pub fn find_blocker(&self, so: f64, index: usize, pos: Pos) -> bool {
        let skipped = &self.profile.lists.skipped[pos];
        let mut i = index;
        while let Some(prev) = i.checked_sub(1) {
            if self.at_boundary(prev) {
                return false;
            }
            if self.is_blocker(so, prev) {
                return true;
            }
            let prefix: String = self.raw_tag(prev).chars().take(2).collect();
            if !skipped.contains(&self.lower(prev)) && !skipped.contains(&prefix) {
                return false;
            }
            i = prev;
        }
        false
    }

    /// Highlighter word between the clause start (the boundary word included)
    /// and `from`. Never looks past the start of the line.
    pub fn highlighter(&self, from: Option<usize>) -> Option<f64> {
        let mut i = from?;
        loop {
            if self.doc.ends_line(i) {
                return None;
            }
            if let Some(&w) = self.config.lists.highlighters.get(&self.lower(i)) {
                return Some(w);
            }
            if self.at_boundary(i) {
                return None;
            }
            i = i.checked_sub(1)?;
        }
    }

    /// Irrealis marker (modal word, or mood morphology) earlier in the clause,
    /// on the same line.
    pub fn has_irrealis(&self, from: Option<usize>) -> bool {
        let flags = &self.config.flags;
        if flags.use_definite_assertion && self.within(from, &self.profile.lists.definites, 1) {
            return false;
        }
        let Some(mut i) = from else { return false };
        let morphology = self.profile.morphology();
        loop {
            if self.doc.ends_line(i) {
                return false;
            }
            if self.config.lists.irrealis.contains(&self.lower(i))
                || morphology.is_irrealis_tag(self.raw_tag(i), flags)
            {
                return true;
            }
            if self.at_boundary(i) {
                return false;
            }
            match i.checked_sub(1) {
                Some(prev) => i = prev,
                None => return false,
            }
        }
    }

    /// Clause holding `index` opens with an imperative verb and the sentence is
    /// not a question. `from` is the token left of the scored words.
    pub fn in_imperative(&self, index: usize, from: Option<usize>) -> bool {
        if self.is_question(index) || self.within(from, &self.profile.lists.definites, 1) {
            return false;
        }
        let mut start = index;
        while start > 0
            && !self.profile.is_sent_punct(self.word(start - 1))
            && !self.at_boundary(start - 1)
        {
            start -= 1;
        }
        self.profile
            .morphology()
            .starts_imperative(self.word(start), self.raw_tag(start))
    }

    /// Inside an odd number of quotation marks on both sides within the sentence.
    pub fn in_quotes(&self, index: usize) -> bool {
        let is_quote = |w: &str| w == "\"" || w == "'";
        let mut left = 0usize;
        let mut i = Some(index);
        while let Some(j) = i {
            let w = self.word(j);
            if is_quote(w) {
                left += 1;
            }
            if self.profile.is_sent_punct(w) {
                break;
            }
            i = j.checked_sub(1);
        }
        if left % 2 == 0 {
            return false;
        }
        let mut right = 0usize;
        let mut j = index;
        while j < self.len() {
            let w = self.word(j);
            j += 1;
            if is_quote(w) {
                right += 1;
            }
            if self.profile.is_sent_punct(w) {
                break;
            }
        }
        // closing quote placed after the sentence punctuation
        if left == right + 1 && j < self.len() && self.word(j) == "\"" {
            right += 1;
        }
        right % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Token;

    fn doc(text: &str) -> Document {
        Document::parse(text, &Config::default()).unwrap()
    }

    fn with_ctx<R>(text: &str, f: impl FnOnce(&mut ScoringContext<'_>) -> R) -> R {
        let config = Config::default();
        let mut lex = Lexicon::default();
        lex.insert_word(Pos::Adverb, "horribly", -4.0);
        lex.insert_word(Pos::Adjective, "great", 3.0);
        let profile = config.profile();
        let mut ctx = ScoringContext::new(&config, &lex, &profile, doc(text));
        f(&mut ctx)
    }

    #[test]
    fn negation_stops_at_boundaries_and_non_skipped_words() {
        with_ctx("it/PRP is/VBZ not/RB good/JJ ./.", |ctx| {
            assert_eq!(ctx.find_negation(Some(2), Pos::Adjective), Some(2));
        });
        with_ctx("not/RB ,/, good/JJ", |ctx| {
            assert_eq!(ctx.find_negation(Some(1), Pos::Adjective), None);
        });
        // "really" is not in the adjective skip list: restricted search stops
        with_ctx("not/RB really/RB good/JJ", |ctx| {
            assert_eq!(ctx.find_negation(Some(1), Pos::Adjective), None);
        });
        with_ctx("not/RB the/DT good/JJ", |ctx| {
            assert_eq!(ctx.find_negation(Some(1), Pos::Adjective), Some(0));
        });
    }

    #[test]
    fn blocker_needs_strength_and_opposition() {
        with_ctx("horribly/RB good/JJ", |ctx| {
            assert!(ctx.find_blocker(2.0, 1, Pos::Adjective));
            assert!(!ctx.find_blocker(-2.0, 1, Pos::Adjective));
        });
    }

    #[test]
    fn questions_and_quotes() {
        with_ctx("is/VBZ it/PRP good/JJ ?/.", |ctx| {
            assert!(ctx.is_question(2));
        });
        with_ctx("he/PRP said/VBD \"/\" great/JJ \"/\" ./.", |ctx| {
            assert!(ctx.in_quotes(3));
            assert!(!ctx.in_quotes(1));
        });
    }

    #[test]
    fn predicate_and_clause_end() {
        with_ctx("it/PRP was/VBD better/JJR", |ctx| {
            assert!(ctx.is_in_predicate(2));
        });
        with_ctx("a/DT better/JJR choice/NN", |ctx| {
            assert!(!ctx.is_in_predicate(1));
        });
        with_ctx("liked/VBD it/PRP a/DT lot/NN ./. more/JJR", |ctx| {
            assert_eq!(ctx.clause_end(0), 3);
        });
    }

    #[test]
    fn within_checks_words_and_tags() {
        with_ctx("the/DT best/JJS", |ctx| {
            let definites = &ctx.profile().lists.definites;
            assert!(ctx.within(Some(0), definites, 1));
            assert!(!ctx.within(None, definites, 2));
        });
    }

    #[test]
    fn within_stops_at_the_previous_line() {
        with_ctx("the/DT\ngood/JJ", |ctx| {
            let definites = &ctx.profile().lists.definites;
            assert!(!ctx.within(Some(1), definites, 2));
            assert_eq!(ctx.on_line_of(Some(0), 1), None);
            assert_eq!(ctx.on_line_of(Some(0), 0), Some(0));
        });
    }

    #[test]
    fn irrealis_stays_on_its_line() {
        with_ctx("i/PRP did/VBD not/RB want/VB anything/NN\ngreat/JJ movie/NN", |ctx| {
            assert!(!ctx.has_irrealis(Some(4)));
        });
        with_ctx("i/PRP did/VBD not/RB want/VB anything/NN great/JJ movie/NN", |ctx| {
            assert!(ctx.has_irrealis(Some(4)));
        });
        with_ctx("it/PRP would/MD be/VB great/JJ", |ctx| {
            assert!(ctx.has_irrealis(Some(2)));
        });
    }

    #[test]
    fn highlighter_stays_on_its_line() {
        with_ctx("it/PRP was/VBD ok/JJ but/CC\ngreat/JJ movie/NN", |ctx| {
            assert_eq!(ctx.highlighter(Some(3)), None);
        });
        with_ctx("it/PRP was/VBD ok/JJ but/CC great/JJ", |ctx| {
            assert_eq!(ctx.highlighter(Some(3)), Some(2.0));
        });
    }

    #[test]
    fn imperative_clause_starts_on_the_target_line() {
        with_ctx("love/VB\ngreat/JJ", |ctx| {
            assert!(!ctx.in_imperative(1, None));
        });
        with_ctx("love/VB it/PRP great/JJ", |ctx| {
            assert!(ctx.in_imperative(2, Some(1)));
        });
    }

    #[test]
    fn caps_tags_are_fixed_on_setup() {
        with_ctx("GREAT/NNP", |ctx| {
            assert_eq!(ctx.raw_tag(0), "JJ");
        });
        let config = Config::default();
        let lex = Lexicon::default();
        let profile = config.profile();
        let ctx = ScoringContext::new(
            &config,
            &lex,
            &profile,
            Document::new(vec![Token::new("IBM", "NNP")], vec![]),
        );
        assert_eq!(ctx.raw_tag(0), "NNP");
    }
}
