//! The per-token modifier pipeline.
//!
//! Each part of speech first *resolves* its candidate (case, stemming,
//! rejections, phrase lookup); the modifiers after that are shared:
//! intensifiers, blocking, negation, context, repetition and the POS weight.
//! Document-level weights are left to the caller.

mod adjective;
mod adverb;
mod noun;
mod verb;

use crate::context::ScoringContext;
use crate::language::{is_all_caps, Degree};
use crate::pos::Pos;
use crate::trace::{Derivation, Reason, Step};

/// What happened to one candidate token.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Not a sentiment word here; counts for nothing.
    Rejected,
    Scored(Scored),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub value: f64,
    pub negated: bool,
    pub derivation: Derivation,
}

/// A token that survived resolution, with its starting polarity.
#[derive(Debug, Clone)]
struct Candidate {
    pos: Pos,
    index: usize,
    lemma: String,
    polarity: f64,
    /// Span of the matched phrase (just `index` for single words).
    first: usize,
    last: usize,
    /// Intensification carried in from the phrase or the adjective's form.
    intensifier: f64,
    degree: Degree,
}

/// Polarity of `lemma` at `index`: a matching phrase first, else the single word.
struct Base {
    polarity: f64,
    first: usize,
    last: usize,
    intensifier: Option<f64>,
}

/// Score the token at `index` as `pos`.
pub fn score(ctx: &mut ScoringContext<'_>, pos: Pos, index: usize) -> Outcome {
    let word = normalize_case(ctx, index);
    let candidate = match pos {
        Pos::Noun => noun::resolve(ctx, index, &word),
        Pos::Verb => verb::resolve(ctx, index, &word),
        Pos::Adjective => adjective::resolve(ctx, index, &word),
        Pos::Adverb => adverb::resolve(ctx, index, &word),
    };
    match candidate {
        Some(c) => Outcome::Scored(modify(ctx, c)),
        None => Outcome::Rejected,
    }
}

/// Lowercased when all-caps or sentence-initial, as written otherwise.
fn normalize_case(ctx: &ScoringContext<'_>, index: usize) -> String {
    let word = ctx.word(index);
    if is_all_caps(word) || ctx.sentence_initial(index) {
        word.to_lowercase()
    } else {
        word.to_string()
    }
}

fn lookup(ctx: &mut ScoringContext<'_>, pos: Pos, index: usize, lemma: &str) -> Option<Base> {
    let entries = ctx.lexicon().phrases(pos, lemma);
    if !entries.is_empty() {
        if let Some(m) = ctx.find_phrase(index, entries) {
            return Some(Base {
                polarity: m.polarity,
                first: index - m.back,
                last: index + m.forward,
                intensifier: Some(m.intensifier),
            });
        }
    }
    let polarity = ctx.polarity(pos, lemma)?;
    Some(Base {
        polarity,
        first: index,
        last: index,
        intensifier: None,
    })
}

impl Candidate {
    fn new(pos: Pos, index: usize, lemma: String, base: Base) -> Self {
        Self {
            pos,
            index,
            lemma,
            polarity: base.polarity,
            first: base.first,
            last: base.last,
            intensifier: base.intensifier.unwrap_or(0.0),
            degree: Degree::Positive,
        }
    }
}

/// Consume the intensifier ending at `at`; returns its first token and value.
fn take_intensifier(ctx: &mut ScoringContext<'_>, at: Option<usize>) -> Option<(usize, f64)> {
    let at = at?;
    let (span, value) = ctx.find_intensifier(at)?;
    let first = at + 1 - span;
    ctx.consume(first, at);
    Some((first, value))
}

/// Step the cursor past one determiner or "as"-like word.
fn look_past(ctx: &ScoringContext<'_>, pos: Pos, cursor: Option<usize>) -> Option<usize> {
    let i = cursor?;
    let lists = &ctx.profile().lists;
    let by_word = lists.look_past_words.contains(&ctx.lower(i));
    let by_tag = pos == Pos::Adjective && ctx.tag(i).is_some_and(|t| lists.look_past_tags.contains(t));
    if by_word || by_tag {
        i.checked_sub(1)
    } else {
        Some(i)
    }
}

fn modify(ctx: &mut ScoringContext<'_>, c: Candidate) -> Scored {
    let config = ctx.config();
    let flags = &config.flags;
    let modifiers = &config.modifiers;
    let pos = c.pos;

    let mut left = c.first;
    let mut right = c.last;
    let mut cursor = c.first.checked_sub(1);
    let mut intensifier = c.intensifier;
    if matches!(pos, Pos::Adjective | Pos::Adverb) {
        cursor = look_past(ctx, pos, cursor);
    }

    if flags.use_intensifiers {
        if pos == Pos::Noun && ctx.profile().morphology().post_nominal_intensifiers() {
            let after = c.last + 1;
            if ctx.find_intensifier(after).is_some_and(|(span, _)| span == 1) {
                if let Some((_, value)) = take_intensifier(ctx, Some(after)) {
                    intensifier += value;
                    right = after;
                }
            }
        }
        let mut found = false;
        while let Some((first, value)) = take_intensifier(ctx, cursor) {
            intensifier += value;
            found = true;
            left = first;
            cursor = first.checked_sub(1);
            if pos != Pos::Adjective {
                break;
            }
        }
        if pos == Pos::Verb && flags.use_clause_final_int && !found {
            let end = ctx.clause_end(c.last);
            if let Some((span, value)) = ctx.find_intensifier(end) {
                if end > c.last && end + 1 - span > c.last {
                    ctx.consume(end + 1 - span, end);
                    intensifier += value;
                    right = end;
                }
            }
        }
    }

    let mut derivation = Derivation {
        base: c.polarity,
        ..Default::default()
    };
    let mut so = c.polarity;
    let intensified = intensifier != 0.0;
    if intensified {
        so *= 1.0 + intensifier;
        derivation.times(1.0 + intensifier, Reason::Intensified);
        match c.degree {
            Degree::Comparative => derivation.push(Step::Note {
                reason: Reason::Comparative,
            }),
            Degree::Superlative => derivation.push(Step::Note {
                reason: Reason::Superlative,
            }),
            Degree::Positive => {}
        }
    } else if flags.use_blocking && ctx.find_blocker(so, c.index, pos) {
        so = 0.0;
        derivation.times(0.0, Reason::Blocked);
    }

    let negation = if flags.use_negation {
        ctx.find_negation(cursor, pos)
    } else {
        None
    };
    if let Some(neg) = negation {
        left = left.min(neg);
        cursor = neg.checked_sub(1);
        let mut external = 0.0;
        if flags.use_intensifiers {
            let skip = &ctx.profile().lists.negation_external_skip;
            while let Some(i) = cursor.filter(|&i| skip.contains(&ctx.lower(i))) {
                cursor = i.checked_sub(1);
            }
            if let Some((first, value)) = take_intensifier(ctx, cursor) {
                external = value;
                left = first;
                cursor = first.checked_sub(1);
            }
        }
        let base_shift = modifiers.neg_shift[pos];
        let shift = if flags.neg_negation_nullification && so < 0.0 {
            so.abs()
        } else if flags.polarity_switch_neg || (flags.limit_shift && so.abs() * 2.0 < base_shift) {
            so.abs() * 2.0
        } else {
            base_shift
        };
        if so > 0.0 {
            so -= shift;
            derivation.push(Step::Shift { amount: -shift });
        } else if so < 0.0 {
            so += shift;
            derivation.push(Step::Shift { amount: shift });
        } else {
            derivation.push(Step::Note {
                reason: Reason::Negated,
            });
        }
        if external != 0.0 {
            so *= 1.0 + external;
            derivation.times(1.0 + external, Reason::Intensified);
        }
    }

    so = context_modifiers(ctx, c.index, cursor, so, &mut derivation);

    if so != 0.0 && intensified && modifiers.int_multiplier != 1.0 {
        so *= modifiers.int_multiplier;
        derivation.times(modifiers.int_multiplier, Reason::IntWeight);
    }
    let count = ctx.count_word(pos, &c.lemma);
    if so != 0.0 && negation.is_none() && count > 1 {
        if flags.use_word_counts_lower {
            so /= f64::from(count);
            derivation.push(Step::Per { count });
        }
        if flags.use_word_counts_block {
            so = 0.0;
            derivation.times(0.0, Reason::Repeated);
        }
    }
    let multiplier = modifiers.pos_multiplier[pos];
    if multiplier != 1.0 {
        so *= multiplier;
        derivation.times(multiplier, Reason::for_pos(pos));
    }

    derivation.words = ctx.doc().tokens()[left..=right]
        .iter()
        .map(|t| t.word.clone())
        .collect();
    derivation.result = so;
    Scored {
        value: so,
        negated: negation.is_some(),
        derivation,
    }
}

/// Modifiers that depend on the token's surroundings rather than its part of speech.
fn context_modifiers(
    ctx: &ScoringContext<'_>,
    index: usize,
    cursor: Option<usize>,
    mut so: f64,
    derivation: &mut Derivation,
) -> f64 {
    let config = ctx.config();
    let flags = &config.flags;
    let modifiers = &config.modifiers;
    let cursor = ctx.on_line_of(cursor, index);
    let definite_before =
        flags.use_definite_assertion && ctx.within(cursor, &ctx.profile().lists.definites, 1);

    if flags.use_cap_int && is_all_caps(ctx.word(index)) {
        so *= modifiers.capital_modifier;
        derivation.times(modifiers.capital_modifier, Reason::Capitalized);
    }
    if flags.use_exclam_int && ctx.sent_punct_after(index) == Some("!") {
        so *= modifiers.exclam_modifier;
        derivation.times(modifiers.exclam_modifier, Reason::Exclamation);
    }
    if flags.use_highlighters {
        if let Some(weight) = ctx.highlighter(cursor) {
            so *= weight;
            derivation.times(weight, Reason::Highlighted);
        }
    }
    let mut zero = |reason: Reason| {
        so = 0.0;
        derivation.times(0.0, reason);
    };
    if flags.use_quest_mod && ctx.is_question(index) && !definite_before {
        zero(Reason::Question);
    }
    if flags.use_imperative && ctx.in_imperative(index, cursor) {
        zero(Reason::Imperative);
    }
    if flags.use_quote_mod && ctx.in_quotes(index) {
        zero(Reason::Quotes);
    }
    if flags.use_irrealis && ctx.has_irrealis(cursor) {
        zero(Reason::Irrealis);
    }
    so
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::Document;
    use crate::lexicon::Lexicon;

    fn lexicon() -> Lexicon {
        let mut lex = Lexicon::default();
        lex.insert_word(Pos::Adjective, "good", 2.0);
        lex.insert_word(Pos::Adjective, "bad", -2.0);
        lex.insert_word(Pos::Verb, "love", 3.0);
        lex.insert_intensifier("very", 0.5);
        lex.insert_intensifier("really", 0.15);
        lex.insert_intensifier("more", 0.5);
        lex
    }

    fn run(config: &Config, text: &str, pos: Pos, index: usize) -> Outcome {
        let lex = lexicon();
        let profile = config.profile();
        let doc = Document::parse(text, config).unwrap();
        let mut ctx = ScoringContext::new(config, &lex, &profile, doc);
        score(&mut ctx, pos, index)
    }

    fn value(outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Scored(s) => s.value,
            Outcome::Rejected => panic!("rejected"),
        }
    }

    #[test]
    fn adjective_intensifiers_stack() {
        let config = Config::default();
        let v = value(run(&config, "really/RB very/RB good/JJ", Pos::Adjective, 2));
        assert!((v - 2.0 * 1.65).abs() < 1e-9);
    }

    #[test]
    fn negative_words_are_nullified_by_negation() {
        let config = Config::default();
        assert_eq!(value(run(&config, "not/RB bad/JJ", Pos::Adjective, 1)), 0.0);
        let mut config = Config::default();
        config.flags.neg_negation_nullification = false;
        assert_eq!(value(run(&config, "not/RB bad/JJ", Pos::Adjective, 1)), 2.0);
    }

    #[test]
    fn limit_shift_mirrors_small_values() {
        let mut config = Config::default();
        config.flags.limit_shift = true;
        config.modifiers.neg_shift.adjective = 5.0;
        assert_eq!(value(run(&config, "not/RB good/JJ", Pos::Adjective, 1)), -2.0);
    }

    #[test]
    fn questions_quotes_and_modals_zero_the_value() {
        let config = Config::default();
        assert_eq!(value(run(&config, "is/VBZ it/PRP good/JJ ?/.", Pos::Adjective, 2)), 0.0);
        assert_eq!(value(run(&config, "\"/'' good/JJ \"/''", Pos::Adjective, 1)), 0.0);
        assert_eq!(value(run(&config, "it/PRP would/MD be/VB good/JJ", Pos::Adjective, 3)), 0.0);
    }

    #[test]
    fn highlighter_weights_the_clause() {
        let mut config = Config::default();
        config.flags.use_boundary_words = false;
        let v = value(run(&config, "but/CC good/JJ", Pos::Adjective, 1));
        assert_eq!(v, 4.0);
    }

    #[test]
    fn clause_final_intensifier_for_verbs() {
        let config = Config::default();
        let lex = lexicon();
        let profile = config.profile();
        let doc = Document::parse("i/PRP love/VBP it/PRP very/RB ./.", &config).unwrap();
        let mut ctx = ScoringContext::new(&config, &lex, &profile, doc);
        let v = value(score(&mut ctx, Pos::Verb, 1));
        assert_eq!(v, 4.5);
        assert!(ctx.is_consumed(3));
    }

    #[test]
    fn unknown_words_are_rejected_without_counting() {
        let config = Config::default();
        let lex = lexicon();
        let profile = config.profile();
        let doc = Document::parse("fine/JJ", &config).unwrap();
        let mut ctx = ScoringContext::new(&config, &lex, &profile, doc);
        assert_eq!(score(&mut ctx, Pos::Adjective, 0), Outcome::Rejected);
        assert!(ctx.word_counts().adjective.is_empty());
    }

    #[test]
    fn trace_lists_words_and_steps() {
        let config = Config::default();
        match run(&config, "not/RB very/RB good/JJ", Pos::Adjective, 2) {
            Outcome::Scored(s) => {
                assert!(s.negated);
                assert_eq!(
                    s.derivation.to_string(),
                    "not very good 2 X 1.5 (INTENSIFIED) - 4 (NEGATED) = -1"
                );
            }
            Outcome::Rejected => panic!("rejected"),
        }
    }
}
