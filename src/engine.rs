//! # Scoring engine
//! Runs the part-of-speech passes over a document and folds token scores into
//! per-POS, per-sentence and document totals.
//!
//! The lexicon, configuration and language profile are shared read-only
//! behind `Arc`; every document gets its own [`ScoringContext`], so
//! documents can be scored in parallel.

use crate::config::Config;
use crate::context::ScoringContext;
use crate::debug::anon_hash;
use crate::document::Document;
use crate::language::LanguageProfile;
use crate::lexicon::{self, Lexicon};
use crate::pipeline::{self, Outcome};
use crate::pos::{PerPos, Pos};
use crate::trace::{Derivation, Reason};
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Totals for one part of speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PosSummary {
    pub total: f64,
    /// Tokens that were scored rather than rejected.
    pub count: u32,
    pub average: f64,
}

/// Sum of the contributions of one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceScore {
    pub index: usize,
    pub text: String,
    pub so: f64,
}

/// How one token got its contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenTrace {
    pub index: usize,
    pub pos: Pos,
    pub negated: bool,
    pub derivation: Derivation,
}

/// Result for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentScore {
    /// Sum of contributions over the number of scored tokens; 0 when nothing scored.
    pub so: f64,
    pub counted: u32,
    pub pos: PerPos<PosSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<SentenceScore>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TokenTrace>,
    /// Adverb polarities derived from their adjectives while scoring.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub learned_adverbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct SoCalculator {
    config: Arc<Config>,
    lexicon: Arc<Lexicon>,
    profile: Arc<LanguageProfile>,
}

impl SoCalculator {
    pub fn new(config: Config, lexicon: Lexicon) -> Self {
        let profile = config.profile();
        Self {
            config: Arc::new(config),
            lexicon: Arc::new(lexicon),
            profile: Arc::new(profile),
        }
    }

    /// Load the dictionaries named by `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let profile = config.profile();
        let lexicon = lexicon::load(&config, &profile)?;
        Ok(Self {
            config: Arc::new(config),
            lexicon: Arc::new(lexicon),
            profile: Arc::new(profile),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Parse tagged text and score it.
    pub fn score_text(&self, text: &str) -> anyhow::Result<DocumentScore> {
        let doc = Document::parse(text, &self.config)?;
        Ok(self.score_document(doc))
    }

    pub fn score_document(&self, doc: Document) -> DocumentScore {
        let config = &*self.config;
        let flags = &config.flags;
        let id = anon_hash(&doc.text_of(0..doc.len()));
        let mut ctx = ScoringContext::new(config, &self.lexicon, &self.profile, doc);

        let mut pos_totals = PerPos::<PosSummary>::default();
        let mut sentence_totals = vec![0.0; ctx.doc().sentence_count()];
        let mut trace = Vec::new();

        let enabled = PerPos::new(
            flags.use_nouns,
            flags.use_verbs,
            flags.use_adjectives,
            flags.use_adverbs,
        );
        for pos in Pos::ALL {
            if !enabled[pos] {
                continue;
            }
            let mut pass_trace = Vec::new();
            for index in candidates(&ctx, pos) {
                // an adverb scored later in the reverse pass may already be part of a phrase
                if ctx.is_consumed(index) {
                    continue;
                }
                let Outcome::Scored(scored) = pipeline::score(&mut ctx, pos, index) else {
                    continue;
                };
                let mut derivation = scored.derivation;
                let value = self.apply_weights(&ctx, index, scored.value, &mut derivation);
                let summary = &mut pos_totals[pos];
                summary.total += value;
                summary.count += 1;
                if let Some(s) = sentence_totals.get_mut(ctx.doc().sentence_of(index)) {
                    *s += value;
                }
                if config.output.calculations {
                    pass_trace.push(TokenTrace {
                        index,
                        pos,
                        negated: scored.negated,
                        derivation,
                    });
                }
            }
            pass_trace.sort_by_key(|t| t.index);
            trace.extend(pass_trace);
        }

        let mut total = 0.0;
        let mut counted = 0;
        for pos in Pos::ALL {
            let s = &mut pos_totals[pos];
            if s.count > 0 {
                s.average = s.total / f64::from(s.count);
            }
            total += s.total;
            counted += s.count;
        }
        let so = if counted > 0 {
            total / f64::from(counted)
        } else {
            0.0
        };

        let sentences = if config.output.sentences {
            sentence_totals
                .into_iter()
                .enumerate()
                .map(|(n, so)| SentenceScore {
                    index: n,
                    text: ctx.doc().text_of(ctx.doc().sentence_span(n)),
                    so,
                })
                .collect()
        } else {
            Vec::new()
        };

        debug!(target: "so_calc", %id, so, counted, tokens = ctx.len(), "document scored");
        DocumentScore {
            so,
            counted,
            pos: pos_totals,
            sentences,
            trace,
            learned_adverbs: ctx.take_learned_adverbs(),
        }
    }

    /// Heavy negation and the token's document weight.
    fn apply_weights(
        &self,
        ctx: &ScoringContext<'_>,
        index: usize,
        mut so: f64,
        derivation: &mut Derivation,
    ) -> f64 {
        if so == 0.0 {
            return so;
        }
        let modifiers = &self.config.modifiers;
        if self.config.flags.use_heavy_negation && so < 0.0 {
            so *= modifiers.neg_multiplier;
            derivation.times(modifiers.neg_multiplier, Reason::Negative);
        }
        let weight = ctx.doc().weight(index);
        so *= weight;
        if weight != 1.0 {
            derivation.times(weight, Reason::Weighted);
        }
        derivation.result = so;
        so
    }

    /// Score independent documents on scoped worker threads. Results come
    /// back in input order.
    pub fn score_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<anyhow::Result<DocumentScore>> {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let chunk = texts.len().div_ceil(workers).max(1);
        std::thread::scope(|scope| {
            let handles: Vec<_> = texts
                .chunks(chunk)
                .map(|part| {
                    scope.spawn(move || {
                        part.iter()
                            .map(|t| self.score_text(t.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }

    /// Append adverbs learned while scoring to the adverb dictionary file.
    pub fn save_learned_adverbs(&self, score: &DocumentScore) -> anyhow::Result<()> {
        let dicts = &self.config.dictionaries;
        lexicon::append_learned_adverbs(&dicts.path(&dicts.adverbs), &score.learned_adverbs)
    }
}

/// Token indices whose tag carries the POS prefix, adverbs right to left.
fn candidates(ctx: &ScoringContext<'_>, pos: Pos) -> Vec<usize> {
    let prefix = ctx.profile().lists.tags[pos].as_str();
    let found = (0..ctx.len()).filter(|&i| ctx.tag(i).is_some_and(|t| t.starts_with(prefix)));
    if pos == Pos::Adverb {
        found.rev().collect()
    } else {
        found.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(config: Config) -> SoCalculator {
        let mut lex = Lexicon::default();
        lex.insert_word(Pos::Adjective, "good", 2.0);
        lex.insert_word(Pos::Adjective, "bad", -2.0);
        lex.insert_word(Pos::Noun, "mess", -3.0);
        SoCalculator::new(config, lex)
    }

    #[test]
    fn empty_document_scores_zero() {
        let score = calculator(Config::default()).score_text("").unwrap();
        assert_eq!(score.so, 0.0);
        assert_eq!(score.counted, 0);
    }

    #[test]
    fn heavy_negation_weights_negative_tokens() {
        let score = calculator(Config::default()).score_text("bad/JJ").unwrap();
        assert_eq!(score.so, -3.0);
        let mut config = Config::default();
        config.flags.use_heavy_negation = false;
        let score = calculator(config).score_text("bad/JJ").unwrap();
        assert_eq!(score.so, -2.0);
    }

    #[test]
    fn per_pos_and_sentence_breakdown() {
        let mut config = Config::default();
        config.flags.use_heavy_negation = false;
        config.output.sentences = true;
        config.output.calculations = true;
        let score = calculator(config).score_text("a/DT good/JJ day/NN\nwhat/WP a/DT mess/NN").unwrap();
        assert_eq!(score.counted, 2);
        assert_eq!(score.pos.adjective.total, 2.0);
        assert_eq!(score.pos.noun.count, 1);
        assert_eq!(score.so, -0.5);
        assert_eq!(score.sentences.len(), 2);
        assert_eq!(score.sentences[1].text, "what a mess");
        assert_eq!(score.sentences[1].so, -3.0);
        assert_eq!(score.trace.len(), 2);
        assert_eq!(score.trace[0].pos, Pos::Noun);
    }

    #[test]
    fn weights_from_inline_tags_reach_the_total() {
        let mut config = Config::default();
        config.lists.weight_tags.insert("title".into(), 3.0);
        config.output.calculations = true;
        let score = calculator(config).score_text("<title>good/JJ</title>").unwrap();
        assert_eq!(score.so, 6.0);
        assert_eq!(score.trace[0].derivation.to_string(), "good 2 X 3 (WEIGHTED) = 6");
    }

    #[test]
    fn batch_matches_sequential() {
        let calc = calculator(Config::default());
        let docs = ["good/JJ", "bad/JJ ./.", "", "a/DT mess/NN"];
        let batch: Vec<f64> = calc.score_batch(&docs).into_iter().map(|r| r.unwrap().so).collect();
        let seq: Vec<f64> = docs.iter().map(|d| calc.score_text(d).unwrap().so).collect();
        assert_eq!(batch, seq);
    }
}
