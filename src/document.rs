//! Tagged input documents.

use crate::config::Config;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?)([^<>]*)>").expect("inline tag regex"));
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)$").expect("decimal regex"));

/// One `word/TAG` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub tag: String,
    /// Already counted as part of another token's phrase or intensifier.
    pub consumed: bool,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
            consumed: false,
        }
    }

    /// `word/TAG`, split on the last slash. A bare token is its own tag.
    pub fn parse(raw: &str) -> Self {
        match raw.rsplit_once('/') {
            Some((word, tag)) if !word.is_empty() && !tag.is_empty() => Token::new(word, tag),
            _ => Token::new(raw, raw),
        }
    }

    /// The tag, unless the token has been consumed.
    pub fn effective_tag(&self) -> Option<&str> {
        (!self.consumed).then_some(self.tag.as_str())
    }

    pub fn lower(&self) -> String {
        self.word.to_lowercase()
    }
}

/// Tokens, per-token weights and line boundaries.
///
/// `boundaries` holds exclusive line ends: sorted, deduplicated, each at most
/// `tokens.len()`, the last one equal to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    tokens: Vec<Token>,
    weights: Vec<f64>,
    boundaries: Vec<usize>,
}

impl Document {
    /// Unweighted document. Boundaries are cleaned up and closed at the end.
    pub fn new(tokens: Vec<Token>, mut boundaries: Vec<usize>) -> Self {
        let len = tokens.len();
        boundaries.retain(|&b| b <= len);
        boundaries.push(len);
        boundaries.sort_unstable();
        boundaries.dedup();
        Self {
            weights: vec![1.0; len],
            tokens,
            boundaries,
        }
    }

    /// Parse tagged text. Each line ends a boundary; inline `<tag>` markers
    /// are removed and, with `use_xml_weighing`, weight the tokens they enclose.
    pub fn parse(text: &str, config: &Config) -> anyhow::Result<Self> {
        let weigh = config.flags.use_xml_weighing;
        let mut tokens = Vec::new();
        let mut weights = Vec::new();
        let mut boundaries = Vec::new();
        let mut weight = 1.0;
        let mut before_zero = 1.0;

        for line in text.lines() {
            let mut rest = 0;
            let mut push_words = |segment: &str, weight: f64| {
                for raw in segment.split_whitespace() {
                    tokens.push(Token::parse(raw));
                    weights.push(weight);
                }
            };
            for cap in INLINE_TAG.captures_iter(line) {
                let Some(m) = cap.get(0) else { continue };
                push_words(&line[rest..m.start()], weight);
                rest = m.end();
                if !weigh {
                    continue;
                }
                let closing = !cap[1].is_empty();
                let name = cap[2].trim().trim_matches('/');
                let modifier = match config.lists.weight_tags.get(name) {
                    Some(&w) => w,
                    None if DECIMAL.is_match(name) => name.parse().unwrap_or(1.0),
                    None => 1.0,
                };
                match (closing, modifier == 0.0) {
                    (true, false) => weight /= modifier,
                    (true, true) => weight = before_zero,
                    (false, false) => weight *= modifier,
                    (false, true) => {
                        before_zero = weight;
                        weight = 0.0;
                    }
                }
            }
            push_words(&line[rest..], weight);
            boundaries.push(tokens.len());
        }

        if config.flags.use_weight_by_location && !weights.is_empty() {
            let ranges = config.location_ranges()?;
            let len = weights.len() as f64;
            for (i, w) in weights.iter_mut().enumerate() {
                let relative = i as f64 / len;
                for r in ranges.iter().filter(|r| r.contains(relative)) {
                    *w *= r.weight;
                }
            }
        }

        let mut doc = Document::new(tokens, boundaries);
        doc.weights = weights;
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub(crate) fn consume(&mut self, index: usize) {
        if let Some(t) = self.tokens.get_mut(index) {
            t.consumed = true;
        }
    }

    pub(crate) fn set_tag(&mut self, index: usize, tag: String) {
        if let Some(t) = self.tokens.get_mut(index) {
            t.tag = tag;
        }
    }

    /// True when `index` is the last token of a line.
    pub fn ends_line(&self, index: usize) -> bool {
        self.boundaries.binary_search(&(index + 1)).is_ok()
    }

    /// Number of the line holding `index`.
    pub fn sentence_of(&self, index: usize) -> usize {
        self.boundaries.partition_point(|&b| b <= index)
    }

    /// Token range of line `n`.
    pub fn sentence_span(&self, n: usize) -> Range<usize> {
        let start = if n == 0 { 0 } else { self.boundaries.get(n - 1).copied().unwrap_or(self.len()) };
        let end = self.boundaries.get(n).copied().unwrap_or(self.len());
        start..end.max(start)
    }

    pub fn sentence_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Words of `range`, space-joined.
    pub fn text_of(&self, range: Range<usize>) -> String {
        self.tokens[range.start.min(self.len())..range.end.min(self.len())]
            .iter()
            .map(|t| t.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
