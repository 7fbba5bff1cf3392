// src/lexicon/loader.rs
//! Dictionary files: `word_or_pattern  polarity` per line.

use super::pattern::{expand_macros, parse_key};
use super::{IntensifierPhrase, Lexicon, PhraseEntry};
use crate::config::Config;
use crate::language::{LanguageProfile, WordLists};
use crate::pos::Pos;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Which table a dictionary (or extra-dictionary section) feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Pos(Pos),
    Intensifiers,
}

impl Section {
    /// Section headers used in the extra dictionary.
    fn from_header(line: &str) -> Option<Self> {
        match line {
            "nouns" => Some(Section::Pos(Pos::Noun)),
            "verbs" => Some(Section::Pos(Pos::Verb)),
            "adjectives" => Some(Section::Pos(Pos::Adjective)),
            "adverbs" => Some(Section::Pos(Pos::Adverb)),
            "intensifiers" => Some(Section::Intensifiers),
            _ => None,
        }
    }
}

/// Options shared by every dictionary read for one lexicon.
struct LoadOptions<'a> {
    multiword: bool,
    lists: &'a WordLists,
}

/// Load all dictionaries named by `config`. A missing file is an error.
pub fn load(config: &Config, profile: &LanguageProfile) -> anyhow::Result<Lexicon> {
    let dicts = &config.dictionaries;
    let opts = LoadOptions {
        multiword: config.flags.use_multiword_dictionaries,
        lists: &profile.lists,
    };
    let mut lex = Lexicon::default();
    let files = [
        (Section::Pos(Pos::Adjective), &dicts.adjectives),
        (Section::Pos(Pos::Adverb), &dicts.adverbs),
        (Section::Pos(Pos::Verb), &dicts.verbs),
        (Section::Pos(Pos::Noun), &dicts.nouns),
        (Section::Intensifiers, &dicts.intensifiers),
    ];
    for (section, file) in files {
        let path = dicts.path(file);
        let text = read_dictionary(&path)?;
        add_lines(&mut lex, section, &text, &opts, false);
    }
    if config.flags.use_extra_dict {
        if let Some(extra) = &dicts.extra {
            let path = dicts.path(extra);
            let text = read_dictionary(&path)?;
            add_extra(&mut lex, &text, &opts);
        }
    }
    if config.flags.simple_so {
        lex.simplify();
    }
    let stats = lex.stats();
    info!(
        target: "so_calc",
        words = stats.words,
        phrases = stats.phrases,
        intensifiers = stats.intensifiers,
        language = ?config.language,
        "lexicon loaded"
    );
    Ok(lex)
}

/// Add one dictionary's lines to `lex`.
pub fn load_dictionary_str(
    lex: &mut Lexicon,
    section: Section,
    text: &str,
    lists: &WordLists,
    multiword: bool,
) {
    let opts = LoadOptions { multiword, lists };
    add_lines(lex, section, text, &opts, false);
}

/// Add an extra dictionary: section headers followed by entries.
/// Its multi-word entries replace earlier ones with the same pattern.
pub fn load_extra_str(lex: &mut Lexicon, text: &str, lists: &WordLists, multiword: bool) {
    let opts = LoadOptions { multiword, lists };
    add_extra(lex, text, &opts);
}

/// Append learned adverbs to the adverb dictionary at `path`.
pub fn append_learned_adverbs(path: &Path, learned: &BTreeMap<String, f64>) -> anyhow::Result<()> {
    if learned.is_empty() {
        return Ok(());
    }
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open adverb dictionary at {}", path.display()))?;
    for (adverb, value) in learned {
        writeln!(file, "{adverb}\t{value}")
            .with_context(|| format!("Failed to append to {}", path.display()))?;
    }
    debug!(target: "so_calc", count = learned.len(), "learned adverbs appended");
    Ok(())
}

/// UTF-8, falling back to Latin-1 for legacy dictionary files.
fn read_dictionary(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read dictionary at {}", path.display()))?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    })
}

fn add_extra(lex: &mut Lexicon, text: &str, opts: &LoadOptions<'_>) {
    let mut section = None;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(s) = Section::from_header(line) {
            section = Some(s);
        } else if let Some(s) = section {
            add_line(lex, s, line, opts, true);
        }
    }
}

fn add_lines(lex: &mut Lexicon, section: Section, text: &str, opts: &LoadOptions<'_>, replace: bool) {
    for line in text.lines() {
        add_line(lex, section, line, opts, replace);
    }
}

fn add_line(lex: &mut Lexicon, section: Section, line: &str, opts: &LoadOptions<'_>, replace: bool) {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[key, value] = fields.as_slice() else {
        if !line.trim().is_empty() {
            debug!(target: "so_calc", line, "skipping dictionary line without two fields");
        }
        return;
    };
    let Some(value) = value.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        debug!(target: "so_calc", line, "skipping dictionary line with bad polarity");
        return;
    };

    if !key.contains('_') {
        let mut put = |w: &str| match section {
            Section::Pos(pos) => lex.insert_word(pos, w, value),
            Section::Intensifiers => lex.insert_intensifier(w, value),
        };
        if opts.lists.has_accent(key) {
            put(&opts.lists.strip_accents(key));
        }
        put(key);
        return;
    }
    if !opts.multiword {
        return;
    }

    let expanded = expand_macros(key, &opts.lists.macros);
    let entries = match parse_key(&expanded) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(target: "so_calc", error = %e, "skipping malformed pattern");
            return;
        }
    };
    for (anchor, slots) in entries {
        match section {
            Section::Pos(pos) => match PhraseEntry::new(&slots, value) {
                Some(entry) => lex.insert_phrase(pos, &anchor, entry, replace),
                None => debug!(target: "so_calc", key, "pattern without a single anchor"),
            },
            Section::Intensifiers => match literal_head(&slots) {
                Some(head) => {
                    lex.insert_intensifier_phrase(&anchor, IntensifierPhrase { head, value }, replace)
                }
                None => debug!(target: "so_calc", key, "non-literal intensifier pattern"),
            },
        }
    }
}

/// Words before the anchor, when the pattern is plain words ending in the anchor.
fn literal_head(slots: &[super::Slot]) -> Option<Vec<String>> {
    let (last, head) = slots.split_last()?;
    if !matches!(last, super::Slot::Anchor) {
        return None;
    }
    head.iter()
        .map(|s| s.literal_word().map(str::to_string))
        .collect()
}
