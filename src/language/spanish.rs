use super::{chop, set, AdjectiveForm, Degree, Morphology, WordLists};
use crate::config::Flags;
use crate::context::ScoringContext;
use crate::lexicon::Lexicon;
use crate::pos::{PerPos, Pos};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct Spanish;

const SUPERLATIVE_SUFFIXES: [&str; 4] = ["ísima", "ísimo", "isima", "isimo"];
/// Adjectives that read as superlatives after a definite article ("la mejor").
const INHERENT_SUPERLATIVES: [&str; 2] = ["mejor", "pésimo"];

impl Spanish {
    /// buenos -> bueno, buena -> bueno, hermanas -> hermano
    fn stem_gender_number(&self, word: &str, pos: Pos, lex: &Lexicon) -> String {
        let mut w = word.to_string();
        if lex.word_polarity(pos, &w).is_none() && w.chars().count() > 2 && w.ends_with('s') {
            w = chop(&w, 1);
        }
        if !lex.knows(pos, &w) && w.chars().count() > 1 {
            if w.ends_with('a') {
                w = chop(&w, 1) + "o";
            } else if w.ends_with('e') {
                w = chop(&w, 1);
            }
        }
        w
    }

    /// buenísimo -> bueno, riquísima -> rico, larguísimo -> largo
    fn stem_superlative(&self, word: &str, lex: &Lexicon) -> String {
        if lex.word_polarity(Pos::Adjective, word).is_some()
            || word.chars().count() <= 6
            || !SUPERLATIVE_SUFFIXES.iter().any(|s| word.ends_with(s))
        {
            return word.to_string();
        }
        let stem = chop(word, 5);
        if lex.word_polarity(Pos::Adjective, &stem).is_some() {
            return stem;
        }
        if stem.ends_with("qu") {
            chop(&stem, 2) + "co"
        } else if stem.ends_with("gu") {
            chop(&stem, 1) + "o"
        } else {
            stem + "o"
        }
    }
}

impl Morphology for Spanish {
    fn stem_noun(&self, word: &str, lex: &Lexicon) -> String {
        self.stem_gender_number(word, Pos::Noun, lex)
    }

    /// Spanish verbs are looked up as tagged.
    fn stem_verb(&self, word: &str, _tag: &str, _lex: &Lexicon) -> String {
        word.to_string()
    }

    fn adverb_to_adjective(&self, word: &str, lex: &Lexicon) -> String {
        if word.chars().count() <= 6 || !word.ends_with("mente") {
            return word.to_string();
        }
        let aq = chop(word, 5); // felizmente -> feliz
        if lex.word_polarity(Pos::Adjective, &aq).is_none() && aq.ends_with('a') {
            return chop(&aq, 1) + "o"; // nuevamente -> nuevo
        }
        aq
    }

    fn adjective_form(
        &self,
        ctx: &ScoringContext<'_>,
        index: usize,
        word: &str,
    ) -> Option<AdjectiveForm> {
        let lists = &ctx.profile().lists;
        let flags = &ctx.config().flags;
        let lex = ctx.lexicon();
        let mut lemma = self.stem_gender_number(word, Pos::Adjective, lex);

        let prev_comparative = index
            .checked_sub(1)
            .is_some_and(|i| lists.comparatives.contains(&ctx.lower(i)));
        let article_two_back = index
            .checked_sub(2)
            .and_then(|i| ctx.tag(i))
            .is_some_and(|t| t == "DA");
        let superlative = article_two_back
            && (prev_comparative || INHERENT_SUPERLATIVES.contains(&lemma.as_str()));

        if !flags.use_comparatives && prev_comparative {
            return None;
        }
        if !flags.use_superlatives && superlative {
            return None;
        }

        let mut boost = 0.0;
        let mut suffixed = false;
        if lex.word_polarity(Pos::Adjective, &lemma).is_none()
            && !ctx.profile().not_wanted(Pos::Adjective, &lemma)
        {
            let stemmed = self.stem_superlative(&lemma, lex);
            if flags.use_intensifiers && flags.use_superlatives && stemmed != lemma {
                lemma = stemmed;
                boost += 1.0;
                suffixed = true;
            }
        }
        if ctx.profile().not_wanted(Pos::Adjective, &lemma) {
            return None;
        }

        let degree = if superlative || suffixed {
            Degree::Superlative
        } else if prev_comparative {
            Degree::Comparative
        } else {
            Degree::Positive
        };
        Some(AdjectiveForm {
            lemma,
            degree,
            boost,
        })
    }

    /// Four-character verb tags: mood at position 2, tense at position 3.
    fn is_irrealis_tag(&self, tag: &str, flags: &Flags) -> bool {
        let t: Vec<char> = tag.chars().collect();
        t.len() == 4
            && t[0] == 'V'
            && ((t[2] == 'M' && flags.use_imperative)
                || (t[2] == 'S' && flags.use_subjunctive)
                || (t[3] == 'C' && flags.use_conditional))
    }

    fn is_predicate_verb(&self, tag: &str) -> bool {
        tag.starts_with('V')
    }

    fn post_nominal_intensifiers(&self) -> bool {
        true
    }

    fn corrected_caps_tag(&self, word: &str, tag: &str, lex: &Lexicon) -> Option<String> {
        if tag != "NP" || word.chars().count() <= 2 {
            return None;
        }
        let lower = word.to_lowercase();
        let stem = self.stem_gender_number(&lower, Pos::Adjective, lex);
        if lex.word_polarity(Pos::Adjective, &stem).is_some() || lex.has_phrases(Pos::Adjective, &lower)
        {
            return Some("AQ".into());
        }
        let adj = self.adverb_to_adjective(&lower, lex);
        lex.word_polarity(Pos::Adjective, &adj)
            .is_some()
            .then(|| "RG".into())
    }
}

/// otro -> otra, otros, otras
fn with_inflections(words: &[&str]) -> HashSet<String> {
    let mut out = set(words);
    for w in words {
        out.insert(chop(w, 1) + "a");
        out.insert(chop(w, 2) + "os");
        out.insert(chop(w, 2) + "as");
    }
    out
}

pub(super) fn word_lists() -> WordLists {
    let accents: BTreeMap<String, String> = [
        ("í", "i"),
        ("ó", "o"),
        ("ú", "u"),
        ("é", "e"),
        ("á", "a"),
        ("ñ", "n"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    WordLists {
        tags: PerPos::new("NC".into(), "VM".into(), "AQ".into(), "RG".into()),
        not_wanted: PerPos::new(
            set(&[]),
            set(&["haber", "estar"]),
            with_inflections(&[
                "otro", "mio", "tuyo", "suyo", "nuestro", "vuestro", "mismo", "primero",
                "segundo", "último",
            ]),
            set(&[
                "básicamente",
                "claramente",
                "ampliamente",
                "atentamente",
                "completamente",
            ]),
        ),
        negators: set(&[
            "no", "ni", "nunca", "jamás", "nada", "nadie", "ninguno", "ningunos", "ninguna",
            "ningunas", "faltar", "falta", "sin",
        ]),
        punct: set(&[".", ",", ";", "!", "?", ":", ")", "(", "\"", "'", "-", "¡", "¿"]),
        sent_punct: set(&[".", ";", "!", "?", ":", "¡", "¿"]),
        skipped: PerPos::new(
            set(&[
                "DP", "DD", "DI", "DA", "AQ", "AO", "de", "tener", "hacer", "estar", "con",
                "incluso",
            ]),
            set(&["haber", "estar", "PP"]),
            set(&[
                "a", "estar", "haber", "hacer", "de", "como", "NC", "PP", "DP", "DD", "DI", "DA",
                "RG",
            ]),
            set(&["VM", "VA", "VS"]),
        ),
        negation_external_skip: HashSet::new(),
        comparatives: set(&["más", "menos", "como"]),
        superlatives: HashSet::new(),
        definites: set(&[
            "el", "la", "los", "las", "este", "esta", "estos", "estas", "de", "DP",
        ]),
        look_past_words: set(&["tan"]),
        look_past_tags: set(&["DA", "DI"]),
        macros: [(
            "#NP?#".to_string(),
            "[DI|DP|DA]?_[AQ|AC]?_[NC|NP]?_[AQ]?".to_string(),
        )]
        .into_iter()
        .collect(),
        accents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn lex() -> Lexicon {
        let mut l = Lexicon::default();
        for w in ["bueno", "rico", "largo", "feliz", "nuevo"] {
            l.insert_word(Pos::Adjective, w, 2.0);
        }
        l.insert_word(Pos::Noun, "hermano", 1.0);
        l.insert_word(Pos::Noun, "actor", 1.0);
        l
    }

    #[test]
    fn gender_and_number_stemming() {
        let l = lex();
        let es = Spanish;
        assert_eq!(es.stem_noun("hermanas", &l), "hermano");
        assert_eq!(es.stem_noun("actores", &l), "actor");
        assert_eq!(es.stem_gender_number("buenas", Pos::Adjective, &l), "bueno");
    }

    #[test]
    fn superlative_suffixes() {
        let l = lex();
        let es = Spanish;
        assert_eq!(es.stem_superlative("buenísimo", &l), "bueno");
        assert_eq!(es.stem_superlative("riquísimo", &l), "rico");
        assert_eq!(es.stem_superlative("larguísimo", &l), "largo");
        assert_eq!(es.stem_superlative("bueno", &l), "bueno");
    }

    #[test]
    fn mente_adverbs() {
        let l = lex();
        assert_eq!(Spanish.adverb_to_adjective("felizmente", &l), "feliz");
        assert_eq!(Spanish.adverb_to_adjective("nuevamente", &l), "nuevo");
        assert_eq!(Spanish.adverb_to_adjective("mente", &l), "mente");
    }

    #[test]
    fn irrealis_tags_follow_flags() {
        let mut flags = Config::default().flags;
        flags.use_subjunctive = true;
        flags.use_conditional = true;
        flags.use_imperative = false;
        assert!(Spanish.is_irrealis_tag("VMSP", &flags));
        assert!(!Spanish.is_irrealis_tag("VMMP", &flags));
        assert!(Spanish.is_irrealis_tag("VMIC", &flags));
        assert!(!Spanish.is_irrealis_tag("VMIP3S0", &flags));
        flags.use_subjunctive = false;
        assert!(!Spanish.is_irrealis_tag("VMSP", &flags));
    }

    #[test]
    fn unwanted_adjectives_include_inflections() {
        let lists = word_lists();
        for w in ["otra", "otros", "últimas", "mismo"] {
            assert!(lists.not_wanted.adjective.contains(w), "{w}");
        }
    }
}
