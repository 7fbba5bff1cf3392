use super::{chop, ends_doubled, last_char, set, AdjectiveForm, Degree, Morphology, WordLists};
use crate::context::ScoringContext;
use crate::lexicon::Lexicon;
use crate::pos::{PerPos, Pos};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct English;

/// Forms of "be" that never start an imperative.
const BE_FORMS: [&str; 5] = ["am", "are", "is", "was", "were"];

impl Morphology for English {
    /// boys -> boy, watches -> watch, flies -> fly
    fn stem_noun(&self, word: &str, lex: &Lexicon) -> String {
        let known = |w: &str| lex.knows(Pos::Noun, w);
        let mut nn = word.to_string();
        if !known(&nn) && nn.chars().count() > 2 && nn.ends_with('s') {
            nn = chop(&nn, 1);
            if !known(&nn) && nn.ends_with('e') {
                nn = chop(&nn, 1);
                if !known(&nn) && nn.ends_with('i') {
                    nn = chop(&nn, 1) + "y";
                }
            }
        }
        nn
    }

    fn stem_verb(&self, word: &str, tag: &str, lex: &Lexicon) -> String {
        let known = |w: &str| lex.knows(Pos::Verb, w);
        let vtype = tag.get(2..).unwrap_or("");
        if vtype.is_empty() || vtype == "P" || word.chars().count() < 4 || known(word) {
            return word.to_string();
        }
        let mut vb = word.to_string();
        match vtype {
            // loved -> love, enjoyed -> enjoy, tried -> try, compelled -> compel
            "D" | "N" => {
                if vb.ends_with('d') {
                    vb = chop(&vb, 1);
                    if !known(&vb) {
                        if vb.ends_with('e') {
                            vb = chop(&vb, 1);
                        }
                        if !known(&vb) {
                            if vb.ends_with('i') {
                                vb = chop(&vb, 1) + "y";
                            } else if ends_doubled(&vb) {
                                vb = chop(&vb, 1);
                            }
                        }
                    }
                }
            }
            // obeying -> obey, stopping -> stop, amusing -> amuse
            "G" => {
                vb = chop(&vb, 3);
                if !known(&vb) {
                    if ends_doubled(&vb) {
                        vb = chop(&vb, 1);
                    } else {
                        vb.push('e');
                    }
                }
            }
            // likes -> like, watches -> watch, flies -> fly
            "Z" => {
                if vb.ends_with('s') {
                    vb = chop(&vb, 1);
                    if !known(&vb) && vb.ends_with('e') {
                        vb = chop(&vb, 1);
                        if !known(&vb) && vb.ends_with('i') {
                            vb = chop(&vb, 1) + "y";
                        }
                    }
                }
            }
            _ => {}
        }
        vb
    }

    fn adverb_to_adjective(&self, word: &str, lex: &Lexicon) -> String {
        let adj = |w: &str| lex.word_polarity(Pos::Adjective, w).is_some();
        if word.chars().count() <= 3 || !word.ends_with("ly") {
            return word.to_string();
        }
        let jj = chop(word, 2); // sharply -> sharp
        if adj(&jj) {
            return jj;
        }
        if adj(&format!("{jj}l")) {
            return format!("{jj}l"); // fully -> full
        }
        if adj(&format!("{jj}le")) {
            return format!("{jj}le"); // simply -> simple
        }
        if jj.ends_with('i') {
            let y = chop(&jj, 1) + "y"; // merrily -> merry
            if adj(&y) {
                return y;
            }
        }
        if jj.chars().count() > 5 && jj.ends_with("al") {
            let base = chop(&jj, 2); // angelically -> angelic
            if adj(&base) {
                return base;
            }
        }
        jj
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
        let suffix = ctx.tag(index).and_then(|t| t.get(2..)).unwrap_or("");
        let prev = index.checked_sub(1).map(|i| ctx.lower(i)).unwrap_or_default();

        let comparative = suffix == "R" || lists.comparatives.contains(&prev);
        let superlative = suffix == "S" || lists.superlatives.contains(&prev);

        if !flags.use_comparatives && comparative {
            return None;
        }
        if !flags.use_superlatives && (superlative || word == "best" || word == "worst") {
            return None;
        }

        let mut lemma = word.to_string();
        let mut boost = 0.0;
        let unknown = lex.word_polarity(Pos::Adjective, word).is_none()
            && !ctx.profile().not_wanted(Pos::Adjective, word);
        if suffix == "R" && unknown {
            lemma = stem_comparative(word, lex);
            if flags.use_intensifiers {
                boost += lex.intensifier("more").unwrap_or(0.0);
            }
        } else if suffix == "S" && unknown {
            lemma = stem_superlative(word, lex);
            if flags.use_intensifiers {
                boost += 1.0;
            }
        }

        if ctx.profile().not_wanted(Pos::Adjective, &lemma) {
            return None;
        }
        // Superlatives need a definite determiner just before them and, like
        // comparatives, must sit in a predicate.
        if superlative
            && (!ctx.within(index.checked_sub(1), &lists.definites, 2)
                || !ctx.is_in_predicate(index))
        {
            return None;
        }
        if comparative && !ctx.is_in_predicate(index) {
            return None;
        }

        let degree = if superlative {
            Degree::Superlative
        } else if comparative {
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

    /// "too" next to punctuation usually means "also"; "well ," is a discourse marker.
    fn skip_adverb(&self, ctx: &ScoringContext<'_>, index: usize, word: &str) -> bool {
        let Some(next) = ctx.doc().get(index + 1).map(|t| t.word.as_str()) else {
            return false;
        };
        (word == "too" && ctx.profile().is_punct(next)) || (word == "well" && next == ",")
    }

    fn starts_imperative(&self, word: &str, tag: &str) -> bool {
        (tag == "VB" || tag == "VBP") && !BE_FORMS.contains(&word.to_lowercase().as_str())
    }

    fn is_predicate_verb(&self, tag: &str) -> bool {
        tag.starts_with("VB") || tag == "AUX" || tag == "AUXG"
    }

    fn corrected_caps_tag(&self, word: &str, tag: &str, lex: &Lexicon) -> Option<String> {
        if tag != "NNP" || word.chars().count() <= 2 {
            return None;
        }
        let lower = word.to_lowercase();
        if lex.knows(Pos::Adjective, &lower) {
            return Some("JJ".into());
        }
        if lex.knows(Pos::Adverb, &lower) {
            return Some("RB".into());
        }
        let (stem, suffix) = if lower.ends_with('s') {
            (self.stem_verb(&lower, "VBZ", lex), "Z")
        } else if lower.ends_with("ing") {
            (self.stem_verb(&lower, "VBG", lex), "G")
        } else if lower.ends_with("ed") {
            (self.stem_verb(&lower, "VBD", lex), "D")
        } else {
            (lower, "")
        };
        lex.knows(Pos::Verb, &stem).then(|| format!("VB{suffix}"))
    }
}

/// abler -> able, bigger -> big, easier -> easy (suffix already removed)
fn stem_degree(jj: String, lex: &Lexicon) -> String {
    let adj = |w: &str| lex.word_polarity(Pos::Adjective, w).is_some();
    if jj.is_empty() || adj(&jj) {
        return jj;
    }
    if adj(&format!("{jj}e")) {
        return format!("{jj}e");
    }
    let shorter = chop(&jj, 1);
    if adj(&shorter) {
        return shorter;
    }
    if last_char(&jj) == Some('i') && adj(&format!("{shorter}y")) {
        return format!("{shorter}y");
    }
    jj
}

fn stem_comparative(word: &str, lex: &Lexicon) -> String {
    match word.strip_suffix("er") {
        Some(stem) => stem_degree(stem.to_string(), lex),
        None => word.to_string(),
    }
}

fn stem_superlative(word: &str, lex: &Lexicon) -> String {
    match word.strip_suffix("est") {
        Some(stem) => stem_degree(stem.to_string(), lex),
        None => word.to_string(),
    }
}

pub(super) fn word_lists() -> WordLists {
    let adj_skipped = set(&[
        "even", "to", "being", "be", "been", "is", "was", "'ve", "have", "had", "do", "did",
        "done", "of", "as", "DT", "PSP$",
    ]);
    let macros: BTreeMap<String, String> = [
        (
            "#NP?#",
            "[PDT]?_[DET|PRP|PRP$|NN|NNP]?_[POS]?_[NN|NNP|JJ]?_[NN|NNP|NNS|NNPS]?",
        ),
        ("#PER?#", "[me|us|her|him]?"),
        ("#give#", "give|gave|given"),
        ("#fall#", "fall|fell|fallen"),
        ("#get#", "get|got|gotten"),
        ("#come#", "come|came"),
        ("#go#", "go|went|gone"),
        ("#show#", "show|shown"),
        ("#make#", "make|made"),
        ("#hang#", "hang|hung"),
        ("#break#", "break|broke|broken"),
        ("#see#", "see|saw|seen"),
        ("#be#", "be|am|are|was|were|been"),
        ("#bring#", "bring|brought"),
        ("#think#", "think|thought"),
        ("#have#", "has|have|had"),
        ("#blow#", "blow|blew"),
        ("#build#", "build|built"),
        ("#do#", "do|did|done"),
        ("#can#", "can|could"),
        ("#grow#", "grow|grew|grown"),
        ("#run#", "run|ran"),
        ("#stand#", "stand|stood"),
        ("#string#", "string|strung"),
        ("#hold#", "hold|held"),
        ("#take#", "take|took|taken"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    WordLists {
        tags: PerPos::new("NN".into(), "VB".into(), "JJ".into(), "RB".into()),
        not_wanted: PerPos::new(
            set(&[]),
            set(&[]),
            set(&[
                "other", "same", "such", "first", "next", "last", "few", "many", "less", "more",
                "least", "most",
            ]),
            set(&[
                "really", "especially", "apparently", "actually", "evidently", "suddenly",
                "completely", "honestly", "basically", "probably", "seemingly", "nearly",
                "highly", "exactly", "equally", "literally", "definitely", "practically",
                "obviously", "immediately", "intentionally", "usually", "particularly",
                "shortly", "clearly", "mildly", "sincerely", "accidentally", "eventually",
                "finally", "personally", "importantly", "specifically", "likely", "absolutely",
                "necessarily", "strongly", "relatively", "comparatively", "entirely",
                "possibly", "generally", "expressly", "ultimately", "originally", "initially",
                "virtually", "technically", "frankly", "seriously", "fairly", "approximately",
                "critically", "continually", "certainly", "regularly", "essentially", "lately",
                "explicitly", "right", "subtly", "lastly", "vocally", "technologically",
                "firstly", "tally", "ideally", "specially", "humanly", "socially", "sexually",
                "preferably", "legally", "hopefully", "largely", "frequently", "factually",
                "typically",
            ]),
        ),
        negators: set(&[
            "not", "no", "n't", "neither", "nor", "nothing", "never", "none", "lack", "lacked",
            "lacking", "lacks", "missing", "without", "absence", "devoid",
        ]),
        punct: set(&[".", ",", ";", "!", "?", ":", ")", "(", "\"", "'", "-"]),
        sent_punct: set(&[".", ";", "!", "?", ":"]),
        skipped: PerPos::new(
            set(&["DT", "JJ", "NN", "of", "have", "has", "come", "with", "include"]),
            set(&["TO", "being", "been", "be"]),
            adj_skipped.clone(),
            set(&["VB", "VBZ", "VBP", "VBG"]),
        ),
        negation_external_skip: adj_skipped,
        comparatives: set(&["less", "more", "as"]),
        superlatives: set(&["most", "least"]),
        definites: set(&["the", "this", "POS", "PRP$"]),
        look_past_words: set(&["as"]),
        look_past_tags: set(&["DT"]),
        macros,
        accents: BTreeMap::new(),
    }
}
