// tests/spanish.rs
// Spanish documents scored against an inline dictionary read with the Spanish word lists.

use so_calc::lexicon::{load_dictionary_str, Section};
use so_calc::{Config, DocumentScore, Language, Lexicon, Pos, SoCalculator, WordLists};

const ADJECTIVES: &str = "bueno 2\npésimo -5\n";
const NOUNS: &str = "desastre -3\n";
const INTENSIFIERS: &str = "muy 0.5\nabsoluto 0.5\n";

fn lexicon() -> Lexicon {
    let lists = WordLists::builtin(Language::Spanish);
    let mut lex = Lexicon::default();
    for (section, text) in [
        (Section::Pos(Pos::Adjective), ADJECTIVES),
        (Section::Pos(Pos::Noun), NOUNS),
        (Section::Intensifiers, INTENSIFIERS),
    ] {
        load_dictionary_str(&mut lex, section, text, &lists, true);
    }
    lex
}

fn spanish_config() -> Config {
    let mut config = Config::default();
    config.language = Language::Spanish;
    config.flags.use_heavy_negation = false;
    config.flags.neg_negation_nullification = false;
    config.output.calculations = true;
    config
}

fn run(config: Config, text: &str) -> DocumentScore {
    SoCalculator::new(config, lexicon()).score_text(text).expect("score")
}

#[test]
fn intensifier_after_the_noun() {
    let score = run(spanish_config(), "un/DI desastre/NC absoluto/AQ ./Fp");
    assert_eq!(score.pos.noun.total, -4.5);
    // the intensifier is consumed, not scored as an adjective
    assert_eq!(score.pos.adjective.count, 0);
    assert_eq!(
        score.trace[0].derivation.to_string(),
        "desastre absoluto -3 X 1.5 (INTENSIFIED) = -4.5"
    );
}

#[test]
fn isimo_suffix_boosts_the_stem() {
    let score = run(spanish_config(), "la/DA película/NC es/VS buenísima/AQ ./Fp");
    assert_eq!(score.pos.adjective.total, 4.0);
    assert_eq!(score.counted, 1);
    assert_eq!(
        score.trace[0].derivation.to_string(),
        "buenísima 2 X 2 (INTENSIFIED) (SUPERLATIVE) = 4"
    );

    let mut config = spanish_config();
    config.flags.use_superlatives = false;
    let score = run(config, "la/DA película/NC es/VS buenísima/AQ ./Fp");
    assert_eq!(score.counted, 0);
}

#[test]
fn subjunctive_mood_is_irrealis() {
    let text = "espero/VMIP que/CS sea/VSSP bueno/AQ";
    let score = run(spanish_config(), text);
    assert_eq!(score.pos.adjective.total, 0.0);
    assert_eq!(score.pos.adjective.count, 1);

    let mut config = spanish_config();
    config.flags.use_subjunctive = false;
    assert_eq!(run(config, text).pos.adjective.total, 2.0);
}

#[test]
fn spanish_negators_and_unaccented_spellings() {
    let score = run(spanish_config(), "no/RN pesimo/AQ");
    assert_eq!(score.pos.adjective.total, -1.0);
    assert!(score.trace[0].negated);
    assert_eq!(score.trace[0].derivation.to_string(), "no pesimo -5 + 4 (NEGATED) = -1");
}
