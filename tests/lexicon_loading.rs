// tests/lexicon_loading.rs
// Dictionaries read from disk through the configuration.

use so_calc::{Config, Pos, SoCalculator};
use std::fs;
use std::path::Path;

fn write_dictionaries(dir: &Path) {
    let files = [
        ("adj_dictionary1.11.txt", "good 2\ngreat 3\nbad -2\n"),
        ("adv_dictionary1.11.txt", "horribly -4\n"),
        ("noun_dictionary1.11.txt", "mess -3\n"),
        ("verb_dictionary1.11.txt", "love 3\n(show)_off -2\n"),
        ("int_dictionary1.11.txt", "very 0.5\na_little -0.5\n"),
    ];
    for (name, text) in files {
        fs::write(dir.join(name), text).unwrap();
    }
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.dictionaries.dir = dir.to_path_buf();
    config.flags.use_heavy_negation = false;
    config
}

#[test]
fn loads_every_dictionary_from_the_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_dictionaries(dir.path());
    let calc = SoCalculator::from_config(config_in(dir.path())).unwrap();
    let lex = calc.lexicon();
    assert_eq!(lex.word_polarity(Pos::Noun, "mess"), Some(-3.0));
    assert!(lex.has_phrases(Pos::Verb, "show"));
    assert_eq!(lex.intensifier_phrases("little").len(), 1);
    assert_eq!(calc.score_text("very/RB good/JJ").unwrap().so, 3.0);
}

#[test]
fn missing_dictionary_is_an_error_naming_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_dictionaries(dir.path());
    fs::remove_file(dir.path().join("verb_dictionary1.11.txt")).unwrap();
    let err = SoCalculator::from_config(config_in(dir.path())).unwrap_err();
    assert!(format!("{err:#}").contains("verb_dictionary1.11.txt"), "{err:#}");
}

#[test]
fn extra_dictionary_overrides_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    write_dictionaries(dir.path());
    fs::write(dir.path().join("extra.txt"), "adjectives\ngood 4\nnouns\nfiasco -5\n").unwrap();

    let mut config = config_in(dir.path());
    config.dictionaries.extra = Some("extra.txt".into());
    let calc = SoCalculator::from_config(config.clone()).unwrap();
    assert_eq!(calc.lexicon().word_polarity(Pos::Adjective, "good"), Some(2.0));

    config.flags.use_extra_dict = true;
    let calc = SoCalculator::from_config(config).unwrap();
    assert_eq!(calc.lexicon().word_polarity(Pos::Adjective, "good"), Some(4.0));
    assert_eq!(calc.lexicon().word_polarity(Pos::Noun, "fiasco"), Some(-5.0));
}

#[test]
fn simple_so_collapses_values() {
    let dir = tempfile::tempdir().unwrap();
    write_dictionaries(dir.path());
    let mut config = config_in(dir.path());
    config.flags.simple_so = true;
    let calc = SoCalculator::from_config(config).unwrap();
    assert_eq!(calc.lexicon().word_polarity(Pos::Adjective, "great"), Some(2.0));
    assert_eq!(calc.lexicon().word_polarity(Pos::Noun, "mess"), Some(-2.0));
    assert_eq!(calc.lexicon().intensifier("very"), Some(0.5));
}

#[test]
fn learned_adverbs_are_saved_and_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    write_dictionaries(dir.path());
    let mut config = config_in(dir.path());
    config.flags.adv_learning = true;

    let calc = SoCalculator::from_config(config.clone()).unwrap();
    let score = calc.score_text("it/PRP ended/VBD greatly/RB").unwrap();
    assert_eq!(score.learned_adverbs.get("greatly"), Some(&3.0));
    calc.save_learned_adverbs(&score).unwrap();

    let adverbs = fs::read_to_string(dir.path().join("adv_dictionary1.11.txt")).unwrap();
    assert!(adverbs.ends_with("greatly\t3\n"), "{adverbs:?}");
    let reloaded = SoCalculator::from_config(config).unwrap();
    assert_eq!(reloaded.lexicon().word_polarity(Pos::Adverb, "greatly"), Some(3.0));
}
