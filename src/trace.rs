//! Derivation traces: how each scored token got its value.
//!
//! Rendered in the calculator's classic one-line form, e.g.
//! `very good 2 X 1.5 (INTENSIFIED) X 1.25 (EXCLAMATION) = 3.75`.

use crate::pos::Pos;
use serde::Serialize;
use std::fmt;

/// Why a step was applied. Renders as the upper-case tag in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Reason {
    Intensified,
    Comparative,
    Superlative,
    Blocked,
    Negated,
    Capitalized,
    Exclamation,
    Highlighted,
    Question,
    Imperative,
    Quotes,
    Irrealis,
    #[serde(rename = "INT_WEIGHT")]
    IntWeight,
    Repeated,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Negative,
    Weighted,
}

impl Reason {
    pub fn for_pos(pos: Pos) -> Self {
        match pos {
            Pos::Noun => Reason::Noun,
            Pos::Verb => Reason::Verb,
            Pos::Adjective => Reason::Adjective,
            Pos::Adverb => Reason::Adverb,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Reason::Intensified => "INTENSIFIED",
            Reason::Comparative => "COMPARATIVE",
            Reason::Superlative => "SUPERLATIVE",
            Reason::Blocked => "BLOCKED",
            Reason::Negated => "NEGATED",
            Reason::Capitalized => "CAPITALIZED",
            Reason::Exclamation => "EXCLAMATION",
            Reason::Highlighted => "HIGHLIGHTED",
            Reason::Question => "QUESTION",
            Reason::Imperative => "IMPERATIVE",
            Reason::Quotes => "QUOTES",
            Reason::Irrealis => "IRREALIS",
            Reason::IntWeight => "INT_WEIGHT",
            Reason::Repeated => "REPEATED",
            Reason::Noun => Pos::Noun.label(),
            Reason::Verb => Pos::Verb.label(),
            Reason::Adjective => Pos::Adjective.label(),
            Reason::Adverb => Pos::Adverb.label(),
            Reason::Negative => "NEGATIVE",
            Reason::Weighted => "WEIGHTED",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.tag())
    }
}

/// One arithmetic step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Times { factor: f64, reason: Reason },
    /// Repetition decay: divide by the running count.
    Per { count: u32 },
    /// Negation shift; `amount` is signed.
    Shift { amount: f64 },
    /// A label with no arithmetic of its own.
    Note { reason: Reason },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Times { factor, reason } => write!(f, "X {factor} {reason}"),
            Step::Per { count } => write!(f, "X 1/{count} {}", Reason::Repeated),
            Step::Shift { amount } if *amount < 0.0 => {
                write!(f, "- {} {}", -amount, Reason::Negated)
            }
            Step::Shift { amount } => write!(f, "+ {amount} {}", Reason::Negated),
            Step::Note { reason } => write!(f, "{reason}"),
        }
    }
}

/// Words involved, starting value, steps and final value of one token.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Derivation {
    pub words: Vec<String>,
    pub base: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    pub result: f64,
}

impl Derivation {
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn times(&mut self, factor: f64, reason: Reason) {
        self.push(Step::Times { factor, reason });
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in &self.words {
            write!(f, "{w} ")?;
        }
        write!(f, "{}", self.base)?;
        for s in &self.steps {
            write!(f, " {s}")?;
        }
        write!(f, " = {}", self.result)
    }
}
