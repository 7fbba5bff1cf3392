// src/lib.rs
// Public library surface: the scoring engine plus its building blocks.

pub mod config;
pub mod context;
pub mod debug;
pub mod document;
pub mod engine;
pub mod language;
pub mod lexicon;
pub mod matcher;
pub mod pipeline;
pub mod pos;
pub mod trace;

// ---- Re-exports for stable public API ----
pub use crate::config::Config;
pub use crate::document::{Document, Token};
pub use crate::engine::{DocumentScore, PosSummary, SentenceScore, SoCalculator, TokenTrace};
pub use crate::language::{Language, LanguageProfile, WordLists};
pub use crate::lexicon::Lexicon;
pub use crate::pos::{PerPos, Pos};
pub use crate::trace::{Derivation, Reason, Step};
