use super::{lookup, Candidate};
use crate::context::ScoringContext;
use crate::pos::Pos;

pub(super) fn resolve(ctx: &mut ScoringContext<'_>, index: usize, word: &str) -> Option<Candidate> {
    let lemma = ctx.profile().morphology().stem_noun(word, ctx.lexicon());
    if ctx.profile().not_wanted(Pos::Noun, &lemma) {
        return None;
    }
    let base = lookup(ctx, Pos::Noun, index, &lemma)?;
    Some(Candidate::new(Pos::Noun, index, lemma, base))
}
