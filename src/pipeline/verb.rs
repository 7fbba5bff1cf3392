use super::{lookup, Candidate};
use crate::context::ScoringContext;
use crate::pos::Pos;

pub(super) fn resolve(ctx: &mut ScoringContext<'_>, index: usize, word: &str) -> Option<Candidate> {
    let lemma = ctx
        .profile()
        .morphology()
        .stem_verb(word, ctx.raw_tag(index), ctx.lexicon());
    if ctx.profile().not_wanted(Pos::Verb, &lemma) {
        return None;
    }
    let base = lookup(ctx, Pos::Verb, index, &lemma)?;
    Some(Candidate::new(Pos::Verb, index, lemma, base))
}
