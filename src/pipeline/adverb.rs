use super::{lookup, Candidate};
use crate::context::ScoringContext;
use crate::pos::Pos;

pub(super) fn resolve(ctx: &mut ScoringContext<'_>, index: usize, word: &str) -> Option<Candidate> {
    let profile = ctx.profile();
    if ctx.config().flags.adv_learning
        && ctx.adverb_polarity(word).is_none()
        && !profile.not_wanted(Pos::Adverb, word)
    {
        learn(ctx, word);
    }
    if profile.not_wanted(Pos::Adverb, word) || profile.morphology().skip_adverb(ctx, index, word) {
        return None;
    }
    let base = lookup(ctx, Pos::Adverb, index, word)?;
    Some(Candidate::new(Pos::Adverb, index, word.to_string(), base))
}

/// An unknown adverb takes the polarity of its adjective ("horribly" from "horrible").
fn learn(ctx: &mut ScoringContext<'_>, adverb: &str) {
    let lexicon = ctx.lexicon();
    let adjective = ctx.profile().morphology().adverb_to_adjective(adverb, lexicon);
    if let Some(polarity) = lexicon.word_polarity(Pos::Adjective, &adjective) {
        ctx.learn_adverb(adverb, polarity);
    }
}
