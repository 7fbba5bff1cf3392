use super::{lookup, Candidate};
use crate::context::ScoringContext;
use crate::pos::Pos;

/// Degree handling and its policy gates live in the language's morphology.
/// A matched phrase brings its own intensifier in place of the degree boost.
pub(super) fn resolve(ctx: &mut ScoringContext<'_>, index: usize, word: &str) -> Option<Candidate> {
    let form = ctx.profile().morphology().adjective_form(ctx, index, word)?;
    let base = lookup(ctx, Pos::Adjective, index, &form.lemma)?;
    let phrase_intensifier = base.intensifier;
    let mut candidate = Candidate::new(Pos::Adjective, index, form.lemma, base);
    candidate.intensifier = phrase_intensifier.unwrap_or(form.boost);
    candidate.degree = form.degree;
    Some(candidate)
}
