use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

#[derive(Debug, PartialEq, Eq)]
pub enum QuizDraw<'a> {
    Picked(&'a Question),
    /// Every candidate has already been asked.
    Exhausted,
    /// Nothing to draw from at all.
    EmptyPool,
}

/// Draws uniformly from the candidates not listed in `previous`.
pub fn select_question<'a, R>(
    candidates: &'a [Question],
    previous: &HashSet<i64>,
    rng: &mut R,
) -> QuizDraw<'a>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return QuizDraw::EmptyPool;
    }
    candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .choose(rng)
        .map_or(QuizDraw::Exhausted, QuizDraw::Picked)
}
