//! The pool of candidate questions a game is drawn from.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

use super::error::LadderError;
use super::types::Question;

/// Every question available to new games.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    /// Builds a pool, dropping questions whose prompt repeats an earlier one.
    #[instrument(skip(questions), fields(count = questions.len()))]
    pub fn new(questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(questions.len());
        for question in questions {
            if seen.insert(question.prompt().trim().to_lowercase()) {
                unique.push(question);
            } else {
                warn!(prompt = %question.prompt(), "Dropping duplicate question");
            }
        }
        debug!(unique = unique.len(), "Question pool ready");
        Self { questions: unique }
    }

    /// Number of distinct questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the pool holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions in load order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draws `n` distinct questions in random order.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InsufficientQuestions`] if the pool holds fewer than `n`.
    #[instrument(skip(self, rng), fields(available = self.questions.len()))]
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, LadderError> {
        if self.questions.len() < n {
            warn!(required = n, "Not enough questions to sample");
            return Err(LadderError::InsufficientQuestions {
                available: self.questions.len(),
                required: n,
            });
        }

        let mut candidates: Vec<&Question> = self.questions.iter().collect();
        candidates.as_mut_slice().shuffle(rng);
        Ok(candidates.into_iter().take(n).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ladder::types::{OptionLabel, QuestionOptions};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(i: usize) -> Question {
        Question::new(
            format!("Question {i}"),
            QuestionOptions::new(
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ),
            OptionLabel::A,
        )
    }

    #[test]
    fn test_duplicates_dropped() {
        let pool = QuestionPool::new(vec![question(1), question(2), question(1)]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_sample_is_distinct() {
        let pool = QuestionPool::new((0..20).map(question).collect());
        let mut rng = StdRng::seed_from_u64(3);
        let drawn = pool.sample(11, &mut rng).unwrap();
        let prompts: HashSet<_> = drawn.iter().map(|q| q.prompt().clone()).collect();
        assert_eq!(drawn.len(), 11);
        assert_eq!(prompts.len(), 11);
    }

    #[test]
    fn test_sample_rejects_small_pool() {
        let pool = QuestionPool::new((0..10).map(question).collect());
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            pool.sample(11, &mut rng),
            Err(LadderError::InsufficientQuestions {
                available: 10,
                required: 11
            })
        );
    }
}
