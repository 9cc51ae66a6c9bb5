use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::catalog::Fit;
use crate::quiz::{Question, QuizError};

pub const QUESTIONS_PER_GAME: usize = 3;
pub const DISTRACTORS_PER_QUESTION: usize = 2;

/// Randomness needed to build a game.
///
/// Any [`rand::Rng`] works; tests can plug in a scripted source to pin down
/// exactly which fits and options come out.
pub trait RandomSource {
    /// `amount` distinct indices in `0..length`, in draw order.
    fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize>;

    fn shuffle_names(&mut self, names: &mut [String]);
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(self, length, amount).into_vec()
    }

    fn shuffle_names(&mut self, names: &mut [String]) {
        names.shuffle(self);
    }
}

/// Builds the three questions of a game.
///
/// Picks three different fits, then gives each one up to two wrong options.
/// A name is never offered as a wrong option twice in the same game, and none
/// of the three picked fits is ever used as a wrong option.
pub fn generate<R>(catalog: &[Fit], rng: &mut R) -> Result<Vec<Question>, QuizError>
where
    R: RandomSource + ?Sized,
{
    if catalog.len() < QUESTIONS_PER_GAME {
        return Err(QuizError::InsufficientCatalog {
            available: catalog.len(),
            required: QUESTIONS_PER_GAME,
        });
    }

    let selected = rng
        .sample_indices(catalog.len(), QUESTIONS_PER_GAME)
        .into_iter()
        .map(|i| &catalog[i])
        .collect::<Vec<_>>();
    let selected_names = selected
        .iter()
        .map(|f| f.name.as_str())
        .collect::<HashSet<_>>();

    let mut used_as_distractor: HashSet<&str> = HashSet::new();
    let mut questions = Vec::with_capacity(QUESTIONS_PER_GAME);

    for fit in selected {
        let pool = catalog
            .iter()
            .filter(|f| !selected_names.contains(f.name.as_str()))
            .filter(|f| !used_as_distractor.contains(f.name.as_str()))
            .collect::<Vec<_>>();

        let amount = DISTRACTORS_PER_QUESTION.min(pool.len());
        let distractors = rng
            .sample_indices(pool.len(), amount)
            .into_iter()
            .map(|i| pool[i])
            .collect::<Vec<_>>();

        // Correct one first, the shuffle decides where it ends up on screen
        let mut options = Vec::with_capacity(1 + distractors.len());
        options.push(fit.name.clone());
        for distractor in distractors {
            used_as_distractor.insert(distractor.name.as_str());
            options.push(distractor.name.clone());
        }
        rng.shuffle_names(&mut options);

        questions.push(Question::new(fit.clone(), options));
    }

    return Ok(questions);
}
