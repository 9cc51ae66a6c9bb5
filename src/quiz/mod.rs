pub mod catalog;
pub mod generator;

use std::fmt;

use thiserror::Error;

use catalog::Fit;
use generator::{RandomSource, QUESTIONS_PER_GAME};

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("catalog has {available} fits, a game needs at least {required}")]
    InsufficientCatalog { available: usize, required: usize },

    #[error("cannot {action} while the game is {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("{selected:?} is not one of the offered options")]
    UnofferedAnswer { selected: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::InProgress => "in progress",
            Phase::GameOver => "over",
        };
        f.write_str(name)
    }
}

/// How strictly a submitted answer is checked against the offered options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerPolicy {
    /// Any text is scored, unknown names simply count as wrong.
    #[default]
    Lenient,
    /// Only names shown on the current question are accepted.
    OfferedOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub fit: Fit,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    pub fn new(fit: Fit, options: Vec<String>) -> Self {
        let correct_answer = fit.name.clone();
        Self {
            fit,
            options,
            correct_answer,
        }
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_answer
    }

    pub fn offers(&self, name: &str) -> bool {
        self.options.iter().any(|o| o == name)
    }

    /// The wrong options, in on-screen order.
    pub fn distractors(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(move |o| *o != self.correct_answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEvent {
    pub question: Question,
    pub selected: String,
    pub correct: bool,
}

/// One visitor's playthrough.
///
/// `start` deals a fresh set of questions, every `submit` answers the current
/// one, and the third answer ends the game. The caller owns the value, so
/// there is one per chat and nothing is shared between them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    questions: Vec<Question>,
    current_question: usize,
    score: u32,
    answers: Vec<AnswerEvent>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deals a new game, throwing away whatever was there before.
    pub fn start<R>(&mut self, catalog: &[Fit], rng: &mut R) -> Result<(), QuizError>
    where
        R: RandomSource + ?Sized,
    {
        self.reset();
        self.questions = generator::generate(catalog, rng)?;
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Scores `selected` against the current question and moves on.
    ///
    /// Any text is accepted, a name that was never offered is just wrong.
    pub fn submit(&mut self, selected: &str) -> Result<&AnswerEvent, QuizError> {
        let question = match (self.phase, self.questions.get(self.current_question)) {
            (Phase::InProgress, Some(question)) => question.clone(),
            _ => {
                return Err(QuizError::InvalidTransition {
                    action: "submit an answer",
                    phase: self.phase,
                })
            }
        };

        let correct = question.is_correct(selected);
        if correct {
            self.score += 1;
        }
        log::debug!(
            "Answer {} to question {}: {:?} ({})",
            self.answers.len() + 1,
            self.current_question + 1,
            selected,
            if correct { "correct" } else { "wrong" }
        );
        self.answers.push(AnswerEvent {
            question,
            selected: selected.to_string(),
            correct,
        });

        if self.current_question + 1 < QUESTIONS_PER_GAME {
            self.current_question += 1;
        } else {
            self.phase = Phase::GameOver;
        }

        // Just pushed
        Ok(&self.answers[self.answers.len() - 1])
    }

    /// Like [`Session::submit`], but refuses names the current question did not offer.
    /// A refused answer leaves the session untouched.
    pub fn submit_offered(&mut self, selected: &str) -> Result<&AnswerEvent, QuizError> {
        if let Some(question) = self.current_question() {
            if !question.offers(selected) {
                return Err(QuizError::UnofferedAnswer {
                    selected: selected.to_string(),
                });
            }
        }
        self.submit(selected)
    }

    pub fn submit_with(
        &mut self,
        policy: AnswerPolicy,
        selected: &str,
    ) -> Result<&AnswerEvent, QuizError> {
        match policy {
            AnswerPolicy::Lenient => self.submit(selected),
            AnswerPolicy::OfferedOnly => self.submit_offered(selected),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_question
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerEvent] {
        &self.answers
    }

    /// The question waiting for an answer, if the game is running.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress => self.questions.get(self.current_question),
            _ => None,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.phase == Phase::GameOver && self.score as usize == QUESTIONS_PER_GAME
    }

    /// Wrong answers with their 1-based question number.
    pub fn missed(&self) -> impl Iterator<Item = (usize, &AnswerEvent)> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.correct)
            .map(|(i, a)| (i + 1, a))
    }
}
