use rand::seq::SliceRandom;

use super::bank::{Difficulty, Question};

/// Category filter: either a specific category or the "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => question.category == *c,
        }
    }
}

/// Difficulty filter: either a specific level or the "all" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Level(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Level(d) => question.difficulty == *d,
        }
    }
}

/// The (category, difficulty) pair narrowing the question pool
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionFilter {
    pub category: CategoryFilter,
    pub difficulty: DifficultyFilter,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        self.category.matches(question) && self.difficulty.matches(question)
    }
}

/// Pick one question uniformly at random from the subset matching the filter.
///
/// Returns `None` when no question matches. Pure apart from the RNG draw; no
/// ordering guarantee across calls.
pub fn pick_random<'a>(questions: &'a [Question], filter: &QuestionFilter) -> Option<&'a Question> {
    let filtered: Vec<&Question> = questions.iter().filter(|q| filter.matches(q)).collect();
    filtered.choose(&mut rand::thread_rng()).copied()
}
