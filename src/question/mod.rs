//! Question data and selection
//!
//! This module provides:
//! - The `Question` record and `Difficulty` scale loaded from the JSON bank
//! - `QuestionBank`: one-shot load of the full question list
//! - `AnswerKey`: sparse model-answer lookup with a placeholder fallback
//! - `pick_random`: uniform selection over a filtered subset

mod bank;
mod picker;

pub use bank::{AnswerKey, Difficulty, Question, QuestionBank, NO_ANSWER_PLACEHOLDER};
pub use picker::{pick_random, CategoryFilter, DifficultyFilter, QuestionFilter};
