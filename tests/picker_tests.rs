// Tests for uniform random question selection with category/difficulty
// filters.

mod common;

use common::question;
use mensetsu::question::{
    pick_random, CategoryFilter, Difficulty, DifficultyFilter, QuestionFilter,
};
use std::collections::HashMap;

fn sample_questions() -> Vec<mensetsu::Question> {
    vec![
        question(1, "自己紹介", Difficulty::Easy),
        question(2, "自己紹介", Difficulty::Medium),
        question(3, "研究計画", Difficulty::Hard),
        question(4, "研究計画", Difficulty::Medium),
        question(5, "専門知識", Difficulty::Hard),
    ]
}

#[test]
fn picks_member_of_filtered_subset() {
    let questions = sample_questions();
    let filter = QuestionFilter {
        category: CategoryFilter::Category("研究計画".to_string()),
        difficulty: DifficultyFilter::All,
    };

    for _ in 0..50 {
        let picked = pick_random(&questions, &filter).expect("subset is non-empty");
        assert_eq!(picked.category, "研究計画");
        assert!(picked.id == 3 || picked.id == 4);
    }
}

#[test]
fn both_filter_dimensions_apply() {
    let questions = sample_questions();
    let filter = QuestionFilter {
        category: CategoryFilter::Category("研究計画".to_string()),
        difficulty: DifficultyFilter::Level(Difficulty::Hard),
    };

    for _ in 0..20 {
        let picked = pick_random(&questions, &filter).expect("one question matches");
        assert_eq!(picked.id, 3);
    }
}

#[test]
fn all_sentinel_matches_everything() {
    let questions = sample_questions();
    let filter = QuestionFilter::default();

    let picked = pick_random(&questions, &filter).expect("full set is non-empty");
    assert!(questions.iter().any(|q| q.id == picked.id));
}

#[test]
fn empty_subset_yields_none() {
    let questions = sample_questions();
    let filter = QuestionFilter {
        category: CategoryFilter::Category("存在しないカテゴリ".to_string()),
        difficulty: DifficultyFilter::All,
    };

    assert!(pick_random(&questions, &filter).is_none());
    assert!(pick_random(&[], &QuestionFilter::default()).is_none());
}

#[test]
fn selection_is_roughly_uniform_over_three_questions() {
    let questions = vec![
        question(1, "自己紹介", Difficulty::Easy),
        question(2, "自己紹介", Difficulty::Medium),
        question(3, "自己紹介", Difficulty::Hard),
    ];
    let filter = QuestionFilter::default();

    let trials = 3000;
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for _ in 0..trials {
        let picked = pick_random(&questions, &filter).expect("non-empty");
        *counts.entry(picked.id).or_default() += 1;
    }

    // Expected ~1000 each; allow a generous band so the test never flakes
    for id in [1, 2, 3] {
        let count = counts.get(&id).copied().unwrap_or(0);
        assert!(
            (700..=1300).contains(&count),
            "question {} picked {} times out of {}, expected ~{}",
            id,
            count,
            trials,
            trials / 3
        );
    }
}
