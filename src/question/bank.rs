use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Difficulty scale used by the question data set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 易 (easy)
    #[serde(rename = "易")]
    Easy,
    /// 中 (medium)
    #[serde(rename = "中")]
    Medium,
    /// 難 (hard)
    #[serde(rename = "難")]
    Hard,
}

impl Difficulty {
    /// Label as it appears in the data set
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "易",
            Difficulty::Medium => "中",
            Difficulty::Hard => "難",
        }
    }
}

/// A single interview question, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique question ID
    pub id: u32,

    /// Category (e.g. "自己紹介", "研究計画")
    pub category: String,

    /// Difficulty level
    pub difficulty: Difficulty,

    /// Question text
    pub question: String,
}

/// The full question list, loaded once at startup
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load the question bank from a JSON array file.
    ///
    /// A load failure blocks the rest of the application; callers surface the
    /// error and offer a manual reload, there is no automatic retry.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading question bank: {}", path.display());

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question data: {}", path.display()))?;

        let questions: Vec<Question> =
            serde_json::from_str(&raw).context("Failed to parse question data")?;

        info!("Question bank loaded: {} questions", questions.len());

        Ok(Self { questions })
    }

    /// Build a bank from an in-memory list
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Unique category names, in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for q in &self.questions {
            if !seen.contains(&q.category) {
                seen.push(q.category.clone());
            }
        }
        seen
    }
}

/// Message shown when no model answer is registered for a question
pub const NO_ANSWER_PLACEHOLDER: &str =
    "この質問の回答例はまだ登録されていません。自分の言葉で考えてみましょう。";

/// Sparse mapping from question ID to a model answer.
///
/// Most questions have no registered answer; `lookup` falls back to a fixed
/// placeholder for those.
#[derive(Debug, Clone, Default)]
pub struct AnswerKey {
    answers: HashMap<u32, String>,
}

impl AnswerKey {
    /// The answer set shipped with the original question data
    pub fn builtin() -> Self {
        let mut answers = HashMap::new();
        answers.insert(
            1,
            "はじめまして、私はリキンゼンと申します。中国から来ました。2023年6月に太原師範学院の経済学専攻を卒業し、2025年4月より貴大学院の修士課程に進学を希望しております。大学院に入って、経済学専門知識を深めていくだけでなく、自分自身の思考力や問題解決能力などを鍛えて、より一層成長できるように頑張ります。よろしくお願いします。"
                .to_string(),
        );
        answers.insert(
            21,
            "「双減政策」を研究対象に選んだ理由は、教育の負担を減らし、教育の機会を平等にするこの政策が、家庭の教育費や社会の差に大きな影響を与えると考えたからです。特に、教育の有料化が進む中で、家庭の経済状況によって教育の機会が不平等になることに強い関心があります。この政策が教育の平等にどのように影響するのかを明らかにすることは、社会的にもとても重要だと思いますし、私の研究テーマとしても大きな意味があると考えています。"
                .to_string(),
        );
        answers.insert(
            61,
            "双減政策の主な対象となる校外教育機関は、主に学習塾や予備校、オンライン教育プラットフォームなどです。これらの機関は、過度な学習負担を生じさせる恐れがあるため、特に規制の対象となっています。"
                .to_string(),
        );
        Self { answers }
    }

    /// Create an answer key from explicit entries
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            answers: entries.into_iter().collect(),
        }
    }

    /// Model answer for a question, or the placeholder when none is registered
    pub fn lookup(&self, question_id: u32) -> &str {
        self.answers
            .get(&question_id)
            .map(String::as_str)
            .unwrap_or(NO_ANSWER_PLACEHOLDER)
    }

    /// Whether a real (non-placeholder) answer exists for a question
    pub fn has_answer(&self, question_id: u32) -> bool {
        self.answers.contains_key(&question_id)
    }
}
