use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Authoritative per-question grading verdict returned by the server.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// The server's authoritative grading response for one submission.
/// Immutable; read-only for display and review.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SubmissionResult {
    pub overall_score_percent: f64,
    pub total_correct: u32,
    pub total_questions: u32,
    pub per_question: Vec<QuestionResult>,
}

impl SubmissionResult {
    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.total_correct == self.total_questions
    }
}

/// Correct/total counters for one grouping bucket of a practice-set result.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Default)]
pub struct ScoreBucket {
    pub correct: u32,
    pub total: u32,
}

/// Practice-set grading response: the overall result plus the server's
/// by-unit and by-question-type groupings. The groupings are display-only
/// and are never recomputed client-side.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PracticeOutcome {
    pub result: SubmissionResult,
    pub scores_by_unit: BTreeMap<String, ScoreBucket>,
    pub scores_by_type: BTreeMap<String, ScoreBucket>,
}
