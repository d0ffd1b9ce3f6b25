use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a learner's attempt history for a practice set.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttemptSummary {
    pub attempt_id: String,
    pub attempt_number: u32,
    pub overall_score_percent: f64,
    pub total_correct: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
}

/// One graded response within an attempt review.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptResponse {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Full review payload for one historical attempt.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttemptReview {
    pub attempt_id: String,
    pub responses: Vec<AttemptResponse>,
}

impl AttemptReview {
    pub fn correct_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_correct).count()
    }
}
