use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

/// One entry of the grading request. Built for every question in session
/// order; unanswered questions are sent with an empty answer rather than
/// omitted, so the grading service counts them deterministically.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseEntry {
    pub question_id: String,
    pub user_answer: String,
    pub time_spent_seconds: u64,
}

/// Body of `POST /api/quiz/submit`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[validate(length(min = 1, message = "submission must contain at least one response"))]
    pub responses: Vec<ResponseEntry>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Body of `POST /api/practice-set/{id}/submit`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SubmitPracticeSetRequest {
    #[validate(length(min = 1))]
    pub practice_set_id: String,

    #[validate(length(min = 1, message = "submission must contain at least one response"))]
    pub responses: Vec<ResponseEntry>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
