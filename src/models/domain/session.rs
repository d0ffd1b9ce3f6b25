use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

/// One in-progress or completed attempt at an ordered question sequence.
///
/// Exclusively owned by the active assessment flow; question order is fixed
/// for the session lifetime and `status` only ever moves from `InProgress`
/// to `Submitted`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// Identifier of the parent quiz or practice set, not of this attempt.
    pub session_id: String,
    pub questions: Vec<Question>,
    pub current_index: usize,
    /// Learner's answer text per question id; only answered questions present.
    pub answers: HashMap<String, String>,
    /// Accumulated elapsed seconds per question id.
    pub time_spent: HashMap<String, u64>,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(
        session_id: &str,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "session must contain at least one renderable question".to_string(),
            ));
        }

        Ok(Session {
            session_id: session_id.to_string(),
            questions,
            current_index: 0,
            answers: HashMap::new(),
            time_spent: HashMap::new(),
            started_at,
            status: SessionStatus::InProgress,
        })
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == self.questions.len() - 1
    }

    /// Records the learner's answer for a question, overwriting any prior
    /// value. For choice questions the value is the option's display text,
    /// exactly what is later sent to the grading service.
    pub fn select_answer(&mut self, question_id: &str, value: impl Into<String>) -> AppResult<()> {
        if self.status == SessionStatus::Submitted {
            return Err(AppError::ValidationError(
                "session already submitted".to_string(),
            ));
        }
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::ValidationError(format!(
                "unknown question id '{}'",
                question_id
            )));
        }

        self.answers.insert(question_id.to_string(), value.into());
        Ok(())
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// An answer counts only if it is present and non-empty.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answer_for(question_id)
            .is_some_and(|a| !a.trim().is_empty())
    }

    pub fn is_fully_answered(&self) -> bool {
        self.questions.iter().all(|q| self.is_answered(&q.id))
    }

    /// Accumulates elapsed seconds against a question. Time only ever grows.
    pub fn add_time(&mut self, question_id: &str, seconds: u64) {
        let entry = self.time_spent.entry(question_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(seconds);
    }

    pub fn time_spent_on(&self, question_id: &str) -> u64 {
        self.time_spent.get(question_id).copied().unwrap_or(0)
    }

    pub fn mark_submitted(&mut self) {
        self.status = SessionStatus::Submitted;
    }
}
