use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::api::AssessmentApi;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{PracticeOutcome, Session, SessionStatus, SubmissionResult};
use crate::models::dto::request::{ResponseEntry, SubmitPracticeSetRequest, SubmitQuizRequest};

/// Builds the grading request from a submitted session and merges the
/// authoritative response back into displayable results.
///
/// The session itself is never mutated here: a failed call leaves every
/// answer intact, and calling the same method again retries with an
/// identical payload.
pub struct SubmissionReconciler {
    api: Arc<dyn AssessmentApi>,
}

impl SubmissionReconciler {
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// One entry per question, in question order. Unanswered questions get
    /// an empty answer and zero seconds rather than being omitted, so the
    /// grading service can count them deterministically.
    pub fn build_responses(session: &Session) -> Vec<ResponseEntry> {
        session
            .questions
            .iter()
            .map(|question| ResponseEntry {
                question_id: question.id.clone(),
                user_answer: session.answer_for(&question.id).unwrap_or("").to_string(),
                time_spent_seconds: session.time_spent_on(&question.id),
            })
            .collect()
    }

    pub async fn submit_quiz(
        &self,
        session: &Session,
        completed_at: DateTime<Utc>,
    ) -> AppResult<SubmissionResult> {
        ensure_submitted(session)?;

        let request = SubmitQuizRequest {
            quiz_id: session.session_id.clone(),
            responses: Self::build_responses(session),
            started_at: session.started_at,
            completed_at,
        };
        request.validate()?;

        let response = self
            .api
            .submit_quiz(request)
            .await
            .map_err(as_submission_failure)?;

        SubmissionResult::try_from(response)
    }

    pub async fn submit_practice_set(
        &self,
        session: &Session,
        completed_at: DateTime<Utc>,
    ) -> AppResult<PracticeOutcome> {
        ensure_submitted(session)?;

        let request = SubmitPracticeSetRequest {
            practice_set_id: session.session_id.clone(),
            responses: Self::build_responses(session),
            started_at: session.started_at,
            completed_at,
        };
        request.validate()?;

        let response = self
            .api
            .submit_practice_set(&session.session_id, request)
            .await
            .map_err(as_submission_failure)?;

        PracticeOutcome::try_from(response)
    }
}

fn ensure_submitted(session: &Session) -> AppResult<()> {
    if session.status != SessionStatus::Submitted {
        return Err(AppError::ValidationError(
            "session has not been submitted".to_string(),
        ));
    }
    Ok(())
}

/// Transport and status failures during grading become `SubmissionFailed`:
/// the answers are still held locally and the call can be retried. More
/// specific outcomes (expired token, cancellation, a response that violates
/// the contract) keep their own variant.
fn as_submission_failure(err: AppError) -> AppError {
    match err {
        AppError::FetchFailed(msg) => AppError::SubmissionFailed(msg),
        AppError::ApiStatus { status, message } => {
            AppError::SubmissionFailed(format!("{} ({})", message, status))
        }
        other => other,
    }
}
