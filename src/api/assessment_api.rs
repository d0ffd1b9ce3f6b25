use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::dto::raw::QuizPayload;
use crate::models::dto::request::{SubmitPracticeSetRequest, SubmitQuizRequest};
use crate::models::dto::response::{
    AttemptListResponse, AttemptReviewResponse, PracticeSubmissionResponse, QuizSubmissionResponse,
};

/// The REST contract this client consumes, expressed over wire payloads.
/// Normalization into domain types happens in the callers, so test doubles
/// can exercise the same tolerant decoding paths the HTTP client does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// `GET /api/quiz/{id}`
    async fn fetch_quiz(&self, quiz_id: &str) -> AppResult<QuizPayload>;

    /// `GET /api/practice-set/{id}`
    async fn fetch_practice_set(&self, practice_set_id: &str) -> AppResult<QuizPayload>;

    /// `POST /api/quiz/submit`
    async fn submit_quiz(&self, request: SubmitQuizRequest) -> AppResult<QuizSubmissionResponse>;

    /// `POST /api/practice-set/{id}/submit`
    async fn submit_practice_set(
        &self,
        practice_set_id: &str,
        request: SubmitPracticeSetRequest,
    ) -> AppResult<PracticeSubmissionResponse>;

    /// `GET /api/practice-set/{id}/attempts`
    async fn list_attempts(&self, practice_set_id: &str) -> AppResult<AttemptListResponse>;

    /// `GET /api/practice-set/{id}/attempts/{attemptId}`
    async fn fetch_attempt(
        &self,
        practice_set_id: &str,
        attempt_id: &str,
    ) -> AppResult<AttemptReviewResponse>;
}
