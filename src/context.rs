use std::sync::Arc;

use crate::api::{AssessmentApi, HttpAssessmentApi};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::domain::{
    AttemptReview, AttemptSummary, PracticeOutcome, SubmissionResult,
};
use crate::services::{Clock, ResumptionLoader, SessionNavigator, SubmissionReconciler};

/// Explicit wiring for one assessment view: configuration, API client,
/// reconciler, and clock, passed to every collaborator call instead of
/// being read from ambient global state.
#[derive(Clone)]
pub struct SessionContext {
    pub api: Arc<dyn AssessmentApi>,
    pub reconciler: Arc<SubmissionReconciler>,
    pub config: Arc<Config>,
    clock: Clock,
}

impl SessionContext {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let api: Arc<dyn AssessmentApi> = Arc::new(HttpAssessmentApi::new(&config)?);
        Ok(Self::with_api(config, api))
    }

    /// Builds a context over any `AssessmentApi` implementation. This is
    /// the seam tests use to substitute an in-memory API.
    pub fn with_api(config: Config, api: Arc<dyn AssessmentApi>) -> Self {
        SessionContext {
            reconciler: Arc::new(SubmissionReconciler::new(api.clone())),
            api,
            config: Arc::new(config),
            clock: Clock::default(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches a quiz and begins navigating it, resuming saved progress
    /// when the server has any.
    pub async fn start_quiz(&self, quiz_id: &str) -> AppResult<SessionNavigator> {
        let payload = self.api.fetch_quiz(quiz_id).await?;
        let session = ResumptionLoader::load(quiz_id, payload, &self.clock)?;
        Ok(SessionNavigator::begin(session, self.clock))
    }

    pub async fn start_practice_set(&self, practice_set_id: &str) -> AppResult<SessionNavigator> {
        let payload = self.api.fetch_practice_set(practice_set_id).await?;
        let session = ResumptionLoader::load(practice_set_id, payload, &self.clock)?;
        Ok(SessionNavigator::begin(session, self.clock))
    }

    /// Submits a quiz session and merges the authoritative result. When a
    /// prior submission attempt failed after the navigator reached the
    /// terminal state, this retries with the identical payload and the
    /// originally captured completion time.
    pub async fn submit_quiz(
        &self,
        navigator: &mut SessionNavigator,
    ) -> AppResult<SubmissionResult> {
        let completed_at = match navigator.completed_at() {
            Some(at) => at,
            None => navigator.submit()?,
        };
        self.reconciler.submit_quiz(navigator.session(), completed_at).await
    }

    pub async fn submit_practice_set(
        &self,
        navigator: &mut SessionNavigator,
    ) -> AppResult<PracticeOutcome> {
        let completed_at = match navigator.completed_at() {
            Some(at) => at,
            None => navigator.submit()?,
        };
        self.reconciler
            .submit_practice_set(navigator.session(), completed_at)
            .await
    }

    pub async fn attempt_history(&self, practice_set_id: &str) -> AppResult<Vec<AttemptSummary>> {
        let response = self.api.list_attempts(practice_set_id).await?;
        Ok(response.attempts.into_iter().map(AttemptSummary::from).collect())
    }

    pub async fn attempt_review(
        &self,
        practice_set_id: &str,
        attempt_id: &str,
    ) -> AppResult<AttemptReview> {
        let response = self.api.fetch_attempt(practice_set_id, attempt_id).await?;
        Ok(AttemptReview::from(response))
    }
}
