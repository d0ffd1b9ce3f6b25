use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::api::AssessmentApi;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::dto::raw::QuizPayload;
use crate::models::dto::request::{SubmitPracticeSetRequest, SubmitQuizRequest};
use crate::models::dto::response::{
    AttemptListResponse, AttemptReviewResponse, PracticeSubmissionResponse, QuizSubmissionResponse,
};

/// `reqwest`-backed implementation of the assessment API.
///
/// Every request carries the configured bearer token and races the client's
/// cancellation token, so a discarded view can cancel its in-flight calls
/// instead of letting a late response land in stale state.
pub struct HttpAssessmentApi {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
    cancel: CancellationToken,
}

impl HttpAssessmentApi {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| {
                AppError::InternalError(format!("failed to build HTTP client: {}", err))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            token: config.api_token.clone(),
            cancel: CancellationToken::new(),
        })
    }

    /// Token handed to the owning view; cancelling it aborts every request
    /// still in flight on this client.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        log::debug!("GET {}", path);
        self.send(self.http.get(self.url(path))).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        log::debug!("POST {}", path);
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        let request = request.bearer_auth(self.token.expose_secret());

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(AppError::Unauthorized(
                    "bearer token rejected by the API".to_string(),
                ));
            }
            if !status.is_success() {
                let message = error_message(response).await;
                return Err(AppError::ApiStatus {
                    status: status.as_u16(),
                    message,
                });
            }

            Ok(response.json::<T>().await?)
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::Cancelled),
            result = exchange => result,
        }
    }
}

/// Best-effort extraction of a human-readable message from an error body:
/// a JSON `message` or `error` field when present, otherwise the raw body.
async fn error_message(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    "no error body".to_string()
                } else {
                    body
                }
            }),
        Err(_) => "error body could not be read".to_string(),
    }
}

#[async_trait]
impl AssessmentApi for HttpAssessmentApi {
    async fn fetch_quiz(&self, quiz_id: &str) -> AppResult<QuizPayload> {
        self.get_json(&format!("/api/quiz/{}", quiz_id)).await
    }

    async fn fetch_practice_set(&self, practice_set_id: &str) -> AppResult<QuizPayload> {
        self.get_json(&format!("/api/practice-set/{}", practice_set_id))
            .await
    }

    async fn submit_quiz(&self, request: SubmitQuizRequest) -> AppResult<QuizSubmissionResponse> {
        self.post_json("/api/quiz/submit", &request).await
    }

    async fn submit_practice_set(
        &self,
        practice_set_id: &str,
        request: SubmitPracticeSetRequest,
    ) -> AppResult<PracticeSubmissionResponse> {
        self.post_json(&format!("/api/practice-set/{}/submit", practice_set_id), &request)
            .await
    }

    async fn list_attempts(&self, practice_set_id: &str) -> AppResult<AttemptListResponse> {
        self.get_json(&format!("/api/practice-set/{}/attempts", practice_set_id))
            .await
    }

    async fn fetch_attempt(
        &self,
        practice_set_id: &str,
        attempt_id: &str,
    ) -> AppResult<AttemptReviewResponse> {
        self.get_json(&format!(
            "/api/practice-set/{}/attempts/{}",
            practice_set_id, attempt_id
        ))
        .await
    }
}
