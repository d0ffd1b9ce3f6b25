use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("API returned {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Malformed question: {0}")]
    MalformedQuestion(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Submission failed (answers preserved, retry available): {0}")]
    SubmissionFailed(String),

    #[error("API contract violation: {0}")]
    ApiContract(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::FetchFailed(_) => "FETCH_FAILED",
            AppError::ApiStatus { .. } => "API_STATUS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::MalformedQuestion(_) => "MALFORMED_QUESTION",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::SubmissionFailed(_) => "SUBMISSION_FAILED",
            AppError::ApiContract(_) => "API_CONTRACT",
            AppError::Cancelled => "CANCELLED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failed operation can be retried with the same inputs.
    ///
    /// A failed submission keeps the learner's answers locally, so the same
    /// payload can be posted again. A failed fetch has nothing to retry
    /// against beyond re-issuing the original request from scratch.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::SubmissionFailed(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            AppError::FetchFailed(err.to_string())
        } else if err.is_decode() {
            AppError::ApiContract(format!("response body could not be decoded: {}", err))
        } else {
            AppError::InternalError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
