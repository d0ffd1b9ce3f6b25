use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::domain::{
    AttemptResponse, AttemptReview, AttemptSummary, PracticeOutcome, QuestionResult, ScoreBucket,
    SubmissionResult,
};

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionResultPayload {
    pub question_id: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Response of `POST /api/quiz/submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmissionResponse {
    pub overall_score: f64,
    pub total_correct: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub results: Vec<QuestionResultPayload>,
}

#[derive(Debug, Clone, Deserialize, Copy)]
pub struct ScoreBucketPayload {
    pub correct: u32,
    pub total: u32,
}

/// Response of `POST /api/practice-set/{id}/submit`. Carries the same
/// summary plus the server-computed groupings.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeSubmissionResponse {
    pub overall_score: f64,
    pub total_correct: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub results: Vec<QuestionResultPayload>,
    #[serde(default)]
    pub scores_by_unit: BTreeMap<String, ScoreBucketPayload>,
    #[serde(default)]
    pub scores_by_type: BTreeMap<String, ScoreBucketPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttemptSummaryPayload {
    pub attempt_id: String,
    pub attempt_number: u32,
    pub overall_score: f64,
    pub total_correct: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
}

/// Response of `GET /api/practice-set/{id}/attempts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptListResponse {
    #[serde(default)]
    pub attempts: Vec<AttemptSummaryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttemptResponsePayload {
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub user_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Response of `GET /api/practice-set/{id}/attempts/{attemptId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptReviewResponse {
    pub attempt_id: String,
    #[serde(default)]
    pub responses: Vec<AttemptResponsePayload>,
}

impl From<QuestionResultPayload> for QuestionResult {
    fn from(payload: QuestionResultPayload) -> Self {
        QuestionResult {
            question_id: payload.question_id,
            user_answer: payload.user_answer,
            correct_answer: payload.correct_answer,
            is_correct: payload.is_correct,
            explanation: payload.explanation,
        }
    }
}

/// Builds the domain result from summary counters and per-question rows,
/// enforcing `total_correct <= total_questions`. The percent/ratio
/// relationship is server-trusted and only warned about on mismatch.
fn build_result(
    overall_score: f64,
    total_correct: u32,
    total_questions: u32,
    results: Vec<QuestionResultPayload>,
) -> Result<SubmissionResult, AppError> {
    if total_correct > total_questions {
        return Err(AppError::ApiContract(format!(
            "total_correct {} exceeds total_questions {}",
            total_correct, total_questions
        )));
    }

    if total_questions > 0 {
        let expected = (100.0 * f64::from(total_correct) / f64::from(total_questions)).round();
        if (expected - overall_score).abs() > 1.0 {
            log::warn!(
                "server score {} deviates from {}/{} ratio (expected ~{})",
                overall_score,
                total_correct,
                total_questions,
                expected
            );
        }
    }

    Ok(SubmissionResult {
        overall_score_percent: overall_score,
        total_correct,
        total_questions,
        per_question: results.into_iter().map(QuestionResult::from).collect(),
    })
}

impl TryFrom<QuizSubmissionResponse> for SubmissionResult {
    type Error = AppError;

    fn try_from(response: QuizSubmissionResponse) -> Result<Self, Self::Error> {
        build_result(
            response.overall_score,
            response.total_correct,
            response.total_questions,
            response.results,
        )
    }
}

impl TryFrom<PracticeSubmissionResponse> for PracticeOutcome {
    type Error = AppError;

    fn try_from(response: PracticeSubmissionResponse) -> Result<Self, Self::Error> {
        let result = build_result(
            response.overall_score,
            response.total_correct,
            response.total_questions,
            response.results,
        )?;

        let into_bucket = |(k, v): (String, ScoreBucketPayload)| {
            (
                k,
                ScoreBucket {
                    correct: v.correct,
                    total: v.total,
                },
            )
        };

        Ok(PracticeOutcome {
            result,
            scores_by_unit: response.scores_by_unit.into_iter().map(into_bucket).collect(),
            scores_by_type: response.scores_by_type.into_iter().map(into_bucket).collect(),
        })
    }
}

impl From<AttemptSummaryPayload> for AttemptSummary {
    fn from(payload: AttemptSummaryPayload) -> Self {
        AttemptSummary {
            attempt_id: payload.attempt_id,
            attempt_number: payload.attempt_number,
            overall_score_percent: payload.overall_score,
            total_correct: payload.total_correct,
            total_questions: payload.total_questions,
            submitted_at: payload.submitted_at,
        }
    }
}

impl From<AttemptReviewResponse> for AttemptReview {
    fn from(response: AttemptReviewResponse) -> Self {
        AttemptReview {
            attempt_id: response.attempt_id,
            responses: response
                .responses
                .into_iter()
                .map(|r| AttemptResponse {
                    question_text: r.question_text,
                    options: r.options,
                    correct_answer: r.correct_answer,
                    user_answer: r.user_answer,
                    is_correct: r.is_correct,
                    explanation: r.explanation,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(correct: u32, total: u32) -> QuizSubmissionResponse {
        QuizSubmissionResponse {
            overall_score: if total == 0 {
                0.0
            } else {
                (100.0 * f64::from(correct) / f64::from(total)).round()
            },
            total_correct: correct,
            total_questions: total,
            results: Vec::new(),
        }
    }

    #[test]
    fn test_valid_response_converts() {
        let result = SubmissionResult::try_from(response(2, 3)).unwrap();

        assert_eq!(result.total_correct, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.overall_score_percent, 67.0);
    }

    #[test]
    fn test_correct_exceeding_total_is_a_contract_violation() {
        let err = SubmissionResult::try_from(response(4, 3)).unwrap_err();
        assert_eq!(err.error_code(), "API_CONTRACT");
    }

    #[test]
    fn test_practice_response_carries_breakdowns() {
        let mut by_unit = BTreeMap::new();
        by_unit.insert(
            "Unit 1".to_string(),
            ScoreBucketPayload {
                correct: 1,
                total: 2,
            },
        );

        let response = PracticeSubmissionResponse {
            overall_score: 50.0,
            total_correct: 1,
            total_questions: 2,
            results: Vec::new(),
            scores_by_unit: by_unit,
            scores_by_type: BTreeMap::new(),
        };

        let outcome = PracticeOutcome::try_from(response).unwrap();
        assert_eq!(outcome.scores_by_unit["Unit 1"].correct, 1);
        assert_eq!(outcome.scores_by_unit["Unit 1"].total, 2);
    }

    #[test]
    fn test_attempt_review_converts_to_domain() {
        let response = AttemptReviewResponse {
            attempt_id: "att-7".to_string(),
            responses: vec![AttemptResponsePayload {
                question_text: "Q1".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                correct_answer: "A".to_string(),
                user_answer: "B".to_string(),
                is_correct: false,
                explanation: None,
            }],
        };

        let review = AttemptReview::from(response);
        assert_eq!(review.attempt_id, "att-7");
        assert_eq!(review.correct_count(), 0);
    }
}
