use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A value the server sends either as a JSON number or as a numeric string.
/// Question-set payloads predate a stable schema and do both.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IndexOrText {
    Index(i64),
    Text(String),
}

/// A question exactly as the server ships it, before normalization. Field
/// names vary across generator versions, hence the aliases; everything is
/// optional so a partial item deserializes and gets rejected with a real
/// reason instead of failing the whole payload.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type", alias = "question_type")]
    pub kind: Option<String>,
    #[serde(default, alias = "question", alias = "question_text")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub correct_option: Option<IndexOrText>,
    #[serde(default, alias = "correct_answer", alias = "correctAnswer")]
    pub answer: Option<String>,
}

/// One previously answered item of a partially-completed server-side
/// session, in original answer order.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPriorResponse {
    pub question_index: usize,
    #[serde(default)]
    pub selected_option_index: Option<usize>,
    #[serde(default)]
    pub selected_option_text: Option<String>,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
}

/// Saved progress attached to a quiz/practice-set fetch when the learner
/// has a resumable session.
#[derive(Clone, Debug, Deserialize)]
pub struct RawSessionState {
    pub responses: Vec<RawPriorResponse>,
    pub started_at: DateTime<Utc>,
}

/// Response of `GET /api/quiz/{id}` and `GET /api/practice-set/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizPayload {
    pub questions: Vec<RawQuestion>,
    #[serde(default)]
    pub state: Option<RawSessionState>,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_question_accepts_field_aliases() {
        let json = r#"{
            "id": "q-9",
            "question_type": "true_false",
            "question": "The sky is blue.",
            "correctAnswer": "True"
        }"#;

        let raw: RawQuestion = serde_json::from_str(json).unwrap();

        assert_eq!(raw.kind.as_deref(), Some("true_false"));
        assert_eq!(raw.prompt.as_deref(), Some("The sky is blue."));
        assert_eq!(raw.answer.as_deref(), Some("True"));
    }

    #[test]
    fn correct_option_accepts_number_or_string() {
        let as_number: RawQuestion =
            serde_json::from_str(r#"{"correct_option": 2}"#).unwrap();
        assert_eq!(as_number.correct_option, Some(IndexOrText::Index(2)));

        let as_string: RawQuestion =
            serde_json::from_str(r#"{"correct_option": "2"}"#).unwrap();
        assert_eq!(
            as_string.correct_option,
            Some(IndexOrText::Text("2".to_string()))
        );
    }

    #[test]
    fn quiz_payload_without_state_deserializes() {
        let json = r#"{"questions": [{"question": "Q?"}], "completed": false}"#;
        let payload: QuizPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.questions.len(), 1);
        assert!(payload.state.is_none());
        assert!(!payload.completed);
    }

    #[test]
    fn session_state_deserializes_prior_responses() {
        let json = r#"{
            "questions": [],
            "state": {
                "responses": [
                    {"question_index": 0, "selected_option_index": 1,
                     "selected_option_text": "B", "answered_at": "2025-03-01T10:00:00Z"},
                    {"question_index": 1, "selected_option_text": "True"}
                ],
                "started_at": "2025-03-01T09:58:00Z"
            },
            "completed": false
        }"#;

        let payload: QuizPayload = serde_json::from_str(json).unwrap();
        let state = payload.state.unwrap();

        assert_eq!(state.responses.len(), 2);
        assert_eq!(state.responses[0].selected_option_index, Some(1));
        assert!(state.responses[1].answered_at.is_none());
    }
}
