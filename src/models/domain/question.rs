use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::dto::raw::{IndexOrText, RawQuestion};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillInBlank,
    ShortAnswer,
}

/// Canonical correctness source, resolved once when the raw question is
/// normalized. Downstream code never matches option text against letters or
/// stringified indexes again.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum CorrectAnswer {
    OptionIndex(usize),
    Text(String),
}

/// One normalized assessment item. Immutable for the life of a session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Ordered display options; empty for fill-in-blank and short-answer.
    pub options: Vec<String>,
    /// Free-form label, display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<CorrectAnswer>,
}

impl Question {
    /// Normalizes a raw server question into the closed variant set.
    ///
    /// Returns `AppError::MalformedQuestion` for items that cannot be
    /// rendered: missing prompt text, or a multiple-choice item with no
    /// options. Callers skip or flag such items rather than crash the
    /// session.
    pub fn from_raw(raw: RawQuestion) -> AppResult<Self> {
        let prompt = raw
            .prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::MalformedQuestion("question has no prompt text".to_string()))?
            .to_string();

        let kind = parse_kind(raw.kind.as_deref());

        let options = match kind {
            QuestionKind::MultipleChoice => {
                let options = raw.options.clone().unwrap_or_default();
                if options.is_empty() {
                    return Err(AppError::MalformedQuestion(format!(
                        "multiple-choice question '{}' has no options",
                        prompt
                    )));
                }
                options
            }
            QuestionKind::TrueFalse => raw
                .options
                .clone()
                .filter(|opts| !opts.is_empty())
                .unwrap_or_else(|| vec!["True".to_string(), "False".to_string()]),
            QuestionKind::FillInBlank | QuestionKind::ShortAnswer => Vec::new(),
        };

        let correct = resolve_correct_answer(&raw, &options);

        Ok(Question {
            id: raw
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            kind,
            prompt,
            options,
            difficulty: raw.difficulty.filter(|d| !d.trim().is_empty()),
            correct,
        })
    }

    pub fn has_options(&self) -> bool {
        matches!(
            self.kind,
            QuestionKind::MultipleChoice | QuestionKind::TrueFalse
        )
    }

    /// Display text of the correct option, when one is resolvable.
    pub fn correct_text(&self) -> Option<&str> {
        match self.correct.as_ref()? {
            CorrectAnswer::OptionIndex(i) => self.options.get(*i).map(String::as_str),
            CorrectAnswer::Text(t) => Some(t.as_str()),
        }
    }
}

fn parse_kind(value: Option<&str>) -> QuestionKind {
    match value
        .map(str::trim)
        .map(str::to_lowercase)
        .as_deref()
        .unwrap_or("")
    {
        "true_false" | "true/false" | "boolean" => QuestionKind::TrueFalse,
        "fill_in_blank" | "fill_in_the_blank" => QuestionKind::FillInBlank,
        "short_answer" | "open_ended" => QuestionKind::ShortAnswer,
        // Generated sets predate the type tag; untyped items are MCQs.
        _ => QuestionKind::MultipleChoice,
    }
}

/// Picks the canonical correctness representation for a raw question.
///
/// Preference order: an in-bounds `correct_option` index; a numeric string
/// index; an answer text that exactly matches an option (folded into an
/// index); the answer text itself as a last resort.
fn resolve_correct_answer(raw: &RawQuestion, options: &[String]) -> Option<CorrectAnswer> {
    if let Some(value) = raw.correct_option.as_ref() {
        let index = match value {
            IndexOrText::Index(i) => usize::try_from(*i).ok(),
            IndexOrText::Text(s) => s.trim().parse::<usize>().ok(),
        };
        if let Some(i) = index {
            if i < options.len() {
                return Some(CorrectAnswer::OptionIndex(i));
            }
            log::warn!(
                "correct_option index {} out of range for {} options, falling back to answer text",
                i,
                options.len()
            );
        }
    }

    let text = raw.answer.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

    if let Some(i) = options.iter().position(|opt| opt == text) {
        return Some(CorrectAnswer::OptionIndex(i));
    }

    Some(CorrectAnswer::Text(text.to_string()))
}

/// Normalizes a batch of raw questions, dropping unrenderable items.
///
/// Returns the renderable questions in their original order together with
/// the number of items dropped; each drop is logged.
pub fn normalize_questions(raw: Vec<RawQuestion>) -> (Vec<Question>, usize) {
    let total = raw.len();
    let mut questions = Vec::with_capacity(total);

    for item in raw {
        match Question::from_raw(item) {
            Ok(question) => questions.push(question),
            Err(err) => log::warn!("skipping unrenderable question: {}", err),
        }
    }

    let dropped = total - questions.len();
    if dropped > 0 {
        log::warn!("dropped {} of {} questions during normalization", dropped, total);
    }

    (questions, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, prompt: &str) -> RawQuestion {
        RawQuestion {
            id: Some("q-1".to_string()),
            kind: Some(kind.to_string()),
            prompt: Some(prompt.to_string()),
            options: None,
            difficulty: None,
            correct_option: None,
            answer: None,
        }
    }

    #[test]
    fn true_false_defaults_options() {
        let question = Question::from_raw(raw("true_false", "Water is wet.")).unwrap();

        assert_eq!(question.kind, QuestionKind::TrueFalse);
        assert_eq!(question.options, vec!["True", "False"]);
    }

    #[test]
    fn missing_prompt_is_unrenderable() {
        let mut item = raw("short_answer", "ignored");
        item.prompt = None;

        let err = Question::from_raw(item).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_QUESTION");
    }

    #[test]
    fn multiple_choice_without_options_is_unrenderable() {
        let err = Question::from_raw(raw("multiple_choice", "Pick one")).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_QUESTION");
    }

    #[test]
    fn unknown_kind_defaults_to_multiple_choice() {
        let mut item = raw("essay", "Explain");
        item.options = Some(vec!["A".to_string(), "B".to_string()]);

        let question = Question::from_raw(item).unwrap();
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
    }

    #[test]
    fn correct_option_index_wins_over_answer_text() {
        let mut item = raw("multiple_choice", "Pick");
        item.options = Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
        item.correct_option = Some(IndexOrText::Index(2));
        item.answer = Some("A".to_string());

        let question = Question::from_raw(item).unwrap();
        assert_eq!(question.correct, Some(CorrectAnswer::OptionIndex(2)));
        assert_eq!(question.correct_text(), Some("C"));
    }

    #[test]
    fn stringified_index_is_parsed() {
        let mut item = raw("multiple_choice", "Pick");
        item.options = Some(vec!["A".to_string(), "B".to_string()]);
        item.correct_option = Some(IndexOrText::Text("1".to_string()));

        let question = Question::from_raw(item).unwrap();
        assert_eq!(question.correct, Some(CorrectAnswer::OptionIndex(1)));
    }

    #[test]
    fn answer_text_matching_an_option_folds_to_index() {
        let mut item = raw("multiple_choice", "Pick");
        item.options = Some(vec!["Paris".to_string(), "Rome".to_string()]);
        item.answer = Some("Rome".to_string());

        let question = Question::from_raw(item).unwrap();
        assert_eq!(question.correct, Some(CorrectAnswer::OptionIndex(1)));
    }

    #[test]
    fn out_of_range_index_falls_back_to_text() {
        let mut item = raw("multiple_choice", "Pick");
        item.options = Some(vec!["A".to_string(), "B".to_string()]);
        item.correct_option = Some(IndexOrText::Index(7));
        item.answer = Some("B".to_string());

        let question = Question::from_raw(item).unwrap();
        assert_eq!(question.correct, Some(CorrectAnswer::OptionIndex(1)));
    }

    #[test]
    fn short_answer_keeps_free_text_correctness() {
        let mut item = raw("short_answer", "Capital of France?");
        item.answer = Some("Paris".to_string());

        let question = Question::from_raw(item).unwrap();
        assert!(question.options.is_empty());
        assert_eq!(question.correct, Some(CorrectAnswer::Text("Paris".to_string())));
    }

    #[test]
    fn missing_id_is_synthesized() {
        let mut item = raw("short_answer", "Anything");
        item.id = None;

        let question = Question::from_raw(item).unwrap();
        assert!(!question.id.is_empty());
    }

    #[test]
    fn normalize_questions_skips_bad_items_and_counts_them() {
        let mut bad = raw("short_answer", "ignored");
        bad.prompt = None;
        let items = vec![raw("true_false", "First"), bad, raw("short_answer", "Third")];

        let (questions, dropped) = normalize_questions(items);

        assert_eq!(questions.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(questions[0].prompt, "First");
        assert_eq!(questions[1].prompt, "Third");
    }
}
