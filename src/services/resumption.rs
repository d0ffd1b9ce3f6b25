use crate::errors::AppResult;
use crate::models::domain::{normalize_questions, Question, Session};
use crate::models::dto::raw::{QuizPayload, RawPriorResponse};
use crate::services::timing::Clock;

/// Reconstructs client session state from a quiz/practice-set fetch.
///
/// A payload without saved state yields a fresh session starting now. A
/// payload with state yields a session resumed at the first unanswered
/// question, with prior answers replayed and the original `started_at`
/// preserved.
pub struct ResumptionLoader;

impl ResumptionLoader {
    pub fn load(session_id: &str, payload: QuizPayload, clock: &Clock) -> AppResult<Session> {
        let (questions, dropped) = normalize_questions(payload.questions);
        if dropped > 0 {
            log::warn!(
                "session '{}': {} unrenderable question(s) were skipped",
                session_id,
                dropped
            );
        }

        let Some(state) = payload.state else {
            return Session::new(session_id, questions, clock.now());
        };

        let started_at = state.started_at;
        let answered_count = state.responses.len();
        let mut session = Session::new(session_id, questions, started_at)?;

        for prior in &state.responses {
            let Some(question) = session.questions.get(prior.question_index) else {
                log::warn!(
                    "session '{}': prior response for question index {} is out of range",
                    session_id,
                    prior.question_index
                );
                continue;
            };

            let Some(answer) = resolve_prior_answer(prior, question) else {
                log::warn!(
                    "session '{}': prior response for question '{}' has no usable answer",
                    session_id,
                    question.id
                );
                continue;
            };

            let question_id = question.id.clone();
            session.select_answer(&question_id, answer)?;
        }

        // Resume at the first unanswered question; a fully-answered session
        // lands on the last question for review rather than auto-submitting.
        session.current_index = answered_count.min(session.question_count() - 1);

        log::info!(
            "session '{}' resumed at question {} of {} ({} prior answers)",
            session_id,
            session.current_index + 1,
            session.question_count(),
            session.answers.len()
        );

        Ok(session)
    }
}

/// Prior answers are replayed as display text: prefer the recorded text,
/// fall back to resolving the recorded option index.
fn resolve_prior_answer(prior: &RawPriorResponse, question: &Question) -> Option<String> {
    if let Some(text) = prior
        .selected_option_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(text.to_string());
    }

    let index = prior.selected_option_index?;
    question.options.get(index).cloned()
}
