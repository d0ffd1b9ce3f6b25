use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, Session, SessionStatus};
use crate::services::timing::{Clock, TimingTracker};

/// Where the learner currently stands in the question sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    Active(usize),
    LastQuestion(usize),
    Submitted,
}

/// Owns the session's current index and the forward/back/terminal
/// transitions, flushing the timing tracker on every boundary.
///
/// Forward navigation requires the current question to carry a non-empty
/// answer; backward navigation does not. `submit` is only legal from the
/// last question and is terminal: afterwards no transition is accepted, but
/// the recorded `completed_at` stays readable so a failed grading call can
/// be retried with an identical payload. The final question may be left
/// unanswered at submission; it is reported to the grading service as an
/// empty answer.
#[derive(Debug, Clone)]
pub struct SessionNavigator {
    session: Session,
    timer: TimingTracker,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionNavigator {
    /// Starts navigating a fresh or resumed session. The timing mark for
    /// the current question begins now.
    pub fn begin(session: Session, clock: Clock) -> Self {
        SessionNavigator {
            timer: TimingTracker::start(clock),
            session,
            completed_at: None,
        }
    }

    pub fn state(&self) -> NavigatorState {
        if self.session.status == SessionStatus::Submitted {
            NavigatorState::Submitted
        } else if self.session.is_last_question() {
            NavigatorState::LastQuestion(self.session.current_index)
        } else {
            NavigatorState::Active(self.session.current_index)
        }
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn current_question(&self) -> &Question {
        self.session.current_question()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Records the learner's answer for the current question.
    pub fn select_answer(&mut self, value: impl Into<String>) -> AppResult<()> {
        let question_id = self.session.current_question().id.clone();
        self.session.select_answer(&question_id, value)
    }

    /// Advances to the next question. Refused (returns `false`) when the
    /// session is submitted, the current question is unanswered, or the
    /// pointer is already on the last question.
    pub fn next(&mut self) -> bool {
        if self.session.status == SessionStatus::Submitted {
            return false;
        }
        let current_id = self.session.current_question().id.clone();
        if !self.session.is_answered(&current_id) {
            log::debug!("next() refused: question '{}' is unanswered", current_id);
            return false;
        }
        if self.session.is_last_question() {
            return false;
        }

        self.timer.flush(&mut self.session, &current_id);
        self.session.current_index += 1;
        true
    }

    /// Steps back one question. Refused at index 0 or after submission.
    /// Does not require the current question to be answered.
    pub fn previous(&mut self) -> bool {
        if self.session.status == SessionStatus::Submitted {
            return false;
        }
        if self.session.current_index == 0 {
            return false;
        }

        let current_id = self.session.current_question().id.clone();
        self.timer.flush(&mut self.session, &current_id);
        self.session.current_index -= 1;
        true
    }

    /// Terminal transition: flushes the final timing delta, marks the
    /// session submitted, and returns the captured completion timestamp.
    pub fn submit(&mut self) -> AppResult<DateTime<Utc>> {
        if self.session.status == SessionStatus::Submitted {
            return Err(AppError::ValidationError(
                "session already submitted".to_string(),
            ));
        }
        if !self.session.is_last_question() {
            return Err(AppError::ValidationError(format!(
                "cannot submit from question {} of {}",
                self.session.current_index + 1,
                self.session.question_count()
            )));
        }
        let current_id = self.session.current_question().id.clone();
        self.timer.flush(&mut self.session, &current_id);
        self.session.mark_submitted();

        let completed_at = self.timer.clock().now();
        self.completed_at = Some(completed_at);
        log::info!(
            "session '{}' submitted with {}/{} questions answered",
            self.session.session_id,
            self.session.answers.len(),
            self.session.question_count()
        );
        Ok(completed_at)
    }

    /// Advances a fixed clock; no effect when running on the system clock.
    /// Lets tests drive deterministic timing through the public flow.
    pub fn advance_clock(&mut self, delta: chrono::Duration) {
        self.timer.advance(delta);
    }
}
