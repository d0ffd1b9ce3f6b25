#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Utc};

    use crate::models::domain::{Question, QuestionKind, Session};

    /// Deterministic timestamp shared by timing and resumption tests.
    pub fn test_started_at() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0)
            .expect("fixed timestamp should be valid")
    }

    /// Creates a standard four-option multiple-choice question.
    pub fn test_question(n: usize) -> Question {
        Question {
            id: format!("q-{}", n),
            kind: QuestionKind::MultipleChoice,
            prompt: format!("Question {}?", n),
            options: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            difficulty: None,
            correct: None,
        }
    }

    /// Creates `n` questions with ids `q-0` through `q-{n-1}`.
    pub fn test_questions(n: usize) -> Vec<Question> {
        (0..n).map(test_question).collect()
    }

    /// A session with every question answered "A" and marked submitted,
    /// ready for reconciler tests.
    pub fn submitted_session(n: usize) -> Session {
        let mut session =
            Session::new("quiz-1", test_questions(n), test_started_at()).expect("valid fixture");
        let ids: Vec<String> = session.questions.iter().map(|q| q.id.clone()).collect();
        for id in &ids {
            session.select_answer(id, "A").expect("known question id");
            session.add_time(id, 5);
        }
        session.current_index = n - 1;
        session.mark_submitted();
        session
    }
}
