pub mod attempt;
pub mod question;
pub mod session;
pub mod submission;

pub use attempt::{AttemptResponse, AttemptReview, AttemptSummary};
pub use question::{normalize_questions, CorrectAnswer, Question, QuestionKind};
pub use session::{Session, SessionStatus};
pub use submission::{PracticeOutcome, QuestionResult, ScoreBucket, SubmissionResult};
