use chrono::{DateTime, Duration, Utc};

use crate::models::domain::Session;

/// Clock abstraction so timing behavior is deterministic under test.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Advances a fixed clock; no effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Accumulates wall-clock seconds per question across navigation.
///
/// The tracker marks when the current question was entered; on every
/// navigation boundary the elapsed time is flushed into the session's
/// `time_spent` map (floored to whole seconds) and the mark resets for the
/// newly current question. Revisits accumulate rather than reset.
#[derive(Debug, Clone)]
pub struct TimingTracker {
    clock: Clock,
    question_started_at: DateTime<Utc>,
}

impl TimingTracker {
    /// Starts tracking with the current question considered entered now.
    pub fn start(clock: Clock) -> Self {
        TimingTracker {
            clock,
            question_started_at: clock.now(),
        }
    }

    /// Flushes the time spent on the outgoing question into the session and
    /// restarts the mark for whatever question is current next.
    pub fn flush(&mut self, session: &mut Session, question_id: &str) {
        let now = self.clock.now();
        let elapsed = (now - self.question_started_at).num_seconds().max(0) as u64;
        if elapsed > 0 {
            session.add_time(question_id, elapsed);
        }
        self.question_started_at = now;
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Test hook: advance a fixed clock in place.
    pub fn advance(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }
}
