use crate::question::{Question, QuestionId};
use crate::score::UserAnswers;
use std::time::{Duration, Instant};

const TIMER_PERIOD: Duration = Duration::from_secs(1);

/// One-second session clock. It lives inside the playing state, so leaving
/// that state drops it and nothing can fire afterwards.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    elapsed_seconds: u64,
    armed_at: Instant,
    periods_fired: u64,
}

impl SessionTimer {
    pub fn arm(now: Instant) -> Self {
        Self {
            elapsed_seconds: 0,
            armed_at: now,
            periods_fired: 0,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn tick(&mut self) {
        self.elapsed_seconds += 1;
    }

    /// Number of whole periods that came due since the previous poll.
    pub fn due_periods(&mut self, now: Instant) -> u64 {
        let periods = now
            .checked_duration_since(self.armed_at)
            .map(|d| d.as_millis() / TIMER_PERIOD.as_millis())
            .unwrap_or(0) as u64;
        let due = periods.saturating_sub(self.periods_fired);
        self.periods_fired = self.periods_fired.max(periods);
        due
    }
}

/// State of a quiz that is being played
#[derive(Debug, Clone)]
pub struct Session {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: UserAnswers,
    pub revealed: bool,
    pub timer: SessionTimer,
}

impl Session {
    pub fn new(questions: Vec<Question>, now: Instant) -> Self {
        Self {
            questions,
            current_index: 0,
            answers: UserAnswers::new(),
            revealed: false,
            timer: SessionTimer::arm(now),
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id == id)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn into_finished(self) -> FinishedSession {
        FinishedSession {
            final_elapsed_seconds: self.timer.elapsed_seconds(),
            questions: self.questions,
            answers: self.answers,
        }
    }
}

/// A completed session, frozen for scoring and review
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedSession {
    pub questions: Vec<Question>,
    pub answers: UserAnswers,
    pub final_elapsed_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::sample_question;

    #[test]
    fn timer_counts_manual_ticks() {
        let mut timer = SessionTimer::arm(Instant::now());
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn timer_reports_whole_periods_once() {
        let start = Instant::now();
        let mut timer = SessionTimer::arm(start);

        assert_eq!(timer.due_periods(start + Duration::from_millis(900)), 0);
        assert_eq!(timer.due_periods(start + Duration::from_millis(1000)), 1);
        assert_eq!(timer.due_periods(start + Duration::from_millis(1500)), 0);
        // polled late: catch up on both missed periods
        assert_eq!(timer.due_periods(start + Duration::from_millis(3200)), 2);
    }

    #[test]
    fn timer_ignores_instants_before_arming() {
        let start = Instant::now() + Duration::from_secs(5);
        let mut timer = SessionTimer::arm(start);
        assert_eq!(timer.due_periods(Instant::now()), 0);
    }

    #[test]
    fn finishing_freezes_elapsed_time() {
        let mut session = Session::new(vec![sample_question(1, "a", 1)], Instant::now());
        session.timer.tick();
        session.answers.insert(1, "a".to_string());

        let finished = session.into_finished();
        assert_eq!(finished.final_elapsed_seconds, 1);
        assert_eq!(finished.answers.get(&1).map(String::as_str), Some("a"));
    }

    #[test]
    fn last_question_detection() {
        let mut session = Session::new(
            vec![sample_question(1, "a", 1), sample_question(2, "b", 1)],
            Instant::now(),
        );
        assert!(!session.is_last_question());
        session.current_index = 1;
        assert!(session.is_last_question());
        assert!(session.contains(2));
        assert!(!session.contains(3));
    }
}
