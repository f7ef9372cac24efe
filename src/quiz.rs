use crate::question::{Question, QuestionBank, QuestionId};
use crate::score::{self, QuizResults, ReviewItem, UserAnswers};
use crate::session::{FinishedSession, Session};
use crate::shuffle::{shuffle_question_with, shuffle_sequence_with};
use rand::Rng;
use std::num::IntErrorKind;
use std::time::Instant;

/// Pending session size before the count field has been touched.
pub const DEFAULT_NUMBER_OF_QUESTIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

#[derive(Debug, Clone)]
pub enum GameState {
    Setup,
    Playing(Session),
    Finished(FinishedSession),
}

impl GameState {
    pub fn phase(&self) -> Phase {
        match self {
            GameState::Setup => Phase::Setup,
            GameState::Playing(_) => Phase::Playing,
            GameState::Finished(_) => Phase::Finished,
        }
    }
}

/// Clamp a requested session size to `[1, total]`.
pub fn clamp_count(count: i64, total: usize) -> usize {
    let upper = total.max(1) as i64;
    count.clamp(1, upper) as usize
}

/// Coerce free-form count input: leading integer is used, anything else becomes 1.
pub fn coerce_count(input: &str, total: usize) -> usize {
    let trimmed = input.trim_start();
    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let value = match trimmed[..end].parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    };
    clamp_count(value, total)
}

/// A quiz over one question bank: setup -> playing -> finished
#[derive(Debug, Clone)]
pub struct Quiz {
    title: String,
    pool: Vec<Question>,
    num_questions: usize,
    state: GameState,
}

impl Quiz {
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_requested_count(bank, DEFAULT_NUMBER_OF_QUESTIONS)
    }

    pub fn with_requested_count(bank: QuestionBank, requested: usize) -> Self {
        let pool = shuffle_sequence_with(&bank.questions, &mut rand::thread_rng());
        let num_questions = clamp_count(requested as i64, pool.len());
        log::info!(
            "quiz `{}` ready with {} questions, {} per session",
            bank.title,
            pool.len(),
            num_questions
        );
        Self {
            title: bank.title,
            pool,
            num_questions,
            state: GameState::Setup,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn total_available_questions(&self) -> usize {
        self.pool.len()
    }

    pub fn num_questions(&self) -> usize {
        self.num_questions
    }

    pub fn configure(&mut self, count: i64) {
        if self.phase() != Phase::Setup {
            log::trace!("configure ignored outside setup");
            return;
        }
        self.num_questions = clamp_count(count, self.total_available_questions());
    }

    pub fn configure_from_input(&mut self, input: &str) {
        if self.phase() != Phase::Setup {
            log::trace!("configure ignored outside setup");
            return;
        }
        self.num_questions = coerce_count(input, self.total_available_questions());
    }

    pub fn start(&mut self, count: usize) {
        self.start_with(count, &mut rand::thread_rng(), Instant::now());
    }

    pub fn start_configured(&mut self) {
        self.start(self.num_questions);
    }

    pub fn start_all(&mut self) {
        self.start(self.total_available_questions());
    }

    /// Start a session drawing randomness from `rng` and arming the timer at `now`.
    pub fn start_with<R: Rng>(&mut self, count: usize, rng: &mut R, now: Instant) {
        if self.phase() != Phase::Setup {
            log::trace!("start ignored in {:?}", self.phase());
            return;
        }
        if count == 0 || count > self.total_available_questions() {
            log::trace!("start ignored for out-of-range count {}", count);
            return;
        }

        self.pool = shuffle_sequence_with(&self.pool, rng);
        let questions: Vec<Question> = self.pool[..count]
            .iter()
            .map(|q| shuffle_question_with(q, rng))
            .collect();

        log::debug!("setup -> playing with {} questions", questions.len());
        self.state = GameState::Playing(Session::new(questions, now));
    }

    pub fn select_answer(&mut self, question_id: QuestionId, key: impl Into<String>) {
        let GameState::Playing(session) = &mut self.state else {
            log::trace!("select_answer ignored outside playing");
            return;
        };
        if !session.contains(question_id) {
            log::trace!("select_answer ignored for foreign question {}", question_id);
            return;
        }
        session.revealed = false;
        session.answers.insert(question_id, key.into());
    }

    pub fn reveal(&mut self) {
        let GameState::Playing(session) = &mut self.state else {
            return;
        };
        if session.revealed {
            return;
        }
        let question = session.current_question();
        let (id, correct) = (question.id, question.correct_answer.clone());
        session.answers.insert(id, correct);
        session.revealed = true;
    }

    pub fn next(&mut self) {
        let mut session = match std::mem::replace(&mut self.state, GameState::Setup) {
            GameState::Playing(session) => session,
            other => {
                log::trace!("next ignored in {:?}", other.phase());
                self.state = other;
                return;
            }
        };

        session.revealed = false;
        if !session.is_last_question() {
            session.current_index += 1;
            self.state = GameState::Playing(session);
            return;
        }

        let finished = session.into_finished();
        log::debug!(
            "playing -> finished after {}s",
            finished.final_elapsed_seconds
        );
        self.state = GameState::Finished(finished);
    }

    pub fn previous(&mut self) {
        let GameState::Playing(session) = &mut self.state else {
            return;
        };
        session.revealed = false;
        if session.current_index > 0 {
            session.current_index -= 1;
        }
    }

    pub fn restart(&mut self) {
        if self.phase() == Phase::Setup {
            return;
        }
        log::debug!("{:?} -> setup", self.phase());
        self.state = GameState::Setup;
    }

    pub fn tick(&mut self) {
        if let GameState::Playing(session) = &mut self.state {
            session.timer.tick();
        }
    }

    /// Fire every whole second that came due on the playing timer.
    pub fn poll_timer(&mut self, now: Instant) {
        let due = match &mut self.state {
            GameState::Playing(session) => session.timer.due_periods(now),
            _ => 0,
        };
        for _ in 0..due {
            self.tick();
        }
    }

    pub fn session_questions(&self) -> &[Question] {
        match &self.state {
            GameState::Setup => &[],
            GameState::Playing(session) => &session.questions,
            GameState::Finished(finished) => &finished.questions,
        }
    }

    pub fn user_answers(&self) -> Option<&UserAnswers> {
        match &self.state {
            GameState::Setup => None,
            GameState::Playing(session) => Some(&session.answers),
            GameState::Finished(finished) => Some(&finished.answers),
        }
    }

    pub fn current_question_index(&self) -> Option<usize> {
        match &self.state {
            GameState::Playing(session) => Some(session.current_index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            GameState::Playing(session) => Some(session.current_question()),
            _ => None,
        }
    }

    /// The option key recorded for the current question, if any
    pub fn selected_answer(&self) -> Option<&str> {
        match &self.state {
            GameState::Playing(session) => session
                .answers
                .get(&session.current_question().id)
                .map(String::as_str),
            _ => None,
        }
    }

    pub fn is_peeking(&self) -> bool {
        matches!(&self.state, GameState::Playing(session) if session.revealed)
    }

    pub fn is_last_question(&self) -> bool {
        matches!(&self.state, GameState::Playing(session) if session.is_last_question())
    }

    pub fn elapsed_seconds(&self) -> u64 {
        match &self.state {
            GameState::Setup => 0,
            GameState::Playing(session) => session.timer.elapsed_seconds(),
            GameState::Finished(finished) => finished.final_elapsed_seconds,
        }
    }

    pub fn final_elapsed_seconds(&self) -> Option<u64> {
        match &self.state {
            GameState::Finished(finished) => Some(finished.final_elapsed_seconds),
            _ => None,
        }
    }

    /// Position through the session as a percentage, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        match &self.state {
            GameState::Playing(session) => {
                (session.current_index + 1) as f64 / session.questions.len() as f64 * 100.0
            }
            GameState::Finished(_) => 100.0,
            GameState::Setup => 0.0,
        }
    }

    pub fn compute_results(&self) -> QuizResults {
        match self.user_answers() {
            Some(answers) => score::compute_results(self.session_questions(), answers),
            None => score::compute_results(&[], &UserAnswers::new()),
        }
    }

    pub fn review(&self) -> Vec<ReviewItem> {
        match self.user_answers() {
            Some(answers) => score::review(self.session_questions(), answers),
            None => Vec::new(),
        }
    }
}
