use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::quiz::{Phase, Quiz};

const PAGE: usize = 5;

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// View-layer state wrapped around the quiz state machine
#[derive(Debug)]
pub struct App {
    pub quiz: Quiz,
    /// Let "next" advance past a question that has no recorded answer
    pub allow_skip: bool,
    pub review_scroll: usize,
}

impl App {
    pub fn new(quiz: Quiz, allow_skip: bool) -> Self {
        Self {
            quiz,
            allow_skip,
            review_scroll: 0,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.quiz.poll_timer(now);
    }

    /// Whether the "next" control is enabled for the current question
    pub fn can_advance(&self) -> bool {
        self.quiz.phase() == Phase::Playing
            && (self.allow_skip || self.quiz.selected_answer().is_some())
    }

    pub fn can_go_back(&self) -> bool {
        self.quiz.current_question_index().is_some_and(|i| i > 0)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.quiz.phase() {
            Phase::Setup => self.on_setup_key(key),
            Phase::Playing => self.on_playing_key(key),
            Phase::Finished => self.on_finished_key(key),
        }
    }

    fn on_setup_key(&mut self, key: KeyEvent) -> Flow {
        let current = self.quiz.num_questions();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.quiz.configure_from_input(&format!("{}{}", current, c));
            }
            KeyCode::Backspace => {
                let text = current.to_string();
                self.quiz.configure_from_input(&text[..text.len() - 1]);
            }
            KeyCode::Up | KeyCode::Char('+') => self.quiz.configure(current as i64 + 1),
            KeyCode::Down | KeyCode::Char('-') => self.quiz.configure(current as i64 - 1),
            KeyCode::Enter | KeyCode::Char('s') => self.start(false),
            KeyCode::Char('a') => self.start(true),
            _ => {}
        }
        Flow::Continue
    }

    fn start(&mut self, all: bool) {
        if all {
            self.quiz.start_all();
        } else {
            self.quiz.start_configured();
        }
        self.review_scroll = 0;
    }

    fn on_playing_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(option_key) = self.option_for_key(key.code) {
            if let Some(id) = self.quiz.current_question().map(|q| q.id) {
                self.quiz.select_answer(id, option_key);
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => self.quiz.restart(),
            KeyCode::Left | KeyCode::Char('p') => self.quiz.previous(),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => {
                if self.can_advance() {
                    self.quiz.next();
                    self.review_scroll = 0;
                }
            }
            KeyCode::Char('?') | KeyCode::Char('h') => self.quiz.reveal(),
            _ => {}
        }
        Flow::Continue
    }

    /// Option keys are matched by name first, then `1..=9` by position.
    fn option_for_key(&self, code: KeyCode) -> Option<String> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        let question = self.quiz.current_question()?;

        let typed = c.to_string();
        if let Some(key) = question
            .options
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&typed))
        {
            return Some(key.clone());
        }

        let position = c.to_digit(10)?.checked_sub(1)? as usize;
        question.options.keys().nth(position).cloned()
    }

    fn on_finished_key(&mut self, key: KeyEvent) -> Flow {
        let rows = self.quiz.session_questions().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('r') | KeyCode::Enter => {
                self.quiz.restart();
                self.review_scroll = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.review_scroll = self.review_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.review_scroll = (self.review_scroll + 1).min(rows.saturating_sub(1));
            }
            KeyCode::PageUp => self.review_scroll = self.review_scroll.saturating_sub(PAGE),
            KeyCode::PageDown => {
                self.review_scroll = (self.review_scroll + PAGE).min(rows.saturating_sub(1));
            }
            KeyCode::Home => self.review_scroll = 0,
            _ => {}
        }
        Flow::Continue
    }
}
