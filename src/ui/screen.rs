use ratatui::{buffer::Buffer, layout::Rect};

use crate::{app::App, quiz::Phase};

/// A UI screen boundary, one per quiz phase
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Session size configuration
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::setup::render(app, area, buf);
    }
}

/// One question at a time while playing
pub struct QuestionScreen;

impl Screen for QuestionScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::question::render(app, area, buf);
    }
}

/// Score banner and per-question review
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::results::render(app, area, buf);
    }
}

pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Setup => Box::new(SetupScreen),
        Phase::Playing => Box::new(QuestionScreen),
        Phase::Finished => Box::new(ResultsScreen),
    }
}
