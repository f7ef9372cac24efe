pub mod question;
pub mod results;
pub mod screen;
pub mod setup;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::app::App;

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 2;

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub(crate) fn green_bold_style() -> Style {
    bold_style().fg(Color::Green)
}

pub(crate) fn red_bold_style() -> Style {
    bold_style().fg(Color::Red)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.quiz.phase()).render(self, area, buf);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    use crate::app::App;
    use crate::question::{sample_question, QuestionBank};
    use crate::quiz::Quiz;

    pub fn app(n: u32) -> App {
        let bank = QuestionBank::new(
            "Sample Quiz",
            (1..=n).map(|id| sample_question(id, "a", 1)).collect(),
        )
        .unwrap();
        App::new(Quiz::new(bank), false)
    }

    /// Render into an in-memory buffer and return its rows joined by newlines
    pub fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
