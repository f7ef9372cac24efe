use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{bold_style, dim_style, italic_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::app::App;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let quiz = &app.quiz;
    let available = quiz.total_available_questions();
    let count = quiz.num_questions();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let lines = vec![
        Line::from(Span::styled("Game settings", bold_style())),
        Line::from(""),
        Line::from(format!(
            "Choose the number of questions (available: {})",
            available
        )),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(
                format!("[ {} ]", count),
                bold_style().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("(enter) Start ({} questions)", count),
            bold_style(),
        )),
        Line::from(Span::styled(
            format!("(a) Hardcore mode! (all {} questions)", available),
            Style::default().fg(Color::Red),
        )),
    ];

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" Welcome to {}! ", quiz.title()), bold_style())),
        )
        .wrap(Wrap { trim: true });
    card.render(chunks[0], buf);

    let legend = Paragraph::new(Span::styled(
        "(0-9) type / (backspace) erase / (up/down) adjust / (esc)ape",
        italic_style().patch(dim_style()),
    ))
    .alignment(Alignment::Left);
    legend.render(chunks[1], buf);
}

#[cfg(test)]
mod tests {
    use crate::ui::test_support::{app, render};

    #[test]
    fn shows_title_and_counts() {
        let app = app(12);
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Welcome to Sample Quiz!"));
        assert!(rendered.contains("available: 12"));
        assert!(rendered.contains("[ 12 ]"));
        assert!(rendered.contains("Start (12 questions)"));
        assert!(rendered.contains("all 12 questions"));
    }

    #[test]
    fn reflects_configured_count() {
        let mut app = app(12);
        app.quiz.configure(4);
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("[ 4 ]"));
        assert!(rendered.contains("Start (4 questions)"));
    }
}
