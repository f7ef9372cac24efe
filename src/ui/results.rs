use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{
    bold_style, green_bold_style, italic_style, red_bold_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};
use crate::app::App;
use crate::score::{OptionMark, ReviewItem};
use crate::util::format_elapsed;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let quiz = &app.quiz;
    let results = quiz.compute_results();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(6), // banner
            Constraint::Length(1), // padding
            Constraint::Min(1),    // review
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (verdict_style, verdict) = if results.passed {
        (green_bold_style(), "Congratulations, you passed!")
    } else {
        (red_bold_style(), "Unfortunately you did not pass. Try again.")
    };

    let banner = vec![
        Line::from(format!(
            "You scored {} of {} points ({:.2}%).",
            results.score, results.total_points, results.percentage
        )),
        Line::from(format!(
            "Time: {}",
            format_elapsed(quiz.final_elapsed_seconds().unwrap_or_default())
        )),
        Line::from(""),
        Line::from(Span::styled(verdict, verdict_style)),
    ];
    Paragraph::new(banner)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(verdict_style)
                .title(Span::styled(" Quiz finished! ", bold_style())),
        )
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    let review = quiz.review();
    let lines: Vec<Line> = review
        .iter()
        .skip(app.review_scroll)
        .flat_map(review_lines)
        .collect();

    let shown_from = (app.review_scroll + 1).min(review.len());
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!(" Answer summary ({}/{}) ", shown_from, review.len())),
        )
        .wrap(Wrap { trim: false })
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)estart / (up/down) scroll / (esc)ape",
        italic_style(),
    ))
    .render(chunks[3], buf);
}

fn review_lines(item: &ReviewItem) -> Vec<Line<'static>> {
    let verdict = if item.is_correct {
        Span::styled("correct", green_bold_style())
    } else {
        Span::styled("wrong", red_bold_style())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("Question {}: ", item.number), bold_style()),
            verdict,
        ]),
        Line::from(Span::styled(item.question.clone(), bold_style())),
    ];

    lines.extend(item.options.iter().map(|opt| {
        let (marker, style) = match opt.mark {
            OptionMark::Correct => ("+ ", Style::default().fg(Color::Green)),
            OptionMark::WrongChoice => ("x ", Style::default().fg(Color::Red)),
            OptionMark::Neutral => ("  ", Style::default()),
        };
        Line::from(Span::styled(format!("{}{}: {}", marker, opt.key, opt.text), style))
    }));
    lines.push(Line::from(""));
    lines
}
