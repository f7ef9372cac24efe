use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{
    bold_style, dim_style, green_bold_style, italic_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};
use crate::app::App;
use crate::util::{format_elapsed, round_percent};

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let quiz = &app.quiz;
    let (Some(question), Some(index)) = (quiz.current_question(), quiz.current_question_index())
    else {
        return;
    };
    let total = quiz.session_questions().len();
    let selected = quiz.selected_answer();
    let peeking = quiz.is_peeking();

    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2).max(1) as usize;
    let question_lines = question.question.width().div_ceil(inner_width).max(1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),                  // header
            Constraint::Length(1),                  // padding
            Constraint::Length(question_lines + 2), // question text
            Constraint::Min(1),                     // options
            Constraint::Length(1),                  // navigation
            Constraint::Length(1),                  // progress
        ])
        .split(area);

    let header_parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("Question {} of {}", index + 1, total), bold_style()),
        Span::styled(
            format!("   {}", format_elapsed(quiz.elapsed_seconds())),
            dim_style(),
        ),
    ]))
    .render(header_parts[0], buf);

    let reveal_label = if peeking {
        Span::styled("answer marked", green_bold_style().add_modifier(Modifier::DIM))
    } else {
        Span::styled("(?) show answer", Style::default().fg(Color::Cyan))
    };
    Paragraph::new(reveal_label)
        .alignment(Alignment::Right)
        .render(header_parts[1], buf);

    Paragraph::new(Span::styled(question.question.as_str(), bold_style()))
        .block(Block::default().borders(Borders::ALL).title(quiz.title()))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let options: Vec<Line> = question
        .options
        .iter()
        .map(|(key, text)| {
            let is_choice = selected == Some(key.as_str());
            let style = if peeking && question.is_correct(key) {
                green_bold_style()
            } else if is_choice {
                bold_style().fg(Color::Blue).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let marker = if is_choice { "> " } else { "  " };
            Line::from(Span::styled(format!("{}{}: {}", marker, key, text), style))
        })
        .collect();

    Paragraph::new(options)
        .wrap(Wrap { trim: false })
        .render(chunks[3], buf);

    let enabled = |on: bool| {
        if on {
            italic_style()
        } else {
            italic_style().patch(dim_style())
        }
    };
    let next_label = if quiz.is_last_question() {
        "(->) finish quiz"
    } else {
        "(->) next question"
    };
    Paragraph::new(Line::from(vec![
        Span::styled("(<-) previous question", enabled(app.can_go_back())),
        Span::raw("   "),
        Span::styled(next_label, enabled(app.can_advance())),
        Span::styled("   (esc) menu", italic_style()),
    ]))
    .render(chunks[4], buf);

    let percent = round_percent(quiz.progress_percent());
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(percent)
        .label(format!("{}%", percent))
        .render(chunks[5], buf);
}
