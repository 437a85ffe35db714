pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use tock::{command::hint_line, timer::TimerState};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const INPUT_PLACEHOLDER: &str = "Enter new time in seconds";

fn state_color(state: TimerState) -> Color {
    match state {
        TimerState::Idle => Color::Gray,
        TimerState::Running => Color::Green,
        TimerState::Paused => Color::Yellow,
        TimerState::Expired => Color::Red,
    }
}

/// Countdown screen
impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.timer.snapshot();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // remaining
                Constraint::Length(1), // state
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} seconds", snapshot.remaining_secs),
            bold_style.fg(state_color(snapshot.state)),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            format!("{} ({}s)", snapshot.state, snapshot.configured_secs),
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        Paragraph::new(Span::styled(hint_line(snapshot.commands), italic_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);
    }
}

pub fn render_settings(app: &App, f: &mut Frame) {
    let editor = &app.editor;
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(3), // input box
            Constraint::Length(1), // error
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Set New Timer Value",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let border_style = if editor.is_focused() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let input = if editor.input().is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(editor.input())
    };
    f.render_widget(
        input.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("seconds"),
        ),
        chunks[2],
    );

    if let Some(err) = editor.error() {
        let error = Paragraph::new(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        ))
        .alignment(Alignment::Center);
        f.render_widget(error, chunks[3]);
    }

    let legend = Paragraph::new(Span::styled(
        "(enter) Save   (esc) Cancel",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[5]);

    if editor.is_focused() {
        let inner = chunks[2];
        let max_x = inner.x + inner.width.saturating_sub(2);
        let x = (inner.x + 1).saturating_add(editor.cursor_offset()).min(max_x);
        f.set_cursor_position((x, inner.y + 1));
    }
}
