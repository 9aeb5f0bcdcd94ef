use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

pub struct Loader<'a> {
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> Loader<'a> {
    pub fn new(error: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { error, theme }
    }
}

impl Widget for Loader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        if let Some(error) = self.error {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Load failed: {error}"),
                    Style::default().fg(colors.error()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press R to retry this page or q to quit.",
                    Style::default().fg(colors.text_muted()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(layout[2], buf);
        }
    }
}
