use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct ResetConfirmation<'a> {
    next_offset: u32,
    theme: &'a Theme,
}

impl<'a> ResetConfirmation<'a> {
    pub fn new(next_offset: u32, theme: &'a Theme) -> Self {
        Self { next_offset, theme }
    }
}

impl Widget for ResetConfirmation<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Reset ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.overlay_fg()))
            .style(Style::default().bg(colors.overlay_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Do you really want to reset?",
            Style::default()
                .fg(colors.overlay_fg())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("The next board starts at category {}.", self.next_offset),
            Style::default().fg(colors.text_muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let buttons = Line::from(vec![
            Span::styled(
                " [y] Yes ",
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.confirm_button())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                " [n] No ",
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.dismiss_button())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(layout[4], buf);
    }
}
