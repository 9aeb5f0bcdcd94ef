use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::board::Clue;
use crate::session::Reveal;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Detail card for the open clue. A clue id that is not on the board renders
/// an empty card rather than failing.
pub struct ClueDetails<'a> {
    clue: Option<&'a Clue>,
    reveal: Reveal,
    theme: &'a Theme,
}

impl<'a> ClueDetails<'a> {
    pub fn new(clue: Option<&'a Clue>, reveal: Reveal, theme: &'a Theme) -> Self {
        Self { clue, reveal, theme }
    }

    fn body(&self) -> &'a str {
        match (self.clue, self.reveal) {
            (Some(clue), Reveal::Question) => &clue.question,
            (Some(clue), Reveal::Answer) => &clue.answer,
            (None, _) => "",
        }
    }
}

impl Widget for ClueDetails<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let title = match self.clue {
            Some(clue) if clue.daily_double => " Daily Double! ".to_string(),
            Some(clue) => match clue.value {
                Some(v) => format!(" {} for {v} ", clue.category.title),
                None => format!(" {} ", clue.category.title),
            },
            None => String::new(),
        };
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.overlay_fg()))
            .style(Style::default().bg(colors.overlay_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let text_height = layout[1].height;
        let body = Paragraph::new(self.body())
            .style(Style::default().fg(colors.overlay_fg()).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        // Vertically centre short clues
        let lines = wrapped_line_count(self.body(), layout[1].width as usize) as u16;
        let pad = text_height.saturating_sub(lines) / 2;
        let body_area = Rect::new(
            layout[1].x,
            layout[1].y + pad,
            layout[1].width,
            text_height - pad,
        );
        body.render(body_area, buf);

        let toggle_label = match self.reveal {
            Reveal::Question => " [Space] Show Answer ",
            Reveal::Answer => " [Space] Show Question ",
        };
        let buttons = Line::from(vec![
            Span::styled(
                toggle_label,
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.confirm_button())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                " [Esc] Done ",
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.dismiss_button())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(layout[2], buf);
    }
}
