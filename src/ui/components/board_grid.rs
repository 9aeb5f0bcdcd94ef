use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::board::Board;
use crate::session::PlayState;
use crate::ui::layout::LayoutTier;
use crate::ui::theme::Theme;

/// Row/column cursor over the board, clamped to whatever the board holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub column: usize,
    pub row: usize,
}

impl GridCursor {
    pub fn left(self, board: &Board) -> Self {
        Self {
            column: self.column.saturating_sub(1),
            ..self
        }
        .clamped(board)
    }

    pub fn right(self, board: &Board) -> Self {
        Self {
            column: self.column + 1,
            ..self
        }
        .clamped(board)
    }

    pub fn up(self, board: &Board) -> Self {
        Self {
            row: self.row.saturating_sub(1),
            ..self
        }
        .clamped(board)
    }

    pub fn down(self, board: &Board) -> Self {
        Self {
            row: self.row + 1,
            ..self
        }
        .clamped(board)
    }

    /// Pull the cursor back onto an existing clue. Columns can be ragged when
    /// the source had few valued clues.
    pub fn clamped(self, board: &Board) -> Self {
        let columns = board.columns();
        if columns.is_empty() {
            return Self::default();
        }
        let column = self.column.min(columns.len() - 1);
        let height = columns[column].clues.len();
        let row = self.row.min(height.saturating_sub(1));
        Self { column, row }
    }
}

pub struct BoardGrid<'a> {
    play: &'a PlayState,
    cursor: GridCursor,
    tier: LayoutTier,
    theme: &'a Theme,
}

impl<'a> BoardGrid<'a> {
    pub fn new(play: &'a PlayState, cursor: GridCursor, tier: LayoutTier, theme: &'a Theme) -> Self {
        Self {
            play,
            cursor,
            tier,
            theme,
        }
    }
}

/// Category titles arrive lowercase from the API.
pub fn capitalize_words(title: &str) -> String {
    title
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Widget for BoardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let board = self.play.board();

        if board.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No categories on this page. Press r to reset.",
                Style::default().fg(colors.text_muted()),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let n = board.columns().len() as u32;
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
            .split(area);

        let tile_height = self.tier.tile_height();
        let mut row_constraints = vec![Constraint::Length(self.tier.title_height())];
        row_constraints.extend((0..board.max_rows()).map(|_| Constraint::Length(tile_height + 1)));
        row_constraints.push(Constraint::Min(0));

        for (col_idx, (column, col_area)) in board.columns().iter().zip(column_areas.iter()).enumerate() {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(row_constraints.clone())
                .split(col_area.inner(ratatui::layout::Margin::new(1, 0)));

            Paragraph::new(capitalize_words(&column.title))
                .style(
                    Style::default()
                        .fg(colors.category_fg())
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(rows[0], buf);

            for (row_idx, clue) in column.clues.iter().enumerate() {
                let slot = rows[row_idx + 1];
                let tile = Rect::new(slot.x, slot.y, slot.width, tile_height.min(slot.height));
                let visited = self.play.visited().contains(&clue.id);
                let is_cursor = self.cursor == (GridCursor { column: col_idx, row: row_idx });

                let bg = if visited {
                    colors.tile_visited_bg()
                } else {
                    colors.tile_bg()
                };
                let mut value_style = Style::default()
                    .fg(colors.tile_value())
                    .bg(bg)
                    .add_modifier(Modifier::BOLD);
                if is_cursor && tile_height == 1 {
                    value_style = value_style.add_modifier(Modifier::REVERSED);
                }

                let mut block = Block::default().style(Style::default().bg(bg));
                if tile_height >= 3 {
                    let border_fg = if is_cursor { colors.cursor() } else { bg };
                    block = Block::bordered().border_style(Style::default().fg(border_fg).bg(bg)).style(Style::default().bg(bg));
                }

                Paragraph::new(Line::from(Span::styled(clue.tile_label(), value_style)))
                    .alignment(Alignment::Center)
                    .block(block)
                    .render(tile, buf);
            }
        }
    }
}
