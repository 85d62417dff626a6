//! Board pane rendering

use crate::geometry::{Coordinate, Region};
use crate::life::LiveSet;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Top-left corner of the visible window, in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub origin: Coordinate,
}

impl Viewport {
    /// A viewport with `center` roughly in the middle of a `rows`×`cols` window
    pub fn centered_on(center: Coordinate, rows: u32, cols: u32) -> Self {
        Viewport {
            origin: Coordinate::new(
                center.row.saturating_sub((rows / 2) as i32),
                center.col.saturating_sub((cols / 2) as i32),
            ),
        }
    }

    pub fn region(&self, rows: u32, cols: u32) -> Region {
        Region::new(self.origin.row, self.origin.col, cols, rows)
    }

    /// Scroll just enough to keep `cursor` visible
    pub fn follow(&mut self, cursor: Coordinate, rows: u32, cols: u32) {
        let visible = self.region(rows, cols);
        if visible.is_empty() || visible.contains(cursor) {
            return;
        }
        if (cursor.row as i64) < visible.row as i64 {
            self.origin.row = cursor.row;
        } else if cursor.row as i64 > visible.bottom_side() {
            self.origin.row = cursor.row.saturating_sub(rows as i32 - 1);
        }
        if (cursor.col as i64) < visible.col as i64 {
            self.origin.col = cursor.col;
        } else if cursor.col as i64 > visible.right_side() {
            self.origin.col = cursor.col.saturating_sub(cols as i32 - 1);
        }
    }
}

const ALIVE: &str = "█";
const DEAD: &str = "·";

/// Render the board pane
pub fn render_board_pane(
    frame: &mut Frame,
    area: Rect,
    board: &LiveSet,
    cursor: Coordinate,
    anchor: Option<Coordinate>,
    viewport: &mut Viewport,
    generation: usize,
) {
    let block = Block::default()
        .title(format!(" Board · generation {} ", generation))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    // Account for borders
    let rows = area.height.saturating_sub(2) as u32;
    let cols = area.width.saturating_sub(2) as u32;
    viewport.follow(cursor, rows, cols);

    let alive_style = Style::default().fg(DEFAULT_THEME.alive);
    let dead_style = Style::default().fg(DEFAULT_THEME.dead);

    let mut lines = Vec::with_capacity(rows as usize);
    for r in 0..rows as i32 {
        let mut spans = Vec::with_capacity(cols as usize);
        for c in 0..cols as i32 {
            let Some(cell) = viewport.origin.offset(r, c) else {
                spans.push(Span::raw(" "));
                continue;
            };
            let alive = board.contains(cell);
            let mut style = if alive { alive_style } else { dead_style };
            if cell == cursor {
                style = style.bg(DEFAULT_THEME.cursor_bg);
            } else if Some(cell) == anchor {
                style = style.bg(DEFAULT_THEME.anchor_bg);
            }
            spans.push(Span::styled(if alive { ALIVE } else { DEAD }, style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
