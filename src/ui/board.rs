use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::models::{Document, WordRef};
use crate::selection::SelectionState;
use crate::view::{self, GridLine};

const TITLE_LIGHT: Color = Color::Rgb(0x1e, 0x40, 0xaf);
const TITLE_DARK: Color = Color::Rgb(0xbf, 0xdb, 0xfe);
const SELECTED_BG_LIGHT: Color = Color::Rgb(0xdb, 0xea, 0xfe);
const SELECTED_BG_DARK: Color = Color::Rgb(0x1e, 0x3a, 0x8a);
const GLOSS_LIGHT: Color = Color::Rgb(0x4b, 0x55, 0x63);
const GLOSS_DARK: Color = Color::Rgb(0xd1, 0xd5, 0xdb);

/// Word grid widget: renders the active document line by line, words
/// right-to-left, with the gloss row under each line of words.
pub struct Board {
    scroll: u16,
}

impl Board {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        document: &Document,
        state: &SelectionState,
        cursor: Option<WordRef>,
    ) {
        let grid = view::grid_lines(document, state);
        if grid.is_empty() {
            self.render_empty(frame, area, state);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut cursor_row = 0usize;

        for grid_line in &grid {
            match grid_line {
                GridLine::Title { text, .. } => {
                    if !lines.is_empty() {
                        lines.push(Line::default());
                    }
                    lines.push(
                        Line::from(Span::styled(
                            text.clone(),
                            Style::default()
                                .fg(title_color(state.dark_theme))
                                .add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Right),
                    );
                    lines.push(Line::default());
                }
                GridLine::Words { cells } => {
                    let mut word_spans = Vec::new();
                    let mut gloss_spans = Vec::new();
                    // display order is right-to-left
                    for cell in cells.iter().rev() {
                        let on_cursor = cursor == Some(cell.word_ref);
                        if on_cursor {
                            cursor_row = lines.len();
                        }
                        let mut style = Style::default().fg(text_color(state.dark_theme));
                        if cell.selected {
                            style = style
                                .bg(selected_bg(state.dark_theme))
                                .add_modifier(Modifier::BOLD);
                        }
                        if on_cursor {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                        if !word_spans.is_empty() {
                            word_spans.push(Span::raw("  "));
                            gloss_spans.push(Span::raw("  "));
                        }
                        word_spans.push(Span::styled(cell.text.clone(), style));
                        if let Some(gloss) = &cell.gloss {
                            let gloss_style = if on_cursor || cell.selected {
                                Style::default().fg(gloss_color(state.dark_theme))
                            } else {
                                Style::default()
                                    .fg(gloss_color(state.dark_theme))
                                    .add_modifier(Modifier::DIM)
                            };
                            gloss_spans.push(Span::styled(gloss.clone(), gloss_style));
                        }
                    }
                    lines.push(Line::from(word_spans).alignment(Alignment::Right));
                    if !state.hide_gloss {
                        lines.push(Line::from(gloss_spans).alignment(Alignment::Right));
                    }
                }
            }
        }

        self.ensure_visible(cursor_row as u16, area.height, lines.len() as u16);

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    /// Keep the cursor row inside the viewport, with one row of margin.
    fn ensure_visible(&mut self, row: u16, height: u16, total: u16) {
        if height == 0 {
            return;
        }
        if row < self.scroll {
            self.scroll = row;
        } else if row + 2 > self.scroll + height {
            self.scroll = row + 2 - height;
        }
        self.scroll = self.scroll.min(total.saturating_sub(height));
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, state: &SelectionState) {
        let lines = vec![
            Line::default(),
            Line::from("No stories loaded").alignment(Alignment::Center),
            Line::from("Point qisas at a content directory to start reading")
                .alignment(Alignment::Center),
        ];
        let paragraph = Paragraph::new(lines)
            .style(
                Style::default()
                    .fg(gloss_color(state.dark_theme))
                    .add_modifier(Modifier::ITALIC),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub fn text_color(dark: bool) -> Color {
    view::kind_color(crate::models::SegmentKind::Other, dark)
}

pub fn bg_color(dark: bool) -> Color {
    if dark {
        Color::Rgb(0x11, 0x18, 0x27)
    } else {
        Color::Rgb(0xf8, 0xfa, 0xfc)
    }
}

pub fn title_color(dark: bool) -> Color {
    if dark { TITLE_DARK } else { TITLE_LIGHT }
}

pub fn selected_bg(dark: bool) -> Color {
    if dark { SELECTED_BG_DARK } else { SELECTED_BG_LIGHT }
}

pub fn gloss_color(dark: bool) -> Color {
    if dark { GLOSS_DARK } else { GLOSS_LIGHT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_scroll_follows_cursor() {
        let mut board = Board::new();
        board.ensure_visible(0, 10, 40);
        assert_eq!(board.scroll, 0);

        // cursor below the viewport scrolls down
        board.ensure_visible(20, 10, 40);
        assert_eq!(board.scroll, 12);

        // cursor above the viewport scrolls back up
        board.ensure_visible(5, 10, 40);
        assert_eq!(board.scroll, 5);
    }

    #[test]
    fn test_board_scroll_clamped_to_content() {
        let mut board = Board::new();
        board.ensure_visible(39, 10, 40);
        assert!(board.scroll <= 30);
    }
}
