use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::ui::board;
use crate::view::{NavRow, NavRowKind};

const ACTIVE_BG: Color = Color::Rgb(0x3b, 0x82, 0xf6);

/// Story navigator pane: the content tree with collapsible folders.
pub struct NavigatorWindow;

impl NavigatorWindow {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        rows: &[NavRow],
        cursor_index: usize,
        focused: bool,
        dark_theme: bool,
    ) {
        let border_style = if focused {
            Style::default().fg(ACTIVE_BG)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title("الدليل")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if rows.is_empty() {
            let paragraph = Paragraph::new("No stories")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(paragraph, inner);
            return;
        }

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let marker = match row.kind {
                    NavRowKind::Folder { open: true } => "▾ ",
                    NavRowKind::Folder { open: false } => "▸ ",
                    NavRowKind::Leaf { .. } => "  ",
                };
                let text = format!("{}{}{}", "  ".repeat(row.indent), marker, row.label);

                let mut style = match row.kind {
                    NavRowKind::Folder { .. } => Style::default()
                        .fg(board::title_color(dark_theme))
                        .add_modifier(Modifier::BOLD),
                    NavRowKind::Leaf { active: true } => Style::default()
                        .bg(ACTIVE_BG)
                        .fg(Color::White),
                    NavRowKind::Leaf { active: false } => {
                        Style::default().fg(board::text_color(dark_theme))
                    }
                };
                if focused && i == cursor_index {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                ListItem::new(Line::from(Span::styled(text, style)).alignment(Alignment::Right))
            })
            .collect();

        // ListState keeps the cursor row scrolled into view
        let mut list_state = ListState::default();
        if focused {
            list_state.select(Some(cursor_index.min(rows.len().saturating_sub(1))));
        }
        let list = List::new(items);
        frame.render_stateful_widget(list, inner, &mut list_state);
    }
}
