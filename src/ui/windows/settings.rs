use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::selection::SelectionState;

/// The three display toggles, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleItem {
    HideDiacritics,
    HideGloss,
    DarkTheme,
}

impl ToggleItem {
    pub fn all() -> &'static [ToggleItem] {
        &[
            ToggleItem::HideDiacritics,
            ToggleItem::HideGloss,
            ToggleItem::DarkTheme,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToggleItem::HideDiacritics => "إخفاء الحركات (hide diacritics)",
            ToggleItem::HideGloss => "إخفاء الترجمة (hide gloss)",
            ToggleItem::DarkTheme => "الوضع الليلي (dark theme)",
        }
    }

    pub fn is_on(&self, state: &SelectionState) -> bool {
        match self {
            ToggleItem::HideDiacritics => state.hide_diacritics,
            ToggleItem::HideGloss => state.hide_gloss,
            ToggleItem::DarkTheme => state.dark_theme,
        }
    }
}

/// Floating settings panel with the display toggles.
pub struct SettingsWindow;

impl SettingsWindow {
    pub fn render(frame: &mut Frame, area: Rect, state: &SelectionState, selected_index: usize) {
        // bottom-right corner, like the floating panel it mirrors
        let width = 44.min(area.width);
        let height = 7.min(area.height);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + area.height.saturating_sub(height + 1),
            width,
            height,
        );

        frame.render_widget(Clear, popup_area);
        let block = Block::default().title("الإعدادات").borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = ToggleItem::all()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mark = if item.is_on(state) { "[x]" } else { "[ ]" };
                let style = if i == selected_index {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(format!(" {mark} {}", item.label()))).style(style)
            })
            .collect();

        let footer = Paragraph::new("Tips: Space flip | s close")
            .style(Style::default().fg(Color::DarkGray));

        frame.render_widget(List::new(items), rows[0]);
        frame.render_widget(footer, rows[1]);
    }
}
