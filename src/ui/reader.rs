use std::io;

use arboard::Clipboard;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::config::Config;
use crate::content::ContentSource;
use crate::logging;
use crate::models::{Document, WordRef};
use crate::selection::SelectionState;
use crate::tree::TreeNode;
use crate::ui::board::{self, Board};
use crate::ui::windows::{
    detail::DetailWindow,
    help::HelpWindow,
    navigator::NavigatorWindow,
    settings::{SettingsWindow, ToggleItem},
};
use crate::view;

const BANNER_LIGHT: Color = Color::Rgb(0x1d, 0x4e, 0xd8);
const BANNER_DARK: Color = Color::Rgb(0x1e, 0x3a, 0x8a);
const NAVIGATOR_WIDTH: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Navigator,
    Grid,
    Settings,
}

/// Transient UI state not covered by the selection state: focus, cursors,
/// popups and the status message.
#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub navigator_visible: bool,
    pub nav_cursor: usize,
    /// Word the grid cursor is on; selection only changes on Enter/Space.
    pub cursor: Option<WordRef>,
    pub show_help: bool,
    pub help_scroll: u16,
    pub settings_cursor: usize,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Grid,
            navigator_visible: true,
            nav_cursor: 0,
            cursor: None,
            show_help: false,
            help_scroll: 0,
            settings_cursor: 0,
            message: None,
            should_quit: false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application: owns the terminal, the immutable tree and the single
/// selection state, and dispatches key events to selection transitions.
pub struct Reader {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    tree: TreeNode,
    selection: SelectionState,
    ui: UiState,
    board: Board,
    clipboard: Option<Clipboard>,
}

impl Reader {
    pub fn new(config: Config) -> eyre::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        let (tree, mut selection) = crate::init(Vec::new());
        apply_settings(&mut selection, &config.settings);

        Ok(Self {
            terminal,
            config,
            tree,
            selection,
            ui: UiState::new(),
            board: Board::new(),
            clipboard: None,
        })
    }

    /// One-shot startup load. A failed or empty load still leaves a usable
    /// (empty) session.
    pub fn load_content(&mut self, source: &ContentSource) {
        let records = source.load();
        logging::info(format!("loaded {} content records", records.len()));

        let (tree, mut selection) = crate::init(records);
        apply_settings(&mut selection, &self.config.settings);
        self.tree = tree;
        self.selection = selection;

        self.ui = UiState::new();
        self.ui.cursor = self.first_word();
        self.board.scroll_to_top();
    }

    fn active_document(&self) -> Option<&Document> {
        self.tree
            .find_leaf(self.selection.active_leaf()?)
            .map(|record| &record.document)
    }

    fn first_word(&self) -> Option<WordRef> {
        let document = self.active_document()?;
        for (story, s) in document.stories.iter().enumerate() {
            for (line, l) in s.lines.iter().enumerate() {
                if !l.is_empty() {
                    return Some(WordRef::new(story, line, 0));
                }
            }
        }
        None
    }

    /// Run the main application loop.
    pub fn run(&mut self) -> eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
        if self.config.settings.mouse_support {
            crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;
        }

        self.terminal.clear()?;
        self.terminal.hide_cursor()?;

        loop {
            if self.ui.should_quit {
                break;
            }

            let tree = &self.tree;
            let selection = &self.selection;
            let ui = &self.ui;
            let board = &mut self.board;
            let document = tree
                .find_leaf(selection.active_leaf().unwrap_or(&[]))
                .map(|record| &record.document);
            let keymap_hint = &self.config.keymap_user_dict().toggle_navigator;
            self.terminal.draw(|frame| {
                render(frame, tree, selection, ui, board, document, keymap_hint);
            })?;

            if let Ok(event) = crossterm::event::read() {
                match event {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key_event(key)?;
                        }
                    }
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollDown => self.move_line(1),
                        MouseEventKind::ScrollUp => self.move_line(-1),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        if self.config.settings.mouse_support {
            crossterm::execute!(io::stdout(), crossterm::event::DisableMouseCapture)?;
        }
        crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> eyre::Result<()> {
        self.ui.message = None;

        if self.ui.show_help {
            self.handle_help_keys(key);
            return Ok(());
        }
        match self.ui.focus {
            Focus::Settings => self.handle_settings_keys(key),
            Focus::Navigator => self.handle_navigator_keys(key),
            Focus::Grid => self.handle_grid_keys(key),
        }
        Ok(())
    }

    /// Keys shared by the navigator and grid modes. Returns true when the
    /// key was consumed.
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let keymap = &self.config.keymap;
        let KeyCode::Char(c) = key.code else {
            return false;
        };
        if keymap.quit.contains(&c) {
            self.ui.should_quit = true;
        } else if keymap.help.contains(&c) {
            self.ui.show_help = true;
            self.ui.help_scroll = 0;
        } else if keymap.toggle_diacritics.contains(&c) {
            let hide = !self.selection.hide_diacritics;
            self.selection.set_hide_diacritics(hide);
        } else if keymap.toggle_gloss.contains(&c) {
            let hide = !self.selection.hide_gloss;
            self.selection.set_hide_gloss(hide);
        } else if keymap.switch_theme.contains(&c) {
            let dark = !self.selection.dark_theme;
            self.selection.set_dark_theme(dark);
        } else if keymap.settings.contains(&c) {
            self.selection.set_settings_panel_visible(true);
            self.ui.focus = Focus::Settings;
            self.ui.settings_cursor = 0;
        } else if keymap.toggle_navigator.contains(&c) {
            self.ui.navigator_visible = !self.ui.navigator_visible;
            self.ui.focus = if self.ui.navigator_visible {
                Focus::Navigator
            } else {
                Focus::Grid
            };
        } else if keymap.yank_word.contains(&c) {
            self.yank_word();
        } else {
            return false;
        }
        true
    }

    fn handle_help_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let max = HelpWindow::get_total_lines().saturating_sub(1) as u16;
                self.ui.help_scroll = (self.ui.help_scroll + 1).min(max);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui.help_scroll = self.ui.help_scroll.saturating_sub(1);
            }
            _ => {
                self.ui.show_help = false;
            }
        }
    }

    fn handle_settings_keys(&mut self, key: KeyEvent) {
        let close = matches!(key.code, KeyCode::Esc)
            || matches!(key.code, KeyCode::Char(c)
                if self.config.keymap.settings.contains(&c) || self.config.keymap.quit.contains(&c));
        if close {
            self.selection.set_settings_panel_visible(false);
            self.ui.focus = Focus::Grid;
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let last = ToggleItem::all().len() - 1;
                self.ui.settings_cursor = (self.ui.settings_cursor + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui.settings_cursor = self.ui.settings_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                match ToggleItem::all()[self.ui.settings_cursor] {
                    ToggleItem::HideDiacritics => {
                        let hide = !self.selection.hide_diacritics;
                        self.selection.set_hide_diacritics(hide);
                    }
                    ToggleItem::HideGloss => {
                        let hide = !self.selection.hide_gloss;
                        self.selection.set_hide_gloss(hide);
                    }
                    ToggleItem::DarkTheme => {
                        let dark = !self.selection.dark_theme;
                        self.selection.set_dark_theme(dark);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_navigator_keys(&mut self, key: KeyEvent) {
        let rows = view::navigator_rows(&self.tree, &self.selection);
        match key.code {
            KeyCode::Tab => {
                self.ui.focus = Focus::Grid;
                return;
            }
            KeyCode::Down => {
                self.ui.nav_cursor = (self.ui.nav_cursor + 1).min(rows.len().saturating_sub(1));
                return;
            }
            KeyCode::Up => {
                self.ui.nav_cursor = self.ui.nav_cursor.saturating_sub(1);
                return;
            }
            KeyCode::Enter => {
                self.activate_nav_row(&rows);
                return;
            }
            _ => {}
        }

        if let KeyCode::Char(c) = key.code {
            let keymap = &self.config.keymap;
            if keymap.scroll_down.contains(&c) {
                self.ui.nav_cursor = (self.ui.nav_cursor + 1).min(rows.len().saturating_sub(1));
                return;
            }
            if keymap.scroll_up.contains(&c) {
                self.ui.nav_cursor = self.ui.nav_cursor.saturating_sub(1);
                return;
            }
        }
        self.handle_global_keys(key);
    }

    fn activate_nav_row(&mut self, rows: &[view::NavRow]) {
        let Some(row) = rows.get(self.ui.nav_cursor) else {
            return;
        };
        match row.kind {
            view::NavRowKind::Folder { .. } => {
                self.selection.toggle_folder(&row.path);
            }
            view::NavRowKind::Leaf { .. } => {
                match self.selection.select_leaf(&self.tree, &row.path) {
                    Ok(()) => {
                        self.ui.cursor = self.first_word();
                        self.ui.focus = Focus::Grid;
                        self.board.scroll_to_top();
                    }
                    Err(err) => self.ui.message = Some(err.to_string()),
                }
            }
        }
    }

    fn handle_grid_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                if !self.ui.navigator_visible {
                    self.ui.navigator_visible = true;
                }
                self.ui.focus = Focus::Navigator;
                return;
            }
            // arrows follow the visual right-to-left direction
            KeyCode::Left => {
                self.move_word(1);
                return;
            }
            KeyCode::Right => {
                self.move_word(-1);
                return;
            }
            KeyCode::Down => {
                self.move_line(1);
                return;
            }
            KeyCode::Up => {
                self.move_line(-1);
                return;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select_under_cursor();
                return;
            }
            _ => {}
        }

        if let KeyCode::Char(c) = key.code {
            let keymap = &self.config.keymap;
            if keymap.next_word.contains(&c) {
                self.move_word(1);
                return;
            }
            if keymap.prev_word.contains(&c) {
                self.move_word(-1);
                return;
            }
            if keymap.scroll_down.contains(&c) {
                self.move_line(1);
                return;
            }
            if keymap.scroll_up.contains(&c) {
                self.move_line(-1);
                return;
            }
        }
        self.handle_global_keys(key);
    }

    fn select_under_cursor(&mut self) {
        let Some(cursor) = self.ui.cursor else {
            return;
        };
        let Some(document) = self.active_document() else {
            return;
        };
        let document = document.clone();
        if let Err(err) = self.selection.select_word(&document, cursor) {
            self.ui.message = Some(err.to_string());
        }
    }

    fn move_word(&mut self, delta: i32) {
        let Some(document) = self.active_document() else {
            return;
        };
        let Some(cursor) = self.ui.cursor else {
            self.ui.cursor = self.first_word();
            return;
        };
        let next = if delta > 0 {
            next_word(document, cursor)
        } else {
            prev_word(document, cursor)
        };
        if let Some(next) = next {
            self.ui.cursor = Some(next);
        }
    }

    fn move_line(&mut self, delta: i32) {
        let Some(document) = self.active_document() else {
            return;
        };
        let Some(cursor) = self.ui.cursor else {
            self.ui.cursor = self.first_word();
            return;
        };
        let next = if delta > 0 {
            next_line(document, cursor)
        } else {
            prev_line(document, cursor)
        };
        if let Some(next) = next {
            self.ui.cursor = Some(next);
        }
    }

    /// Copy the selected word (or the word under the cursor) to the system
    /// clipboard as "harakat — gloss".
    fn yank_word(&mut self) {
        let Some(word_ref) = self.selection.selected_word().or(self.ui.cursor) else {
            return;
        };
        let Some(word) = self.active_document().and_then(|d| d.word(word_ref)) else {
            return;
        };
        let text = if word.english.is_empty() {
            word.harakat.clone()
        } else {
            format!("{} — {}", word.harakat, word.english)
        };

        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(err) => {
                    logging::warn(format!("clipboard unavailable: {err}"));
                    self.ui.message = Some("clipboard unavailable".to_string());
                    return;
                }
            }
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => self.ui.message = Some("copied".to_string()),
                Err(err) => self.ui.message = Some(format!("copy failed: {err}")),
            }
        }
    }
}

/// Session defaults come from the configuration, applied through the same
/// transitions the keys use.
fn apply_settings(selection: &mut SelectionState, settings: &crate::settings::Settings) {
    selection.set_hide_diacritics(settings.hide_diacritics);
    selection.set_hide_gloss(settings.hide_gloss);
    selection.set_dark_theme(settings.dark_theme);
    selection.set_settings_panel_visible(settings.show_settings_panel);
}

/// Word-cursor movement in logical reading order, skipping empty lines.
fn next_word(document: &Document, cursor: WordRef) -> Option<WordRef> {
    let line_len = document.stories.get(cursor.story)?.lines.get(cursor.line)?.len();
    if cursor.word + 1 < line_len {
        return Some(WordRef::new(cursor.story, cursor.line, cursor.word + 1));
    }
    first_word_after(document, cursor.story, cursor.line)
}

fn prev_word(document: &Document, cursor: WordRef) -> Option<WordRef> {
    if cursor.word > 0 {
        return Some(WordRef::new(cursor.story, cursor.line, cursor.word - 1));
    }
    last_word_before(document, cursor.story, cursor.line)
}

fn next_line(document: &Document, cursor: WordRef) -> Option<WordRef> {
    let next = first_word_after(document, cursor.story, cursor.line)?;
    let line_len = document.stories[next.story].lines[next.line].len();
    Some(WordRef::new(
        next.story,
        next.line,
        cursor.word.min(line_len - 1),
    ))
}

fn prev_line(document: &Document, cursor: WordRef) -> Option<WordRef> {
    let prev = last_word_before(document, cursor.story, cursor.line)?;
    let line_len = document.stories[prev.story].lines[prev.line].len();
    Some(WordRef::new(
        prev.story,
        prev.line,
        cursor.word.min(line_len - 1),
    ))
}

/// First word of the first non-empty line strictly after (story, line).
fn first_word_after(document: &Document, story: usize, line: usize) -> Option<WordRef> {
    let mut story_idx = story;
    let mut line_idx = line + 1;
    while story_idx < document.stories.len() {
        let lines = &document.stories[story_idx].lines;
        while line_idx < lines.len() {
            if !lines[line_idx].is_empty() {
                return Some(WordRef::new(story_idx, line_idx, 0));
            }
            line_idx += 1;
        }
        story_idx += 1;
        line_idx = 0;
    }
    None
}

/// Last word of the last non-empty line strictly before (story, line).
fn last_word_before(document: &Document, story: usize, line: usize) -> Option<WordRef> {
    let mut story_idx = story as i64;
    let mut line_idx = line as i64 - 1;
    while story_idx >= 0 {
        let lines = &document.stories[story_idx as usize].lines;
        if line_idx < 0 {
            story_idx -= 1;
            if story_idx >= 0 {
                line_idx = document.stories[story_idx as usize].lines.len() as i64 - 1;
            }
            continue;
        }
        while line_idx >= 0 {
            let l = &lines[line_idx as usize];
            if !l.is_empty() {
                return Some(WordRef::new(
                    story_idx as usize,
                    line_idx as usize,
                    l.len() - 1,
                ));
            }
            line_idx -= 1;
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn render(
    frame: &mut Frame,
    tree: &TreeNode,
    selection: &SelectionState,
    ui: &UiState,
    board: &mut Board,
    document: Option<&Document>,
    navigator_key: &str,
) {
    let dark = selection.dark_theme;
    let frame_area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(board::bg_color(dark))),
        frame_area,
    );

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(frame_area);

    render_banner(frame, vertical[0], selection, document, navigator_key);

    // navigator docks on the right, like the web pane it replaces
    let (content_area, navigator_area) = if ui.navigator_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(NAVIGATOR_WIDTH.min(vertical[1].width / 2)),
            ])
            .split(vertical[1]);
        (columns[0], Some(columns[1]))
    } else {
        (vertical[1], None)
    };

    let detail = document.and_then(|d| view::detail_view(d, selection));
    let (grid_area, detail_area) = if detail.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Percentage(45)])
            .split(content_area);
        (split[0], Some(split[1]))
    } else {
        (content_area, None)
    };

    match document {
        Some(document) => board.render(frame, grid_area, document, selection, ui.cursor),
        None => board.render(
            frame,
            grid_area,
            &Document::default(),
            selection,
            None,
        ),
    }

    if let (Some(view), Some(area)) = (&detail, detail_area) {
        DetailWindow::render(frame, area, view, dark);
    }

    if let Some(area) = navigator_area {
        let rows = view::navigator_rows(tree, selection);
        NavigatorWindow::render(
            frame,
            area,
            &rows,
            ui.nav_cursor,
            ui.focus == Focus::Navigator,
            dark,
        );
    }

    if selection.settings_panel_visible {
        SettingsWindow::render(frame, vertical[1], selection, match ui.focus {
            Focus::Settings => ui.settings_cursor,
            _ => usize::MAX,
        });
    }

    if ui.show_help {
        HelpWindow::render(frame, frame_area, ui.help_scroll);
    }

    if let Some(message) = &ui.message {
        let area = Rect::new(
            frame_area.x,
            frame_area.y + frame_area.height.saturating_sub(1),
            frame_area.width,
            1,
        );
        frame.render_widget(
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Yellow)),
            area,
        );
    }
}

fn render_banner(
    frame: &mut Frame,
    area: Rect,
    selection: &SelectionState,
    document: Option<&Document>,
    navigator_key: &str,
) {
    let title = document
        .and_then(|d| d.first_title())
        .unwrap_or("قصص الأنبياء");
    let banner_bg = if selection.dark_theme {
        BANNER_DARK
    } else {
        BANNER_LIGHT
    };
    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("({navigator_key}: القائمة)"),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(banner_bg).fg(Color::White)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Story, Word};

    fn doc(lines_per_story: &[&[usize]]) -> Document {
        Document {
            stories: lines_per_story
                .iter()
                .map(|lines| Story {
                    title: "t".to_string(),
                    lines: lines
                        .iter()
                        .map(|&n| vec![Word::default(); n])
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_next_word_crosses_lines_and_stories() {
        let d = doc(&[&[2, 1], &[1]]);
        let r = next_word(&d, WordRef::new(0, 0, 0)).unwrap();
        assert_eq!(r, WordRef::new(0, 0, 1));
        let r = next_word(&d, r).unwrap();
        assert_eq!(r, WordRef::new(0, 1, 0));
        let r = next_word(&d, r).unwrap();
        assert_eq!(r, WordRef::new(1, 0, 0));
        assert_eq!(next_word(&d, r), None);
    }

    #[test]
    fn test_prev_word_crosses_lines_and_stories() {
        let d = doc(&[&[2, 1], &[1]]);
        let r = prev_word(&d, WordRef::new(1, 0, 0)).unwrap();
        assert_eq!(r, WordRef::new(0, 1, 0));
        let r = prev_word(&d, r).unwrap();
        assert_eq!(r, WordRef::new(0, 0, 1));
        let r = prev_word(&d, r).unwrap();
        assert_eq!(r, WordRef::new(0, 0, 0));
        assert_eq!(prev_word(&d, r), None);
    }

    #[test]
    fn test_vertical_moves_clamp_word_index() {
        let d = doc(&[&[4, 2]]);
        let r = next_line(&d, WordRef::new(0, 0, 3)).unwrap();
        assert_eq!(r, WordRef::new(0, 1, 1));
        let r = prev_line(&d, r).unwrap();
        assert_eq!(r, WordRef::new(0, 0, 1));
    }

    #[test]
    fn test_moves_skip_empty_lines() {
        let d = doc(&[&[1, 0, 2]]);
        let r = next_line(&d, WordRef::new(0, 0, 0)).unwrap();
        assert_eq!(r, WordRef::new(0, 2, 0));
        let r = prev_line(&d, r).unwrap();
        assert_eq!(r, WordRef::new(0, 0, 0));
    }
}
