use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::board;
use crate::view::{DetailView, kind_color};

/// Detail pane for the selected word: color-coded segment breakdown,
/// definitions, and the conjugation table for verb segments.
pub struct DetailWindow;

impl DetailWindow {
    pub fn render(frame: &mut Frame, area: Rect, view: &DetailView, dark_theme: bool) {
        let block = Block::default().title("إعراب").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let text_width = inner.width.saturating_sub(2).max(10) as usize;
        let mut lines: Vec<Line> = Vec::new();

        // headline: the word with each segment in its category color
        let headline_spans: Vec<Span> = view
            .headline
            .iter()
            .map(|(text, kind)| {
                Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(kind_color(*kind, dark_theme))
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        lines.push(Line::from(headline_spans).alignment(Alignment::Center));
        lines.push(
            Line::from(Span::styled(
                view.gloss.clone(),
                Style::default().fg(board::gloss_color(dark_theme)),
            ))
            .alignment(Alignment::Center),
        );

        for segment in &view.segments {
            lines.push(Line::default());
            lines.push(
                Line::from(vec![
                    Span::styled(
                        segment.word.clone(),
                        Style::default()
                            .fg(kind_color(segment.kind, dark_theme))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        format!("({})", segment.kind_label),
                        Style::default()
                            .fg(board::gloss_color(dark_theme))
                            .add_modifier(Modifier::DIM),
                    ),
                ])
                .alignment(Alignment::Right),
            );
            for wrapped in textwrap::wrap(&segment.definition, text_width) {
                lines.push(
                    Line::from(Span::styled(
                        wrapped.into_owned(),
                        Style::default().fg(board::text_color(dark_theme)),
                    ))
                    .alignment(Alignment::Right),
                );
            }
            if let Some(rows) = &segment.conjugation {
                for (label, value) in rows {
                    lines.push(
                        Line::from(vec![
                            Span::styled(
                                format!("{label:>18}  "),
                                Style::default()
                                    .fg(board::gloss_color(dark_theme))
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                value.clone(),
                                Style::default().fg(board::title_color(dark_theme)),
                            ),
                        ])
                        .alignment(Alignment::Left),
                    );
                }
            }
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);
    }
}
