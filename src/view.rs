use ratatui::style::Color;

use crate::models::{Document, SegmentKind, WordRef};
use crate::selection::SelectionState;
use crate::tree::TreeNode;

/// One row of the story navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct NavRow {
    pub label: String,
    pub kind: NavRowKind,
    pub indent: usize,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRowKind {
    Folder { open: bool },
    Leaf { active: bool },
}

/// Flatten the tree into visible navigator rows.
///
/// Children of a collapsed folder are skipped entirely. Folder labels are the
/// raw path segment; leaf labels are the first story title, falling back to
/// the file name without its `.json` suffix.
pub fn navigator_rows(tree: &TreeNode, state: &SelectionState) -> Vec<NavRow> {
    let mut rows = Vec::new();
    if let TreeNode::Folder { children, .. } = tree {
        for child in children {
            push_rows(child, state, &mut Vec::new(), 0, &mut rows);
        }
    }
    rows
}

fn push_rows(
    node: &TreeNode,
    state: &SelectionState,
    prefix: &mut Vec<String>,
    indent: usize,
    rows: &mut Vec<NavRow>,
) {
    prefix.push(node.name().to_string());
    match node {
        TreeNode::Leaf { name, record } => {
            let label = record
                .document
                .first_title()
                .map(str::to_string)
                .unwrap_or_else(|| name.trim_end_matches(".json").to_string());
            rows.push(NavRow {
                label,
                kind: NavRowKind::Leaf {
                    active: state.active_leaf() == Some(prefix.as_slice()),
                },
                indent,
                path: prefix.clone(),
            });
        }
        TreeNode::Folder { name, children } => {
            let open = state.is_folder_open(prefix);
            rows.push(NavRow {
                label: name.clone(),
                kind: NavRowKind::Folder { open },
                indent,
                path: prefix.clone(),
            });
            if open {
                for child in children {
                    push_rows(child, state, prefix, indent + 1, rows);
                }
            }
        }
    }
    prefix.pop();
}

/// One word cell of the grid, in logical order; the widget reverses cells
/// for right-to-left display.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub text: String,
    pub gloss: Option<String>,
    pub word_ref: WordRef,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridLine {
    Title { story: usize, text: String },
    Words { cells: Vec<GridCell> },
}

/// Flatten the active document into renderable lines, honoring the display
/// toggles.
pub fn grid_lines(document: &Document, state: &SelectionState) -> Vec<GridLine> {
    let mut out = Vec::new();
    for (story_idx, story) in document.stories.iter().enumerate() {
        out.push(GridLine::Title {
            story: story_idx,
            text: story.title.clone(),
        });
        for (line_idx, line) in story.lines.iter().enumerate() {
            let cells = line
                .iter()
                .enumerate()
                .map(|(word_idx, word)| {
                    let word_ref = WordRef::new(story_idx, line_idx, word_idx);
                    GridCell {
                        text: if state.hide_diacritics {
                            word.base.clone()
                        } else {
                            word.harakat.clone()
                        },
                        gloss: (!state.hide_gloss).then(|| word.english.clone()),
                        word_ref,
                        selected: state.selected_word() == Some(word_ref),
                    }
                })
                .collect();
            out.push(GridLine::Words { cells });
        }
    }
    out
}

/// Labels of the verb conjugation table, in the fixed display order.
pub const VERB_FIELD_LABELS: [&str; 6] =
    ["Root", "Past", "Future", "Masdar", "Command", "Active Participle"];

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDetail {
    pub word: String,
    pub kind: SegmentKind,
    pub kind_label: &'static str,
    pub definition: String,
    /// Conjugation rows for verb segments: (label, value) in the
    /// `VERB_FIELD_LABELS` order, missing fields as empty strings.
    pub conjugation: Option<Vec<(&'static str, String)>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Headline spans: one per metadata segment, or a single uncolored span
    /// with the word's display form when it has no metadata.
    pub headline: Vec<(String, SegmentKind)>,
    pub gloss: String,
    pub segments: Vec<SegmentDetail>,
}

/// Build the detail pane content for the selected word, if any.
pub fn detail_view(document: &Document, state: &SelectionState) -> Option<DetailView> {
    let word_ref = state.selected_word()?;
    let word = document.word(word_ref)?;

    let (headline, segments) = match &word.metadata {
        Some(meta) => {
            let headline = meta
                .iter()
                .map(|seg| (seg.word.clone(), seg.kind))
                .collect();
            let segments = meta
                .iter()
                .map(|seg| {
                    let conjugation = (seg.kind == SegmentKind::Verb).then(|| {
                        let values = [
                            &seg.root,
                            &seg.past,
                            &seg.future,
                            &seg.masdar,
                            &seg.command,
                            &seg.active_participle,
                        ];
                        VERB_FIELD_LABELS
                            .iter()
                            .zip(values)
                            .map(|(&label, value)| (label, value.clone().unwrap_or_default()))
                            .collect()
                    });
                    SegmentDetail {
                        word: seg.word.clone(),
                        kind: seg.kind,
                        kind_label: kind_label(seg.kind),
                        definition: seg.definition.clone(),
                        conjugation,
                    }
                })
                .collect();
            (headline, segments)
        }
        None => {
            let form = if state.hide_diacritics {
                word.base.clone()
            } else {
                word.harakat.clone()
            };
            (vec![(form, SegmentKind::Other)], Vec::new())
        }
    };

    Some(DetailView {
        headline,
        gloss: word.english.clone(),
        segments,
    })
}

pub fn kind_label(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Particle => "particle",
        SegmentKind::Verb => "verb",
        SegmentKind::Noun => "noun",
        SegmentKind::Pronoun => "pronoun",
        SegmentKind::Other => "other",
    }
}

/// Category color table, one light/dark pair per grammatical category.
/// The values are the original palette of the content set: green for
/// particles, blue for verbs, purple for nouns, pink for pronouns, and the
/// theme foreground for everything else.
const SEGMENT_COLORS: [(SegmentKind, Color, Color); 5] = [
    (
        SegmentKind::Particle,
        Color::Rgb(0x22, 0xc5, 0x5e),
        Color::Rgb(0x4a, 0xde, 0x80),
    ),
    (
        SegmentKind::Verb,
        Color::Rgb(0x3b, 0x82, 0xf6),
        Color::Rgb(0x60, 0xa5, 0xfa),
    ),
    (
        SegmentKind::Noun,
        Color::Rgb(0x93, 0x33, 0xea),
        Color::Rgb(0xc0, 0x84, 0xfc),
    ),
    (
        SegmentKind::Pronoun,
        Color::Rgb(0xec, 0x48, 0x99),
        Color::Rgb(0xf4, 0x72, 0xb6),
    ),
    (
        SegmentKind::Other,
        Color::Rgb(0x1f, 0x29, 0x37),
        Color::Rgb(0xf3, 0xf4, 0xf6),
    ),
];

/// Color for a grammatical category; unknown categories take the default
/// (`Other`) entry.
pub fn kind_color(kind: SegmentKind, dark_theme: bool) -> Color {
    let row = SEGMENT_COLORS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .unwrap_or(&SEGMENT_COLORS[4]);
    if dark_theme { row.2 } else { row.1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRecord, MetaSegment, Story, Word};

    fn word(base: &str, harakat: &str, english: &str) -> Word {
        Word {
            base: base.to_string(),
            harakat: harakat.to_string(),
            english: english.to_string(),
            metadata: None,
        }
    }

    fn sample_doc() -> Document {
        Document {
            stories: vec![Story {
                title: "آدم".to_string(),
                lines: vec![vec![
                    word("قال", "قَالَ", "he said"),
                    word("الله", "اللهُ", "God"),
                ]],
            }],
        }
    }

    fn sample_tree() -> TreeNode {
        let record = |p: &[&str], doc: Document| {
            ContentRecord::new(p.iter().map(|s| s.to_string()).collect(), doc).unwrap()
        };
        TreeNode::build(vec![
            record(&["prophets", "1.json"], sample_doc()),
            record(&["prophets", "2.json"], Document::default()),
            record(&["about.json"], Document::default()),
        ])
    }

    #[test]
    fn test_navigator_rows_expanded() {
        let tree = sample_tree();
        let state = SelectionState::new(&tree);
        let rows = navigator_rows(&tree, &state);

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        // leaf 1.json gets its story title, 2.json falls back to the stripped
        // file name, and the digit-less about.json sorts after the folder
        assert_eq!(labels, vec!["prophets", "آدم", "2", "about"]);
        assert_eq!(rows[0].indent, 0);
        assert_eq!(rows[1].indent, 1);
        assert_eq!(rows[0].kind, NavRowKind::Folder { open: true });
        assert_eq!(rows[1].kind, NavRowKind::Leaf { active: true });
    }

    #[test]
    fn test_navigator_rows_collapsed_folder_hides_children() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        state.toggle_folder(&["prophets".to_string()]);

        let rows = navigator_rows(&tree, &state);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["prophets", "about"]);
        assert_eq!(rows[0].kind, NavRowKind::Folder { open: false });
    }

    #[test]
    fn test_grid_lines_toggles() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        let doc = sample_doc();

        let lines = grid_lines(&doc, &state);
        assert_eq!(lines.len(), 2);
        let GridLine::Words { cells } = &lines[1] else {
            panic!("expected a word line");
        };
        assert_eq!(cells[0].text, "قَالَ");
        assert_eq!(cells[0].gloss.as_deref(), Some("he said"));

        state.set_hide_diacritics(true);
        state.set_hide_gloss(true);
        let lines = grid_lines(&doc, &state);
        let GridLine::Words { cells } = &lines[1] else {
            panic!("expected a word line");
        };
        assert_eq!(cells[0].text, "قال");
        assert_eq!(cells[0].gloss, None);
    }

    #[test]
    fn test_grid_marks_selected_cell() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        let doc = sample_doc();
        state.select_word(&doc, WordRef::new(0, 0, 1)).unwrap();

        let lines = grid_lines(&doc, &state);
        let GridLine::Words { cells } = &lines[1] else {
            panic!("expected a word line");
        };
        assert!(!cells[0].selected);
        assert!(cells[1].selected);
    }

    #[test]
    fn test_detail_view_requires_selection() {
        let tree = sample_tree();
        let state = SelectionState::new(&tree);
        assert!(detail_view(&sample_doc(), &state).is_none());
    }

    #[test]
    fn test_detail_view_plain_word() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        let doc = sample_doc();
        state.select_word(&doc, WordRef::new(0, 0, 0)).unwrap();

        let view = detail_view(&doc, &state).unwrap();
        assert_eq!(view.headline, vec![("قَالَ".to_string(), SegmentKind::Other)]);
        assert_eq!(view.gloss, "he said");
        assert!(view.segments.is_empty());

        // hidden diacritics switch the fallback headline to the base form
        state.set_hide_diacritics(true);
        let view = detail_view(&doc, &state).unwrap();
        assert_eq!(view.headline[0].0, "قال");
    }

    #[test]
    fn test_detail_view_verb_fields_fixed_order_empty_when_missing() {
        let mut doc = sample_doc();
        doc.stories[0].lines[0][0].metadata = Some(vec![MetaSegment {
            word: "قَالَ".to_string(),
            kind: SegmentKind::Verb,
            definition: "to say".to_string(),
            root: Some("ق و ل".to_string()),
            past: Some("قَالَ".to_string()),
            future: Some("يَقُولُ".to_string()),
            masdar: None,
            command: Some("قُلْ".to_string()),
            active_participle: None,
        }]);

        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        state.select_word(&doc, WordRef::new(0, 0, 0)).unwrap();

        let view = detail_view(&doc, &state).unwrap();
        let rows = view.segments[0].conjugation.as_ref().unwrap();
        assert_eq!(rows.len(), 6);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, VERB_FIELD_LABELS);
        assert_eq!(rows[0].1, "ق و ل");
        assert_eq!(rows[3].1, ""); // masdar absent renders empty, not omitted
        assert_eq!(rows[5].1, ""); // active participle likewise
    }

    #[test]
    fn test_detail_view_non_verb_has_no_conjugation() {
        let mut doc = sample_doc();
        doc.stories[0].lines[0][1].metadata = Some(vec![MetaSegment {
            word: "اللهُ".to_string(),
            kind: SegmentKind::Noun,
            definition: "God".to_string(),
            ..MetaSegment::default()
        }]);

        let tree = sample_tree();
        let mut state = SelectionState::new(&tree);
        state.select_word(&doc, WordRef::new(0, 0, 1)).unwrap();

        let view = detail_view(&doc, &state).unwrap();
        assert_eq!(view.segments[0].kind_label, "noun");
        assert!(view.segments[0].conjugation.is_none());
    }

    #[test]
    fn test_kind_colors_distinct_and_theme_aware() {
        let kinds = [
            SegmentKind::Particle,
            SegmentKind::Verb,
            SegmentKind::Noun,
            SegmentKind::Pronoun,
            SegmentKind::Other,
        ];
        for kind in kinds {
            assert_ne!(kind_color(kind, false), kind_color(kind, true));
        }
        assert_eq!(kind_color(SegmentKind::Verb, false), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(kind_color(SegmentKind::Other, true), Color::Rgb(0xf3, 0xf4, 0xf6));
    }
}
