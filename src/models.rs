use serde::Deserialize;

use crate::error::TreeError;

/// Grammatical category of a word segment.
///
/// Content files spell these in lowercase; anything unrecognized maps to
/// `Other` so hand-authored files with new categories still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Particle,
    Verb,
    Noun,
    Pronoun,
    Other,
}

impl Default for SegmentKind {
    fn default() -> Self {
        SegmentKind::Other
    }
}

impl<'de> Deserialize<'de> for SegmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "particle" => SegmentKind::Particle,
            "verb" => SegmentKind::Verb,
            "noun" => SegmentKind::Noun,
            "pronoun" => SegmentKind::Pronoun,
            _ => SegmentKind::Other,
        })
    }
}

/// One grammatical segment of a word, e.g. the attached pronoun of a verb.
///
/// The six conjugation fields are only meaningful when `kind` is `Verb`;
/// authors routinely omit some of them, so each is optional in storage and
/// rendered as an empty string.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MetaSegment {
    #[serde(default)]
    pub word: String,
    #[serde(rename = "type", default)]
    pub kind: SegmentKind,
    #[serde(default)]
    pub definition: String,
    pub root: Option<String>,
    pub past: Option<String>,
    pub future: Option<String>,
    pub masdar: Option<String>,
    pub command: Option<String>,
    pub active_participle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Word {
    /// Undiacritized form.
    #[serde(default)]
    pub base: String,
    /// Fully diacritized form.
    #[serde(default)]
    pub harakat: String,
    /// English gloss.
    #[serde(default)]
    pub english: String,
    pub metadata: Option<Vec<MetaSegment>>,
}

/// Words in logical (storage) order; rendering reverses them for RTL display.
pub type Line = Vec<Word>;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// One parsed content file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub stories: Vec<Story>,
}

impl Document {
    /// Title of the first story, used as the navigator label for a leaf.
    pub fn first_title(&self) -> Option<&str> {
        self.stories
            .first()
            .map(|s| s.title.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Resolve a word reference against this document.
    pub fn word(&self, word_ref: WordRef) -> Option<&Word> {
        self.stories
            .get(word_ref.story)?
            .lines
            .get(word_ref.line)?
            .get(word_ref.word)
    }
}

/// Position of a single word inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordRef {
    pub story: usize,
    pub line: usize,
    pub word: usize,
}

impl WordRef {
    pub fn new(story: usize, line: usize, word: usize) -> Self {
        Self { story, line, word }
    }
}

/// A content file addressed by its path segments relative to the content root.
///
/// The path uniquely identifies a leaf in the content tree. Duplicate paths
/// are not rejected; the later record wins when the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    path: Vec<String>,
    pub document: Document,
}

impl ContentRecord {
    /// A record must be addressable: an empty path is rejected here so the
    /// tree builder never sees one.
    pub fn new(path: Vec<String>, document: Document) -> Result<Self, TreeError> {
        if path.is_empty() || path.iter().any(|s| s.is_empty()) {
            return Err(TreeError::MalformedPath);
        }
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Final path segment (the file name).
    pub fn file_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}
