use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the content tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A content record carried an empty path and cannot be placed anywhere.
    #[error("content record has an empty path")]
    MalformedPath,
}

/// A selection transition referenced something that does not exist.
///
/// These are rejected no-ops: the state is left untouched and the caller
/// decides whether to surface the rejection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no story at path {}", path.join("/"))]
    UnknownLeaf { path: Vec<String> },

    #[error("word {word} of line {line} in story {story} does not exist")]
    UnknownWord {
        story: usize,
        line: usize,
        word: usize,
    },
}

/// Per-source failures during the one-shot startup content load.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
}
