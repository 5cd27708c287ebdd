use std::fs;
use std::path::Path;

use crate::error::ContentError;
use crate::logging;
use crate::models::{ContentRecord, Document};

/// Where the startup content comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    Dir(std::path::PathBuf),
    File(std::path::PathBuf),
    Url(String),
}

impl ContentSource {
    /// A `http(s)://` argument is a URL, a `.json` file is a single story
    /// file, anything else is treated as a content directory.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            ContentSource::Url(arg.to_string())
        } else {
            let path = std::path::PathBuf::from(arg);
            if path.extension().is_some_and(|ext| ext == "json") {
                ContentSource::File(path)
            } else {
                ContentSource::Dir(path)
            }
        }
    }

    /// One-shot best-effort load. Any failure degrades to an empty record
    /// set after logging; the shell starts regardless.
    pub fn load(&self) -> Vec<ContentRecord> {
        let result = match self {
            ContentSource::Dir(path) => load_dir(path),
            ContentSource::File(path) => load_file(path).map(|r| vec![r]),
            ContentSource::Url(url) => fetch_url(url).map(|r| vec![r]),
        };
        match result {
            Ok(records) => records,
            Err(err) => {
                logging::error(format!("content load failed: {err}"));
                Vec::new()
            }
        }
    }
}

/// Recursively load every `*.json` file under `root` into a content record
/// whose path segments are the components relative to `root`.
///
/// Individual files that cannot be read or parsed are logged and skipped;
/// only an unreadable root fails the load. Directory entries are visited in
/// name order so the insertion order (and therefore sort-tie order) is the
/// same on every platform.
pub fn load_dir(root: &Path) -> Result<Vec<ContentRecord>, ContentError> {
    let mut records = Vec::new();
    walk(root, &mut Vec::new(), &mut records)?;
    Ok(records)
}

fn walk(
    dir: &Path,
    segments: &mut Vec<String>,
    records: &mut Vec<ContentRecord>,
) -> Result<(), ContentError> {
    let entries = fs::read_dir(dir).map_err(|source| ContentError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    names.sort();

    for path in names {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_dir() {
            segments.push(name.to_string());
            // a subdirectory that fails to read is skipped, not fatal
            if let Err(err) = walk(&path, segments, records) {
                logging::warn(format!("skipping {}: {err}", path.display()));
            }
            segments.pop();
        } else if path.extension().is_some_and(|ext| ext == "json") {
            let mut record_path = segments.clone();
            record_path.push(name.to_string());
            match read_record(&path, record_path) {
                Ok(record) => records.push(record),
                Err(err) => logging::warn(format!("skipping {}: {err}", path.display())),
            }
        }
    }
    Ok(())
}

/// Load a single story file as a one-segment record.
pub fn load_file(path: &Path) -> Result<ContentRecord, ContentError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("story.json")
        .to_string();
    read_record(path, vec![name])
}

fn read_record(path: &Path, record_path: Vec<String>) -> Result<ContentRecord, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Document =
        serde_json::from_str(&text).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    // record paths built from real file names are never empty
    ContentRecord::new(record_path, document).map_err(|_| ContentError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty path"),
    })
}

/// Fetch a single story document over HTTP. One attempt, no retry.
pub fn fetch_url(url: &str) -> Result<ContentRecord, ContentError> {
    let fetch_err = |message: String| ContentError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| fetch_err(e.to_string()))?;
    let document: Document = response.json().map_err(|e| fetch_err(e.to_string()))?;

    let name = url
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("remote.json")
        .to_string();
    ContentRecord::new(vec![name], document).map_err(|e| fetch_err(e.to_string()))
}
