//! In-process comparison of two extracted configuration trees

use log::debug;
use similar::TextDiff;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::config::defaults;
use crate::error::{Result, TfeError};

/// Prefix of paths from the previous tree in rendered headers
const PREVIOUS_PREFIX: &str = "previous";
/// Prefix of paths from the latest tree in rendered headers
const LATEST_PREFIX: &str = "latest";
/// Header used for the missing side of an added or removed file
const DEV_NULL: &str = "/dev/null";

/// How a file differs between the two trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// File content as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(e) => FileContent::Binary(e.into_bytes()),
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::Binary(_) => None,
        }
    }
}

/// One file that differs between the previous and the latest tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the tree root, `/`-separated
    pub path: String,
    pub kind: ChangeKind,
    pub previous: Option<FileContent>,
    pub latest: Option<FileContent>,
}

/// Compare two directory trees
///
/// Returns the changed files sorted by relative path; identical trees give
/// an empty list.
pub fn diff_trees(previous: &Path, latest: &Path) -> Result<Vec<FileChange>> {
    let mut before = read_tree(previous)?;
    let mut after = read_tree(latest)?;

    let paths: BTreeSet<String> = before.keys().chain(after.keys()).cloned().collect();
    let mut changes = Vec::new();

    for path in paths {
        let change = match (before.remove(&path), after.remove(&path)) {
            (None, Some(new)) => FileChange {
                path,
                kind: ChangeKind::Added,
                previous: None,
                latest: Some(new),
            },
            (Some(old), None) => FileChange {
                path,
                kind: ChangeKind::Removed,
                previous: Some(old),
                latest: None,
            },
            (Some(old), Some(new)) if old != new => FileChange {
                path,
                kind: ChangeKind::Modified,
                previous: Some(old),
                latest: Some(new),
            },
            _ => continue,
        };
        changes.push(change);
    }

    debug!(
        "{} file(s) differ between {} and {}",
        changes.len(),
        previous.display(),
        latest.display()
    );
    Ok(changes)
}

/// Read every regular file below `root`, keyed by relative path
fn read_tree(root: &Path) -> Result<BTreeMap<String, FileContent>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, prefix)) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .map_err(|e| TfeError::Io(format!("Failed to read '{}': {}", dir.display(), e)))?;

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{}/{}", prefix, name)
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push((entry.path(), rel));
            } else if file_type.is_symlink() {
                let target = fs::read_link(entry.path())?;
                let text = format!("symlink -> {}\n", target.display());
                files.insert(rel, FileContent::Text(text));
            } else {
                let bytes = fs::read(entry.path()).map_err(|e| {
                    TfeError::Io(format!("Failed to read '{}': {}", entry.path().display(), e))
                })?;
                files.insert(rel, FileContent::from_bytes(bytes));
            }
        }
    }

    Ok(files)
}

/// Render changes as unified diff text without context lines
pub fn render_unified(changes: &[FileChange]) -> String {
    let mut out = String::new();

    for change in changes {
        let old_header = match change.kind {
            ChangeKind::Added => DEV_NULL.to_string(),
            _ => format!("{}/{}", PREVIOUS_PREFIX, change.path),
        };
        let new_header = match change.kind {
            ChangeKind::Removed => DEV_NULL.to_string(),
            _ => format!("{}/{}", LATEST_PREFIX, change.path),
        };

        let old_text = change.previous.as_ref().map(FileContent::text);
        let new_text = change.latest.as_ref().map(FileContent::text);

        match (old_text, new_text) {
            (Some(None), _) | (_, Some(None)) => {
                out.push_str(&format!(
                    "Binary files {} and {} differ\n",
                    old_header, new_header
                ));
            }
            (old, new) => {
                let old = old.flatten().unwrap_or("");
                let new = new.flatten().unwrap_or("");
                let rendered = TextDiff::from_lines(old, new)
                    .unified_diff()
                    .context_radius(defaults::DIFF_CONTEXT_LINES)
                    .header(&old_header, &new_header)
                    .to_string();

                if rendered.is_empty() {
                    // Empty file added or removed: no hunks, headers only
                    out.push_str(&format!("--- {}\n+++ {}\n", old_header, new_header));
                } else {
                    out.push_str(&rendered);
                    if !rendered.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
        }
    }

    out
}
