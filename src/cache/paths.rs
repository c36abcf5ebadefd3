// Cache path utilities.
// Maps cache keys onto files inside the cache directory.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/figma-files on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "figma-files").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the data directory used for the log file.
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "figma-files").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Key under which a snapshot is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Top-level project/file listing for the team.
    Files,
    /// Page listing of one file, keyed by the file's key.
    Pages(String),
}

impl CacheKey {
    pub fn pages(file_key: impl Into<String>) -> Self {
        CacheKey::Pages(file_key.into())
    }

    /// Logical key name ("files" or "pages-<file key>").
    pub fn name(&self) -> String {
        match self {
            CacheKey::Files => "files".to_string(),
            CacheKey::Pages(file_key) => format!("pages-{}", file_key),
        }
    }

    /// Path of this key's snapshot inside `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.json", sanitize_name(&self.name())))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Encode a name for use as a file name.
///
/// Reversible: `_` becomes `__` and path-hostile characters become `_XX`
/// (uppercase hex), so distinct names never share a file.
fn sanitize_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' => encoded.push_str("__"),
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => {
                encoded.push_str(&format!("_{:02X}", c as u32));
            }
            _ => encoded.push(c),
        }
    }
    encoded
}
