//! Cache keys.

use std::fmt;
use std::path::PathBuf;

/// A resource locator: the request host immediately followed by its path.
///
/// `Locator::new("example.com", "")` and `Locator::new("example.com", "/")`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(host: &str, path: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        Self(format!("{host}{path}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this locator onto a path relative to the cache root.
    ///
    /// Each `/`-delimited segment becomes a directory and the last one the
    /// file name. An empty last segment is replaced by `default_filename`.
    /// Empty, `.` and `..` segments never become path components, so the
    /// result always stays beneath the root.
    pub fn relative_path(&self, default_filename: &str) -> PathBuf {
        let mut segments: Vec<&str> = self.0.split('/').collect();
        let last = segments.pop().unwrap_or_default();

        let mut path: PathBuf = segments
            .into_iter()
            .filter(|segment| is_plain(segment))
            .collect();
        if is_plain(last) {
            path.push(last);
        } else {
            path.push(default_filename);
        }
        path
    }
}

fn is_plain(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
