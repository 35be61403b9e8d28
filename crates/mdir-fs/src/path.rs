//! Normalized path handling with output-root containment.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to forward slashes internally.
///
/// Paths stay in the normalized form until an I/O boundary converts them
/// to the platform-native representation. Declared paths coming out of a
/// manuscript may contain `.`/`..` segments or backslashes; joining them
/// under a root goes through [`NormalizedPath::join_contained`], which
/// resolves those segments lexically and refuses to escape the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// The internal normalized string form.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join a trusted segment (no traversal resolution).
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Join an untrusted relative path under this root, resolving `.`
    /// and `..` segments lexically. Fails when the result would land
    /// outside the root.
    pub fn join_contained(&self, relative: &str) -> Result<Self> {
        let relative = relative.replace('\\', "/");
        let mut stack: Vec<&str> = Vec::new();
        for segment in relative.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if stack.pop().is_none() {
                        return Err(Error::PathEscape {
                            path: relative.clone(),
                        });
                    }
                }
                other => stack.push(other),
            }
        }
        if stack.is_empty() {
            return Err(Error::PathEscape { path: relative });
        }
        Ok(self.join(&stack.join("/")))
    }

    /// Parent directory, if any.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Final path component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// File stem and extension split at the last dot of the file name.
    /// A leading dot (`.gitignore`) does not start an extension.
    pub fn split_extension(&self) -> (String, Option<String>) {
        let name = self.file_name().unwrap_or("");
        match name.rfind('.') {
            Some(idx) if idx > 0 => (name[..idx].to_string(), Some(name[idx + 1..].to_string())),
            _ => (name.to_string(), None),
        }
    }

    /// Extension without the dot, if present.
    pub fn extension(&self) -> Option<String> {
        self.split_extension().1
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
