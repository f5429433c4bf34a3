//! Store paths.
//!
//! A `StorePath` addresses one node in the document tree. Segments are
//! validated against the store's key rules at construction time so a
//! caller-supplied identifier can never splice extra levels into a path
//! or smuggle in reserved characters.

use shared_types::StoreError;
use std::fmt;

/// Characters the store forbids in keys.
const FORBIDDEN: &[char] = &['.', '$', '#', '[', ']', '/'];

/// A validated slash-joined path into the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    /// The tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append one validated segment.
    pub fn child(mut self, segment: impl Into<String>) -> Result<Self, StoreError> {
        let segment = segment.into();
        if segment.is_empty()
            || segment.contains(FORBIDDEN)
            || segment.chars().any(char::is_control)
        {
            return Err(StoreError::InvalidPath(segment));
        }
        self.segments.push(segment);
        Ok(self)
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
