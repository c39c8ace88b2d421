//! Path Values
//!
//! A `VPath` is a normalized, slash-delimited location in the inode tree:
//! an ordered sequence of segments where the root is the empty sequence.
//! Paths are plain values with structural equality; they are stored by
//! value inside inode records and never own anything else.

use std::fmt;

use crate::fs::types::VfsError;

/// A normalized path value.
///
/// Immutable: every operation returns a new path. Invariants: no segment
/// is empty or contains whitespace; the root is the empty sequence and
/// renders as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VPath {
    segments: Vec<String>,
}

impl VPath {
    /// The root path.
    pub fn root() -> Self {
        VPath { segments: Vec::new() }
    }

    /// Parse a slash-delimited string.
    ///
    /// Leading, trailing, and repeated slashes are dropped, so `"/"`, `""`
    /// and `"//"` all yield the root. Fails when any segment contains
    /// whitespace.
    pub fn parse(text: &str) -> Result<Self, VfsError> {
        let mut segments = Vec::new();
        for segment in text.split('/') {
            if segment.is_empty() {
                continue;
            }
            reject_whitespace(segment, text)?;
            segments.push(segment.to_string());
        }
        Ok(VPath { segments })
    }

    /// Build a path from individual segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, VfsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for segment in segments {
            out.push(Self::parse_segment(segment.as_ref())?);
        }
        Ok(VPath { segments: out })
    }

    /// Validate a single inode name: non-empty, no whitespace, no `/`.
    pub fn parse_segment(text: &str) -> Result<String, VfsError> {
        if text.is_empty() {
            return Err(VfsError::InvalidPath {
                path: text.to_string(),
                reason: "empty segment".to_string(),
            });
        }
        if text.contains('/') {
            return Err(VfsError::InvalidPath {
                path: text.to_string(),
                reason: "segment contains '/'".to_string(),
            });
        }
        reject_whitespace(text, text)?;
        Ok(text.to_string())
    }

    /// Concatenate a tail onto this path.
    ///
    /// The tail runs through the same normalization as [`VPath::parse`], so
    /// it may carry several segments (`"a/b"`) or none (`""`).
    pub fn join(&self, tail: &str) -> Result<Self, VfsError> {
        let suffix = VPath::parse(tail)?;
        let mut segments = self.segments.clone();
        segments.extend(suffix.segments);
        Ok(VPath { segments })
    }

    /// Append one already-validated segment.
    pub(crate) fn child_unchecked(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        VPath { segments }
    }

    /// The containing directory's path; `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.segments.split_last()?;
        Some(VPath { segments: parent.to_vec() })
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for VPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.segments.join("/"))
        }
    }
}

fn reject_whitespace(segment: &str, full: &str) -> Result<(), VfsError> {
    if segment.chars().any(char::is_whitespace) {
        return Err(VfsError::InvalidPath {
            path: full.to_string(),
            reason: "segment contains whitespace".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
