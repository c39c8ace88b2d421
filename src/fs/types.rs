//! Core Types
//!
//! Error and record-kind types shared across the virtual file system.

use std::fmt;

use thiserror::Error;

/// Virtual filesystem errors.
///
/// Every failure is local and synchronous. A caller replaying a transcript
/// treats any of these as fatal; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("EINVAL: invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("EINVAL: invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EEXIST: file already exists, {operation} '{path}'")]
    AlreadyExists { path: String, operation: String },
}

/// The two record shapes in the store.
///
/// `Directory` is declared first so the derived ordering ranks directories
/// before files; query results rely on that rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InodeKind {
    Directory,
    File,
}

impl InodeKind {
    /// Check if the kind is a directory.
    pub fn is_directory(self) -> bool {
        matches!(self, InodeKind::Directory)
    }

    /// Check if the kind is a file.
    pub fn is_file(self) -> bool {
        matches!(self, InodeKind::File)
    }
}

impl fmt::Display for InodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InodeKind::Directory => write!(f, "dir"),
            InodeKind::File => write!(f, "file"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(InodeKind::Directory.is_directory());
        assert!(!InodeKind::Directory.is_file());
        assert!(InodeKind::File.is_file());
        assert!(!InodeKind::File.is_directory());
    }

    #[test]
    fn test_directories_rank_before_files() {
        assert!(InodeKind::Directory < InodeKind::File);
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = VfsError::NotFound {
            path: "/a/b".to_string(),
            operation: "cd".to_string(),
        };
        assert_eq!(err.to_string(), "ENOENT: no such file or directory, cd '/a/b'");

        let err = VfsError::AlreadyExists {
            path: "/a".to_string(),
            operation: "mkdir".to_string(),
        };
        assert_eq!(err.to_string(), "EEXIST: file already exists, mkdir '/a'");
    }
}
