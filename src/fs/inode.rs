//! Inode Records
//!
//! A single directory-or-file record. One tagged record covers both kinds:
//! they differ only in a type tag and how their size field is maintained.

use crate::fs::path::VPath;
use crate::fs::types::InodeKind;

/// Name reserved for the seeded root record.
pub(crate) const ROOT_NAME: &str = "/";

/// One filesystem-entry record.
///
/// Records have no identity beyond their position in the store: two inodes
/// with equal fields are still distinct entries, and the store never
/// deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    /// Path of the containing directory.
    pub parent_path: VPath,
    /// The record's own name; `"/"` for the root only.
    pub name: String,
    pub kind: InodeKind,
    /// True size for files. For directories, an aggregate maintained
    /// incrementally by `Navigator::touch`; only correct when every
    /// descendant file was created through it.
    pub size: u64,
}

impl Inode {
    /// A directory record with size 0.
    pub fn directory(parent_path: VPath, name: impl Into<String>) -> Self {
        Inode {
            parent_path,
            name: name.into(),
            kind: InodeKind::Directory,
            size: 0,
        }
    }

    /// A file record of the given size.
    pub fn file(parent_path: VPath, name: impl Into<String>, size: u64) -> Self {
        Inode {
            parent_path,
            name: name.into(),
            kind: InodeKind::File,
            size,
        }
    }

    /// The seeded root directory record.
    pub(crate) fn root() -> Self {
        Inode::directory(VPath::root(), ROOT_NAME)
    }

    /// Check if this is the root record.
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// Check if the record is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Check if the record is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// The record's full location: `parent_path + name`. The root is the
    /// single exception; its absolute path is itself.
    pub fn absolute_path(&self) -> VPath {
        if self.is_root() {
            VPath::root()
        } else {
            self.parent_path.child_unchecked(&self.name)
        }
    }
}

impl From<&Inode> for VPath {
    fn from(inode: &Inode) -> Self {
        inode.absolute_path()
    }
}

// ============================================================================
// Tests
// ============================================================================
