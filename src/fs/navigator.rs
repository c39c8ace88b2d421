//! Navigator
//!
//! A stateful shell-style cursor over one [`SuperBlock`]. The cursor is a
//! pair of absolute paths (`current`, `previous`), never a cached record
//! reference: every operation re-resolves through the store.

use tracing::info;

use crate::fs::inode::Inode;
use crate::fs::path::VPath;
use crate::fs::store::{InodeQuery, SuperBlock};
use crate::fs::types::{InodeKind, VfsError};

#[derive(Debug, Clone)]
pub struct Navigator {
    store: SuperBlock,
    current: VPath,
    previous: VPath,
}

impl Navigator {
    /// A navigator over a fresh store, cursor at the root.
    pub fn new() -> Self {
        Navigator {
            store: SuperBlock::new(),
            current: VPath::root(),
            previous: VPath::root(),
        }
    }

    pub fn current_directory(&self) -> &VPath {
        &self.current
    }

    /// The cursor position before the most recent `change_directory` call.
    pub fn previous_directory(&self) -> &VPath {
        &self.previous
    }

    pub fn store(&self) -> &SuperBlock {
        &self.store
    }

    pub fn into_store(self) -> SuperBlock {
        self.store
    }

    /// Move the cursor.
    ///
    /// `None` and `"/"` go to the root, `".."` to the parent (staying put
    /// at the root), `"-"` back to the previous directory; anything else is
    /// joined onto the current directory and must name an existing
    /// directory record. The pre-move position becomes `previous` on every
    /// branch, including failing ones that leave the cursor where it was.
    pub fn change_directory(&mut self, target: Option<&str>) -> Result<&VPath, VfsError> {
        let before = self.current.clone();
        let outcome = match target {
            None | Some("/") => Ok(VPath::root()),
            Some("..") => Ok(self.current.parent().unwrap_or_else(VPath::root)),
            // append-only store: the previous directory still exists,
            // no lookup needed
            Some("-") => Ok(self.previous.clone()),
            Some(other) => self.resolve_directory(other),
        };
        self.previous = before;
        let destination = outcome?;
        info!("changed directory from {} to {}", self.previous, destination);
        self.current = destination;
        Ok(&self.current)
    }

    fn resolve_directory(&self, target: &str) -> Result<VPath, VfsError> {
        let destination = self.current.join(target)?;
        let query = InodeQuery::new()
            .absolute_path(destination.to_string())
            .kind(InodeKind::Directory);
        if self.store.find(&query, true)?.is_empty() {
            return Err(VfsError::NotFound {
                path: destination.to_string(),
                operation: "cd".to_string(),
            });
        }
        Ok(destination)
    }

    /// Records whose parent is the given directory (default: the current
    /// one), in the store's query ordering. Recursive mode flattens the
    /// subtree pre-order, each child followed by its descendants.
    ///
    /// A path with no children yields an empty vector, not an error.
    pub fn list(&self, path: Option<&str>, recursive: bool) -> Result<Vec<&Inode>, VfsError> {
        let base = match path {
            Some(text) => VPath::parse(text)?,
            None => self.current.clone(),
        };
        let mut listing = Vec::new();
        self.collect_listing(&base, recursive, &mut listing);
        Ok(listing)
    }

    fn collect_listing<'a>(&'a self, parent: &VPath, recursive: bool, out: &mut Vec<&'a Inode>) {
        for child in self.store.children_of(parent) {
            out.push(child);
            if recursive && child.is_directory() {
                let child_path = child.absolute_path();
                self.collect_listing(&child_path, recursive, out);
            }
        }
    }

    /// Create a size-0 directory record under the current directory.
    ///
    /// Fails with `AlreadyExists` when any record, directory or file,
    /// already has the resulting absolute path.
    pub fn make_directory(&mut self, name: &str) -> Result<&Inode, VfsError> {
        let name = VPath::parse_segment(name)?;
        let destination = self.current.child_unchecked(&name);
        let occupied = self
            .store
            .find(&InodeQuery::new().absolute_path(destination.to_string()), true)?;
        if !occupied.is_empty() {
            return Err(VfsError::AlreadyExists {
                path: destination.to_string(),
                operation: "mkdir".to_string(),
            });
        }
        info!("created directory {destination}");
        Ok(self.store.add(Inode::directory(self.current.clone(), name)))
    }

    /// Create a file record under the current directory and add its size
    /// to every ancestor directory, current up to the root.
    ///
    /// Unlike `make_directory` there is no collision check: repeated names
    /// append distinct records, and each one is credited upward.
    pub fn touch(&mut self, name: &str, size: u64) -> Result<&Inode, VfsError> {
        let name = VPath::parse_segment(name)?;
        info!(
            "created file {} ({size} bytes)",
            self.current.child_unchecked(&name)
        );
        let mut ancestor = self.current.clone();
        loop {
            self.store.grow_directory(&ancestor, size);
            match ancestor.parent() {
                Some(parent) => ancestor = parent,
                None => break,
            }
        }
        Ok(self.store.add(Inode::file(self.current.clone(), name, size)))
    }

    /// Sum of the sizes of the file records in the listing of `path`
    /// (default: the current directory). Directory aggregates are never
    /// added, so recursive mode counts each byte exactly once.
    pub fn disk_usage(&self, path: Option<&str>, recursive: bool) -> Result<u64, VfsError> {
        let listing = self.list(path, recursive)?;
        Ok(listing
            .into_iter()
            .filter(|inode| inode.is_file())
            .map(|inode| inode.size)
            .sum())
    }

    /// The first record at an absolute path, per the store's query
    /// ordering. With duplicate records the choice is deliberate:
    /// directories win over files, then larger over smaller.
    pub fn find(&self, absolute_path: &str) -> Result<&Inode, VfsError> {
        let path = VPath::parse(absolute_path)?;
        let found = self
            .store
            .find(&InodeQuery::new().absolute_path(path.to_string()), true)?;
        found.into_iter().next().ok_or_else(|| VfsError::NotFound {
            path: path.to_string(),
            operation: "find".to_string(),
        })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
