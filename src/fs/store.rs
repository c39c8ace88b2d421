//! Inode Store
//!
//! `SuperBlock` owns every inode record in insertion order and answers
//! filtered queries over them. The table is append-only; nothing is ever
//! removed.

use std::cmp::Reverse;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::fs::inode::Inode;
use crate::fs::path::VPath;
use crate::fs::types::{InodeKind, VfsError};

/// Index of the seeded root record.
const ROOT_INDEX: usize = 0;

/// Filter passed to [`SuperBlock::find`]: every supplied matcher must hold.
#[derive(Debug, Clone, Default)]
pub struct InodeQuery {
    name: Option<String>,
    parent_path: Option<String>,
    absolute_path: Option<String>,
    kind: Option<InodeKind>,
    size: Option<u64>,
    size_min: Option<u64>,
    size_max: Option<u64>,
}

impl InodeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on the record's own name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Match on the containing directory's path. Normalized before
    /// comparison.
    pub fn parent_path(mut self, path: impl Into<String>) -> Self {
        self.parent_path = Some(path.into());
        self
    }

    /// Match on the derived absolute path. Normalized before comparison.
    pub fn absolute_path(mut self, path: impl Into<String>) -> Self {
        self.absolute_path = Some(path.into());
        self
    }

    /// Match on the record kind.
    pub fn kind(mut self, kind: InodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Match an exact size. Mutually exclusive with the range bounds.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Inclusive lower size bound.
    pub fn size_at_least(mut self, size: u64) -> Self {
        self.size_min = Some(size);
        self
    }

    /// Inclusive upper size bound.
    pub fn size_at_most(mut self, size: u64) -> Self {
        self.size_max = Some(size);
        self
    }
}

/// A query with its path matchers parsed and its bounds checked.
struct CompiledQuery {
    name: Option<String>,
    parent_path: Option<VPath>,
    absolute_path: Option<VPath>,
    kind: Option<InodeKind>,
    size: Option<u64>,
    size_min: Option<u64>,
    size_max: Option<u64>,
}

impl CompiledQuery {
    fn compile(query: &InodeQuery) -> Result<Self, VfsError> {
        if query.size.is_some() && (query.size_min.is_some() || query.size_max.is_some()) {
            return Err(VfsError::InvalidQuery {
                reason: "exact size and size range are mutually exclusive".to_string(),
            });
        }
        if let (Some(min), Some(max)) = (query.size_min, query.size_max) {
            if min > max {
                return Err(VfsError::InvalidQuery {
                    reason: format!("size range {min}..={max} is empty"),
                });
            }
        }
        let parent_path = query.parent_path.as_deref().map(VPath::parse).transpose()?;
        let absolute_path = query.absolute_path.as_deref().map(VPath::parse).transpose()?;
        Ok(CompiledQuery {
            name: query.name.clone(),
            parent_path,
            absolute_path,
            kind: query.kind,
            size: query.size,
            size_min: query.size_min,
            size_max: query.size_max,
        })
    }

    fn matches(&self, inode: &Inode) -> bool {
        if let Some(name) = &self.name {
            if &inode.name != name {
                return false;
            }
        }
        if let Some(parent) = &self.parent_path {
            if &inode.parent_path != parent {
                return false;
            }
        }
        if let Some(absolute) = &self.absolute_path {
            if &inode.absolute_path() != absolute {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if inode.kind != kind {
                return false;
            }
        }
        if let Some(size) = self.size {
            if inode.size != size {
                return false;
            }
        }
        if let Some(min) = self.size_min {
            if inode.size < min {
                return false;
            }
        }
        if let Some(max) = self.size_max {
            if inode.size > max {
                return false;
            }
        }
        true
    }
}

/// Flat, append-only table owning all inode records.
///
/// Always seeded with exactly one root directory record, which is never
/// removed. The store does not verify that a record's parent path resolves
/// to an existing directory; callers that care must query first.
#[derive(Debug, Clone)]
pub struct SuperBlock {
    inodes: Vec<Inode>,
    /// Rendered parent path -> child record indices, in insertion order.
    /// The root record itself sits under `"/"` because its stored parent
    /// path renders as the root; listings exclude it explicitly.
    children: IndexMap<String, Vec<usize>>,
}

impl SuperBlock {
    pub fn new() -> Self {
        let mut block = SuperBlock {
            inodes: Vec::new(),
            children: IndexMap::new(),
        };
        block.push(Inode::root());
        block
    }

    fn push(&mut self, inode: Inode) -> usize {
        let index = self.inodes.len();
        self.children
            .entry(inode.parent_path.to_string())
            .or_default()
            .push(index);
        self.inodes.push(inode);
        index
    }

    /// The seeded root record.
    pub fn root(&self) -> &Inode {
        &self.inodes[ROOT_INDEX]
    }

    /// Append a record and return it.
    ///
    /// No uniqueness check: duplicates append as distinct records. Callers
    /// that need create-if-absent semantics query first.
    pub fn add(&mut self, inode: Inode) -> &Inode {
        let index = self.push(inode);
        &self.inodes[index]
    }

    /// Number of records, root included.
    pub fn len(&self) -> usize {
        self.inodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inodes.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Inode> {
        self.inodes.iter()
    }

    /// Every record matching all matchers in `query`.
    ///
    /// Ordering: directories before files, then size descending, then
    /// insertion order. With `include_root = false` the seeded root record
    /// is excluded even when it matches.
    pub fn find(&self, query: &InodeQuery, include_root: bool) -> Result<Vec<&Inode>, VfsError> {
        let compiled = CompiledQuery::compile(query)?;
        debug!("searching inode table with {query:?}");
        let mut found: Vec<usize> = self
            .inodes
            .iter()
            .enumerate()
            .filter(|(index, inode)| {
                (include_root || *index != ROOT_INDEX) && compiled.matches(inode)
            })
            .map(|(index, _)| index)
            .collect();
        self.order(&mut found);
        Ok(found.into_iter().map(|index| &self.inodes[index]).collect())
    }

    /// Children of `parent` in the documented query ordering, excluding
    /// the root record. Served from the adjacency index instead of a table
    /// scan.
    pub fn children_of(&self, parent: &VPath) -> Vec<&Inode> {
        let mut indices: Vec<usize> = match self.children.get(&parent.to_string()) {
            Some(children) => children
                .iter()
                .copied()
                .filter(|&index| index != ROOT_INDEX)
                .collect(),
            None => Vec::new(),
        };
        self.order(&mut indices);
        indices.into_iter().map(|index| &self.inodes[index]).collect()
    }

    /// Add `delta` to the stored size of the directory at `path`.
    ///
    /// With duplicate directory records the first per the documented
    /// ordering is credited. A path with no directory record is skipped:
    /// the store does not enforce parent existence.
    pub(crate) fn grow_directory(&mut self, path: &VPath, delta: u64) {
        let mut candidates: Vec<usize> = self
            .inodes
            .iter()
            .enumerate()
            .filter(|(_, inode)| inode.is_directory() && &inode.absolute_path() == path)
            .map(|(index, _)| index)
            .collect();
        self.order(&mut candidates);
        match candidates.first() {
            Some(&index) => self.inodes[index].size += delta,
            None => warn!("no directory record at {path}; {delta} bytes not credited"),
        }
    }

    /// Stable sort by kind rank and size descending; stability keeps
    /// insertion order for ties.
    fn order(&self, indices: &mut [usize]) {
        indices.sort_by_key(|&index| {
            let inode = &self.inodes[index];
            (inode.kind, Reverse(inode.size))
        });
    }
}

impl Default for SuperBlock {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SuperBlock {
        let mut block = SuperBlock::new();
        block.add(Inode::file(VPath::root(), "small.txt", 5));
        block.add(Inode::file(VPath::root(), "big.txt", 50));
        let mut sub = Inode::directory(VPath::root(), "sub");
        sub.size = 20;
        block.add(sub);
        block.add(Inode::file(VPath::parse("/sub").unwrap(), "nested.txt", 20));
        block
    }

    #[test]
    fn test_new_store_has_exactly_one_root() {
        let block = SuperBlock::new();
        assert_eq!(block.len(), 1);
        assert!(!block.is_empty());
        assert!(block.root().is_root());
        assert_eq!(block.root().name, "/");
        assert!(block.root().is_directory());
        assert_eq!(block.iter().filter(|inode| inode.is_root()).count(), 1);
    }

    #[test]
    fn test_add_appends_duplicates() {
        let mut block = SuperBlock::new();
        let record = Inode::file(VPath::root(), "a.txt", 10);
        block.add(record.clone());
        block.add(record);
        assert_eq!(block.len(), 3);
        let found = block.find(&InodeQuery::new().name("a.txt"), true).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_find_requires_all_matchers() {
        let block = populated();
        let found = block
            .find(
                &InodeQuery::new()
                    .name("nested.txt")
                    .parent_path("/sub")
                    .kind(InodeKind::File)
                    .size(20),
                true,
            )
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].absolute_path().to_string(), "/sub/nested.txt");

        // same name, wrong parent
        let found = block
            .find(&InodeQuery::new().name("nested.txt").parent_path("/"), true)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_orders_directories_first_then_size_descending() {
        let block = populated();
        let found = block.find(&InodeQuery::new().parent_path("/"), false).unwrap();
        let names: Vec<&str> = found.iter().map(|inode| inode.name.as_str()).collect();
        assert_eq!(names, ["sub", "big.txt", "small.txt"]);
    }

    #[test]
    fn test_find_ties_keep_insertion_order() {
        let mut block = SuperBlock::new();
        block.add(Inode::file(VPath::root(), "first", 7));
        block.add(Inode::file(VPath::root(), "second", 7));
        let found = block.find(&InodeQuery::new().size(7), true).unwrap();
        let names: Vec<&str> = found.iter().map(|inode| inode.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_include_root_flag_excludes_seeded_root() {
        let block = SuperBlock::new();
        // the root's own parent path renders as "/", so it matches a
        // parent_path query on the root
        let with_root = block.find(&InodeQuery::new().parent_path("/"), true).unwrap();
        assert_eq!(with_root.len(), 1);
        assert!(with_root[0].is_root());

        let without = block.find(&InodeQuery::new().parent_path("/"), false).unwrap();
        assert!(without.is_empty());
    }

    #[test]
    fn test_query_paths_are_normalized() {
        let block = populated();
        let found = block
            .find(&InodeQuery::new().parent_path("//sub/"), true)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "nested.txt");

        let found = block
            .find(&InodeQuery::new().absolute_path("sub//nested.txt"), true)
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_size_range_matchers() {
        let block = populated();
        let at_most = block
            .find(&InodeQuery::new().size_at_most(20), false)
            .unwrap();
        let names: Vec<&str> = at_most.iter().map(|inode| inode.name.as_str()).collect();
        assert_eq!(names, ["sub", "nested.txt", "small.txt"]);

        let at_least = block
            .find(&InodeQuery::new().size_at_least(20), false)
            .unwrap();
        let names: Vec<&str> = at_least.iter().map(|inode| inode.name.as_str()).collect();
        assert_eq!(names, ["sub", "big.txt", "nested.txt"]);

        let between = block
            .find(&InodeQuery::new().size_at_least(6).size_at_most(25), false)
            .unwrap();
        let names: Vec<&str> = between.iter().map(|inode| inode.name.as_str()).collect();
        assert_eq!(names, ["sub", "nested.txt"]);
    }

    #[test]
    fn test_degenerate_queries_are_rejected() {
        let block = SuperBlock::new();
        let inverted = InodeQuery::new().size_at_least(10).size_at_most(5);
        assert!(matches!(
            block.find(&inverted, true),
            Err(VfsError::InvalidQuery { .. })
        ));

        let conflicting = InodeQuery::new().size(3).size_at_most(5);
        assert!(matches!(
            block.find(&conflicting, true),
            Err(VfsError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_bad_path_in_query_is_an_invalid_path() {
        let block = SuperBlock::new();
        let query = InodeQuery::new().parent_path("/with space");
        assert!(matches!(
            block.find(&query, true),
            Err(VfsError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_children_of_matches_parent_path_query() {
        let block = populated();
        let root = VPath::root();
        let via_index: Vec<String> = block
            .children_of(&root)
            .iter()
            .map(|inode| inode.name.clone())
            .collect();
        let via_scan: Vec<String> = block
            .find(&InodeQuery::new().parent_path("/"), false)
            .unwrap()
            .iter()
            .map(|inode| inode.name.clone())
            .collect();
        assert_eq!(via_index, via_scan);

        assert!(block.children_of(&VPath::parse("/ghost").unwrap()).is_empty());
    }

    #[test]
    fn test_grow_directory_credits_first_match() {
        let mut block = populated();
        let sub = VPath::parse("/sub").unwrap();
        block.grow_directory(&sub, 30);
        let found = block
            .find(&InodeQuery::new().absolute_path("/sub"), true)
            .unwrap();
        assert_eq!(found[0].size, 50);
    }

    #[test]
    fn test_grow_directory_skips_missing_paths() {
        let mut block = SuperBlock::new();
        block.grow_directory(&VPath::parse("/ghost").unwrap(), 10);
        assert_eq!(block.len(), 1);
        assert_eq!(block.root().size, 0);
    }
}
