//! Aggregate reductions over a reconstructed tree: subtree totals,
//! threshold sums, and deletion candidates, plus a serializable report
//! combining them.

use std::fmt;

use serde::Serialize;

use crate::fs::navigator::Navigator;
use crate::fs::store::{InodeQuery, SuperBlock};
use crate::fs::types::{InodeKind, VfsError};

/// Total size of the subtree rooted at `path`.
///
/// Directories report their recursive file total; a file reports its own
/// size, as `du` would.
pub fn subtree_size(navigator: &Navigator, path: &str) -> Result<u64, VfsError> {
    let record = navigator.find(path)?;
    if record.is_file() {
        return Ok(record.size);
    }
    navigator.disk_usage(Some(path), true)
}

/// Sum of the sizes of every directory (root included) whose aggregate
/// size is at most `threshold`. Nested directories are counted
/// individually, so bytes under several qualifying ancestors contribute
/// more than once.
pub fn sum_directories_at_most(store: &SuperBlock, threshold: u64) -> Result<u64, VfsError> {
    let query = InodeQuery::new()
        .kind(InodeKind::Directory)
        .size_at_most(threshold);
    Ok(store.find(&query, true)?.iter().map(|inode| inode.size).sum())
}

/// Size of the smallest directory whose aggregate size is at least
/// `needed`, or `None` when no directory is big enough.
pub fn smallest_directory_at_least(
    store: &SuperBlock,
    needed: u64,
) -> Result<Option<u64>, VfsError> {
    let query = InodeQuery::new()
        .kind(InodeKind::Directory)
        .size_at_least(needed);
    // directories come back size-descending, so the last match is the
    // smallest qualifying one
    Ok(store.find(&query, true)?.last().map(|inode| inode.size))
}

/// Combined usage summary for one reconstructed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub capacity: u64,
    pub total_used: u64,
    pub available: u64,
    pub threshold: u64,
    /// Sum of directory sizes at or under `threshold`.
    pub threshold_sum: u64,
    pub required_free: u64,
    /// Bytes that must be reclaimed to reach `required_free`; zero when
    /// the disk already has room.
    pub reclaim_target: u64,
    /// Size of the smallest single directory whose deletion reclaims
    /// enough, `None` when no directory is big enough.
    pub smallest_deletable: Option<u64>,
}

impl UsageReport {
    pub fn build(
        navigator: &Navigator,
        threshold: u64,
        capacity: u64,
        required_free: u64,
    ) -> Result<UsageReport, VfsError> {
        let store = navigator.store();
        let total_used = navigator.disk_usage(Some("/"), true)?;
        let available = capacity.saturating_sub(total_used);
        let reclaim_target = required_free.saturating_sub(available);
        Ok(UsageReport {
            capacity,
            total_used,
            available,
            threshold,
            threshold_sum: sum_directories_at_most(store, threshold)?,
            required_free,
            reclaim_target,
            smallest_deletable: smallest_directory_at_least(store, reclaim_target)?,
        })
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total used:         {} of {}", self.total_used, self.capacity)?;
        writeln!(f, "available:          {}", self.available)?;
        writeln!(
            f,
            "dirs at most {}: {}",
            self.threshold, self.threshold_sum
        )?;
        writeln!(f, "reclaim target:     {}", self.reclaim_target)?;
        match self.smallest_deletable {
            Some(size) => write!(f, "smallest deletable: {size}"),
            None => write!(f, "smallest deletable: none"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
