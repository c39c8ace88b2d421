//! shellfs - An in-memory virtual filesystem simulator
//!
//! This library reconstructs a directory tree from a shell-session
//! transcript and answers size queries over it: a flat append-only inode
//! table with typed queries, and a stateful shell-style cursor
//! (cd/ls/mkdir/touch/du/find).

pub mod fs;
pub mod report;
pub mod transcript;

pub use fs::{Inode, InodeKind, InodeQuery, Navigator, SuperBlock, VPath, VfsError};
pub use report::UsageReport;
pub use transcript::{replay, replay_into, ReplayError, Statement};
