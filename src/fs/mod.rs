//! File System Module
//!
//! In-memory inode table plus a shell-style cursor over it:
//! - VPath: normalized slash-delimited location
//! - Inode: one flat record (directory or file)
//! - SuperBlock: append-only inode table with typed queries
//! - Navigator: stateful cursor (cd/ls/mkdir/touch/du/find)

pub mod inode;
pub mod navigator;
pub mod path;
pub mod store;
pub mod types;

pub use inode::Inode;
pub use navigator::Navigator;
pub use path::VPath;
pub use store::{InodeQuery, SuperBlock};
pub use types::{InodeKind, VfsError};
