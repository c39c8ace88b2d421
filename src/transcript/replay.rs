//! Transcript replay.
//!
//! Feeds parsed statements to a [`Navigator`]: `cd` moves the cursor,
//! `dir` and file entries create records in the current directory, `$ ls`
//! mutates nothing. Any failure aborts the replay with the 1-based line
//! number; there is no partial-success mode.

use thiserror::Error;
use tracing::debug;

use crate::fs::navigator::Navigator;
use crate::fs::types::VfsError;
use crate::transcript::statement::Statement;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("line {line}: unrecognized transcript statement '{text}'")]
    MalformedLine { line: usize, text: String },

    #[error("line {line}: {source}")]
    Vfs {
        line: usize,
        #[source]
        source: VfsError,
    },
}

/// Replay a transcript into a fresh navigator. Blank lines are skipped.
pub fn replay<'a, I>(lines: I) -> Result<Navigator, ReplayError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut navigator = Navigator::new();
    replay_into(&mut navigator, lines)?;
    Ok(navigator)
}

/// Replay a transcript into an existing navigator, continuing from its
/// current cursor position.
pub fn replay_into<'a, I>(navigator: &mut Navigator, lines: I) -> Result<(), ReplayError>
where
    I: IntoIterator<Item = &'a str>,
{
    for (index, text) in lines.into_iter().enumerate() {
        let line = index + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let statement =
            Statement::parse(trimmed).ok_or_else(|| ReplayError::MalformedLine {
                line,
                text: trimmed.to_string(),
            })?;
        apply(navigator, statement).map_err(|source| ReplayError::Vfs { line, source })?;
    }
    Ok(())
}

fn apply(navigator: &mut Navigator, statement: Statement) -> Result<(), VfsError> {
    match statement {
        Statement::ChangeDirectory(target) => {
            navigator.change_directory(Some(&target))?;
        }
        Statement::List => {
            debug!("listing {}", navigator.current_directory());
        }
        Statement::DirectoryEntry(name) => {
            navigator.make_directory(&name)?;
        }
        Statement::FileEntry { name, size } => {
            navigator.touch(&name, size)?;
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
