//! One parsed transcript line.
//!
//! The grammar has four statement forms, whitespace-separated:
//!
//! ```text
//! $ cd <target>
//! $ ls
//! dir <name>
//! <size> <name>
//! ```

/// A single transcript statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `$ cd <target>` — move the cursor.
    ChangeDirectory(String),
    /// `$ ls` — announces the entry lines that follow; mutates nothing.
    List,
    /// `dir <name>` — a directory entry in the current listing.
    DirectoryEntry(String),
    /// `<size> <name>` — a file entry in the current listing.
    FileEntry { name: String, size: u64 },
}

impl Statement {
    /// Parse one non-blank line. `None` means the line matches no
    /// statement form.
    pub fn parse(text: &str) -> Option<Statement> {
        let mut words = text.split_whitespace();
        match (words.next()?, words.next(), words.next(), words.next()) {
            ("$", Some("cd"), Some(target), None) => {
                Some(Statement::ChangeDirectory(target.to_string()))
            }
            ("$", Some("ls"), None, None) => Some(Statement::List),
            ("dir", Some(name), None, None) => Some(Statement::DirectoryEntry(name.to_string())),
            (size, Some(name), None, None) => size.parse().ok().map(|size| Statement::FileEntry {
                name: name.to_string(),
                size,
            }),
            _ => None,
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
    fn test_parse_change_directory() {
        assert_eq!(
            Statement::parse("$ cd /"),
            Some(Statement::ChangeDirectory("/".to_string()))
        );
        assert_eq!(
            Statement::parse("$ cd .."),
            Some(Statement::ChangeDirectory("..".to_string()))
        );
        assert_eq!(
            Statement::parse("$ cd some_dir"),
            Some(Statement::ChangeDirectory("some_dir".to_string()))
        );
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(Statement::parse("$ ls"), Some(Statement::List));
    }

    #[test]
    fn test_parse_directory_entry() {
        assert_eq!(
            Statement::parse("dir logs"),
            Some(Statement::DirectoryEntry("logs".to_string()))
        );
    }

    #[test]
    fn test_parse_file_entry() {
        assert_eq!(
            Statement::parse("14848514 b.txt"),
            Some(Statement::FileEntry {
                name: "b.txt".to_string(),
                size: 14848514,
            })
        );
        assert_eq!(
            Statement::parse("0 empty"),
            Some(Statement::FileEntry {
                name: "empty".to_string(),
                size: 0,
            })
        );
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        assert_eq!(Statement::parse("  $   ls  "), Some(Statement::List));
        assert_eq!(
            Statement::parse("\t42\tnotes.md"),
            Some(Statement::FileEntry {
                name: "notes.md".to_string(),
                size: 42,
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_forms() {
        for text in [
            "cd a",          // missing prompt
            "$ pwd",         // unknown command
            "$ cd",          // missing target
            "$ cd a b",      // trailing token
            "$ ls extra",    // ls takes no argument
            "dir",           // missing name
            "123",           // size with no name
            "12.5 file",     // non-integer size
            "-3 file",       // negative size
            "size file",     // non-numeric size
            "dir a b",       // trailing token
            "10 a b",        // trailing token
        ] {
            assert_eq!(Statement::parse(text), None, "{text:?}");
        }
    }
}
