//! Atomic full-file replacement.
//!
//! The writer never patches a store file in place: it hands the complete new
//! content to an [`AtomicSink`], which must make it visible all-or-nothing.
//! Readers racing a write see either the old file or the new one, never a
//! torn mix; two racing writers resolve by last-rename-wins, and the loser's
//! pending keys are re-recorded by the next unit of work that misses them.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes full file content with all-or-nothing visibility.
pub trait AtomicSink {
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Default sink: write to a temporary file in the target's directory, then
/// rename it into place.
///
/// The temporary file must live on the same filesystem as the target for the
/// rename to be atomic, hence `NamedTempFile::new_in` rather than the system
/// temp directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl AtomicSink for FsSink {
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_creates_file_with_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("en.csv");
        FsSink.write_atomic(&path, "greeting;Hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "greeting;Hello");
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("en.csv");
        fs::write(&path, "old").unwrap();
        FsSink.write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("var/translations/en.csv");
        FsSink.write_atomic(&path, "k;v").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "k;v");
    }

    #[test]
    fn test_no_leftover_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("en.csv");
        FsSink.write_atomic(&path, "k;v").unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
