use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Save a standings artifact as pretty-printed JSON, atomically
///
/// Uses atomic-write-file so a failed run never leaves a half-written
/// artifact behind. Existing files are replaced wholesale. Creates the parent
/// directory if it doesn't exist.
pub fn save_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::OrderedMap;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("standings").join("s4.json");

        let mut row = OrderedMap::new();
        row.insert("max", 25u32);
        save_artifact(&path, &row).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"max\": 25\n}\n");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s4.json");
        fs::write(&path, "stale contents that are much longer than the new artifact").unwrap();

        save_artifact(&path, &OrderedMap::<u32>::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_save_into_file_as_directory_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("standings");
        fs::write(&blocker, "not a directory").unwrap();

        let result = save_artifact(&blocker.join("s4.json"), &OrderedMap::<u32>::new());
        assert!(result.is_err());
    }
}
