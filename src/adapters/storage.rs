use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Reads and writes files relative to a base directory, creating parent
/// directories on write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CalcError;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("out");
        let storage = LocalStorage::new(base.to_string_lossy().into_owned());

        storage.write_file("nested/results.json", b"{}").unwrap();
        assert_eq!(fs::read(base.join("nested/results.json")).unwrap(), b"{}");
    }

    #[test]
    fn test_write_into_a_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, b"x").unwrap();

        let storage = LocalStorage::new(blocker.to_string_lossy().into_owned());
        assert!(matches!(
            storage.write_file("results.csv", b"a,b"),
            Err(CalcError::Io(_))
        ));
    }
}
