use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Source of the configuration's last-modified time.
pub trait ConfigDao: Send + Sync {
    fn config_changed_at(&self) -> Result<DateTime<Utc>>;
}

/// Reports the modification time of a configuration file.
#[derive(Debug, Clone)]
pub struct FileConfigDao {
    path: PathBuf,
}

impl FileConfigDao {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigDao for FileConfigDao {
    fn config_changed_at(&self) -> Result<DateTime<Utc>> {
        let modified = fs::metadata(&self.path)?.modified()?;
        Ok(DateTime::<Utc>::from(modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use tempfile::TempDir;

    #[test]
    fn reports_file_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("retsmeta.toml");
        fs::write(&path, "format = \"COMPACT\"\n").unwrap();

        let dao = FileConfigDao::new(&path);
        let expected = DateTime::<Utc>::from(fs::metadata(&path).unwrap().modified().unwrap());
        assert_eq!(dao.config_changed_at().unwrap(), expected);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let dao = FileConfigDao::new(dir.path().join("missing.toml"));
        assert!(matches!(dao.config_changed_at(), Err(MetadataError::Io(_))));
    }
}
