//! File system operations (read, existence, file type).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_queries() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("seed.sh");
        std::fs::write(&file_path, "NAME=\"zlib\"\n").unwrap();

        assert!(runtime.exists(&file_path));
        assert!(runtime.is_file(&file_path));
        assert!(!runtime.is_dir(&file_path));

        assert!(runtime.exists(dir.path()));
        assert!(runtime.is_dir(dir.path()));
        assert!(!runtime.is_file(dir.path()));

        let content = runtime.read_to_string(&file_path).unwrap();
        assert_eq!(content, "NAME=\"zlib\"\n");
    }

    #[test]
    fn test_real_runtime_missing_file() {
        let runtime = RealRuntime;
        let missing = std::path::Path::new("/nonexistent/path/seed.sh");

        assert!(!runtime.exists(missing));
        assert!(!runtime.is_file(missing));

        let err = runtime.read_to_string(missing).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/path/seed.sh"));
    }
}
