//! Local state of the system: what is installed, and what was asked for.
//!
//! - `perch_db` holds one `name;version` row per installed package.
//! - `nest` holds one package name per line for every package installed on
//!   explicit request. Everything else in the database is a dependency.
//!
//! Both files are optional. A system that never installed anything has neither.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;

use crate::runtime::Runtime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledDatabase {
    pub packages: Vec<InstalledPackage>,
}

impl InstalledDatabase {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        if !runtime.is_file(path) {
            debug!("No package database at {:?}", path);
            return Ok(Self::default());
        }

        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Could not read the package database at {}", path.display()))?;

        Ok(Self::parse(&content))
    }

    /// Rows that are not exactly `name;version` are reported and skipped.
    pub fn parse(content: &str) -> Self {
        let mut packages = Vec::new();

        for line in content.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split(';').collect::<Vec<_>>().as_slice() {
                [name, version] if !name.is_empty() => packages.push(InstalledPackage {
                    name: name.to_string(),
                    version: version.to_string(),
                }),
                _ => warn!("Skipping malformed package database row: {}", line),
            }
        }

        Self { packages }
    }

    pub fn names(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p.name == name)
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.version.as_str())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Explicitly requested packages. A missing nest file means none.
#[tracing::instrument(skip(runtime))]
pub fn read_nest<R: Runtime>(runtime: &R, path: &Path) -> Result<Vec<String>> {
    if !runtime.is_file(path) {
        debug!("No nest file at {:?}", path);
        return Ok(Vec::new());
    }

    let content = runtime
        .read_to_string(path)
        .with_context(|| format!("Could not read the nest file at {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test_log::test]
    fn test_parse_database() {
        let db = InstalledDatabase::parse("# installed\nzlib;1.3.1\n\nbroken\ngcc;13.2.0\n;1.0\na;b;c\n");

        assert_eq!(db.len(), 2);
        assert_eq!(db.names(), vec!["zlib".to_string(), "gcc".to_string()]);
        assert_eq!(db.version("gcc"), Some("13.2.0"));
        assert!(db.is_installed("zlib"));
        assert!(!db.is_installed("broken"));
    }

    #[test]
    fn test_load_missing_database_is_empty() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/var/lib/perch/perch_db");

        runtime
            .expect_is_file()
            .with(eq(path.clone()))
            .returning(|_| false);

        let db = InstalledDatabase::load(&runtime, &path).unwrap();

        assert!(db.is_empty());
    }

    #[test]
    fn test_load_database() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/var/lib/perch/perch_db");

        runtime.expect_is_file().returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok("zlib;1.3.1\n".to_string()));

        let db = InstalledDatabase::load(&runtime, &path).unwrap();

        assert_eq!(db.version("zlib"), Some("1.3.1"));
    }

    #[test]
    fn test_load_unreadable_database() {
        let mut runtime = MockRuntime::new();

        runtime.expect_is_file().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let err = InstalledDatabase::load(&runtime, Path::new("/db")).unwrap_err();

        assert!(err.to_string().contains("Could not read the package database"));
    }

    #[test]
    fn test_read_nest() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/var/lib/perch/nest");

        runtime.expect_is_file().returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok("vim\n\nfirefox \n".to_string()));

        let nest = read_nest(&runtime, &path).unwrap();

        assert_eq!(nest, vec!["vim".to_string(), "firefox".to_string()]);
    }

    #[test]
    fn test_read_missing_nest() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_file().returning(|_| false);

        assert!(read_nest(&runtime, Path::new("/nest")).unwrap().is_empty());
    }
}
