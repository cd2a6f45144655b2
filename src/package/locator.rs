use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::runtime::Runtime;

use super::{DEFINITION_FILE, PackageSource};

/// Finds which repository defines a package.
///
/// Results are remembered per package name for the lifetime of the locator.
/// Misses are not remembered, a later call scans the repositories again.
pub struct RepositoryLocator<'a, R: Runtime> {
    runtime: &'a R,
    cache: HashMap<String, PackageSource>,
}

impl<'a, R: Runtime> RepositoryLocator<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self {
            runtime,
            cache: HashMap::new(),
        }
    }

    /// Path of the definition file a repository would hold for a package.
    ///
    /// Returns: `<repo>/<package>/seed.sh`
    pub fn definition_path(source: &PackageSource, package: &str) -> PathBuf {
        source.package_dir(package).join(DEFINITION_FILE)
    }

    /// Return the first repository (in priority order) that defines `package`.
    #[tracing::instrument(skip(self, sources))]
    pub fn locate(&mut self, package: &str, sources: &[PackageSource]) -> Option<PackageSource> {
        if package.is_empty() || sources.is_empty() {
            return None;
        }

        if let Some(source) = self.cache.get(package) {
            return Some(source.clone());
        }

        let source = sources
            .iter()
            .find(|source| self.runtime.is_file(&Self::definition_path(source, package)))?;

        debug!("Located [{}] in repository {}", package, source.name);
        Some(
            self.cache
                .entry(package.to_string())
                .or_insert_with(|| source.clone())
                .clone(),
        )
    }

    #[cfg(test)]
    fn cached(&self, package: &str) -> Option<&PackageSource> {
        self.cache.get(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn sources() -> Vec<PackageSource> {
        vec![
            PackageSource::new("core", "https://example.com/core", "/repo/core"),
            PackageSource::new("extra", "https://example.com/extra", "/repo/extra"),
        ]
    }

    #[test]
    fn test_locate_first_repository_wins() {
        let mut runtime = MockRuntime::new();

        // --- Setup ---

        // Both repositories define the package
        runtime
            .expect_is_file()
            .with(eq(PathBuf::from("/repo/core/zlib/seed.sh")))
            .times(1)
            .returning(|_| true);

        // --- Execute ---

        let mut locator = RepositoryLocator::new(&runtime);
        let source = locator.locate("zlib", &sources()).unwrap();

        // --- Verify ---

        // The higher priority repository is used, extra is never checked
        assert_eq!(source.name, "core");
    }

    #[test]
    fn test_locate_falls_through_to_later_repository() {
        let mut runtime = MockRuntime::new();

        runtime
            .expect_is_file()
            .with(eq(PathBuf::from("/repo/core/nano/seed.sh")))
            .returning(|_| false);
        runtime
            .expect_is_file()
            .with(eq(PathBuf::from("/repo/extra/nano/seed.sh")))
            .returning(|_| true);

        let mut locator = RepositoryLocator::new(&runtime);
        let source = locator.locate("nano", &sources()).unwrap();

        assert_eq!(source.name, "extra");
        assert_eq!(locator.cached("nano"), Some(&source));
    }

    #[test]
    fn test_locate_not_found() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_file().returning(|_| false);

        let mut locator = RepositoryLocator::new(&runtime);

        assert_eq!(locator.locate("ghost", &sources()), None);
        assert_eq!(locator.cached("ghost"), None);
    }

    #[test]
    fn test_locate_is_memoized() {
        let mut runtime = MockRuntime::new();

        // Only one filesystem check for two lookups
        runtime
            .expect_is_file()
            .with(eq(PathBuf::from("/repo/core/zlib/seed.sh")))
            .times(1)
            .returning(|_| true);

        let mut locator = RepositoryLocator::new(&runtime);
        let first = locator.locate("zlib", &sources());
        let second = locator.locate("zlib", &sources());

        assert_eq!(first, second);
    }

    #[test]
    fn test_locate_rejects_empty_arguments() {
        // No expectations: nothing may touch the filesystem
        let runtime = MockRuntime::new();
        let mut locator = RepositoryLocator::new(&runtime);

        assert_eq!(locator.locate("", &sources()), None);
        assert_eq!(locator.locate("zlib", &[]), None);
    }
}
