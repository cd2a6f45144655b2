//! Dependency resolution.
//!
//! [`Resolver`] is the long-lived context of one resolution session. It owns every
//! cache (repository lookups, metadata values, meta-package table, dependency and
//! reverse-dependency lists), so two resolvers never share state. Nothing is
//! persisted; drop the resolver to forget everything.
//!
//! # Structure
//!
//! - `cache` - insert-once map backing the dependency cache
//! - `orphan` - fixed-point orphan scan built on reverse dependencies

mod cache;
mod orphan;

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use crate::error::{ResolveError, ResolveResult};
use crate::package::{
    MetaPackages, MetadataReader, PackageFlag, PackageSource, PackageVariable, RepositoryLocator,
    is_valid_package_name, split_list,
};
use crate::runtime::Runtime;

pub use cache::InsertOnceCache;
pub use orphan::OrphanScan;

/// Recursion budget for [`Resolver::resolve`]. Chains deeper than this are cut off.
pub const DEFAULT_MAX_DEPTH: i32 = 512;

/// Upper bound on orphan scan passes before giving up on convergence.
pub const DEFAULT_MAX_ORPHAN_PASSES: usize = 256;

/// Installed in front of every package flagged as a font.
pub const FONT_CONFIG_PACKAGE: &str = "fontconfig";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub max_depth: i32,
    pub max_orphan_passes: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_orphan_passes: DEFAULT_MAX_ORPHAN_PASSES,
        }
    }
}

pub struct Resolver<'a, R: Runtime> {
    runtime: &'a R,
    sources: Vec<PackageSource>,
    options: ResolveOptions,
    locator: RepositoryLocator<'a, R>,
    reader: MetadataReader<'a, R>,
    meta: Option<MetaPackages>,
    /// Direct dependencies with meta-packages spliced in
    direct: InsertOnceCache<Vec<String>>,
    /// Full pre-order closure, not deduplicated
    dependencies: InsertOnceCache<Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
    /// Packages whose resolution is in progress, outermost first
    resolving: Vec<String>,
    cycles: Vec<Vec<String>>,
}

impl<'a, R: Runtime> Resolver<'a, R> {
    pub fn new(runtime: &'a R, sources: Vec<PackageSource>) -> Self {
        Self::with_options(runtime, sources, ResolveOptions::default())
    }

    pub fn with_options(runtime: &'a R, sources: Vec<PackageSource>, options: ResolveOptions) -> Self {
        Self {
            runtime,
            sources,
            options,
            locator: RepositoryLocator::new(runtime),
            reader: MetadataReader::new(runtime),
            meta: None,
            direct: InsertOnceCache::new(),
            dependencies: InsertOnceCache::new(),
            reverse: HashMap::new(),
            resolving: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Repository that defines `package`, if any.
    pub fn locate(&mut self, package: &str) -> Option<PackageSource> {
        self.locator.locate(package, &self.sources)
    }

    /// Check a user supplied package name: valid charset and present in a repository.
    pub fn validate(&mut self, package: &str) -> ResolveResult<PackageSource> {
        if !is_valid_package_name(package) {
            return Err(ResolveError::InvalidPackageName {
                name: package.to_string(),
            });
        }

        self.locate(package)
            .ok_or_else(|| ResolveError::PackageNotFound {
                name: package.to_string(),
            })
    }

    /// Read a variable from the definition file in the package's own repository.
    ///
    /// `Ok(None)` when no repository defines the package.
    pub fn read_variable(
        &mut self,
        package: &str,
        variable: PackageVariable,
    ) -> ResolveResult<Option<String>> {
        let Some(source) = self.locate(package) else {
            return Ok(None);
        };
        self.reader.read_variable(package, variable, &source.path)
    }

    pub fn flags(&mut self, package: &str) -> ResolveResult<HashSet<PackageFlag>> {
        let Some(source) = self.locate(package) else {
            return Ok(HashSet::new());
        };
        self.reader.flags(package, &source.path)
    }

    /// The meta-package table, loaded from the repositories on first use.
    pub fn meta_packages(&mut self) -> ResolveResult<&MetaPackages> {
        load_meta(&mut self.meta, self.runtime, &self.sources)
    }

    pub fn is_meta(&mut self, name: &str) -> ResolveResult<bool> {
        Ok(self.meta_packages()?.is_meta(name))
    }

    /// Direct dependencies of a package, meta-packages in `DEPS` replaced by their
    /// members. A meta-package's direct dependencies are its members.
    ///
    /// `Ok(None)` when the package is not defined anywhere, `Ok(Some(vec![]))` when it
    /// is defined and depends on nothing.
    #[tracing::instrument(skip(self))]
    pub fn direct_dependencies(&mut self, package: &str) -> ResolveResult<Option<Vec<String>>> {
        if let Some(deps) = self.direct.get(package) {
            return Ok(Some(deps.clone()));
        }

        let Some(source) = self.locator.locate(package, &self.sources) else {
            debug!("[{}] was not found in any repository", package);
            return Ok(None);
        };

        let meta = load_meta(&mut self.meta, self.runtime, &self.sources)?;
        let deps = if meta.is_meta(package) {
            meta.expand(package)?.to_vec()
        } else {
            let Some(line) = self
                .reader
                .read_variable(package, PackageVariable::Deps, &source.path)?
            else {
                return Ok(None);
            };

            let mut deps = Vec::new();
            for token in split_list(&line) {
                if meta.is_meta(token) {
                    deps.extend(meta.expand(token)?.iter().cloned());
                } else {
                    deps.push(token.to_string());
                }
            }
            deps
        };

        Ok(Some(self.direct.insert(package, deps)?.clone()))
    }

    /// Transitive dependencies of `package`, in pre-order and with duplicates.
    ///
    /// The list starts with the direct dependencies, followed by the resolved list
    /// of each of them in turn. `depth` is the remaining recursion budget: below
    /// zero nothing is resolved. Packages that cannot be found are leaves. A
    /// package met again while its own resolution is still running closes a cycle;
    /// the cycle is recorded and the repeated package is treated as a leaf.
    /// Packages on a cycle are cached without the ancestors that were still being
    /// resolved, so their cached lists are partial for the rest of the session.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&mut self, package: &str, depth: i32) -> ResolveResult<Vec<String>> {
        if let Some(deps) = self.dependencies.get(package) {
            return Ok(deps.clone());
        }

        if depth < 0 {
            return Ok(Vec::new());
        }

        if let Some(start) = self.resolving.iter().position(|p| p == package) {
            let mut cycle = self.resolving[start..].to_vec();
            cycle.push(package.to_string());
            warn!("Dependency cycle detected: {}", cycle.join(" -> "));
            self.cycles.push(cycle);
            return Ok(Vec::new());
        }

        let Some(direct) = self.direct_dependencies(package)? else {
            return Ok(Vec::new());
        };

        self.resolving.push(package.to_string());
        let nested = self.resolve_all(&direct, depth - 1);
        self.resolving.pop();

        let mut deps = direct;
        deps.extend(nested?);

        Ok(self.dependencies.insert(package, deps)?.clone())
    }

    fn resolve_all(&mut self, packages: &[String], depth: i32) -> ResolveResult<Vec<String>> {
        let mut deps = Vec::new();
        for package in packages {
            deps.extend(self.resolve(package, depth)?);
        }
        Ok(deps)
    }

    /// Collapse a resolved list into an install order.
    ///
    /// Walks the list from the end, keeping the first sighting of every name and
    /// dropping meta-packages. The last occurrence in the input decides the
    /// position, so the deepest dependencies come out first.
    pub fn deduplicate(&mut self, packages: &[String]) -> ResolveResult<Vec<String>> {
        let meta = self.meta_packages()?;

        let mut seen = HashSet::new();
        let mut result = Vec::with_capacity(packages.len());
        for package in packages.iter().rev() {
            if meta.is_meta(package) || !seen.insert(package.as_str()) {
                continue;
            }
            result.push(package.clone());
        }

        Ok(result)
    }

    /// Everything needed to build `packages`, dependencies first.
    ///
    /// Font packages pull in fontconfig ahead of themselves.
    pub fn install_order(&mut self, packages: &[String]) -> ResolveResult<Vec<String>> {
        let max_depth = self.options.max_depth;
        let mut full = Vec::new();

        for package in packages {
            full.push(package.clone());

            if self.flags(package)?.contains(&PackageFlag::Font) {
                full.push(FONT_CONFIG_PACKAGE.to_string());
                full.extend(self.resolve(FONT_CONFIG_PACKAGE, max_depth)?);
            }

            full.extend(self.resolve(package, max_depth)?);
        }

        self.deduplicate(&full)
    }

    /// Installed packages that list `package` among their direct dependencies.
    ///
    /// Only direct dependents are reported. `installed` is treated as a snapshot:
    /// results are cached per package name.
    #[tracing::instrument(skip(self, installed))]
    pub fn reverse_dependencies(
        &mut self,
        package: &str,
        installed: &[String],
    ) -> ResolveResult<Vec<String>> {
        if let Some(dependents) = self.reverse.get(package) {
            return Ok(dependents.clone());
        }

        let mut dependents = Vec::new();
        for candidate in installed {
            if let Some(deps) = self.direct_dependencies(candidate)?
                && deps.iter().any(|dep| dep == package)
            {
                dependents.push(candidate.clone());
            }
        }

        self.reverse.insert(package.to_string(), dependents.clone());
        Ok(dependents)
    }

    /// Dependency cycles met so far, each written as a closed path.
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    #[cfg(test)]
    fn cached_dependencies(&self, package: &str) -> Option<&[String]> {
        self.dependencies.get(package).map(Vec::as_slice)
    }
}

fn load_meta<'m, R: Runtime>(
    slot: &'m mut Option<MetaPackages>,
    runtime: &R,
    sources: &[PackageSource],
) -> ResolveResult<&'m MetaPackages> {
    let meta = match slot.take() {
        Some(meta) => meta,
        None => MetaPackages::load(runtime, sources)?,
    };
    Ok(&*slot.insert(meta))
}
