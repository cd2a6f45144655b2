use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{
    database::{InstalledDatabase, read_nest},
    package::{PackageSource, load_sources},
    resolver::{ResolveOptions, Resolver},
    runtime::Runtime,
};

use super::paths::Paths;

/// Everything a command needs: filesystem access, where things live, resolver tuning.
pub struct Config<R: Runtime> {
    pub runtime: R,
    pub paths: Paths,
    pub options: ResolveOptions,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, root: Option<PathBuf>, max_depth: Option<i32>) -> Self {
        let mut options = ResolveOptions::default();
        if let Some(depth) = max_depth {
            debug!("Overriding maximum dependency depth: {}", depth);
            options.max_depth = depth;
        }

        Self {
            runtime,
            paths: Paths::from_root(root),
            options,
        }
    }

    pub fn sources(&self) -> Result<Vec<PackageSource>> {
        load_sources(&self.runtime, &self.paths.sources)
    }

    /// A fresh resolver over the configured repositories.
    pub fn resolver(&self) -> Result<Resolver<'_, R>> {
        Ok(Resolver::with_options(&self.runtime, self.sources()?, self.options))
    }

    pub fn installed(&self) -> Result<InstalledDatabase> {
        InstalledDatabase::load(&self.runtime, &self.paths.database)
    }

    pub fn nest(&self) -> Result<Vec<String>> {
        read_nest(&self.runtime, &self.paths.nest)
    }

    pub fn has_fakeroot(&self, package: &str) -> bool {
        self.runtime.is_dir(&self.paths.fakeroot_dir(package))
    }
}
