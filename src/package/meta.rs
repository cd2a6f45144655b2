use log::debug;
use std::collections::HashMap;

use crate::error::{ResolveError, ResolveResult};
use crate::runtime::Runtime;

use super::variable::split_list;
use super::{META_PACKAGES_FILE, PackageSource};

/// Table of meta-packages: named groups that stand in for their members.
///
/// Built from the optional `meta_packages` file of every repository, one
/// `group:member1 member2 ...` entry per line.
#[derive(Debug, Default)]
pub struct MetaPackages {
    groups: HashMap<String, Vec<String>>,
}

impl MetaPackages {
    /// Scan all repositories and build the table.
    ///
    /// Repositories without a `meta_packages` file are skipped. Files are read in
    /// priority order and a later definition of a group replaces an earlier one.
    #[tracing::instrument(skip(runtime, sources))]
    pub fn load<R: Runtime>(runtime: &R, sources: &[PackageSource]) -> ResolveResult<Self> {
        let mut table = Self::default();

        for source in sources {
            let path = source.path.join(META_PACKAGES_FILE);
            if !runtime.exists(&path) {
                continue;
            }

            let content = runtime
                .read_to_string(&path)
                .map_err(|e| ResolveError::io(path.clone(), e))?;
            table.add_lines(&content);
        }

        debug!("Loaded {} meta packages", table.groups.len());
        Ok(table)
    }

    /// Parse the content of one `meta_packages` file into the table.
    pub fn add_lines(&mut self, content: &str) {
        for line in content.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Lines without a delimiter are not group definitions
            let Some((group, members)) = line.split_once(':') else {
                continue;
            };

            let members = split_list(members).map(String::from).collect();
            if self.groups.insert(group.to_string(), members).is_some() {
                debug!("Meta package [{}] redefined", group);
            }
        }
    }

    pub fn is_meta(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Members of a meta-package, in declaration order.
    ///
    /// Callers check [`MetaPackages::is_meta`] first; asking for anything else is
    /// a bug in the caller.
    pub fn expand(&self, name: &str) -> ResolveResult<&[String]> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ResolveError::NotAMetaPackage {
                name: name.to_string(),
            })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.groups.len()
    }
}
