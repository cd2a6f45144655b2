use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ResolveError, ResolveResult};
use crate::runtime::Runtime;

use super::variable::split_list;
use super::{DEFINITION_FILE, PackageFlag, PackageVariable};

/// Reads single `KEY="value"` variables out of package definition files.
///
/// Each `(package, variable)` pair is read from disk at most once.
pub struct MetadataReader<'a, R: Runtime> {
    runtime: &'a R,
    cache: HashMap<(String, PackageVariable), String>,
}

impl<'a, R: Runtime> MetadataReader<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self {
            runtime,
            cache: HashMap::new(),
        }
    }

    /// Read `variable` for `package` from the repository at `repo_path`.
    ///
    /// - `Ok(None)`: the definition file could not be opened, the package does not
    ///   really exist in this repository.
    /// - `Ok(Some(value))`: the value between the quotes, possibly empty.
    /// - `Err(CorruptedPackage)`: the file exists but has no well formed line for
    ///   the variable.
    #[tracing::instrument(skip(self))]
    pub fn read_variable(
        &mut self,
        package: &str,
        variable: PackageVariable,
        repo_path: &Path,
    ) -> ResolveResult<Option<String>> {
        let key = (package.to_string(), variable);
        if let Some(value) = self.cache.get(&key) {
            return Ok(Some(value.clone()));
        }

        let path = repo_path.join(package).join(DEFINITION_FILE);
        let content = match self.runtime.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Could not open {:?}: {}", path, e);
                return Ok(None);
            }
        };

        let value = extract_value(&content, variable.key()).ok_or_else(|| {
            ResolveError::CorruptedPackage {
                package: package.to_string(),
                variable: variable.key().to_string(),
                path: path.clone(),
            }
        })?;

        self.cache.insert(key, value.to_string());
        Ok(Some(value.to_string()))
    }

    /// Read the `FLAGS` variable and map it onto [`PackageFlag`].
    ///
    /// Unknown tokens are reported and skipped. A package without a definition
    /// file has no flags.
    pub fn flags(&mut self, package: &str, repo_path: &Path) -> ResolveResult<HashSet<PackageFlag>> {
        let Some(value) = self.read_variable(package, PackageVariable::Flags, repo_path)? else {
            return Ok(HashSet::new());
        };

        let mut flags = HashSet::new();
        for token in split_list(&value) {
            match token.parse::<PackageFlag>() {
                Ok(flag) => {
                    flags.insert(flag);
                }
                Err(_) => warn!("Package [{}] has an undefined flag: {}", package, token),
            }
        }

        Ok(flags)
    }
}

/// Find the first line starting with `KEY="` and return what sits between the quotes.
///
/// Values are single line and unescaped, the last `"` closes the value.
fn extract_value<'c>(content: &'c str, key: &str) -> Option<&'c str> {
    let prefix = format!("{}=\"", key);
    let line = content.lines().find(|line| line.starts_with(&prefix))?;
    line[prefix.len()..].strip_suffix('"')
}
