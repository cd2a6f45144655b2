use anyhow::{Context, Result};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::runtime::Runtime;

/// A package repository: where its definitions live on disk and where it syncs from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageSource {
    pub name: String,
    pub url: String,
    pub path: PathBuf,
}

impl PackageSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            path: path.into(),
        }
    }

    /// The all-empty source, used where a "not found" value has to be stored.
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.url.is_empty() && !self.path.as_os_str().is_empty()
    }

    /// Directory holding one package's files: `<path>/<package>`
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.path.join(package)
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// Parse the repository list: one `name;url;path` triple per line.
///
/// Blank lines and lines starting with `#` are ignored. Order is preserved, it is
/// the priority order used when several repositories define the same package.
pub fn parse_sources(content: &str) -> Result<Vec<PackageSource>, ResolveError> {
    let mut sources = Vec::new();

    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(';').collect();
        let source = match fields.as_slice() {
            [name, url, path] => PackageSource::new(*name, *url, *path),
            _ => {
                return Err(ResolveError::InvalidSource {
                    line: line.to_string(),
                });
            }
        };

        if !source.is_valid() {
            return Err(ResolveError::InvalidSource {
                line: line.to_string(),
            });
        }

        sources.push(source);
    }

    Ok(sources)
}

/// Read and parse the repository list file.
#[tracing::instrument(skip(runtime))]
pub fn load_sources<R: Runtime>(runtime: &R, path: &Path) -> Result<Vec<PackageSource>> {
    let content = runtime
        .read_to_string(path)
        .with_context(|| format!("Could not read the repository list at {}", path.display()))?;

    let sources = parse_sources(&content)?;
    debug!("Loaded {} repositories from {:?}", sources.len(), path);

    if sources.is_empty() {
        anyhow::bail!("No valid package repositories were found in {}", path.display());
    }

    Ok(sources)
}
