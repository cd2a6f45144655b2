//! Error types for resolver operations.
//!
//! Absence (unknown package, empty dependency list) is never an error. What ends up
//! here is either malformed repository data or a broken resolver invariant.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Package [{name}] has an invalid name")]
    InvalidPackageName { name: String },

    #[error("Package [{name}] does not exist")]
    PackageNotFound { name: String },

    #[error(
        "Package {package} is corrupted! Please check the formatting for variable '{variable}' in {}",
        .path.display()
    )]
    CorruptedPackage {
        package: String,
        variable: String,
        path: PathBuf,
    },

    #[error("Malformed repository entry '{line}', expected 'name;url;path'")]
    InvalidSource { line: String },

    #[error("[{name}] is not a meta package")]
    NotAMetaPackage { name: String },

    #[error("Dependency cache already holds an entry for [{package}]")]
    CacheOverwrite { package: String },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type ResolveResult<T> = Result<T, ResolveError>;

impl ResolveError {
    pub fn io(path: PathBuf, source: anyhow::Error) -> Self {
        Self::Io {
            path,
            source: source.into(),
        }
    }

    /// Errors that point at the resolver's own bookkeeping rather than at the data.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ResolveError::NotAMetaPackage { .. } | ResolveError::CacheOverwrite { .. }
        )
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ResolveError::PackageNotFound { .. } => {
                Some("Check the package name spelling or sync the repositories")
            }
            ResolveError::InvalidPackageName { .. } => Some(
                "Package names may only contain lowercase letters, digits, '_', '+' and '-'",
            ),
            ResolveError::CorruptedPackage { .. } => {
                Some("Values must be written on a single line as KEY=\"value\"")
            }
            ResolveError::InvalidSource { .. } => {
                Some("Each repository line needs a name, a url and a path separated by ';'")
            }
            _ => None,
        }
    }
}
