use log::info;
use std::path::{Path, PathBuf};

/// Filesystem layout of a system managed by perch.
///
/// Everything hangs off one root, `/` on a live system or a mount point when
/// preparing another system image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    /// Repository list, one `name;url;path` line per repository
    pub sources: PathBuf,
    /// Installed packages, `name;version` rows
    pub database: PathBuf,
    /// Explicitly requested packages
    pub nest: PathBuf,
    /// Per-package file lists of installed packages
    pub fakeroot: PathBuf,
}

impl Paths {
    #[tracing::instrument]
    pub fn new(root: &Path) -> Self {
        info!("Using root: {}", root.display());

        Self {
            root: root.to_path_buf(),
            sources: root.join("etc/perch-sources.conf"),
            database: root.join("var/lib/perch/perch_db"),
            nest: root.join("var/lib/perch/nest"),
            fakeroot: root.join("var/db/fakeroot"),
        }
    }

    pub fn from_root(root: Option<PathBuf>) -> Self {
        match root {
            Some(path) => Self::new(&path),
            None => Self::default(),
        }
    }

    pub fn fakeroot_dir(&self, package: &str) -> PathBuf {
        self.fakeroot.join(package)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new(Path::new("/"))
    }
}
