//! Package repository access
//!
//! This module knows the on-disk layout of package repositories: which
//! repository defines a package, how its definition file is read, and which
//! names are meta-packages.

mod locator;
mod meta;
mod name;
mod reader;
mod source;
mod variable;

pub use locator::RepositoryLocator;
pub use meta::MetaPackages;
pub use name::is_valid_package_name;
pub use reader::MetadataReader;
pub use source::{PackageSource, load_sources, parse_sources};
pub use variable::{PackageFlag, PackageVariable};

pub(crate) use variable::split_list;

/// Per-package definition file inside `<repo>/<package>/`
pub const DEFINITION_FILE: &str = "seed.sh";

/// Optional per-repository meta-package table
pub const META_PACKAGES_FILE: &str = "meta_packages";
