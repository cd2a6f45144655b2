//! Command implementations behind the CLI.
//!
//! Each command builds a fresh [`Resolver`](crate::resolver::Resolver) from the
//! [`Config`] and prints its result to stdout.

pub mod config;
mod deps;
mod info;
mod orphans;
mod paths;

pub use config::Config;
pub use deps::{deps, install_plan};
pub use info::{info, search, search_lines};
pub use orphans::{orphans, rdeps, scan_orphans};
pub use paths::Paths;
