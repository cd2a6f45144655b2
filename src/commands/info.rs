use anyhow::Result;
use log::debug;

use crate::{
    package::{PackageFlag, PackageVariable},
    runtime::Runtime,
};

use super::config::Config;

/// Show the metadata of one package.
#[tracing::instrument(skip(config))]
pub fn info<R: Runtime>(config: &Config<R>, package: &str) -> Result<()> {
    let mut resolver = config.resolver()?;
    let source = resolver.validate(package)?;

    let version = resolver
        .read_variable(package, PackageVariable::Version)?
        .unwrap_or_default();
    let desc = resolver
        .read_variable(package, PackageVariable::Desc)?
        .unwrap_or_default();
    let deps = resolver.direct_dependencies(package)?.unwrap_or_default();

    let mut flags: Vec<PackageFlag> = resolver.flags(package)?.into_iter().collect();
    flags.sort();

    let installed = config.installed()?;

    println!("Package: {}", package);
    println!("Repository: {}", source);
    println!("Version: {}", version);
    println!("Description: {}", desc);

    if deps.is_empty() {
        println!("Dependencies: (none)");
    } else {
        println!("Dependencies: {}", deps.join(" "));
    }

    if !flags.is_empty() {
        let flags: Vec<&str> = flags.iter().map(|f| f.as_str()).collect();
        println!("Flags: {}", flags.join(" "));
    }

    match installed.version(package) {
        Some(v) => println!("Installed: {}", v),
        None => println!("Installed: no"),
    }

    Ok(())
}

/// Print one `name;version;description;[installed]` line per package.
///
/// Unknown packages get a notice instead and do not stop the search.
#[tracing::instrument(skip(config))]
pub fn search<R: Runtime>(config: &Config<R>, packages: &[String]) -> Result<()> {
    for line in search_lines(config, packages)? {
        println!("{}", line);
    }
    Ok(())
}

pub fn search_lines<R: Runtime>(config: &Config<R>, packages: &[String]) -> Result<Vec<String>> {
    let mut resolver = config.resolver()?;
    let installed = config.installed()?;
    let mut lines = Vec::with_capacity(packages.len());

    for package in packages {
        if resolver.locate(package).is_none() {
            debug!("[{}] not found in any repository", package);
            lines.push(format!("Package {} doesn't exist", package));
            continue;
        }

        let version = resolver
            .read_variable(package, PackageVariable::Version)?
            .unwrap_or_default();
        let desc = resolver
            .read_variable(package, PackageVariable::Desc)?
            .unwrap_or_default();
        let status = if installed.is_installed(package) {
            "[installed]"
        } else {
            ""
        };

        lines.push(format!("{};{};{};{}", package, version, desc, status));
    }

    Ok(lines)
}
