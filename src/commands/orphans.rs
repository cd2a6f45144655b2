use anyhow::Result;
use log::{info, warn};

use crate::{resolver::OrphanScan, runtime::Runtime};

use super::config::Config;

/// List installed packages that directly depend on `package`.
#[tracing::instrument(skip(config))]
pub fn rdeps<R: Runtime>(config: &Config<R>, package: &str) -> Result<()> {
    let mut resolver = config.resolver()?;
    resolver.validate(package)?;

    let installed = config.installed()?.names();
    let dependents = resolver.reverse_dependencies(package, &installed)?;

    if dependents.is_empty() {
        println!("Nothing installed depends on {}", package);
        return Ok(());
    }

    for dependent in dependents {
        println!("{}", dependent);
    }

    Ok(())
}

/// Print packages that could be removed by a depclean.
#[tracing::instrument(skip(config))]
pub fn orphans<R: Runtime>(config: &Config<R>) -> Result<()> {
    let scan = scan_orphans(config)?;

    if !scan.converged {
        warn!("The orphan list may be incomplete");
    }

    if scan.orphans.is_empty() {
        println!("No orphans found.");
        return Ok(());
    }

    for orphan in &scan.orphans {
        println!("{}", orphan);
    }

    Ok(())
}

pub fn scan_orphans<R: Runtime>(config: &Config<R>) -> Result<OrphanScan> {
    let mut resolver = config.resolver()?;
    let installed = config.installed()?.names();
    let nest = config.nest()?;

    let scan = resolver.find_orphans(&installed, &nest, |package| config.has_fakeroot(package))?;
    info!("Found {} orphan(s) in {} pass(es)", scan.orphans.len(), scan.passes);

    Ok(scan)
}
