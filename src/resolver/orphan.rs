use log::{debug, info, warn};
use std::collections::HashSet;

use crate::error::ResolveResult;
use crate::package::PackageFlag;
use crate::runtime::Runtime;

use super::Resolver;

/// Outcome of an orphan scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanScan {
    /// Confirmed orphans, in the order they were confirmed
    pub orphans: Vec<String>,
    pub passes: usize,
    /// False when the pass cap was reached while passes were still finding orphans
    pub converged: bool,
}

impl OrphanScan {
    pub fn contains(&self, package: &str) -> bool {
        self.orphans.iter().any(|p| p == package)
    }
}

impl<R: Runtime> Resolver<'_, R> {
    /// Find installed packages that nothing explicitly requested and nothing
    /// still installed depends on.
    ///
    /// Candidates are the installed packages missing from `nest`. A candidate is
    /// skipped while `has_fakeroot` is false for it (no removal record) or it is
    /// flagged `important`. Flags are only read for candidates that have a
    /// fakeroot. Otherwise a candidate is an orphan once every installed package
    /// depending on it directly is itself an orphan. Passes repeat until one
    /// confirms nothing new, or the pass cap is hit.
    pub fn find_orphans<F>(
        &mut self,
        installed: &[String],
        nest: &[String],
        has_fakeroot: F,
    ) -> ResolveResult<OrphanScan>
    where
        F: Fn(&str) -> bool,
    {
        let nest: HashSet<&str> = nest.iter().map(String::as_str).collect();
        let candidates: Vec<&str> = installed
            .iter()
            .map(String::as_str)
            .filter(|p| !nest.contains(p))
            .collect();
        info!("Checking {} orphan candidates", candidates.len());

        let mut scan = OrphanScan::default();
        let mut confirmed: HashSet<String> = HashSet::new();
        let max_passes = self.options.max_orphan_passes;

        while scan.passes < max_passes {
            scan.passes += 1;
            let mut found = false;

            for &candidate in &candidates {
                if confirmed.contains(candidate) {
                    continue;
                }

                if !has_fakeroot(candidate) {
                    debug!("[{}] has no fakeroot record, skipping", candidate);
                    continue;
                }

                if self.flags(candidate)?.contains(&PackageFlag::Important) {
                    debug!("[{}] is important, skipping", candidate);
                    continue;
                }

                let dependents = self.reverse_dependencies(candidate, installed)?;
                if dependents.iter().all(|d| confirmed.contains(d)) {
                    debug!("[{}] is an orphan (pass {})", candidate, scan.passes);
                    confirmed.insert(candidate.to_string());
                    scan.orphans.push(candidate.to_string());
                    found = true;
                }
            }

            if !found {
                scan.converged = true;
                break;
            }
        }

        if !scan.converged {
            warn!(
                "Orphan scan stopped after {} passes without converging, the result may be incomplete",
                scan.passes
            );
        }

        Ok(scan)
    }
}
