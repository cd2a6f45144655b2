use anyhow::Result;
use log::{debug, info};

use crate::runtime::Runtime;

use super::config::Config;

/// Print what has to be installed, in order, to get `packages` onto the system.
#[tracing::instrument(skip(config))]
pub fn deps<R: Runtime>(config: &Config<R>, packages: &[String], all: bool) -> Result<()> {
    for package in install_plan(config, packages, all)? {
        println!("{}", package);
    }
    Ok(())
}

/// Install order for `packages`, dependencies first. Unless `all` is set, packages
/// already in the installed database are left out.
pub fn install_plan<R: Runtime>(config: &Config<R>, packages: &[String], all: bool) -> Result<Vec<String>> {
    let mut resolver = config.resolver()?;

    for package in packages {
        let source = resolver.validate(package)?;
        debug!("[{}] found in {}", package, source);
    }

    let order = resolver.install_order(packages)?;
    info!("Resolved {} package(s)", order.len());

    if all {
        return Ok(order);
    }

    let installed = config.installed()?;
    Ok(order
        .into_iter()
        .filter(|package| !installed.is_installed(package))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::runtime::RealRuntime;
    use crate::test_utils::SystemFixture;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_install_plan_skips_installed() {
        let system = SystemFixture::new();
        system
            .repo()
            .package("app", "libfoo")
            .package("libfoo", "zlib")
            .package("zlib", "");
        system.installed(&[("zlib", "1.3.1")]);

        let config = Config::new(RealRuntime, Some(system.root()), None);

        assert_eq!(
            install_plan(&config, &names(&["app"]), false).unwrap(),
            names(&["libfoo", "app"])
        );
        assert_eq!(
            install_plan(&config, &names(&["app"]), true).unwrap(),
            names(&["zlib", "libfoo", "app"])
        );
    }

    #[test]
    fn test_install_plan_multiple_packages() {
        let system = SystemFixture::new();
        system
            .repo()
            .package("vim", "ncurses")
            .package("htop", "ncurses")
            .package("ncurses", "");

        let config = Config::new(RealRuntime, Some(system.root()), None);
        let plan = install_plan(&config, &names(&["vim", "htop"]), false).unwrap();

        assert_eq!(plan, names(&["ncurses", "htop", "vim"]));
    }

    #[test]
    fn test_install_plan_unknown_package() {
        let system = SystemFixture::new();
        system.repo().package("zlib", "");

        let config = Config::new(RealRuntime, Some(system.root()), None);
        let err = install_plan(&config, &names(&["ghost"]), false).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_install_plan_respects_max_depth() {
        let system = SystemFixture::new();
        system
            .repo()
            .package("a", "b")
            .package("b", "c")
            .package("c", "");

        let config = Config::new(RealRuntime, Some(system.root()), Some(0));
        let plan = install_plan(&config, &names(&["a"]), true).unwrap();

        assert_eq!(plan, names(&["b", "a"]));
    }
}
