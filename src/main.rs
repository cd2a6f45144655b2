use anyhow::Result;
use clap::Parser;
use log::debug;
use perch::commands::{self, Config};
use perch::error::ResolveError;
use std::path::PathBuf;
use std::process::ExitCode;

/// perch - dependency resolver for source based package repositories
///
/// Works out build order, reverse dependencies and orphaned packages from the
/// repositories listed in etc/perch-sources.conf.
///
/// Examples:
///   perch deps firefox          # What still needs building for firefox
///   perch --root /mnt orphans   # Depclean candidates of a mounted system
#[derive(Parser, Debug)]
#[command(author, version = env!("PERCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// System root directory (defaults to /; also via PERCH_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "PERCH_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,

    /// Maximum dependency chain depth followed while resolving
    #[arg(long = "max-depth", value_name = "N", global = true)]
    pub max_depth: Option<i32>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the install order for packages, dependencies first
    Deps(DepsArgs),

    /// Show package metadata
    Info(InfoArgs),

    /// Print name;version;description;[installed] for packages
    Search(SearchArgs),

    /// List installed packages that depend on a package
    Rdeps(InfoArgs),

    /// List packages nothing requested or depends on anymore
    Orphans,
}

#[derive(clap::Args, Debug)]
pub struct DepsArgs {
    /// Packages to resolve
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,

    /// Include packages that are already installed
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[arg(value_name = "PACKAGE")]
    pub package: String,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(perch::runtime::RealRuntime, cli.root, cli.max_depth);

    match cli.command {
        Commands::Deps(args) => commands::deps(&config, &args.packages, args.all),
        Commands::Info(args) => commands::info(&config, &args.package),
        Commands::Search(args) => commands::search(&config, &args.packages),
        Commands::Rdeps(args) => commands::rdeps(&config, &args.package),
        Commands::Orphans => commands::orphans(&config),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e.downcast_ref::<ResolveError>().and_then(|e| e.suggestion()) {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
