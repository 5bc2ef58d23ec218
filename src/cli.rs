use clap::Parser;
use std::path::PathBuf;

/// Inventory the software actually running on this host as a CycloneDX SBOM
#[derive(Parser, Debug, Default)]
#[command(name = "runtime-sbom")]
#[command(version)]
#[command(
    about = "Generate a runtime SBOM from loaded modules, running executables and their shared libraries",
    long_about = None
)]
pub struct Args {
    /// Output file path (`-` writes to stdout) [default: runtime-sbom.json]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to a config file (defaults to ./runtime-sbom.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the application or system being inventoried [default: runtime-system]
    #[arg(short, long)]
    pub root_name: Option<String>,

    /// Skip the loaded-module collector
    #[arg(long)]
    pub no_modules: bool,

    /// Skip the running-process collector
    #[arg(long)]
    pub no_processes: bool,

    /// Python interpreter used to locate site-packages and snapshot modules [default: python3]
    #[arg(long, value_name = "PROGRAM")]
    pub python: Option<String>,

    /// Site-packages directory to read package metadata from
    /// Can be specified multiple times; earlier directories win
    #[arg(long = "site-packages", value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,

    /// File listing loaded module names, one per line, instead of asking the interpreter
    #[arg(long, value_name = "PATH")]
    pub module_listing: Option<PathBuf>,

    /// Module to import before the interpreter snapshot (repeatable)
    #[arg(long, value_name = "MODULE")]
    pub preload: Vec<String>,

    /// JSON feed of library-load events recorded by a system tracer
    #[arg(long, value_name = "PATH")]
    pub event_feed: Option<PathBuf>,

    /// Seconds to wait for the dynamic linker (and interpreter) per call [default: 10]
    #[arg(long, value_name = "SECS", value_parser = parse_positive::<u64>)]
    pub ldd_timeout: Option<u64>,

    /// Number of concurrent file digests [default: 8]
    #[arg(long, value_name = "N", value_parser = parse_positive::<usize>)]
    pub workers: Option<usize>,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_positive<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let value: T = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value <= T::default() {
        return Err("must be greater than 0".to_string());
    }
    Ok(value)
}
