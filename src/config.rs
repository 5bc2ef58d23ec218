//! Configuration file support for runtime-sbom.
//!
//! Provides YAML-based configuration through `runtime-sbom.config.yml` files,
//! and resolution of the effective [`Settings`] from config and CLI flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::python::DEFAULT_INTERPRETER;
use crate::adapters::outbound::system::{DEFAULT_LINKER_PROGRAM, DEFAULT_LINKER_TIMEOUT};
use crate::application::collectors::DEFAULT_HASH_WORKERS;
use crate::cli::Args;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "runtime-sbom.config.yml";
pub const DEFAULT_ROOT_NAME: &str = "runtime-system";
pub const DEFAULT_OUTPUT: &str = "runtime-sbom.json";
const STDOUT_MARKER: &str = "-";

type UnknownFields = BTreeMap<String, serde_yaml_ng::Value>;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub root_name: Option<String>,
    pub output: Option<String>,
    pub collectors: Option<CollectorsConfig>,
    pub python: Option<PythonConfig>,
    pub linker: Option<LinkerConfig>,
    pub hashing: Option<HashingConfig>,
    pub event_feed: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// Which built-in collectors run.
#[derive(Debug, Deserialize, Default)]
pub struct CollectorsConfig {
    pub modules: Option<bool>,
    pub processes: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct PythonConfig {
    pub interpreter: Option<String>,
    pub site_packages: Option<Vec<PathBuf>>,
    pub module_listing: Option<PathBuf>,
    pub preload: Option<Vec<String>>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct LinkerConfig {
    pub program: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct HashingConfig {
    pub workers: Option<usize>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref root_name) = config.root_name {
        if root_name.trim().is_empty() {
            bail!(
                "Invalid config: root_name must not be empty.\n\n\
                 💡 Hint: Name the application or host being inventoried (e.g., \"billing-api\")."
            );
        }
    }
    if let Some(ref output) = config.output {
        if output.trim().is_empty() {
            bail!("Invalid config: output must not be empty.\n\n💡 Hint: Use \"-\" to write to stdout.");
        }
    }
    if config.linker.as_ref().and_then(|l| l.timeout_secs) == Some(0) {
        bail!("Invalid config: linker.timeout_secs must be greater than 0.");
    }
    if config.hashing.as_ref().and_then(|h| h.workers) == Some(0) {
        bail!("Invalid config: hashing.workers must be greater than 0.");
    }
    Ok(())
}

/// Dotted paths of every unknown key, top-level first
fn unknown_field_paths(config: &ConfigFile) -> Vec<String> {
    let mut paths: Vec<String> = config.unknown_fields.keys().cloned().collect();
    let mut nested = |section: &str, fields: Option<&UnknownFields>| {
        if let Some(fields) = fields {
            paths.extend(fields.keys().map(|key| format!("{}.{}", section, key)));
        }
    };
    nested("collectors", config.collectors.as_ref().map(|c| &c.unknown_fields));
    nested("python", config.python.as_ref().map(|p| &p.unknown_fields));
    nested("linker", config.linker.as_ref().map(|l| &l.unknown_fields));
    nested("hashing", config.hashing.as_ref().map(|h| &h.unknown_fields));
    paths
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in unknown_field_paths(config) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Where the exported document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    fn parse(value: &str) -> Self {
        if value == STDOUT_MARKER {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

/// Effective settings for one run: CLI flags over config file over defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root_name: String,
    pub output: OutputTarget,
    pub collect_modules: bool,
    pub collect_processes: bool,
    pub interpreter: String,
    pub site_packages: Vec<PathBuf>,
    pub module_listing: Option<PathBuf>,
    pub preload: Vec<String>,
    pub linker_program: String,
    pub linker_timeout: Duration,
    pub hash_workers: usize,
    pub event_feed: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let collectors = config.collectors.unwrap_or_default();
        let python = config.python.unwrap_or_default();
        let linker = config.linker.unwrap_or_default();
        let hashing = config.hashing.unwrap_or_default();

        let root_name = args
            .root_name
            .clone()
            .or(config.root_name)
            .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
        if root_name.trim().is_empty() {
            bail!("Invalid root name: must not be empty");
        }

        let output = args
            .output
            .clone()
            .or(config.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

        let site_packages = if args.site_packages.is_empty() {
            python.site_packages.unwrap_or_default()
        } else {
            args.site_packages.clone()
        };

        let preload = if args.preload.is_empty() {
            python.preload.unwrap_or_default()
        } else {
            args.preload.clone()
        };

        let linker_timeout = args
            .ldd_timeout
            .or(linker.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LINKER_TIMEOUT);

        Ok(Self {
            root_name,
            output: OutputTarget::parse(&output),
            collect_modules: !args.no_modules && collectors.modules.unwrap_or(true),
            collect_processes: !args.no_processes && collectors.processes.unwrap_or(true),
            interpreter: args
                .python
                .clone()
                .or(python.interpreter)
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            site_packages,
            module_listing: args.module_listing.clone().or(python.module_listing),
            preload,
            linker_program: linker
                .program
                .unwrap_or_else(|| DEFAULT_LINKER_PROGRAM.to_string()),
            linker_timeout,
            hash_workers: args
                .workers
                .or(hashing.workers)
                .unwrap_or(DEFAULT_HASH_WORKERS),
            event_feed: args.event_feed.clone().or(config.event_feed),
        })
    }
}
