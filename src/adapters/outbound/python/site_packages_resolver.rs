use crate::adapters::outbound::system::run_with_timeout;
use crate::ports::outbound::PackageIdentityResolver;
use crate::sbom_generation::domain::{IdentityLookup, PackageIdentity};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const PYPI_ECOSYSTEM: &str = "pypi";

/// Prints one site-packages directory per line, user site last
const SITE_QUERY: &str = "import site\n\
dirs = list(site.getsitepackages())\n\
user = site.getusersitepackages()\n\
dirs += [user] if isinstance(user, str) else list(user)\n\
print('\\n'.join(dirs))";

/// Normalizes a distribution or import name per PEP 503:
/// lower-case, runs of `-`, `_` and `.` collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
                in_separator = true;
            }
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}

/// SitePackagesResolver adapter resolving Python units from installed metadata
///
/// Built once from a scan of site-packages directories; lookups are pure
/// map reads afterwards. Both distribution names (`PyYAML`) and the import
/// names they declare in `top_level.txt` (`yaml`) resolve to the
/// distribution. Earlier directories win when a name appears twice.
#[derive(Debug, Default, Clone)]
pub struct SitePackagesResolver {
    index: HashMap<String, PackageIdentity>,
}

impl SitePackagesResolver {
    /// Scans `dirs` for `*.dist-info` and `*.egg-info` metadata
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut resolver = Self::default();
        for dir in dirs {
            resolver.scan_dir(dir);
        }
        debug!(entries = resolver.index.len(), "site-packages index built");
        resolver
    }

    /// Asks `interpreter` for its site-packages directories and scans them
    ///
    /// An interpreter that cannot be run yields an empty resolver.
    pub async fn discover(interpreter: &str, timeout: Duration) -> Self {
        match Self::query_site_dirs(interpreter, timeout).await {
            Ok(dirs) => Self::from_dirs(&dirs),
            Err(e) => {
                warn!(interpreter, error = %e, "could not locate site-packages");
                Self::default()
            }
        }
    }

    async fn query_site_dirs(
        interpreter: &str,
        timeout: Duration,
    ) -> crate::shared::Result<Vec<PathBuf>> {
        let output =
            run_with_timeout(interpreter, &["-c", SITE_QUERY], Path::new(interpreter), timeout)
                .await?;
        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                interpreter,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .filter(|dir| dir.is_dir())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn scan_dir(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "site-packages directory not readable");
                return;
            }
        };

        let mut metadata_dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "dist-info" || ext == "egg-info")
            })
            .collect();
        // read_dir order is unspecified
        metadata_dirs.sort();

        for metadata_dir in metadata_dirs {
            self.index_distribution(&metadata_dir);
        }
    }

    fn index_distribution(&mut self, metadata_dir: &Path) {
        let is_dist_info = metadata_dir
            .extension()
            .is_some_and(|ext| ext == "dist-info");
        let metadata_file = if is_dist_info { "METADATA" } else { "PKG-INFO" };

        // Single-file egg-info is PKG-INFO itself
        let metadata_path = if metadata_dir.is_dir() {
            metadata_dir.join(metadata_file)
        } else {
            metadata_dir.to_path_buf()
        };

        let identity = match fs::read_to_string(&metadata_path)
            .ok()
            .and_then(|text| parse_metadata_headers(&text))
        {
            Some(identity) => identity,
            None => {
                debug!(path = %metadata_path.display(), "no Name/Version metadata, skipping");
                return;
            }
        };

        let top_level = fs::read_to_string(metadata_dir.join("top_level.txt")).unwrap_or_default();

        self.index
            .entry(normalize_name(identity.name()))
            .or_insert_with(|| identity.clone());
        for import_name in top_level.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.index
                .entry(normalize_name(import_name))
                .or_insert_with(|| identity.clone());
        }
    }
}

/// Reads `Name:` and `Version:` from the RFC 822 style header block
fn parse_metadata_headers(text: &str) -> Option<PackageIdentity> {
    let mut name = None;
    let mut version = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Name:") {
            name.get_or_insert_with(|| value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Version:") {
            version.get_or_insert_with(|| value.trim().to_string());
        }
    }

    match (name, version) {
        (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
            Some(PackageIdentity::new(name, version))
        }
        _ => None,
    }
}

impl PackageIdentityResolver for SitePackagesResolver {
    fn ecosystem(&self) -> &str {
        PYPI_ECOSYSTEM
    }

    fn resolve(&self, unit_name: &str) -> IdentityLookup {
        match self.index.get(&normalize_name(unit_name)) {
            Some(identity) => IdentityLookup::Identity(identity.clone()),
            None => IdentityLookup::NotFound,
        }
    }
}
