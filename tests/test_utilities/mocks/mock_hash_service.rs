use async_trait::async_trait;
use runtime_sbom::prelude::*;
use runtime_sbom::shared::error::HashError;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock HashService: every path digests to a value derived from its length,
/// unless registered as missing, unreadable or with an explicit digest
#[derive(Default)]
pub struct MockHashService {
    digests: HashMap<PathBuf, String>,
    missing: HashSet<PathBuf>,
    unreadable: HashSet<PathBuf>,
    call_count: AtomicUsize,
}

impl MockHashService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_digest(mut self, path: impl Into<PathBuf>, fill: char) -> Self {
        self.digests.insert(path.into(), fill.to_string().repeat(64));
        self
    }

    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HashService for MockHashService {
    async fn digest(&self, path: &Path) -> std::result::Result<ContentDigest, HashError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.missing.contains(path) {
            return Err(HashError::Missing {
                path: path.to_path_buf(),
            });
        }
        if self.unreadable.contains(path) {
            return Err(HashError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        let hex = self
            .digests
            .get(path)
            .cloned()
            .unwrap_or_else(|| format!("{:064x}", path.as_os_str().len()));
        Ok(ContentDigest::from_hex(&hex).unwrap())
    }
}
