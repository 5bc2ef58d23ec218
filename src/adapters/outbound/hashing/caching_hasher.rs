use crate::ports::outbound::HashService;
use crate::sbom_generation::domain::ContentDigest;
use crate::shared::error::HashError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CachingHashService wraps a HashService and memoizes digests per path.
///
/// Shared libraries such as `libc.so.6` are linked by almost every process;
/// with the cache they are read once per pass. Only successes are cached, so
/// a file that was briefly unreadable is retried on the next lookup.
///
/// Create one per discovery pass: a long-lived cache would hide files that
/// were replaced on disk.
pub struct CachingHashService<H: HashService> {
    inner: H,
    cache: Arc<DashMap<PathBuf, ContentDigest>>,
}

impl<H: HashService> CachingHashService<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<H: HashService> HashService for CachingHashService<H> {
    async fn digest(&self, path: &Path) -> Result<ContentDigest, HashError> {
        if let Some(cached) = self.cache.get(path) {
            return Ok(cached.clone());
        }

        let digest = self.inner.digest(path).await?;
        self.cache.insert(path.to_path_buf(), digest.clone());

        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock hasher that tracks call counts and fails for `/missing/*`
    struct CountingHasher {
        call_count: AtomicUsize,
    }

    impl CountingHasher {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HashService for CountingHasher {
        async fn digest(&self, path: &Path) -> Result<ContentDigest, HashError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if path.starts_with("/missing") {
                return Err(HashError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Ok(ContentDigest::from_hex(&"c".repeat(64)).unwrap())
        }
    }

    #[tokio::test]
    async fn test_caching_hasher_returns_cached_value() {
        let hasher = CachingHashService::new(CountingHasher::new());
        let libc = Path::new("/lib/x86_64-linux-gnu/libc.so.6");

        let first = hasher.digest(libc).await.unwrap();
        let second = hasher.digest(libc).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(hasher.inner.get_call_count(), 1);
        assert_eq!(hasher.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_caching_hasher_different_paths_cached_separately() {
        let hasher = CachingHashService::new(CountingHasher::new());

        hasher.digest(Path::new("/lib/libc.so.6")).await.unwrap();
        hasher.digest(Path::new("/lib/libm.so.6")).await.unwrap();

        assert_eq!(hasher.inner.get_call_count(), 2);
        assert_eq!(hasher.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_caching_hasher_does_not_cache_failures() {
        let hasher = CachingHashService::new(CountingHasher::new());
        let gone = Path::new("/missing/libgone.so");

        assert!(hasher.digest(gone).await.unwrap_err().is_missing());
        assert!(hasher.digest(gone).await.is_err());

        assert_eq!(hasher.inner.get_call_count(), 2);
        assert_eq!(hasher.cache_size(), 0);
    }
}
