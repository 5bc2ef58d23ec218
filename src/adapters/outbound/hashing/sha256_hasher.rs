use crate::ports::outbound::HashService;
use crate::sbom_generation::domain::ContentDigest;
use crate::shared::error::HashError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const READ_BUFFER_SIZE: usize = 8192;

/// Sha256FileHasher adapter streaming file contents through SHA-256
///
/// Reads run on tokio's blocking pool so large binaries do not stall the
/// async workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256FileHasher;

impl Sha256FileHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest_blocking(path: PathBuf) -> Result<ContentDigest, HashError> {
        let mut file = File::open(&path).map_err(|e| HashError::from_io(path.clone(), e))?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            let read = file
                .read(&mut buffer)
                .map_err(|e| HashError::from_io(path.clone(), e))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        let hex = format!("{:x}", hasher.finalize());
        ContentDigest::from_hex(&hex).map_err(|e| HashError::Unreadable {
            path,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
        })
    }
}

#[async_trait]
impl HashService for Sha256FileHasher {
    async fn digest(&self, path: &Path) -> Result<ContentDigest, HashError> {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::digest_blocking(owned))
            .await
            .map_err(|e| HashError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?
    }
}
