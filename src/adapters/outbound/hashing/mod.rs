/// File digest adapters
mod caching_hasher;
mod sha256_hasher;

pub use caching_hasher::CachingHashService;
pub use sha256_hasher::Sha256FileHasher;
