/// Result alias used by every layer; errors propagate as `anyhow::Error`
/// wrapping the typed variants from [`crate::shared::error`].
pub type Result<T> = std::result::Result<T, anyhow::Error>;
