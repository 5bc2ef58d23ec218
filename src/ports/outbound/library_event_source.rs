use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// A shared-library load observed by a system-level tracer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryLoadEvent {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub path: PathBuf,
}

/// LibraryEventSource port supplying recorded library-load events
#[async_trait]
pub trait LibraryEventSource: Send + Sync {
    async fn events(&self) -> Result<Vec<LibraryLoadEvent>>;
}
