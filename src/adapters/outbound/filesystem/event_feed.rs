use crate::ports::outbound::{LibraryEventSource, LibraryLoadEvent};
use crate::shared::error::SbomError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// JsonEventFeed adapter reading library-load events recorded by a tracer
///
/// The feed is a JSON array of `{"name", "version"?, "path"}` objects.
pub struct JsonEventFeed {
    path: PathBuf,
}

impl JsonEventFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LibraryEventSource for JsonEventFeed {
    async fn events(&self) -> Result<Vec<LibraryLoadEvent>> {
        let content = read_input_file(&self.path, "library event feed")?;
        serde_json::from_str(&content).map_err(|e| {
            SbomError::EventFeedParseError {
                path: self.path.clone(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
