use super::ComponentCollector;
use crate::ports::outbound::{HashService, LibraryEventSource, LibraryLoadEvent};
use crate::sbom_generation::domain::{Component, ComponentKind, ComponentSet, Evidence};
use crate::shared::Result;
use async_trait::async_trait;
use tracing::debug;

/// LibraryEventCollector turning recorded library-load events into components
///
/// Stands in for a kernel-level tracer: whatever produced the events, each
/// becomes a `pkg:generic/<name>@<version>` library with its load path as
/// evidence and a digest when the file is still readable.
pub struct LibraryEventCollector<E, H> {
    event_source: E,
    hasher: H,
}

impl<E, H> LibraryEventCollector<E, H>
where
    E: LibraryEventSource,
    H: HashService,
{
    pub fn new(event_source: E, hasher: H) -> Self {
        Self {
            event_source,
            hasher,
        }
    }

    async fn component_for(&self, event: LibraryLoadEvent) -> Result<Component> {
        let digest = match self.hasher.digest(&event.path).await {
            Ok(digest) => Some(digest),
            Err(e) => {
                debug!(library = %event.name, error = %e, "recorded library not digestible");
                None
            }
        };

        Ok(
            Component::generic(&event.name, event.version.as_deref(), ComponentKind::Library)?
                .with_description(format!("Path: {}", event.path.display()))
                .with_evidence(Evidence::new(Some(event.path), digest)),
        )
    }
}

#[async_trait]
impl<E, H> ComponentCollector for LibraryEventCollector<E, H>
where
    E: LibraryEventSource,
    H: HashService,
{
    fn name(&self) -> &str {
        "library-events"
    }

    async fn collect(&self) -> Result<ComponentSet> {
        let mut components = ComponentSet::new();

        for event in self.event_source.events().await? {
            let name = event.name.clone();
            match self.component_for(event).await {
                Ok(component) => components.insert_or_backfill(component),
                Err(e) => debug!(library = %name, error = %e, "invalid library event, skipping"),
            }
        }

        Ok(components)
    }
}
