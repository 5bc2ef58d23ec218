use super::ComponentCollector;
use crate::ports::outbound::{DependencyResolver, HashService, ProcessSource, ProgressReporter};
use crate::sbom_generation::domain::{
    Component, ComponentSet, ContentDigest, LibraryDependency, ProcessEntry,
};
use crate::shared::error::HashError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default number of concurrent digest computations
pub const DEFAULT_HASH_WORKERS: usize = 8;

/// ExecutableInspector building components for running executables and
/// the shared libraries the dynamic linker resolves for them
///
/// Processes sharing one executable path are inspected once. A process whose
/// executable is gone by the time it is digested contributes nothing; any
/// other read failure only drops the digest.
pub struct ExecutableInspector<P, D, H> {
    process_source: P,
    dependency_resolver: D,
    hasher: H,
    workers: usize,
    hash_permits: Semaphore,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl<P, D, H> ExecutableInspector<P, D, H>
where
    P: ProcessSource,
    D: DependencyResolver,
    H: HashService,
{
    pub fn new(process_source: P, dependency_resolver: D, hasher: H) -> Self {
        Self {
            process_source,
            dependency_resolver,
            hasher,
            workers: DEFAULT_HASH_WORKERS,
            hash_permits: Semaphore::new(DEFAULT_HASH_WORKERS),
            progress: None,
        }
    }

    /// Bounds concurrent digests and concurrently inspected executables
    pub fn with_workers(mut self, workers: usize) -> Self {
        let workers = workers.max(1);
        self.workers = workers;
        self.hash_permits = Semaphore::new(workers);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Builds the executable component plus one component per resolved
    /// library for a single process. Returns nothing when the process has no
    /// visible executable or the executable vanished.
    pub async fn inspect(&self, entry: &ProcessEntry) -> Vec<Component> {
        let Some(exe_path) = entry.exe_path() else {
            debug!(pid = entry.pid(), name = entry.name(), "no executable path, skipping");
            return Vec::new();
        };

        let exe_digest = match self.digest(exe_path).await {
            Ok(digest) => Some(digest),
            Err(e) if e.is_missing() => {
                debug!(
                    pid = entry.pid(),
                    path = %exe_path.display(),
                    "executable vanished, skipping"
                );
                return Vec::new();
            }
            Err(e) => {
                debug!(pid = entry.pid(), error = %e, "executable not digestible");
                None
            }
        };

        let executable = match Component::executable(exe_path, exe_digest) {
            Ok(component) => component,
            Err(e) => {
                debug!(pid = entry.pid(), error = %e, "unusable executable path, skipping");
                return Vec::new();
            }
        };

        let dependencies = match self.dependency_resolver.resolve(exe_path).await {
            Ok(dependencies) => dependencies,
            Err(e) => {
                debug!(
                    path = %exe_path.display(),
                    error = %e,
                    "dependency resolution failed, treating as none"
                );
                Vec::new()
            }
        };

        let lookups: Vec<BoxFuture<'_, Option<Component>>> = dependencies
            .iter()
            .map(|dependency| self.library_component(dependency).boxed())
            .collect();
        let libraries: Vec<Option<Component>> =
            stream::iter(lookups).buffered(self.workers).collect().await;

        let mut components = Vec::with_capacity(libraries.len() + 1);
        components.push(executable);
        components.extend(libraries.into_iter().flatten());
        components
    }

    async fn library_component(&self, dependency: &LibraryDependency) -> Option<Component> {
        let digest = match self.digest(dependency.resolved_path()).await {
            Ok(digest) => Some(digest),
            Err(e) => {
                debug!(library = dependency.lib_name(), error = %e, "library not digestible");
                None
            }
        };

        match dependency.to_component(digest) {
            Ok(component) => Some(component),
            Err(e) => {
                debug!(
                    library = dependency.lib_name(),
                    error = %e,
                    "unusable library name, skipping"
                );
                None
            }
        }
    }

    async fn inspect_counted(
        &self,
        entry: ProcessEntry,
        finished: &AtomicUsize,
        total: usize,
    ) -> Vec<Component> {
        let components = self.inspect(&entry).await;
        let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(progress) = &self.progress {
            progress.report_progress(done, total, Some(entry.name()));
        }
        components
    }

    async fn digest(&self, path: &Path) -> std::result::Result<ContentDigest, HashError> {
        // The semaphore is never closed, so acquire cannot fail.
        let _permit = self.hash_permits.acquire().await.ok();
        self.hasher.digest(path).await
    }

    /// First process per distinct executable path, in snapshot order
    fn distinct_executables(entries: Vec<ProcessEntry>) -> Vec<ProcessEntry> {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|entry| match entry.exe_path() {
                Some(path) => seen.insert(path.to_path_buf()),
                None => false,
            })
            .collect()
    }
}

#[async_trait]
impl<P, D, H> ComponentCollector for ExecutableInspector<P, D, H>
where
    P: ProcessSource,
    D: DependencyResolver,
    H: HashService,
{
    fn name(&self) -> &str {
        "processes"
    }

    async fn collect(&self) -> Result<ComponentSet> {
        let entries = self.process_source.snapshot().await?;
        let processes = entries.len();
        let executables = Self::distinct_executables(entries);
        let total = executables.len();
        debug!(processes, executables = total, "inspecting executables");

        let finished = AtomicUsize::new(0);
        let inspections: Vec<BoxFuture<'_, Vec<Component>>> = executables
            .into_iter()
            .map(|entry| self.inspect_counted(entry, &finished, total).boxed())
            .collect();

        let per_process: Vec<Vec<Component>> = stream::iter(inspections)
            .buffered(self.workers)
            .collect()
            .await;

        let mut components = ComponentSet::new();
        for component in per_process.into_iter().flatten() {
            components.insert_or_backfill(component);
        }
        Ok(components)
    }
}
