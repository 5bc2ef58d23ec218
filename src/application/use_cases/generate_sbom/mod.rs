use crate::application::collectors::ComponentCollector;
use crate::application::dto::{CollectorOutcome, CollectorReport, SbomRequest, SbomResponse};
use crate::ports::outbound::ProgressReporter;
use crate::sbom_generation::domain::ComponentSet;
use crate::sbom_generation::services::{
    Clock, ComponentMerger, DocumentAssembler, RandomSerialSource, SerialSource, SystemClock,
};
use crate::shared::Result;
use futures::future::join_all;
use tracing::warn;

/// GenerateSbomUseCase - Core use case for runtime SBOM generation
///
/// Runs every collector concurrently, then merges their sets in the order
/// the collectors were registered (modules first, then processes, then any
/// later sources) and assembles the document. A collector that fails as a
/// whole contributes an empty set; the run still succeeds.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
/// * `C` - Clock used for the capture timestamp
/// * `S` - SerialSource used for the document serial number
pub struct GenerateSbomUseCase<PR, C = SystemClock, S = RandomSerialSource> {
    collectors: Vec<Box<dyn ComponentCollector>>,
    assembler: DocumentAssembler<C, S>,
    progress_reporter: PR,
}

impl<PR: ProgressReporter> GenerateSbomUseCase<PR> {
    /// Creates a use case with wall-clock time and random serial numbers
    pub fn new(collectors: Vec<Box<dyn ComponentCollector>>, progress_reporter: PR) -> Self {
        Self::with_assembler(collectors, DocumentAssembler::new(), progress_reporter)
    }
}

impl<PR, C, S> GenerateSbomUseCase<PR, C, S>
where
    PR: ProgressReporter,
    C: Clock,
    S: SerialSource,
{
    pub fn with_assembler(
        collectors: Vec<Box<dyn ComponentCollector>>,
        assembler: DocumentAssembler<C, S>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            collectors,
            assembler,
            progress_reporter,
        }
    }

    /// Executes one discovery pass
    ///
    /// # Errors
    /// Returns an error only if the document cannot be assembled (invalid
    /// root name). Collector failures are reported and recovered.
    pub async fn execute(&self, request: SbomRequest) -> Result<SbomResponse> {
        // Step 1: Collect from every source concurrently
        let (sets, collector_reports) = self.collect_all().await;

        // Step 2: Merge in registration order
        let merged = ComponentMerger::merge(sets);
        self.progress_reporter.report(&format!(
            "🧩 Merged into {} unique component(s)",
            merged.len()
        ));

        // Step 3: Assemble the document
        let document = self.assembler.assemble(merged, &request.root_name)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Inventory complete: {} component(s) for '{}'",
            document.components().len(),
            document.metadata().root_component().name()
        ));

        Ok(SbomResponse::new(document, collector_reports))
    }

    /// Runs all collectors and returns their sets in registration order
    async fn collect_all(&self) -> (Vec<ComponentSet>, Vec<CollectorReport>) {
        self.progress_reporter.report(&format!(
            "🔍 Collecting components from {} source(s)...",
            self.collectors.len()
        ));

        let results = join_all(self.collectors.iter().map(|collector| collector.collect())).await;

        let mut sets = Vec::with_capacity(results.len());
        let mut reports = Vec::with_capacity(results.len());

        for (collector, result) in self.collectors.iter().zip(results) {
            let outcome = match result {
                Ok(set) => {
                    self.progress_reporter.report(&format!(
                        "   - {}: {} component(s)",
                        collector.name(),
                        set.len()
                    ));
                    let count = set.len();
                    sets.push(set);
                    CollectorOutcome::Collected(count)
                }
                Err(e) => {
                    warn!(collector = collector.name(), error = %e, "collector failed");
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: {} collector failed, continuing without it: {}",
                        collector.name(),
                        e
                    ));
                    sets.push(ComponentSet::new());
                    CollectorOutcome::Failed(e.to_string())
                }
            };
            reports.push(CollectorReport {
                collector: collector.name().to_string(),
                outcome,
            });
        }

        (sets, reports)
    }
}
