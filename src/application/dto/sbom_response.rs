use crate::sbom_generation::domain::BomDocument;

/// What happened to one collector during a discovery pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorOutcome {
    /// Collector finished; number of distinct components it produced
    Collected(usize),
    /// Whole source unavailable; contributed nothing
    Failed(String),
}

/// Per-collector summary, in merge order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorReport {
    pub collector: String,
    pub outcome: CollectorOutcome,
}

/// SbomResponse - Internal response DTO from the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomResponse {
    /// The assembled document
    pub document: BomDocument,
    /// One entry per collector, in the order they were merged
    pub collector_reports: Vec<CollectorReport>,
}

impl SbomResponse {
    pub fn new(document: BomDocument, collector_reports: Vec<CollectorReport>) -> Self {
        Self {
            document,
            collector_reports,
        }
    }

    pub fn failed_collectors(&self) -> impl Iterator<Item = &CollectorReport> {
        self.collector_reports
            .iter()
            .filter(|report| matches!(report.outcome, CollectorOutcome::Failed(_)))
    }
}
