/// Integration tests for the application layer
mod test_utilities;

use runtime_sbom::application::dto::CollectorOutcome;
use runtime_sbom::ports::outbound::LibraryLoadEvent;
use runtime_sbom::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_utilities::mocks::*;

/// Fixed event list for the library-event collector
struct RecordedEvents(Vec<LibraryLoadEvent>);

#[async_trait::async_trait]
impl LibraryEventSource for RecordedEvents {
    async fn events(&self) -> Result<Vec<LibraryLoadEvent>> {
        Ok(self.0.clone())
    }
}

fn module_collector(units: &[&str]) -> Box<dyn ComponentCollector> {
    Box::new(ModuleCollector::new(
        MockModuleSnapshot::new(units),
        MockIdentityResolver::new()
            .with_package("requests", "requests", "2.31.0")
            .with_package("certifi", "certifi", "2023.11.17"),
    ))
}

/// Real files standing in for installed shared libraries
struct LibraryTree {
    dir: TempDir,
}

impl LibraryTree {
    fn new(names: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), format!("ELF {}", name)).unwrap();
        }
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[tokio::test]
async fn test_stdlib_module_is_skipped() {
    let use_case = GenerateSbomUseCase::new(
        vec![module_collector(&["json", "requests", "requests.adapters"])],
        MockProgressReporter::new(),
    );

    let response = use_case.execute(SbomRequest::new("api")).await.unwrap();

    let ids: Vec<&str> = response.document.components().identifiers().collect();
    assert_eq!(ids, vec!["pkg:pypi/requests@2.31.0"]);
}

#[tokio::test]
async fn test_process_and_event_collectors_backfill_digest() {
    let libs = LibraryTree::new(&["libc.so.6"]);
    let libc = libs.path("libc.so.6");
    let python = PathBuf::from("/usr/bin/python3.11");

    let process_collector = ExecutableInspector::new(
        MockProcessSource::new().with_process(100, "python3", Some(python.clone())),
        LinkerDependencyResolver::new(
            MockLinkerProbe::new().with_libraries(&python, &[("libc.so.6", libc.as_path())]),
        ),
        MockHashService::new().with_unreadable(&libc),
    );
    let event_collector = LibraryEventCollector::new(
        RecordedEvents(vec![LibraryLoadEvent {
            name: "libc".to_string(),
            version: Some("6".to_string()),
            path: libc.clone(),
        }]),
        MockHashService::new().with_digest(&libc, 'd'),
    );

    let use_case = GenerateSbomUseCase::new(
        vec![Box::new(process_collector), Box::new(event_collector)],
        MockProgressReporter::new(),
    );

    let response = use_case.execute(SbomRequest::new("api")).await.unwrap();

    let components = response.document.components();
    let ids: Vec<&str> = components.identifiers().collect();
    assert_eq!(ids, vec!["pkg:generic/python3.11", "pkg:generic/libc@6"]);
    let merged = components.get("pkg:generic/libc@6").unwrap();
    assert_eq!(merged.content_digest().unwrap().as_str(), "d".repeat(64));
    // First-seen description from the process collector is kept
    assert_eq!(merged.description(), Some(libc.display().to_string().as_str()));
}

#[tokio::test]
async fn test_vanished_executable_contributes_nothing() {
    let libs = LibraryTree::new(&["libc.so.6", "libssl.so.3"]);
    let nginx = PathBuf::from("/usr/sbin/nginx");
    let gone = PathBuf::from("/opt/batch/job");

    let probe = MockLinkerProbe::new()
        .with_libraries(&nginx, &[("libssl.so.3", libs.path("libssl.so.3").as_path())])
        .with_libraries(&gone, &[("libc.so.6", libs.path("libc.so.6").as_path())]);
    let inspector = ExecutableInspector::new(
        MockProcessSource::new()
            .with_process(10, "nginx", Some(nginx.clone()))
            .with_process(11, "job", Some(gone.clone())),
        LinkerDependencyResolver::new(probe),
        MockHashService::new().with_missing(&gone),
    );

    let use_case = GenerateSbomUseCase::new(vec![Box::new(inspector)], MockProgressReporter::new());
    let response = use_case.execute(SbomRequest::new("edge")).await.unwrap();

    let ids: Vec<&str> = response.document.components().identifiers().collect();
    assert_eq!(ids, vec!["pkg:generic/nginx", "pkg:generic/libssl@3"]);
    assert!(response.failed_collectors().next().is_none());
}

#[tokio::test]
async fn test_static_and_failing_linker_keep_executable() {
    let busybox = PathBuf::from("/bin/busybox");
    let broken = PathBuf::from("/opt/broken");
    let probe = MockLinkerProbe::new()
        .with_static(&busybox)
        .with_failure(&broken);
    let inspector = ExecutableInspector::new(
        MockProcessSource::new()
            .with_process(1, "busybox", Some(busybox.clone()))
            .with_process(2, "broken", Some(broken.clone())),
        LinkerDependencyResolver::new(probe),
        MockHashService::new(),
    );

    let components = inspector.collect().await.unwrap();

    let ids: Vec<&str> = components.identifiers().collect();
    assert_eq!(ids, vec!["pkg:generic/busybox", "pkg:generic/broken"]);
}

#[tokio::test]
async fn test_shared_executable_inspected_once() {
    let python = PathBuf::from("/usr/bin/python3.11");
    let probe = Arc::new(MockLinkerProbe::new());
    let inspector = ExecutableInspector::new(
        MockProcessSource::new()
            .with_process(200, "python3", Some(python.clone()))
            .with_process(201, "python3", Some(python.clone()))
            .with_process(202, "kworker", None),
        LinkerDependencyResolver::new(ProbeHandle(Arc::clone(&probe))),
        MockHashService::new(),
    );

    let components = inspector.collect().await.unwrap();

    assert_eq!(components.len(), 1);
    assert_eq!(probe.calls(), vec![python]);
}

/// Shares one mock probe between the resolver and the test body
struct ProbeHandle(Arc<MockLinkerProbe>);

#[async_trait::async_trait]
impl LinkerProbe for ProbeHandle {
    fn tool_name(&self) -> &str {
        self.0.tool_name()
    }

    async fn probe(&self, exe_path: &Path) -> Result<runtime_sbom::ports::outbound::LinkerListing> {
        self.0.probe(exe_path).await
    }
}

#[tokio::test]
async fn test_failed_collector_does_not_fail_run() {
    let inspector = ExecutableInspector::new(
        MockProcessSource::failing(),
        LinkerDependencyResolver::new(MockLinkerProbe::new()),
        MockHashService::new(),
    );
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateSbomUseCase::new(
        vec![
            module_collector(&["requests"]),
            Box::new(inspector),
            Box::new(ModuleCollector::new(
                MockModuleSnapshot::failing(),
                MockIdentityResolver::new(),
            )),
        ],
        progress_reporter.clone(),
    );

    let response = use_case.execute(SbomRequest::new("api")).await.unwrap();

    assert_eq!(response.document.components().len(), 1);
    assert_eq!(response.failed_collectors().count(), 2);
    assert!(matches!(
        response.collector_reports[0].outcome,
        CollectorOutcome::Collected(1)
    ));
    let errors: Vec<String> = progress_reporter
        .get_messages()
        .into_iter()
        .filter(|m| m.starts_with("Error:"))
        .collect();
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn test_identifiers_unique_across_collectors() {
    let libs = LibraryTree::new(&["libc.so.6", "libm.so.6"]);
    let python = PathBuf::from("/usr/bin/python3.11");
    let nginx = PathBuf::from("/usr/sbin/nginx");
    let both = [
        ("libc.so.6", libs.path("libc.so.6")),
        ("libm.so.6", libs.path("libm.so.6")),
    ];
    let both: Vec<(&str, &Path)> = both.iter().map(|(n, p)| (*n, p.as_path())).collect();
    let inspector = ExecutableInspector::new(
        MockProcessSource::new()
            .with_process(1, "python3", Some(python.clone()))
            .with_process(2, "nginx", Some(nginx.clone())),
        LinkerDependencyResolver::new(
            MockLinkerProbe::new()
                .with_libraries(&python, &both)
                .with_libraries(&nginx, &both),
        ),
        MockHashService::new(),
    )
    .with_workers(2);

    let use_case = GenerateSbomUseCase::new(
        vec![
            module_collector(&["requests", "certifi", "requests"]),
            Box::new(inspector),
            module_collector(&["certifi"]),
        ],
        MockProgressReporter::new(),
    );

    let response = use_case.execute(SbomRequest::new("api")).await.unwrap();

    let components = response.document.components();
    let unique: BTreeSet<&str> = components.identifiers().collect();
    assert_eq!(unique.len(), components.len());
    assert_eq!(components.len(), 6);
}

#[tokio::test]
async fn test_document_round_trip() {
    let libs = LibraryTree::new(&["libz.so.1"]);
    let python = PathBuf::from("/usr/bin/python3.11");
    let inspector = ExecutableInspector::new(
        MockProcessSource::new().with_process(1, "python3", Some(python.clone())),
        LinkerDependencyResolver::new(MockLinkerProbe::new().with_libraries(
            &python,
            &[("libz.so.1", libs.path("libz.so.1").as_path())],
        )),
        MockHashService::new().with_digest(&python, 'a'),
    );
    let use_case = GenerateSbomUseCase::new(
        vec![module_collector(&["requests"]), Box::new(inspector)],
        MockProgressReporter::new(),
    );
    let response = use_case.execute(SbomRequest::new("Billing API")).await.unwrap();

    let model = SbomReadModelBuilder::build(&response.document);
    let json = CycloneDxFormatter::new().format(&model).unwrap();
    let parsed = CycloneDxReader::parse(&json).unwrap();

    assert_eq!(parsed, response.document);
    assert_eq!(
        parsed.metadata().root_component().identifier(),
        "pkg:generic/billing-api"
    );
}

#[tokio::test]
async fn test_root_named_like_running_executable_keeps_bom_refs_unique() {
    let bash = PathBuf::from("/usr/bin/bash");
    let inspector = ExecutableInspector::new(
        MockProcessSource::new().with_process(7, "bash", Some(bash.clone())),
        LinkerDependencyResolver::new(MockLinkerProbe::new().with_static(&bash)),
        MockHashService::new().with_digest(&bash, 'b'),
    );
    let collectors: Vec<Box<dyn ComponentCollector>> = vec![Box::new(inspector)];
    let use_case = GenerateSbomUseCase::new(collectors, MockProgressReporter::new());
    let response = use_case.execute(SbomRequest::new("bash")).await.unwrap();

    let model = SbomReadModelBuilder::build(&response.document);
    let json = CycloneDxFormatter::new().format(&model).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();

    let mut refs: Vec<&str> = document["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["bom-ref"].as_str().unwrap())
        .collect();
    refs.push(document["metadata"]["component"]["bom-ref"].as_str().unwrap());
    let unique: BTreeSet<&str> = refs.iter().copied().collect();
    assert_eq!(unique.len(), refs.len());
    assert_eq!(
        document["metadata"]["component"]["bom-ref"],
        "pkg:generic/bash?sbom-role=root"
    );
}

#[tokio::test]
async fn test_real_hasher_and_site_packages() {
    let site = TempDir::new().unwrap();
    let dist = site.path().join("requests-2.31.0.dist-info");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("METADATA"), "Name: requests\nVersion: 2.31.0\n").unwrap();
    std::fs::write(dist.join("top_level.txt"), "requests\n").unwrap();

    let libs = LibraryTree::new(&["libc.so.6"]);
    let exe_dir = TempDir::new().unwrap();
    let exe = exe_dir.path().join("worker");
    std::fs::write(&exe, b"hello world").unwrap();

    let hasher = Arc::new(CachingHashService::new(Sha256FileHasher::new()));
    let collectors: Vec<Box<dyn ComponentCollector>> = vec![
        Box::new(ModuleCollector::new(
            StaticModuleSnapshot::new(["json", "requests", "os"]),
            SitePackagesResolver::from_dirs(&[site.path().to_path_buf()]),
        )),
        Box::new(ExecutableInspector::new(
            MockProcessSource::new().with_process(42, "worker", Some(exe.clone())),
            LinkerDependencyResolver::new(MockLinkerProbe::new().with_libraries(
                &exe,
                &[("libc.so.6", libs.path("libc.so.6").as_path())],
            )),
            Arc::clone(&hasher),
        )),
    ];

    let use_case = GenerateSbomUseCase::new(collectors, MockProgressReporter::new());
    let response = use_case.execute(SbomRequest::new("worker-host")).await.unwrap();

    let components = response.document.components();
    let ids: Vec<&str> = components.identifiers().collect();
    assert_eq!(
        ids,
        vec![
            "pkg:pypi/requests@2.31.0",
            "pkg:generic/worker",
            "pkg:generic/libc@6",
        ]
    );
    assert_eq!(
        components
            .get("pkg:generic/worker")
            .unwrap()
            .content_digest()
            .unwrap()
            .as_str(),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
    assert!(components
        .get("pkg:generic/libc@6")
        .unwrap()
        .content_digest()
        .is_some());
}
