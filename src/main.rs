use runtime_sbom::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
use runtime_sbom::adapters::outbound::filesystem::{
    FileSystemWriter, JsonEventFeed, StdoutPresenter,
};
use runtime_sbom::adapters::outbound::formatters::CycloneDxFormatter;
use runtime_sbom::adapters::outbound::hashing::{CachingHashService, Sha256FileHasher};
use runtime_sbom::adapters::outbound::python::{
    InterpreterModuleSnapshot, ModuleListingFile, SitePackagesResolver,
};
use runtime_sbom::adapters::outbound::system::{
    LddProbe, LinkerDependencyResolver, ProcProcessSource,
};
use runtime_sbom::application::collectors::{
    ComponentCollector, ExecutableInspector, LibraryEventCollector, ModuleCollector,
};
use runtime_sbom::application::dto::SbomRequest;
use runtime_sbom::application::read_models::SbomReadModelBuilder;
use runtime_sbom::application::use_cases::GenerateSbomUseCase;
use runtime_sbom::cli::Args;
use runtime_sbom::config::{
    discover_config, load_config_from_path, OutputTarget, Settings, CONFIG_FILENAME,
};
use runtime_sbom::ports::outbound::{OutputPresenter, ProgressReporter, SbomFormatter};
use runtime_sbom::shared::error::ExitCode;
use runtime_sbom::shared::Result;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(&args);

    let exit_code = match run(args) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

fn init_tracing(args: &Args) {
    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let config = load_config_from_path(path)?;
            if !args.quiet {
                eprintln!("📄 Loaded config from: {}", path.display());
            }
            Some(config)
        }
        None => {
            let cwd = std::env::current_dir()?;
            let config = discover_config(&cwd)?;
            if config.is_some() && !args.quiet {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    cwd.join(CONFIG_FILENAME).display()
                );
            }
            config
        }
    };
    let settings = Settings::resolve(&args, config)?;

    let progress_reporter: Arc<dyn ProgressReporter> = if args.quiet {
        Arc::new(SilentProgressReporter)
    } else {
        Arc::new(StderrProgressReporter::new())
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let formatted_output = runtime.block_on(generate(&settings, Arc::clone(&progress_reporter)))?;

    // Present output
    let presenter: Box<dyn OutputPresenter> = match &settings.output {
        OutputTarget::File(path) => Box::new(FileSystemWriter::new(path.clone())),
        OutputTarget::Stdout => Box::new(StdoutPresenter::new()),
    };

    presenter.present(&formatted_output)
}

/// Runs one discovery pass and returns the CycloneDX document text
async fn generate(
    settings: &Settings,
    progress_reporter: Arc<dyn ProgressReporter>,
) -> Result<String> {
    // One digest cache per pass
    let hasher = Arc::new(CachingHashService::new(Sha256FileHasher::new()));

    let collectors = build_collectors(settings, &hasher, &progress_reporter).await;
    let use_case = GenerateSbomUseCase::new(collectors, Arc::clone(&progress_reporter));

    let response = use_case
        .execute(SbomRequest::new(settings.root_name.clone()))
        .await?;

    progress_reporter.report("📝 Generating CycloneDX JSON format output...");
    let model = SbomReadModelBuilder::build(&response.document);
    CycloneDxFormatter::new().format(&model)
}

/// Collectors in merge order: modules, processes, recorded library events
async fn build_collectors(
    settings: &Settings,
    hasher: &Arc<CachingHashService<Sha256FileHasher>>,
    progress_reporter: &Arc<dyn ProgressReporter>,
) -> Vec<Box<dyn ComponentCollector>> {
    let mut collectors: Vec<Box<dyn ComponentCollector>> = Vec::new();

    if settings.collect_modules {
        let resolver = if settings.site_packages.is_empty() {
            SitePackagesResolver::discover(&settings.interpreter, settings.linker_timeout).await
        } else {
            SitePackagesResolver::from_dirs(&settings.site_packages)
        };

        match &settings.module_listing {
            Some(path) => collectors.push(Box::new(ModuleCollector::new(
                ModuleListingFile::new(path.clone()),
                resolver,
            ))),
            None => collectors.push(Box::new(ModuleCollector::new(
                InterpreterModuleSnapshot::new(
                    settings.interpreter.clone(),
                    settings.preload.clone(),
                    settings.linker_timeout,
                ),
                resolver,
            ))),
        }
    }

    if settings.collect_processes {
        let probe =
            LddProbe::with_program(settings.linker_program.clone(), settings.linker_timeout);
        collectors.push(Box::new(
            ExecutableInspector::new(
                ProcProcessSource::new(),
                LinkerDependencyResolver::new(probe),
                Arc::clone(hasher),
            )
            .with_workers(settings.hash_workers)
            .with_progress(Arc::clone(progress_reporter)),
        ));
    }

    if let Some(feed) = &settings.event_feed {
        collectors.push(Box::new(LibraryEventCollector::new(
            JsonEventFeed::new(feed.clone()),
            Arc::clone(hasher),
        )));
    }

    collectors
}
