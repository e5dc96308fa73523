use std::sync::Arc;
use support_case_manager::{
    api::{build_router, AppState},
    classification::ClassificationPipeline,
    config::Config,
    generator::CaseGenerator,
    processing::CaseProcessor,
    scheduler::GenerationScheduler,
    state::{CaseFilter, CaseStore, InMemoryStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.observability.log_level.clone().into());

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting support-case-manager v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage and pipeline
    let store: Arc<dyn CaseStore> = Arc::new(InMemoryStore::new());
    let pipeline = ClassificationPipeline::new(config.classification.clone());
    let processor = Arc::new(CaseProcessor::new(store.clone(), pipeline));

    // Seed the store when empty
    if config.seed.enabled {
        let existing = store.count_cases(&CaseFilter::default()).await?;
        if existing == 0 {
            tracing::info!(count = config.seed.count, "Seeding store with synthetic cases");

            let batch = CaseGenerator::new().generate_batch(config.seed.count);
            let cases = processor
                .ingest_batch(batch, Some(config.seed.similarity_limit))
                .await?;

            tracing::info!(count = cases.len(), "Store seeded");
        } else {
            tracing::info!(count = existing, "Store already populated, skipping seed");
        }
    }

    // Start the background generation job
    let mut scheduler = if config.scheduler.enabled {
        let scheduler =
            GenerationScheduler::start(config.scheduler.clone(), processor.clone()).await?;
        tracing::info!("Case generation job scheduled");
        Some(scheduler)
    } else {
        tracing::info!("Case generation job disabled in configuration");
        None
    };

    // Build HTTP router
    let app_state = AppState::new(processor, config.classification.clone());
    let app = build_router(
        app_state,
        std::time::Duration::from_secs(config.server.request_timeout_secs),
    );

    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   REST API: http://{}/v1/cases", http_addr);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = server => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await.ok();
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
