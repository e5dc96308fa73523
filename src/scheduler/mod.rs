//! Recurring background job that feeds synthetic cases through the pipeline.

use crate::config::SchedulerConfig;
use crate::error::{AppError, Result};
use crate::generator::CaseGenerator;
use crate::processing::CaseProcessor;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Drives periodic synthetic case generation.
///
/// Each run generates a batch, classifies and persists it, and recomputes
/// similarities, exactly like foreground case creation. A failing run is
/// logged and the schedule keeps going.
pub struct GenerationScheduler {
    scheduler: JobScheduler,
}

impl GenerationScheduler {
    /// Create and start the scheduler with the generation job registered.
    pub async fn start(config: SchedulerConfig, processor: Arc<CaseProcessor>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        let batch_size = config.batch_size;
        let job = Job::new_async(config.generation_schedule.as_str(), move |_id, _lock| {
            let processor = Arc::clone(&processor);
            Box::pin(async move {
                run_generation(processor, batch_size).await;
            })
        })
        .map_err(|e| AppError::Scheduler(e.to_string()))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        scheduler
            .start()
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        info!(
            schedule = %config.generation_schedule,
            batch_size = batch_size,
            "Case generation scheduler started"
        );

        Ok(Self { scheduler })
    }

    /// Stop the scheduler
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;
        info!("Case generation scheduler stopped");
        Ok(())
    }
}

/// One generation run; failures are logged, never propagated.
async fn run_generation(processor: Arc<CaseProcessor>, batch_size: usize) {
    info!(batch_size = batch_size, "Generating synthetic cases");

    let batch = CaseGenerator::new().generate_batch(batch_size);

    match processor.ingest_batch(batch, None).await {
        Ok(cases) => {
            info!(count = cases.len(), "Synthetic cases ingested");
        }
        Err(e) => {
            error!(error = %e, "Synthetic case generation run failed");
        }
    }
}
