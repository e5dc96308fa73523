use crate::classification::{ClassificationPipeline, SimilarityOutcome};
use crate::error::Result;
use crate::models::{Case, CaseStatus, Priority};
use crate::state::{CaseFilter, CaseStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Input record for case creation, before enrichment
#[derive(Debug, Clone)]
pub struct NewCase {
    pub customer_name: String,
    pub description: String,
    pub product: String,
    pub priority: Option<Priority>,
    pub status: Option<CaseStatus>,
    pub geography: Option<String>,
    /// Backdated creation timestamp (synthetic data); defaults to now
    pub created_at: Option<DateTime<Utc>>,
}

impl NewCase {
    pub fn new(customer_name: String, description: String, product: String) -> Self {
        Self {
            customer_name,
            description,
            product,
            priority: None,
            status: None,
            geography: None,
            created_at: None,
        }
    }
}

/// Main case processor.
///
/// Sequences case ingestion: enrichment, persistence, then best-effort
/// similarity recomputation. Similarity failures never fail the ingestion.
pub struct CaseProcessor {
    store: Arc<dyn CaseStore>,
    pipeline: ClassificationPipeline,
}

impl CaseProcessor {
    pub fn new(store: Arc<dyn CaseStore>, pipeline: ClassificationPipeline) -> Self {
        Self { store, pipeline }
    }

    /// Get a reference to the case store
    pub fn store(&self) -> &Arc<dyn CaseStore> {
        &self.store
    }

    /// Create a single case: enrich, persist, recompute similarities.
    pub async fn create_case(&self, new_case: NewCase) -> Result<(Case, SimilarityOutcome)> {
        let case = self.build_case(new_case).await?;

        tracing::info!(
            case_id = %case.case_id,
            case_type = %case.case_type,
            module = %case.module,
            category = %case.category,
            "Case created"
        );

        self.store.save_case(&case).await?;

        let outcome = self
            .pipeline
            .recompute_similarities(
                case.id,
                &case.description,
                self.store.as_ref(),
                self.store.as_ref(),
            )
            .await;

        Ok((case, outcome))
    }

    /// Ingest a batch of cases: classify and persist all of them first, then
    /// compute similarities for at most `similarity_limit` of them (all when
    /// `None`). Used by seeding and the background generation job.
    pub async fn ingest_batch(
        &self,
        new_cases: Vec<NewCase>,
        similarity_limit: Option<usize>,
    ) -> Result<Vec<Case>> {
        let mut cases = Vec::with_capacity(new_cases.len());

        for new_case in new_cases {
            let case = self.build_case(new_case).await?;
            self.store.save_case(&case).await?;
            cases.push(case);
        }

        tracing::info!(count = cases.len(), "Batch of cases ingested");

        let limit = similarity_limit.unwrap_or(cases.len());
        for case in cases.iter().take(limit) {
            self.pipeline
                .recompute_similarities(
                    case.id,
                    &case.description,
                    self.store.as_ref(),
                    self.store.as_ref(),
                )
                .await;
        }

        Ok(cases)
    }

    /// Build an enriched case with the next display id.
    async fn build_case(&self, new_case: NewCase) -> Result<Case> {
        let number = self.store.count_cases(&CaseFilter::default()).await? + 1;

        let mut case = Case::new(
            format!("CASE-{:05}", number),
            new_case.customer_name,
            new_case.description,
            new_case.product,
            new_case
                .geography
                .unwrap_or_else(|| "North America".to_string()),
            new_case.priority.unwrap_or_default(),
            new_case.status.unwrap_or_default(),
        );

        if let Some(created_at) = new_case.created_at {
            case.created_at = created_at;
        }

        Ok(self.pipeline.enrich(case))
    }
}
