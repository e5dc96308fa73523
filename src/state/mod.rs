pub mod store;

pub use store::InMemoryStore;

use crate::classification::{CorpusEntry, CorpusProvider, SimilarityEdgeStore};
use crate::error::Result;
use crate::models::{Case, SimilarityEdge};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Trait for case storage operations.
///
/// The production backend is an external managed warehouse; this trait is the
/// seam it plugs into. `InMemoryStore` is the dev/test implementation.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Save a case
    async fn save_case(&self, case: &Case) -> Result<()>;

    /// Get a case by internal id
    async fn get_case(&self, id: &Uuid) -> Result<Option<Case>>;

    /// Get a case by display id (e.g. `CASE-00042`)
    async fn get_case_by_display_id(&self, case_id: &str) -> Result<Option<Case>>;

    /// Update an existing case
    async fn update_case(&self, case: &Case) -> Result<()>;

    /// Delete a case
    async fn delete_case(&self, id: &Uuid) -> Result<()>;

    /// List cases with filtering, newest first
    async fn list_cases(&self, filter: &CaseFilter, page: u32, page_size: u32)
        -> Result<Vec<Case>>;

    /// Count cases matching a filter
    async fn count_cases(&self, filter: &CaseFilter) -> Result<u64>;

    /// Aggregate dashboard statistics
    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    /// Distinct products across all cases, sorted
    async fn distinct_products(&self) -> Result<Vec<String>>;

    /// Full corpus snapshot (id + description) for similarity fitting
    async fn all_corpus_entries(&self) -> Result<Vec<CorpusEntry>>;

    /// Delete all similarity edges owned by a case
    async fn delete_similarities_for_case(&self, case_id: Uuid) -> Result<()>;

    /// Insert a similarity edge
    async fn insert_similarity(&self, edge: &SimilarityEdge) -> Result<()>;

    /// Similar cases for a case, joined with case records, best first
    async fn similar_cases(&self, case_id: Uuid, limit: usize) -> Result<Vec<SimilarCase>>;
}

/// A case store serves as the pipeline's corpus snapshot source.
#[async_trait]
impl CorpusProvider for dyn CaseStore {
    async fn corpus(&self) -> Result<Vec<CorpusEntry>> {
        self.all_corpus_entries().await
    }
}

/// A case store serves as the pipeline's edge sink.
#[async_trait]
impl SimilarityEdgeStore for dyn CaseStore {
    async fn delete_similarities_for_case(&self, case_id: Uuid) -> Result<()> {
        CaseStore::delete_similarities_for_case(self, case_id).await
    }

    async fn insert_similarity(&self, edge: &SimilarityEdge) -> Result<()> {
        CaseStore::insert_similarity(self, edge).await
    }
}

/// Filter for querying cases
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub statuses: Vec<crate::models::CaseStatus>,
    pub priorities: Vec<crate::models::Priority>,
    pub case_types: Vec<crate::models::CaseType>,
    pub products: Vec<String>,
    /// Substring match against customer_name
    pub customer_name: Option<String>,
    /// Substring match against the display id
    pub case_id: Option<String>,
}

/// Aggregate counters for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_cases: u64,
    pub high_priority: u64,
    pub incidents: u64,
    pub open_cases: u64,
}

/// A related case joined with its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct SimilarCase {
    #[serde(flatten)]
    pub case: Case,
    pub similarity_score: f64,
}
