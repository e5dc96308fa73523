use crate::classification::similarity::{CorpusEntry, SimilarityIndex};
use crate::classification::taxonomy::TaxonomyClassifier;
use crate::config::ClassificationConfig;
use crate::error::Result;
use crate::models::{Case, SimilarityEdge};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Source of the full corpus snapshot used to fit the similarity index
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    /// Fetch every case id and description currently stored
    async fn corpus(&self) -> Result<Vec<CorpusEntry>>;
}

/// Replace-semantics sink for similarity edges
#[async_trait]
pub trait SimilarityEdgeStore: Send + Sync {
    /// Delete all existing edges owned by a case
    async fn delete_similarities_for_case(&self, case_id: Uuid) -> Result<()>;

    /// Insert a single edge
    async fn insert_similarity(&self, edge: &SimilarityEdge) -> Result<()>;
}

/// Outcome of a similarity recomputation.
///
/// Similarity is best-effort: a failure here must never abort case ingestion,
/// so the pipeline reports it as a value instead of an error.
#[derive(Debug, Clone)]
pub enum SimilarityOutcome {
    /// Edges were recomputed and stored
    Computed { edges: Vec<SimilarityEdge> },

    /// The corpus was too small to compute anything
    Skipped,

    /// Computation or persistence failed; the case itself is unaffected
    Failed { reason: String },
}

impl SimilarityOutcome {
    pub fn edges(&self) -> &[SimilarityEdge] {
        match self {
            SimilarityOutcome::Computed { edges } => edges,
            _ => &[],
        }
    }
}

/// Composes the taxonomy classifier and the similarity index.
///
/// `enrich` is pure and deterministic; `recompute_similarities` talks to the
/// store collaborators and re-fits a fresh index over the corpus snapshot on
/// every call.
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    taxonomy: TaxonomyClassifier,
    config: ClassificationConfig,
}

impl ClassificationPipeline {
    pub fn new(config: ClassificationConfig) -> Self {
        Self {
            taxonomy: TaxonomyClassifier::new(),
            config,
        }
    }

    /// Attach derived taxonomy fields to a case. No I/O.
    pub fn enrich(&self, mut case: Case) -> Case {
        case.case_type = self.taxonomy.classify_type(&case.description);
        let (module, sub_module) = self.taxonomy.classify_module(&case.description);
        case.module = module;
        case.sub_module = sub_module;
        case.category = self.taxonomy.assign_category(case.case_type, case.priority);
        case
    }

    /// Recompute the similarity edges for a case against the current corpus.
    ///
    /// Fetches the full corpus, fits a transient index, queries the top-k
    /// neighbors excluding the case itself, drops low-confidence scores, and
    /// replaces the stored edge set. All failures are folded into
    /// `SimilarityOutcome::Failed` and logged.
    pub async fn recompute_similarities<C, E>(
        &self,
        case_id: Uuid,
        description: &str,
        corpus_provider: &C,
        edge_store: &E,
    ) -> SimilarityOutcome
    where
        C: CorpusProvider + ?Sized,
        E: SimilarityEdgeStore + ?Sized,
    {
        match self
            .try_recompute(case_id, description, corpus_provider, edge_store)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Similarity recomputation failed");
                SimilarityOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_recompute<C, E>(
        &self,
        case_id: Uuid,
        description: &str,
        corpus_provider: &C,
        edge_store: &E,
    ) -> Result<SimilarityOutcome>
    where
        C: CorpusProvider + ?Sized,
        E: SimilarityEdgeStore + ?Sized,
    {
        let corpus = corpus_provider.corpus().await?;

        if corpus.is_empty() {
            return Ok(SimilarityOutcome::Skipped);
        }

        // Replace semantics: stale edges are cleared even when the corpus has
        // shrunk below the size needed to recompute.
        edge_store.delete_similarities_for_case(case_id).await?;

        if corpus.len() <= 1 {
            debug!(case_id = %case_id, "Corpus too small for similarity computation");
            return Ok(SimilarityOutcome::Skipped);
        }

        let mut index = SimilarityIndex::new(self.config.max_features);
        index.fit(&corpus)?;

        let neighbors = index.find_similar(description, Some(case_id), self.config.top_k);

        let mut edges = Vec::new();
        for (related_id, score) in neighbors {
            if score > self.config.min_similarity && related_id != case_id {
                edges.push(SimilarityEdge::new(case_id, related_id, score));
            }
        }

        for edge in &edges {
            edge_store.insert_similarity(edge).await?;
        }

        info!(
            case_id = %case_id,
            edge_count = edges.len(),
            corpus_size = corpus.len(),
            "Similarity edges recomputed"
        );

        Ok(SimilarityOutcome::Computed { edges })
    }
}
