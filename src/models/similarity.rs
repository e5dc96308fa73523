use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed similarity relation between two cases.
///
/// For a given `case_id` at most `top_k` edges exist at any time; the set is
/// fully replaced on recomputation, never accumulated. Self-edges are never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityEdge {
    /// Owning case
    pub case_id: Uuid,

    /// Related case
    pub related_case_id: Uuid,

    /// Cosine similarity score in [0, 1]
    pub score: f64,

    /// When the edge was computed
    pub created_at: DateTime<Utc>,
}

impl SimilarityEdge {
    pub fn new(case_id: Uuid, related_case_id: Uuid, score: f64) -> Self {
        Self {
            case_id,
            related_case_id,
            score,
            created_at: Utc::now(),
        }
    }
}
