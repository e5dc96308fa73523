pub mod pipeline;
pub mod similarity;
pub mod taxonomy;

pub use pipeline::{
    ClassificationPipeline, CorpusProvider, SimilarityEdgeStore, SimilarityOutcome,
};
pub use similarity::{CorpusEntry, SimilarityIndex};
pub use taxonomy::TaxonomyClassifier;
