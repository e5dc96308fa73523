//! End-to-end tests for the classification and similarity pipeline

use std::sync::Arc;
use support_case_manager::classification::{
    ClassificationPipeline, CorpusEntry, SimilarityIndex, SimilarityOutcome, TaxonomyClassifier,
};
use support_case_manager::config::ClassificationConfig;
use support_case_manager::models::{CaseType, Category, Priority};
use support_case_manager::processing::{CaseProcessor, NewCase};
use support_case_manager::state::{CaseStore, InMemoryStore};
use uuid::Uuid;

fn create_processor() -> (Arc<InMemoryStore>, CaseProcessor) {
    let store = Arc::new(InMemoryStore::new());
    let processor = CaseProcessor::new(
        store.clone(),
        ClassificationPipeline::new(ClassificationConfig::default()),
    );
    (store, processor)
}

fn new_case(customer: &str, description: &str) -> NewCase {
    NewCase::new(
        customer.to_string(),
        description.to_string(),
        "Cloud Platform".to_string(),
    )
}

#[test]
fn test_outage_description_classified_as_incident() {
    let classifier = TaxonomyClassifier::new();

    assert_eq!(
        classifier.classify_type("system is down, critical outage"),
        CaseType::Incident
    );
    assert_eq!(
        classifier.assign_category(CaseType::Incident, Priority::Critical),
        Category::P0Critical
    );
}

#[test]
fn test_similarity_query_excludes_and_scores() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let mut index = SimilarityIndex::default();
    index
        .fit(&[
            CorpusEntry {
                id: a,
                description: "login failure error".to_string(),
            },
            CorpusEntry {
                id: b,
                description: "billing invoice charge".to_string(),
            },
        ])
        .unwrap();

    let results = index.find_similar("cannot login", Some(a), 3);

    // The excluded case never comes back; "B" has no lexical overlap with the
    // query so whatever is returned for it scores zero.
    assert!(results.iter().all(|(id, _)| *id != a));
    for (id, score) in &results {
        if *id == b {
            assert!(*score < 0.1);
        }
    }
}

#[test]
fn test_empty_corpus_returns_empty() {
    let mut index = SimilarityIndex::default();
    index.fit(&[]).unwrap();
    assert!(index.find_similar("anything at all", None, 3).is_empty());
}

#[tokio::test]
async fn test_case_creation_survives_missing_similarities() {
    let (_store, processor) = create_processor();

    // First case has an empty corpus to compare against; creation must still
    // succeed with a Skipped outcome.
    let (case, outcome) = processor
        .create_case(new_case("Acme", "how do I configure exports?"))
        .await
        .unwrap();

    assert_eq!(case.case_type, CaseType::Inquiry);
    assert!(matches!(outcome, SimilarityOutcome::Skipped));
}

#[tokio::test]
async fn test_similar_cases_persisted_and_replaced() {
    let (store, processor) = create_processor();

    let (first, _) = processor
        .create_case(new_case("Acme", "login failure error on portal"))
        .await
        .unwrap();
    let (second, outcome) = processor
        .create_case(new_case("Globex", "login failure error reported by customer"))
        .await
        .unwrap();

    let edges = outcome.edges();
    assert!(!edges.is_empty());
    assert!(edges.iter().all(|e| e.related_case_id != second.id));

    let similar = store.similar_cases(second.id, 3).await.unwrap();
    assert_eq!(similar.len(), edges.len());
    assert_eq!(similar[0].case.id, first.id);

    // Recompute against the unchanged corpus: the stored set is replaced,
    // not appended to.
    let pipeline = ClassificationPipeline::new(ClassificationConfig::default());
    let store_dyn: &dyn CaseStore = store.as_ref();
    pipeline
        .recompute_similarities(second.id, &second.description, store_dyn, store_dyn)
        .await;

    let replayed = store.similar_cases(second.id, 10).await.unwrap();
    assert_eq!(replayed.len(), similar.len());
}

#[tokio::test]
async fn test_batch_ingestion_classifies_everything() {
    let (store, processor) = create_processor();

    let batch = vec![
        new_case("Acme", "system is down, critical outage"),
        new_case("Globex", "found a defect, totals are incorrect"),
        new_case("Initech", "request for new feature: dark mode"),
    ];

    let cases = processor.ingest_batch(batch, None).await.unwrap();

    assert_eq!(cases[0].case_type, CaseType::Incident);
    assert_eq!(cases[1].case_type, CaseType::Bug);
    assert_eq!(cases[2].case_type, CaseType::FeatureRequest);

    let stats = store.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_cases, 3);
    assert_eq!(stats.incidents, 1);
}

#[tokio::test]
async fn test_derived_fields_fixed_at_creation() {
    let (store, processor) = create_processor();

    let (case, _) = processor
        .create_case(new_case("Acme", "billing invoice shows incorrect charge"))
        .await
        .unwrap();

    let stored = store.get_case(&case.id).await.unwrap().unwrap();
    assert_eq!(stored.case_type, case.case_type);
    assert_eq!(stored.module, "Payment");
    assert_eq!(stored.sub_module, "Payment Support");
    assert_eq!(stored.category, case.category);
}
