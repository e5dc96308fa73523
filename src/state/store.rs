use crate::classification::CorpusEntry;
use crate::error::{AppError, Result};
use crate::models::{Case, CaseType, Priority, SimilarityEdge};
use crate::state::{CaseFilter, CaseStore, DashboardStats, SimilarCase};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory case store (for development and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    cases: Arc<DashMap<Uuid, Case>>,
    display_index: Arc<DashMap<String, Uuid>>,
    edges: Arc<DashMap<Uuid, Vec<SimilarityEdge>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            cases: Arc::new(DashMap::new()),
            display_index: Arc::new(DashMap::new()),
            edges: Arc::new(DashMap::new()),
        }
    }

    fn matches(case: &Case, filter: &CaseFilter) -> bool {
        let status_match = filter.statuses.is_empty() || filter.statuses.contains(&case.status);

        let priority_match =
            filter.priorities.is_empty() || filter.priorities.contains(&case.priority);

        let type_match =
            filter.case_types.is_empty() || filter.case_types.contains(&case.case_type);

        let product_match = filter.products.is_empty()
            || filter.products.iter().any(|p| p == &case.product);

        let customer_match = filter.customer_name.as_ref().map_or(true, |needle| {
            case.customer_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });

        let case_id_match = filter.case_id.as_ref().map_or(true, |needle| {
            case.case_id.to_lowercase().contains(&needle.to_lowercase())
        });

        status_match
            && priority_match
            && type_match
            && product_match
            && customer_match
            && case_id_match
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaseStore for InMemoryStore {
    async fn save_case(&self, case: &Case) -> Result<()> {
        self.cases.insert(case.id, case.clone());
        self.display_index.insert(case.case_id.clone(), case.id);
        tracing::debug!(case_id = %case.case_id, "Case saved");
        Ok(())
    }

    async fn get_case(&self, id: &Uuid) -> Result<Option<Case>> {
        Ok(self.cases.get(id).map(|entry| entry.clone()))
    }

    async fn get_case_by_display_id(&self, case_id: &str) -> Result<Option<Case>> {
        if let Some(id) = self.display_index.get(case_id) {
            Ok(self.cases.get(&id).map(|entry| entry.clone()))
        } else {
            Ok(None)
        }
    }

    async fn update_case(&self, case: &Case) -> Result<()> {
        if self.cases.contains_key(&case.id) {
            self.cases.insert(case.id, case.clone());
            tracing::debug!(case_id = %case.case_id, "Case updated");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Case {} not found", case.id)))
        }
    }

    async fn delete_case(&self, id: &Uuid) -> Result<()> {
        if let Some((_, case)) = self.cases.remove(id) {
            self.display_index.remove(&case.case_id);
            self.edges.remove(id);
            // Sweep inbound references from other cases' edge lists.
            for mut entry in self.edges.iter_mut() {
                entry.value_mut().retain(|e| e.related_case_id != *id);
            }
            tracing::debug!(case_id = %case.case_id, "Case deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Case {} not found", id)))
        }
    }

    async fn list_cases(
        &self,
        filter: &CaseFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Case>> {
        let mut cases: Vec<Case> = self
            .cases
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|case| Self::matches(case, filter))
            .collect();

        // Newest first
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let start = (page * page_size) as usize;

        Ok(cases
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect())
    }

    async fn count_cases(&self, filter: &CaseFilter) -> Result<u64> {
        let count = self
            .cases
            .iter()
            .filter(|entry| Self::matches(entry.value(), filter))
            .count();

        Ok(count as u64)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let mut stats = DashboardStats {
            total_cases: 0,
            high_priority: 0,
            incidents: 0,
            open_cases: 0,
        };

        for entry in self.cases.iter() {
            let case = entry.value();
            stats.total_cases += 1;
            if matches!(case.priority, Priority::High | Priority::Critical) {
                stats.high_priority += 1;
            }
            if case.case_type == CaseType::Incident {
                stats.incidents += 1;
            }
            if case.status == crate::models::CaseStatus::Open {
                stats.open_cases += 1;
            }
        }

        Ok(stats)
    }

    async fn distinct_products(&self) -> Result<Vec<String>> {
        let mut products: Vec<String> = self
            .cases
            .iter()
            .map(|entry| entry.value().product.clone())
            .collect();
        products.sort();
        products.dedup();
        Ok(products)
    }

    async fn all_corpus_entries(&self) -> Result<Vec<CorpusEntry>> {
        Ok(self
            .cases
            .iter()
            .map(|entry| CorpusEntry {
                id: entry.value().id,
                description: entry.value().description.clone(),
            })
            .collect())
    }

    async fn delete_similarities_for_case(&self, case_id: Uuid) -> Result<()> {
        self.edges.remove(&case_id);
        Ok(())
    }

    async fn insert_similarity(&self, edge: &SimilarityEdge) -> Result<()> {
        if edge.case_id == edge.related_case_id {
            return Err(AppError::Validation(
                "Self-referencing similarity edge".to_string(),
            ));
        }
        self.edges
            .entry(edge.case_id)
            .or_default()
            .push(edge.clone());
        Ok(())
    }

    async fn similar_cases(&self, case_id: Uuid, limit: usize) -> Result<Vec<SimilarCase>> {
        let mut edges = self
            .edges
            .get(&case_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();

        edges.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let similar = edges
            .into_iter()
            .take(limit)
            .filter_map(|edge| {
                self.cases.get(&edge.related_case_id).map(|related| SimilarCase {
                    case: related.clone(),
                    similarity_score: edge.score,
                })
            })
            .collect();

        Ok(similar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseStatus;

    fn make_case(n: u32, description: &str, priority: Priority) -> Case {
        Case::new(
            format!("CASE-{:05}", n),
            format!("Customer {}", n),
            description.to_string(),
            "Cloud Platform".to_string(),
            "Europe".to_string(),
            priority,
            CaseStatus::Open,
        )
    }

    #[tokio::test]
    async fn test_save_and_get_case() {
        let store = InMemoryStore::new();
        let case = make_case(1, "login failure", Priority::Medium);
        let id = case.id;

        store.save_case(&case).await.unwrap();

        let by_uuid = store.get_case(&id).await.unwrap();
        assert!(by_uuid.is_some());

        let by_display = store.get_case_by_display_id("CASE-00001").await.unwrap();
        assert_eq!(by_display.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_update_missing_case_fails() {
        let store = InMemoryStore::new();
        let case = make_case(1, "login failure", Priority::Medium);
        let err = store.update_case(&case).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_cases_with_filter() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            let priority = if i % 2 == 0 { Priority::Critical } else { Priority::Low };
            store
                .save_case(&make_case(i, "description", priority))
                .await
                .unwrap();
        }

        let filter = CaseFilter {
            priorities: vec![Priority::Critical],
            ..Default::default()
        };

        let cases = store.list_cases(&filter, 0, 10).await.unwrap();
        assert_eq!(cases.len(), 3);
        assert!(cases.iter().all(|c| c.priority == Priority::Critical));
    }

    #[tokio::test]
    async fn test_customer_substring_filter() {
        let store = InMemoryStore::new();
        store
            .save_case(&make_case(1, "desc", Priority::Low))
            .await
            .unwrap();

        let filter = CaseFilter {
            customer_name: Some("customer 1".to_string()),
            ..Default::default()
        };
        assert_eq!(store.count_cases(&filter).await.unwrap(), 1);

        let filter = CaseFilter {
            customer_name: Some("nobody".to_string()),
            ..Default::default()
        };
        assert_eq!(store.count_cases(&filter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let store = InMemoryStore::new();
        let mut incident = make_case(1, "outage", Priority::Critical);
        incident.case_type = CaseType::Incident;
        store.save_case(&incident).await.unwrap();
        store
            .save_case(&make_case(2, "question", Priority::Low))
            .await
            .unwrap();

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_cases, 2);
        assert_eq!(stats.high_priority, 1);
        assert_eq!(stats.incidents, 1);
        assert_eq!(stats.open_cases, 2);
    }

    #[tokio::test]
    async fn test_similarity_edges_replace_and_join() {
        let store = InMemoryStore::new();
        let a = make_case(1, "login failure", Priority::Medium);
        let b = make_case(2, "login broken", Priority::Medium);
        store.save_case(&a).await.unwrap();
        store.save_case(&b).await.unwrap();

        CaseStore::insert_similarity(&store, &SimilarityEdge::new(a.id, b.id, 0.8))
            .await
            .unwrap();

        let similar = store.similar_cases(a.id, 3).await.unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].case.id, b.id);
        assert!((similar[0].similarity_score - 0.8).abs() < f64::EPSILON);

        CaseStore::delete_similarities_for_case(&store, a.id)
            .await
            .unwrap();
        assert!(store.similar_cases(a.id, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_case_sweeps_inbound_edges() {
        let store = InMemoryStore::new();
        let a = make_case(1, "login failure", Priority::Medium);
        let b = make_case(2, "login broken", Priority::Medium);
        store.save_case(&a).await.unwrap();
        store.save_case(&b).await.unwrap();

        CaseStore::insert_similarity(&store, &SimilarityEdge::new(a.id, b.id, 0.8))
            .await
            .unwrap();

        store.delete_case(&b.id).await.unwrap();

        // The edge pointing at the deleted case is gone, not just hidden.
        let remaining = store.edges.get(&a.id).map(|e| e.clone()).unwrap_or_default();
        assert!(remaining.is_empty());
        assert!(store.similar_cases(a.id, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_self_edge_rejected() {
        let store = InMemoryStore::new();
        let a = make_case(1, "login failure", Priority::Medium);
        let err = CaseStore::insert_similarity(&store, &SimilarityEdge::new(a.id, a.id, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_distinct_products() {
        let store = InMemoryStore::new();
        let mut a = make_case(1, "desc", Priority::Low);
        a.product = "CRM System".to_string();
        let mut b = make_case(2, "desc", Priority::Low);
        b.product = "Cloud Platform".to_string();
        let mut c = make_case(3, "desc", Priority::Low);
        c.product = "CRM System".to_string();

        for case in [&a, &b, &c] {
            store.save_case(case).await.unwrap();
        }

        let products = store.distinct_products().await.unwrap();
        assert_eq!(products, vec!["CRM System", "Cloud Platform"]);
    }
}
