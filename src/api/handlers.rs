use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{Case, CaseStatus, CaseType, Priority};
use crate::processing::NewCase;
use crate::state::{CaseFilter, DashboardStats, SimilarCase};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Dashboard statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let stats = state.processor.store().dashboard_stats().await?;
    Ok(Json(stats))
}

/// List cases with optional filters
pub async fn list_cases(
    State(state): State<AppState>,
    Query(params): Query<ListCasesQuery>,
) -> Result<Json<ListCasesResponse>> {
    let filter = params.try_into_filter()?;

    let page = 0;
    let page_size = 1000;
    let cases = state
        .processor
        .store()
        .list_cases(&filter, page, page_size)
        .await?;

    Ok(Json(ListCasesResponse {
        count: cases.len(),
        cases,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCasesQuery {
    pub customer_name: Option<String>,
    pub case_id: Option<String>,
    pub product: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub case_type: Option<String>,
    pub status: Option<String>,
}

impl ListCasesQuery {
    fn try_into_filter(self) -> Result<CaseFilter> {
        let mut filter = CaseFilter {
            customer_name: self.customer_name,
            case_id: self.case_id,
            ..Default::default()
        };

        if let Some(product) = self.product {
            filter.products.push(product);
        }
        if let Some(priority) = self.priority {
            filter.priorities.push(parse_label::<Priority>(&priority, "priority")?);
        }
        if let Some(case_type) = self.case_type {
            filter.case_types.push(parse_label::<CaseType>(&case_type, "type")?);
        }
        if let Some(status) = self.status {
            filter.statuses.push(parse_label::<CaseStatus>(&status, "status")?);
        }

        Ok(filter)
    }
}

fn parse_label<T: FromStr>(value: &str, field: &str) -> Result<T> {
    T::from_str(value)
        .map_err(|_| AppError::Validation(format!("Unknown {} label: {}", field, value)))
}

#[derive(Debug, Serialize)]
pub struct ListCasesResponse {
    pub cases: Vec<Case>,
    pub count: usize,
}

/// High and Critical priority cases
pub async fn high_priority_cases(State(state): State<AppState>) -> Result<Json<ListCasesResponse>> {
    let filter = CaseFilter {
        priorities: vec![Priority::Critical, Priority::High],
        ..Default::default()
    };
    filtered_cases(&state, filter).await
}

/// Incident-type cases
pub async fn incident_cases(State(state): State<AppState>) -> Result<Json<ListCasesResponse>> {
    let filter = CaseFilter {
        case_types: vec![CaseType::Incident],
        ..Default::default()
    };
    filtered_cases(&state, filter).await
}

/// Open cases
pub async fn open_cases(State(state): State<AppState>) -> Result<Json<ListCasesResponse>> {
    let filter = CaseFilter {
        statuses: vec![CaseStatus::Open],
        ..Default::default()
    };
    filtered_cases(&state, filter).await
}

async fn filtered_cases(state: &AppState, filter: CaseFilter) -> Result<Json<ListCasesResponse>> {
    let cases = state
        .processor
        .store()
        .list_cases(&filter, 0, 1000)
        .await?;
    Ok(Json(ListCasesResponse {
        count: cases.len(),
        cases,
    }))
}

/// Get a case by display id
pub async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Case>> {
    let case = state
        .processor
        .store()
        .get_case_by_display_id(&case_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Case {} not found", case_id)))?;

    Ok(Json(case))
}

/// Get cases similar to a case
pub async fn similar_cases(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<SimilarCasesResponse>> {
    let case = state
        .processor
        .store()
        .get_case_by_display_id(&case_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Case {} not found", case_id)))?;

    let similar = state
        .processor
        .store()
        .similar_cases(case.id, state.classification.top_k)
        .await?;

    Ok(Json(SimilarCasesResponse {
        count: similar.len(),
        similar_cases: similar,
    }))
}

#[derive(Debug, Serialize)]
pub struct SimilarCasesResponse {
    pub similar_cases: Vec<SimilarCase>,
    pub count: usize,
}

/// Create a case
pub async fn create_case(
    State(state): State<AppState>,
    Json(request): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CreateCaseResponse>)> {
    request.validate()?;

    let mut new_case = NewCase::new(request.customer_name, request.description, request.product);
    new_case.priority = request.priority;
    new_case.status = request.status;
    new_case.geography = request.geography;

    let (case, outcome) = state.processor.create_case(new_case).await?;

    let similar_cases_found = outcome.edges().len();

    Ok((
        StatusCode::CREATED,
        Json(CreateCaseResponse {
            case,
            similar_cases_found,
        }),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCaseRequest {
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 255))]
    pub product: String,
    pub priority: Option<Priority>,
    pub status: Option<CaseStatus>,
    pub geography: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCaseResponse {
    #[serde(flatten)]
    pub case: Case,
    pub similar_cases_found: usize,
}

/// Distinct products across all cases
pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = state.processor.store().distinct_products().await?;
    Ok(Json(ProductsResponse { products }))
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<String>,
}

/// Fixed case type taxonomy
pub async fn list_types() -> Json<TypesResponse> {
    Json(TypesResponse {
        types: CaseType::iter().map(|t| t.to_string()).collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct TypesResponse {
    pub types: Vec<String>,
}

/// Fixed priority scale
pub async fn list_priorities() -> Json<PrioritiesResponse> {
    Json(PrioritiesResponse {
        priorities: Priority::iter().map(|p| p.to_string()).collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct PrioritiesResponse {
    pub priorities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parsing_rejects_unknown_labels() {
        let query = ListCasesQuery {
            priority: Some("Sky-High".to_string()),
            ..Default::default()
        };
        assert!(query.try_into_filter().is_err());
    }

    #[test]
    fn test_query_parsing_accepts_spaced_labels() {
        let query = ListCasesQuery {
            case_type: Some("Feature Request".to_string()),
            status: Some("In Progress".to_string()),
            ..Default::default()
        };
        let filter = query.try_into_filter().unwrap();
        assert_eq!(filter.case_types, vec![CaseType::FeatureRequest]);
        assert_eq!(filter.statuses, vec![CaseStatus::InProgress]);
    }
}
