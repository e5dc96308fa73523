use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

/// A support case record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Case {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable display identifier (e.g. `CASE-00042`)
    pub case_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Reporting customer
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,

    /// Free-text problem description; immutable input to classification
    pub description: String,

    /// Product the case was filed against
    pub product: String,

    /// Customer geography
    pub geography: String,

    /// Case priority, supplied or defaulted at creation
    pub priority: Priority,

    /// Lifecycle status
    pub status: CaseStatus,

    /// Derived case type
    pub case_type: CaseType,

    /// Derived functional module
    pub module: String,

    /// Derived sub-module
    pub sub_module: String,

    /// Derived priority/type composite label
    pub category: Category,
}

impl Case {
    /// Create an unclassified case; derived fields carry defaults until the
    /// classification pipeline enriches them.
    pub fn new(
        case_id: String,
        customer_name: String,
        description: String,
        product: String,
        geography: String,
        priority: Priority,
        status: CaseStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            case_id,
            created_at: Utc::now(),
            customer_name,
            description,
            product,
            geography,
            priority,
            status,
            case_type: CaseType::Inquiry,
            module: "General".to_string(),
            sub_module: "Other".to_string(),
            category: Category::P3Standard,
        }
    }

    /// Check if the case is still open for work
    pub fn is_open(&self) -> bool {
        matches!(self.status, CaseStatus::Open | CaseStatus::InProgress)
    }

    /// Check if the case demands urgent attention
    pub fn is_high_priority(&self) -> bool {
        matches!(self.priority, Priority::High | Priority::Critical)
    }
}

/// Case priority, supplied by the reporter or defaulted to Medium
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumString,
    EnumIter,
    Display,
)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Case lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum CaseStatus {
    Open,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Open
    }
}

/// Derived case type; order matters for classification tie-breaking
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, EnumIter, Display,
)]
pub enum CaseType {
    Incident,
    Bug,
    Jira,
    #[serde(rename = "Feature Request")]
    #[strum(serialize = "Feature Request")]
    FeatureRequest,
    Inquiry,
}

/// Priority/type composite label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum Category {
    #[serde(rename = "P0 - Critical")]
    #[strum(serialize = "P0 - Critical")]
    P0Critical,
    #[serde(rename = "P1 - High Priority")]
    #[strum(serialize = "P1 - High Priority")]
    P1HighPriority,
    #[serde(rename = "P2 - Incident")]
    #[strum(serialize = "P2 - Incident")]
    P2Incident,
    #[serde(rename = "P2 - Bug Fix")]
    #[strum(serialize = "P2 - Bug Fix")]
    P2BugFix,
    #[serde(rename = "P3 - Standard")]
    #[strum(serialize = "P3 - Standard")]
    P3Standard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_case() -> Case {
        Case::new(
            "CASE-00001".to_string(),
            "Acme Corp".to_string(),
            "Unable to login to the system".to_string(),
            "Cloud Platform".to_string(),
            "Europe".to_string(),
            Priority::Medium,
            CaseStatus::Open,
        )
    }

    #[test]
    fn test_case_creation_defaults() {
        let case = sample_case();
        assert_eq!(case.case_type, CaseType::Inquiry);
        assert_eq!(case.module, "General");
        assert_eq!(case.sub_module, "Other");
        assert_eq!(case.category, Category::P3Standard);
        assert!(case.is_open());
        assert!(!case.is_high_priority());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Critical);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(CaseType::FeatureRequest.to_string(), "Feature Request");
        assert_eq!(CaseStatus::InProgress.to_string(), "In Progress");
        assert_eq!(Category::P2BugFix.to_string(), "P2 - Bug Fix");
    }

    #[test]
    fn test_labels_parse_back() {
        assert_eq!(
            CaseType::from_str("Feature Request").unwrap(),
            CaseType::FeatureRequest
        );
        assert_eq!(Priority::from_str("Critical").unwrap(), Priority::Critical);
        assert_eq!(
            CaseStatus::from_str("In Progress").unwrap(),
            CaseStatus::InProgress
        );
    }

    #[test]
    fn test_high_priority_check() {
        let mut case = sample_case();
        case.priority = Priority::Critical;
        assert!(case.is_high_priority());
        case.priority = Priority::High;
        assert!(case.is_high_priority());
        case.priority = Priority::Low;
        assert!(!case.is_high_priority());
    }
}
