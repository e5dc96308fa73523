use crate::models::{CaseType, Category, Priority};

/// Keyword table for case type classification.
///
/// Order is significant: when two labels score equally, the first one in this
/// table wins. The fallback when nothing matches is `Inquiry`.
const TYPE_KEYWORDS: &[(CaseType, &[&str])] = &[
    (
        CaseType::Incident,
        &[
            "down",
            "outage",
            "crash",
            "error",
            "failure",
            "not working",
            "broken",
            "critical",
            "urgent",
        ],
    ),
    (
        CaseType::Bug,
        &["bug", "defect", "issue", "wrong", "incorrect", "glitch", "problem"],
    ),
    (
        CaseType::Jira,
        &["task", "story", "epic", "sprint", "jira", "ticket"],
    ),
    (
        CaseType::FeatureRequest,
        &[
            "feature",
            "enhancement",
            "improvement",
            "add",
            "new",
            "want",
            "need",
            "request",
        ],
    ),
    (
        CaseType::Inquiry,
        &[
            "how",
            "what",
            "when",
            "where",
            "why",
            "question",
            "help",
            "info",
            "documentation",
        ],
    ),
];

/// Keyword table for functional module classification; same ordering and
/// tie-break rules as `TYPE_KEYWORDS`. Fallback is `("General", "Other")`.
const MODULE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Authentication",
        &["login", "password", "auth", "sign in", "access", "credential"],
    ),
    (
        "Payment",
        &["payment", "billing", "invoice", "charge", "subscription", "card"],
    ),
    (
        "API",
        &["api", "endpoint", "integration", "webhook", "rest", "graphql"],
    ),
    (
        "Database",
        &["database", "data", "query", "storage", "backup", "migration"],
    ),
    (
        "UI/UX",
        &["interface", "display", "layout", "design", "button", "screen", "page"],
    ),
    (
        "Performance",
        &["slow", "performance", "speed", "latency", "timeout", "loading"],
    ),
    (
        "Security",
        &["security", "vulnerability", "breach", "encryption", "ssl", "https"],
    ),
];

/// Rule-based taxonomy classifier over free-text case descriptions.
///
/// Scoring is a plain substring containment count: a keyword matches anywhere
/// in the lowercased description, including inside longer words. Every
/// function here is total over arbitrary string input.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyClassifier;

impl TaxonomyClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the case type from a description.
    pub fn classify_type(&self, description: &str) -> CaseType {
        let description = description.to_lowercase();

        let mut best = CaseType::Inquiry;
        let mut best_score = 0usize;

        for (case_type, keywords) in TYPE_KEYWORDS {
            let score = keyword_score(&description, keywords);
            // Strictly greater keeps the earlier label on ties.
            if score > best_score {
                best_score = score;
                best = *case_type;
            }
        }

        if best_score == 0 {
            CaseType::Inquiry
        } else {
            best
        }
    }

    /// Classify the functional module and sub-module from a description.
    pub fn classify_module(&self, description: &str) -> (String, String) {
        let description = description.to_lowercase();

        let mut best: Option<&str> = None;
        let mut best_score = 0usize;

        for (module, keywords) in MODULE_KEYWORDS {
            let score = keyword_score(&description, keywords);
            if score > best_score {
                best_score = score;
                best = Some(module);
            }
        }

        match best {
            Some(module) if best_score > 0 => {
                (module.to_string(), format!("{} Support", module))
            }
            _ => ("General".to_string(), "Other".to_string()),
        }
    }

    /// Assign the composite category label from type and priority.
    ///
    /// The table is evaluated in a fixed order and priority outranks type.
    pub fn assign_category(&self, case_type: CaseType, priority: Priority) -> Category {
        match (priority, case_type) {
            (Priority::Critical, _) => Category::P0Critical,
            (Priority::High, _) => Category::P1HighPriority,
            (_, CaseType::Incident) => Category::P2Incident,
            (_, CaseType::Bug) => Category::P2BugFix,
            _ => Category::P3Standard,
        }
    }
}

fn keyword_score(description: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| description.contains(*kw)).count()
}
