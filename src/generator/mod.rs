//! Synthetic case generation for seeding and the recurring demo-data job.

use crate::models::{CaseStatus, Priority};
use crate::processing::NewCase;
use chrono::{Duration, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PRIORITIES: [(Priority, u32); 4] = [
    (Priority::Low, 30),
    (Priority::Medium, 40),
    (Priority::High, 20),
    (Priority::Critical, 10),
];

const STATUSES: [(CaseStatus, u32); 4] = [
    (CaseStatus::Open, 40),
    (CaseStatus::InProgress, 30),
    (CaseStatus::Resolved, 20),
    (CaseStatus::Closed, 10),
];

const PRODUCTS: &[&str] = &[
    "Cloud Platform",
    "Analytics Dashboard",
    "Mobile App",
    "API Gateway",
    "Data Warehouse",
    "CRM System",
    "E-commerce Platform",
    "Payment Gateway",
    "Messaging Service",
];

const GEOGRAPHIES: &[&str] = &[
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
    "Middle East",
    "Africa",
];

const CUSTOMERS: &[&str] = &[
    "Acme Corp",
    "Globex Industries",
    "Initech Solutions",
    "Umbrella Logistics",
    "Stark Manufacturing",
    "Wayne Enterprises",
    "Hooli Systems",
    "Vandelay Imports",
    "Prestige Worldwide",
    "Wonka Distribution",
    "Cyberdyne Analytics",
    "Tyrell Networks",
];

const ERRORS: &[&str] = &[
    "connection refused",
    "unexpected token in response",
    "internal server error",
    "request timed out",
    "permission denied",
    "a blank white screen",
];

const FEATURES: &[&str] = &[
    "bulk user import",
    "single sign-on",
    "custom report scheduling",
    "two-factor authentication",
    "dark mode",
    "audit log export",
];

const OPERATIONS: &[&str] = &[
    "monthly reports",
    "customer lookups",
    "order history",
    "inventory sync",
    "invoice generation",
];

const ACTIONS: &[&str] = &[
    "login", "checkout", "submit", "update", "delete", "create", "view", "export", "import",
    "sync", "connect",
];

const COMPONENTS: &[&str] = &[
    "the file upload handler",
    "the session middleware",
    "the password reset flow",
    "the admin console",
    "the export service",
];

const SERVICES: &[&str] = &[
    "Salesforce",
    "Stripe",
    "Slack",
    "Zendesk",
    "HubSpot",
    "QuickBooks",
];

const FORMATS: &[&str] = &["CSV", "JSON", "XML", "PDF"];

const DEVICES: &[&str] = &["mobile", "tablet", "desktop"];

const TIMES: &[&str] = &["peak hours", "the nightly batch window", "weekday mornings"];

/// Template-driven synthetic case generator.
///
/// A fresh instance is cheap; callers that need reproducible output seed it
/// explicitly with `with_seed`.
pub struct CaseGenerator {
    rng: StdRng,
}

impl CaseGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a batch of synthetic cases
    pub fn generate_batch(&mut self, count: usize) -> Vec<NewCase> {
        (0..count).map(|_| self.generate_case()).collect()
    }

    /// Generate a single synthetic case
    pub fn generate_case(&mut self) -> NewCase {
        let priority = self.weighted(&PRIORITIES);
        let status = self.weighted(&STATUSES);
        let days_ago = self.rng.gen_range(0..=30);

        let mut case = NewCase::new(
            self.pick(CUSTOMERS).to_string(),
            self.description(),
            self.pick(PRODUCTS).to_string(),
        );
        case.priority = Some(priority);
        case.status = Some(status);
        case.geography = Some(self.pick(GEOGRAPHIES).to_string());
        case.created_at = Some(Utc::now() - Duration::days(days_ago));
        case
    }

    fn description(&mut self) -> String {
        let template = self.rng.gen_range(0..15);
        match template {
            0 => format!(
                "Unable to login to the system. Getting error message: {}",
                self.pick(ERRORS)
            ),
            1 => format!(
                "Payment processing failed for transaction {:08x}. Customer is unable to complete checkout.",
                self.rng.gen::<u32>()
            ),
            2 => format!(
                "API endpoint /api/v1/{} returning 500 error intermittently.",
                self.pick(ACTIONS)
            ),
            3 => format!(
                "Dashboard not loading data correctly. Shows {} instead of charts.",
                self.pick(ERRORS)
            ),
            4 => format!("Request for new feature: {}", self.pick(FEATURES)),
            5 => format!(
                "Database query performance is very slow for {}",
                self.pick(OPERATIONS)
            ),
            6 => format!("Mobile app crashes when {}", self.pick(ACTIONS)),
            7 => format!("Security vulnerability found in {}", self.pick(COMPONENTS)),
            8 => format!(
                "Customer reporting incorrect billing amount of ${}",
                self.rng.gen_range(10..=1000)
            ),
            9 => format!("How do I configure {} in the system?", self.pick(FEATURES)),
            10 => format!(
                "Integration with {} not working as expected",
                self.pick(SERVICES)
            ),
            11 => format!("Need documentation on how to use {}", self.pick(FEATURES)),
            12 => format!("System experiencing high latency during {}", self.pick(TIMES)),
            13 => format!(
                "Data export functionality is broken for {} format",
                self.pick(FORMATS)
            ),
            _ => format!(
                "User interface has display issues on {}",
                self.pick(DEVICES)
            ),
        }
    }

    fn pick<'a>(&mut self, pool: &'a [&'a str]) -> &'a str {
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn weighted<T: Copy>(&mut self, table: &[(T, u32)]) -> T {
        let dist = WeightedIndex::new(table.iter().map(|(_, w)| *w))
            .expect("weight table is non-empty and positive");
        table[dist.sample(&mut self.rng)].0
    }
}

impl Default for CaseGenerator {
    fn default() -> Self {
        Self::new()
    }
}
