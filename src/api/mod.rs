pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::config::ClassificationConfig;
use crate::processing::CaseProcessor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<CaseProcessor>,
    pub classification: ClassificationConfig,
}

impl AppState {
    pub fn new(processor: Arc<CaseProcessor>, classification: ClassificationConfig) -> Self {
        Self {
            processor,
            classification,
        }
    }
}
