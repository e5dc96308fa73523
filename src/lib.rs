//! Support case ingestion, classification and similarity service.
//!
//! Cases arrive through the HTTP API or the background generation job, get
//! taxonomy labels from the keyword classifier, and are linked to their
//! nearest historical neighbors by a TF-IDF similarity index rebuilt over
//! the corpus snapshot on every recomputation.

pub mod api;
pub mod classification;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod processing;
pub mod scheduler;
pub mod state;
