pub mod processor;

pub use processor::{CaseProcessor, NewCase};
