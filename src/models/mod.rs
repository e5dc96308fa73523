pub mod case;
pub mod similarity;

pub use case::*;
pub use similarity::*;
