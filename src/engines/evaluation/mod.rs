pub mod traits;
pub mod field_average;

pub use traits::{QualityEvaluator, FnEvaluator};
pub use field_average::FieldAverageEvaluator;
