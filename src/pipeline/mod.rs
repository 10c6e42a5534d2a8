pub mod filters;
pub mod transform;

pub use filters::{dedup_by_hunk, DedupMetrics, FilterPipeline};
pub use transform::{expand_source, transform_source, TransformMetrics};
