// Upload processing pipeline: header resolution, row validation,
// normalization, and the orchestrator that drives them in order.

pub mod header;
pub mod normalize;
pub mod orchestrator;
pub mod validate;

// Re-export the types callers interact with
pub use header::{resolve_headers, HeaderResolution};
pub use orchestrator::{Pipeline, PipelineFailure, PipelineOutcome};
pub use validate::RowRejection;
