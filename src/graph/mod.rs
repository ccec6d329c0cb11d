//! Graph model shared with the host pipeline.
//!
//! Source nodes come in, output nodes go out. The host merges output nodes into its
//! graph by `id`, so ids must be stable across runs.

mod ids;
mod types;

// Re-export public API
pub use ids::make_id;
pub use types::{GraphNode, NodeKind, SourceNode};
