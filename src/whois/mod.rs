//! WHOIS enrichment.
//!
//! - `types`: the schema-less report and its fallback-chain accessors
//! - `cache`: CIDR range cache used to skip repeat lookups
//! - `client`: the lookup collaborator trait and the port-43 client
//! - `parse`: raw response parsing
//! - `transform`: the enrichment step that ties them together

mod cache;
mod client;
mod parse;
mod transform;
mod types;

// Re-export public API
pub use cache::RangeCache;
pub use client::{TcpWhoisLookup, WhoisLookup};
pub use transform::{TransformInfo, WhoisReportTransform};
pub use types::{WhoisReport, ASN_FIELDS, IDENTITY_FIELDS};
