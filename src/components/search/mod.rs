mod actor;
pub mod aggregator;
pub mod fetcher;
pub mod filter;
pub mod format;
mod handle;
pub mod planner;
pub mod projection;
pub mod request;
pub mod resolver;
pub mod response;
mod service;

pub use handle::SearchHandle;
pub use planner::FetchPolicy;
pub use request::{request_schema, SearchRequest, SourceSelector};
pub use response::{SearchResponse, StructuredPayload, ToolResponse};
pub use service::{SearchService, SearchSettings};
