//! Movie database API plumbing.
//!
//! Requests are built here as data and executed by the Zellij host; results
//! come back as events and are decoded here again.
//!
//! - [`request`]: endpoint settings and `/search/movie` request builder
//! - [`response`]: status classification and JSON decoding

pub mod request;
pub mod response;

pub use request::{sequence_from_context, SearchEndpoint, SearchRequest, CONTEXT_QUERY, CONTEXT_SEQUENCE};
pub use response::{handle_response, PaginatedResponse};
