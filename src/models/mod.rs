//! Request and response types.

pub mod payload;
pub mod request;

pub use payload::{ErrorBody, ExpectedPayload, Meta, QueryResponse, StatBar, Stats};
pub use request::QueryRequest;
