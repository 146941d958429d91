//! Request framing: the API version window and the HTTP/WebSocket envelope

pub mod api_version;
pub mod envelope;

pub use api_version::ApiVersionParser;
pub use envelope::{RequestEnvelope, Transport};
