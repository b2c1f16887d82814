//! Qrdrop API
//!
//! HTTP surface over the transfer service: multipart upload, token-addressed
//! download, manual delete, health, and the OpenAPI document. Exposed as a
//! library so integration tests can build the router without binding a
//! socket.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod qr;
pub mod server;
pub mod setup;
pub mod state;
pub mod telemetry;
