use thiserror::Error;

/// Errors produced by channel requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RadioError {
    /// Nobody registered a responder for the request
    #[error("No responder for request '{request}' on channel '{channel}'")]
    NoResponder { channel: String, request: String },
}
