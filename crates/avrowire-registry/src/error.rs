//! Registry Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure: connect error, TLS error, or the bounded
    /// read timeout expiring.
    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry answered, but not with a 2xx. Kept separate from
    /// transport failures for log value only; callers treat both the same.
    #[error("Registry returned status {status} for schema id {id}")]
    HttpStatus { id: u32, status: u16 },

    #[error("Registry returned an empty body for schema id {0}")]
    EmptyResponse(u32),

    /// Response body was not JSON, or lacked the `"schema"` string field.
    #[error("Malformed registry response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Schema text for id {id} is not a valid Avro schema: {reason}")]
    InvalidSchema { id: u32, reason: String },
}
